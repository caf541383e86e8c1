use crate::types::{MonthlyRecord, RawRow};
use crate::util::{parse_f64_safe, parse_i32_safe};
use csv::ReaderBuilder;
use std::error::Error;
use std::io::Read;

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub min_year: i32,
    pub max_year: i32,
}

/// Load the monthly sales CSV into typed records.
///
/// Any malformed field aborts the whole run: the dashboard must never be
/// rebuilt from a partially loaded dataset, so the first bad row turns
/// into an error instead of being skipped.
pub fn load(path: &str) -> Result<(Vec<MonthlyRecord>, LoadReport), Box<dyn Error>> {
    let file = std::fs::File::open(path)?;
    load_from_reader(file)
}

pub fn load_from_reader<R: Read>(
    reader: R,
) -> Result<(Vec<MonthlyRecord>, LoadReport), Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().from_reader(reader);
    let mut records: Vec<MonthlyRecord> = Vec::new();

    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        // Header occupies line 1, so data rows start at line 2.
        let line = idx + 2;
        let row = result?;

        let country = match row.country.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => return Err(format!("row {}: missing Country", line).into()),
        };
        let yyyymm = parse_i32_safe(row.yyyymm.as_deref())
            .ok_or_else(|| format!("row {}: unparsable YYYYMM {:?}", line, row.yyyymm))?;
        let fuel = match row.fuel.as_deref().map(str::trim) {
            Some(f) if !f.is_empty() => f.to_string(),
            _ => return Err(format!("row {}: missing Fuel", line).into()),
        };
        let value = parse_f64_safe(row.value.as_deref())
            .ok_or_else(|| format!("row {}: unparsable Value {:?}", line, row.value))?;

        records.push(MonthlyRecord {
            country,
            year: yyyymm / 100,
            month: (yyyymm % 100) as u32,
            fuel,
            value,
        });
    }

    let report = LoadReport {
        total_rows: records.len(),
        min_year: records.iter().map(|r| r.year).min().unwrap_or(0),
        max_year: records.iter().map(|r| r.year).max().unwrap_or(0),
    };
    Ok((records, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_split_yyyymm_into_year_and_month() {
        let csv = "Country,YYYYMM,Fuel,Value\nNorway,202301,BatteryElectric,1234\n";
        let (records, report) = load_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country, "Norway");
        assert_eq!(records[0].year, 2023);
        assert_eq!(records[0].month, 1);
        assert_eq!(records[0].fuel, "BatteryElectric");
        assert_eq!(records[0].value, 1234.0);
        assert_eq!(report.total_rows, 1);
        assert_eq!(report.min_year, 2023);
        assert_eq!(report.max_year, 2023);
    }

    #[test]
    fn should_report_year_range_across_rows() {
        let csv = "Country,YYYYMM,Fuel,Value\n\
                   Norway,202112,Gasoline,10\n\
                   Sweden,202306,Diesel,20\n";
        let (_, report) = load_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(report.min_year, 2021);
        assert_eq!(report.max_year, 2023);
    }

    #[test]
    fn should_accept_thousands_separators_in_value() {
        let csv = "Country,YYYYMM,Fuel,Value\nNorway,202301,Gasoline,\"1,234\"\n";
        let (records, _) = load_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(records[0].value, 1234.0);
    }

    #[test]
    fn should_fail_the_whole_run_on_an_unparsable_value() {
        let csv = "Country,YYYYMM,Fuel,Value\n\
                   Norway,202301,Gasoline,10\n\
                   Norway,202302,Gasoline,oops\n";
        let err = load_from_reader(csv.as_bytes()).unwrap_err();

        assert!(err.to_string().contains("row 3"));
        assert!(err.to_string().contains("Value"));
    }

    #[test]
    fn should_fail_on_an_unparsable_yyyymm() {
        let csv = "Country,YYYYMM,Fuel,Value\nNorway,2023-01,Gasoline,10\n";
        let err = load_from_reader(csv.as_bytes()).unwrap_err();

        assert!(err.to_string().contains("YYYYMM"));
    }

    #[test]
    fn should_fail_on_a_missing_country() {
        let csv = "Country,YYYYMM,Fuel,Value\n,202301,Gasoline,10\n";
        let err = load_from_reader(csv.as_bytes()).unwrap_err();

        assert!(err.to_string().contains("Country"));
    }
}
