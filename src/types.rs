use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "YYYYMM")]
    pub yyyymm: Option<String>,
    #[serde(rename = "Fuel")]
    pub fuel: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<String>,
}

/// One monthly sales observation. Year and month are split out of the
/// combined YYYYMM field at load time.
#[derive(Debug, Clone)]
pub struct MonthlyRecord {
    pub country: String,
    pub year: i32,
    pub month: u32,
    pub fuel: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completeness {
    pub months_available: u32,
    pub is_complete: bool,
}

/// Annual fuel totals for one (country, year), zero-filled against the
/// full fuel category set observed in the dataset.
#[derive(Debug, Clone)]
pub struct AnnualRow {
    pub country: String,
    pub year: i32,
    pub fuels: std::collections::BTreeMap<String, f64>,
}

/// An `AnnualRow` with the derived EV metrics and completeness merged in.
///
/// `ev_percentage` and `yoy_growth` are `None` where the underlying
/// division is undefined (zero total sales, missing or zero previous EV
/// sales). That distinction survives into the JSON output as `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualMetricsRow {
    pub country: String,
    pub year: i32,
    pub ev_sales: f64,
    pub total_sales: f64,
    pub ev_percentage: Option<f64>,
    pub yoy_growth: Option<f64>,
    pub months_available: u32,
    pub is_complete: bool,
}

/// Latest-year ranking for one country. `global_share` is kept at full
/// precision and is `None` when the global EV total is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub country: String,
    pub rank: usize,
    pub ev_sales: f64,
    pub global_share: Option<f64>,
}

/// Console preview row for the latest-year ranking table.
#[derive(Debug, Tabled, Clone)]
pub struct RankingRow {
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "EVSales")]
    pub ev_sales: String,
    #[tabled(rename = "GlobalShare")]
    pub global_share: String,
}

/// Per-country output unit of the web data file. All sequence fields run
/// parallel to `years`, which is strictly ascending.
#[derive(Debug, Serialize, PartialEq)]
pub struct CountryTimeSeries {
    pub years: Vec<i32>,
    pub ev_sales: Vec<f64>,
    pub total_sales: Vec<f64>,
    pub ev_percentage: Vec<Option<f64>>,
    pub yoy_growth: Vec<Option<f64>>,
    pub months_available: Vec<u32>,
    pub is_complete: Vec<String>,
    pub rank: Option<usize>,
    pub global_share: Option<f64>,
}
