use crate::types::{
    AnnualMetricsRow, AnnualRow, Completeness, CountryTimeSeries, MonthlyRecord, RankingEntry,
};
use crate::util::round2;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// The fuel categories that count as electric vehicles downstream. Every
/// other category is discovered dynamically from the data.
const EV_FUELS: [&str; 2] = ["BatteryElectric", "PluginHybrid"];

/// Count, per (country, year), how many distinct months have data.
///
/// Distinct month labels, not row count: a month reported under several
/// fuel categories still counts once.
pub fn completeness(records: &[MonthlyRecord]) -> BTreeMap<(String, i32), Completeness> {
    let mut months: BTreeMap<(String, i32), HashSet<u32>> = BTreeMap::new();
    for r in records {
        months
            .entry((r.country.clone(), r.year))
            .or_default()
            .insert(r.month);
    }
    months
        .into_iter()
        .map(|(key, set)| {
            let n = set.len() as u32;
            (
                key,
                Completeness {
                    months_available: n,
                    is_complete: n == 12,
                },
            )
        })
        .collect()
}

/// Sum monthly values into annual totals per (country, year, fuel), then
/// flatten into one row per (country, year) with a column for every fuel
/// category seen anywhere in the dataset.
///
/// A (country, year) that never reported a given fuel gets an explicit
/// zero for it, so every row carries the same column set. Rows come back
/// sorted by (country, year) ascending.
pub fn aggregate_annual(records: &[MonthlyRecord]) -> Vec<AnnualRow> {
    let mut fuel_set: BTreeSet<String> = BTreeSet::new();
    let mut totals: BTreeMap<(String, i32), HashMap<String, f64>> = BTreeMap::new();
    for r in records {
        fuel_set.insert(r.fuel.clone());
        *totals
            .entry((r.country.clone(), r.year))
            .or_default()
            .entry(r.fuel.clone())
            .or_insert(0.0) += r.value;
    }

    totals
        .into_iter()
        .map(|((country, year), by_fuel)| {
            let fuels: BTreeMap<String, f64> = fuel_set
                .iter()
                .map(|f| (f.clone(), by_fuel.get(f).copied().unwrap_or(0.0)))
                .collect();
            AnnualRow {
                country,
                year,
                fuels,
            }
        })
        .collect()
}

/// Derive EV metrics from the aggregated rows and merge in completeness.
///
/// Expects `rows` sorted by (country, year) ascending, which is how
/// `aggregate_annual` returns them. The "previous" EV value used for YoY
/// growth is positional: the immediately preceding row for the same
/// country, even across a gap year.
pub fn compute_metrics(
    rows: Vec<AnnualRow>,
    completeness: &BTreeMap<(String, i32), Completeness>,
) -> Vec<AnnualMetricsRow> {
    let mut out = Vec::with_capacity(rows.len());
    let mut prev: Option<(String, f64)> = None;

    for row in rows {
        let ev_sales: f64 = EV_FUELS
            .iter()
            .map(|f| row.fuels.get(*f).copied().unwrap_or(0.0))
            .sum();
        let total_sales: f64 = row.fuels.values().sum();
        let ev_percentage = if total_sales == 0.0 {
            None
        } else {
            Some(round2(ev_sales / total_sales * 100.0))
        };

        let previous_ev = match &prev {
            Some((country, value)) if *country == row.country => Some(*value),
            _ => None,
        };
        let yoy_growth = match previous_ev {
            Some(p) if p != 0.0 => Some(round2((ev_sales - p) / p * 100.0)),
            _ => None,
        };

        let comp = completeness
            .get(&(row.country.clone(), row.year))
            .copied()
            .unwrap_or(Completeness {
                months_available: 0,
                is_complete: false,
            });

        prev = Some((row.country.clone(), ev_sales));
        out.push(AnnualMetricsRow {
            country: row.country,
            year: row.year,
            ev_sales,
            total_sales,
            ev_percentage,
            yoy_growth,
            months_available: comp.months_available,
            is_complete: comp.is_complete,
        });
    }
    out
}

#[derive(Debug, Clone)]
pub struct Rankings {
    pub latest_year: i32,
    pub global_ev_total: f64,
    pub entries: Vec<RankingEntry>,
}

/// Rank countries by EV sales in the most recent year of the dataset and
/// compute each one's share of the global EV total.
///
/// The descending sort is stable, so ties keep the incoming row order.
/// Shares stay at full precision; they are all `None` when the global
/// total is zero.
pub fn compute_rankings(rows: &[AnnualMetricsRow]) -> Rankings {
    let latest_year = rows.iter().map(|r| r.year).max().unwrap_or(0);
    let mut latest: Vec<&AnnualMetricsRow> = rows.iter().filter(|r| r.year == latest_year).collect();
    let global_ev_total: f64 = latest.iter().map(|r| r.ev_sales).sum();

    latest.sort_by(|a, b| b.ev_sales.partial_cmp(&a.ev_sales).unwrap_or(Ordering::Equal));

    let entries = latest
        .into_iter()
        .enumerate()
        .map(|(idx, r)| RankingEntry {
            country: r.country.clone(),
            rank: idx + 1,
            ev_sales: r.ev_sales,
            global_share: if global_ev_total == 0.0 {
                None
            } else {
                Some(r.ev_sales / global_ev_total * 100.0)
            },
        })
        .collect();

    Rankings {
        latest_year,
        global_ev_total,
        entries,
    }
}

/// Project the metric rows into one `CountryTimeSeries` per country,
/// keyed by country name.
///
/// Every parallel sequence is aligned to `years`; rank and global share
/// are explicit nulls for countries absent from the latest year.
pub fn build_series(
    rows: &[AnnualMetricsRow],
    rankings: &Rankings,
) -> BTreeMap<String, CountryTimeSeries> {
    let ranked: HashMap<&str, &RankingEntry> = rankings
        .entries
        .iter()
        .map(|e| (e.country.as_str(), e))
        .collect();

    let mut out: BTreeMap<String, CountryTimeSeries> = BTreeMap::new();
    for r in rows {
        let series = out.entry(r.country.clone()).or_insert_with(|| {
            let (rank, global_share) = match ranked.get(r.country.as_str()) {
                Some(e) => (Some(e.rank), e.global_share),
                None => (None, None),
            };
            CountryTimeSeries {
                years: Vec::new(),
                ev_sales: Vec::new(),
                total_sales: Vec::new(),
                ev_percentage: Vec::new(),
                yoy_growth: Vec::new(),
                months_available: Vec::new(),
                is_complete: Vec::new(),
                rank,
                global_share,
            }
        });
        series.years.push(r.year);
        series.ev_sales.push(r.ev_sales);
        series.total_sales.push(r.total_sales);
        series.ev_percentage.push(r.ev_percentage);
        series.yoy_growth.push(r.yoy_growth);
        series.months_available.push(r.months_available);
        series
            .is_complete
            .push(if r.is_complete { "Yes" } else { "No" }.to_string());
    }
    out
}
