// Entry point for the dashboard update pipeline.
//
// One-shot batch run: read the monthly sales CSV, aggregate it into
// annual per-country statistics, derive the EV metrics and global
// rankings, and write the web data file. Any failure aborts the run
// before the output is touched; there is no partial artifact.
mod analysis;
mod loader;
mod output;
mod types;
mod util;

use chrono::Local;
use std::collections::HashSet;
use std::error::Error;
use std::process::ExitCode;
use types::RankingRow;
use util::{format_int, format_number};

const INPUT_PATH: &str = "all_carsales_monthly.csv";
const OUTPUT_PATH: &str = "ev_data.js";
const OUTPUT_NAME: &str = "evData";

fn run() -> Result<(), Box<dyn Error>> {
    println!(
        "Starting dashboard update at {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    println!("Step 1: Reading CSV data...");
    let (records, report) = loader::load(INPUT_PATH)?;
    if records.is_empty() {
        return Err(format!("no data rows in {}", INPUT_PATH).into());
    }
    println!("  - Loaded {} records", format_int(report.total_rows as i64));
    println!(
        "  - Years covered: {} to {}",
        report.min_year, report.max_year
    );

    println!("Step 2: Checking data completeness...");
    let completeness = analysis::completeness(&records);

    println!("Step 3: Aggregating annual data...");
    let annual = analysis::aggregate_annual(&records);
    let rows = analysis::compute_metrics(annual, &completeness);
    let countries: HashSet<&str> = rows.iter().map(|r| r.country.as_str()).collect();
    println!(
        "  - Processed {} country-year combinations",
        format_int(rows.len() as i64)
    );
    println!("  - Countries analyzed: {}", countries.len());

    println!("Step 4: Calculating global rankings...");
    let rankings = analysis::compute_rankings(&rows);
    println!("  - Rankings calculated for {}", rankings.latest_year);
    println!(
        "  - Global EV sales: {}",
        format_number(rankings.global_ev_total, 0)
    );
    let preview: Vec<RankingRow> = rankings
        .entries
        .iter()
        .map(|e| RankingRow {
            rank: e.rank,
            country: e.country.clone(),
            ev_sales: format_number(e.ev_sales, 0),
            global_share: match e.global_share {
                Some(share) => format_number(share, 2),
                None => "-".to_string(),
            },
        })
        .collect();
    output::preview_table_rows(&preview, 10);

    println!("Step 5: Generating web data file...");
    let series = analysis::build_series(&rows, &rankings);
    output::write_js(OUTPUT_PATH, OUTPUT_NAME, &series)?;

    println!("Step 6: Complete!");
    println!(
        "  - Updated {} with {} countries",
        OUTPUT_PATH,
        series.len()
    );
    println!(
        "  - Data range: {} to {}",
        report.min_year, report.max_year
    );
    println!(
        "\nDashboard update finished at {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Dashboard update failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
