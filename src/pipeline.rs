use crate::audit;
use crate::config::Config;
use crate::error::Result;
use crate::{extract, load, query, rates, transform};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Runs the full pipeline strictly in order: extract, load rates,
/// transform, persist to CSV and SQLite, then execute the configured
/// queries over one connection spanning both the load and query phases.
/// Each stage boundary appends a line to the audit trail.
pub fn run(config: &Config) -> Result<()> {
    let log_path = Path::new(&config.log_path);
    audit::log_progress("Preliminaries complete. Initiating ETL process", log_path)?;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_seconds))
        .build()?;
    let records = extract::extract(&client, &config.source_url)?;
    audit::log_progress("Data extraction complete.", log_path)?;

    let rates = rates::load_rates(Path::new(&config.exchange_rate_path))?;
    audit::log_progress("Exchange rate data loaded.", log_path)?;

    let converted = transform::transform(&records, &rates)?;
    if let Some(first) = converted.first() {
        info!(
            "Sample conversion: {} = {} EUR billion",
            first.name, first.mc_eur_billion
        );
    }
    audit::log_progress("Data transformation complete.", log_path)?;

    load::save_csv(&converted, Path::new(&config.csv_output_path))?;
    audit::log_progress("Transformed data saved to CSV file.", log_path)?;

    let mut conn = Connection::open(&config.db_path)?;
    load::save_to_db(&mut conn, &config.table_name, &converted)?;
    audit::log_progress(
        &format!("Data loaded into table {} in database.", config.table_name),
        log_path,
    )?;

    for sql in &config.queries {
        query::run_query(&conn, sql, log_path)?;
    }
    audit::log_progress("Process complete.", log_path)?;
    Ok(())
}
