use crate::error::{EtlError, Result};
use crate::types::ExchangeRateTable;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Currency")]
    currency: String,

    #[serde(rename = "Rate")]
    rate: f64,
}

/// Loads the currency → multiplier table from a two-column CSV with a
/// `Currency,Rate` header. Duplicate currency codes keep the last value
/// seen. Rates must be finite and positive.
pub fn load_rates(path: &Path) -> Result<ExchangeRateTable> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| EtlError::Rates(format!("failed to open '{}': {}", path.display(), e)))?;

    let mut rates = HashMap::new();
    for row in reader.deserialize() {
        let row: RateRow = row?;
        if !row.rate.is_finite() || row.rate <= 0.0 {
            return Err(EtlError::Rates(format!(
                "rate for '{}' must be a positive number, got {}",
                row.currency, row.rate
            )));
        }
        rates.insert(row.currency, row.rate);
    }

    if rates.is_empty() {
        return Err(EtlError::Rates(format!(
            "'{}' contains no exchange rates",
            path.display()
        )));
    }
    info!("Loaded {} exchange rates", rates.len());
    Ok(rates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_rates(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exchange_rate.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_a_rate_table() {
        let (_dir, path) = write_rates("Currency,Rate\nGBP,0.8\nEUR,0.9\nINR,80.0\n");
        let rates = load_rates(&path).unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates["GBP"], 0.8);
        assert_eq!(rates["INR"], 80.0);
    }

    #[test]
    fn duplicate_codes_keep_the_last_value() {
        let (_dir, path) = write_rates("Currency,Rate\nGBP,0.8\nGBP,0.75\n");
        let rates = load_rates(&path).unwrap();
        assert_eq!(rates["GBP"], 0.75);
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(load_rates(Path::new("/nonexistent/rates.csv")).is_err());
    }

    #[test]
    fn header_only_file_is_fatal() {
        let (_dir, path) = write_rates("Currency,Rate\n");
        assert!(load_rates(&path).is_err());
    }

    #[test]
    fn non_positive_rate_is_fatal() {
        let (_dir, path) = write_rates("Currency,Rate\nGBP,-0.8\n");
        assert!(load_rates(&path).is_err());
    }
}
