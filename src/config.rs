use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Runtime configuration for one pipeline run. Every path, the source
/// URL, and the query list are injected from here rather than read from
/// module-level constants.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page to extract the banks table from.
    pub source_url: String,
    /// Two-column CSV (Currency,Rate) with the conversion multipliers.
    pub exchange_rate_path: String,
    /// Destination for the transformed table as CSV.
    pub csv_output_path: String,
    /// Single-file SQLite database path.
    pub db_path: String,
    /// Name of the relational table that is replaced on each load.
    pub table_name: String,
    /// Append-only audit trail of pipeline stages.
    pub log_path: String,
    /// Timeout applied to the page fetch.
    pub http_timeout_seconds: u64,
    /// Read-only queries executed at the end of a run.
    pub queries: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url:
                "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks"
                    .to_string(),
            exchange_rate_path: "data/exchange_rate.csv".to_string(),
            csv_output_path: "output/largest_banks.csv".to_string(),
            db_path: "Banks.db".to_string(),
            table_name: "Largest_banks".to_string(),
            log_path: "logs/etl_project_log.txt".to_string(),
            http_timeout_seconds: 30,
            queries: vec![
                "SELECT * FROM Largest_banks".to_string(),
                "SELECT AVG(MC_GBP_Billion) FROM Largest_banks".to_string(),
                "SELECT \"Bank name\" FROM Largest_banks LIMIT 5".to_string(),
            ],
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file, falling back to the built-in
    /// defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file '{}' not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.table_name, "Largest_banks");
        assert_eq!(config.queries.len(), 3);
    }

    #[test]
    fn partial_file_keeps_defaults_for_omitted_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "db_path = \"other.db\"").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.db_path, "other.db");
        assert_eq!(config.table_name, "Largest_banks");
    }
}
