use crate::error::Result;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

// Year-Monthname-Day-Hour:Minute:Second
const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Appends one timestamped line to the run's audit trail, creating parent
/// directories as needed. The file is opened in append mode and closed when
/// the handle goes out of scope.
pub fn log_progress(message: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    writeln!(file, "{} : {}", timestamp, message)?;
    Ok(())
}
