use crate::error::Result;
use crate::types::ConvertedRecord;
use rusqlite::{params, Connection};
use std::fs;
use std::path::Path;
use tracing::info;

/// Column order is fixed: original columns first, then the derived
/// currency columns in the order they were added.
pub const COLUMNS: [&str; 6] = [
    "Rank",
    "Bank name",
    "Market cap (US$ billion)",
    "MC_GBP_Billion",
    "MC_EUR_Billion",
    "MC_INR_Billion",
];

/// Serializes the full table, header included, to a UTF-8 CSV file,
/// overwriting any existing file at the path.
pub fn save_csv(records: &[ConvertedRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(COLUMNS)?;
    for r in records {
        writer.write_record(&[
            r.rank.to_string(),
            r.name.clone(),
            r.mc_usd_billion.to_string(),
            r.mc_gbp_billion.to_string(),
            r.mc_eur_billion.to_string(),
            r.mc_inr_billion.to_string(),
        ])?;
    }
    writer.flush()?;

    info!("Saved {} rows to {}", records.len(), path.display());
    println!("Data saved to {}", path.display());
    Ok(())
}

/// Replaces the named table's contents entirely with the given records.
/// Drop-and-recreate inside one transaction, so repeating the load leaves
/// the table identical to a single load.
pub fn save_to_db(conn: &mut Connection, table_name: &str, records: &[ConvertedRecord]) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(&format!(
        r#"
        DROP TABLE IF EXISTS "{table}";
        CREATE TABLE "{table}" (
            "Rank"                     INTEGER NOT NULL,
            "Bank name"                TEXT NOT NULL,
            "Market cap (US$ billion)" REAL NOT NULL,
            "MC_GBP_Billion"           REAL NOT NULL,
            "MC_EUR_Billion"           REAL NOT NULL,
            "MC_INR_Billion"           REAL NOT NULL
        );
        "#,
        table = table_name
    ))?;
    {
        let mut stmt = tx.prepare(&format!(
            r#"INSERT INTO "{}" VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            table_name
        ))?;
        for r in records {
            stmt.execute(params![
                r.rank,
                r.name,
                r.mc_usd_billion,
                r.mc_gbp_billion,
                r.mc_eur_billion,
                r.mc_inr_billion,
            ])?;
        }
    }
    tx.commit()?;

    info!("Loaded {} rows into table {}", records.len(), table_name);
    println!("Data loaded into table {} in database.", table_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<ConvertedRecord> {
        vec![
            ConvertedRecord {
                rank: 1,
                name: "Bank A".to_string(),
                mc_usd_billion: 1000.00,
                mc_gbp_billion: 800.0,
                mc_eur_billion: 900.0,
                mc_inr_billion: 80000.0,
            },
            ConvertedRecord {
                rank: 2,
                name: "Bank B".to_string(),
                mc_usd_billion: 500.50,
                mc_gbp_billion: 400.4,
                mc_eur_billion: 450.45,
                mc_inr_billion: 40040.0,
            },
        ]
    }

    #[test]
    fn csv_round_trips_rows_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("largest_banks.csv");
        let records = sample_records();

        save_csv(&records, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            COLUMNS.to_vec()
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), records.len());
        assert_eq!(&rows[0][1], "Bank A");
        assert_eq!(rows[0][3].parse::<f64>().unwrap(), 800.0);
        assert_eq!(rows[1][4].parse::<f64>().unwrap(), 450.45);
    }

    #[test]
    fn csv_overwrites_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("largest_banks.csv");
        let records = sample_records();

        save_csv(&records, &path).unwrap();
        save_csv(&records[..1], &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 1);
    }

    #[test]
    fn db_load_replaces_rather_than_appends() {
        let mut conn = Connection::open_in_memory().unwrap();
        let records = sample_records();

        save_to_db(&mut conn, "Largest_banks", &records).unwrap();
        save_to_db(&mut conn, "Largest_banks", &records).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM Largest_banks", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let avg: f64 = conn
            .query_row("SELECT AVG(MC_GBP_Billion) FROM Largest_banks", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert!((avg - 600.2).abs() < 1e-9);
    }
}
