use banks_etl::config::Config;
use banks_etl::{logging, pipeline, query};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "banks-etl")]
#[command(about = "ETL pipeline for the world's largest banks by market capitalization")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full extract/transform/load pipeline
    Run,
    /// Execute one ad-hoc SQL query against the persisted database
    Query {
        /// SQL statement to execute
        sql: String,
    },
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Run => {
            println!("🔄 Running ETL pipeline...");
            pipeline::run(&config)?;
            println!("✅ Pipeline complete.");
        }
        Commands::Query { sql } => {
            let conn = Connection::open(&config.db_path)?;
            query::run_query(&conn, &sql, Path::new(&config.log_path))?;
        }
    }
    Ok(())
}
