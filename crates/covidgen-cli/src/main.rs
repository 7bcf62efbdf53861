mod config;
mod logging;
mod postgres;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use covidgen_core::TableName;
use covidgen_generate::{
    CsvSink, DatasetSink, GenerationEngine, GenerationError, GenerationReport,
};
use thiserror::Error;

use config::{Destination, FileConfig, Overrides, Settings};
use logging::init_logging;
use postgres::PostgresSink;

#[derive(Debug, Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("tables failed: {0}")]
    TablesFailed(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "covidgen",
    version,
    about = "Synthetic COVID-19 dataset generator for Indonesian provinces"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the dataset into CSV files or a PostgreSQL database.
    Generate(GenerateArgs),
    /// List the generated tables and their columns.
    Tables,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Config file (defaults to ./covidgen.toml when present).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed for the random generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Table to generate; repeat for several. Defaults to all tables.
    #[arg(long = "table", value_name = "NAME", value_parser = config::parse_table)]
    tables: Vec<TableName>,
    /// Reference date for ended/active statuses (YYYY-MM-DD).
    #[arg(long, value_name = "DATE", value_parser = config::parse_date)]
    as_of: Option<NaiveDate>,
    /// Output directory for CSV files and metadata.json.
    #[arg(long, value_name = "DIR", conflicts_with = "database_url")]
    out: Option<PathBuf>,
    /// Write into PostgreSQL instead of CSV files.
    #[arg(long, value_name = "URL")]
    database_url: Option<String>,
    /// Append JSON log lines to this file.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl GenerateArgs {
    fn overrides(self) -> (Option<PathBuf>, Overrides) {
        let overrides = Overrides {
            seed: self.seed,
            tables: self.tables,
            as_of: self.as_of,
            out: self.out,
            database_url: self.database_url,
            log_file: self.log_file,
        };
        (self.config, overrides)
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Tables => {
            print_tables();
            Ok(())
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let (config_path, overrides) = args.overrides();
    let file = FileConfig::load(config_path.as_deref())?;
    let settings = Settings::resolve(file, overrides)?;
    init_logging(settings.log_file.as_deref())?;

    let mut sink: Box<dyn DatasetSink> = match &settings.destination {
        Destination::Csv(out_dir) => {
            tracing::info!(out_dir = %out_dir.display(), "writing csv files");
            Box::new(CsvSink::new(out_dir))
        }
        Destination::Postgres(url) => Box::new(PostgresSink::connect(url)?),
    };

    let engine = GenerationEngine::new(settings.options);
    match engine.run(sink.as_mut()) {
        Ok(report) => {
            print_summary(&report);
            Ok(())
        }
        Err(GenerationError::Failed(report)) => {
            print_summary(&report);
            Err(CliError::TablesFailed(report.failed_tables().join(", ")))
        }
        Err(err) => Err(err.into()),
    }
}

fn print_summary(report: &GenerationReport) {
    println!("covidgen run {} (seed {}, as of {})", report.run_id, report.seed, report.as_of);
    for line in report.summary_lines() {
        println!("  {line}");
    }
}

fn print_tables() {
    for table in TableName::ALL {
        let columns = table.columns();
        println!("{table} ({} columns)", columns.len());
        for column in columns {
            println!("  {:<32} {}", column.name, postgres::column_type(column.kind));
        }
    }
}
