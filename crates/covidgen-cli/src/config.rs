use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use covidgen_core::TableName;
use covidgen_generate::GenerateOptions;
use serde::Deserialize;

use crate::CliError;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "covidgen.toml";
pub const DEFAULT_OUT_DIR: &str = "dummy_data";

/// Contents of a `covidgen.toml` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub seed: Option<u64>,
    pub tables: Option<Vec<TableName>>,
    pub as_of: Option<NaiveDate>,
    pub out: Option<PathBuf>,
    pub database_url: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    /// Read `path`, or `covidgen.toml` when it exists and no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = fs::read_to_string(path).map_err(|err| {
            CliError::InvalidConfig(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::parse(&content)
    }
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub tables: Vec<TableName>,
    pub as_of: Option<NaiveDate>,
    pub out: Option<PathBuf>,
    pub database_url: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Where generated tables go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Csv(PathBuf),
    Postgres(String),
}

/// Fully resolved settings for one `generate` run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub options: GenerateOptions,
    pub destination: Destination,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(file: FileConfig, flags: Overrides) -> Result<Self, CliError> {
        let defaults = GenerateOptions::default();
        let tables = if flags.tables.is_empty() {
            file.tables.unwrap_or(defaults.tables)
        } else {
            flags.tables
        };
        if tables.is_empty() {
            return Err(CliError::InvalidConfig("no tables selected".to_string()));
        }

        let destination = match (flags.database_url, flags.out) {
            (Some(url), _) => Destination::Postgres(url),
            (None, Some(out)) => Destination::Csv(out),
            (None, None) => match (file.database_url, file.out) {
                (Some(_), Some(_)) => {
                    return Err(CliError::InvalidConfig(
                        "set either out or database_url, not both".to_string(),
                    ));
                }
                (Some(url), None) => Destination::Postgres(url),
                (None, out) => Destination::Csv(out.unwrap_or_else(|| DEFAULT_OUT_DIR.into())),
            },
        };

        Ok(Self {
            options: GenerateOptions {
                seed: flags.seed.or(file.seed).unwrap_or(defaults.seed),
                tables,
                as_of: flags.as_of.or(file.as_of).unwrap_or(defaults.as_of),
            },
            destination,
            log_file: flags.log_file.or(file.log_file),
        })
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

pub fn parse_table(value: &str) -> Result<TableName, String> {
    value.parse().map_err(|err: covidgen_core::Error| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
seed = 7
tables = ["testing_labs", "rumah_sakit"]
as_of = "2021-06-30"
out = "data/out"
log_file = "covidgen.log"
"#;

    #[test]
    fn file_values_apply_without_flags() {
        let file = FileConfig::parse(SAMPLE).unwrap();
        let settings = Settings::resolve(file, Overrides::default()).unwrap();

        assert_eq!(settings.options.seed, 7);
        assert_eq!(
            settings.options.tables,
            vec![TableName::TestingLabs, TableName::RumahSakit]
        );
        assert_eq!(settings.options.as_of, parse_date("2021-06-30").unwrap());
        assert_eq!(settings.destination, Destination::Csv(PathBuf::from("data/out")));
        assert_eq!(settings.log_file, Some(PathBuf::from("covidgen.log")));
    }

    #[test]
    fn flags_win_over_file() {
        let file = FileConfig::parse(SAMPLE).unwrap();
        let flags = Overrides {
            seed: Some(99),
            tables: vec![TableName::MobilitasHarian],
            database_url: Some("postgres://localhost/covid".to_string()),
            ..Overrides::default()
        };
        let settings = Settings::resolve(file, flags).unwrap();

        assert_eq!(settings.options.seed, 99);
        assert_eq!(settings.options.tables, vec![TableName::MobilitasHarian]);
        assert_eq!(
            settings.destination,
            Destination::Postgres("postgres://localhost/covid".to_string())
        );
    }

    #[test]
    fn defaults_without_any_config() {
        let settings = Settings::resolve(FileConfig::default(), Overrides::default()).unwrap();
        assert_eq!(settings.options, GenerateOptions::default());
        assert_eq!(settings.destination, Destination::Csv(PathBuf::from(DEFAULT_OUT_DIR)));
        assert_eq!(settings.log_file, None);
    }

    #[test]
    fn rejects_unknown_keys_and_empty_selection() {
        assert!(FileConfig::parse("sed = 1").is_err());

        let file = FileConfig::parse("tables = []").unwrap();
        assert!(matches!(
            Settings::resolve(file, Overrides::default()),
            Err(CliError::InvalidConfig(_))
        ));
    }

    #[test]
    fn parses_table_names_and_dates() {
        assert_eq!(parse_table("Cluster_Penularan"), Ok(TableName::ClusterPenularan));
        assert!(parse_table("rumah").is_err());
        assert!(parse_date("15-09-2022").is_err());
    }
}
