use chrono::{DateTime, NaiveDate, Utc};
use covidgen_core::TableName;
use covidgen_core::params::DEFAULT_AS_OF;
use serde::{Deserialize, Serialize};

use crate::sink::SinkReceipt;

/// Options for the generation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Seed for the run-wide random generator.
    pub seed: u64,
    /// Tables to generate; always processed in canonical order.
    pub tables: Vec<TableName>,
    /// Reference date for "ended/active" statuses.
    pub as_of: NaiveDate,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        let (year, month, day) = DEFAULT_AS_OF;
        Self {
            seed: 42,
            tables: TableName::ALL.to_vec(),
            as_of: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        }
    }
}

impl GenerateOptions {
    /// Selected tables in canonical order, without duplicates.
    pub fn selected_tables(&self) -> Vec<TableName> {
        TableName::ALL
            .into_iter()
            .filter(|table| self.tables.contains(table))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    HandedOff,
    Failed,
    Skipped,
}

impl TableStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TableStatus::HandedOff => "handed_off",
            TableStatus::Failed => "failed",
            TableStatus::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Configuration,
    InvariantViolation,
    SinkWrite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Outcome of one table in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableReport {
    pub table: TableName,
    pub status: TableStatus,
    pub records: u64,
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<SinkReceipt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<TableFailure>,
    pub duration_ms: u64,
}

impl TableReport {
    fn new(table: TableName, status: TableStatus) -> Self {
        Self {
            table,
            status,
            records: 0,
            columns: table.column_names().into_iter().map(str::to_string).collect(),
            receipt: None,
            failure: None,
            duration_ms: 0,
        }
    }

    pub fn handed_off(table: TableName, records: u64, receipt: SinkReceipt) -> Self {
        Self {
            records,
            receipt: Some(receipt),
            ..Self::new(table, TableStatus::HandedOff)
        }
    }

    pub fn failed(table: TableName, records: u64, kind: FailureKind, message: String) -> Self {
        Self {
            records,
            failure: Some(TableFailure { kind, message }),
            ..Self::new(table, TableStatus::Failed)
        }
    }

    pub fn skipped(table: TableName) -> Self {
        Self::new(table, TableStatus::Skipped)
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// Report for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub as_of: NaiveDate,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub tables: Vec<TableReport>,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64, as_of: NaiveDate) -> Self {
        Self {
            run_id,
            seed,
            as_of,
            started_at: Utc::now(),
            finished_at: None,
            tables: Vec::new(),
        }
    }

    pub fn table(&self, table: TableName) -> Option<&TableReport> {
        self.tables.iter().find(|report| report.table == table)
    }

    pub fn status(&self, table: TableName) -> Option<TableStatus> {
        self.table(table).map(|report| report.status)
    }

    pub fn has_failures(&self) -> bool {
        self.tables
            .iter()
            .any(|report| report.status == TableStatus::Failed)
    }

    pub fn failed_tables(&self) -> Vec<&'static str> {
        self.tables
            .iter()
            .filter(|report| report.status == TableStatus::Failed)
            .map(|report| report.table.as_str())
            .collect()
    }

    /// Records handed to the sink across all tables.
    pub fn total_records(&self) -> u64 {
        self.tables
            .iter()
            .filter(|report| report.status == TableStatus::HandedOff)
            .map(|report| report.records)
            .sum()
    }

    /// Console summary: one line per table and a total.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .tables
            .iter()
            .map(|report| match (&report.status, &report.failure) {
                (TableStatus::Failed, Some(failure)) => format!(
                    "{:<22}: failed ({})",
                    report.table.as_str(),
                    failure.message
                ),
                (status, _) if *status != TableStatus::HandedOff => {
                    format!("{:<22}: {}", report.table.as_str(), status.as_str())
                }
                _ => format!("{:<22}: {} records", report.table.as_str(), report.records),
            })
            .collect();
        lines.push(format!("{:<22}: {} records", "TOTAL", self.total_records()));
        lines
    }
}
