//! Storage sinks that receive finished tables.

pub mod csv;

use std::collections::BTreeMap;

use covidgen_core::TableName;
use serde::{Deserialize, Serialize};

use crate::composer::Dataset;
use crate::errors::SinkError;
use crate::model::GenerationReport;

/// What a sink reports back after storing a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkReceipt {
    /// File path, table name or other location of the stored rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub rows_written: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_written: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl SinkReceipt {
    pub fn rows(rows_written: u64) -> Self {
        Self {
            destination: None,
            rows_written,
            bytes_written: None,
            sha256: None,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }
}

/// Destination for generated tables.
///
/// `write` replaces whatever the sink previously held for the table and
/// either fully succeeds or reports a table-scoped error. `finish` runs once
/// after the last table with the final run report.
pub trait DatasetSink {
    fn write(&mut self, dataset: &Dataset) -> Result<SinkReceipt, SinkError>;

    fn finish(&mut self, _report: &GenerationReport) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Keeps every written table in memory, keyed by table name.
#[derive(Debug, Default)]
pub struct MemorySink {
    tables: BTreeMap<TableName, Dataset>,
    finished: Option<GenerationReport>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table: TableName) -> Option<&Dataset> {
        self.tables.get(&table)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Dataset> {
        self.tables.values()
    }

    /// Report passed to `finish`, once the run is over.
    pub fn report(&self) -> Option<&GenerationReport> {
        self.finished.as_ref()
    }
}

impl DatasetSink for MemorySink {
    fn write(&mut self, dataset: &Dataset) -> Result<SinkReceipt, SinkError> {
        let rows = dataset.len() as u64;
        self.tables.insert(dataset.table(), dataset.clone());
        Ok(SinkReceipt::rows(rows).with_destination(dataset.table().as_str()))
    }

    fn finish(&mut self, report: &GenerationReport) -> Result<(), SinkError> {
        self.finished = Some(report.clone());
        Ok(())
    }
}
