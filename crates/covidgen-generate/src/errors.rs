use std::fmt;

use covidgen_core::{Region, TableName};
use thiserror::Error;

use crate::model::GenerationReport;

/// Where in a table's iteration domain an error was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub table: TableName,
    pub region: Option<Region>,
    /// Date bucket or per-region sequence number.
    pub point: Option<String>,
}

impl Scope {
    pub fn table(table: TableName) -> Self {
        Self {
            table,
            region: None,
            point: None,
        }
    }

    pub fn point(table: TableName, point: impl fmt::Display) -> Self {
        Self {
            table,
            region: None,
            point: Some(point.to_string()),
        }
    }

    pub fn at(table: TableName, region: Region, point: impl fmt::Display) -> Self {
        Self {
            table,
            region: Some(region),
            point: Some(point.to_string()),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table {}", self.table)?;
        if let Some(region) = self.region {
            write!(f, ", region {region}")?;
        }
        if let Some(point) = &self.point {
            write!(f, ", at {point}")?;
        }
        Ok(())
    }
}

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{scope}: {source}")]
    Sampling {
        scope: Scope,
        #[source]
        source: covidgen_core::Error,
    },
    #[error(transparent)]
    Core(#[from] covidgen_core::Error),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error("generation failed: {}", .0.failed_tables().join(", "))]
    Failed(Box<GenerationReport>),
}

impl GenerationError {
    pub fn scoped(scope: Scope, source: covidgen_core::Error) -> Self {
        GenerationError::Sampling { scope, source }
    }

    /// The core error behind a sampling or composition failure, if any.
    pub fn core(&self) -> Option<&covidgen_core::Error> {
        match self {
            GenerationError::Sampling { source, .. } => Some(source),
            GenerationError::Core(source) => Some(source),
            _ => None,
        }
    }
}

/// A storage sink rejected or failed an operation.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {table}: {message}")]
    Write { table: TableName, message: String },
    #[error("failed to finish output: {0}")]
    Finish(String),
}

impl SinkError {
    pub fn write(table: TableName, err: impl fmt::Display) -> Self {
        SinkError::Write {
            table,
            message: err.to_string(),
        }
    }

    pub fn finish(err: impl fmt::Display) -> Self {
        SinkError::Finish(err.to_string())
    }
}
