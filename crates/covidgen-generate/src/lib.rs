//! Sampling engine, record composer and dataset orchestrator for covidgen.
//!
//! [`GenerationEngine`] walks the selected tables in canonical order, drives
//! the per-table generators with one seeded [`GenerationContext`], and hands
//! each finished [`Dataset`] to a [`DatasetSink`].

pub mod composer;
pub mod context;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod manifest;
pub mod model;
pub mod sink;

pub use composer::{Dataset, TableBuilder};
pub use context::{Allotment, GenerationContext};
pub use engine::GenerationEngine;
pub use errors::{GenerationError, SinkError};
pub use model::{FailureKind, GenerateOptions, GenerationReport, TableReport, TableStatus};
pub use sink::{DatasetSink, MemorySink, SinkReceipt};
pub use sink::csv::CsvSink;
