use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::generators;
use crate::model::{FailureKind, GenerateOptions, GenerationReport, TableReport};
use crate::sink::DatasetSink;

/// Entry point for generating the dataset and handing it to a sink.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate every selected table in canonical order and hand each one
    /// to `sink` as soon as it is complete.
    ///
    /// A sampling or invariant failure aborts the run: the table is marked
    /// failed and the remaining tables are skipped. A sink failure only
    /// fails its own table. The sink's `finish` hook always receives the
    /// final report, and any failed table turns the result into
    /// [`GenerationError::Failed`].
    pub fn run(&self, sink: &mut dyn DatasetSink) -> Result<GenerationReport, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let seed = self.options.seed;
        let as_of = self.options.as_of;
        let tables = self.options.selected_tables();

        let mut report = GenerationReport::new(run_id.clone(), seed, as_of);
        let mut ctx = GenerationContext::new(seed, as_of);
        let mut aborted = false;

        info!(
            run_id = %run_id,
            tables = tables.len(),
            seed,
            as_of = %as_of,
            "generation started"
        );

        for table in tables {
            if aborted {
                info!(table = %table, "table skipped");
                report.tables.push(TableReport::skipped(table));
                continue;
            }

            let table_start = Instant::now();
            info!(table = %table, "generating table");
            let table_report = match generators::generate(table, &mut ctx) {
                Ok(dataset) => {
                    let records = dataset.len() as u64;
                    info!(table = %table, rows = records, "table generated");
                    match sink.write(&dataset) {
                        Ok(receipt) => {
                            info!(
                                table = %table,
                                rows_written = receipt.rows_written,
                                destination = receipt.destination.as_deref().unwrap_or("-"),
                                "table handed off"
                            );
                            TableReport::handed_off(table, records, receipt)
                        }
                        Err(err) => {
                            warn!(table = %table, error = %err, "sink write failed");
                            TableReport::failed(
                                table,
                                records,
                                FailureKind::SinkWrite,
                                err.to_string(),
                            )
                        }
                    }
                }
                Err(err) => {
                    aborted = true;
                    warn!(table = %table, error = %err, "table generation failed");
                    TableReport::failed(table, 0, failure_kind(&err), err.to_string())
                }
            };
            report
                .tables
                .push(table_report.with_duration(table_start.elapsed().as_millis() as u64));
        }

        report.finished_at = Some(Utc::now());
        if let Err(err) = sink.finish(&report) {
            warn!(run_id = %run_id, error = %err, "sink finish failed");
            return Err(err.into());
        }

        if report.has_failures() {
            warn!(
                run_id = %run_id,
                failed = %report.failed_tables().join(","),
                "generation failed"
            );
            return Err(GenerationError::Failed(Box::new(report)));
        }

        info!(
            run_id = %run_id,
            tables = report.tables.len(),
            records = report.total_records(),
            duration_ms = start.elapsed().as_millis() as u64,
            "generation completed"
        );
        Ok(report)
    }
}

fn failure_kind(err: &GenerationError) -> FailureKind {
    match err.core() {
        Some(covidgen_core::Error::InvariantViolation { .. }) => FailureKind::InvariantViolation,
        Some(covidgen_core::Error::Configuration(_)) | None => FailureKind::Configuration,
    }
}
