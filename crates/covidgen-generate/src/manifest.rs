use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use covidgen_core::Region;
use covidgen_core::params::{DATASET_END, DATASET_START};
use covidgen_core::timeline::date;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;
use crate::model::{GenerationReport, TableStatus};

/// `metadata.json` written next to the table files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub run_id: String,
    pub seed: u64,
    pub as_of: NaiveDate,
    pub provinsi_count: usize,
    pub date_range: DateRange,
    pub total_tables: usize,
    pub total_records: u64,
    pub tables: BTreeMap<String, ManifestTable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestTable {
    pub status: TableStatus,
    pub records: u64,
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl Manifest {
    pub fn from_report(report: &GenerationReport) -> Result<Self, GenerationError> {
        let tables = report
            .tables
            .iter()
            .map(|table| {
                let receipt = table.receipt.as_ref();
                let file = receipt
                    .and_then(|receipt| receipt.destination.as_deref())
                    .map(|destination| {
                        Path::new(destination)
                            .file_name()
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_else(|| destination.to_string())
                    });
                let entry = ManifestTable {
                    status: table.status,
                    records: table.records,
                    columns: table.columns.clone(),
                    file,
                    sha256: receipt.and_then(|receipt| receipt.sha256.clone()),
                };
                (table.table.as_str().to_string(), entry)
            })
            .collect();

        Ok(Self {
            generated_at: report.finished_at.unwrap_or(report.started_at),
            run_id: report.run_id.clone(),
            seed: report.seed,
            as_of: report.as_of,
            provinsi_count: Region::ALL.len(),
            date_range: DateRange {
                start: date(DATASET_START)?,
                end: date(DATASET_END)?,
            },
            total_tables: report
                .tables
                .iter()
                .filter(|table| table.status == TableStatus::HandedOff)
                .count(),
            total_records: report.total_records(),
            tables,
        })
    }
}

#[cfg(test)]
mod tests {
    use covidgen_core::TableName;

    use super::*;
    use crate::model::{FailureKind, GenerateOptions, TableReport};
    use crate::sink::SinkReceipt;

    #[test]
    fn manifest_counts_handed_off_tables() {
        let mut report = GenerationReport::new("run".to_string(), 7, GenerateOptions::default().as_of);
        let mut receipt = SinkReceipt::rows(12).with_destination("/tmp/out/rumah_sakit.csv");
        receipt.sha256 = Some("ab".repeat(32));
        report
            .tables
            .push(TableReport::handed_off(TableName::RumahSakit, 12, receipt));
        report.tables.push(TableReport::failed(
            TableName::VaksinasiDetail,
            0,
            FailureKind::SinkWrite,
            "disk full".to_string(),
        ));

        let manifest = Manifest::from_report(&report).unwrap();
        assert_eq!(manifest.provinsi_count, 34);
        assert_eq!(manifest.total_tables, 1);
        assert_eq!(manifest.total_records, 12);
        assert_eq!(manifest.date_range.start.to_string(), "2020-01-01");
        let hospitals = &manifest.tables["rumah_sakit"];
        assert_eq!(hospitals.file.as_deref(), Some("rumah_sakit.csv"));
        assert_eq!(hospitals.columns[0], "id_rumah_sakit");
        assert_eq!(manifest.tables["vaksinasi_detail"].status, TableStatus::Failed);
    }
}
