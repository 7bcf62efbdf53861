use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use covidgen_core::params::cluster::SEVERITY;
use covidgen_core::params::vaccination::{
    self as vaccination, ADULT_SHARE, DRIVE_THRU_SHARE, ELDERLY_SHARE, HEALTH_WORKER_SHARE,
    HOSPITAL_SHARE, KIPI_MILD_SHARE, KIPI_MODERATE_SHARE, KIPI_SEVERE_SHARE, MASS_SITE_SHARE,
    PUBLIC_SERVANT_SHARE, PUSKESMAS_SHARE, TEACHER_SHARE, TEEN_SHARE,
};
use covidgen_core::{Band, FieldValue, RecordKind, Region, TableName};
use covidgen_generate::manifest::Manifest;
use covidgen_generate::{
    CsvSink, Dataset, DatasetSink, FailureKind, GenerateOptions, GenerationEngine,
    GenerationError, GenerationReport, MemorySink, SinkError, SinkReceipt, TableStatus,
};
use sha2::{Digest, Sha256};

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("covidgen_test_{}_{}", label, uuid::Uuid::new_v4()));
    dir
}

fn generate_all(seed: u64) -> (GenerationReport, MemorySink) {
    let options = GenerateOptions {
        seed,
        ..GenerateOptions::default()
    };
    let mut sink = MemorySink::new();
    let report = GenerationEngine::new(options)
        .run(&mut sink)
        .expect("run generation");
    (report, sink)
}

fn column(dataset: &Dataset, name: &str) -> usize {
    dataset
        .column_names()
        .iter()
        .position(|column| *column == name)
        .unwrap_or_else(|| panic!("missing column {name} in {}", dataset.table()))
}

#[test]
fn generate_is_deterministic() {
    let out_dir_a = temp_out_dir("run_a");
    let out_dir_b = temp_out_dir("run_b");

    let engine = GenerationEngine::new(GenerateOptions::default());
    engine
        .run(&mut CsvSink::new(&out_dir_a))
        .expect("run generation A");
    engine
        .run(&mut CsvSink::new(&out_dir_b))
        .expect("run generation B");

    for table in TableName::ALL {
        let file = format!("{}.csv", table.as_str());
        let a = fs::read(out_dir_a.join(&file)).expect("read csv A");
        let b = fs::read(out_dir_b.join(&file)).expect("read csv B");
        assert_eq!(a, b, "{file} should be deterministic");
    }

    let _ = fs::remove_dir_all(&out_dir_a);
    let _ = fs::remove_dir_all(&out_dir_b);
}

#[test]
fn different_seeds_give_different_data() {
    let (_, a) = generate_all(1);
    let (_, b) = generate_all(2);
    let hospitals_a = a.get(TableName::RumahSakit).expect("hospitals A");
    let hospitals_b = b.get(TableName::RumahSakit).expect("hospitals B");
    assert_ne!(hospitals_a, hospitals_b);
}

#[test]
fn every_table_has_sequential_ids_and_full_region_coverage() {
    let (report, sink) = generate_all(42);

    assert_eq!(report.tables.len(), TableName::ALL.len());
    for table in TableName::ALL {
        let dataset = sink.get(table).expect("table handed off");
        assert_eq!(report.status(table), Some(TableStatus::HandedOff));
        assert_eq!(
            report.table(table).map(|entry| entry.records),
            Some(dataset.len() as u64)
        );

        for (index, record) in dataset.records().iter().enumerate() {
            assert_eq!(record.id(), index as u64 + 1, "{table} ids must be 1..=n");
        }
        if table != TableName::KebijakanPemerintah {
            for region in Region::ALL {
                assert!(
                    dataset.records().iter().any(|record| record.region() == region),
                    "{table} is missing {region}"
                );
            }
        }
    }
}

#[test]
fn emitted_dates_stay_inside_the_horizon() {
    let (_, sink) = generate_all(7);
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2022, 9, 15).unwrap();

    for dataset in sink.tables() {
        for row in dataset.rows() {
            for value in row {
                if let FieldValue::Date(date) = value {
                    assert!(
                        (start..=end).contains(&date),
                        "{} emitted {date}",
                        dataset.table()
                    );
                }
            }
        }
    }
}

#[test]
fn economy_and_mobility_cover_every_bucket_for_every_region() {
    let (_, sink) = generate_all(42);

    let economy = sink.get(TableName::EkonomiRegional).expect("economy");
    assert_eq!(economy.len(), 33 * Region::ALL.len());

    let mobility = sink.get(TableName::MobilitasHarian).expect("mobility");
    assert_eq!(mobility.len() % Region::ALL.len(), 0);
    let tanggal = column(mobility, "tanggal");
    let first = mobility.rows().next().expect("first row");
    assert_eq!(
        first[tanggal],
        FieldValue::Date(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap())
    );
}

#[test]
fn vaccination_breakdowns_never_exceed_the_total() {
    let (_, sink) = generate_all(9);
    let dataset = sink.get(TableName::VaksinasiDetail).expect("vaccination");

    for record in dataset.records() {
        let RecordKind::Vaccination(week) = record.kind() else {
            panic!("unexpected record in vaksinasi_detail");
        };
        let total = week.total_vaccinated();
        assert!(total > 0);
        assert!(week.dosis_1 + week.dosis_2 + week.dosis_booster <= total);
        assert!(
            week.lansia_vaksin + week.dewasa_vaksin + week.remaja_vaksin + week.anak_vaksin
                <= total
        );
    }
}

fn assert_in_band(field: &str, value: i64, whole: i64, band: Band) {
    let (lo, hi) = band.floor_bounds(whole);
    assert!(
        (lo..=hi).contains(&value),
        "{field}={value} outside {lo}..={hi} of {whole}"
    );
}

fn assert_group(whole: i64, parts: &[(&str, i64, Band)]) {
    for (field, value, band) in parts {
        assert_in_band(field, *value, whole, *band);
    }
    let sum: i64 = parts.iter().map(|(_, value, _)| value).sum();
    assert!(sum <= whole, "parts sum to {sum}, more than {whole}");
}

#[test]
fn breakdowns_stay_inside_their_bands() {
    let (_, sink) = generate_all(42);
    let brands = vaccination::brand_timeline().expect("brand timeline");
    let doses = vaccination::dose_timeline().expect("dose timeline");
    let children = vaccination::child_timeline().expect("child timeline");

    let weeks = sink.get(TableName::VaksinasiDetail).expect("vaccination");
    for record in weeks.records() {
        let RecordKind::Vaccination(week) = record.kind() else {
            panic!("unexpected record in vaksinasi_detail");
        };
        let total = week.total_vaccinated();
        let brand = brands.resolve(week.tanggal).expect("brand phase").mix();
        let dose = doses.resolve(week.tanggal).expect("dose phase").mix();
        let child = children.resolve(week.tanggal).expect("child phase").share();

        assert_group(
            total,
            &[
                ("vaksin_sinovac", week.vaksin_sinovac, brand.sinovac),
                ("vaksin_astrazeneca", week.vaksin_astrazeneca, brand.astrazeneca),
                ("vaksin_pfizer", week.vaksin_pfizer, brand.pfizer),
                ("vaksin_moderna", week.vaksin_moderna, brand.moderna),
            ],
        );
        assert_group(
            total,
            &[
                ("dosis_1", week.dosis_1, dose.first),
                ("dosis_2", week.dosis_2, dose.second),
                ("dosis_booster", week.dosis_booster, dose.booster),
            ],
        );
        assert_group(
            total,
            &[
                ("lansia_vaksin", week.lansia_vaksin, ELDERLY_SHARE),
                ("dewasa_vaksin", week.dewasa_vaksin, ADULT_SHARE),
                ("remaja_vaksin", week.remaja_vaksin, TEEN_SHARE),
                ("anak_vaksin", week.anak_vaksin, child),
            ],
        );
        assert_group(
            total,
            &[
                ("nakes_vaksin", week.nakes_vaksin, HEALTH_WORKER_SHARE),
                ("guru_vaksin", week.guru_vaksin, TEACHER_SHARE),
                ("petugas_publik_vaksin", week.petugas_publik_vaksin, PUBLIC_SERVANT_SHARE),
            ],
        );
        assert_group(
            total,
            &[
                ("puskesmas_vaksin", week.puskesmas_vaksin, PUSKESMAS_SHARE),
                ("rumah_sakit_vaksin", week.rumah_sakit_vaksin, HOSPITAL_SHARE),
                ("sentra_vaksin", week.sentra_vaksin, MASS_SITE_SHARE),
                ("drive_thru_vaksin", week.drive_thru_vaksin, DRIVE_THRU_SHARE),
            ],
        );
        assert_group(
            total,
            &[
                ("kipi_ringan", week.kipi_ringan, KIPI_MILD_SHARE),
                ("kipi_sedang", week.kipi_sedang, KIPI_MODERATE_SHARE),
                ("kipi_berat", week.kipi_berat, KIPI_SEVERE_SHARE),
            ],
        );
    }

    let clusters = sink.get(TableName::ClusterPenularan).expect("clusters");
    for record in clusters.records() {
        let RecordKind::Cluster(cluster) = record.kind() else {
            panic!("unexpected record in cluster_penularan");
        };
        let total = cluster.total_kasus_terkait;
        let ages = cluster.jenis_cluster.age_split();
        assert_group(
            total,
            &[
                ("kasus_anak", cluster.kasus_anak, ages.children),
                ("kasus_dewasa", cluster.kasus_dewasa, ages.adults),
                ("kasus_lansia", cluster.kasus_lansia, ages.elderly),
            ],
        );
        let [asymptomatic, mild, moderate, severe, critical, deceased] = SEVERITY;
        assert_group(
            total,
            &[
                ("kasus_tanpa_gejala", cluster.kasus_tanpa_gejala, asymptomatic),
                ("kasus_ringan", cluster.kasus_ringan, mild),
                ("kasus_sedang", cluster.kasus_sedang, moderate),
                ("kasus_berat", cluster.kasus_berat, severe),
                ("kasus_kritis", cluster.kasus_kritis, critical),
                ("kasus_meninggal", cluster.kasus_meninggal, deceased),
            ],
        );
    }
}

#[test]
fn table_selection_only_generates_requested_tables() {
    let options = GenerateOptions {
        tables: vec![TableName::MobilitasHarian, TableName::RumahSakit],
        ..GenerateOptions::default()
    };
    let mut sink = MemorySink::new();
    let report = GenerationEngine::new(options)
        .run(&mut sink)
        .expect("run generation");

    let generated: Vec<TableName> = report.tables.iter().map(|entry| entry.table).collect();
    assert_eq!(
        generated,
        vec![TableName::RumahSakit, TableName::MobilitasHarian]
    );
    assert_eq!(sink.tables().count(), 2);
}

#[test]
fn manifest_matches_written_files() {
    let out_dir = temp_out_dir("manifest");
    let mut sink = CsvSink::new(&out_dir);
    let report = GenerationEngine::new(GenerateOptions::default())
        .run(&mut sink)
        .expect("run generation");

    let contents = fs::read_to_string(sink.manifest_path()).expect("read metadata.json");
    let manifest: Manifest = serde_json::from_str(&contents).expect("parse manifest");

    assert_eq!(manifest.run_id, report.run_id);
    assert_eq!(manifest.seed, 42);
    assert_eq!(manifest.provinsi_count, 34);
    assert_eq!(manifest.total_tables, TableName::ALL.len());
    assert_eq!(manifest.total_records, report.total_records());

    for table in TableName::ALL {
        let entry = &manifest.tables[table.as_str()];
        assert_eq!(entry.status, TableStatus::HandedOff);

        let file = entry.file.as_deref().expect("file name");
        let bytes = fs::read(out_dir.join(file)).expect("read table file");
        let digest = hex::encode(Sha256::digest(&bytes));
        assert_eq!(entry.sha256.as_deref(), Some(digest.as_str()));

        let lines = String::from_utf8(bytes).expect("utf8").lines().count() as u64;
        assert_eq!(lines, entry.records + 1, "{file} has a header plus one line per record");
    }

    let _ = fs::remove_dir_all(&out_dir);
}

/// Delegates to a memory sink but rejects one table.
struct FailingSink {
    inner: MemorySink,
    reject: TableName,
}

impl DatasetSink for FailingSink {
    fn write(&mut self, dataset: &Dataset) -> Result<SinkReceipt, SinkError> {
        if dataset.table() == self.reject {
            return Err(SinkError::write(dataset.table(), "disk full"));
        }
        self.inner.write(dataset)
    }

    fn finish(&mut self, report: &GenerationReport) -> Result<(), SinkError> {
        self.inner.finish(report)
    }
}

#[test]
fn sink_failure_only_fails_its_table() {
    let mut sink = FailingSink {
        inner: MemorySink::new(),
        reject: TableName::KebijakanPemerintah,
    };
    let err = GenerationEngine::new(GenerateOptions::default())
        .run(&mut sink)
        .expect_err("run should report the failed table");

    let GenerationError::Failed(report) = err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(report.failed_tables(), vec!["kebijakan_pemerintah"]);
    let failure = report
        .table(TableName::KebijakanPemerintah)
        .and_then(|entry| entry.failure.as_ref())
        .expect("failure details");
    assert_eq!(failure.kind, FailureKind::SinkWrite);
    assert!(failure.message.contains("disk full"));

    for table in TableName::ALL {
        if table != TableName::KebijakanPemerintah {
            assert_eq!(report.status(table), Some(TableStatus::HandedOff));
            assert!(sink.inner.get(table).is_some());
        }
    }
    assert!(sink.inner.report().is_some_and(|finished| finished.has_failures()));
}
