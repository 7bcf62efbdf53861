use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use covidgen_core::TableName;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::{DatasetSink, SinkReceipt};
use crate::composer::Dataset;
use crate::errors::SinkError;
use crate::manifest::Manifest;
use crate::model::GenerationReport;

pub const MANIFEST_FILE: &str = "metadata.json";

/// Writes one `{table}.csv` per table plus a `metadata.json` manifest.
///
/// Every file is written to a `.tmp` sibling and renamed into place, so a
/// failed write never leaves a partial table behind.
#[derive(Debug, Clone)]
pub struct CsvSink {
    out_dir: PathBuf,
}

impl CsvSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn table_path(&self, table: TableName) -> PathBuf {
        self.out_dir.join(format!("{}.csv", table.as_str()))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.out_dir.join(MANIFEST_FILE)
    }
}

impl DatasetSink for CsvSink {
    fn write(&mut self, dataset: &Dataset) -> Result<SinkReceipt, SinkError> {
        let table = dataset.table();
        let path = self.table_path(table);
        let written = write_atomic(&path, |file| write_table(file, dataset))
            .map_err(|err| SinkError::write(table, err))?;

        debug!(
            table = %table,
            path = %path.display(),
            bytes = written.bytes,
            "table file written"
        );
        Ok(SinkReceipt {
            destination: Some(path.display().to_string()),
            rows_written: dataset.len() as u64,
            bytes_written: Some(written.bytes),
            sha256: Some(written.sha256),
        })
    }

    fn finish(&mut self, report: &GenerationReport) -> Result<(), SinkError> {
        let manifest = Manifest::from_report(report).map_err(SinkError::finish)?;
        let data = serde_json::to_vec_pretty(&manifest).map_err(SinkError::finish)?;
        write_atomic(&self.manifest_path(), |file| {
            let mut writer = HashingWriter::new(file);
            writer.write_all(&data)?;
            Ok(writer.finish())
        })
        .map_err(SinkError::finish)?;
        Ok(())
    }
}

fn write_table(file: File, dataset: &Dataset) -> io::Result<Written> {
    let hashing = HashingWriter::new(BufWriter::new(file));
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(hashing);

    writer.write_record(dataset.column_names())?;
    for row in dataset.rows() {
        writer.write_record(row.iter().map(|value| value.to_csv()))?;
    }
    writer.flush()?;

    let mut hashing = writer.into_inner().map_err(|err| err.into_error())?;
    hashing.flush()?;
    Ok(hashing.finish())
}

/// Bytes and digest of a finished file.
struct Written {
    bytes: u64,
    sha256: String,
}

/// Write through `body` into a temporary sibling of `path`, sync it and
/// rename it into place. The temporary file is removed on failure.
fn write_atomic<F>(path: &Path, body: F) -> io::Result<Written>
where
    F: FnOnce(File) -> io::Result<Written>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path)?;
    let result = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)
        .and_then(body)
        .and_then(|written| {
            OpenOptions::new().write(true).open(&tmp_path)?.sync_all()?;
            fs::rename(&tmp_path, path)?;
            Ok(written)
        });

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "invalid path for atomic write")
    })?;
    Ok(path.with_file_name(format!("{}.tmp", file_name.to_string_lossy())))
}

/// Counts and hashes every byte on its way to the inner writer.
struct HashingWriter<W: Write> {
    inner: W,
    bytes: u64,
    hasher: Sha256,
}

impl<W: Write> HashingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            bytes: 0,
            hasher: Sha256::new(),
        }
    }

    fn finish(self) -> Written {
        Written {
            bytes: self.bytes,
            sha256: hex::encode(self.hasher.finalize()),
        }
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.hasher.update(&buf[..size]);
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("covidgen_csv_{label}_{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let dir = temp_dir("atomic");
        let path = dir.join("table.csv");
        let written = write_atomic(&path, |file| {
            let mut writer = HashingWriter::new(file);
            writer.write_all(b"a,b\n1,2\n")?;
            Ok(writer.finish())
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n1,2\n");
        assert_eq!(written.bytes, 8);
        assert_eq!(written.sha256.len(), 64);
        assert!(!dir.join("table.csv.tmp").exists());
    }

    #[test]
    fn failed_write_keeps_previous_file() {
        let dir = temp_dir("failed");
        let path = dir.join("table.csv");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "old\n").unwrap();

        let result = write_atomic(&path, |_| Err(io::Error::other("disk full")));
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\n");
        assert!(!dir.join("table.csv.tmp").exists());
    }
}
