use std::time::Duration;

use chrono::NaiveDate;
use covidgen_core::value::round_to;
use covidgen_core::{ColumnKind, FieldValue, TableName};
use covidgen_generate::{Dataset, DatasetSink, GenerationReport, SinkError, SinkReceipt};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::query_builder::Separated;
use sqlx::{Postgres, QueryBuilder};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use crate::CliError;

/// Rows per multi-row `INSERT` statement.
pub const BATCH_SIZE: usize = 1000;

/// Writes each table into PostgreSQL, replacing its previous contents.
///
/// The sink owns a current-thread runtime and blocks on every table, so the
/// generator itself stays synchronous.
pub struct PostgresSink {
    runtime: Runtime,
    pool: PgPool,
    database: String,
}

impl PostgresSink {
    pub fn connect(url: &str) -> Result<Self, CliError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let database = redact_url(url);
        info!(database = %database, "connecting to postgres");
        let pool = runtime.block_on(
            PgPoolOptions::new()
                .max_connections(1)
                .acquire_timeout(Duration::from_secs(10))
                .connect(url),
        )?;
        Ok(Self {
            runtime,
            pool,
            database,
        })
    }
}

impl DatasetSink for PostgresSink {
    fn write(&mut self, dataset: &Dataset) -> Result<SinkReceipt, SinkError> {
        let table = dataset.table();
        let rows = self
            .runtime
            .block_on(replace_table(&self.pool, dataset))
            .map_err(|err| SinkError::write(table, err))?;
        debug!(table = %table, rows, database = %self.database, "table replaced");
        Ok(SinkReceipt::rows(rows).with_destination(format!("{}/{table}", self.database)))
    }

    fn finish(&mut self, report: &GenerationReport) -> Result<(), SinkError> {
        self.runtime.block_on(self.pool.close());
        info!(
            database = %self.database,
            records = report.total_records(),
            "postgres import finished"
        );
        Ok(())
    }
}

/// Create the table when missing, then swap its rows inside one transaction.
/// An early return drops the transaction, which rolls it back.
async fn replace_table(pool: &PgPool, dataset: &Dataset) -> Result<u64, sqlx::Error> {
    let table = dataset.table();
    sqlx::query(&create_table_sql(table)).execute(pool).await?;

    let mut tx = pool.begin().await?;
    sqlx::query(&format!("DELETE FROM {table}"))
        .execute(&mut *tx)
        .await?;

    let insert = format!("INSERT INTO {table} ({}) ", dataset.column_names().join(", "));
    let rows: Vec<Vec<FieldValue>> = dataset.rows().collect();
    let mut written = 0;
    for batch in rows.chunks(BATCH_SIZE) {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(&insert);
        builder.push_values(batch, |mut row, values| {
            for value in values {
                push_field(&mut row, value);
            }
        });
        written += builder.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    Ok(written)
}

fn push_field(row: &mut Separated<'_, '_, Postgres, &'static str>, value: &FieldValue) {
    match value {
        FieldValue::Null => row.push_bind(None::<NaiveDate>),
        FieldValue::Int(value) => row.push_bind(*value),
        FieldValue::Decimal { value, scale } => row.push_bind(round_to(*value, *scale)),
        FieldValue::Text(value) => row.push_bind(value.clone()),
        FieldValue::Bool(value) => row.push_bind(*value),
        FieldValue::Date(value) => row.push_bind(*value),
    };
}

pub fn create_table_sql(table: TableName) -> String {
    let columns: Vec<String> = table
        .columns()
        .iter()
        .map(|column| format!("    {} {}", column.name, column_type(column.kind)))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\n{}\n)",
        columns.join(",\n")
    )
}

/// Column type as declared in `CREATE TABLE`.
pub fn column_type(kind: ColumnKind) -> String {
    match kind {
        ColumnKind::Id => "BIGINT PRIMARY KEY".to_string(),
        ColumnKind::Int => "BIGINT NOT NULL".to_string(),
        ColumnKind::Decimal(scale) => format!("NUMERIC(18, {scale}) NOT NULL"),
        ColumnKind::Text => "TEXT NOT NULL".to_string(),
        ColumnKind::Bool => "BOOLEAN NOT NULL".to_string(),
        ColumnKind::Date => "DATE NOT NULL".to_string(),
        ColumnKind::NullableDate => "DATE".to_string(),
    }
}

/// Replace the password of a connection URL with `***`.
pub fn redact_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let authority_start = scheme_end + 3;
    let rest = &url[authority_start..];
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let Some(at) = rest[..authority_end].rfind('@') else {
        return url.to_string();
    };
    match rest[..at].find(':') {
        Some(colon) => format!(
            "{}{}:***{}",
            &url[..authority_start],
            &rest[..colon],
            &rest[at..]
        ),
        None => url.to_string(),
    }
}
