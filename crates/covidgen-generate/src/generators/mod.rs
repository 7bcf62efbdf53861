//! Per-table sampling operations.
//!
//! Each table module walks its iteration domain, draws one attribute set per
//! row from the shared [`GenerationContext`], and hands it to the
//! [`TableBuilder`](crate::composer::TableBuilder) together with the
//! template-filled strings.

mod cluster;
mod economy;
mod hospital;
mod lab;
mod mobility;
mod policy;
mod vaccination;

use std::fmt;

use covidgen_core::params::{GEO_BOUNDS, STREET_NUMBER};
use covidgen_core::{Region, TableName};

use crate::composer::Dataset;
use crate::context::GenerationContext;
use crate::errors::{GenerationError, Scope};

/// Generate every row of `table`.
pub fn generate(table: TableName, ctx: &mut GenerationContext) -> Result<Dataset, GenerationError> {
    match table {
        TableName::RumahSakit => hospital::generate(ctx),
        TableName::VaksinasiDetail => vaccination::generate(ctx),
        TableName::KebijakanPemerintah => policy::generate(ctx),
        TableName::EkonomiRegional => economy::generate(ctx),
        TableName::TestingLabs => lab::generate(ctx),
        TableName::ClusterPenularan => cluster::generate(ctx),
        TableName::MobilitasHarian => mobility::generate(ctx),
    }
}

/// Attach table, region and point to a sampling or composition error.
fn scoped(
    table: TableName,
    region: Region,
    point: impl fmt::Display,
) -> impl FnOnce(covidgen_core::Error) -> GenerationError {
    move |err| GenerationError::scoped(Scope::at(table, region, point), err)
}

/// A point anywhere in the dataset bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    fn sample(ctx: &mut GenerationContext) -> Self {
        Self {
            latitude: ctx.uniform(GEO_BOUNDS.latitude),
            longitude: ctx.uniform(GEO_BOUNDS.longitude),
        }
    }
}

fn street_number(ctx: &mut GenerationContext) -> i64 {
    ctx.int_between(STREET_NUMBER)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use covidgen_core::Record;

    use super::*;

    pub(super) fn context(seed: u64) -> GenerationContext {
        GenerationContext::new(seed, NaiveDate::from_ymd_opt(2022, 9, 15).unwrap())
    }

    #[test]
    fn every_table_generates_valid_sequential_rows() {
        let mut ctx = context(42);
        for table in TableName::ALL {
            let dataset = generate(table, &mut ctx).unwrap();
            assert_eq!(dataset.table(), table);
            assert!(!dataset.is_empty(), "{table}");
            for (index, record) in dataset.records().iter().enumerate() {
                assert_eq!(record.id(), index as u64 + 1, "{table}");
                assert_eq!(record.values().len(), table.columns().len(), "{table}");
                Record::new(record.kind().clone()).unwrap();
            }
        }
    }

    #[test]
    fn locations_stay_in_bounding_box() {
        let mut ctx = context(9);
        for _ in 0..500 {
            let location = Location::sample(&mut ctx);
            assert!(GEO_BOUNDS.contains(location.latitude, location.longitude));
        }
    }
}
