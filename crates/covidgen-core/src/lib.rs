//! Parameter tables, table schemas and typed records for covidgen.
//!
//! Everything in this crate is static reference data or a pure data
//! contract: regions and their size tiers, per-domain timelines, category
//! weights, tier-conditioned ranges, and the validated row types the
//! generator emits.

pub mod error;
pub mod params;
pub mod records;
pub mod region;
pub mod schema;
pub mod timeline;
pub mod value;

pub use error::{Error, Result};
pub use params::{Band, BoundingBox, IntRange, Weighted, GEO_BOUNDS};
pub use records::{Record, RecordKind};
pub use region::{Region, Tier};
pub use schema::{Column, ColumnKind, TableName};
pub use timeline::{Timeline, Ymd};
pub use value::FieldValue;
