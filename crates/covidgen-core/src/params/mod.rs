//! Static parameter tables.
//!
//! Each submodule holds the closed category enums, weight vectors,
//! tier-conditioned ranges and timelines for one generated table. Mappings
//! are exhaustive `match`es over the enums so adding a variant forces every
//! rule to be revisited.

pub mod cluster;
pub mod economy;
pub mod hospital;
pub mod lab;
pub mod mobility;
pub mod policy;
pub mod vaccination;

use crate::timeline::Ymd;

/// Closed interval of continuous values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lo: f64,
    pub hi: f64,
}

impl Band {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub const ZERO: Band = Band::new(0.0, 0.0);

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    /// Bounds of `floor(whole * fraction)` for any fraction in the band.
    pub fn floor_bounds(&self, whole: i64) -> (i64, i64) {
        let whole = whole as f64;
        ((whole * self.lo).floor() as i64, (whole * self.hi).floor() as i64)
    }

    /// Band scaled by a (possibly negative) factor, endpoints reordered.
    pub fn scaled(&self, factor: f64) -> Band {
        let a = self.lo * factor;
        let b = self.hi * factor;
        Band::new(a.min(b), a.max(b))
    }

    /// Band widened by `jitter` on each side.
    pub fn widened(&self, jitter: f64) -> Band {
        Band::new(self.lo - jitter, self.hi + jitter)
    }
}

/// Closed interval of integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: i64) -> Self {
        Self::new(value, value)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Categorical weight vector; weights sum to 1.
pub type Weighted<T> = &'static [(T, f64)];

/// Geographic bounding box shared by every table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub latitude: Band,
    pub longitude: Band,
}

impl BoundingBox {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.latitude.contains(latitude) && self.longitude.contains(longitude)
    }
}

pub const GEO_BOUNDS: BoundingBox = BoundingBox {
    latitude: Band::new(-11.0, 6.0),
    longitude: Band::new(95.0, 141.0),
};

/// House numbers used in generated street addresses.
pub const STREET_NUMBER: IntRange = IntRange::new(1, 100);

/// Overall coverage reported in run manifests.
pub const DATASET_START: Ymd = (2020, 1, 1);
pub const DATASET_END: Ymd = (2022, 9, 15);

/// Default reference date for "ended/active" statuses.
pub const DEFAULT_AS_OF: Ymd = (2022, 9, 15);

/// Chance of the rarer outcome in one-in-three draws.
pub const ONE_IN_THREE: f64 = 1.0 / 3.0;
