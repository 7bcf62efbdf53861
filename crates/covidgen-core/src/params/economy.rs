use super::{Band, IntRange};
use crate::error::Result;
use crate::timeline::{Timeline, Ymd};

pub const HORIZON_START: Ymd = (2020, 1, 1);
pub const HORIZON_END: Ymd = (2022, 9, 15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomicPhase {
    PrePandemic,
    Contraction,
    Recovery,
    Expansion,
}

/// Business impact ranges for one phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Percent drop in small-business turnover.
    pub umkm_turnover_drop: Band,
    pub business_closures: IntRange,
    /// Social assistance, billions of rupiah.
    pub social_aid: Band,
}

impl EconomicPhase {
    /// Annual growth before jitter, percent.
    pub fn growth_base(self) -> Band {
        match self {
            EconomicPhase::PrePandemic => Band::new(4.0, 6.0),
            EconomicPhase::Contraction => Band::new(-8.0, -2.0),
            EconomicPhase::Recovery => Band::new(-2.0, 4.0),
            EconomicPhase::Expansion => Band::new(2.0, 6.0),
        }
    }

    pub fn inflation(self) -> Band {
        match self {
            EconomicPhase::PrePandemic | EconomicPhase::Contraction => Band::new(0.5, 3.0),
            EconomicPhase::Recovery | EconomicPhase::Expansion => Band::new(1.0, 4.0),
        }
    }

    pub fn unemployment(self) -> Band {
        match self {
            EconomicPhase::Contraction => Band::new(6.0, 12.0),
            EconomicPhase::PrePandemic | EconomicPhase::Recovery | EconomicPhase::Expansion => {
                Band::new(3.0, 8.0)
            }
        }
    }

    pub fn impact(self) -> Impact {
        match self {
            EconomicPhase::Contraction => Impact {
                umkm_turnover_drop: Band::new(30.0, 70.0),
                business_closures: IntRange::new(100, 1000),
                social_aid: Band::new(50.0, 500.0),
            },
            EconomicPhase::Recovery => Impact {
                umkm_turnover_drop: Band::new(10.0, 40.0),
                business_closures: IntRange::new(50, 300),
                social_aid: Band::new(20.0, 200.0),
            },
            EconomicPhase::PrePandemic | EconomicPhase::Expansion => Impact {
                umkm_turnover_drop: Band::new(0.0, 20.0),
                business_closures: IntRange::new(10, 100),
                social_aid: Band::new(10.0, 100.0),
            },
        }
    }

    /// Recovery index on a 0-100 scale.
    pub fn recovery_index(self) -> Band {
        match self {
            EconomicPhase::PrePandemic | EconomicPhase::Contraction => Band::new(20.0, 50.0),
            EconomicPhase::Recovery => Band::new(40.0, 70.0),
            EconomicPhase::Expansion => Band::new(60.0, 90.0),
        }
    }
}

pub fn timeline() -> Result<Timeline<EconomicPhase>> {
    Timeline::new(
        "economy",
        HORIZON_START,
        HORIZON_END,
        &[
            (HORIZON_START, EconomicPhase::PrePandemic),
            ((2020, 4, 1), EconomicPhase::Contraction),
            ((2021, 1, 1), EconomicPhase::Recovery),
            ((2022, 1, 1), EconomicPhase::Expansion),
        ],
    )
}

/// Sector contributions to regional output, percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorShares {
    pub agriculture: Band,
    pub industry: Band,
    pub trade: Band,
    pub services: Band,
    pub tourism: Band,
}

pub fn sector_shares(industrial: bool) -> SectorShares {
    if industrial {
        SectorShares {
            agriculture: Band::new(5.0, 15.0),
            industry: Band::new(30.0, 45.0),
            trade: Band::new(20.0, 30.0),
            services: Band::new(15.0, 25.0),
            tourism: Band::new(3.0, 8.0),
        }
    } else {
        SectorShares {
            agriculture: Band::new(20.0, 40.0),
            industry: Band::new(10.0, 25.0),
            trade: Band::new(15.0, 25.0),
            services: Band::new(10.0, 20.0),
            tourism: Band::new(5.0, 15.0),
        }
    }
}

pub const PDRB_JITTER: Band = Band::new(0.9, 1.1);
pub const GROWTH_JITTER: Band = Band::new(-1.0, 1.0);
pub const WAGE_JITTER: Band = Band::new(0.95, 1.05);
pub const LABOR_PARTICIPATION: Band = Band::new(60.0, 75.0);
pub const CONFIDENCE_JITTER: Band = Band::new(-10.0, 10.0);
pub const CONFIDENCE_BOUNDS: Band = Band::new(0.0, 100.0);
