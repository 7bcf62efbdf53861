use super::Band;
use crate::error::Result;
use crate::timeline::{Timeline, Ymd};

pub const HORIZON_START: Ymd = (2021, 3, 1);
pub const HORIZON_END: Ymd = (2022, 9, 15);

/// First day on which mRNA brands enter the mix.
pub const MID_PROGRAM_START: Ymd = (2021, 6, 1);

/// Share of the population vaccinated per reported day.
pub const DAILY_TARGET: Band = Band::new(0.001, 0.005);

/// Novavax share of the remainder left after the named brands.
pub const NOVAVAX_SHARE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandPhase {
    Early,
    Middle,
    Late,
}

/// Brand fractions of the daily target, sampled in field order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrandMix {
    pub sinovac: Band,
    pub astrazeneca: Band,
    pub pfizer: Band,
    pub moderna: Band,
}

impl BrandPhase {
    pub fn mix(self) -> BrandMix {
        match self {
            BrandPhase::Early => BrandMix {
                sinovac: Band::new(0.7, 0.9),
                astrazeneca: Band::new(0.1, 0.3),
                pfizer: Band::ZERO,
                moderna: Band::ZERO,
            },
            BrandPhase::Middle => BrandMix {
                sinovac: Band::new(0.4, 0.6),
                astrazeneca: Band::new(0.2, 0.4),
                pfizer: Band::new(0.1, 0.2),
                moderna: Band::new(0.05, 0.15),
            },
            BrandPhase::Late => BrandMix {
                sinovac: Band::new(0.2, 0.4),
                astrazeneca: Band::new(0.1, 0.3),
                pfizer: Band::new(0.3, 0.5),
                moderna: Band::new(0.1, 0.3),
            },
        }
    }
}

pub fn brand_timeline() -> Result<Timeline<BrandPhase>> {
    Timeline::new(
        "vaccine_brand",
        HORIZON_START,
        HORIZON_END,
        &[
            (HORIZON_START, BrandPhase::Early),
            (MID_PROGRAM_START, BrandPhase::Middle),
            ((2021, 10, 1), BrandPhase::Late),
        ],
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DosePhase {
    FirstDose,
    SecondDose,
    Booster,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoseMix {
    pub first: Band,
    pub second: Band,
    pub booster: Band,
}

impl DosePhase {
    pub fn mix(self) -> DoseMix {
        match self {
            DosePhase::FirstDose => DoseMix {
                first: Band::new(0.7, 0.9),
                second: Band::new(0.1, 0.3),
                booster: Band::ZERO,
            },
            DosePhase::SecondDose => DoseMix {
                first: Band::new(0.3, 0.5),
                second: Band::new(0.5, 0.7),
                booster: Band::new(0.0, 0.1),
            },
            DosePhase::Booster => DoseMix {
                first: Band::new(0.2, 0.3),
                second: Band::new(0.3, 0.5),
                booster: Band::new(0.2, 0.5),
            },
        }
    }
}

pub fn dose_timeline() -> Result<Timeline<DosePhase>> {
    Timeline::new(
        "vaccine_dose",
        HORIZON_START,
        HORIZON_END,
        &[
            (HORIZON_START, DosePhase::FirstDose),
            ((2021, 8, 1), DosePhase::SecondDose),
            ((2022, 1, 1), DosePhase::Booster),
        ],
    )
}

/// Whether children are part of the program on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildEligibility {
    Closed,
    Open,
}

impl ChildEligibility {
    pub fn share(self) -> Band {
        match self {
            ChildEligibility::Closed => Band::ZERO,
            ChildEligibility::Open => Band::new(0.0, 0.1),
        }
    }
}

pub fn child_timeline() -> Result<Timeline<ChildEligibility>> {
    Timeline::new(
        "vaccine_children",
        HORIZON_START,
        HORIZON_END,
        &[
            (HORIZON_START, ChildEligibility::Closed),
            ((2021, 12, 2), ChildEligibility::Open),
        ],
    )
}

pub const ELDERLY_SHARE: Band = Band::new(0.15, 0.25);
pub const ADULT_SHARE: Band = Band::new(0.6, 0.75);
pub const TEEN_SHARE: Band = Band::new(0.05, 0.15);

pub const HEALTH_WORKER_SHARE: Band = Band::new(0.05, 0.15);
pub const TEACHER_SHARE: Band = Band::new(0.03, 0.10);
pub const PUBLIC_SERVANT_SHARE: Band = Band::new(0.02, 0.08);

pub const PUSKESMAS_SHARE: Band = Band::new(0.4, 0.6);
pub const HOSPITAL_SHARE: Band = Band::new(0.2, 0.3);
pub const MASS_SITE_SHARE: Band = Band::new(0.1, 0.2);
pub const DRIVE_THRU_SHARE: Band = Band::new(0.05, 0.15);

/// Adverse events following immunization, by severity.
pub const KIPI_MILD_SHARE: Band = Band::new(0.01, 0.05);
pub const KIPI_MODERATE_SHARE: Band = Band::new(0.001, 0.01);
pub const KIPI_SEVERE_SHARE: Band = Band::new(0.0001, 0.001);
