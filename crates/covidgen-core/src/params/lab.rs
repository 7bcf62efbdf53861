use super::{IntRange, Weighted};
use crate::region::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabType {
    Pcr,
    Antigen,
    Antibodi,
    Kombinasi,
}

/// Daily capacity and equipment ranges for one lab type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabCapacity {
    pub pcr: IntRange,
    pub antigen: IntRange,
    pub antibody: IntRange,
    pub pcr_machines: IntRange,
    /// Hours from sample to PCR result.
    pub pcr_turnaround: IntRange,
}

impl LabType {
    pub fn label(self) -> &'static str {
        match self {
            LabType::Pcr => "PCR",
            LabType::Antigen => "Antigen",
            LabType::Antibodi => "Antibodi",
            LabType::Kombinasi => "Kombinasi",
        }
    }

    pub fn capacity(self) -> LabCapacity {
        match self {
            LabType::Pcr => LabCapacity {
                pcr: IntRange::new(100, 1000),
                antigen: IntRange::new(0, 200),
                antibody: IntRange::new(0, 100),
                pcr_machines: IntRange::new(2, 10),
                pcr_turnaround: IntRange::new(6, 24),
            },
            LabType::Antigen => LabCapacity {
                pcr: IntRange::fixed(0),
                antigen: IntRange::new(200, 2000),
                antibody: IntRange::new(0, 100),
                pcr_machines: IntRange::fixed(0),
                pcr_turnaround: IntRange::fixed(24),
            },
            LabType::Antibodi => LabCapacity {
                pcr: IntRange::fixed(0),
                antigen: IntRange::fixed(0),
                antibody: IntRange::new(100, 500),
                pcr_machines: IntRange::fixed(0),
                pcr_turnaround: IntRange::fixed(24),
            },
            LabType::Kombinasi => LabCapacity {
                pcr: IntRange::new(50, 500),
                antigen: IntRange::new(100, 1000),
                antibody: IntRange::new(50, 300),
                pcr_machines: IntRange::new(1, 5),
                pcr_turnaround: IntRange::new(8, 24),
            },
        }
    }
}

pub const LAB_TYPE_WEIGHTS: Weighted<LabType> = &[
    (LabType::Pcr, 0.3),
    (LabType::Antigen, 0.4),
    (LabType::Antibodi, 0.1),
    (LabType::Kombinasi, 0.2),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabOwnership {
    Pemerintah,
    Swasta,
    Universitas,
    TniPolri,
}

impl LabOwnership {
    pub fn label(self) -> &'static str {
        match self {
            LabOwnership::Pemerintah => "Pemerintah",
            LabOwnership::Swasta => "Swasta",
            LabOwnership::Universitas => "Universitas",
            LabOwnership::TniPolri => "TNI/Polri",
        }
    }

    /// Chance of holding an ISO certification.
    pub fn iso_chance(self) -> f64 {
        match self {
            LabOwnership::Swasta => 0.5,
            LabOwnership::Pemerintah | LabOwnership::Universitas | LabOwnership::TniPolri => {
                super::ONE_IN_THREE
            }
        }
    }

    /// Only civilian government and private labs may run around the clock.
    pub fn may_run_24_hours(self) -> bool {
        matches!(self, LabOwnership::Pemerintah | LabOwnership::Swasta)
    }
}

pub const OWNERSHIP_WEIGHTS: Weighted<LabOwnership> = &[
    (LabOwnership::Pemerintah, 0.40),
    (LabOwnership::Swasta, 0.45),
    (LabOwnership::Universitas, 0.10),
    (LabOwnership::TniPolri, 0.05),
];

pub fn labs_per_region(tier: Tier) -> IntRange {
    match tier {
        Tier::Large => IntRange::new(8, 15),
        Tier::Medium => IntRange::new(4, 8),
        Tier::Small => IntRange::new(2, 5),
    }
}

pub const EXTRACTION_KIT_STOCK: IntRange = IntRange::new(100, 5000);
pub const REAGENT_STOCK: IntRange = IntRange::new(500, 10000);
pub const ANALYSTS: IntRange = IntRange::new(3, 20);
pub const TECHNICIANS: IntRange = IntRange::new(2, 15);
/// Hours from sample to antigen result.
pub const ANTIGEN_TURNAROUND: IntRange = IntRange::new(1, 4);
