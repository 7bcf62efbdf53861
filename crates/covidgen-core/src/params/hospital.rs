use super::{Band, IntRange, Weighted};
use crate::region::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    Pemerintah,
    Swasta,
    TniPolri,
    Bumn,
}

impl Ownership {
    pub fn label(self) -> &'static str {
        match self {
            Ownership::Pemerintah => "Pemerintah",
            Ownership::Swasta => "Swasta",
            Ownership::TniPolri => "TNI/Polri",
            Ownership::Bumn => "BUMN",
        }
    }

    /// Class distribution conditioned on ownership.
    pub fn class_weights(self) -> Weighted<HospitalClass> {
        match self {
            Ownership::Pemerintah => &[
                (HospitalClass::A, 0.1),
                (HospitalClass::B, 0.3),
                (HospitalClass::C, 0.4),
                (HospitalClass::D, 0.2),
            ],
            Ownership::Swasta | Ownership::TniPolri | Ownership::Bumn => &[
                (HospitalClass::A, 0.2),
                (HospitalClass::B, 0.5),
                (HospitalClass::C, 0.3),
            ],
        }
    }
}

pub const OWNERSHIP_WEIGHTS: Weighted<Ownership> = &[
    (Ownership::Pemerintah, 0.40),
    (Ownership::Swasta, 0.45),
    (Ownership::TniPolri, 0.10),
    (Ownership::Bumn, 0.05),
];

/// Ministry of Health hospital class, A being the largest referral tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HospitalClass {
    A,
    B,
    C,
    D,
}

/// Capacity ranges for one hospital class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProfile {
    pub total_bed: IntRange,
    pub icu_fraction: Band,
    pub isolation_fraction: Band,
}

impl HospitalClass {
    pub fn label(self) -> &'static str {
        match self {
            HospitalClass::A => "A",
            HospitalClass::B => "B",
            HospitalClass::C => "C",
            HospitalClass::D => "D",
        }
    }

    pub fn profile(self) -> ClassProfile {
        match self {
            HospitalClass::A => ClassProfile {
                total_bed: IntRange::new(300, 800),
                icu_fraction: Band::new(0.05, 0.10),
                isolation_fraction: Band::new(0.10, 0.20),
            },
            HospitalClass::B => ClassProfile {
                total_bed: IntRange::new(150, 300),
                icu_fraction: Band::new(0.03, 0.08),
                isolation_fraction: Band::new(0.08, 0.15),
            },
            HospitalClass::C => ClassProfile {
                total_bed: IntRange::new(50, 150),
                icu_fraction: Band::new(0.02, 0.05),
                isolation_fraction: Band::new(0.05, 0.10),
            },
            HospitalClass::D => ClassProfile {
                total_bed: IntRange::new(20, 50),
                icu_fraction: Band::new(0.01, 0.03),
                isolation_fraction: Band::new(0.03, 0.08),
            },
        }
    }

    /// Only class A and B hospitals may carry a CT scanner.
    pub fn is_referral(self) -> bool {
        matches!(self, HospitalClass::A | HospitalClass::B)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationalStatus {
    Aktif,
    TutupSementara,
    Renovasi,
}

impl OperationalStatus {
    pub fn label(self) -> &'static str {
        match self {
            OperationalStatus::Aktif => "Aktif",
            OperationalStatus::TutupSementara => "Tutup Sementara",
            OperationalStatus::Renovasi => "Renovasi",
        }
    }
}

pub const OPERATIONAL_WEIGHTS: Weighted<OperationalStatus> = &[
    (OperationalStatus::Aktif, 0.90),
    (OperationalStatus::TutupSementara, 0.08),
    (OperationalStatus::Renovasi, 0.02),
];

pub fn facilities_per_region(tier: Tier) -> IntRange {
    match tier {
        Tier::Large => IntRange::new(15, 25),
        Tier::Medium => IntRange::new(8, 15),
        Tier::Small => IntRange::new(3, 8),
    }
}

pub const NAME_PREFIXES: [&str; 5] = ["Umum", "Daerah", "Swasta", "Bhayangkara", "TNI"];

pub const EMERGENCY_FRACTION: Band = Band::new(0.05, 0.10);
pub const VENTILATORS_PER_ICU_BED: Band = Band::new(0.8, 1.2);
pub const MIN_VENTILATORS: i64 = 1;
/// Liters per minute per bed.
pub const OXYGEN_PER_BED: IntRange = IntRange::new(5, 15);

pub const DOCTORS_PER_BED: Band = Band::new(0.1, 0.3);
pub const MIN_DOCTORS: i64 = 5;
pub const NURSES_PER_BED: Band = Band::new(0.5, 1.2);
pub const MIN_NURSES: i64 = 10;
pub const SPECIALISTS_PER_DOCTOR: Band = Band::new(0.2, 0.5);
pub const MIN_SPECIALISTS: i64 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_weights_sum_to_one() {
        let total: f64 = OWNERSHIP_WEIGHTS.iter().map(|(_, weight)| weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
        for (ownership, _) in OWNERSHIP_WEIGHTS {
            let total: f64 = ownership
                .class_weights()
                .iter()
                .map(|(_, weight)| weight)
                .sum();
            assert!((total - 1.0).abs() < 1e-9, "{ownership:?}");
        }
    }

    #[test]
    fn only_government_hospitals_reach_class_d() {
        assert!(
            Ownership::Pemerintah
                .class_weights()
                .iter()
                .any(|(class, _)| *class == HospitalClass::D)
        );
        assert!(
            !Ownership::Swasta
                .class_weights()
                .iter()
                .any(|(class, _)| *class == HospitalClass::D)
        );
    }
}
