use super::{Band, IntRange};
use crate::region::Region;
use crate::timeline::Ymd;

pub const HORIZON_START: Ymd = (2020, 3, 1);
pub const HORIZON_END: Ymd = (2022, 9, 15);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    WorkFromHome,
    Psbb,
    SekolahDaring,
    PpkmLevel4,
    PpkmLevel3,
    PpkmLevel2,
    PpkmLevel1,
}

/// Which provinces a policy applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    National,
    Listed(&'static [Region]),
    /// A random sample of distinct provinces, size drawn from the range.
    Sampled(IntRange),
}

/// How a sector flag is decided for a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorRule {
    Fixed(bool),
    Coin,
}

/// Sector flags in column order: education, economy, transport, tourism,
/// worship.
pub type SectorRules = [SectorRule; 5];

const JAVA_BALI: &[Region] = &[
    Region::DkiJakarta,
    Region::JawaBarat,
    Region::JawaTimur,
    Region::JawaTengah,
    Region::Banten,
    Region::Bali,
];

const JAVA_BALI_PLUS: &[Region] = &[
    Region::DkiJakarta,
    Region::JawaBarat,
    Region::JawaTimur,
    Region::JawaTengah,
    Region::Banten,
    Region::Bali,
    Region::SumateraUtara,
    Region::SulawesiSelatan,
    Region::SumateraSelatan,
];

const PSBB_REGIONS: &[Region] = &[Region::DkiJakarta, Region::JawaBarat, Region::JawaTimur];

impl PolicyKind {
    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::WorkFromHome => "Work From Home",
            PolicyKind::Psbb => "PSBB",
            PolicyKind::SekolahDaring => "Sekolah Daring",
            PolicyKind::PpkmLevel4 => "PPKM Level 4",
            PolicyKind::PpkmLevel3 => "PPKM Level 3",
            PolicyKind::PpkmLevel2 => "PPKM Level 2",
            PolicyKind::PpkmLevel1 => "PPKM Level 1",
        }
    }

    pub fn coverage(self) -> Coverage {
        match self {
            PolicyKind::WorkFromHome | PolicyKind::SekolahDaring => Coverage::National,
            PolicyKind::PpkmLevel4 => Coverage::Listed(JAVA_BALI),
            PolicyKind::PpkmLevel3 => Coverage::Listed(JAVA_BALI_PLUS),
            PolicyKind::Psbb => Coverage::Listed(PSBB_REGIONS),
            PolicyKind::PpkmLevel2 | PolicyKind::PpkmLevel1 => {
                Coverage::Sampled(IntRange::new(5, 15))
            }
        }
    }

    pub fn sectors(self) -> SectorRules {
        use SectorRule::{Coin, Fixed};
        match self {
            PolicyKind::PpkmLevel4 | PolicyKind::Psbb => [Fixed(true); 5],
            PolicyKind::PpkmLevel3 => [Fixed(true), Fixed(true), Coin, Fixed(true), Coin],
            PolicyKind::WorkFromHome => [
                Fixed(false),
                Fixed(true),
                Fixed(false),
                Fixed(false),
                Fixed(false),
            ],
            PolicyKind::SekolahDaring | PolicyKind::PpkmLevel2 | PolicyKind::PpkmLevel1 => {
                [Coin; 5]
            }
        }
    }
}

/// One entry of the national policy timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyEvent {
    pub start: Ymd,
    pub kind: PolicyKind,
    /// Stringency on a 1-10 scale.
    pub stringency: u32,
}

pub const POLICY_EVENTS: [PolicyEvent; 12] = [
    PolicyEvent { start: (2020, 3, 15), kind: PolicyKind::WorkFromHome, stringency: 6 },
    PolicyEvent { start: (2020, 4, 1), kind: PolicyKind::Psbb, stringency: 8 },
    PolicyEvent { start: (2020, 6, 1), kind: PolicyKind::Psbb, stringency: 6 },
    PolicyEvent { start: (2020, 9, 1), kind: PolicyKind::SekolahDaring, stringency: 7 },
    PolicyEvent { start: (2021, 1, 11), kind: PolicyKind::PpkmLevel4, stringency: 9 },
    PolicyEvent { start: (2021, 3, 1), kind: PolicyKind::PpkmLevel3, stringency: 7 },
    PolicyEvent { start: (2021, 6, 1), kind: PolicyKind::PpkmLevel4, stringency: 9 },
    PolicyEvent { start: (2021, 8, 1), kind: PolicyKind::PpkmLevel3, stringency: 7 },
    PolicyEvent { start: (2021, 10, 1), kind: PolicyKind::PpkmLevel2, stringency: 5 },
    PolicyEvent { start: (2022, 1, 1), kind: PolicyKind::PpkmLevel2, stringency: 4 },
    PolicyEvent { start: (2022, 3, 1), kind: PolicyKind::PpkmLevel1, stringency: 3 },
    PolicyEvent { start: (2022, 6, 1), kind: PolicyKind::PpkmLevel1, stringency: 2 },
];

pub const DURATION_DAYS: IntRange = IntRange::new(14, 90);
/// Percent of the population complying.
pub const COMPLIANCE_RATE: Band = Band::new(60.0, 90.0);
/// Percent of regional output lost per stringency level.
pub const IMPACT_PER_LEVEL: Band = Band::new(2.0, 5.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyStatus {
    Aktif,
    Berakhir,
}

impl PolicyStatus {
    pub fn label(self) -> &'static str {
        match self {
            PolicyStatus::Aktif => "Aktif",
            PolicyStatus::Berakhir => "Berakhir",
        }
    }
}
