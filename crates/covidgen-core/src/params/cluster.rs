use super::{Band, IntRange, Weighted};
use crate::error::Result;
use crate::region::Tier;
use crate::timeline::{Timeline, Ymd};

pub const HORIZON_START: Ymd = (2020, 3, 1);
pub const HORIZON_END: Ymd = (2022, 9, 15);

/// Where a transmission cluster was traced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterSetting {
    Perkantoran,
    Pabrik,
    Sekolah,
    Universitas,
    Pasar,
    Mall,
    RumahSakit,
    PantiJompo,
    Asrama,
    Pernikahan,
    Keagamaan,
    Olahraga,
    Transportasi,
    Keluarga,
    Lainnya,
}

/// Size class of a setting, selecting the case range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingGroup {
    Workplace,
    Gathering,
    Care,
    Community,
}

impl SettingGroup {
    pub fn cases(self) -> IntRange {
        match self {
            SettingGroup::Workplace => IntRange::new(10, 100),
            SettingGroup::Gathering => IntRange::new(20, 200),
            SettingGroup::Care => IntRange::new(5, 50),
            SettingGroup::Community => IntRange::new(3, 30),
        }
    }
}

/// Fractions of related cases per age group, carved in field order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeSplit {
    pub children: Band,
    pub adults: Band,
    pub elderly: Band,
}

impl ClusterSetting {
    pub const ALL: [ClusterSetting; 15] = [
        ClusterSetting::Perkantoran,
        ClusterSetting::Pabrik,
        ClusterSetting::Sekolah,
        ClusterSetting::Universitas,
        ClusterSetting::Pasar,
        ClusterSetting::Mall,
        ClusterSetting::RumahSakit,
        ClusterSetting::PantiJompo,
        ClusterSetting::Asrama,
        ClusterSetting::Pernikahan,
        ClusterSetting::Keagamaan,
        ClusterSetting::Olahraga,
        ClusterSetting::Transportasi,
        ClusterSetting::Keluarga,
        ClusterSetting::Lainnya,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ClusterSetting::Perkantoran => "Perkantoran",
            ClusterSetting::Pabrik => "Pabrik",
            ClusterSetting::Sekolah => "Sekolah",
            ClusterSetting::Universitas => "Universitas",
            ClusterSetting::Pasar => "Pasar",
            ClusterSetting::Mall => "Mall",
            ClusterSetting::RumahSakit => "Rumah Sakit",
            ClusterSetting::PantiJompo => "Panti Jompo",
            ClusterSetting::Asrama => "Asrama",
            ClusterSetting::Pernikahan => "Pernikahan",
            ClusterSetting::Keagamaan => "Keagamaan",
            ClusterSetting::Olahraga => "Olahraga",
            ClusterSetting::Transportasi => "Transportasi",
            ClusterSetting::Keluarga => "Keluarga",
            ClusterSetting::Lainnya => "Lainnya",
        }
    }

    pub fn group(self) -> SettingGroup {
        match self {
            ClusterSetting::Pabrik
            | ClusterSetting::Perkantoran
            | ClusterSetting::Sekolah
            | ClusterSetting::Universitas => SettingGroup::Workplace,
            ClusterSetting::Pernikahan | ClusterSetting::Keagamaan | ClusterSetting::Olahraga => {
                SettingGroup::Gathering
            }
            ClusterSetting::RumahSakit | ClusterSetting::PantiJompo => SettingGroup::Care,
            ClusterSetting::Pasar
            | ClusterSetting::Mall
            | ClusterSetting::Asrama
            | ClusterSetting::Transportasi
            | ClusterSetting::Keluarga
            | ClusterSetting::Lainnya => SettingGroup::Community,
        }
    }

    pub fn age_split(self) -> AgeSplit {
        match self {
            ClusterSetting::Sekolah | ClusterSetting::Universitas => AgeSplit {
                children: Band::new(0.3, 0.7),
                adults: Band::new(0.2, 0.5),
                elderly: Band::new(0.0, 0.1),
            },
            ClusterSetting::PantiJompo => AgeSplit {
                children: Band::ZERO,
                adults: Band::new(0.2, 0.4),
                elderly: Band::new(0.6, 0.8),
            },
            _ => AgeSplit {
                children: Band::new(0.1, 0.3),
                adults: Band::new(0.5, 0.7),
                elderly: Band::new(0.1, 0.2),
            },
        }
    }

    /// Settings a health office may close temporarily.
    pub fn may_close(self) -> bool {
        matches!(
            self,
            ClusterSetting::Perkantoran | ClusterSetting::Sekolah | ClusterSetting::Mall
        )
    }
}

/// Pandemic phase deciding which settings dominate new clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterPhase {
    EarlyPandemic,
    Mid2020,
    Early2021,
    LatePeriod,
}

impl ClusterPhase {
    /// Five settings drawn uniformly.
    pub fn settings(self) -> [ClusterSetting; 5] {
        use ClusterSetting::*;
        match self {
            ClusterPhase::EarlyPandemic => [Perkantoran, Pasar, RumahSakit, Keluarga, Lainnya],
            ClusterPhase::Mid2020 => [Pabrik, Perkantoran, Keluarga, Pernikahan, Keagamaan],
            ClusterPhase::Early2021 => [Perkantoran, Pabrik, Keluarga, Mall, Transportasi],
            ClusterPhase::LatePeriod => [Sekolah, Universitas, Perkantoran, Keluarga, Olahraga],
        }
    }
}

pub fn timeline() -> Result<Timeline<ClusterPhase>> {
    Timeline::new(
        "cluster",
        HORIZON_START,
        HORIZON_END,
        &[
            (HORIZON_START, ClusterPhase::EarlyPandemic),
            ((2020, 6, 1), ClusterPhase::Mid2020),
            ((2021, 1, 1), ClusterPhase::Early2021),
            ((2021, 8, 1), ClusterPhase::LatePeriod),
        ],
    )
}

pub fn clusters_per_region(tier: Tier) -> IntRange {
    match tier {
        Tier::Large => IntRange::new(50, 100),
        Tier::Medium => IntRange::new(20, 50),
        Tier::Small => IntRange::new(5, 20),
    }
}

pub const DURATION_DAYS: IntRange = IntRange::new(7, 56);
pub const CONTACTS_PER_CASE: Band = Band::new(2.0, 5.0);
pub const SUSPECTS_PER_CONTACT: Band = Band::new(0.1, 0.3);
pub const MALE_SHARE: Band = Band::new(0.4, 0.6);
pub const INDEX_CASES: i64 = 1;
pub const DISINFECTION_CHANCE: f64 = 2.0 / 3.0;

/// Severity fractions carved in column order, mildest first.
pub const SEVERITY: [Band; 6] = [
    Band::new(0.2, 0.4),
    Band::new(0.4, 0.6),
    Band::new(0.1, 0.2),
    Band::new(0.02, 0.08),
    Band::new(0.01, 0.03),
    Band::new(0.005, 0.02),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterStatus {
    Aktif,
    Terkendali,
    Selesai,
}

impl ClusterStatus {
    pub fn label(self) -> &'static str {
        match self {
            ClusterStatus::Aktif => "Aktif",
            ClusterStatus::Terkendali => "Terkendali",
            ClusterStatus::Selesai => "Selesai",
        }
    }

    pub fn is_closed(self) -> bool {
        !matches!(self, ClusterStatus::Aktif)
    }
}

pub const CLOSED_STATUS_WEIGHTS: Weighted<ClusterStatus> = &[
    (ClusterStatus::Terkendali, 0.3),
    (ClusterStatus::Selesai, 0.7),
];
