use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Coarse province size classification used to scale entity counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Large,
    Medium,
    Small,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Large => "large",
            Tier::Medium => "medium",
            Tier::Small => "small",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Indonesian province, keyed by its ISO 3166-2 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Aceh,
    SumateraUtara,
    SumateraBarat,
    Riau,
    Jambi,
    SumateraSelatan,
    Bengkulu,
    Lampung,
    BangkaBelitung,
    KepulauanRiau,
    DkiJakarta,
    JawaBarat,
    JawaTengah,
    Yogyakarta,
    JawaTimur,
    Banten,
    Bali,
    NusaTenggaraBarat,
    NusaTenggaraTimur,
    KalimantanBarat,
    KalimantanTengah,
    KalimantanSelatan,
    KalimantanTimur,
    KalimantanUtara,
    SulawesiUtara,
    SulawesiTengah,
    SulawesiSelatan,
    SulawesiTenggara,
    Gorontalo,
    SulawesiBarat,
    Maluku,
    MalukuUtara,
    Papua,
    PapuaBarat,
}

impl Region {
    /// Every province in iteration order.
    pub const ALL: [Region; 34] = [
        Region::Aceh,
        Region::SumateraUtara,
        Region::SumateraBarat,
        Region::Riau,
        Region::Jambi,
        Region::SumateraSelatan,
        Region::Bengkulu,
        Region::Lampung,
        Region::BangkaBelitung,
        Region::KepulauanRiau,
        Region::DkiJakarta,
        Region::JawaBarat,
        Region::JawaTengah,
        Region::Yogyakarta,
        Region::JawaTimur,
        Region::Banten,
        Region::Bali,
        Region::NusaTenggaraBarat,
        Region::NusaTenggaraTimur,
        Region::KalimantanBarat,
        Region::KalimantanTengah,
        Region::KalimantanSelatan,
        Region::KalimantanTimur,
        Region::KalimantanUtara,
        Region::SulawesiUtara,
        Region::SulawesiTengah,
        Region::SulawesiSelatan,
        Region::SulawesiTenggara,
        Region::Gorontalo,
        Region::SulawesiBarat,
        Region::Maluku,
        Region::MalukuUtara,
        Region::Papua,
        Region::PapuaBarat,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Region::Aceh => "ID-AC",
            Region::SumateraUtara => "ID-SU",
            Region::SumateraBarat => "ID-SB",
            Region::Riau => "ID-RI",
            Region::Jambi => "ID-JA",
            Region::SumateraSelatan => "ID-SS",
            Region::Bengkulu => "ID-BE",
            Region::Lampung => "ID-LA",
            Region::BangkaBelitung => "ID-BB",
            Region::KepulauanRiau => "ID-KR",
            Region::DkiJakarta => "ID-JK",
            Region::JawaBarat => "ID-JB",
            Region::JawaTengah => "ID-JT",
            Region::Yogyakarta => "ID-YO",
            Region::JawaTimur => "ID-JI",
            Region::Banten => "ID-BT",
            Region::Bali => "ID-BA",
            Region::NusaTenggaraBarat => "ID-NB",
            Region::NusaTenggaraTimur => "ID-NT",
            Region::KalimantanBarat => "ID-KB",
            Region::KalimantanTengah => "ID-KT",
            Region::KalimantanSelatan => "ID-KS",
            Region::KalimantanTimur => "ID-KI",
            Region::KalimantanUtara => "ID-KU",
            Region::SulawesiUtara => "ID-SA",
            Region::SulawesiTengah => "ID-ST",
            Region::SulawesiSelatan => "ID-SN",
            Region::SulawesiTenggara => "ID-SG",
            Region::Gorontalo => "ID-GO",
            Region::SulawesiBarat => "ID-SR",
            Region::Maluku => "ID-MA",
            Region::MalukuUtara => "ID-MU",
            Region::Papua => "ID-PA",
            Region::PapuaBarat => "ID-PB",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Aceh => "Aceh",
            Region::SumateraUtara => "Sumatera Utara",
            Region::SumateraBarat => "Sumatera Barat",
            Region::Riau => "Riau",
            Region::Jambi => "Jambi",
            Region::SumateraSelatan => "Sumatera Selatan",
            Region::Bengkulu => "Bengkulu",
            Region::Lampung => "Lampung",
            Region::BangkaBelitung => "Kepulauan Bangka Belitung",
            Region::KepulauanRiau => "Kepulauan Riau",
            Region::DkiJakarta => "DKI Jakarta",
            Region::JawaBarat => "Jawa Barat",
            Region::JawaTengah => "Jawa Tengah",
            Region::Yogyakarta => "Yogyakarta",
            Region::JawaTimur => "Jawa Timur",
            Region::Banten => "Banten",
            Region::Bali => "Bali",
            Region::NusaTenggaraBarat => "Nusa Tenggara Barat",
            Region::NusaTenggaraTimur => "Nusa Tenggara Timur",
            Region::KalimantanBarat => "Kalimantan Barat",
            Region::KalimantanTengah => "Kalimantan Tengah",
            Region::KalimantanSelatan => "Kalimantan Selatan",
            Region::KalimantanTimur => "Kalimantan Timur",
            Region::KalimantanUtara => "Kalimantan Utara",
            Region::SulawesiUtara => "Sulawesi Utara",
            Region::SulawesiTengah => "Sulawesi Tengah",
            Region::SulawesiSelatan => "Sulawesi Selatan",
            Region::SulawesiTenggara => "Sulawesi Tenggara",
            Region::Gorontalo => "Gorontalo",
            Region::SulawesiBarat => "Sulawesi Barat",
            Region::Maluku => "Maluku",
            Region::MalukuUtara => "Maluku Utara",
            Region::Papua => "Papua",
            Region::PapuaBarat => "Papua Barat",
        }
    }

    pub fn tier(self) -> Tier {
        match self {
            Region::DkiJakarta | Region::JawaBarat | Region::JawaTimur | Region::JawaTengah => {
                Tier::Large
            }
            Region::SumateraUtara
            | Region::SumateraBarat
            | Region::SumateraSelatan
            | Region::Bali
            | Region::SulawesiSelatan => Tier::Medium,
            _ => Tier::Small,
        }
    }

    /// Estimated population in millions.
    pub fn population_millions(self) -> u32 {
        match self {
            Region::JawaBarat => 48,
            Region::JawaTimur => 40,
            Region::JawaTengah => 36,
            Region::SumateraUtara => 15,
            Region::DkiJakarta => 11,
            Region::SulawesiSelatan => 9,
            Region::Lampung | Region::SumateraSelatan => 8,
            Region::Riau => 6,
            Region::Aceh => 5,
            _ => 3,
        }
    }

    /// Baseline gross regional product, in billions of rupiah.
    pub fn pdrb_base(self) -> f64 {
        match self {
            Region::DkiJakarta => 2500.0,
            Region::JawaBarat => 1800.0,
            Region::JawaTimur => 1600.0,
            Region::JawaTengah => 1200.0,
            Region::SumateraUtara => 700.0,
            Region::Riau => 600.0,
            Region::SulawesiSelatan => 500.0,
            Region::Bali => 300.0,
            _ => 200.0,
        }
    }

    /// Baseline regional minimum wage, in rupiah.
    pub fn minimum_wage_base(self) -> f64 {
        match self {
            Region::DkiJakarta => 4_500_000.0,
            Region::Bali => 2_500_000.0,
            Region::SumateraUtara => 2_000_000.0,
            Region::JawaTimur => 1_900_000.0,
            Region::JawaBarat => 1_800_000.0,
            Region::JawaTengah => 1_700_000.0,
            _ => 1_500_000.0,
        }
    }

    /// Industrial provinces weight their economy toward manufacturing.
    pub fn is_industrial(self) -> bool {
        matches!(
            self,
            Region::DkiJakarta | Region::JawaBarat | Region::JawaTimur
        )
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .iter()
            .copied()
            .find(|region| region.code().eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| Error::configuration(format!("unknown region code '{code}'")))
    }
}
