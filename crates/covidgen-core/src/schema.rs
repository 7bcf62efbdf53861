use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::records::{
    ClusterRecord, EconomyRecord, HospitalRecord, LabRecord, MobilityRecord, PolicyRecord,
    VaccinationRecord,
};

/// Storage kind of a declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Table-scoped sequential identifier.
    Id,
    Int,
    /// Continuous value rounded to `scale` digits when emitted.
    Decimal(u8),
    Text,
    Bool,
    Date,
    NullableDate,
}

impl ColumnKind {
    pub fn scale(self) -> Option<u8> {
        match self {
            ColumnKind::Decimal(scale) => Some(scale),
            _ => None,
        }
    }

    pub fn is_nullable(self) -> bool {
        matches!(self, ColumnKind::NullableDate)
    }
}

/// A declared column: name plus storage kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// The seven generated tables, in canonical generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    RumahSakit,
    VaksinasiDetail,
    KebijakanPemerintah,
    EkonomiRegional,
    TestingLabs,
    ClusterPenularan,
    MobilitasHarian,
}

impl TableName {
    pub const ALL: [TableName; 7] = [
        TableName::RumahSakit,
        TableName::VaksinasiDetail,
        TableName::KebijakanPemerintah,
        TableName::EkonomiRegional,
        TableName::TestingLabs,
        TableName::ClusterPenularan,
        TableName::MobilitasHarian,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableName::RumahSakit => "rumah_sakit",
            TableName::VaksinasiDetail => "vaksinasi_detail",
            TableName::KebijakanPemerintah => "kebijakan_pemerintah",
            TableName::EkonomiRegional => "ekonomi_regional",
            TableName::TestingLabs => "testing_labs",
            TableName::ClusterPenularan => "cluster_penularan",
            TableName::MobilitasHarian => "mobilitas_harian",
        }
    }

    /// Declared column order for the table.
    pub fn columns(self) -> &'static [Column] {
        match self {
            TableName::RumahSakit => HospitalRecord::COLUMNS,
            TableName::VaksinasiDetail => VaccinationRecord::COLUMNS,
            TableName::KebijakanPemerintah => PolicyRecord::COLUMNS,
            TableName::EkonomiRegional => EconomyRecord::COLUMNS,
            TableName::TestingLabs => LabRecord::COLUMNS,
            TableName::ClusterPenularan => ClusterRecord::COLUMNS,
            TableName::MobilitasHarian => MobilityRecord::COLUMNS,
        }
    }

    pub fn column_names(self) -> Vec<&'static str> {
        self.columns().iter().map(|column| column.name).collect()
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = name.trim().to_lowercase();
        TableName::ALL
            .iter()
            .copied()
            .find(|table| table.as_str() == name)
            .ok_or_else(|| Error::configuration(format!("unknown table '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_table_starts_with_its_identifier() {
        for table in TableName::ALL {
            let columns = table.columns();
            assert_eq!(columns[0].kind, ColumnKind::Id, "{table}");
            assert!(columns[0].name.starts_with("id_"), "{table}");
            assert_eq!(columns[1].name, "iso_code", "{table}");
        }
    }

    #[test]
    fn column_names_are_unique_per_table() {
        for table in TableName::ALL {
            let names: HashSet<&str> = table.column_names().into_iter().collect();
            assert_eq!(names.len(), table.columns().len(), "{table}");
        }
    }

    #[test]
    fn parses_table_names() {
        assert_eq!(
            "Cluster_Penularan".parse::<TableName>().unwrap(),
            TableName::ClusterPenularan
        );
        assert!("pasien".parse::<TableName>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&TableName::TestingLabs).unwrap();
        assert_eq!(json, "\"testing_labs\"");
    }
}
