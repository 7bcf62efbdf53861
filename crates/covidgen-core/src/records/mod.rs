//! Typed, validated rows for every generated table.
//!
//! Each table has a fixed-field record struct whose field order is the
//! declared column order. A [`Record`] can only be obtained through
//! [`Record::new`], which checks the table's invariants and rejects the row
//! with [`Error::InvariantViolation`] otherwise.

mod checks;
mod cluster;
mod economy;
mod hospital;
mod lab;
mod mobility;
mod policy;
mod vaccination;

pub use cluster::ClusterRecord;
pub use economy::EconomyRecord;
pub use hospital::HospitalRecord;
pub use lab::LabRecord;
pub use mobility::{MobilityRecord, overall_index};
pub use policy::PolicyRecord;
pub use vaccination::{VaccinationRecord, split_remainder};

use crate::error::{Error, Result};
use crate::region::Region;
use crate::schema::{ColumnKind, TableName};
use crate::value::{FieldValue, ToField};

/// Declares a record struct together with its table, column list and value
/// projection. Fields are listed once, in column order.
macro_rules! table_record {
    (
        $(#[$meta:meta])*
        $name:ident => $table:ident {
            $( $field:ident : $ty:ty = $kind:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $( pub $field: $ty, )+
        }

        impl $name {
            pub const TABLE: $crate::schema::TableName = $crate::schema::TableName::$table;

            pub const COLUMNS: &'static [$crate::schema::Column] = &[
                $( $crate::schema::Column::new(stringify!($field), $kind), )+
            ];

            /// Cells in declared column order.
            pub fn values(&self) -> Vec<$crate::value::FieldValue> {
                use $crate::value::ToField;
                vec![ $( self.$field.to_field($kind), )+ ]
            }
        }
    };
}

pub(crate) use table_record;

impl ToField for Region {
    fn to_field(&self, _kind: ColumnKind) -> FieldValue {
        FieldValue::Text(self.code().to_string())
    }
}

/// One row of any table.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordKind {
    Hospital(HospitalRecord),
    Vaccination(VaccinationRecord),
    Policy(PolicyRecord),
    Economy(EconomyRecord),
    Lab(LabRecord),
    Cluster(ClusterRecord),
    Mobility(MobilityRecord),
}

macro_rules! record_kind_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for RecordKind {
                fn from(record: $ty) -> Self {
                    RecordKind::$variant(record)
                }
            }
        )+
    };
}

record_kind_from!(
    Hospital(HospitalRecord),
    Vaccination(VaccinationRecord),
    Policy(PolicyRecord),
    Economy(EconomyRecord),
    Lab(LabRecord),
    Cluster(ClusterRecord),
    Mobility(MobilityRecord),
);

impl RecordKind {
    pub fn table(&self) -> TableName {
        match self {
            RecordKind::Hospital(_) => HospitalRecord::TABLE,
            RecordKind::Vaccination(_) => VaccinationRecord::TABLE,
            RecordKind::Policy(_) => PolicyRecord::TABLE,
            RecordKind::Economy(_) => EconomyRecord::TABLE,
            RecordKind::Lab(_) => LabRecord::TABLE,
            RecordKind::Cluster(_) => ClusterRecord::TABLE,
            RecordKind::Mobility(_) => MobilityRecord::TABLE,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            RecordKind::Hospital(record) => record.id_rumah_sakit,
            RecordKind::Vaccination(record) => record.id_vaksinasi,
            RecordKind::Policy(record) => record.id_kebijakan,
            RecordKind::Economy(record) => record.id_ekonomi,
            RecordKind::Lab(record) => record.id_lab,
            RecordKind::Cluster(record) => record.id_cluster,
            RecordKind::Mobility(record) => record.id_mobilitas,
        }
    }

    pub fn region(&self) -> Region {
        match self {
            RecordKind::Hospital(record) => record.iso_code,
            RecordKind::Vaccination(record) => record.iso_code,
            RecordKind::Policy(record) => record.iso_code,
            RecordKind::Economy(record) => record.iso_code,
            RecordKind::Lab(record) => record.iso_code,
            RecordKind::Cluster(record) => record.iso_code,
            RecordKind::Mobility(record) => record.iso_code,
        }
    }

    pub fn values(&self) -> Vec<FieldValue> {
        match self {
            RecordKind::Hospital(record) => record.values(),
            RecordKind::Vaccination(record) => record.values(),
            RecordKind::Policy(record) => record.values(),
            RecordKind::Economy(record) => record.values(),
            RecordKind::Lab(record) => record.values(),
            RecordKind::Cluster(record) => record.values(),
            RecordKind::Mobility(record) => record.values(),
        }
    }

    fn validate(&self) -> checks::Check {
        if self.id() == 0 {
            return Err("identifiers start at 1".to_string());
        }
        match self {
            RecordKind::Hospital(record) => record.validate(),
            RecordKind::Vaccination(record) => record.validate(),
            RecordKind::Policy(record) => record.validate(),
            RecordKind::Economy(record) => record.validate(),
            RecordKind::Lab(record) => record.validate(),
            RecordKind::Cluster(record) => record.validate(),
            RecordKind::Mobility(record) => record.validate(),
        }
    }
}

/// A row that satisfied its table invariants at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: RecordKind,
}

impl Record {
    pub fn new(kind: impl Into<RecordKind>) -> Result<Self> {
        let kind = kind.into();
        kind.validate().map_err(|detail| Error::InvariantViolation {
            table: kind.table().as_str(),
            id: kind.id(),
            detail,
        })?;
        Ok(Self { kind })
    }

    pub fn id(&self) -> u64 {
        self.kind.id()
    }

    pub fn table(&self) -> TableName {
        self.kind.table()
    }

    pub fn region(&self) -> Region {
        self.kind.region()
    }

    pub fn values(&self) -> Vec<FieldValue> {
        self.kind.values()
    }

    pub fn kind(&self) -> &RecordKind {
        &self.kind
    }

    pub fn into_kind(self) -> RecordKind {
        self.kind
    }
}
