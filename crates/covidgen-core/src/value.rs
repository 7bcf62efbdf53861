use chrono::NaiveDate;

use crate::schema::ColumnKind;

/// A single emitted cell.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Int(i64),
    /// Full-precision value plus the scale it is rounded to on emission.
    Decimal { value: f64, scale: u8 },
    Text(String),
    Bool(bool),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Render the cell for a delimited text file.
    pub fn to_csv(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Int(value) => value.to_string(),
            FieldValue::Decimal { value, scale } => {
                let rounded = round_to(*value, *scale);
                let scale = *scale as usize;
                format!("{rounded:.scale$}")
            }
            FieldValue::Text(value) => value.clone(),
            FieldValue::Bool(value) => value.to_string(),
            FieldValue::Date(value) => value.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Emitted (rounded) numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(value) => Some(*value as f64),
            FieldValue::Decimal { value, scale } => Some(round_to(*value, *scale)),
            _ => None,
        }
    }
}

/// Round half away from zero to `scale` decimal digits.
pub fn round_to(value: f64, scale: u8) -> f64 {
    let factor = 10_f64.powi(i32::from(scale));
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Conversion of a record field into an emitted cell.
pub trait ToField {
    fn to_field(&self, kind: ColumnKind) -> FieldValue;
}

impl ToField for u64 {
    fn to_field(&self, _kind: ColumnKind) -> FieldValue {
        FieldValue::Int(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

impl ToField for i64 {
    fn to_field(&self, _kind: ColumnKind) -> FieldValue {
        FieldValue::Int(*self)
    }
}

impl ToField for u32 {
    fn to_field(&self, _kind: ColumnKind) -> FieldValue {
        FieldValue::Int(i64::from(*self))
    }
}

impl ToField for f64 {
    fn to_field(&self, kind: ColumnKind) -> FieldValue {
        FieldValue::Decimal {
            value: *self,
            scale: kind.scale().unwrap_or(2),
        }
    }
}

impl ToField for bool {
    fn to_field(&self, _kind: ColumnKind) -> FieldValue {
        FieldValue::Bool(*self)
    }
}

impl ToField for String {
    fn to_field(&self, _kind: ColumnKind) -> FieldValue {
        FieldValue::Text(self.clone())
    }
}

impl ToField for NaiveDate {
    fn to_field(&self, _kind: ColumnKind) -> FieldValue {
        FieldValue::Date(*self)
    }
}

impl ToField for Option<NaiveDate> {
    fn to_field(&self, _kind: ColumnKind) -> FieldValue {
        match self {
            Some(date) => FieldValue::Date(*date),
            None => FieldValue::Null,
        }
    }
}

/// Implement [`ToField`] for label enums exposing `label() -> &'static str`.
#[macro_export]
macro_rules! label_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::value::ToField for $ty {
                fn to_field(&self, _kind: $crate::schema::ColumnKind) -> $crate::value::FieldValue {
                    $crate::value::FieldValue::Text(self.label().to_string())
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_round_on_emission() {
        let value = FieldValue::Decimal {
            value: -12.345_67,
            scale: 1,
        };
        assert_eq!(value.to_csv(), "-12.3");
        assert_eq!(value.as_f64(), Some(-12.3));
    }

    #[test]
    fn negative_zero_is_normalized() {
        let value = FieldValue::Decimal {
            value: -0.04,
            scale: 1,
        };
        assert_eq!(value.to_csv(), "0.0");
    }

    #[test]
    fn null_renders_empty() {
        assert_eq!(FieldValue::Null.to_csv(), "");
        assert_eq!(Option::<NaiveDate>::None.to_field(ColumnKind::NullableDate), FieldValue::Null);
    }
}
