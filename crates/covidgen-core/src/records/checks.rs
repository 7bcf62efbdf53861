//! Small predicates shared by the per-table validators. Each returns the
//! first violated rule as a human-readable detail string.

use chrono::NaiveDate;

use crate::params::{Band, GEO_BOUNDS, IntRange};
use crate::timeline::{Timeline, Ymd, date};

pub(crate) type Check = std::result::Result<(), String>;

pub(crate) fn ensure(condition: bool, detail: impl FnOnce() -> String) -> Check {
    if condition { Ok(()) } else { Err(detail()) }
}

pub(crate) fn in_range(field: &str, value: i64, range: IntRange) -> Check {
    ensure(range.contains(value), || {
        format!("{field}={value} outside {}..={}", range.min, range.max)
    })
}

pub(crate) fn in_band(field: &str, value: f64, band: Band) -> Check {
    ensure(band.contains(value), || {
        format!("{field}={value} outside {}..={}", band.lo, band.hi)
    })
}

/// `value` must be a floor of `whole * f` for some `f` in the band.
pub(crate) fn fraction_of(field: &str, value: i64, whole: i64, band: Band) -> Check {
    let (lo, hi) = band.floor_bounds(whole);
    ensure(lo <= value && value <= hi, || {
        format!("{field}={value} outside {lo}..={hi} of {whole}")
    })
}

/// Carved parts: each a floor of `whole * f` with `f` in its band, and
/// together no larger than the whole.
pub(crate) fn carved(whole: i64, parts: &[(&str, i64, Band)]) -> Check {
    let mut sum = 0;
    for (field, value, band) in parts {
        fraction_of(field, *value, whole, *band)?;
        sum += value;
    }
    ensure(sum <= whole, || {
        let names: Vec<&str> = parts.iter().map(|(field, _, _)| *field).collect();
        format!("{} sum to {sum}, more than {whole}", names.join("+"))
    })
}

pub(crate) fn coordinates(latitude: f64, longitude: f64) -> Check {
    ensure(GEO_BOUNDS.contains(latitude, longitude), || {
        format!("coordinates ({latitude}, {longitude}) outside the dataset bounding box")
    })
}

pub(crate) fn within_horizon(field: &str, value: NaiveDate, start: Ymd, end: Ymd) -> Check {
    let start = date(start).map_err(|err| err.to_string())?;
    let end = date(end).map_err(|err| err.to_string())?;
    ensure(start <= value && value <= end, || {
        format!("{field}={value} outside {start}..={end}")
    })
}

/// Phase in force on `value`, with lookup failures reported as violations.
pub(crate) fn phase_on<P: Copy + std::fmt::Debug>(
    timeline: crate::error::Result<Timeline<P>>,
    value: NaiveDate,
) -> std::result::Result<P, String> {
    timeline
        .and_then(|timeline| timeline.resolve(value))
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carved_parts_stay_in_band_and_within_the_whole() {
        let parts = [
            ("a", 6, Band::new(0.4, 0.6)),
            ("b", 3, Band::new(0.3, 0.5)),
        ];
        assert!(carved(10, &parts).is_ok());

        let short = [
            ("a", 6, Band::new(0.4, 0.6)),
            ("b", 2, Band::new(0.3, 0.5)),
        ];
        assert_eq!(carved(10, &short).unwrap_err(), "b=2 outside 3..=5 of 10");

        let over = [
            ("a", 6, Band::new(0.4, 0.6)),
            ("b", 5, Band::new(0.3, 0.5)),
        ];
        assert!(carved(10, &over).unwrap_err().contains("a+b"));
    }

    #[test]
    fn fraction_uses_floor_bounds() {
        assert!(fraction_of("icu_bed", 1, 50, Band::new(0.01, 0.03)).is_ok());
        assert!(fraction_of("icu_bed", 2, 50, Band::new(0.01, 0.03)).is_err());
    }
}
