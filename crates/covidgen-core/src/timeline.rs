use std::fmt;

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::error::{Error, Result};

/// Calendar date as `(year, month, day)`, resolved at runtime.
pub type Ymd = (i32, u32, u32);

pub fn date(ymd: Ymd) -> Result<NaiveDate> {
    let (year, month, day) = ymd;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::configuration(format!("invalid date {year}-{month}-{day}")))
}

/// Ordered, non-overlapping phases over a table horizon.
///
/// Each phase applies from its start date until the next phase starts; the
/// last phase runs through the inclusive horizon end.
#[derive(Debug, Clone)]
pub struct Timeline<P> {
    name: &'static str,
    start: NaiveDate,
    end: NaiveDate,
    phases: Vec<(NaiveDate, P)>,
}

impl<P: Copy + fmt::Debug> Timeline<P> {
    pub fn new(name: &'static str, start: Ymd, end: Ymd, phases: &[(Ymd, P)]) -> Result<Self> {
        let start = date(start)?;
        let end = date(end)?;
        if start > end {
            return Err(Error::configuration(format!(
                "timeline '{name}': horizon start {start} is after end {end}"
            )));
        }

        let mut resolved = Vec::with_capacity(phases.len());
        for (ymd, phase) in phases {
            let phase_start = date(*ymd)?;
            if let Some((previous, _)) = resolved.last()
                && *previous >= phase_start
            {
                return Err(Error::configuration(format!(
                    "timeline '{name}': phase {phase:?} does not start after the previous phase"
                )));
            }
            resolved.push((phase_start, *phase));
        }

        match resolved.first() {
            Some((first, _)) if *first <= start => {}
            _ => {
                return Err(Error::configuration(format!(
                    "timeline '{name}': phases do not cover horizon start {start}"
                )));
            }
        }

        Ok(Self {
            name,
            start,
            end,
            phases: resolved,
        })
    }

    /// Resolve the phase in force on `date`.
    pub fn resolve(&self, date: NaiveDate) -> Result<P> {
        if !self.contains(date) {
            return Err(Error::configuration(format!(
                "timeline '{}': {date} is outside horizon {}..={}",
                self.name, self.start, self.end
            )));
        }
        self.phases
            .iter()
            .rev()
            .find(|(start, _)| *start <= date)
            .map(|(_, phase)| *phase)
            .ok_or_else(|| {
                Error::configuration(format!("timeline '{}': no phase for {date}", self.name))
            })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn phases(&self) -> &[(NaiveDate, P)] {
        &self.phases
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days between horizon start and end.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Horizon start plus every seventh day up to the end.
    pub fn weekly(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        std::iter::successors(Some(self.start), |date| date.checked_add_signed(Duration::days(7)))
            .take_while(|date| *date <= self.end)
    }

    /// First day of every month whose first day lies inside the horizon.
    pub fn monthly(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let first = if self.start.day() == 1 {
            Some(self.start)
        } else {
            self.start
                .with_day(1)
                .and_then(|date| date.checked_add_months(Months::new(1)))
        };
        std::iter::successors(first, |date| date.checked_add_months(Months::new(1)))
            .take_while(|date| *date <= self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        Early,
        Late,
    }

    fn timeline() -> Timeline<Phase> {
        Timeline::new(
            "test",
            (2021, 3, 1),
            (2021, 5, 31),
            &[((2021, 3, 1), Phase::Early), ((2021, 4, 15), Phase::Late)],
        )
        .unwrap()
    }

    #[test]
    fn resolves_phase_boundaries() {
        let timeline = timeline();
        let boundary = NaiveDate::from_ymd_opt(2021, 4, 15).unwrap();
        assert_eq!(timeline.resolve(boundary - Duration::days(1)).unwrap(), Phase::Early);
        assert_eq!(timeline.resolve(boundary).unwrap(), Phase::Late);
        assert_eq!(timeline.resolve(timeline.end()).unwrap(), Phase::Late);
    }

    #[test]
    fn rejects_dates_outside_horizon() {
        let timeline = timeline();
        let before = NaiveDate::from_ymd_opt(2021, 2, 28).unwrap();
        assert!(timeline.resolve(before).unwrap_err().is_configuration());
    }

    #[test]
    fn rejects_unordered_phases() {
        let result = Timeline::new(
            "broken",
            (2021, 3, 1),
            (2021, 5, 31),
            &[((2021, 4, 1), Phase::Early), ((2021, 3, 1), Phase::Late)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn weekly_steps_stay_inside_horizon() {
        let timeline = timeline();
        let dates: Vec<NaiveDate> = timeline.weekly().collect();
        assert_eq!(dates.first().copied(), Some(timeline.start()));
        assert!(dates.iter().all(|date| timeline.contains(*date)));
        assert_eq!(dates.len(), 14);
    }

    #[test]
    fn monthly_steps_start_on_first_day() {
        let timeline: Timeline<Phase> =
            Timeline::new("months", (2020, 1, 1), (2020, 12, 31), &[((2020, 1, 1), Phase::Early)])
                .unwrap();
        let months: Vec<NaiveDate> = timeline.monthly().collect();
        assert_eq!(months.len(), 12);
        assert!(months.iter().all(|date| date.day() == 1));
    }
}
