use chrono::NaiveDate;

use super::checks::{self, Check, ensure};
use super::table_record;
use crate::params::mobility::{self as params, CHANNELS, RETAIL, TRANSIT, WORKPLACES};
use crate::region::Region;
use crate::schema::ColumnKind::{Date, Decimal, Id, Text};

table_record! {
    /// Weekly change in movement from the pre-pandemic baseline, percent.
    MobilityRecord => MobilitasHarian {
        id_mobilitas: u64 = Id,
        iso_code: Region = Text,
        tanggal: NaiveDate = Date,
        retail_recreation: f64 = Decimal(1),
        grocery_pharmacy: f64 = Decimal(1),
        parks: f64 = Decimal(1),
        transit_stations: f64 = Decimal(1),
        workplaces: f64 = Decimal(1),
        residential: f64 = Decimal(1),
        private_vehicle_movement: f64 = Decimal(1),
        public_transport_usage: f64 = Decimal(1),
        walking_cycling: f64 = Decimal(1),
        morning_rush_hour: f64 = Decimal(1),
        afternoon_activity: f64 = Decimal(1),
        evening_rush_hour: f64 = Decimal(1),
        night_activity: f64 = Decimal(1),
        overall_mobility_index: f64 = Decimal(1),
    }
}

/// Overall index: mean of retail, transit and workplace channels.
pub fn overall_index(channels: &[f64; 13]) -> f64 {
    (channels[RETAIL] + channels[TRANSIT] + channels[WORKPLACES]) / 3.0
}

impl MobilityRecord {
    /// Channel values in column order.
    pub fn channels(&self) -> [f64; 13] {
        [
            self.retail_recreation,
            self.grocery_pharmacy,
            self.parks,
            self.transit_stations,
            self.workplaces,
            self.residential,
            self.private_vehicle_movement,
            self.public_transport_usage,
            self.walking_cycling,
            self.morning_rush_hour,
            self.afternoon_activity,
            self.evening_rush_hour,
            self.night_activity,
        ]
    }

    pub(super) fn validate(&self) -> Check {
        checks::within_horizon("tanggal", self.tanggal, params::HORIZON_START, params::HORIZON_END)?;
        let factor = checks::phase_on(params::timeline(), self.tanggal)?.factor();
        let channels = self.channels();
        for ((value, channel), column) in channels.iter().zip(CHANNELS).zip(&Self::COLUMNS[3..]) {
            checks::in_band(column.name, *value, channel.bounds(factor))?;
        }
        let expected = overall_index(&channels);
        ensure(self.overall_mobility_index == expected, || {
            format!(
                "overall_mobility_index={} is not the mean {expected} of retail, transit and workplaces",
                self.overall_mobility_index
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;

    fn lockdown_week() -> MobilityRecord {
        let mut record = MobilityRecord {
            id_mobilitas: 1,
            iso_code: Region::DkiJakarta,
            tanggal: NaiveDate::from_ymd_opt(2020, 4, 5).unwrap(),
            retail_recreation: -65.0,
            grocery_pharmacy: -30.0,
            parks: -70.0,
            transit_stations: -72.0,
            workplaces: -50.0,
            residential: 18.0,
            private_vehicle_movement: -40.0,
            public_transport_usage: -90.0,
            walking_cycling: -30.0,
            morning_rush_hour: -55.0,
            afternoon_activity: -48.0,
            evening_rush_hour: -50.0,
            night_activity: -75.0,
            overall_mobility_index: 0.0,
        };
        record.overall_mobility_index = overall_index(&record.channels());
        record
    }

    #[test]
    fn accepts_lockdown_week() {
        let record = Record::new(lockdown_week()).unwrap();
        assert_eq!(record.values()[16].to_csv(), "-62.3");
    }

    #[test]
    fn residential_cannot_drop_during_lockdown() {
        let mut record = lockdown_week();
        record.residential = -10.0;
        let err = Record::new(record).unwrap_err();
        assert!(err.to_string().contains("residential"));
    }

    #[test]
    fn overall_index_must_match_channels() {
        let mut record = lockdown_week();
        record.overall_mobility_index = -10.0;
        assert!(Record::new(record).is_err());
    }
}
