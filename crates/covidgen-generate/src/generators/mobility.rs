use chrono::NaiveDate;
use covidgen_core::params::mobility::{self as params, CHANNELS};
use covidgen_core::records::{MobilityRecord, overall_index};
use covidgen_core::{Band, Region, TableName};

use super::scoped;
use crate::composer::{Dataset, TableBuilder};
use crate::context::GenerationContext;
use crate::errors::{GenerationError, Scope};

const TABLE: TableName = TableName::MobilitasHarian;

pub(super) fn generate(ctx: &mut GenerationContext) -> Result<Dataset, GenerationError> {
    let timeline =
        params::timeline().map_err(|err| GenerationError::scoped(Scope::table(TABLE), err))?;

    let mut builder = TableBuilder::new(TABLE);
    for week in timeline.weekly() {
        let factor_band = timeline
            .resolve(week)
            .map_err(|err| GenerationError::scoped(Scope::point(TABLE, week), err))?
            .factor();
        for region in Region::ALL {
            let channels = sample(ctx, factor_band);
            builder
                .compose(|id| compose(id, region, week, channels))
                .map_err(scoped(TABLE, region, week))?;
        }
    }
    Ok(builder.finish())
}

/// One phase factor per row, then each channel as
/// `factor * multiplier + noise`.
fn sample(ctx: &mut GenerationContext, factor_band: Band) -> [f64; 13] {
    let factor = ctx.uniform(factor_band);
    CHANNELS.map(|channel| {
        let noise = ctx.uniform(Band::new(-channel.jitter, channel.jitter));
        factor * channel.multiplier + noise
    })
}

fn compose(id: u64, region: Region, week: NaiveDate, channels: [f64; 13]) -> MobilityRecord {
    let [
        retail_recreation,
        grocery_pharmacy,
        parks,
        transit_stations,
        workplaces,
        residential,
        private_vehicle_movement,
        public_transport_usage,
        walking_cycling,
        morning_rush_hour,
        afternoon_activity,
        evening_rush_hour,
        night_activity,
    ] = channels;
    MobilityRecord {
        id_mobilitas: id,
        iso_code: region,
        tanggal: week,
        retail_recreation,
        grocery_pharmacy,
        parks,
        transit_stations,
        workplaces,
        residential,
        private_vehicle_movement,
        public_transport_usage,
        walking_cycling,
        morning_rush_hour,
        afternoon_activity,
        evening_rush_hour,
        night_activity,
        overall_mobility_index: overall_index(&channels),
    }
}

#[cfg(test)]
mod tests {
    use covidgen_core::RecordKind;

    use super::*;
    use crate::generators::tests::context;

    #[test]
    fn lockdown_weeks_stay_home() {
        let dataset = generate(&mut context(42)).unwrap();
        let lockdown_end = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let mut seen = 0;
        for record in dataset.records() {
            if let RecordKind::Mobility(week) = record.kind()
                && week.tanggal < lockdown_end
            {
                seen += 1;
                assert!(week.residential >= 7.0 - 1e-9);
                assert!(week.retail_recreation <= -40.0 + 20.0);
            }
        }
        assert_eq!(seen % Region::ALL.len(), 0);
        assert!(seen > 0);
    }
}
