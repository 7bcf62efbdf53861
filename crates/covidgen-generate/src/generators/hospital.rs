use covidgen_core::params::ONE_IN_THREE;
use covidgen_core::params::hospital::{
    DOCTORS_PER_BED, EMERGENCY_FRACTION, HospitalClass, MIN_DOCTORS, MIN_NURSES, MIN_SPECIALISTS,
    MIN_VENTILATORS, NAME_PREFIXES, NURSES_PER_BED, OPERATIONAL_WEIGHTS, OXYGEN_PER_BED,
    OperationalStatus, Ownership, OWNERSHIP_WEIGHTS, SPECIALISTS_PER_DOCTOR,
    VENTILATORS_PER_ICU_BED, facilities_per_region,
};
use covidgen_core::records::HospitalRecord;
use covidgen_core::{Region, TableName};

use super::{Location, scoped, street_number};
use crate::composer::{Dataset, TableBuilder};
use crate::context::GenerationContext;
use crate::errors::GenerationError;

const TABLE: TableName = TableName::RumahSakit;

pub(super) fn generate(ctx: &mut GenerationContext) -> Result<Dataset, GenerationError> {
    let mut builder = TableBuilder::new(TABLE);
    for region in Region::ALL {
        let count = ctx.int_between(facilities_per_region(region.tier()));
        for number in 1..=count {
            let draw = sample(ctx).map_err(scoped(TABLE, region, number))?;
            builder
                .compose(|id| compose(id, region, number, draw))
                .map_err(scoped(TABLE, region, number))?;
        }
    }
    Ok(builder.finish())
}

#[derive(Debug, Clone)]
struct HospitalDraw {
    prefix: &'static str,
    ownership: Ownership,
    class: HospitalClass,
    total_bed: i64,
    icu_bed: i64,
    isolation_bed: i64,
    emergency_bed: i64,
    ventilators: i64,
    oxygen_capacity: i64,
    ct_scan: bool,
    pcr_lab: bool,
    doctors: i64,
    nurses: i64,
    specialists: i64,
    location: Location,
    street_number: i64,
    covid_referral: bool,
    status: OperationalStatus,
}

fn sample(ctx: &mut GenerationContext) -> covidgen_core::Result<HospitalDraw> {
    let ownership = ctx.pick(OWNERSHIP_WEIGHTS)?;
    let class = ctx.pick(ownership.class_weights())?;
    let profile = class.profile();

    let total_bed = ctx.int_between(profile.total_bed);
    let icu_bed = ctx.fraction_of(total_bed, profile.icu_fraction);
    let isolation_bed = ctx.fraction_of(total_bed, profile.isolation_fraction);
    let emergency_bed = ctx.fraction_of(total_bed, EMERGENCY_FRACTION);
    let ventilators = ctx
        .fraction_of(icu_bed, VENTILATORS_PER_ICU_BED)
        .max(MIN_VENTILATORS);
    let oxygen_capacity = total_bed * ctx.int_between(OXYGEN_PER_BED);

    let referral_class = class.is_referral();
    let ct_scan = referral_class && ctx.coin();
    let pcr_lab = if referral_class {
        ctx.coin()
    } else {
        ctx.chance(ONE_IN_THREE)
    };

    let doctors = ctx.fraction_of(total_bed, DOCTORS_PER_BED).max(MIN_DOCTORS);
    let nurses = ctx.fraction_of(total_bed, NURSES_PER_BED).max(MIN_NURSES);
    let specialists = ctx
        .fraction_of(doctors, SPECIALISTS_PER_DOCTOR)
        .max(MIN_SPECIALISTS);

    Ok(HospitalDraw {
        prefix: ctx.choose(&NAME_PREFIXES)?,
        ownership,
        class,
        total_bed,
        icu_bed,
        isolation_bed,
        emergency_bed,
        ventilators,
        oxygen_capacity,
        ct_scan,
        pcr_lab,
        doctors,
        nurses,
        specialists,
        location: Location::sample(ctx),
        street_number: street_number(ctx),
        covid_referral: ctx.coin(),
        status: ctx.pick(OPERATIONAL_WEIGHTS)?,
    })
}

fn compose(id: u64, region: Region, number: i64, draw: HospitalDraw) -> HospitalRecord {
    let province = region.name();
    HospitalRecord {
        id_rumah_sakit: id,
        iso_code: region,
        nama_rumah_sakit: format!("RS {} {province} {number}", draw.prefix),
        tipe_rumah_sakit: draw.ownership,
        kelas_rumah_sakit: draw.class,
        total_bed: draw.total_bed,
        icu_bed: draw.icu_bed,
        isolation_bed: draw.isolation_bed,
        emergency_bed: draw.emergency_bed,
        ventilator_count: draw.ventilators,
        oxygen_capacity: draw.oxygen_capacity,
        ct_scan_available: draw.ct_scan,
        pcr_lab_available: draw.pcr_lab,
        doctor_count: draw.doctors,
        nurse_count: draw.nurses,
        specialist_count: draw.specialists,
        latitude: draw.location.latitude,
        longitude: draw.location.longitude,
        alamat: format!("Jl. Kesehatan No. {}, {province}", draw.street_number),
        covid_referral: draw.covid_referral,
        operational_status: draw.status,
    }
}
