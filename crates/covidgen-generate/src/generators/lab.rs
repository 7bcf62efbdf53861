use covidgen_core::params::lab::{
    ANALYSTS, ANTIGEN_TURNAROUND, EXTRACTION_KIT_STOCK, LAB_TYPE_WEIGHTS, LabOwnership, LabType,
    OWNERSHIP_WEIGHTS, REAGENT_STOCK, TECHNICIANS, labs_per_region,
};
use covidgen_core::records::LabRecord;
use covidgen_core::{Region, TableName};

use super::{Location, scoped, street_number};
use crate::composer::{Dataset, TableBuilder};
use crate::context::GenerationContext;
use crate::errors::GenerationError;

const TABLE: TableName = TableName::TestingLabs;

pub(super) fn generate(ctx: &mut GenerationContext) -> Result<Dataset, GenerationError> {
    let mut builder = TableBuilder::new(TABLE);
    for region in Region::ALL {
        let count = ctx.int_between(labs_per_region(region.tier()));
        for number in 1..=count {
            let draw = sample(ctx).map_err(scoped(TABLE, region, number))?;
            builder
                .compose(|id| compose(id, region, number, draw))
                .map_err(scoped(TABLE, region, number))?;
        }
    }
    Ok(builder.finish())
}

#[derive(Debug, Clone, Copy)]
struct LabDraw {
    lab_type: LabType,
    ownership: LabOwnership,
    pcr_capacity: i64,
    antigen_capacity: i64,
    antibody_capacity: i64,
    pcr_machines: i64,
    pcr_turnaround: i64,
    extraction_kits: i64,
    reagents: i64,
    analysts: i64,
    technicians: i64,
    antigen_turnaround: i64,
    accredited: bool,
    iso_certified: bool,
    location: Location,
    street_number: i64,
    open_24_hours: bool,
    drive_thru: bool,
}

fn sample(ctx: &mut GenerationContext) -> covidgen_core::Result<LabDraw> {
    let lab_type = ctx.pick(LAB_TYPE_WEIGHTS)?;
    let ownership = ctx.pick(OWNERSHIP_WEIGHTS)?;
    let capacity = lab_type.capacity();

    Ok(LabDraw {
        lab_type,
        ownership,
        pcr_capacity: ctx.int_between(capacity.pcr),
        antigen_capacity: ctx.int_between(capacity.antigen),
        antibody_capacity: ctx.int_between(capacity.antibody),
        pcr_machines: ctx.int_between(capacity.pcr_machines),
        pcr_turnaround: ctx.int_between(capacity.pcr_turnaround),
        extraction_kits: ctx.int_between(EXTRACTION_KIT_STOCK),
        reagents: ctx.int_between(REAGENT_STOCK),
        analysts: ctx.int_between(ANALYSTS),
        technicians: ctx.int_between(TECHNICIANS),
        antigen_turnaround: ctx.int_between(ANTIGEN_TURNAROUND),
        accredited: ctx.coin(),
        iso_certified: ctx.chance(ownership.iso_chance()),
        location: Location::sample(ctx),
        street_number: street_number(ctx),
        open_24_hours: ownership.may_run_24_hours() && ctx.coin(),
        drive_thru: ctx.coin(),
    })
}

fn compose(id: u64, region: Region, number: i64, draw: LabDraw) -> LabRecord {
    let province = region.name();
    LabRecord {
        id_lab: id,
        iso_code: region,
        nama_lab: format!("Lab {} {province} {number}", draw.lab_type.label()),
        jenis_lab: draw.lab_type,
        tipe_kepemilikan: draw.ownership,
        kapasitas_harian_pcr: draw.pcr_capacity,
        kapasitas_harian_antigen: draw.antigen_capacity,
        kapasitas_harian_antibodi: draw.antibody_capacity,
        mesin_pcr_count: draw.pcr_machines,
        extraction_kit_stock: draw.extraction_kits,
        reagent_stock: draw.reagents,
        analis_count: draw.analysts,
        teknisi_count: draw.technicians,
        turnaround_time_pcr: draw.pcr_turnaround,
        turnaround_time_antigen: draw.antigen_turnaround,
        akreditasi_kemenkes: draw.accredited,
        iso_certified: draw.iso_certified,
        latitude: draw.location.latitude,
        longitude: draw.location.longitude,
        alamat: format!("Jl. Laboratorium No. {}, {province}", draw.street_number),
        operational_24_hours: draw.open_24_hours,
        drive_thru_available: draw.drive_thru,
    }
}

#[cfg(test)]
mod tests {
    use covidgen_core::RecordKind;

    use super::*;
    use crate::generators::tests::context;

    #[test]
    fn antigen_and_antibody_labs_run_no_pcr() {
        let dataset = generate(&mut context(11)).unwrap();
        for record in dataset.records() {
            let RecordKind::Lab(lab) = record.kind() else {
                panic!("unexpected record in {}", TABLE);
            };
            if matches!(lab.jenis_lab, LabType::Antigen | LabType::Antibodi) {
                assert_eq!(lab.kapasitas_harian_pcr, 0);
                assert_eq!(lab.mesin_pcr_count, 0);
                assert_eq!(lab.turnaround_time_pcr, 24);
            }
            if matches!(lab.tipe_kepemilikan, LabOwnership::Universitas | LabOwnership::TniPolri) {
                assert!(!lab.operational_24_hours);
            }
        }
    }
}
