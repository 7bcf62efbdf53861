use chrono::{Datelike, NaiveDate};
use covidgen_core::params::economy::{
    self as params, CONFIDENCE_BOUNDS, CONFIDENCE_JITTER, EconomicPhase, GROWTH_JITTER,
    LABOR_PARTICIPATION, PDRB_JITTER, WAGE_JITTER,
};
use covidgen_core::records::EconomyRecord;
use covidgen_core::{Region, TableName};

use super::scoped;
use crate::composer::{Dataset, TableBuilder};
use crate::context::GenerationContext;
use crate::errors::{GenerationError, Scope};

const TABLE: TableName = TableName::EkonomiRegional;

pub(super) fn generate(ctx: &mut GenerationContext) -> Result<Dataset, GenerationError> {
    let timeline =
        params::timeline().map_err(|err| GenerationError::scoped(Scope::table(TABLE), err))?;

    let mut builder = TableBuilder::new(TABLE);
    for month in timeline.monthly() {
        let phase = timeline
            .resolve(month)
            .map_err(|err| GenerationError::scoped(Scope::point(TABLE, month), err))?;
        for region in Region::ALL {
            let draw = sample(ctx, region, phase);
            builder
                .compose(|id| compose(id, region, month, draw))
                .map_err(scoped(TABLE, region, month))?;
        }
    }
    Ok(builder.finish())
}

#[derive(Debug, Clone, Copy)]
struct EconomyDraw {
    pdrb: f64,
    growth: f64,
    inflation: f64,
    unemployment: f64,
    participation: f64,
    minimum_wage: i64,
    sectors: [f64; 5],
    umkm_turnover_drop: f64,
    business_closures: i64,
    social_aid: f64,
    recovery_index: f64,
    business_confidence: f64,
}

fn sample(ctx: &mut GenerationContext, region: Region, phase: EconomicPhase) -> EconomyDraw {
    let pdrb = region.pdrb_base() * ctx.uniform(PDRB_JITTER);
    let growth = ctx.uniform(phase.growth_base()) + ctx.uniform(GROWTH_JITTER);
    let inflation = ctx.uniform(phase.inflation());
    let unemployment = ctx.uniform(phase.unemployment());
    let participation = ctx.uniform(LABOR_PARTICIPATION);
    let minimum_wage = (region.minimum_wage_base() * ctx.uniform(WAGE_JITTER)).floor() as i64;

    let shares = params::sector_shares(region.is_industrial());
    let sectors = [
        shares.agriculture,
        shares.industry,
        shares.trade,
        shares.services,
        shares.tourism,
    ]
    .map(|band| ctx.uniform(band));

    let impact = phase.impact();
    let umkm_turnover_drop = ctx.uniform(impact.umkm_turnover_drop);
    let business_closures = ctx.int_between(impact.business_closures);
    let social_aid = ctx.uniform(impact.social_aid);

    let recovery_index = ctx.uniform(phase.recovery_index());
    let business_confidence = (recovery_index + ctx.uniform(CONFIDENCE_JITTER))
        .clamp(CONFIDENCE_BOUNDS.lo, CONFIDENCE_BOUNDS.hi);

    EconomyDraw {
        pdrb,
        growth,
        inflation,
        unemployment,
        participation,
        minimum_wage,
        sectors,
        umkm_turnover_drop,
        business_closures,
        social_aid,
        recovery_index,
        business_confidence,
    }
}

fn compose(id: u64, region: Region, month: NaiveDate, draw: EconomyDraw) -> EconomyRecord {
    let [pertanian, industri, perdagangan, jasa, pariwisata] = draw.sectors;
    EconomyRecord {
        id_ekonomi: id,
        iso_code: region,
        tahun: i64::from(month.year()),
        bulan: i64::from(month.month()),
        pdrb_milyar: draw.pdrb,
        pertumbuhan_ekonomi: draw.growth,
        inflasi_rate: draw.inflation,
        tingkat_pengangguran: draw.unemployment,
        tingkat_partisipasi_kerja: draw.participation,
        upah_minimum_regional: draw.minimum_wage,
        sektor_pertanian: pertanian,
        sektor_industri: industri,
        sektor_perdagangan: perdagangan,
        sektor_jasa: jasa,
        sektor_pariwisata: pariwisata,
        penurunan_omzet_umkm: draw.umkm_turnover_drop,
        penutupan_usaha: draw.business_closures,
        bantuan_sosial_milyar: draw.social_aid,
        recovery_index: draw.recovery_index,
        business_confidence: draw.business_confidence,
    }
}
