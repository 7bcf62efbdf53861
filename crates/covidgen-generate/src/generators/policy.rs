use chrono::{Duration, NaiveDate};
use covidgen_core::params::policy::{
    COMPLIANCE_RATE, Coverage, DURATION_DAYS, HORIZON_END, IMPACT_PER_LEVEL, POLICY_EVENTS,
    PolicyEvent, PolicyKind, PolicyStatus, SectorRule,
};
use covidgen_core::records::PolicyRecord;
use covidgen_core::timeline::date;
use covidgen_core::{Region, TableName};

use super::scoped;
use crate::composer::{Dataset, TableBuilder};
use crate::context::GenerationContext;
use crate::errors::{GenerationError, Scope};

const TABLE: TableName = TableName::KebijakanPemerintah;

pub(super) fn generate(ctx: &mut GenerationContext) -> Result<Dataset, GenerationError> {
    let horizon_end =
        date(HORIZON_END).map_err(|err| GenerationError::scoped(Scope::table(TABLE), err))?;

    let mut builder = TableBuilder::new(TABLE);
    for event in POLICY_EVENTS {
        let start = date(event.start)
            .map_err(|err| GenerationError::scoped(Scope::point(TABLE, event.kind.label()), err))?;
        for region in covered_regions(ctx, event.kind) {
            let draw = sample(ctx, event, start, horizon_end);
            builder
                .compose(|id| compose(id, region, event, start, draw))
                .map_err(scoped(TABLE, region, start))?;
        }
    }
    Ok(builder.finish())
}

fn covered_regions(ctx: &mut GenerationContext, kind: PolicyKind) -> Vec<Region> {
    match kind.coverage() {
        Coverage::National => Region::ALL.to_vec(),
        Coverage::Listed(regions) => regions.to_vec(),
        Coverage::Sampled(range) => {
            let amount = usize::try_from(ctx.int_between(range)).unwrap_or(0);
            ctx.sample_distinct(&Region::ALL, amount)
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PolicyDraw {
    end: NaiveDate,
    sectors: [bool; 5],
    compliance_rate: f64,
    economic_impact: f64,
    status: PolicyStatus,
}

fn sample(
    ctx: &mut GenerationContext,
    event: PolicyEvent,
    start: NaiveDate,
    horizon_end: NaiveDate,
) -> PolicyDraw {
    let duration = ctx.int_between(DURATION_DAYS);
    let end = (start + Duration::days(duration)).min(horizon_end);
    let sectors = event.kind.sectors().map(|rule| match rule {
        SectorRule::Fixed(value) => value,
        SectorRule::Coin => ctx.coin(),
    });
    let compliance_rate = ctx.uniform(COMPLIANCE_RATE);
    let economic_impact = f64::from(event.stringency) * ctx.uniform(IMPACT_PER_LEVEL);
    let status = if end < ctx.as_of() {
        PolicyStatus::Berakhir
    } else {
        PolicyStatus::Aktif
    };

    PolicyDraw {
        end,
        sectors,
        compliance_rate,
        economic_impact,
        status,
    }
}

fn compose(
    id: u64,
    region: Region,
    event: PolicyEvent,
    start: NaiveDate,
    draw: PolicyDraw,
) -> PolicyRecord {
    let province = region.name();
    let kind = event.kind.label();
    let [pendidikan, ekonomi, transportasi, pariwisata, ibadah] = draw.sectors;
    PolicyRecord {
        id_kebijakan: id,
        iso_code: region,
        tanggal_mulai: start,
        tanggal_selesai: draw.end,
        jenis_kebijakan: event.kind,
        nama_kebijakan: format!("{kind} {province}"),
        deskripsi_kebijakan: format!(
            "Implementasi {kind} di {province} untuk mengendalikan penyebaran COVID-19"
        ),
        tingkat_keketatan: event.stringency,
        sektor_pendidikan: pendidikan,
        sektor_ekonomi: ekonomi,
        sektor_transportasi: transportasi,
        sektor_pariwisata: pariwisata,
        sektor_ibadah: ibadah,
        compliance_rate: draw.compliance_rate,
        dampak_ekonomi_pct: draw.economic_impact,
        status_kebijakan: draw.status,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use covidgen_core::RecordKind;

    use super::*;
    use crate::generators::tests::context;

    fn policies(ctx: &mut GenerationContext) -> Vec<PolicyRecord> {
        generate(ctx)
            .unwrap()
            .records()
            .iter()
            .filter_map(|record| match record.kind() {
                RecordKind::Policy(policy) => Some(policy.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn national_policies_cover_every_region() {
        let policies = policies(&mut context(42));
        let wfh: HashSet<Region> = policies
            .iter()
            .filter(|policy| policy.jenis_kebijakan == PolicyKind::WorkFromHome)
            .map(|policy| policy.iso_code)
            .collect();
        assert_eq!(wfh.len(), Region::ALL.len());

        let psbb: HashSet<Region> = policies
            .iter()
            .filter(|policy| policy.jenis_kebijakan == PolicyKind::Psbb)
            .map(|policy| policy.iso_code)
            .collect();
        assert_eq!(psbb.len(), 3);
    }

    #[test]
    fn sampled_policies_pick_distinct_regions() {
        let policies = policies(&mut context(7));
        let october = NaiveDate::from_ymd_opt(2021, 10, 1).unwrap();
        let regions: Vec<Region> = policies
            .iter()
            .filter(|policy| policy.tanggal_mulai == october)
            .map(|policy| policy.iso_code)
            .collect();
        let distinct: HashSet<&Region> = regions.iter().collect();
        assert!((5..=15).contains(&regions.len()));
        assert_eq!(distinct.len(), regions.len());
    }

    #[test]
    fn status_follows_the_as_of_date() {
        let early = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let mut ctx = GenerationContext::new(42, early);
        assert!(
            policies(&mut ctx)
                .iter()
                .all(|policy| policy.status_kebijakan == PolicyStatus::Aktif)
        );
        assert!(
            policies(&mut context(42))
                .iter()
                .all(|policy| policy.status_kebijakan == PolicyStatus::Berakhir)
        );
    }
}
