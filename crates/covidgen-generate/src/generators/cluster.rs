use chrono::{Duration, NaiveDate};
use covidgen_core::params::cluster::{
    self as params, CLOSED_STATUS_WEIGHTS, CONTACTS_PER_CASE, ClusterPhase, ClusterSetting,
    ClusterStatus, DISINFECTION_CHANCE, DURATION_DAYS, INDEX_CASES, MALE_SHARE, SEVERITY,
    SUSPECTS_PER_CONTACT, clusters_per_region,
};
use covidgen_core::records::ClusterRecord;
use covidgen_core::{Region, TableName, Timeline};

use super::{Location, scoped, street_number};
use crate::composer::{Dataset, TableBuilder};
use crate::context::{Allotment, GenerationContext};
use crate::errors::{GenerationError, Scope};

const TABLE: TableName = TableName::ClusterPenularan;

pub(super) fn generate(ctx: &mut GenerationContext) -> Result<Dataset, GenerationError> {
    let timeline =
        params::timeline().map_err(|err| GenerationError::scoped(Scope::table(TABLE), err))?;

    let mut builder = TableBuilder::new(TABLE);
    for region in Region::ALL {
        let count = ctx.int_between(clusters_per_region(region.tier()));
        for number in 1..=count {
            let draw = sample(ctx, &timeline).map_err(scoped(TABLE, region, number))?;
            builder
                .compose(|id| compose(id, region, number, draw))
                .map_err(scoped(TABLE, region, number))?;
        }
    }
    Ok(builder.finish())
}

#[derive(Debug, Clone, Copy)]
struct ClusterDraw {
    detected: NaiveDate,
    ended: Option<NaiveDate>,
    setting: ClusterSetting,
    location: Location,
    street_number: i64,
    total: i64,
    close_contacts: i64,
    suspects: i64,
    /// Children, adults, elderly.
    ages: [i64; 3],
    male: i64,
    /// Asymptomatic through deceased.
    severity: [i64; 6],
    tracing_completed: bool,
    disinfected: bool,
    closed_temporarily: bool,
    mass_testing: bool,
    status: ClusterStatus,
}

fn sample(
    ctx: &mut GenerationContext,
    timeline: &Timeline<ClusterPhase>,
) -> covidgen_core::Result<ClusterDraw> {
    let detected = ctx.day_between(timeline.start(), timeline.end());
    let setting = ctx.choose(&timeline.resolve(detected)?.settings())?;
    let duration = ctx.int_between(DURATION_DAYS);
    let closes_on = detected + Duration::days(duration);

    let total = ctx.int_between(setting.group().cases());
    let close_contacts = ctx.fraction_of(total, CONTACTS_PER_CASE);
    let suspects = ctx.fraction_of(close_contacts, SUSPECTS_PER_CONTACT);

    let split = setting.age_split();
    let ages =
        Allotment::new(total).carve_all(ctx, [split.children, split.adults, split.elderly]);
    let male = ctx.fraction_of(total, MALE_SHARE);
    let severity = Allotment::new(total).carve_all(ctx, SEVERITY);

    let tracing_completed = ctx.coin();
    let disinfected = ctx.chance(DISINFECTION_CHANCE);
    let closed_temporarily = setting.may_close() && ctx.coin();
    let mass_testing = ctx.coin();

    let (status, ended) = if closes_on < ctx.as_of() {
        let status = ctx.pick(CLOSED_STATUS_WEIGHTS)?;
        (status, Some(closes_on.min(timeline.end())))
    } else {
        (ClusterStatus::Aktif, None)
    };

    Ok(ClusterDraw {
        detected,
        ended,
        setting,
        location: Location::sample(ctx),
        street_number: street_number(ctx),
        total,
        close_contacts,
        suspects,
        ages,
        male,
        severity,
        tracing_completed,
        disinfected,
        closed_temporarily,
        mass_testing,
        status,
    })
}

fn compose(id: u64, region: Region, number: i64, draw: ClusterDraw) -> ClusterRecord {
    let province = region.name();
    let setting = draw.setting.label();
    let [anak, dewasa, lansia] = draw.ages;
    let [tanpa_gejala, ringan, sedang, berat, kritis, meninggal] = draw.severity;
    ClusterRecord {
        id_cluster: id,
        iso_code: region,
        tanggal_terdeteksi: draw.detected,
        tanggal_selesai: draw.ended,
        nama_cluster: format!("Cluster {setting} {province} {number}"),
        jenis_cluster: draw.setting,
        nama_lokasi: format!("Lokasi {setting} {province}"),
        alamat_lokasi: format!("Jl. {setting} No. {}, {province}", draw.street_number),
        latitude: draw.location.latitude,
        longitude: draw.location.longitude,
        kasus_index: INDEX_CASES,
        total_kasus_terkait: draw.total,
        total_kontak_erat: draw.close_contacts,
        total_suspect: draw.suspects,
        kasus_anak: anak,
        kasus_dewasa: dewasa,
        kasus_lansia: lansia,
        kasus_laki: draw.male,
        kasus_perempuan: draw.total - draw.male,
        kasus_tanpa_gejala: tanpa_gejala,
        kasus_ringan: ringan,
        kasus_sedang: sedang,
        kasus_berat: berat,
        kasus_kritis: kritis,
        kasus_meninggal: meninggal,
        contact_tracing_completed: draw.tracing_completed,
        area_disinfection: draw.disinfected,
        temporary_closure: draw.closed_temporarily,
        mass_testing: draw.mass_testing,
        status_cluster: draw.status,
        catatan: format!(
            "Cluster {setting} terdeteksi di {province} dengan {} kasus terkait",
            draw.total
        ),
    }
}
