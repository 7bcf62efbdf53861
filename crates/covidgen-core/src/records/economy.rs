use chrono::NaiveDate;

use super::checks::{self, Check, ensure};
use super::table_record;
use crate::params::Band;
use crate::params::economy::{
    self as params, CONFIDENCE_BOUNDS, CONFIDENCE_JITTER, GROWTH_JITTER, LABOR_PARTICIPATION,
    PDRB_JITTER, WAGE_JITTER,
};
use crate::region::Region;
use crate::schema::ColumnKind::{Decimal, Id, Int, Text};

table_record! {
    /// Monthly macroeconomic indicators for one province.
    EconomyRecord => EkonomiRegional {
        id_ekonomi: u64 = Id,
        iso_code: Region = Text,
        tahun: i64 = Int,
        bulan: i64 = Int,
        pdrb_milyar: f64 = Decimal(2),
        pertumbuhan_ekonomi: f64 = Decimal(2),
        inflasi_rate: f64 = Decimal(2),
        tingkat_pengangguran: f64 = Decimal(2),
        tingkat_partisipasi_kerja: f64 = Decimal(2),
        upah_minimum_regional: i64 = Int,
        sektor_pertanian: f64 = Decimal(2),
        sektor_industri: f64 = Decimal(2),
        sektor_perdagangan: f64 = Decimal(2),
        sektor_jasa: f64 = Decimal(2),
        sektor_pariwisata: f64 = Decimal(2),
        penurunan_omzet_umkm: f64 = Decimal(2),
        penutupan_usaha: i64 = Int,
        bantuan_sosial_milyar: f64 = Decimal(2),
        recovery_index: f64 = Decimal(2),
        business_confidence: f64 = Decimal(2),
    }
}

impl EconomyRecord {
    pub fn month(&self) -> Option<NaiveDate> {
        let year = i32::try_from(self.tahun).ok()?;
        let month = u32::try_from(self.bulan).ok()?;
        NaiveDate::from_ymd_opt(year, month, 1)
    }

    pub(super) fn validate(&self) -> Check {
        let month = self
            .month()
            .ok_or_else(|| format!("invalid period {}-{}", self.tahun, self.bulan))?;
        checks::within_horizon("tahun/bulan", month, params::HORIZON_START, params::HORIZON_END)?;
        let phase = checks::phase_on(params::timeline(), month)?;
        let region = self.iso_code;

        checks::in_band("pdrb_milyar", self.pdrb_milyar, PDRB_JITTER.scaled(region.pdrb_base()))?;
        checks::in_band(
            "pertumbuhan_ekonomi",
            self.pertumbuhan_ekonomi,
            phase.growth_base().widened(GROWTH_JITTER.hi),
        )?;
        checks::in_band("inflasi_rate", self.inflasi_rate, phase.inflation())?;
        checks::in_band("tingkat_pengangguran", self.tingkat_pengangguran, phase.unemployment())?;
        checks::in_band(
            "tingkat_partisipasi_kerja",
            self.tingkat_partisipasi_kerja,
            LABOR_PARTICIPATION,
        )?;
        let wage = WAGE_JITTER.scaled(region.minimum_wage_base());
        checks::in_range(
            "upah_minimum_regional",
            self.upah_minimum_regional,
            crate::params::IntRange::new(wage.lo.floor() as i64, wage.hi.floor() as i64),
        )?;

        let shares = params::sector_shares(region.is_industrial());
        checks::in_band("sektor_pertanian", self.sektor_pertanian, shares.agriculture)?;
        checks::in_band("sektor_industri", self.sektor_industri, shares.industry)?;
        checks::in_band("sektor_perdagangan", self.sektor_perdagangan, shares.trade)?;
        checks::in_band("sektor_jasa", self.sektor_jasa, shares.services)?;
        checks::in_band("sektor_pariwisata", self.sektor_pariwisata, shares.tourism)?;

        let impact = phase.impact();
        checks::in_band("penurunan_omzet_umkm", self.penurunan_omzet_umkm, impact.umkm_turnover_drop)?;
        checks::in_range("penutupan_usaha", self.penutupan_usaha, impact.business_closures)?;
        checks::in_band("bantuan_sosial_milyar", self.bantuan_sosial_milyar, impact.social_aid)?;

        let recovery = phase.recovery_index();
        checks::in_band("recovery_index", self.recovery_index, recovery)?;
        let confidence = Band::new(
            (self.recovery_index + CONFIDENCE_JITTER.lo).max(CONFIDENCE_BOUNDS.lo),
            (self.recovery_index + CONFIDENCE_JITTER.hi).min(CONFIDENCE_BOUNDS.hi),
        );
        ensure(confidence.contains(self.business_confidence), || {
            format!(
                "business_confidence={} is not recovery_index {} +/- 10 within 0..=100",
                self.business_confidence, self.recovery_index
            )
        })
    }
}
