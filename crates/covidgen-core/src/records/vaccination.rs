use chrono::NaiveDate;

use super::checks::{self, Check, ensure};
use super::table_record;
use crate::params::vaccination::{
    self as params, ADULT_SHARE, DAILY_TARGET, DRIVE_THRU_SHARE, ELDERLY_SHARE,
    HEALTH_WORKER_SHARE, HOSPITAL_SHARE, KIPI_MILD_SHARE, KIPI_MODERATE_SHARE,
    KIPI_SEVERE_SHARE, MASS_SITE_SHARE, NOVAVAX_SHARE, PUBLIC_SERVANT_SHARE, PUSKESMAS_SHARE,
    TEACHER_SHARE, TEEN_SHARE,
};
use crate::region::Region;
use crate::schema::ColumnKind::{Date, Id, Int, Text};

table_record! {
    /// Weekly vaccination rollup for one province.
    VaccinationRecord => VaksinasiDetail {
        id_vaksinasi: u64 = Id,
        iso_code: Region = Text,
        tanggal: NaiveDate = Date,
        vaksin_sinovac: i64 = Int,
        vaksin_astrazeneca: i64 = Int,
        vaksin_pfizer: i64 = Int,
        vaksin_moderna: i64 = Int,
        vaksin_novavax: i64 = Int,
        vaksin_lainnya: i64 = Int,
        dosis_1: i64 = Int,
        dosis_2: i64 = Int,
        dosis_booster: i64 = Int,
        lansia_vaksin: i64 = Int,
        dewasa_vaksin: i64 = Int,
        remaja_vaksin: i64 = Int,
        anak_vaksin: i64 = Int,
        nakes_vaksin: i64 = Int,
        guru_vaksin: i64 = Int,
        petugas_publik_vaksin: i64 = Int,
        puskesmas_vaksin: i64 = Int,
        rumah_sakit_vaksin: i64 = Int,
        sentra_vaksin: i64 = Int,
        drive_thru_vaksin: i64 = Int,
        kipi_ringan: i64 = Int,
        kipi_sedang: i64 = Int,
        kipi_berat: i64 = Int,
    }
}

/// Split of the unnamed-brand remainder into (novavax, other).
pub fn split_remainder(remainder: i64) -> (i64, i64) {
    let novavax = (remainder as f64 * NOVAVAX_SHARE).floor() as i64;
    (novavax, remainder - novavax)
}

impl VaccinationRecord {
    /// Everyone vaccinated in the record, which is the daily target.
    pub fn total_vaccinated(&self) -> i64 {
        self.vaksin_sinovac
            + self.vaksin_astrazeneca
            + self.vaksin_pfizer
            + self.vaksin_moderna
            + self.vaksin_novavax
            + self.vaksin_lainnya
    }

    pub(super) fn validate(&self) -> Check {
        checks::within_horizon("tanggal", self.tanggal, params::HORIZON_START, params::HORIZON_END)?;
        let brands = checks::phase_on(params::brand_timeline(), self.tanggal)?.mix();
        let doses = checks::phase_on(params::dose_timeline(), self.tanggal)?.mix();
        let children = checks::phase_on(params::child_timeline(), self.tanggal)?.share();

        let total = self.total_vaccinated();
        let population = i64::from(self.iso_code.population_millions()) * 1_000_000;
        checks::fraction_of("daily target", total, population, DAILY_TARGET)?;

        checks::carved(
            total,
            &[
                ("vaksin_sinovac", self.vaksin_sinovac, brands.sinovac),
                ("vaksin_astrazeneca", self.vaksin_astrazeneca, brands.astrazeneca),
                ("vaksin_pfizer", self.vaksin_pfizer, brands.pfizer),
                ("vaksin_moderna", self.vaksin_moderna, brands.moderna),
            ],
        )?;
        let remainder = self.vaksin_novavax + self.vaksin_lainnya;
        ensure(
            (self.vaksin_novavax, self.vaksin_lainnya) == split_remainder(remainder),
            || format!("novavax/lainnya {}/{} do not split the remainder", self.vaksin_novavax, self.vaksin_lainnya),
        )?;

        checks::carved(
            total,
            &[
                ("dosis_1", self.dosis_1, doses.first),
                ("dosis_2", self.dosis_2, doses.second),
                ("dosis_booster", self.dosis_booster, doses.booster),
            ],
        )?;
        checks::carved(
            total,
            &[
                ("lansia_vaksin", self.lansia_vaksin, ELDERLY_SHARE),
                ("dewasa_vaksin", self.dewasa_vaksin, ADULT_SHARE),
                ("remaja_vaksin", self.remaja_vaksin, TEEN_SHARE),
                ("anak_vaksin", self.anak_vaksin, children),
            ],
        )?;
        checks::carved(
            total,
            &[
                ("nakes_vaksin", self.nakes_vaksin, HEALTH_WORKER_SHARE),
                ("guru_vaksin", self.guru_vaksin, TEACHER_SHARE),
                ("petugas_publik_vaksin", self.petugas_publik_vaksin, PUBLIC_SERVANT_SHARE),
            ],
        )?;
        checks::carved(
            total,
            &[
                ("puskesmas_vaksin", self.puskesmas_vaksin, PUSKESMAS_SHARE),
                ("rumah_sakit_vaksin", self.rumah_sakit_vaksin, HOSPITAL_SHARE),
                ("sentra_vaksin", self.sentra_vaksin, MASS_SITE_SHARE),
                ("drive_thru_vaksin", self.drive_thru_vaksin, DRIVE_THRU_SHARE),
            ],
        )?;
        checks::carved(
            total,
            &[
                ("kipi_ringan", self.kipi_ringan, KIPI_MILD_SHARE),
                ("kipi_sedang", self.kipi_sedang, KIPI_MODERATE_SHARE),
                ("kipi_berat", self.kipi_berat, KIPI_SEVERE_SHARE),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;

    fn early_week() -> VaccinationRecord {
        // Gorontalo: 3M people, target 9_000 (0.3%).
        VaccinationRecord {
            id_vaksinasi: 1,
            iso_code: Region::Gorontalo,
            tanggal: NaiveDate::from_ymd_opt(2021, 3, 8).unwrap(),
            vaksin_sinovac: 7_200,
            vaksin_astrazeneca: 1_500,
            vaksin_pfizer: 0,
            vaksin_moderna: 0,
            vaksin_novavax: 90,
            vaksin_lainnya: 210,
            dosis_1: 7_000,
            dosis_2: 1_800,
            dosis_booster: 0,
            lansia_vaksin: 1_800,
            dewasa_vaksin: 6_000,
            remaja_vaksin: 900,
            anak_vaksin: 0,
            nakes_vaksin: 900,
            guru_vaksin: 500,
            petugas_publik_vaksin: 300,
            puskesmas_vaksin: 4_500,
            rumah_sakit_vaksin: 2_000,
            sentra_vaksin: 1_200,
            drive_thru_vaksin: 800,
            kipi_ringan: 200,
            kipi_sedang: 30,
            kipi_berat: 2,
        }
    }

    #[test]
    fn accepts_consistent_week() {
        let record = early_week();
        assert_eq!(record.total_vaccinated(), 9_000);
        Record::new(record).unwrap();
    }

    #[test]
    fn rejects_mrna_doses_before_mid_program() {
        let mut record = early_week();
        record.vaksin_pfizer = 100;
        record.vaksin_sinovac -= 100;
        let err = Record::new(record).unwrap_err();
        assert!(err.to_string().contains("vaksin_pfizer"));
    }

    #[test]
    fn rejects_children_before_eligibility() {
        let mut record = early_week();
        record.anak_vaksin = 10;
        assert!(Record::new(record).is_err());
    }

    #[test]
    fn rejects_site_counts_below_their_band() {
        let mut record = early_week();
        record.drive_thru_vaksin = 300;
        let err = Record::new(record).unwrap_err();
        assert!(err.to_string().contains("drive_thru_vaksin=300 outside 450..=1350"));
    }

    #[test]
    fn remainder_split_is_exact() {
        assert_eq!(split_remainder(0), (0, 0));
        assert_eq!(split_remainder(7), (2, 5));
        assert_eq!(split_remainder(300), (90, 210));
    }
}
