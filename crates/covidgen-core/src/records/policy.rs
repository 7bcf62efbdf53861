use chrono::NaiveDate;

use super::checks::{self, Check, ensure};
use super::table_record;
use crate::params::policy::{
    self as params, COMPLIANCE_RATE, Coverage, DURATION_DAYS, IMPACT_PER_LEVEL, POLICY_EVENTS,
    PolicyKind, PolicyStatus, SectorRule,
};
use crate::region::Region;
use crate::schema::ColumnKind::{Bool, Date, Decimal, Id, Int, Text};

crate::label_field!(PolicyKind, PolicyStatus);

table_record! {
    /// A government restriction applied to one province.
    PolicyRecord => KebijakanPemerintah {
        id_kebijakan: u64 = Id,
        iso_code: Region = Text,
        tanggal_mulai: NaiveDate = Date,
        tanggal_selesai: NaiveDate = Date,
        jenis_kebijakan: PolicyKind = Text,
        nama_kebijakan: String = Text,
        deskripsi_kebijakan: String = Text,
        tingkat_keketatan: u32 = Int,
        sektor_pendidikan: bool = Bool,
        sektor_ekonomi: bool = Bool,
        sektor_transportasi: bool = Bool,
        sektor_pariwisata: bool = Bool,
        sektor_ibadah: bool = Bool,
        compliance_rate: f64 = Decimal(1),
        dampak_ekonomi_pct: f64 = Decimal(1),
        status_kebijakan: PolicyStatus = Text,
    }
}

impl PolicyRecord {
    pub fn sectors(&self) -> [bool; 5] {
        [
            self.sektor_pendidikan,
            self.sektor_ekonomi,
            self.sektor_transportasi,
            self.sektor_pariwisata,
            self.sektor_ibadah,
        ]
    }

    pub(super) fn validate(&self) -> Check {
        let kind = self.jenis_kebijakan;
        checks::within_horizon("tanggal_mulai", self.tanggal_mulai, params::HORIZON_START, params::HORIZON_END)?;
        checks::within_horizon("tanggal_selesai", self.tanggal_selesai, params::HORIZON_START, params::HORIZON_END)?;
        let days = (self.tanggal_selesai - self.tanggal_mulai).num_days();
        ensure(0 <= days && days <= DURATION_DAYS.max, || {
            format!(
                "tanggal_selesai {} is not within {} days after tanggal_mulai {}",
                self.tanggal_selesai, DURATION_DAYS.max, self.tanggal_mulai
            )
        })?;

        let event_start = |event: &params::PolicyEvent| {
            let (year, month, day) = event.start;
            NaiveDate::from_ymd_opt(year, month, day)
        };
        ensure(
            POLICY_EVENTS.iter().any(|event| {
                event.kind == kind
                    && event.stringency == self.tingkat_keketatan
                    && event_start(event) == Some(self.tanggal_mulai)
            }),
            || format!("{} at level {} did not start on {}", kind.label(), self.tingkat_keketatan, self.tanggal_mulai),
        )?;

        if let Coverage::Listed(regions) = kind.coverage() {
            ensure(regions.contains(&self.iso_code), || {
                format!("{} does not cover {}", kind.label(), self.iso_code)
            })?;
        }

        for (rule, (flag, name)) in kind.sectors().iter().zip(self.sectors().into_iter().zip([
            "sektor_pendidikan",
            "sektor_ekonomi",
            "sektor_transportasi",
            "sektor_pariwisata",
            "sektor_ibadah",
        ])) {
            if let SectorRule::Fixed(expected) = rule {
                ensure(flag == *expected, || {
                    format!("{name}={flag} but {} fixes it to {expected}", kind.label())
                })?;
            }
        }

        checks::in_band("compliance_rate", self.compliance_rate, COMPLIANCE_RATE)?;
        checks::in_band(
            "dampak_ekonomi_pct",
            self.dampak_ekonomi_pct,
            IMPACT_PER_LEVEL.scaled(f64::from(self.tingkat_keketatan)),
        )?;

        let province = self.iso_code.name();
        ensure(self.nama_kebijakan == format!("{} {province}", kind.label()), || {
            format!("unexpected policy name '{}'", self.nama_kebijakan)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;

    fn psbb_jakarta() -> PolicyRecord {
        PolicyRecord {
            id_kebijakan: 4,
            iso_code: Region::DkiJakarta,
            tanggal_mulai: NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
            tanggal_selesai: NaiveDate::from_ymd_opt(2020, 5, 15).unwrap(),
            jenis_kebijakan: PolicyKind::Psbb,
            nama_kebijakan: "PSBB DKI Jakarta".to_string(),
            deskripsi_kebijakan: "Implementasi PSBB di DKI Jakarta untuk mengendalikan penyebaran COVID-19".to_string(),
            tingkat_keketatan: 8,
            sektor_pendidikan: true,
            sektor_ekonomi: true,
            sektor_transportasi: true,
            sektor_pariwisata: true,
            sektor_ibadah: true,
            compliance_rate: 75.25,
            dampak_ekonomi_pct: 30.0,
            status_kebijakan: PolicyStatus::Berakhir,
        }
    }

    #[test]
    fn accepts_listed_region() {
        let record = Record::new(psbb_jakarta()).unwrap();
        assert_eq!(record.values()[13].to_csv(), "75.3");
    }

    #[test]
    fn rejects_unlisted_region_and_open_sector() {
        let mut policy = psbb_jakarta();
        policy.iso_code = Region::Papua;
        policy.nama_kebijakan = "PSBB Papua".to_string();
        assert!(Record::new(policy).is_err());

        let mut policy = psbb_jakarta();
        policy.sektor_ibadah = false;
        let err = Record::new(policy).unwrap_err();
        assert!(err.to_string().contains("sektor_ibadah"));
    }

    #[test]
    fn rejects_end_before_start() {
        let mut policy = psbb_jakarta();
        policy.tanggal_selesai = NaiveDate::from_ymd_opt(2020, 3, 30).unwrap();
        assert!(Record::new(policy).is_err());
    }
}
