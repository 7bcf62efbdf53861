use chrono::NaiveDate;

use super::checks::{self, Check, ensure};
use super::table_record;
use crate::params::cluster::{
    self as params, CONTACTS_PER_CASE, ClusterSetting, ClusterStatus, DURATION_DAYS,
    INDEX_CASES, MALE_SHARE, SEVERITY, SUSPECTS_PER_CONTACT,
};
use crate::region::Region;
use crate::schema::ColumnKind::{Bool, Date, Decimal, Id, Int, NullableDate, Text};

crate::label_field!(ClusterSetting, ClusterStatus);

table_record! {
    /// A traced transmission cluster with its case breakdown.
    ClusterRecord => ClusterPenularan {
        id_cluster: u64 = Id,
        iso_code: Region = Text,
        tanggal_terdeteksi: NaiveDate = Date,
        tanggal_selesai: Option<NaiveDate> = NullableDate,
        nama_cluster: String = Text,
        jenis_cluster: ClusterSetting = Text,
        nama_lokasi: String = Text,
        alamat_lokasi: String = Text,
        latitude: f64 = Decimal(6),
        longitude: f64 = Decimal(6),
        kasus_index: i64 = Int,
        total_kasus_terkait: i64 = Int,
        total_kontak_erat: i64 = Int,
        total_suspect: i64 = Int,
        kasus_anak: i64 = Int,
        kasus_dewasa: i64 = Int,
        kasus_lansia: i64 = Int,
        kasus_laki: i64 = Int,
        kasus_perempuan: i64 = Int,
        kasus_tanpa_gejala: i64 = Int,
        kasus_ringan: i64 = Int,
        kasus_sedang: i64 = Int,
        kasus_berat: i64 = Int,
        kasus_kritis: i64 = Int,
        kasus_meninggal: i64 = Int,
        contact_tracing_completed: bool = Bool,
        area_disinfection: bool = Bool,
        temporary_closure: bool = Bool,
        mass_testing: bool = Bool,
        status_cluster: ClusterStatus = Text,
        catatan: String = Text,
    }
}

impl ClusterRecord {
    fn validate_dates(&self) -> Check {
        checks::within_horizon(
            "tanggal_terdeteksi",
            self.tanggal_terdeteksi,
            params::HORIZON_START,
            params::HORIZON_END,
        )?;
        match (self.status_cluster.is_closed(), self.tanggal_selesai) {
            (true, Some(end)) => {
                checks::within_horizon("tanggal_selesai", end, params::HORIZON_START, params::HORIZON_END)?;
                let days = (end - self.tanggal_terdeteksi).num_days();
                ensure(0 <= days && days <= DURATION_DAYS.max, || {
                    format!(
                        "tanggal_selesai {end} is not within {} days after detection {}",
                        DURATION_DAYS.max, self.tanggal_terdeteksi
                    )
                })
            }
            (false, None) => Ok(()),
            (closed, end) => Err(format!(
                "status {} (closed={closed}) does not match tanggal_selesai {end:?}",
                self.status_cluster.label()
            )),
        }
    }

    pub(super) fn validate(&self) -> Check {
        self.validate_dates()?;
        let setting = self.jenis_cluster;
        let phase = checks::phase_on(params::timeline(), self.tanggal_terdeteksi)?;
        ensure(phase.settings().contains(&setting), || {
            format!("{} clusters are not drawn on {}", setting.label(), self.tanggal_terdeteksi)
        })?;

        let total = self.total_kasus_terkait;
        ensure(self.kasus_index == INDEX_CASES, || {
            format!("kasus_index={} must be {INDEX_CASES}", self.kasus_index)
        })?;
        checks::in_range("total_kasus_terkait", total, setting.group().cases())?;
        checks::fraction_of("total_kontak_erat", self.total_kontak_erat, total, CONTACTS_PER_CASE)?;
        checks::fraction_of("total_suspect", self.total_suspect, self.total_kontak_erat, SUSPECTS_PER_CONTACT)?;

        let ages = setting.age_split();
        checks::carved(
            total,
            &[
                ("kasus_anak", self.kasus_anak, ages.children),
                ("kasus_dewasa", self.kasus_dewasa, ages.adults),
                ("kasus_lansia", self.kasus_lansia, ages.elderly),
            ],
        )?;

        checks::fraction_of("kasus_laki", self.kasus_laki, total, MALE_SHARE)?;
        ensure(self.kasus_laki + self.kasus_perempuan == total, || {
            format!(
                "kasus_laki+kasus_perempuan={} differs from total {total}",
                self.kasus_laki + self.kasus_perempuan
            )
        })?;

        let [asymptomatic, mild, moderate, severe, critical, deceased] = SEVERITY;
        checks::carved(
            total,
            &[
                ("kasus_tanpa_gejala", self.kasus_tanpa_gejala, asymptomatic),
                ("kasus_ringan", self.kasus_ringan, mild),
                ("kasus_sedang", self.kasus_sedang, moderate),
                ("kasus_berat", self.kasus_berat, severe),
                ("kasus_kritis", self.kasus_kritis, critical),
                ("kasus_meninggal", self.kasus_meninggal, deceased),
            ],
        )?;

        ensure(!self.temporary_closure || setting.may_close(), || {
            format!("{} clusters are never closed temporarily", setting.label())
        })?;
        checks::coordinates(self.latitude, self.longitude)
    }
}
