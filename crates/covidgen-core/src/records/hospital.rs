use super::checks::{self, Check, ensure};
use super::table_record;
use crate::params::hospital::{
    self, HospitalClass, OperationalStatus, Ownership, DOCTORS_PER_BED, EMERGENCY_FRACTION,
    MIN_DOCTORS, MIN_NURSES, MIN_SPECIALISTS, MIN_VENTILATORS, NURSES_PER_BED, OXYGEN_PER_BED,
    SPECIALISTS_PER_DOCTOR, VENTILATORS_PER_ICU_BED,
};
use crate::region::Region;
use crate::schema::ColumnKind::{Bool, Decimal, Id, Int, Text};

crate::label_field!(Ownership, HospitalClass, OperationalStatus);

table_record! {
    /// A hospital with its bed capacity, equipment and staff.
    HospitalRecord => RumahSakit {
        id_rumah_sakit: u64 = Id,
        iso_code: Region = Text,
        nama_rumah_sakit: String = Text,
        tipe_rumah_sakit: Ownership = Text,
        kelas_rumah_sakit: HospitalClass = Text,
        total_bed: i64 = Int,
        icu_bed: i64 = Int,
        isolation_bed: i64 = Int,
        emergency_bed: i64 = Int,
        ventilator_count: i64 = Int,
        oxygen_capacity: i64 = Int,
        ct_scan_available: bool = Bool,
        pcr_lab_available: bool = Bool,
        doctor_count: i64 = Int,
        nurse_count: i64 = Int,
        specialist_count: i64 = Int,
        latitude: f64 = Decimal(6),
        longitude: f64 = Decimal(6),
        alamat: String = Text,
        covid_referral: bool = Bool,
        operational_status: OperationalStatus = Text,
    }
}

/// Clamped floor bounds: `max(min, floor(whole * f))` for `f` in the band.
fn staffed(field: &str, value: i64, whole: i64, band: crate::params::Band, min: i64) -> Check {
    let (lo, hi) = band.floor_bounds(whole);
    let (lo, hi) = (lo.max(min), hi.max(min));
    ensure(lo <= value && value <= hi, || {
        format!("{field}={value} outside {lo}..={hi} of {whole}")
    })
}

impl HospitalRecord {
    pub(super) fn validate(&self) -> Check {
        let class = self.kelas_rumah_sakit;
        let profile = class.profile();

        ensure(
            self.tipe_rumah_sakit
                .class_weights()
                .iter()
                .any(|(allowed, _)| *allowed == class),
            || format!("{} hospitals are never class {}", self.tipe_rumah_sakit.label(), class.label()),
        )?;

        let total = self.total_bed;
        checks::in_range("total_bed", total, profile.total_bed)?;
        checks::fraction_of("icu_bed", self.icu_bed, total, profile.icu_fraction)?;
        checks::fraction_of("isolation_bed", self.isolation_bed, total, profile.isolation_fraction)?;
        checks::fraction_of("emergency_bed", self.emergency_bed, total, EMERGENCY_FRACTION)?;
        let ward_beds = self.icu_bed + self.isolation_bed + self.emergency_bed;
        ensure(ward_beds <= total, || {
            format!("icu+isolation+emergency beds {ward_beds} exceed total_bed {total}")
        })?;

        staffed(
            "ventilator_count",
            self.ventilator_count,
            self.icu_bed,
            VENTILATORS_PER_ICU_BED,
            MIN_VENTILATORS,
        )?;
        ensure(
            self.oxygen_capacity % total == 0
                && OXYGEN_PER_BED.contains(self.oxygen_capacity / total),
            || format!("oxygen_capacity={} is not total_bed x 5..15", self.oxygen_capacity),
        )?;

        staffed("doctor_count", self.doctor_count, total, DOCTORS_PER_BED, MIN_DOCTORS)?;
        staffed("nurse_count", self.nurse_count, total, NURSES_PER_BED, MIN_NURSES)?;
        staffed(
            "specialist_count",
            self.specialist_count,
            self.doctor_count,
            SPECIALISTS_PER_DOCTOR,
            MIN_SPECIALISTS,
        )?;
        ensure(self.specialist_count <= self.doctor_count, || {
            "specialist_count exceeds doctor_count".to_string()
        })?;

        ensure(!self.ct_scan_available || class.is_referral(), || {
            format!("class {} hospitals have no CT scanner", class.label())
        })?;
        checks::coordinates(self.latitude, self.longitude)?;

        let province = self.iso_code.name();
        ensure(
            hospital::NAME_PREFIXES
                .iter()
                .any(|prefix| self.nama_rumah_sakit.starts_with(&format!("RS {prefix} {province} "))),
            || format!("unexpected hospital name '{}'", self.nama_rumah_sakit),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;

    fn class_d() -> HospitalRecord {
        HospitalRecord {
            id_rumah_sakit: 1,
            iso_code: Region::Gorontalo,
            nama_rumah_sakit: "RS Daerah Gorontalo 1".to_string(),
            tipe_rumah_sakit: Ownership::Pemerintah,
            kelas_rumah_sakit: HospitalClass::D,
            total_bed: 40,
            icu_bed: 1,
            isolation_bed: 2,
            emergency_bed: 3,
            ventilator_count: 1,
            oxygen_capacity: 400,
            ct_scan_available: false,
            pcr_lab_available: true,
            doctor_count: 8,
            nurse_count: 30,
            specialist_count: 2,
            latitude: 0.54,
            longitude: 123.06,
            alamat: "Jl. Kesehatan No. 7, Gorontalo".to_string(),
            covid_referral: true,
            operational_status: OperationalStatus::Aktif,
        }
    }

    #[test]
    fn accepts_consistent_hospital() {
        let record = Record::new(class_d()).unwrap();
        assert_eq!(record.id(), 1);
        let values = record.values();
        assert_eq!(values.len(), HospitalRecord::COLUMNS.len());
        assert_eq!(values[1].to_csv(), "ID-GO");
        assert_eq!(values[4].to_csv(), "D");
        assert_eq!(values[16].to_csv(), "0.540000");
    }

    #[test]
    fn rejects_icu_above_class_fraction() {
        let mut hospital = class_d();
        hospital.icu_bed = 5;
        let err = Record::new(hospital).unwrap_err();
        assert!(err.to_string().contains("icu_bed"));
    }

    #[test]
    fn rejects_private_class_d_and_ct_scanner() {
        let mut hospital = class_d();
        hospital.tipe_rumah_sakit = Ownership::Swasta;
        assert!(Record::new(hospital).is_err());

        let mut hospital = class_d();
        hospital.ct_scan_available = true;
        assert!(Record::new(hospital).is_err());
    }
}
