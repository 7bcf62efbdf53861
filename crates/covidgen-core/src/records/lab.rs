use super::checks::{self, Check, ensure};
use super::table_record;
use crate::params::lab::{
    ANALYSTS, ANTIGEN_TURNAROUND, EXTRACTION_KIT_STOCK, LabOwnership, LabType, REAGENT_STOCK,
    TECHNICIANS,
};
use crate::region::Region;
use crate::schema::ColumnKind::{Bool, Decimal, Id, Int, Text};

crate::label_field!(LabType, LabOwnership);

table_record! {
    /// A COVID-19 testing laboratory.
    LabRecord => TestingLabs {
        id_lab: u64 = Id,
        iso_code: Region = Text,
        nama_lab: String = Text,
        jenis_lab: LabType = Text,
        tipe_kepemilikan: LabOwnership = Text,
        kapasitas_harian_pcr: i64 = Int,
        kapasitas_harian_antigen: i64 = Int,
        kapasitas_harian_antibodi: i64 = Int,
        mesin_pcr_count: i64 = Int,
        extraction_kit_stock: i64 = Int,
        reagent_stock: i64 = Int,
        analis_count: i64 = Int,
        teknisi_count: i64 = Int,
        turnaround_time_pcr: i64 = Int,
        turnaround_time_antigen: i64 = Int,
        akreditasi_kemenkes: bool = Bool,
        iso_certified: bool = Bool,
        latitude: f64 = Decimal(6),
        longitude: f64 = Decimal(6),
        alamat: String = Text,
        operational_24_hours: bool = Bool,
        drive_thru_available: bool = Bool,
    }
}

impl LabRecord {
    pub(super) fn validate(&self) -> Check {
        let capacity = self.jenis_lab.capacity();
        checks::in_range("kapasitas_harian_pcr", self.kapasitas_harian_pcr, capacity.pcr)?;
        checks::in_range("kapasitas_harian_antigen", self.kapasitas_harian_antigen, capacity.antigen)?;
        checks::in_range("kapasitas_harian_antibodi", self.kapasitas_harian_antibodi, capacity.antibody)?;
        checks::in_range("mesin_pcr_count", self.mesin_pcr_count, capacity.pcr_machines)?;
        checks::in_range("turnaround_time_pcr", self.turnaround_time_pcr, capacity.pcr_turnaround)?;
        ensure((self.kapasitas_harian_pcr == 0) == (self.mesin_pcr_count == 0), || {
            format!(
                "kapasitas_harian_pcr={} does not match mesin_pcr_count={}",
                self.kapasitas_harian_pcr, self.mesin_pcr_count
            )
        })?;

        checks::in_range("extraction_kit_stock", self.extraction_kit_stock, EXTRACTION_KIT_STOCK)?;
        checks::in_range("reagent_stock", self.reagent_stock, REAGENT_STOCK)?;
        checks::in_range("analis_count", self.analis_count, ANALYSTS)?;
        checks::in_range("teknisi_count", self.teknisi_count, TECHNICIANS)?;
        checks::in_range("turnaround_time_antigen", self.turnaround_time_antigen, ANTIGEN_TURNAROUND)?;

        ensure(
            !self.operational_24_hours || self.tipe_kepemilikan.may_run_24_hours(),
            || format!("{} labs do not run around the clock", self.tipe_kepemilikan.label()),
        )?;
        checks::coordinates(self.latitude, self.longitude)?;

        let prefix = format!("Lab {} {} ", self.jenis_lab.label(), self.iso_code.name());
        ensure(self.nama_lab.starts_with(&prefix), || {
            format!("unexpected lab name '{}'", self.nama_lab)
        })
    }
}
