use chrono::NaiveDate;
use covidgen_core::params::vaccination::{
    self as params, ADULT_SHARE, DAILY_TARGET, DRIVE_THRU_SHARE, ELDERLY_SHARE,
    HEALTH_WORKER_SHARE, HOSPITAL_SHARE, KIPI_MILD_SHARE, KIPI_MODERATE_SHARE,
    KIPI_SEVERE_SHARE, MASS_SITE_SHARE, PUBLIC_SERVANT_SHARE, PUSKESMAS_SHARE, TEACHER_SHARE,
    TEEN_SHARE,
};
use covidgen_core::records::{VaccinationRecord, split_remainder};
use covidgen_core::{Band, Region, TableName, Timeline};

use super::scoped;
use crate::composer::{Dataset, TableBuilder};
use crate::context::{Allotment, GenerationContext};
use crate::errors::{GenerationError, Scope};

const TABLE: TableName = TableName::VaksinasiDetail;

pub(super) fn generate(ctx: &mut GenerationContext) -> Result<Dataset, GenerationError> {
    let schedule =
        Schedule::load().map_err(|err| GenerationError::scoped(Scope::table(TABLE), err))?;

    let mut builder = TableBuilder::new(TABLE);
    for week in schedule.brands.weekly() {
        let mixes = schedule
            .on(week)
            .map_err(|err| GenerationError::scoped(Scope::point(TABLE, week), err))?;
        for region in Region::ALL {
            let draw = sample(ctx, region, mixes);
            builder
                .compose(|id| compose(id, region, week, draw))
                .map_err(scoped(TABLE, region, week))?;
        }
    }
    Ok(builder.finish())
}

/// Brand, dose and child-eligibility timelines over the program horizon.
struct Schedule {
    brands: Timeline<params::BrandPhase>,
    doses: Timeline<params::DosePhase>,
    children: Timeline<params::ChildEligibility>,
}

/// Brand mix, dose mix and child share in force for one week.
type Mixes = (params::BrandMix, params::DoseMix, Band);

impl Schedule {
    fn load() -> covidgen_core::Result<Self> {
        Ok(Self {
            brands: params::brand_timeline()?,
            doses: params::dose_timeline()?,
            children: params::child_timeline()?,
        })
    }

    fn on(&self, week: NaiveDate) -> covidgen_core::Result<Mixes> {
        Ok((
            self.brands.resolve(week)?.mix(),
            self.doses.resolve(week)?.mix(),
            self.children.resolve(week)?.share(),
        ))
    }
}

/// Parts carved from one week's daily target, in column order.
#[derive(Debug, Clone, Copy)]
struct VaccinationDraw {
    brands: [i64; 4],
    remainder: i64,
    doses: [i64; 3],
    ages: [i64; 4],
    professions: [i64; 3],
    sites: [i64; 4],
    kipi: [i64; 3],
}

fn carve<const N: usize>(ctx: &mut GenerationContext, target: i64, bands: [Band; N]) -> [i64; N] {
    Allotment::new(target).carve_all(ctx, bands)
}

fn sample(ctx: &mut GenerationContext, region: Region, (brand, dose, child): Mixes) -> VaccinationDraw {
    let population = i64::from(region.population_millions()) * 1_000_000;
    let target = ctx.fraction_of(population, DAILY_TARGET);

    let mut brands = Allotment::new(target);
    let named = brands.carve_all(
        ctx,
        [brand.sinovac, brand.astrazeneca, brand.pfizer, brand.moderna],
    );

    VaccinationDraw {
        brands: named,
        remainder: brands.remaining(),
        doses: carve(ctx, target, [dose.first, dose.second, dose.booster]),
        ages: carve(ctx, target, [ELDERLY_SHARE, ADULT_SHARE, TEEN_SHARE, child]),
        professions: carve(
            ctx,
            target,
            [HEALTH_WORKER_SHARE, TEACHER_SHARE, PUBLIC_SERVANT_SHARE],
        ),
        sites: carve(
            ctx,
            target,
            [PUSKESMAS_SHARE, HOSPITAL_SHARE, MASS_SITE_SHARE, DRIVE_THRU_SHARE],
        ),
        kipi: carve(
            ctx,
            target,
            [KIPI_MILD_SHARE, KIPI_MODERATE_SHARE, KIPI_SEVERE_SHARE],
        ),
    }
}

fn compose(id: u64, region: Region, week: NaiveDate, draw: VaccinationDraw) -> VaccinationRecord {
    let [sinovac, astrazeneca, pfizer, moderna] = draw.brands;
    let (novavax, lainnya) = split_remainder(draw.remainder);
    let [dosis_1, dosis_2, dosis_booster] = draw.doses;
    let [lansia, dewasa, remaja, anak] = draw.ages;
    let [nakes, guru, petugas_publik] = draw.professions;
    let [puskesmas, rumah_sakit, sentra, drive_thru] = draw.sites;
    let [kipi_ringan, kipi_sedang, kipi_berat] = draw.kipi;

    VaccinationRecord {
        id_vaksinasi: id,
        iso_code: region,
        tanggal: week,
        vaksin_sinovac: sinovac,
        vaksin_astrazeneca: astrazeneca,
        vaksin_pfizer: pfizer,
        vaksin_moderna: moderna,
        vaksin_novavax: novavax,
        vaksin_lainnya: lainnya,
        dosis_1,
        dosis_2,
        dosis_booster,
        lansia_vaksin: lansia,
        dewasa_vaksin: dewasa,
        remaja_vaksin: remaja,
        anak_vaksin: anak,
        nakes_vaksin: nakes,
        guru_vaksin: guru,
        petugas_publik_vaksin: petugas_publik,
        puskesmas_vaksin: puskesmas,
        rumah_sakit_vaksin: rumah_sakit,
        sentra_vaksin: sentra,
        drive_thru_vaksin: drive_thru,
        kipi_ringan,
        kipi_sedang,
        kipi_berat,
    }
}

#[cfg(test)]
mod tests {
    use covidgen_core::RecordKind;

    use super::*;
    use crate::generators::tests::context;

    fn weeks() -> Vec<VaccinationRecord> {
        generate(&mut context(42))
            .unwrap()
            .records()
            .iter()
            .filter_map(|record| match record.kind() {
                RecordKind::Vaccination(week) => Some(week.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn early_weeks_have_no_mrna_boosters_or_children() {
        let cutoff = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        let early: Vec<VaccinationRecord> =
            weeks().into_iter().filter(|week| week.tanggal < cutoff).collect();
        assert!(!early.is_empty());
        for week in early {
            assert_eq!(week.vaksin_pfizer, 0);
            assert_eq!(week.vaksin_moderna, 0);
            assert_eq!(week.dosis_booster, 0);
            assert_eq!(week.anak_vaksin, 0);
        }
    }

    #[test]
    fn brands_add_up_to_the_daily_target() {
        let schedule = Schedule::load().unwrap();
        let mut ctx = context(42);
        for week in schedule.brands.weekly().step_by(13) {
            let mixes = schedule.on(week).unwrap();
            for region in Region::ALL {
                let population = i64::from(region.population_millions()) * 1_000_000;
                let target = ctx.clone().fraction_of(population, DAILY_TARGET);
                let draw = sample(&mut ctx, region, mixes);
                let brands: i64 = draw.brands.iter().sum::<i64>() + draw.remainder;
                assert_eq!(brands, target, "{region:?} {week}");
                assert!(draw.doses.iter().sum::<i64>() <= target);

                let record = compose(1, region, week, draw);
                assert_eq!(record.total_vaccinated(), target);
                assert_eq!(
                    split_remainder(draw.remainder),
                    (record.vaksin_novavax, record.vaksin_lainnya)
                );
            }
        }
    }

    #[test]
    fn weeks_iterate_dates_then_regions() {
        let weeks = weeks();
        assert_eq!(weeks.len() % Region::ALL.len(), 0);
        assert!(weeks[..Region::ALL.len()].iter().all(|week| week.tanggal == weeks[0].tanggal));
        assert_eq!(weeks[1].iso_code, Region::SumateraUtara);
    }
}
