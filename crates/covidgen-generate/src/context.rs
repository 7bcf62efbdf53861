use chrono::{Duration, NaiveDate};
use covidgen_core::{Band, Error, IntRange, Result, Weighted};
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Run-wide sampling state: the seed, the single random generator derived
/// from it, and the reference date for status derivations.
///
/// Every sampling operation takes the context explicitly; nothing in the
/// crate keeps random state of its own.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    seed: u64,
    as_of: NaiveDate,
    rng: ChaCha8Rng,
}

impl GenerationContext {
    pub fn new(seed: u64, as_of: NaiveDate) -> Self {
        Self {
            seed,
            as_of,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Uniform draw over the closed band.
    pub fn uniform(&mut self, band: Band) -> f64 {
        if band.lo >= band.hi {
            return band.lo;
        }
        self.rng.random_range(band.lo..=band.hi)
    }

    /// Uniform integer over the closed range.
    pub fn int_between(&mut self, range: IntRange) -> i64 {
        if range.min >= range.max {
            return range.min;
        }
        self.rng.random_range(range.min..=range.max)
    }

    /// `floor(whole * f)` for `f` drawn from the band.
    pub fn fraction_of(&mut self, whole: i64, band: Band) -> i64 {
        let fraction = self.uniform(band);
        (whole as f64 * fraction).floor() as i64
    }

    pub fn coin(&mut self) -> bool {
        self.chance(0.5)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.random::<f64>() < probability
    }

    /// Weighted categorical draw.
    pub fn pick<T: Copy>(&mut self, weights: Weighted<T>) -> Result<T> {
        let index = WeightedIndex::new(weights.iter().map(|(_, weight)| *weight))
            .map_err(|err| Error::configuration(format!("invalid weight vector: {err}")))?;
        Ok(weights[index.sample(&mut self.rng)].0)
    }

    /// Uniform categorical draw.
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Result<T> {
        items
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| Error::configuration("cannot choose from an empty category list"))
    }

    /// `amount` distinct items, in draw order.
    pub fn sample_distinct<T: Copy>(&mut self, items: &[T], amount: usize) -> Vec<T> {
        items
            .choose_multiple(&mut self.rng, amount)
            .copied()
            .collect()
    }

    /// Uniform day in `start..=end`.
    pub fn day_between(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        let span = (end - start).num_days().max(0);
        let offset = self.int_between(IntRange::new(0, span));
        start + Duration::days(offset)
    }
}

/// Splits a total into parts whose fractions are drawn in a fixed order.
///
/// Each fraction stays inside its band, and its upper end is lowered so the
/// lower bounds of the parts still to come remain available. Parts therefore
/// respect their bands and never sum past the total, provided the lower
/// bounds of a group sum to at most one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allotment {
    total: i64,
    remaining: i64,
    spent: f64,
}

impl Allotment {
    pub fn new(total: i64) -> Self {
        let total = total.max(0);
        Self {
            total,
            remaining: total,
            spent: 0.0,
        }
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Fraction of the total drawn so far.
    pub fn spent(&self) -> f64 {
        self.spent
    }

    /// Take up to `amount` from what remains.
    pub fn take(&mut self, amount: i64) -> i64 {
        let part = amount.clamp(0, self.remaining);
        self.remaining -= part;
        part
    }

    /// Draw `f` from `band`, capped at `1 - spent - reserve`, and take
    /// `floor(total * f)`. `reserve` is the sum of the lower bounds of the
    /// parts drawn after this one.
    pub fn carve(&mut self, ctx: &mut GenerationContext, band: Band, reserve: f64) -> i64 {
        let cap = band.hi.min(1.0 - self.spent - reserve).max(band.lo);
        let fraction = ctx.uniform(Band::new(band.lo, cap));
        self.spent += fraction;
        let amount = (self.total as f64 * fraction).floor() as i64;
        self.take(amount)
    }

    /// Carve one part per band, in order.
    pub fn carve_all<const N: usize>(
        &mut self,
        ctx: &mut GenerationContext,
        bands: [Band; N],
    ) -> [i64; N] {
        let mut parts = [0; N];
        for (index, band) in bands.iter().enumerate() {
            let reserve: f64 = bands[index + 1..].iter().map(|later| later.lo).sum();
            parts[index] = self.carve(ctx, *band, reserve);
        }
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(seed: u64) -> GenerationContext {
        GenerationContext::new(seed, NaiveDate::from_ymd_opt(2022, 9, 15).unwrap())
    }

    #[test]
    fn same_seed_same_draws() {
        let mut a = context(7);
        let mut b = context(7);
        for _ in 0..100 {
            assert_eq!(
                a.int_between(IntRange::new(0, 1_000)),
                b.int_between(IntRange::new(0, 1_000))
            );
            assert_eq!(a.uniform(Band::new(-1.0, 1.0)), b.uniform(Band::new(-1.0, 1.0)));
        }
    }

    #[test]
    fn draws_stay_in_bounds() {
        let mut ctx = context(42);
        for _ in 0..1_000 {
            assert!(IntRange::new(3, 8).contains(ctx.int_between(IntRange::new(3, 8))));
            assert!(Band::new(0.1, 0.3).contains(ctx.uniform(Band::new(0.1, 0.3))));
        }
        assert_eq!(ctx.uniform(Band::ZERO), 0.0);
        assert_eq!(ctx.int_between(IntRange::fixed(24)), 24);
    }

    #[test]
    fn pick_rejects_empty_weights() {
        let mut ctx = context(1);
        let empty: Weighted<u8> = &[];
        assert!(ctx.pick(empty).unwrap_err().is_configuration());
        assert_eq!(ctx.pick(&[(9_u8, 1.0)]).unwrap(), 9);
    }

    #[test]
    fn allotment_never_overdraws() {
        let mut allotment = Allotment::new(10);
        assert_eq!(allotment.take(7), 7);
        assert_eq!(allotment.take(7), 3);
        assert_eq!(allotment.take(-2), 0);
        assert_eq!(allotment.remaining(), 0);
        assert_eq!(allotment.total(), 10);
    }

    #[test]
    fn carved_parts_stay_inside_their_bands() {
        let sites = [
            Band::new(0.4, 0.6),
            Band::new(0.2, 0.3),
            Band::new(0.1, 0.2),
            Band::new(0.05, 0.15),
        ];
        let mut ctx = context(42);
        for total in [0, 7, 40, 999, 12_345, 87_000] {
            for _ in 0..200 {
                let mut allotment = Allotment::new(total);
                let parts = allotment.carve_all(&mut ctx, sites);
                for (part, band) in parts.iter().zip(sites) {
                    let (lo, hi) = band.floor_bounds(total);
                    assert!((lo..=hi).contains(part), "{part} outside {lo}..={hi} of {total}");
                }
                assert!(parts.iter().sum::<i64>() <= total);
                assert!(allotment.spent() <= 1.0 + 1e-9);
            }
        }
    }

    #[test]
    fn sampled_items_are_distinct() {
        let mut ctx = context(3);
        let items: Vec<u32> = (0..34).collect();
        let mut picked = ctx.sample_distinct(&items, 15);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 15);
    }
}
