//! Deterministic random draws shared by every generator.
//!
//! All randomness flows through a [`SimRng`] handed down by the caller.
//! Nothing in the crate reaches for a thread-local or OS-seeded source, so
//! a seed fully determines the generated tables.

use chrono::{Duration, NaiveDate};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Poisson;
use tracing::warn;


/// Platform-stable PRNG used for all simulation draws.
pub type SimRng = ChaCha8Rng;

/// Create the simulation random source from a seed.
pub fn seeded(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}

/// Result type for sampling setup.
pub type Result<T> = std::result::Result<T, SamplingError>;

/// Errors building a sampling table.
#[derive(Debug, thiserror::Error)]
pub enum SamplingError {
    #[error("Weighted table has no entries")]
    Empty,

    #[error("Invalid weight {weight} for entry {index}")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("All weights are zero")]
    AllZero,
}

/// Categorical distribution over a fixed set of values.
///
/// Weights need not sum to one; they are normalized by the underlying
/// cumulative index. Every weighted draw in the crate goes through this
/// type so normalization and tie-breaking stay identical across uses.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    items: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T> WeightedTable<T> {
    /// Build a table from `(value, weight)` pairs.
    ///
    /// Weights must be finite and non-negative with at least one positive.
    pub fn new(entries: impl IntoIterator<Item = (T, f64)>) -> Result<Self> {
        let (items, weights): (Vec<T>, Vec<f64>) = entries.into_iter().unzip();

        if items.is_empty() {
            return Err(SamplingError::Empty);
        }
        if let Some((index, &weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(SamplingError::InvalidWeight { index, weight });
        }

        let index = WeightedIndex::new(&weights).map_err(|_| SamplingError::AllZero)?;
        Ok(Self { items, index })
    }

    /// Build a table where every value is equally likely.
    pub fn uniform(items: impl IntoIterator<Item = T>) -> Result<Self> {
        Self::new(items.into_iter().map(|item| (item, 1.0)))
    }

    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.items[self.index.sample(rng)]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Draw a date uniformly from the inclusive range `[from, to]`.
///
/// An inverted range collapses to `from`.
pub fn uniform_date<R: Rng + ?Sized>(rng: &mut R, from: NaiveDate, to: NaiveDate) -> NaiveDate {
    let span = (to - from).num_days();
    if span <= 0 {
        return from;
    }
    from + Duration::days(rng.random_range(0..=span))
}

/// Draw a Poisson-distributed count.
///
/// A mean that is not strictly positive and finite yields zero.
pub fn poisson<R: Rng + ?Sized>(rng: &mut R, mean: f64) -> u32 {
    if !(mean.is_finite() && mean > 0.0) {
        return 0;
    }
    match Poisson::new(mean) {
        Ok(dist) => dist.sample(rng) as u32,
        Err(_) => 0,
    }
}

/// Clamp a probability to `[0, 1]`, warning when the input was out of range.
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        warn!("NaN probability treated as 0");
        return 0.0;
    }
    let clamped = p.clamp(0.0, 1.0);
    if clamped != p {
        warn!(probability = p, clamped, "Probability out of range, clamped");
    }
    clamped
}

/// Bernoulli draw with a clamped probability.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.random::<f64>() < clamp_probability(p)
}
