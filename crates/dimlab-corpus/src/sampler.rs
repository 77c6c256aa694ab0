//! Deterministic seeded sampling of review units.

use crate::error::CorpusError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Draw a uniform sample without replacement of `min(size, units.len())`
/// elements.
///
/// Deterministic: the same `(units, size, seed)` always yields the same
/// subset in the same emission order. Rows are emitted in draw order, so
/// review order stays decorrelated from corpus order.
pub fn sample<T: Clone>(units: &[T], size: usize, seed: u64) -> Vec<T> {
    let take = size.min(units.len());
    let mut rng = StdRng::seed_from_u64(seed);
    let drawn = rand::seq::index::sample(&mut rng, units.len(), take);
    debug!(population = units.len(), requested = size, drawn = take, seed, "sample drawn");
    drawn.iter().map(|i| units[i].clone()).collect()
}

/// Validate a possibly-negative requested sample size at the boundary where
/// one can actually be typed.
///
/// The sampling API takes `usize`, so negatives are unrepresentable there;
/// this check rejects them with [`CorpusError::InvalidSampleSize`] before
/// conversion.
pub fn checked_sample_size(requested: i64) -> crate::Result<usize> {
    if requested < 0 {
        return Err(CorpusError::InvalidSampleSize(requested));
    }
    Ok(requested as usize)
}
