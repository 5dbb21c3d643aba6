//! Cumulative-weight random choice.
//!
//! Seed picking, room picking and tie-breaking all draw the same way: a uniform
//! integer in `[0, total)` walked against a running sum of weights.

use rand::Rng;

use crate::error::{FloorError, Result};

/// Pick an index into `weights` with probability proportional to its weight.
///
/// Fails with [`FloorError::DegenerateDraw`] when every weight is zero.
pub fn weighted_index(rng: &mut impl Rng, weights: &[u32]) -> Result<usize> {
    weighted_choice(rng, weights, |&w| w)
}

/// Pick an item with probability proportional to `weight(item)`.
pub fn weighted_choice<T>(
    rng: &mut impl Rng,
    items: &[T],
    weight: impl Fn(&T) -> u32,
) -> Result<usize> {
    let total: u64 = items.iter().map(|item| weight(item) as u64).sum();
    if total == 0 {
        return Err(FloorError::DegenerateDraw);
    }

    let draw = rng.gen_range(0..total);
    let mut running = 0u64;
    for (i, item) in items.iter().enumerate() {
        running += weight(item) as u64;
        if draw < running {
            return Ok(i);
        }
    }
    // Unreachable: draw < total == final running sum.
    Err(FloorError::DegenerateDraw)
}

/// Uniform index in `[0, count)`, or `None` for an empty set.
pub fn pick_uniform(rng: &mut impl Rng, count: usize) -> Option<usize> {
    if count == 0 {
        None
    } else {
        Some(rng.gen_range(0..count))
    }
}
