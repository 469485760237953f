//! Deterministic seed mixing and the per-floor random stream used by generation.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

pub(crate) fn derive_floor_seed(run_seed: u64, floor_index: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(floor_index).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

pub(crate) fn floor_rng(run_seed: u64, floor_index: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_floor_seed(run_seed, floor_index))
}

/// Uniform draw from `min..=max`; collapses to `min` when the range is empty.
pub(crate) fn random_inclusive(rng: &mut impl Rng, min: usize, max: usize) -> usize {
    if max <= min { min } else { rng.random_range(min..=max) }
}

/// Uniform index below `len`; `0` for an empty range.
pub(crate) fn random_index(rng: &mut impl Rng, len: usize) -> usize {
    if len <= 1 { 0 } else { rng.random_range(0..len) }
}

pub(crate) fn roll_percent(rng: &mut impl Rng, chance_percent: u32) -> bool {
    rng.random_range(0..100_u32) < chance_percent
}

/// Weighted pick over `weights`; `None` when every weight is zero.
pub(crate) fn weighted_index(rng: &mut impl Rng, weights: &[u32]) -> Option<usize> {
    let total: u64 = weights.iter().map(|&weight| u64::from(weight)).sum();
    if total == 0 {
        return None;
    }
    let roll = rng.random_range(0..total);
    let mut running = 0_u64;
    for (index, &weight) in weights.iter().enumerate() {
        running += u64::from(weight);
        if roll < running {
            return Some(index);
        }
    }
    None
}
