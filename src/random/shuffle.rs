//! Fisher–Yates shuffling and seed derivation.

use super::mersenne_twister::MersenneTwister64;
use super::source::RandomSource;

/// Shuffles `items` in place.
///
/// Walks from the last index down to 1, swapping each element with a
/// uniformly chosen element at or before it. Consumes exactly
/// `items.len() - 1` draws from `rng` (none for fewer than two items).
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.next_below(i as u64 + 1) as usize;
        items.swap(i, j);
    }
}

/// Seeds of the two independent generators a task is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubSeeds {
    pub keys: u64,
    pub text: u64,
}

/// Derives the key and text sub-seeds from a task seed.
///
/// The root generator is drawn in a fixed order: key seed first, text seed
/// second. Changing this order changes every generated task.
pub fn derive_sub_seeds(seed: u64) -> SubSeeds {
    let mut root = MersenneTwister64::with_seed(seed);
    let keys = root.next_u64();
    let text = root.next_u64();
    SubSeeds { keys, text }
}
