//! Seeded randomness for task generation.
//!
//! Provides the deterministic generator that every task is replayed from,
//! together with shuffling and sub-seed derivation built on top of it.

pub mod mersenne_twister;
pub mod shuffle;
pub mod source;

pub use mersenne_twister::MersenneTwister64;
pub use shuffle::{derive_sub_seeds, shuffle, SubSeeds};
pub use source::RandomSource;
