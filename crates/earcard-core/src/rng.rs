//! Randomness sources for card generation.
//!
//! Generation takes any `rand::Rng`; sessions use PCG32 so a seed reproduces
//! the exact card sequence.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 64-bit seed.
pub fn create_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Creates a PCG32 RNG seeded from the operating system.
pub fn entropy_rng() -> Pcg32 {
    Pcg32::from_entropy()
}
