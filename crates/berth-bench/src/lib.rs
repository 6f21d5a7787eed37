//! Benchmark workloads for the Berth container library.
//!
//! Provides seeded, reproducible input generation so a benchmark run on one
//! machine exercises the same sequence of values and positions as on any
//! other.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `count` deterministic element values for the given seed.
pub fn seeded_values(seed: u64, count: usize) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.random_range(0..1_000_000)).collect()
}

/// Generate `count` deterministic insertion positions for a container that
/// grows from empty: the i-th position is valid for a length of `i`.
pub fn seeded_positions(seed: u64, count: usize) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|len| rng.random_range(0..=len)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_values_are_deterministic() {
        assert_eq!(seeded_values(42, 100), seeded_values(42, 100));
        assert_ne!(seeded_values(42, 100), seeded_values(43, 100));
    }

    #[test]
    fn seeded_positions_are_valid_for_a_growing_container() {
        for (len, pos) in seeded_positions(7, 64).into_iter().enumerate() {
            assert!(pos <= len);
        }
    }
}
