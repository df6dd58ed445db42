//! Seed sources for synthesis requests.

use super::types::MAX_SEED;
use rand::Rng;

/// Supplies the per-request `seed`.
pub trait SeedSource: Send + Sync {
    fn next_seed(&self) -> u64;
}

/// Uniform draw from `0..=MAX_SEED` using the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSeed;

impl SeedSource for ThreadRngSeed {
    fn next_seed(&self) -> u64 {
        rand::thread_rng().gen_range(0..=MAX_SEED)
    }
}

/// Always returns the same seed.
#[derive(Debug, Clone, Copy)]
pub struct FixedSeed(pub u64);

impl SeedSource for FixedSeed {
    fn next_seed(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_rng_seed_in_range() {
        let source = ThreadRngSeed;
        for _ in 0..1000 {
            assert!(source.next_seed() <= MAX_SEED);
        }
    }

    #[test]
    fn test_fixed_seed() {
        assert_eq!(FixedSeed(7).next_seed(), 7);
    }
}
