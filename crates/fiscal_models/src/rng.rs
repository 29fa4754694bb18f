//! Seeded random number generation for trajectory simulation.
//!
//! Reproducibility contract: identical (seed, calibration) produce an
//! identical driver path bit-for-bit. All randomness flows through
//! [`SimRng`]; there is no implicit global random state anywhere in the
//! workspace. Trajectory seeds are derived deterministically from a
//! master seed plus the trajectory index, so a whole ensemble is
//! reproducible from one number.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// Seeded generator owned by exactly one trajectory.
///
/// Thin wrapper over `StdRng` with batch normal sampling, mirroring how
/// the rest of the workspace consumes randomness: fill a pre-allocated
/// buffer per period, never sample ad hoc.
pub struct SimRng {
    inner: StdRng,
    seed: u64,
}

impl SimRng {
    /// Creates a generator from a 64-bit seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was initialised with.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws one standard normal variate.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills `buffer` with independent standard normal variates.
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for slot in buffer.iter_mut() {
            *slot = StandardNormal.sample(&mut self.inner);
        }
    }
}

/// Derives the seed for trajectory `index` from the run's master seed.
///
/// SplitMix64 finalizer over `master_seed + index`: cheap, stateless,
/// and well-mixed, so adjacent indices do not produce correlated
/// `StdRng` streams.
#[inline]
pub fn derive_trajectory_seed(master_seed: u64, index: u64) -> u64 {
    let mut z = master_seed
        .wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::from_seed(42);
        let mut b = SimRng::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.gen_normal(), b.gen_normal());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SimRng::from_seed(1);
        let mut b = SimRng::from_seed(2);
        let draws_a: Vec<f64> = (0..16).map(|_| a.gen_normal()).collect();
        let draws_b: Vec<f64> = (0..16).map(|_| b.gen_normal()).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn fill_normal_matches_single_draws() {
        let mut batch = SimRng::from_seed(7);
        let mut single = SimRng::from_seed(7);

        let mut buffer = vec![0.0; 32];
        batch.fill_normal(&mut buffer);
        for &value in &buffer {
            assert_eq!(value, single.gen_normal());
        }
    }

    #[test]
    fn derived_seeds_are_distinct_and_stable() {
        let s0 = derive_trajectory_seed(42, 0);
        let s1 = derive_trajectory_seed(42, 1);
        let s2 = derive_trajectory_seed(42, 2);
        assert_ne!(s0, s1);
        assert_ne!(s1, s2);
        // Stable across calls.
        assert_eq!(s0, derive_trajectory_seed(42, 0));
        // Different master seeds shift the whole family.
        assert_ne!(s0, derive_trajectory_seed(43, 0));
    }
}
