//! Deterministic simulation-level RNG wrapper.
//!
//! Used only when generating scenes (random fleets); the tick loop itself is
//! fully deterministic and never draws random numbers.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG.  The same seed always produces the same sequence.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
