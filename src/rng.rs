use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Source of uniform randomness for shuffling.
///
/// The simulator only ever asks for an index in `[0, max)`, so tests can
/// plug in a fixed source and get a known permutation.
pub trait RandomSource {
    /// Generate a random integer in range [0, max)
    fn random_range(&mut self, max: usize) -> usize;

    /// Fisher-Yates shuffle for a mutable slice
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.random_range(i + 1);
            items.swap(i, j);
        }
    }
}

/// Seeded random number generator for reproducible hands
#[derive(Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new GameRng with an optional seed
    /// If seed is None, generates a random seed
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            use rand::thread_rng;
            thread_rng().gen()
        });

        let rng = ChaCha8Rng::seed_from_u64(seed);
        GameRng { rng, seed }
    }

    /// Get the seed used for this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn random_range(&mut self, max: usize) -> usize {
        self.rng.gen_range(0..max)
    }
}

/// Always picks the last slot, which makes `shuffle` the identity.
#[cfg(test)]
pub struct NoShuffle;

#[cfg(test)]
impl RandomSource for NoShuffle {
    fn random_range(&mut self, max: usize) -> usize {
        max - 1
    }
}
