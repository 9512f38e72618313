//! Random source construction.
//!
//! Every random decision the engine makes (shuffle, crossover cut, mutation
//! trigger, locus and replacement gene) is drawn from a single [`StdRng`],
//! so a fixed seed reproduces a whole run.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates an RNG from an optional seed, falling back to a random seed.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
