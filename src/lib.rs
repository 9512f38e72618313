//! Generational evolutionary optimizer.
//!
//! Maintains a population of candidate solutions, ranks them by a
//! caller-supplied fitness function (higher is better), and produces new
//! generations through pluggable selection, crossover and mutation
//! strategies while tracking the best solution ever observed.
//!
//! - **Genome**: any fixed-length `Vec<G>`; the engine never interprets genes
//!   beyond handing decoded genomes to the fitness function.
//! - **Strategies**: one trait per extension point, with named standard
//!   implementations installed by default.
//! - **Iteration**: run a fixed number of generations, or pull generations
//!   one at a time from a lazy iterator.
//!
//! Evaluation is serial and synchronous. Seed the engine through
//! [`ga::EngineConfig::seed`] for reproducible runs.
//!
//! # Architecture
//!
//! This crate sits at Layer 2 (Algorithms) in the U-Engine ecosystem. It
//! contains no domain-specific concepts; genome encodings are defined by
//! consumers at higher layers.

pub mod ga;
pub mod random;
