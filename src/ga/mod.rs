//! Generational Genetic Algorithm.
//!
//! An [`Engine`] owns a population of [`Individual`]s and evolves it one
//! generation at a time. Each extension point of the loop is a trait with a
//! standard implementation, chosen when the engine is built.
//!
//! # Core Types
//!
//! - [`Individual`]: A genome plus its mutation probability
//! - [`Engine`] / [`EngineBuilder`]: Population, strategies and the loop
//! - [`EngineConfig`]: Seed and elitist mutation guard
//! - [`Generations`]: Lazy, one-step-per-pull sequence of generations
//!
//! # Extension Points
//!
//! | Trait | Standard implementations |
//! |---|---|
//! | [`FitnessFunction`] | any `Fn(&P) -> f64` |
//! | [`Codec`] | [`IdentityCodec`] |
//! | [`SelectionStrategy`] | [`TruncationSelection`], [`TournamentSelection`], [`RouletteSelection`], [`RankSelection`] |
//! | [`CrossoverStrategy`] | [`SinglePointCrossover`], [`UniformCrossover`] |
//! | [`MutationStrategy`] | [`RandomResetMutation`], [`SwapMutation`] |
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod codec;
mod config;
mod engine;
mod error;
mod generations;
mod individual;
pub mod operators;
mod selection;
mod types;

pub use codec::{Codec, IdentityCodec};
pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder, RunSummary};
pub use error::{GaError, Result};
pub use generations::{Emit, Generations, Snapshot};
pub use individual::Individual;
pub use operators::{RandomResetMutation, SinglePointCrossover, SwapMutation, UniformCrossover};
pub use selection::{RankSelection, RouletteSelection, TournamentSelection, TruncationSelection};
pub use types::{CrossoverStrategy, FitnessFunction, GenePool, MutationStrategy, SelectionStrategy};
