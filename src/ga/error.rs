//! Error type for the GA engine.

/// Errors raised by the engine and its standard strategies.
///
/// Nothing is retried: an error aborts the current generation step and is
/// returned to the caller of [`Engine::step`](super::Engine::step),
/// [`Engine::run`](super::Engine::run) or the generation iterator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    /// The engine was built without a fitness function.
    #[error("fitness function must be set before the population can be ranked")]
    MissingFitness,

    /// `initialize` was called on an empty population.
    #[error("population is empty")]
    EmptyPopulation,

    /// A generation step was requested before `initialize`.
    #[error("engine is not initialized, call initialize() first")]
    NotInitialized,

    /// Two genomes that must have the same length do not.
    #[error("genome length mismatch: expected {expected}, found {found}")]
    GenomeLengthMismatch { expected: usize, found: usize },

    /// A genome is too short for the requested operator.
    #[error("genome of length {len} is too short, at least {min} genes required")]
    GenomeTooShort { len: usize, min: usize },

    /// Mutation was applied to a genome with no genes.
    #[error("cannot mutate an empty genome")]
    EmptyGenome,

    /// The selection strategy returned a parent list that cannot be paired.
    #[error("selection returned {len} parents, an even count is required for pairing")]
    OddSelection { len: usize },

    /// Truncation selection received an odd-sized population.
    #[error("truncation selection requires an even population size, got {len}")]
    OddPopulation { len: usize },

    /// Reproduction produced fewer individuals than the target size.
    #[error("population shrank to {found}, target size is {expected}")]
    PopulationShrank { expected: usize, found: usize },

    #[error("mutation_rate must be between 0.0 and 1.0, got {0}")]
    MutationRateOutOfRange(f64),

    #[error("probability must be between 0.0 and 1.0, got {0}")]
    ProbabilityOutOfRange(f64),

    #[error("tournament size must be at least 1")]
    InvalidTournamentSize,

    /// The fitness function returned NaN, which has no rank.
    #[error("fitness function returned NaN")]
    NanFitness,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;
