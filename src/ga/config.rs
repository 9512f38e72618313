//! Engine configuration.
//!
//! [`EngineConfig`] holds the parameters of the evolutionary loop that are not
//! strategies: the random seed and the elitist mutation guard.

/// Configuration for the [`Engine`](super::Engine).
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert!(config.seed.is_none());
/// assert!(config.elitist_mutation);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_seed(42)
///     .with_elitist_mutation(false);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Reject mutations that lower an individual's own fitness.
    ///
    /// Each individual is snapshotted before mutation; if the mutated genome
    /// scores strictly worse, the snapshot is restored. This is a local
    /// hill-climb guard, not a population-wide comparison. It costs two extra
    /// fitness evaluations per mutation event.
    pub elitist_mutation: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            elitist_mutation: true,
        }
    }
}

impl EngineConfig {
    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables the elitist mutation guard.
    pub fn with_elitist_mutation(mut self, enabled: bool) -> Self {
        self.elitist_mutation = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.seed.is_none());
        assert!(config.elitist_mutation);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_seed(7)
            .with_elitist_mutation(false);
        assert_eq!(config.seed, Some(7));
        assert!(!config.elitist_mutation);
    }
}
