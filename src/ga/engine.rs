//! GA evolutionary loop execution.
//!
//! [`Engine`] owns the population and the strategies and drives one
//! generation at a time:
//! select → shuffle → pair → crossover → mutate → rank → update best → trim.

use super::codec::{Codec, IdentityCodec};
use super::config::EngineConfig;
use super::error::{GaError, Result};
use super::generations::{Emit, Generations};
use super::individual::Individual;
use super::operators::{RandomResetMutation, SinglePointCrossover};
use super::selection::TruncationSelection;
use super::types::{
    CrossoverStrategy, FitnessFunction, GenePool, MutationStrategy, SelectionStrategy,
};
use crate::random::rng_from_seed;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Upper bound on the fitness history reserved up front by [`Engine::run`].
const HISTORY_RESERVE: usize = 1024;

/// Result of [`Engine::run`].
#[derive(Debug, Clone)]
pub struct RunSummary<G> {
    /// The best individual found during the entire run.
    pub best: Individual<G>,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Best-ever fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Generational genetic algorithm engine.
///
/// `G` is the gene type and `P` the decoded representation handed to the
/// fitness function (the genome itself, `Vec<G>`, unless a custom
/// [`Codec`] is installed).
///
/// # Usage
///
/// ```
/// use u_evolve::ga::{Engine, GenePool, Individual};
///
/// let mut engine = Engine::builder()
///     .fitness(|genes: &Vec<i64>| genes.iter().sum::<i64>() as f64)
///     .gene_pool(GenePool::Shared((0..10).collect()))
///     .seed(42)
///     .build()?;
///
/// for genes in [[1, 2], [3, 4], [5, 6], [7, 8]] {
///     engine.add_individual(Individual::new(genes.to_vec(), 0.5)?);
/// }
///
/// let summary = engine.run(20)?;
/// assert_eq!(engine.population().len(), 4);
/// assert!(summary.best_fitness >= 15.0);
/// # Ok::<(), u_evolve::ga::GaError>(())
/// ```
pub struct Engine<G, P = Vec<G>> {
    codec: Box<dyn Codec<G, Phenotype = P>>,
    fitness: Box<dyn FitnessFunction<P>>,
    selection: Box<dyn SelectionStrategy<G>>,
    crossover: Box<dyn CrossoverStrategy<G>>,
    mutation: Box<dyn MutationStrategy<G>>,
    gene_pool: GenePool<G>,
    config: EngineConfig,
    rng: StdRng,
    population: Vec<Individual<G>>,
    target_size: Option<usize>,
    best_ever: Option<Individual<G>>,
    generation: usize,
}

impl<G: Clone + 'static> Engine<G, Vec<G>> {
    /// Starts building an engine whose fitness function sees raw genomes.
    pub fn builder() -> EngineBuilder<G> {
        EngineBuilder::new()
    }
}

impl<G: Clone, P> Engine<G, P> {
    /// Appends an individual to the population.
    ///
    /// Meant for assembling the initial population before
    /// [`initialize`](Self::initialize), [`run`](Self::run) or
    /// [`generations`](Self::generations).
    pub fn add_individual(&mut self, individual: Individual<G>) {
        self.population.push(individual);
    }

    /// Encodes raw fields with the engine's codec.
    pub fn encode(&self, phenotype: P, mutation_rate: f64) -> Result<Individual<G>> {
        Individual::encode(self.codec.as_ref(), phenotype, mutation_rate)
    }

    /// Decodes an individual with the engine's codec.
    pub fn decode(&self, individual: &Individual<G>) -> P {
        individual.decode(self.codec.as_ref())
    }

    /// Scores an individual without touching its cached fitness.
    pub fn evaluate(&self, individual: &Individual<G>) -> Result<f64> {
        let score = self.fitness.fitness(&self.decode(individual));
        if score.is_nan() {
            return Err(GaError::NanFitness);
        }
        Ok(score)
    }

    /// The current population, best first after each ranking pass.
    pub fn population(&self) -> &[Individual<G>] {
        &self.population
    }

    /// Current top-ranked individual.
    pub fn best_individual(&self) -> Option<&Individual<G>> {
        self.population.first()
    }

    /// Current bottom-ranked individual.
    pub fn worst_individual(&self) -> Option<&Individual<G>> {
        self.population.last()
    }

    /// Best individual observed since the last [`initialize`](Self::initialize).
    pub fn best_individual_ever(&self) -> Option<&Individual<G>> {
        self.best_ever.as_ref()
    }

    /// Population size captured by [`initialize`](Self::initialize).
    pub fn target_size(&self) -> Option<usize> {
        self.target_size
    }

    /// Number of generations completed since initialization.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.target_size.is_some()
    }

    /// Ranks the population and records the run's starting state.
    ///
    /// Captures the target population size, sets the best-ever record to the
    /// top individual and resets the generation counter. Calling it again
    /// mid-run re-captures the *current* population size.
    pub fn initialize(&mut self) -> Result<()> {
        let expected = self
            .population
            .first()
            .ok_or(GaError::EmptyPopulation)?
            .len();
        if let Some(other) = self.population.iter().find(|ind| ind.len() != expected) {
            return Err(GaError::GenomeLengthMismatch {
                expected,
                found: other.len(),
            });
        }

        let mut population = std::mem::take(&mut self.population);
        let ranked = self.rank(&mut population);
        self.population = population;
        ranked?;

        self.target_size = Some(self.population.len());
        self.best_ever = self.population.first().cloned();
        self.generation = 0;

        tracing::info!(
            population = self.population.len(),
            genome_length = expected,
            best = self.best_ever_fitness(),
            "initialized first generation"
        );
        Ok(())
    }

    /// Performs one generation step.
    ///
    /// On error the population is left as it was before the step.
    pub fn step(&mut self) -> Result<()> {
        let target_size = self.target_size.ok_or(GaError::NotInitialized)?;

        // 1. Select
        let mut parents = self.selection.select(&self.population, &mut self.rng)?;
        if parents.len() % 2 != 0 {
            return Err(GaError::OddSelection { len: parents.len() });
        }

        // 2. Shuffle
        parents.shuffle(&mut self.rng);

        // 3. Reproduce
        let mut offspring = Vec::with_capacity(parents.len());
        for pair in parents.chunks_exact(2) {
            offspring.extend(self.crossover.crossover(&pair[0], &pair[1], &mut self.rng)?);
        }
        if offspring.len() < target_size {
            return Err(GaError::PopulationShrank {
                expected: target_size,
                found: offspring.len(),
            });
        }

        // 4. Mutate
        for individual in offspring.iter_mut() {
            self.mutate_individual(individual)?;
        }

        // 5. Rank
        self.rank(&mut offspring)?;
        self.population = offspring;

        // 6. Update best-ever
        self.update_best_ever();

        // 7. Trim
        self.population.truncate(target_size);

        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            best = self.best_individual().map(Individual::rank_key),
            worst = self.worst_individual().map(Individual::rank_key),
            best_ever = self.best_ever_fitness(),
            "generation complete"
        );
        Ok(())
    }

    /// Initializes and runs `generations` steps.
    ///
    /// `generations == 0` runs until an error occurs. Such a run never
    /// returns a summary, so it records no fitness history.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn run(&mut self, generations: usize) -> Result<RunSummary<G>> {
        self.initialize()?;

        let bounded = generations > 0;
        let mut fitness_history =
            Vec::with_capacity(generations.min(HISTORY_RESERVE).saturating_add(1));
        fitness_history.push(self.best_ever_fitness());

        while !bounded || self.generation < generations {
            self.step()?;
            if bounded {
                fitness_history.push(self.best_ever_fitness());
            }
        }

        let best = self.best_ever.clone().ok_or(GaError::EmptyPopulation)?;
        tracing::info!(
            generations = self.generation,
            best_fitness = best.rank_key(),
            "run complete"
        );
        Ok(RunSummary {
            best_fitness: best.rank_key(),
            best,
            generations: self.generation,
            fitness_history,
        })
    }

    /// Returns a lazy sequence of generations.
    ///
    /// Nothing happens until the first `next()`, which initializes the engine.
    /// Each `next()` then performs exactly one generation step and yields the
    /// best individual or the whole population, depending on `emit`.
    /// `generations == 0` yields indefinitely.
    ///
    /// ```
    /// use u_evolve::ga::{Emit, Engine, GenePool, Individual};
    ///
    /// let mut engine = Engine::builder()
    ///     .fitness(|genes: &Vec<u8>| genes.iter().map(|&g| g as f64).sum::<f64>())
    ///     .gene_pool(GenePool::Shared(vec![0, 1]))
    ///     .seed(1)
    ///     .build()?;
    /// for _ in 0..6 {
    ///     engine.add_individual(Individual::new(vec![0, 0, 0, 0], 0.8)?);
    /// }
    ///
    /// for snapshot in engine.generations(5, Emit::Population) {
    ///     assert_eq!(snapshot?.individuals().len(), 6);
    /// }
    /// assert_eq!(engine.generation(), 5);
    /// # Ok::<(), u_evolve::ga::GaError>(())
    /// ```
    pub fn generations(&mut self, generations: usize, emit: Emit) -> Generations<'_, G, P> {
        Generations::new(self, generations, emit)
    }

    /// Evaluates every individual and sorts best first.
    ///
    /// The sort is stable, so ties keep their collection order.
    fn rank(&self, population: &mut [Individual<G>]) -> Result<()> {
        for individual in population.iter_mut() {
            let score = self.evaluate(individual)?;
            individual.set_fitness(score);
        }
        population.sort_by(|a, b| b.rank_key().total_cmp(&a.rank_key()));
        Ok(())
    }

    fn mutate_individual(&mut self, individual: &mut Individual<G>) -> Result<()> {
        if !self.config.elitist_mutation {
            individual.mutate(self.mutation.as_ref(), &self.gene_pool, &mut self.rng)?;
            return Ok(());
        }

        let snapshot = individual.clone();
        if !individual.mutate(self.mutation.as_ref(), &self.gene_pool, &mut self.rng)? {
            return Ok(());
        }

        let before = self.evaluate(&snapshot)?;
        let after = self.evaluate(individual)?;
        if before > after {
            tracing::trace!(before, after, "mutation reverted");
            *individual = snapshot;
        }
        Ok(())
    }

    fn update_best_ever(&mut self) {
        let Some(top) = self.population.first() else {
            return;
        };
        let improved = match &self.best_ever {
            Some(best) => top.rank_key() > best.rank_key(),
            None => true,
        };
        if improved {
            self.best_ever = Some(top.clone());
        }
    }

    fn best_ever_fitness(&self) -> f64 {
        self.best_ever
            .as_ref()
            .map(Individual::rank_key)
            .unwrap_or(f64::NEG_INFINITY)
    }
}

/// Builds an [`Engine`].
///
/// The fitness function is the only required piece; every other strategy
/// falls back to a standard implementation:
///
/// | Extension point | Default |
/// |---|---|
/// | codec | [`IdentityCodec`] |
/// | selection | [`TruncationSelection`] |
/// | crossover | [`SinglePointCrossover`] |
/// | mutation | [`RandomResetMutation`] |
/// | gene pool | empty (mutation is a no-op) |
pub struct EngineBuilder<G, P = Vec<G>> {
    codec: Box<dyn Codec<G, Phenotype = P>>,
    fitness: Option<Box<dyn FitnessFunction<P>>>,
    selection: Box<dyn SelectionStrategy<G>>,
    crossover: Box<dyn CrossoverStrategy<G>>,
    mutation: Box<dyn MutationStrategy<G>>,
    gene_pool: GenePool<G>,
    config: EngineConfig,
}

impl<G: Clone + 'static> EngineBuilder<G, Vec<G>> {
    pub fn new() -> Self {
        Self::with_codec(IdentityCodec::new())
    }
}

impl<G: Clone + 'static> Default for EngineBuilder<G, Vec<G>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Clone + 'static, P> EngineBuilder<G, P> {
    /// Starts building an engine that decodes genomes with `codec`.
    pub fn with_codec<C>(codec: C) -> Self
    where
        C: Codec<G, Phenotype = P> + 'static,
    {
        Self {
            codec: Box::new(codec),
            fitness: None,
            selection: Box::new(TruncationSelection),
            crossover: Box::new(SinglePointCrossover),
            mutation: Box::new(RandomResetMutation),
            gene_pool: GenePool::empty(),
            config: EngineConfig::default(),
        }
    }

    pub fn fitness<F>(mut self, fitness: F) -> Self
    where
        F: FitnessFunction<P> + 'static,
    {
        self.fitness = Some(Box::new(fitness));
        self
    }

    pub fn selection<S>(mut self, selection: S) -> Self
    where
        S: SelectionStrategy<G> + 'static,
    {
        self.selection = Box::new(selection);
        self
    }

    pub fn crossover<X>(mut self, crossover: X) -> Self
    where
        X: CrossoverStrategy<G> + 'static,
    {
        self.crossover = Box::new(crossover);
        self
    }

    pub fn mutation<M>(mut self, mutation: M) -> Self
    where
        M: MutationStrategy<G> + 'static,
    {
        self.mutation = Box::new(mutation);
        self
    }

    /// Sets the admissible replacement values used by mutation.
    pub fn gene_pool(mut self, pool: impl Into<GenePool<G>>) -> Self {
        self.gene_pool = pool.into();
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Shorthand for `config.with_seed(seed)`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Shorthand for `config.with_elitist_mutation(enabled)`.
    pub fn elitist_mutation(mut self, enabled: bool) -> Self {
        self.config.elitist_mutation = enabled;
        self
    }

    /// Builds the engine with an empty population.
    ///
    /// Fails with [`GaError::MissingFitness`] when no fitness function was set.
    pub fn build(self) -> Result<Engine<G, P>> {
        let fitness = self.fitness.ok_or(GaError::MissingFitness)?;
        Ok(Engine {
            codec: self.codec,
            fitness,
            selection: self.selection,
            crossover: self.crossover,
            mutation: self.mutation,
            gene_pool: self.gene_pool,
            rng: rng_from_seed(self.config.seed),
            config: self.config,
            population: Vec::new(),
            target_size: None,
            best_ever: None,
            generation: 0,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
