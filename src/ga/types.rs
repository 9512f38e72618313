//! Strategy traits for the GA engine.
//!
//! Each extension point of the generation pipeline is a trait with a single
//! method. The engine stores them as trait objects chosen at build time, so
//! they receive the random source as `&mut dyn RngCore`.
//!
//! Standard implementations live in [`selection`](super::selection) and
//! [`operators`](super::operators).

use super::error::Result;
use super::individual::Individual;
use rand::RngCore;

/// Scores a decoded genome. Higher is better.
///
/// Implemented for every `Fn(&P) -> f64`, so a closure is usually enough:
///
/// ```
/// use u_evolve::ga::FitnessFunction;
///
/// let sum = |genes: &Vec<i64>| genes.iter().sum::<i64>() as f64;
/// assert_eq!(sum.fitness(&vec![1, 2, 3]), 6.0);
/// ```
///
/// Evaluation is assumed synchronous and infallible. A panic inside the
/// function aborts the current generation and propagates to the caller.
pub trait FitnessFunction<P> {
    fn fitness(&self, phenotype: &P) -> f64;
}

impl<P, F> FitnessFunction<P> for F
where
    F: Fn(&P) -> f64,
{
    fn fitness(&self, phenotype: &P) -> f64 {
        self(phenotype)
    }
}

/// Chooses the individuals allowed to reproduce.
///
/// `ranked` is sorted descending by fitness. The returned list is shuffled and
/// consumed in pairs by the engine, so its length must be even.
pub trait SelectionStrategy<G> {
    fn select(
        &self,
        ranked: &[Individual<G>],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual<G>>>;
}

/// Combines two parents into offspring.
///
/// Standard strategies return two children. Returning more is allowed; the
/// engine trims the surplus after ranking.
pub trait CrossoverStrategy<G> {
    fn crossover(
        &self,
        parent1: &Individual<G>,
        parent2: &Individual<G>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual<G>>>;
}

/// Perturbs a genome in place.
///
/// Called only once the individual's mutation-rate draw has succeeded, so an
/// implementation should always apply its change.
pub trait MutationStrategy<G> {
    fn mutate(&self, genome: &mut [G], pool: &GenePool<G>, rng: &mut dyn RngCore) -> Result<()>;
}

/// Admissible replacement values for mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum GenePool<G> {
    /// One pool shared by every locus.
    Shared(Vec<G>),

    /// A separate candidate list per locus, indexed by gene position.
    ///
    /// Loci past the end of the list have no candidates.
    PerLocus(Vec<Vec<G>>),
}

impl<G> GenePool<G> {
    /// An empty pool. Mutation against it is a no-op.
    pub fn empty() -> Self {
        GenePool::Shared(Vec::new())
    }

    /// Candidate values for the gene at `locus`.
    pub fn candidates(&self, locus: usize) -> &[G] {
        match self {
            GenePool::Shared(genes) => genes,
            GenePool::PerLocus(loci) => loci.get(locus).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// Returns `true` when no locus has any candidate.
    pub fn is_empty(&self) -> bool {
        match self {
            GenePool::Shared(genes) => genes.is_empty(),
            GenePool::PerLocus(loci) => loci.iter().all(Vec::is_empty),
        }
    }
}

impl<G> Default for GenePool<G> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<G> From<Vec<G>> for GenePool<G> {
    fn from(genes: Vec<G>) -> Self {
        GenePool::Shared(genes)
    }
}
