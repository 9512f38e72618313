//! Standard crossover and mutation operators.
//!
//! These work on any gene type and are exposed both as free functions over
//! genome slices and as strategy structs the engine can hold.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: cut at one point in `[1, L-1]`, swap tails
//! - [`uniform_crossover`]: pick each locus from either parent independently
//!
//! # Mutation Operators
//!
//! - [`random_reset`]: overwrite one random locus from the gene pool
//! - [`swap_mutation`]: exchange two random loci
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use super::error::{GaError, Result};
use super::individual::Individual;
use super::types::{CrossoverStrategy, GenePool, MutationStrategy};
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover.
///
/// Picks a cut uniformly in `[1, L-1]` and returns
/// `(parent1[..cut] + parent2[cut..], parent2[..cut] + parent1[cut..])`.
/// Both parents must have the same length `L >= 2`.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn single_point_crossover<G: Clone>(
    parent1: &[G],
    parent2: &[G],
    rng: &mut dyn RngCore,
) -> Result<(Vec<G>, Vec<G>)> {
    let n = check_parents(parent1, parent2, 2)?;
    let cut = rng.random_range(1..n);
    Ok(splice_at(parent1, parent2, cut))
}

/// Swaps the tails of two equal-length genomes at `cut`.
///
/// `cut == 0` or `cut == L` reproduces the parents unchanged.
pub fn splice_at<G: Clone>(parent1: &[G], parent2: &[G], cut: usize) -> (Vec<G>, Vec<G>) {
    let mut child1 = Vec::with_capacity(parent1.len());
    child1.extend_from_slice(&parent1[..cut]);
    child1.extend_from_slice(&parent2[cut..]);

    let mut child2 = Vec::with_capacity(parent2.len());
    child2.extend_from_slice(&parent2[..cut]);
    child2.extend_from_slice(&parent1[cut..]);

    (child1, child2)
}

/// Uniform crossover.
///
/// Child 1 takes each gene from `parent1` with the given probability,
/// otherwise from `parent2`; child 2 receives the complementary gene.
pub fn uniform_crossover<G: Clone>(
    parent1: &[G],
    parent2: &[G],
    probability: f64,
    rng: &mut dyn RngCore,
) -> Result<(Vec<G>, Vec<G>)> {
    let probability = check_probability(probability)?;
    let n = check_parents(parent1, parent2, 1)?;
    let mut child1 = Vec::with_capacity(n);
    let mut child2 = Vec::with_capacity(n);
    for (a, b) in parent1.iter().zip(parent2) {
        if rng.random_bool(probability) {
            child1.push(a.clone());
            child2.push(b.clone());
        } else {
            child1.push(b.clone());
            child2.push(a.clone());
        }
    }
    Ok((child1, child2))
}

fn check_parents<G>(parent1: &[G], parent2: &[G], min: usize) -> Result<usize> {
    let n = parent1.len();
    if parent2.len() != n {
        return Err(GaError::GenomeLengthMismatch {
            expected: n,
            found: parent2.len(),
        });
    }
    if n < min {
        return Err(GaError::GenomeTooShort { len: n, min });
    }
    Ok(n)
}

fn check_probability(probability: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(GaError::ProbabilityOutOfRange(probability));
    }
    Ok(probability)
}

/// Children inherit the first parent's mutation rate.
fn offspring<G>(parent1: &Individual<G>, (a, b): (Vec<G>, Vec<G>)) -> Result<Vec<Individual<G>>> {
    let rate = parent1.mutation_rate();
    Ok(vec![Individual::new(a, rate)?, Individual::new(b, rate)?])
}

/// Single-point crossover strategy, the engine's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinglePointCrossover;

impl<G: Clone> CrossoverStrategy<G> for SinglePointCrossover {
    fn crossover(
        &self,
        parent1: &Individual<G>,
        parent2: &Individual<G>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual<G>>> {
        let children = single_point_crossover(parent1.genome(), parent2.genome(), rng)?;
        offspring(parent1, children)
    }
}

/// Uniform crossover strategy.
///
/// ```
/// use u_evolve::ga::UniformCrossover;
///
/// assert!(UniformCrossover::new(0.5).is_ok());
/// assert!(UniformCrossover::new(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformCrossover {
    probability: f64,
}

impl UniformCrossover {
    /// `probability` is the chance that child 1 takes a locus from parent 1.
    pub fn new(probability: f64) -> Result<Self> {
        Ok(Self {
            probability: check_probability(probability)?,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Default for UniformCrossover {
    fn default() -> Self {
        Self { probability: 0.5 }
    }
}

impl<G: Clone> CrossoverStrategy<G> for UniformCrossover {
    fn crossover(
        &self,
        parent1: &Individual<G>,
        parent2: &Individual<G>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual<G>>> {
        let children =
            uniform_crossover(parent1.genome(), parent2.genome(), self.probability, rng)?;
        offspring(parent1, children)
    }
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Random-reset mutation.
///
/// Picks a locus uniformly in `[0, L-1]` (both ends inclusive) and overwrites
/// it with a value drawn uniformly from the pool's candidates for that locus.
/// A single-gene genome always mutates locus 0.
///
/// An empty pool, or a locus without candidates, leaves the genome untouched.
/// An empty genome is rejected with [`GaError::EmptyGenome`].
pub fn random_reset<G: Clone>(
    genome: &mut [G],
    pool: &GenePool<G>,
    rng: &mut dyn RngCore,
) -> Result<()> {
    if genome.is_empty() {
        return Err(GaError::EmptyGenome);
    }
    if pool.is_empty() {
        return Ok(());
    }

    let locus = rng.random_range(0..genome.len());
    if let Some(gene) = pool.candidates(locus).choose(rng) {
        genome[locus] = gene.clone();
    }
    Ok(())
}

/// Swap mutation: exchange two random loci.
///
/// Ignores the gene pool, so it suits permutation genomes. The two loci may
/// coincide, in which case the genome is unchanged.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<G>(genome: &mut [G], rng: &mut dyn RngCore) -> Result<()> {
    let n = genome.len();
    if n == 0 {
        return Err(GaError::EmptyGenome);
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    genome.swap(i, j);
    Ok(())
}

/// Random-reset mutation strategy, the engine's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomResetMutation;

impl<G: Clone> MutationStrategy<G> for RandomResetMutation {
    fn mutate(&self, genome: &mut [G], pool: &GenePool<G>, rng: &mut dyn RngCore) -> Result<()> {
        random_reset(genome, pool, rng)
    }
}

/// Swap mutation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapMutation;

impl<G> MutationStrategy<G> for SwapMutation {
    fn mutate(&self, genome: &mut [G], _pool: &GenePool<G>, rng: &mut dyn RngCore) -> Result<()> {
        swap_mutation(genome, rng)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::collections::HashSet;

    /// Tag genes with their parent so origins can be checked after crossover.
    fn labelled(tag: char, n: usize) -> Vec<(char, usize)> {
        (0..n).map(|i| (tag, i)).collect()
    }

    // ---- Single-point crossover ----

    #[test]
    fn test_single_point_children_are_complete() {
        let mut rng = create_rng(42);
        let p1 = labelled('a', 8);
        let p2 = labelled('b', 8);

        for _ in 0..200 {
            let (c1, c2) = single_point_crossover(&p1, &p2, &mut rng).unwrap();
            assert_eq!(c1.len(), 8);
            assert_eq!(c2.len(), 8);

            // Each locus keeps its position and comes from exactly one parent.
            for i in 0..8 {
                assert_eq!(c1[i].1, i);
                assert_eq!(c2[i].1, i);
                assert_ne!(c1[i].0, c2[i].0);
            }

            // Child 1 is an `a` prefix followed by a non-empty `b` suffix.
            let cut = c1.iter().position(|g| g.0 == 'b').unwrap();
            assert!((1..8).contains(&cut), "cut {cut} outside [1, 7]");
            assert!(c1[cut..].iter().all(|g| g.0 == 'b'));
            assert!(c2[..cut].iter().all(|g| g.0 == 'b'));
            assert!(c2[cut..].iter().all(|g| g.0 == 'a'));
        }
    }

    #[test]
    fn test_single_point_covers_both_boundaries() {
        let mut rng = create_rng(7);
        let p1 = vec![0u8; 5];
        let p2 = vec![1u8; 5];
        let mut cuts = HashSet::new();
        for _ in 0..500 {
            let (c1, _) = single_point_crossover(&p1, &p2, &mut rng).unwrap();
            cuts.insert(c1.iter().filter(|&&g| g == 0).count());
        }
        let expected: HashSet<usize> = (1..5).collect();
        assert_eq!(cuts, expected);
    }

    #[test]
    fn test_single_point_two_genes() {
        let mut rng = create_rng(42);
        let (c1, c2) = single_point_crossover(&[1, 2], &[3, 4], &mut rng).unwrap();
        assert_eq!(c1, vec![1, 4]);
        assert_eq!(c2, vec![3, 2]);
    }

    #[test]
    fn test_single_point_rejects_short_genome() {
        let mut rng = create_rng(42);
        assert_eq!(
            single_point_crossover(&[1], &[2], &mut rng),
            Err(GaError::GenomeTooShort { len: 1, min: 2 })
        );
    }

    #[test]
    fn test_single_point_rejects_length_mismatch() {
        let mut rng = create_rng(42);
        assert_eq!(
            single_point_crossover(&[1, 2, 3], &[4, 5], &mut rng),
            Err(GaError::GenomeLengthMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_splice_at_edges() {
        let (c1, c2) = splice_at(&[1, 2, 3], &[4, 5, 6], 0);
        assert_eq!((c1, c2), (vec![4, 5, 6], vec![1, 2, 3]));
        let (c1, c2) = splice_at(&[1, 2, 3], &[4, 5, 6], 3);
        assert_eq!((c1, c2), (vec![1, 2, 3], vec![4, 5, 6]));
        let (c1, c2) = splice_at(&[1, 2, 3], &[4, 5, 6], 1);
        assert_eq!((c1, c2), (vec![1, 5, 6], vec![4, 2, 3]));
    }

    #[test]
    fn test_strategy_children_inherit_first_parent_rate() {
        let mut rng = create_rng(42);
        let p1 = Individual::new(vec![1, 2, 3], 0.25).unwrap();
        let p2 = Individual::new(vec![4, 5, 6], 0.75).unwrap();
        for strategy in [
            &SinglePointCrossover as &dyn CrossoverStrategy<i32>,
            &UniformCrossover::default(),
        ] {
            let children = strategy.crossover(&p1, &p2, &mut rng).unwrap();
            assert_eq!(children.len(), 2);
            for child in &children {
                assert!((child.mutation_rate() - 0.25).abs() < 1e-12);
                assert_eq!(child.fitness(), None);
                assert_eq!(child.len(), 3);
            }
        }
    }

    // ---- Uniform crossover ----

    #[test]
    fn test_uniform_children_are_complementary() {
        let mut rng = create_rng(3);
        let p1 = labelled('a', 16);
        let p2 = labelled('b', 16);
        for _ in 0..50 {
            let (c1, c2) = uniform_crossover(&p1, &p2, 0.5, &mut rng).unwrap();
            for i in 0..16 {
                assert_eq!(c1[i].1, i);
                assert_eq!(c2[i].1, i);
                assert_ne!(c1[i].0, c2[i].0);
            }
        }
    }

    #[test]
    fn test_uniform_extreme_probabilities() {
        let mut rng = create_rng(3);
        let (c1, c2) = uniform_crossover(&[1, 2, 3], &[4, 5, 6], 1.0, &mut rng).unwrap();
        assert_eq!((c1, c2), (vec![1, 2, 3], vec![4, 5, 6]));
        let (c1, c2) = uniform_crossover(&[1, 2, 3], &[4, 5, 6], 0.0, &mut rng).unwrap();
        assert_eq!((c1, c2), (vec![4, 5, 6], vec![1, 2, 3]));
    }

    #[test]
    fn test_uniform_rejects_probability_outside_unit_interval() {
        let mut rng = create_rng(3);
        assert_eq!(
            uniform_crossover(&[1, 2, 3], &[4, 5, 6], 1.5, &mut rng),
            Err(GaError::ProbabilityOutOfRange(1.5))
        );
        assert_eq!(
            uniform_crossover(&[1, 2, 3], &[4, 5, 6], -0.5, &mut rng),
            Err(GaError::ProbabilityOutOfRange(-0.5))
        );
        assert!(uniform_crossover(&[1, 2, 3], &[4, 5, 6], f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn test_uniform_probability_validation() {
        assert_eq!(
            UniformCrossover::new(-0.1),
            Err(GaError::ProbabilityOutOfRange(-0.1))
        );
        assert!(UniformCrossover::new(0.0).is_ok());
        assert!((UniformCrossover::new(1.0).unwrap().probability() - 1.0).abs() < 1e-12);
    }

    // ---- Random reset ----

    #[test]
    fn test_random_reset_hits_both_boundaries() {
        let mut rng = create_rng(42);
        let pool = GenePool::from(vec![9]);
        let mut touched = HashSet::new();
        for _ in 0..500 {
            let mut genome = vec![0, 0, 0, 0, 0];
            random_reset(&mut genome, &pool, &mut rng).unwrap();
            let changed: Vec<usize> = (0..5).filter(|&i| genome[i] == 9).collect();
            assert_eq!(changed.len(), 1, "exactly one locus must change: {genome:?}");
            touched.insert(changed[0]);
        }
        assert!(touched.contains(&0), "first locus never mutated");
        assert!(touched.contains(&4), "last locus never mutated");
        assert_eq!(touched.len(), 5);
    }

    #[test]
    fn test_random_reset_single_gene() {
        let mut rng = create_rng(42);
        let mut genome = vec![1];
        random_reset(&mut genome, &GenePool::from(vec![7]), &mut rng).unwrap();
        assert_eq!(genome, vec![7]);
    }

    #[test]
    fn test_random_reset_empty_pool_is_noop() {
        let mut rng = create_rng(42);
        let mut genome = vec![1, 2, 3];
        for _ in 0..100 {
            random_reset(&mut genome, &GenePool::empty(), &mut rng).unwrap();
        }
        assert_eq!(genome, vec![1, 2, 3]);
    }

    #[test]
    fn test_random_reset_empty_genome_rejected() {
        let mut rng = create_rng(42);
        let mut genome: Vec<u8> = vec![];
        assert_eq!(
            random_reset(&mut genome, &GenePool::from(vec![1]), &mut rng),
            Err(GaError::EmptyGenome)
        );
    }

    #[test]
    fn test_random_reset_per_locus_pool() {
        let mut rng = create_rng(11);
        let pool = GenePool::PerLocus(vec![vec![10, 11], vec![20, 21]]);
        for _ in 0..200 {
            let mut genome = vec![0, 0];
            random_reset(&mut genome, &pool, &mut rng).unwrap();
            assert!(genome[0] == 0 || genome[0] == 10 || genome[0] == 11);
            assert!(genome[1] == 0 || genome[1] == 20 || genome[1] == 21);
        }
    }

    #[test]
    fn test_random_reset_locus_without_candidates() {
        let mut rng = create_rng(11);
        let pool = GenePool::PerLocus(vec![vec![], vec![5]]);
        for _ in 0..100 {
            let mut genome = vec![0, 0];
            random_reset(&mut genome, &pool, &mut rng).unwrap();
            assert_eq!(genome[0], 0);
        }
    }

    // ---- Swap ----

    #[test]
    fn test_swap_preserves_genes() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut genome: Vec<usize> = (0..10).collect();
            swap_mutation(&mut genome, &mut rng).unwrap();
            let mut sorted = genome.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..10).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_swap_single_and_empty() {
        let mut rng = create_rng(42);
        let mut genome = vec![0];
        swap_mutation(&mut genome, &mut rng).unwrap();
        assert_eq!(genome, vec![0]);
        let mut empty: Vec<u8> = vec![];
        assert_eq!(swap_mutation(&mut empty, &mut rng), Err(GaError::EmptyGenome));
    }
}
