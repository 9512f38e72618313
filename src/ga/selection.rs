//! Selection strategies for the GA.
//!
//! Selection turns the ranked population into the list of parents that the
//! engine shuffles and pairs for crossover. Every standard strategy returns
//! as many parents as it receives, which keeps the population size stable
//! when crossover emits two children per pair.
//!
//! All strategies assume **maximization** (higher fitness = better).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::error::{GaError, Result};
use super::individual::Individual;
use super::types::SelectionStrategy;
use rand::{Rng, RngCore};

/// Truncation selection, the engine's default.
///
/// Discards the lower half of the ranked population and duplicates the upper
/// half, so each of the top performers gets two reproduction slots:
/// `[r0, r1, r2, r3] -> [r0, r1, r0, r1]`.
///
/// The input must be sorted best-first and have an even length; odd sizes
/// are rejected with [`GaError::OddPopulation`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TruncationSelection;

impl<G: Clone> SelectionStrategy<G> for TruncationSelection {
    fn select(
        &self,
        ranked: &[Individual<G>],
        _rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual<G>>> {
        let n = ranked.len();
        if n % 2 != 0 {
            return Err(GaError::OddPopulation { len: n });
        }

        let survivors = &ranked[..n / 2];
        let mut parents = Vec::with_capacity(n);
        parents.extend_from_slice(survivors);
        parents.extend_from_slice(survivors);
        Ok(parents)
    }
}

/// Tournament selection: pick `size` individuals at random, keep the best.
///
/// Higher `size` = stronger selection pressure.
/// - 2: light pressure (good for diversity)
/// - 3-5: moderate pressure
/// - >5: strong pressure (risk of premature convergence)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    size: usize,
}

impl TournamentSelection {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(GaError::InvalidTournamentSize);
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl<G: Clone> SelectionStrategy<G> for TournamentSelection {
    fn select(
        &self,
        ranked: &[Individual<G>],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual<G>>> {
        Ok((0..ranked.len())
            .map(|_| ranked[tournament(ranked, self.size, rng)].clone())
            .collect())
    }
}

/// Fitness-proportionate (roulette wheel) selection.
///
/// Weights are shifted so the worst individual still gets a sliver of the
/// wheel, which keeps negative fitness values usable.
///
/// **Warning**: susceptible to super-individual dominance when fitness
/// variance is high.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouletteSelection;

impl<G: Clone> SelectionStrategy<G> for RouletteSelection {
    fn select(
        &self,
        ranked: &[Individual<G>],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual<G>>> {
        let weights = roulette_weights(ranked);
        Ok((0..ranked.len())
            .map(|_| ranked[spin(&weights, rng)].clone())
            .collect())
    }
}

/// Rank-based selection using linear ranking.
///
/// Selection probability is proportional to rank position rather than raw
/// fitness, which avoids the scaling problems of roulette selection.
///
/// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
/// Algorithms"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankSelection;

impl<G: Clone> SelectionStrategy<G> for RankSelection {
    fn select(
        &self,
        ranked: &[Individual<G>],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual<G>>> {
        let weights = rank_weights(ranked);
        Ok((0..ranked.len())
            .map(|_| ranked[spin(&weights, rng)].clone())
            .collect())
    }
}

/// Pick k random individuals, return the index of the fittest.
fn tournament<G>(population: &[Individual<G>], k: usize, rng: &mut dyn RngCore) -> usize {
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].rank_key() > population[best_idx].rank_key() {
            best_idx = idx;
        }
    }
    best_idx
}

/// weight_i = fitness_i - min_fitness + epsilon
fn roulette_weights<G>(population: &[Individual<G>]) -> Vec<f64> {
    let epsilon = 1e-10;
    let fitnesses: Vec<f64> = population
        .iter()
        .map(|ind| ind.fitness().unwrap_or(0.0))
        .collect();
    let min_fitness = fitnesses.iter().cloned().fold(f64::INFINITY, f64::min);

    fitnesses
        .iter()
        .map(|&f| {
            let w = f - min_fitness + epsilon;
            if w.is_finite() && w > 0.0 {
                w
            } else {
                epsilon
            }
        })
        .collect()
}

/// Linear ranking: the best individual weighs `n`, the worst weighs 1.
fn rank_weights<G>(population: &[Individual<G>]) -> Vec<f64> {
    let n = population.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        population[b]
            .rank_key()
            .total_cmp(&population[a].rank_key())
    });

    let mut weights = vec![0.0; n];
    for (rank, idx) in order.into_iter().enumerate() {
        weights[idx] = (n - rank) as f64;
    }
    weights
}

/// Draw an index with probability proportional to its weight.
fn spin(weights: &[f64], rng: &mut dyn RngCore) -> usize {
    let n = weights.len();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Vec<Individual<usize>> {
        fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                let mut ind = Individual::new(vec![i], 0.0).unwrap();
                ind.set_fitness(f);
                ind
            })
            .collect()
    }

    fn origins(parents: &[Individual<usize>]) -> Vec<usize> {
        parents.iter().map(|p| p.genome()[0]).collect()
    }

    fn counts<S: SelectionStrategy<usize>>(strategy: &S, fitnesses: &[f64]) -> Vec<u32> {
        let pop = make_population(fitnesses);
        let mut rng = create_rng(42);
        let mut counts = vec![0u32; pop.len()];
        for _ in 0..2500 {
            for idx in origins(&strategy.select(&pop, &mut rng).unwrap()) {
                counts[idx] += 1;
            }
        }
        counts
    }

    #[test]
    fn test_truncation_duplicates_top_half() {
        let pop = make_population(&[9.0, 7.0, 3.0, 1.0]);
        let mut rng = create_rng(42);
        let parents = TruncationSelection.select(&pop, &mut rng).unwrap();
        assert_eq!(origins(&parents), vec![0, 1, 0, 1]);
        assert_eq!(parents[0], pop[0]);
        assert_eq!(parents[2], pop[0]);
        assert_eq!(parents[1], pop[1]);
        assert_eq!(parents[3], pop[1]);
    }

    #[test]
    fn test_truncation_preserves_length() {
        let pop = make_population(&[6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        let mut rng = create_rng(42);
        let parents = TruncationSelection.select(&pop, &mut rng).unwrap();
        assert_eq!(origins(&parents), vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_truncation_rejects_odd_population() {
        let pop = make_population(&[3.0, 2.0, 1.0]);
        let mut rng = create_rng(42);
        assert_eq!(
            TruncationSelection.select(&pop, &mut rng),
            Err(GaError::OddPopulation { len: 3 })
        );
    }

    #[test]
    fn test_tournament_rejects_zero_size() {
        assert_eq!(TournamentSelection::new(0), Err(GaError::InvalidTournamentSize));
        assert_eq!(TournamentSelection::new(3).unwrap().size(), 3);
    }

    #[test]
    fn test_tournament_favors_best() {
        let c = counts(&TournamentSelection::new(4).unwrap(), &[1.0, 5.0, 10.0, 8.0]);
        let total: u32 = c.iter().sum();
        // With tournament size = population size, index 2 should dominate
        assert!(c[2] * 10 > total * 6, "expected best >60%, got {c:?}");
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let c = counts(&TournamentSelection::new(1).unwrap(), &[1.0, 5.0, 10.0, 8.0]);
        for &n in &c {
            assert!(n > 1500, "expected uniform, got counts: {c:?}");
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let c = counts(&RouletteSelection, &[-100.0, -50.0, 1.0, -80.0]);
        assert!(c[2] > c[0], "best should be selected more often: {c:?}");
    }

    #[test]
    fn test_rank_favors_best() {
        let c = counts(&RankSelection, &[1.0, 50.0, 100.0, 20.0]);
        assert!(c[2] > c[0], "best should be selected more: {c:?}");
        assert!(c[2] > c[1]);
    }

    #[test]
    fn test_output_length_matches_input() {
        let pop = make_population(&[4.0, 3.0, 2.0, 1.0, 0.0, -1.0]);
        let mut rng = create_rng(7);
        let tournament = TournamentSelection::new(2).unwrap();
        assert_eq!(tournament.select(&pop, &mut rng).unwrap().len(), 6);
        assert_eq!(RouletteSelection.select(&pop, &mut rng).unwrap().len(), 6);
        assert_eq!(RankSelection.select(&pop, &mut rng).unwrap().len(), 6);
    }

    #[test]
    fn test_equal_fitness_is_uniform() {
        let c = counts(&RouletteSelection, &[5.0, 5.0, 5.0, 5.0]);
        for &n in &c {
            assert!(n > 1500, "expected roughly uniform with equal fitness, got {c:?}");
        }
    }

    #[test]
    fn test_empty_population() {
        let pop: Vec<Individual<usize>> = vec![];
        let mut rng = create_rng(42);
        assert!(TruncationSelection.select(&pop, &mut rng).unwrap().is_empty());
        assert!(RankSelection.select(&pop, &mut rng).unwrap().is_empty());
    }
}
