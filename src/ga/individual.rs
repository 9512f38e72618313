//! Candidate solutions.

use super::codec::Codec;
use super::error::{GaError, Result};
use super::types::{GenePool, MutationStrategy};
use rand::{Rng, RngCore};

/// One candidate solution: a genome plus its mutation probability.
///
/// Individuals also carry the fitness computed by the engine's most recent
/// ranking pass. It is cleared whenever the genome changes, so a `None`
/// means "not evaluated since the last change".
///
/// Gene type and meaning are up to the caller; the engine only moves genes
/// around and hands decoded genomes to the fitness function.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Individual<G> {
    genome: Vec<G>,
    mutation_rate: f64,
    fitness: Option<f64>,
}

impl<G> Individual<G> {
    /// Creates an individual from an already encoded genome.
    pub fn new(genome: Vec<G>, mutation_rate: f64) -> Result<Self> {
        Ok(Self {
            genome,
            mutation_rate: validate_rate(mutation_rate)?,
            fitness: None,
        })
    }

    /// Creates an individual by encoding raw fields with `codec`.
    pub fn encode<C>(codec: &C, phenotype: C::Phenotype, mutation_rate: f64) -> Result<Self>
    where
        C: Codec<G> + ?Sized,
    {
        Self::new(codec.encode(phenotype), mutation_rate)
    }

    /// Decodes the genome for fitness evaluation.
    pub fn decode<C>(&self, codec: &C) -> C::Phenotype
    where
        C: Codec<G> + ?Sized,
    {
        codec.decode(&self.genome)
    }

    pub fn genome(&self) -> &[G] {
        &self.genome
    }

    pub fn into_genome(self) -> Vec<G> {
        self.genome
    }

    pub fn len(&self) -> usize {
        self.genome.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genome.is_empty()
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Sets the probability used by [`mutate`](Self::mutate).
    pub fn set_mutation_rate(&mut self, rate: f64) -> Result<()> {
        self.mutation_rate = validate_rate(rate)?;
        Ok(())
    }

    /// Fitness from the last evaluation, if the genome has not changed since.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Fitness used for ordering. Unevaluated individuals rank last.
    pub(crate) fn rank_key(&self) -> f64 {
        self.fitness.unwrap_or(f64::NEG_INFINITY)
    }

    /// Draws one uniform number and, if it falls below the mutation rate,
    /// applies `strategy` to the genome.
    ///
    /// Returns whether a mutation event happened. The mutation rate itself is
    /// never changed.
    pub fn mutate<M>(
        &mut self,
        strategy: &M,
        pool: &GenePool<G>,
        rng: &mut dyn RngCore,
    ) -> Result<bool>
    where
        M: MutationStrategy<G> + ?Sized,
    {
        if rng.random::<f64>() >= self.mutation_rate {
            return Ok(false);
        }
        strategy.mutate(&mut self.genome, pool, rng)?;
        self.fitness = None;
        Ok(true)
    }
}

fn validate_rate(rate: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(GaError::MutationRateOutOfRange(rate));
    }
    Ok(rate)
}

/// Deserialization goes through [`Individual::new`], so out-of-range rates
/// and NaN fitness are rejected.
#[cfg(feature = "serde")]
impl<'de, G> serde::Deserialize<'de> for Individual<G>
where
    G: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(rename = "Individual")]
        struct Raw<T> {
            genome: Vec<T>,
            mutation_rate: f64,
            #[serde(default)]
            fitness: Option<f64>,
        }

        let raw = Raw::<G>::deserialize(deserializer)?;
        let mut individual =
            Individual::new(raw.genome, raw.mutation_rate).map_err(serde::de::Error::custom)?;
        if let Some(fitness) = raw.fitness {
            if fitness.is_nan() {
                return Err(serde::de::Error::custom(GaError::NanFitness));
            }
            individual.set_fitness(fitness);
        }
        Ok(individual)
    }
}
