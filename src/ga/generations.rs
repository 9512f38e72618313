//! Lazy, pull-driven sequence of generations.

use super::engine::Engine;
use super::error::{GaError, Result};
use super::individual::Individual;
use std::iter::FusedIterator;

/// What the generation sequence yields after each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emit {
    /// The current best individual.
    #[default]
    Best,

    /// The whole ranked population.
    Population,
}

/// State observed after one generation step.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot<G> {
    Best(Individual<G>),
    Population(Vec<Individual<G>>),
}

impl<G> Snapshot<G> {
    /// Individuals in the snapshot, best first.
    pub fn individuals(&self) -> &[Individual<G>] {
        match self {
            Snapshot::Best(individual) => std::slice::from_ref(individual),
            Snapshot::Population(population) => population,
        }
    }

    pub fn best(&self) -> Option<&Individual<G>> {
        self.individuals().first()
    }
}

/// Iterator returned by [`Engine::generations`].
///
/// Work happens only inside [`next`](Iterator::next): the first call
/// initializes the engine, and every call performs exactly one generation
/// step. Dropping the iterator stops the run; the engine keeps the state of
/// the last completed generation.
///
/// An error is yielded once, after which the iterator is exhausted.
pub struct Generations<'a, G, P> {
    engine: &'a mut Engine<G, P>,
    remaining: Option<usize>,
    emit: Emit,
    started: bool,
    done: bool,
}

impl<'a, G: Clone, P> Generations<'a, G, P> {
    pub(crate) fn new(engine: &'a mut Engine<G, P>, generations: usize, emit: Emit) -> Self {
        Self {
            engine,
            remaining: (generations > 0).then_some(generations),
            emit,
            started: false,
            done: false,
        }
    }

    /// The engine being driven, for inspection between pulls.
    pub fn engine(&self) -> &Engine<G, P> {
        self.engine
    }

    fn advance(&mut self) -> Result<Snapshot<G>> {
        if !self.started {
            self.started = true;
            self.engine.initialize()?;
        }
        self.engine.step()?;

        match self.emit {
            Emit::Best => self
                .engine
                .best_individual()
                .cloned()
                .map(Snapshot::Best)
                .ok_or(GaError::EmptyPopulation),
            Emit::Population => Ok(Snapshot::Population(self.engine.population().to_vec())),
        }
    }
}

impl<G: Clone, P> Iterator for Generations<'_, G, P> {
    type Item = Result<Snapshot<G>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.remaining == Some(0) {
            return None;
        }

        let snapshot = self.advance();
        match snapshot {
            Ok(_) => {
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
            }
            Err(_) => self.done = true,
        }
        Some(snapshot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.done, self.remaining) {
            (true, _) => (0, Some(0)),
            (false, Some(n)) => (0, Some(n)),
            (false, None) => (0, None),
        }
    }
}

impl<G: Clone, P> FusedIterator for Generations<'_, G, P> {}
