//! Genome encoding and decoding.
//!
//! The engine never interprets genes itself. A [`Codec`] turns the caller's
//! raw fields into a stored genome and back again for fitness evaluation.

use std::marker::PhantomData;

/// Converts between a problem's raw representation and its genome.
///
/// # Implementing
///
/// ```
/// use u_evolve::ga::Codec;
///
/// /// Stores an `(x, y)` point as two integer genes.
/// struct PointCodec;
///
/// impl Codec<i64> for PointCodec {
///     type Phenotype = (i64, i64);
///
///     fn encode(&self, (x, y): (i64, i64)) -> Vec<i64> {
///         vec![x, y]
///     }
///
///     fn decode(&self, genome: &[i64]) -> (i64, i64) {
///         (genome[0], genome[1])
///     }
/// }
///
/// assert_eq!(PointCodec.decode(&PointCodec.encode((3, 4))), (3, 4));
/// ```
pub trait Codec<G> {
    /// The decoded representation passed to the fitness function.
    type Phenotype;

    /// Produces the stored genome from raw fields.
    fn encode(&self, phenotype: Self::Phenotype) -> Vec<G>;

    /// Recovers the raw fields from a genome.
    fn decode(&self, genome: &[G]) -> Self::Phenotype;
}

/// Stores raw fields as-is.
#[derive(Debug)]
pub struct IdentityCodec<G>(PhantomData<fn() -> G>);

impl<G> IdentityCodec<G> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<G> Default for IdentityCodec<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> Clone for IdentityCodec<G> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<G: Clone> Codec<G> for IdentityCodec<G> {
    type Phenotype = Vec<G>;

    fn encode(&self, phenotype: Vec<G>) -> Vec<G> {
        phenotype
    }

    fn decode(&self, genome: &[G]) -> Vec<G> {
        genome.to_vec()
    }
}
