extern crate rand;

use self::rand::Rng;

use crate::error::Result;

/// Builds a fresh, randomly initialized model
pub trait Initializer {
    /// Model produced by this initializer
    type Model: Clone + Send + Sync;

    /// Returns a new model with weights drawn from `rng`
    fn init<R: Rng>(&self, rng: &mut R) -> Result<Self::Model>;
}

/// Evaluates a model with a given payload to a given output
pub trait Evaluator<Payload: ?Sized, Output> {
    /// Runs the model on the payload.  Must not have side effects.
    fn evaluate(&self, payload: &Payload) -> Output;
}

/// A model the generation manager can breed.
///
/// Mutation is structure preserving: the returned genome always has the same
/// shape as `self`, and `self` is left untouched.
pub trait Genome: Sized {
    /// Number of scalar genes
    fn num_weights(&self) -> usize;

    /// Returns a copy where every gene, independently with probability `chance`,
    /// is replaced by a value drawn uniformly from `[-change, change)`.
    fn mutate<R: Rng>(&self, chance: f32, change: f32, rng: &mut R) -> Self;
}
