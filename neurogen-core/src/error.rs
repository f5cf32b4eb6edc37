extern crate thiserror;

use self::thiserror::Error;

/// Alias used throughout the core and the model crates.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
/// Fail-fast conditions raised by networks and populations.  None of these are
/// recovered internally; they all propagate to the driver.
pub enum Error {
    /// A dimension was zero, or there were no hidden layers
    #[error("invalid architecture: {0}")]
    InvalidArchitecture(String),

    /// Weights handed to a network don't match the shape its architecture implies
    #[error("weight shape mismatch at {location}: expected {expected}, found {found}")]
    ShapeMismatch {
        /// Where in the weight structure the disagreement was found
        location: String,
        /// Count implied by the architecture
        expected: usize,
        /// Count actually supplied
        found: usize,
    },

    /// Input vector has the wrong length for the network
    #[error("invalid input: expected {expected} values, found {found}")]
    InvalidInput {
        /// Number of input nodes
        expected: usize,
        /// Length of the supplied input
        found: usize,
    },

    /// Index outside of the population
    #[error("index {index} out of range for population of size {size}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Population size
        size: usize,
    },

    /// Some individuals haven't been scored this cycle
    #[error("fitness not set for {missing} of {size} individuals")]
    IncompleteFitness {
        /// Number of unset fitness slots
        missing: usize,
        /// Population size
        size: usize,
    },

    /// Fitness must be a finite number
    #[error("fitness must be finite, got {0}")]
    InvalidFitness(f32),

    /// A population needs at least one individual
    #[error("population size must be at least 1")]
    EmptyPopulation,

    /// Selection factor must be finite and strictly positive
    #[error("selection factor must be finite and > 0, got {0}")]
    InvalidSelectionFactor(f32),
}
