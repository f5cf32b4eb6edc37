//! Neurogen-Core
//! ===
//!
//! This library contains the model-agnostic half of a simple neuro-evolution
//! loop: a fixed-size population of genomes which is scored externally, culled
//! and regenerated through mutation of its fittest members.
//!
//! Generation
//! ---
//! A `Population` is seeded from a single basis genome.  Each cycle the driver
//! assigns a fitness to every individual and calls `evolve`, which keeps the
//! top 10% unchanged (elitism) and fills the remaining slots with mutated
//! copies of individuals drawn with a rank-biased selection.  There is no
//! crossover.
//!
//! Models
//! ---
//! Concrete models plug in through the traits in `model`: a `Genome` knows how
//! to produce a mutated copy of itself, an `Initializer` builds a fresh random
//! model and an `Evaluator` maps a payload to an output.
//!
//! Randomness
//! ---
//! Every random draw goes through an injected `Rng`; `sampler` holds the
//! shared sampling helpers and the seeded `XorShiftRng` constructors used to
//! make runs reproducible.

#![warn(missing_docs, unused)]

#[macro_use]
extern crate serde_derive;

/// Error conditions shared by the core and the models.
pub mod error;

/// Defines the interfaces for Model types for use in neuro-evolution.
pub mod model;

/// Defines interfaces for Environments and States
pub mod optimizer;

/// Shared helpers for random sampling.
pub mod sampler;

/// Defines the generation manager.
pub mod generation;

pub use crate::error::{Error, Result};
