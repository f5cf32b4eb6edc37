//! Neurogen
//!
//! Neurogen is a library and an executable to evolve feed-forward neural
//! networks with a simple genetic algorithm.  The core crates hold the networks
//! and the generation manager; this crate is the driver around them: it owns
//! the fitness environment, the run configuration and the reporting.
#![warn(missing_docs, unused)]

#[macro_use]
extern crate serde_derive;

/// Tools for binaries
pub mod bin_utils;
/// Example environment and training loop
pub mod example;
