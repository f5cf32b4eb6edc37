//! Defines methods shared by the binaries

/// Methods for reading arguments
pub mod args;
/// Run configuration and its file format
pub mod config;
