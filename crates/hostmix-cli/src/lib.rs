//! # Hostmix CLI
//!
//! Runs a guest function against inputs given on the command line.

#![warn(missing_docs)]

/// Input argument parsing
pub mod args;

/// Command options and execution
pub mod run;

pub use args::{parse_input, parse_inputs, ArgError};
pub use run::{Opts, RunReport};
