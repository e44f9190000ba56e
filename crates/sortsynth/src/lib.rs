#![forbid(unsafe_code)]

//! Terminal front end for SortSynth.
//!
//! The binary is a thin wrapper over [`run_from_env`]; every subcommand is
//! also callable as a library function so it can be tested without a process.

pub mod cli;
pub mod error;
pub mod logging;
pub mod moves;
pub mod play;
pub mod render;

pub use cli::run_from_env;
pub use error::{CliError, Result};
