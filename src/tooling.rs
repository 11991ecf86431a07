//! Tooling
//!
//! Command-line inspection of `.tar.gz` archives built on the tree API.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
