//! CLI module for musicat
//!
//! Provides command-line interface for:
//! - serve: Provision, seed and serve the HTTP API
//! - search: One-shot attribute search
//! - explain: Show the chosen access path without querying

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, CriteriaArgs};
pub use commands::{explain, run, run_command, search, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
