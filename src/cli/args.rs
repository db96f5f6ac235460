//! CLI argument definitions using clap
//!
//! Commands:
//! - musicat serve [--config <path>] [--port <port>]
//! - musicat search [--config <path>] [--title ..] [--album ..] [--artist ..] [--year ..]
//! - musicat explain [--title ..] [--album ..] [--artist ..] [--year ..] [--text]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::planner::{SearchCriteria, YearInput};

/// musicat - music catalog service
#[derive(Parser, Debug)]
#[command(name = "musicat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Search attributes; any subset may be given
#[derive(Args, Debug, Clone, Default)]
pub struct CriteriaArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub album: Option<String>,

    #[arg(long)]
    pub artist: Option<String>,

    /// Release year; non-integer values yield no results
    #[arg(long)]
    pub year: Option<String>,
}

impl CriteriaArgs {
    pub fn to_criteria(&self) -> SearchCriteria {
        SearchCriteria {
            title: self.title.clone(),
            album: self.album.clone(),
            artist: self.artist.clone(),
            year: self.year.as_deref().map(YearInput::from),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Provision, seed and serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one search against the seeded catalog and print the results
    Search {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Show the access plan for a search without running it
    Explain {
        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Print a human-readable plan instead of JSON
        #[arg(long)]
        text: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
