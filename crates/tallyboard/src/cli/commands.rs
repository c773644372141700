//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Run command arguments.
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Run for a fixed number of seconds, then shut down
    #[arg(short, long)]
    pub duration: Option<u64>,

    /// Run without terminal output (in-memory view)
    #[arg(long)]
    pub headless: bool,

    /// Seed the random source for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Session management commands.
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Log in: generate and store a session token
    Login,

    /// Log out: delete the stored session token
    Logout,

    /// Show the current session status
    Status {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
