//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for lovemeter using clap's derive macros.

use clap::{Parser, Subcommand};

/// Lovemeter - An anonymous engagement counter service
#[derive(Parser)]
#[command(name = "lovemeter")]
#[command(version)]
#[command(about = "An anonymous engagement counter service", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Print aggregate statistics
    Stats,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite existing file without asking
        #[arg(long)]
        force: bool,
    },
}
