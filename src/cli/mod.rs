//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for fsexport using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// fsexport - Firestore managed export and download tool
#[derive(Parser, Debug)]
#[command(name = "fsexport")]
#[command(version, about, long_about = None)]
#[command(author = "fsexport Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "fsexport.toml", env = "FSEXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FSEXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the database to Cloud Storage and download the files
    Export(commands::export::ExportArgs),

    /// Show the state of an export operation
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
