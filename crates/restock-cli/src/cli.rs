//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Restock - Know what to reorder before you run out
#[derive(Parser)]
#[command(name = "restock")]
#[command(about = "Grocery replenishment forecaster", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Alternate consumption-rates TOML file (defaults to the built-in table)
    #[arg(long, global = true)]
    pub rates: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict which products need reordering
    Predict {
        /// Purchase history file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Only show items that need action now
        #[arg(long)]
        urgent_only: bool,

        /// Emit predictions as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Override the inferred household size
        #[arg(long)]
        household_size: Option<u32>,
    },

    /// Show the household context inferred from a purchase history
    Household {
        /// Purchase history file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Inspect the standard consumption rate for a product
    Rates {
        /// Product name to match against the keyword table
        #[arg(short, long)]
        name: String,

        /// Product category
        #[arg(short, long)]
        category: String,

        /// Household size to scale for
        #[arg(short, long, default_value = "2")]
        size: u32,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (development only)
        #[arg(long)]
        no_auth: bool,

        /// Pre-seed the `default` user with this purchase history
        #[arg(long)]
        history: Option<PathBuf>,
    },
}
