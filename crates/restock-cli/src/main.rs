//! Restock CLI - Grocery replenishment forecaster
//!
//! Usage:
//!   restock predict --file orders.csv     Predict what needs reordering
//!   restock household --file orders.csv   Show the inferred household
//!   restock rates --name "whole milk" --category "Dairy & Eggs"
//!   restock serve --port 3000             Start the API server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Predict {
            file,
            urgent_only,
            json,
            household_size,
        } => commands::cmd_predict(
            &file,
            cli.rates.as_deref(),
            urgent_only,
            json,
            household_size,
        ),
        Commands::Household { file } => commands::cmd_household(&file),
        Commands::Rates {
            name,
            category,
            size,
        } => commands::cmd_rates(cli.rates.as_deref(), &name, &category, size),
        Commands::Serve {
            port,
            host,
            no_auth,
            history,
        } => {
            commands::cmd_serve(
                cli.rates.as_deref(),
                &host,
                port,
                no_auth,
                history.as_deref(),
            )
            .await
        }
    }
}
