//! Server command implementation

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use restock_core::{import, ConsumptionRates};
use restock_server::ServerConfig;

/// User id the --history flag seeds
const DEFAULT_USER: &str = "default";

pub async fn cmd_serve(
    rates_path: Option<&Path>,
    host: &str,
    port: u16,
    no_auth: bool,
    history: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting Restock web server...");
    println!("   Listening: http://{}:{}", host, port);

    // Parse API keys from environment (comma-separated)
    let api_keys: Vec<String> = std::env::var("RESTOCK_API_KEYS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    // Parse allowed CORS origins from environment (comma-separated)
    let allowed_origins: Vec<String> = std::env::var("RESTOCK_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if api_keys.is_empty() {
        println!();
        println!("   ❌ Authentication enabled but no keys configured");
        println!("      Set RESTOCK_API_KEYS (comma-separated) or use --no-auth");
        anyhow::bail!("No API keys configured");
    } else {
        println!(
            "   🔑 API keys: {} configured (RESTOCK_API_KEYS)",
            api_keys.len()
        );
    }

    let rates = ConsumptionRates::load(rates_path).context("Failed to load consumption rates")?;

    let mut histories = HashMap::new();
    if let Some(path) = history {
        let purchases = import::load_history(path)
            .with_context(|| format!("Failed to load purchase history from {}", path.display()))?;
        println!(
            "   📦 Seeded '{}' user with {} records from {}",
            DEFAULT_USER,
            purchases.len(),
            path.display()
        );
        histories.insert(DEFAULT_USER.to_string(), purchases);
    }

    let config = ServerConfig {
        require_auth: !no_auth,
        allowed_origins,
        api_keys,
    };

    restock_server::serve(rates, host, port, config, histories).await
}
