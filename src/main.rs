//! BIDWISE — bid recommendation service.
//!
//! Entry point. Loads configuration, initialises structured logging, and
//! either serves the JSON API or, given a file of bids, prints the
//! recommendation for it and exits.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use bidwise::config::AppConfig;
use bidwise::server::{self, routes::ServiceState};
use bidwise::types::Bid;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let path = AppConfig::default_path();
    let cfg = if Path::new(&path).exists() {
        AppConfig::load(&path)?
    } else {
        warn!(path = %path, "Config file not found, using defaults");
        AppConfig::default()
    };

    info!(
        service = %cfg.service.name,
        conflict_search = %cfg.engine.conflict_search,
        currency = %cfg.service.currency,
        "BIDWISE starting up"
    );

    // One-shot mode: `bidwise bids.json`
    if let Some(bids_path) = std::env::args().nth(1) {
        return recommend_file(&cfg, &bids_path);
    }

    if !cfg.server.enabled {
        warn!("Server disabled in config and no bids file given. Nothing to do.");
        return Ok(());
    }

    let state = Arc::new(ServiceState::new(&cfg));
    server::serve(state, cfg.server.port).await
}

/// Print the recommendation for a JSON file of bids.
fn recommend_file(cfg: &AppConfig, path: &str) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bids file: {path}"))?;
    let body: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse bids file: {path}"))?;
    let bids: Vec<Bid> = server::routes::parse_bids(body)?;

    let rec = cfg.engine.recommender().recommend(&bids)?;
    info!(
        bids = bids.len(),
        selected = rec.selected_bids.len(),
        max_profit = %rec.max_profit,
        "Recommendation computed"
    );

    println!("{}", serde_json::to_string_pretty(&rec)?);
    Ok(())
}

/// Initialise the `tracing` subscriber. Logs go to stderr so one-shot
/// output on stdout stays machine-readable.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bidwise=info"));

    let json_logging = std::env::var("BIDWISE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
