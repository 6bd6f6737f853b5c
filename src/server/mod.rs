//! Service — Axum web server exposing the engine over JSON.
//!
//! Stateless per request: handlers compute synchronously and respond.
//! CORS is open so the marketplace front-end can call it directly.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use routes::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/bids/recommend", post(routes::recommend_bids))
        .route("/api/bids/validate", post(routes::validate_bid))
        .route("/api/bookings/invoice", post(routes::booking_invoice))
        .route("/api/status", get(routes::get_status))
        .route("/health", get(routes::health))
        .layer(cors)
        .with_state(state)
}

/// Serve the router on `port` until Ctrl+C.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;
    info!(port, "Service listening on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Service shut down cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received.");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
