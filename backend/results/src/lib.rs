//! Results service of the Cats vs Dogs demo.
//!
//! Read-only view over the shared tally, deployed apart from `voting` so either one can go
//! down without taking the other with it.
//!
//!
//!
//! # Endpoints
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/` | page polling `/results` every 2 seconds |
//! | GET | `/results` | `200 {"Cats": 3, "Dogs": 1}`, `500 {"error": "..."}` |
//! | GET | `/health` | `200 ok` |
//!
//! `/results` reads the whole hash in one `HGETALL`, keeps only ballot categories and turns
//! missing or garbage values into 0.
//!
//!
//!
//! # Redis outages
//! - The service starts without touching Redis, the connection opens on the first request
//! - A failed connection is retried by the next request
//! - Connecting is bounded by `REDIS_TIMEOUT_MS`, a dead Redis means a quick `500`, not a hang
use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub mod config;
pub mod error;
pub mod pages;
pub mod routes;
pub mod state;

use config::Config;
use routes::{health_handler, index_handler, results_handler};
use state::State;

pub fn router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(index_handler))
        .route("/results", get(results_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<()> {
    info!("Loading config...");
    let config = Config::load()?;
    info!("Ballot: {}", config.store.ballot);

    info!("Initializing state...");
    let tally = tally::connect(&config.store).context("Invalid Redis address")?;
    let state = State::new(tally);

    info!("Starting server...");
    tally::server::serve(router(state), config.port).await
}
