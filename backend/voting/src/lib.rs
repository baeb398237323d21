//! Voting service of the Cats vs Dogs demo.
//!
//!
//!
//! # Endpoints
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/` | page with every category, its count and a vote button |
//! | POST | `/vote` | `200 {"ok": true}`, `400 {"error": "invalid choice"}` |
//! | GET | `/results` | `200 {"Cats": 3, "Dogs": 1}` |
//! | GET | `/health` | `200 ok` |
//!
//! `POST /vote` takes either a form field `choice` or a JSON body `{"choice": "Cats"}`.
//! Any store failure comes back as `500 {"error": "..."}`, a vote is never dropped silently.
//!
//!
//!
//! # Startup
//! 1. Load config from the environment, `PORT` defaults to 5000
//! 2. Open the Redis store
//! 3. Set every missing category to 0, existing counts are untouched
//! 4. Bind and serve until Ctrl+C or SIGTERM
//!
//! Step 3 has to succeed, the service refuses to start without Redis.
use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub mod config;
pub mod error;
pub mod input;
pub mod pages;
pub mod routes;
pub mod state;

use config::Config;
use routes::{health_handler, index_handler, results_handler, vote_handler};
use state::State;

pub fn router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(index_handler))
        .route("/vote", post(vote_handler))
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
    tally
        .initialize()
        .await
        .context("Failed to initialize tallies")?;

    let state = State::new(tally);

    info!("Starting server...");
    tally::server::serve(router(state), config.port).await
}
