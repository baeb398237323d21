//! Shared plumbing for the Cats vs Dogs voting services.
//!
//!
//!
//! # General Infrastructure
//! - `voting` accepts votes and serves its own read view
//! - `results` only reads, deployed on its own
//! - Both talk to the same Redis hash, never to each other
//! - A results outage never blocks voting, and the reverse
//!
//!
//!
//! # Notes
//!
//! ## Counting
//! Votes are a single `HINCRBY` per request. Reading a count and writing it back would
//! race between voters, so the increment always happens inside Redis.
//!
//! ## Initialization
//! `voting` sets every missing category to 0 before it binds its port. Existing counts
//! are never overwritten, so restarts are safe.
//!
//! ## Untrusted hash contents
//! Anything can end up in the hash. Reads keep only ballot categories and treat
//! anything that is not a count as 0.
//!
//!
//!
//! # Environment
//!
//! | Variable | Default |
//! |---|---|
//! | `REDIS_HOST` | `redis` |
//! | `REDIS_PORT` | `6379` |
//! | `REDIS_TIMEOUT_MS` | `500` |
//! | `VOTES_KEY` | `votes` |
//! | `VOTE_OPTIONS` | `Cats,Dogs` |
//! | `RUST_LOG` | unset, see `tracing_subscriber::EnvFilter` |
//!
//!
//!
//! # Setup
//!
//! Run Redis locally.
//! ```sh
//! docker run --rm -p 6379:6379 redis:7
//! ```
//!
//! Run both services against it.
//! ```sh
//! REDIS_HOST=localhost RUST_LOG=info cargo run -p voting
//! REDIS_HOST=localhost RUST_LOG=info cargo run -p results
//! ```
//!
//! Smoke test.
//! ```sh
//! cargo run -p tester -- http://localhost:5000 http://localhost:8080
//! ```
pub mod ballot;
pub mod config;
pub mod server;
pub mod store;
pub mod tally;

pub use ballot::Ballot;
pub use config::StoreConfig;
pub use store::{RedisStore, StoreError, TallyStore};
pub use crate::tally::{Counts, Tally, TallyError};

use std::sync::Arc;

/// Opens the Redis store described by `config` and wraps it in a [`Tally`].
pub fn connect(config: &StoreConfig) -> Result<Tally, StoreError> {
    let store = RedisStore::open(config)?;

    Ok(Tally::new(Arc::new(store), config.ballot.clone()))
}
