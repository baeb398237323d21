//! # Tally Store
//!
//! Shared key-value hash holding every count.
//!
//! Both services only ever see this trait. The voting path writes through it,
//! the results path reads through it, and the two never talk to each other.
//!
//! ## Operations
//!
//! - `get_field`: one category, raw value or absent
//! - `get_all`: every field in the hash, raw values
//! - `set_if_absent`: write only when the field does not exist yet
//! - `increment`: atomic add, the backend guarantees no lost updates
//!
//! Values come back as raw bytes so callers decide how to treat garbage, including
//! values that are not even UTF-8.
use std::collections::HashMap;

use async_trait::async_trait;
use redis::RedisError;
use thiserror::Error;

#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod redis_store;

#[cfg(any(test, feature = "memory"))]
pub use memory::{MemoryStore, UnreachableStore};
pub use redis_store::RedisStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Redis(#[from] RedisError),

    #[error("{0}")]
    Backend(String),
}

#[async_trait]
pub trait TallyStore: Send + Sync {
    async fn get_field(&self, field: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Field names that are not UTF-8 are decoded lossily.
    async fn get_all(&self) -> Result<HashMap<String, Vec<u8>>, StoreError>;

    /// Returns whether the field was written.
    async fn set_if_absent(&self, field: &str, value: i64) -> Result<bool, StoreError>;

    /// Returns the value after the increment.
    async fn increment(&self, field: &str, delta: i64) -> Result<i64, StoreError>;
}
