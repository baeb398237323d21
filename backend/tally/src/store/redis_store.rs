//! # Redis
//!
//! RAM database.
//!
//! Core purpose is to store vote counts and provide atomic increments.
//!
//! ## Implementation
//!
//! - Redis hash: 1 key (`votes` by default), then category-count pairs
//! - `HINCRBY` for votes, Redis queues commands so concurrent voters never lose updates
//! - `HSETNX` for initialization, never clobbers an existing count
//! - Connection is opened lazily on first use so a service can start while Redis is down,
//!   a failed attempt is retried by the next request
use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::{StoreError, TallyStore};
use crate::config::StoreConfig;

pub struct RedisStore {
    client: Client,
    connection_timeout: Duration,
    connection: OnceCell<ConnectionManager>,
    key: String,
}

impl RedisStore {
    pub fn open(store_config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::open(store_config.redis_url())?;

        Ok(Self {
            client,
            connection_timeout: store_config.connection_timeout,
            connection: OnceCell::new(),
            key: store_config.votes_key.clone(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager, StoreError> {
        let connection = self
            .connection
            .get_or_try_init(|| async {
                let config = ConnectionManagerConfig::new()
                    .set_number_of_retries(1)
                    .set_connection_timeout(self.connection_timeout);

                let connection = self
                    .client
                    .get_connection_manager_with_config(config)
                    .await
                    .inspect_err(|e| warn!("Failed to connect to Redis: {e}"))?;

                info!("Connected to Redis");

                Ok::<_, StoreError>(connection)
            })
            .await?;

        Ok(connection.clone())
    }
}

#[async_trait]
impl TallyStore for RedisStore {
    async fn get_field(&self, field: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut connection = self.connection().await?;
        let value: Option<Vec<u8>> = connection.hget(&self.key, field).await?;

        Ok(value)
    }

    async fn get_all(&self) -> Result<HashMap<String, Vec<u8>>, StoreError> {
        let mut connection = self.connection().await?;
        let values: HashMap<Vec<u8>, Vec<u8>> = connection.hgetall(&self.key).await?;

        Ok(values
            .into_iter()
            .map(|(field, value)| (String::from_utf8_lossy(&field).into_owned(), value))
            .collect())
    }

    async fn set_if_absent(&self, field: &str, value: i64) -> Result<bool, StoreError> {
        let mut connection = self.connection().await?;
        let written: bool = connection.hset_nx(&self.key, field, value).await?;

        Ok(written)
    }

    async fn increment(&self, field: &str, delta: i64) -> Result<i64, StoreError> {
        let mut connection = self.connection().await?;
        let value: i64 = connection.hincr(&self.key, field, delta).await?;

        Ok(value)
    }
}
