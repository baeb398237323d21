use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;

use super::{StoreError, TallyStore};

/// In-process stand-in for the Redis hash. Every operation holds the lock, so increments stay atomic.
#[derive(Default)]
pub struct MemoryStore {
    fields: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a raw value, bypassing the tally rules.
    pub fn insert_raw(&self, field: &str, value: &[u8]) -> Result<(), StoreError> {
        self.lock()?.insert(field.to_string(), value.to_vec());

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>, StoreError> {
        self.fields
            .lock()
            .map_err(|e| StoreError::Backend(format!("Memory store poisoned: {e}")))
    }
}

#[async_trait]
impl TallyStore for MemoryStore {
    async fn get_field(&self, field: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock()?.get(field).cloned())
    }

    async fn get_all(&self) -> Result<HashMap<String, Vec<u8>>, StoreError> {
        Ok(self.lock()?.clone())
    }

    async fn set_if_absent(&self, field: &str, value: i64) -> Result<bool, StoreError> {
        let mut fields = self.lock()?;

        if fields.contains_key(field) {
            return Ok(false);
        }

        fields.insert(field.to_string(), value.to_string().into_bytes());

        Ok(true)
    }

    async fn increment(&self, field: &str, delta: i64) -> Result<i64, StoreError> {
        let mut fields = self.lock()?;

        let current = match fields.get(field) {
            Some(raw) => std::str::from_utf8(raw)
                .ok()
                .and_then(|raw| raw.parse::<i64>().ok())
                .ok_or_else(|| StoreError::Backend("hash value is not an integer".to_string()))?,
            None => 0,
        };

        let next = current + delta;
        fields.insert(field.to_string(), next.to_string().into_bytes());

        Ok(next)
    }
}

/// Store whose every call fails the way a refused connection does.
pub struct UnreachableStore;

impl UnreachableStore {
    pub const MESSAGE: &'static str = "Connection refused";

    fn refused<T>() -> Result<T, StoreError> {
        Err(StoreError::Backend(Self::MESSAGE.to_string()))
    }
}

#[async_trait]
impl TallyStore for UnreachableStore {
    async fn get_field(&self, _: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Self::refused()
    }

    async fn get_all(&self) -> Result<HashMap<String, Vec<u8>>, StoreError> {
        Self::refused()
    }

    async fn set_if_absent(&self, _: &str, _: i64) -> Result<bool, StoreError> {
        Self::refused()
    }

    async fn increment(&self, _: &str, _: i64) -> Result<i64, StoreError> {
        Self::refused()
    }
}
