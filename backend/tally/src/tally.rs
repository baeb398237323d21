use std::{collections::HashMap, sync::Arc};

use serde::{Serialize, Serializer, ser::SerializeMap};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    ballot::Ballot,
    store::{StoreError, TallyStore},
};

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("invalid choice")]
    InvalidChoice,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Counts in ballot order. Serializes as a JSON object, `{"Cats": 3, "Dogs": 1}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counts(Vec<(String, u64)>);

impl Counts {
    pub fn get(&self, category: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, count)| count).sum()
    }
}

impl Serialize for Counts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }

        map.end()
    }
}

/// Missing, negative, non-numeric or non-UTF-8 values count as 0.
pub fn parse_count(category: &str, raw: Option<&[u8]>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };

    std::str::from_utf8(raw)
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .unwrap_or_else(|| {
            warn!(
                "Stored count for {category} is not a count: {:?}, treating as 0",
                String::from_utf8_lossy(raw)
            );
            0
        })
}

/// Tally operations for one ballot over a shared store handle.
#[derive(Clone)]
pub struct Tally {
    store: Arc<dyn TallyStore>,
    ballot: Ballot,
}

impl Tally {
    pub fn new(store: Arc<dyn TallyStore>, ballot: Ballot) -> Self {
        Self { store, ballot }
    }

    pub fn ballot(&self) -> &Ballot {
        &self.ballot
    }

    /// Sets every missing count to 0. Existing counts are left alone, so this runs on every startup.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        for option in self.ballot.options() {
            if self.store.get_field(option).await?.is_some() {
                continue;
            }

            if self.store.set_if_absent(option, 0).await? {
                info!("Initialized count for {option}");
            }
        }

        Ok(())
    }

    /// Reads each category on its own.
    pub async fn counts(&self) -> Result<Counts, StoreError> {
        let mut counts = Vec::with_capacity(self.ballot.options().len());

        for option in self.ballot.options() {
            let raw = self.store.get_field(option).await?;
            counts.push((option.clone(), parse_count(option, raw.as_deref())));
        }

        Ok(Counts(counts))
    }

    /// Reads the whole hash in one round trip and keeps only ballot categories.
    pub async fn snapshot(&self) -> Result<Counts, StoreError> {
        let fields = self.store.get_all().await?;

        Ok(self.normalize(&fields))
    }

    pub fn normalize(&self, fields: &HashMap<String, Vec<u8>>) -> Counts {
        Counts(
            self.ballot
                .options()
                .iter()
                .map(|option| {
                    let raw = fields.get(option).map(Vec::as_slice);
                    (option.clone(), parse_count(option, raw))
                })
                .collect(),
        )
    }

    /// Validates `choice` and adds exactly one vote to it. Returns the new count.
    pub async fn record_vote(&self, choice: Option<&str>) -> Result<i64, TallyError> {
        let Some(category) = choice.and_then(|choice| self.ballot.find(choice)) else {
            debug!("Rejected vote for {choice:?}");
            return Err(TallyError::InvalidChoice);
        };

        let count = self.store.increment(category, 1).await?;
        debug!("Vote recorded for {category}, now {count}");

        Ok(count)
    }
}
