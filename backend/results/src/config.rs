use anyhow::Result;
use tally::{StoreConfig, config::try_load};

pub struct Config {
    pub port: u16,
    pub store: StoreConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            port: try_load("PORT", "8080")?,
            store: StoreConfig::load()?,
        })
    }
}
