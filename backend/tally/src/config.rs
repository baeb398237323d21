use std::{env, fmt::Display, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::ballot::{Ballot, DEFAULT_OPTIONS};

/// Everything a service needs to reach the shared tally.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub redis_host: String,
    pub redis_port: u16,
    pub connection_timeout: Duration,
    pub votes_key: String,
    pub ballot: Ballot,
}

impl StoreConfig {
    pub fn load() -> Result<Self> {
        Ok(Self {
            redis_host: try_load("REDIS_HOST", "redis")?,
            redis_port: try_load("REDIS_PORT", "6379")?,
            connection_timeout: Duration::from_millis(try_load("REDIS_TIMEOUT_MS", "500")?),
            votes_key: try_load("VOTES_KEY", "votes")?,
            ballot: try_load("VOTE_OPTIONS", DEFAULT_OPTIONS)?,
        })
    }

    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.redis_host, self.redis_port)
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Reads `key` from the environment, falling back to `default` when unset.
pub fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    parse_value(key, &raw)
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: Display,
{
    raw.parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            anyhow::anyhow!("{e}")
        })
        .with_context(|| format!("Environment misconfigured: {key}={raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<u16>("PORT", "5000").unwrap(), 5000);
        assert!(parse_value::<u16>("PORT", "not a port").is_err());
        assert!(parse_value::<Ballot>("VOTE_OPTIONS", ",").is_err());
    }

    #[test]
    fn test_missing_var_uses_default() {
        let value: String = try_load("TALLY_TEST_SURELY_UNSET_VARIABLE", "fallback").unwrap();

        assert_eq!(value, "fallback");
    }

    #[test]
    fn test_redis_url() {
        let config = StoreConfig {
            redis_host: "redis".to_string(),
            redis_port: 6379,
            connection_timeout: Duration::from_millis(500),
            votes_key: "votes".to_string(),
            ballot: Ballot::default(),
        };

        assert_eq!(config.redis_url(), "redis://redis:6379/");
    }
}
