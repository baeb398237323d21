use std::{fmt, str::FromStr};

use thiserror::Error;

pub const DEFAULT_OPTIONS: &str = "Cats,Dogs";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BallotError {
    #[error("Ballot must contain at least one option")]
    Empty,
}

/// Fixed, ordered set of categories a vote can go to.
///
/// Built once at startup and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ballot {
    options: Vec<String>,
}

impl Ballot {
    pub fn new<I, S>(options: I) -> Result<Self, BallotError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut deduped: Vec<String> = Vec::new();

        for option in options {
            let option = option.as_ref().trim();

            if option.is_empty() || deduped.iter().any(|existing| existing == option) {
                continue;
            }

            deduped.push(option.to_string());
        }

        if deduped.is_empty() {
            return Err(BallotError::Empty);
        }

        Ok(Self { options: deduped })
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Returns the canonical option matching `choice`, if any. Matching is exact.
    pub fn find(&self, choice: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.as_str() == choice)
            .map(String::as_str)
    }

    pub fn contains(&self, choice: &str) -> bool {
        self.find(choice).is_some()
    }
}

impl Default for Ballot {
    fn default() -> Self {
        Self {
            options: vec!["Cats".to_string(), "Dogs".to_string()],
        }
    }
}

impl FromStr for Ballot {
    type Err = BallotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split(','))
    }
}

impl fmt::Display for Ballot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.options.join(","))
    }
}
