//! Store configuration.
//!
//! Resolved from the environment with defaults:
//!
//! - `STOCKLEDGER_DB`: path of the backing JSON file (default `database/products.json`)
//! - `STOCKLEDGER_ON_CORRUPT`: `fail` or `empty` (default `fail`)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

pub const DB_PATH_VAR: &str = "STOCKLEDGER_DB";
pub const ON_CORRUPT_VAR: &str = "STOCKLEDGER_ON_CORRUPT";
pub const DEFAULT_DB_PATH: &str = "database/products.json";

/// What `load` does when the backing file exists but is not a valid inventory.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CorruptPolicy {
    /// Surface `StoreError::Corrupt` to the caller.
    #[default]
    Fail,
    /// Log a warning and carry on with an empty inventory.
    ///
    /// The file is not rewritten by `load`, but the next mutation will replace
    /// it, discarding whatever it held.
    TreatAsEmpty,
}

impl FromStr for CorruptPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "empty" => Ok(Self::TreatAsEmpty),
            other => Err(ConfigError::InvalidValue {
                var: ON_CORRUPT_VAR,
                value: other.to_string(),
                expected: "fail | empty",
            }),
        }
    }
}

impl core::fmt::Display for CorruptPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fail => f.write_str("fail"),
            Self::TreatAsEmpty => f.write_str("empty"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var} (expected {expected})")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Where the inventory lives and how strictly it is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub corrupt_policy: CorruptPolicy,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            corrupt_policy: CorruptPolicy::default(),
        }
    }

    pub fn with_corrupt_policy(mut self, policy: CorruptPolicy) -> Self {
        self.corrupt_policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let path = match lookup(DB_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => {
                tracing::debug!("{DB_PATH_VAR} not set; using {DEFAULT_DB_PATH}");
                PathBuf::from(DEFAULT_DB_PATH)
            }
        };

        let corrupt_policy = match lookup(ON_CORRUPT_VAR).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.parse()?,
            None => CorruptPolicy::default(),
        };

        Ok(Self {
            path,
            corrupt_policy,
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}
