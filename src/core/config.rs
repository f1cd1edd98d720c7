//! Environment-driven configuration.
//!
//! Values come from the process environment after `.env.local` and `.env`
//! have been loaded by `main`. Construction goes through a lookup function so
//! tests can supply their own variables without touching the process env.

use std::{path::PathBuf, str::FromStr, time::Duration};

use tracing::debug;

use super::cache::{default_cache_dir, default_database_path};
use crate::{CricError, Result};

#[cfg(test)]
mod tests;

pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
pub const API_KEY_ENV_VAR: &str = "CRICBUZZ_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "CRICBUZZ_BASE_URL";
pub const LIVE_CACHE_ENV_VAR: &str = "CRICBUZZ_LIVE_CACHE_SECS";
pub const MAX_RETRIES_ENV_VAR: &str = "CRICBUZZ_MAX_RETRIES";
pub const TIMEOUT_ENV_VAR: &str = "CRICBUZZ_TIMEOUT_SECS";
pub const CACHE_DIR_ENV_VAR: &str = "CRICBUZZ_CACHE_DIR";

/// RapidAPI endpoint for Cricbuzz data.
pub const CRICBUZZ_BASE_URL: &str = "https://cricbuzz-cricket.p.rapidapi.com";

const DEFAULT_LIVE_CACHE_SECS: u64 = 10;
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Where the relational schema lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    InMemory,
}

impl DatabaseLocation {
    /// Interpret a `DATABASE_URL`.
    ///
    /// Accepts `sqlite:///relative/or/absolute`, `sqlite://path`,
    /// `sqlite::memory:`, `:memory:` and bare file paths.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();

        if matches!(url, ":memory:" | "sqlite::memory:" | "sqlite://" | "sqlite:///") {
            return Ok(Self::InMemory);
        }

        if let Some(rest) = url.strip_prefix("sqlite:///") {
            return Ok(Self::File(PathBuf::from(rest)));
        }

        if let Some(rest) = url.strip_prefix("sqlite://") {
            return Ok(Self::File(PathBuf::from(rest)));
        }

        if url.is_empty() || url.contains("://") {
            return Err(CricError::InvalidDatabaseUrl {
                url: url.to_string(),
            });
        }

        Ok(Self::File(PathBuf::from(url)))
    }
}

/// Everything a page handler needs to know about its environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseLocation,
    pub api_key: Option<String>,
    pub base_url: String,
    pub live_cache_ttl: Duration,
    /// Where API responses persist between runs. `None` keeps them in memory only.
    pub cache_dir: Option<PathBuf>,
    pub max_retries: u32,
    pub retry_backoff: Duration,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseLocation::File(default_database_path()),
            api_key: None,
            base_url: CRICBUZZ_BASE_URL.to_string(),
            live_cache_ttl: Duration::from_secs(DEFAULT_LIVE_CACHE_SECS),
            cache_dir: Some(default_cache_dir()),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = non_empty(lookup(DATABASE_URL_ENV_VAR)) {
            config.database = DatabaseLocation::parse(&url)?;
        }
        config.api_key = non_empty(lookup(API_KEY_ENV_VAR));
        if let Some(base) = non_empty(lookup(BASE_URL_ENV_VAR)) {
            config.base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(secs) = parse_var::<u64>(&lookup, LIVE_CACHE_ENV_VAR)? {
            config.live_cache_ttl = Duration::from_secs(secs);
        }
        if let Some(dir) = non_empty(lookup(CACHE_DIR_ENV_VAR)) {
            config.cache_dir = Some(PathBuf::from(dir.trim()));
        }
        if let Some(retries) = parse_var::<u32>(&lookup, MAX_RETRIES_ENV_VAR)? {
            config.max_retries = retries;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, TIMEOUT_ENV_VAR)? {
            config.timeout = Duration::from_secs(secs);
        }

        debug!(database = ?config.database, base_url = %config.base_url, "configuration loaded");
        Ok(config)
    }

    /// The API key, or the error pages show when it is missing.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| CricError::MissingApiKey {
                env_var: API_KEY_ENV_VAR.to_string(),
            })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    match non_empty(lookup(key)) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| CricError::InvalidConfig {
                key: key.to_string(),
                value: raw,
            }),
    }
}
