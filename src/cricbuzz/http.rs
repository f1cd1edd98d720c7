//! RapidAPI client for the Cricbuzz endpoints the dashboard reads.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cli::types::StatKind;
use crate::core::{rapidapi_headers, Config, SnapshotFile, TtlCache};
use crate::Result;

#[cfg(test)]
mod tests;

pub const LIVE_MATCHES_PATH: &str = "/matches/v1/live";
pub const PLAYER_SEARCH_PATH: &str = "/stats/v1/player/search";

/// File name of the live feed snapshot inside the cache dir.
pub const LIVE_SNAPSHOT_FILE: &str = "live-matches.json";

fn player_path(player_id: u64) -> String {
    format!("/stats/v1/player/{}", player_id)
}

/// One HTTP client per process. The live-scores response is cached for a few
/// seconds in memory and, when a cache dir is configured, on disk so that
/// back-to-back `live` runs share it.
pub struct CricbuzzClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    retry_backoff: Duration,
    live_cache: TtlCache<String, Value>,
    live_snapshot: Option<SnapshotFile>,
}

impl CricbuzzClient {
    /// Build a client from configuration. Fails when no API key is set.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?;
        let client = Client::builder()
            .default_headers(rapidapi_headers(api_key, &config.base_url)?)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff,
            live_cache: TtlCache::new(config.live_cache_ttl),
            live_snapshot: config
                .cache_dir
                .as_ref()
                .map(|dir| SnapshotFile::new(dir.join(LIVE_SNAPSHOT_FILE), config.live_cache_ttl)),
        })
    }

    /// GET `path` and decode the JSON body.
    ///
    /// A failed attempt `n` (1-based) waits `n * retry_backoff` before the
    /// next one; after `max_retries` retries the last error is returned.
    pub async fn fetch_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut attempt: u32 = 0;

        loop {
            debug!(%url, ?params, attempt, "GET");
            match self.get_once(&url, params).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        return Err(e);
                    }
                    let delay = self.retry_backoff * attempt;
                    warn!(%url, attempt, ?delay, error = %e, "request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn get_once(&self, url: &str, params: &[(&str, &str)]) -> Result<Value> {
        let body = self
            .client
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(body)
    }

    /// Current live matches. Served from memory, then disk, while fresh
    /// unless `refresh` is set. A fetched body is written to both.
    pub async fn live_matches(&self, refresh: bool) -> Result<Value> {
        let key = LIVE_MATCHES_PATH.to_string();
        if !refresh {
            if let Some(cached) = self.live_cache.get(&key) {
                debug!("live matches served from cache");
                return Ok(cached);
            }
            if let Some(cached) = self.live_snapshot.as_ref().and_then(SnapshotFile::read_fresh) {
                debug!("live matches served from disk cache");
                self.live_cache.insert(key, cached.clone());
                return Ok(cached);
            }
        }

        let body = self.fetch_json(LIVE_MATCHES_PATH, &[]).await?;
        self.live_cache.insert(key, body.clone());
        if let Some(snapshot) = &self.live_snapshot {
            // Not fatal: the page still renders from the fresh body.
            if let Err(e) = snapshot.write(&body) {
                warn!(path = %snapshot.path().display(), error = %e, "could not write live cache");
            }
        }
        Ok(body)
    }

    pub async fn search_players(&self, name: &str) -> Result<Value> {
        self.fetch_json(PLAYER_SEARCH_PATH, &[("plrN", name.trim())])
            .await
    }

    pub async fn player_profile(&self, player_id: u64) -> Result<Value> {
        self.fetch_json(&player_path(player_id), &[]).await
    }

    pub async fn player_stats(&self, player_id: u64, kind: StatKind) -> Result<Value> {
        let path = format!("{}/{}", player_path(player_id), kind);
        self.fetch_json(&path, &[]).await
    }

    pub async fn career_info(&self, player_id: u64) -> Result<Value> {
        let path = format!("{}/career", player_path(player_id));
        self.fetch_json(&path, &[]).await
    }
}
