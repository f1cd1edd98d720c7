//! Time-boxed caching for external API responses
//!
//! Live match data changes every ball, but a dashboard refresh loop does not
//! need to hit the API more than once every few seconds. Two layers:
//! - L1: `TtlCache`, in memory for the lifetime of one client
//! - L2: `SnapshotFile`, a JSON file under the user cache dir stamped with the
//!   fetch time, so separate CLI invocations share one response
//!
//! Both treat a value as absent once the validity window has passed. There is
//! no eviction policy beyond that.

use std::{
    collections::HashMap,
    fs,
    hash::Hash,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;


/// Path: ~/.cache/cricbuzz-livestats
pub fn default_cache_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("cricbuzz-livestats")
}

/// Path: ~/.cache/cricbuzz-livestats/cricbuzz.db
pub fn default_database_path() -> PathBuf {
    default_cache_dir().join("cricbuzz.db")
}

/// Try reading a cached file to string; None on any error.
pub fn try_read_to_string(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

/// Write a string to a cache file, creating parent dirs.
pub fn write_string(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    fetched_at: DateTime<Utc>,
    body: Value,
}

/// A single JSON response persisted with its fetch time.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    ttl: Duration,
}

impl SnapshotFile {
    pub fn new(path: PathBuf, ttl: Duration) -> Self {
        Self { path, ttl }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored body if it was fetched less than `ttl` ago.
    pub fn read_fresh(&self) -> Option<Value> {
        self.read_fresh_at(Utc::now())
    }

    /// Missing, unreadable and future-dated snapshots all count as absent.
    pub fn read_fresh_at(&self, now: DateTime<Utc>) -> Option<Value> {
        let raw = try_read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw).ok()?;
        let age = now.signed_duration_since(snapshot.fetched_at).to_std().ok()?;
        (age < self.ttl).then_some(snapshot.body)
    }

    pub fn write(&self, body: &Value) -> Result<()> {
        self.write_at(body, Utc::now())
    }

    pub fn write_at(&self, body: &Value, fetched_at: DateTime<Utc>) -> Result<()> {
        let snapshot = Snapshot {
            fetched_at,
            body: body.clone(),
        };
        write_string(&self.path, &serde_json::to_string(&snapshot)?)?;
        Ok(())
    }
}

/// Expiring cache keyed by request identity.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, (Instant, V)>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up `key`, returning the stored value only while it is still fresh.
    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).and_then(|(stored_at, value)| {
            if now.saturating_duration_since(*stored_at) < self.ttl {
                Some(value.clone())
            } else {
                None
            }
        })
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// Store `value` as of `now`. Expired entries are dropped on the way in.
    pub fn insert_at(&self, key: K, value: V, now: Instant) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let ttl = self.ttl;
        entries.retain(|_, (stored_at, _)| now.saturating_duration_since(*stored_at) < ttl);
        entries.insert(key, (now, value));
    }

    pub fn invalidate(&self, key: &K) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
