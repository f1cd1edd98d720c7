//! Core utilities for the Cricbuzz LiveStats dashboard
//!
//! This module consolidates common utilities that are used across
//! the application:
//! - `cache`: time-boxed in-memory and on-disk caches, cache paths
//! - `config`: environment-driven configuration
//! - `export`: CSV and Excel export of result tables
//! - `http`: RapidAPI header construction
//! - `table`: the generic result table every page renders

pub mod cache;
pub mod config;
pub mod export;
pub mod http;
pub mod table;

// Re-export commonly used items for convenience
pub use cache::{default_cache_dir, default_database_path, SnapshotFile, TtlCache};
pub use config::{Config, DatabaseLocation};
pub use export::{csv_string, write_csv, write_xlsx};
pub use http::rapidapi_headers;
pub use table::{Cell, Table};
