//! Storage layer for the cricket statistics database
//!
//! This module provides a clean abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: CRUD operations and dropdown lookups
//! - `catalog`: The predefined analytical questions
//! - `analytics`: Running catalog questions

pub mod analytics;
pub mod catalog;
pub mod models;
pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

// Re-export the main types and database struct for easy access
pub use catalog::{find_query, AnalyticsQuery, ANALYTICS_QUERIES, TABLE_DESCRIPTIONS};
pub use models::*;
pub use queries::{summarize_bowling, LIST_LIMIT, LOOKUP_LIMIT};
pub use schema::CricketDatabase;
