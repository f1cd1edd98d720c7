//! Error types for the Cricbuzz LiveStats dashboard

use thiserror::Error;


pub type Result<T> = std::result::Result<T, CricError>;

#[derive(Error, Debug)]
pub enum CricError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("{env_var} environment variable not set")]
    MissingApiKey { env_var: String },

    #[error("Unsupported database URL: {url} (expected sqlite:///path or a file path)")]
    InvalidDatabaseUrl { url: String },

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("A {entity} with this {detail} already exists")]
    Duplicate {
        entity: &'static str,
        detail: &'static str,
    },

    #[error("Cannot delete {entity} {id}: it has {dependents} associated. Reassign or delete these records first")]
    HasDependents {
        entity: &'static str,
        id: i64,
        dependents: String,
    },

    #[error("Unknown analytics query: {id}")]
    UnknownQuery { id: usize },

    #[error("Cricbuzz API returned no data")]
    NoData,
}

/// Form validation failures. None of these ever reach the database.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please fill the required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Home team and away team cannot be the same")]
    SameTeams,
}
