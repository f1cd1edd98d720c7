//! Cricbuzz LiveStats library
//!
//! A cricket dashboard for the terminal: live scores from the Cricbuzz API,
//! a catalog of analytical SQL questions over a local SQLite database, and
//! validated create/read/update/delete forms for that database.
//!
//! ## Features
//!
//! - **Live Matches**: Current matches grouped by type and series, with a short-lived cache
//! - **Player Stats**: Search, profile, batting, bowling and career tables
//! - **Analytics**: 25 predefined questions with CSV and Excel export
//! - **Admin**: CRUD over players, matches, scorecards, teams and venues
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cricbuzz_livestats::{core::DatabaseLocation, storage::CricketDatabase};
//!
//! # fn example() -> cricbuzz_livestats::Result<()> {
//! let db = CricketDatabase::open(&DatabaseLocation::InMemory)?;
//! let table = db.run_analytics(6)?;
//! print!("{}", table.render());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export CRICBUZZ_API_KEY=your-rapidapi-key
//! export DATABASE_URL=sqlite:///cricbuzz.db
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod cricbuzz;
pub mod error;
pub mod forms;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{MatchId, PlayerId, TeamId, VenueId};
pub use error::{CricError, Result, ValidationError};
