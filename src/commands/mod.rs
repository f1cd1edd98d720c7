//! Page handlers for the Cricbuzz LiveStats CLI

pub mod admin;
pub mod analytics;
pub mod common;
pub mod db;
pub mod home;
pub mod live_matches;
pub mod player_stats;

pub use common::CommandContext;
