//! Cricbuzz API integration

pub mod http;
pub mod live;
pub mod types;

pub use http::CricbuzzClient;
pub use live::{summarize, LiveMatchSummary};
pub use types::{CareerInfo, LiveEnvelope, PlayerProfile, PlayerSearch, StatsTable};
