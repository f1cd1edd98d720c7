//! Serde models for the parts of the Cricbuzz payloads the dashboard reads.
//!
//! The provider's schema is undocumented and loose: ids arrive as strings or
//! numbers, most fields can be missing. Everything here defaults rather than
//! fails so a partial payload still renders.

use crate::core::table::{Cell, Table};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;


/// Shown when a player has neither a profile image nor a face image id.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/150x150/800000/FFFFFF?text=No+Image";

fn face_image_url(face_image_id: &str) -> String {
    format!(
        "https://www.cricbuzz.com/a/img/v1/152x152/i1/c{}.jpg",
        face_image_id
    )
}

/// Accept `"123"`, `123` or nothing.
fn de_lossy_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn de_lossy_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_lossy_string(deserializer)?.and_then(|s| s.trim().parse().ok()))
}

/// Render a loose JSON scalar the way a person would type it.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ----------------------------------------------------------------------
// Live matches
// ----------------------------------------------------------------------

/// Root of `/matches/v1/live`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEnvelope {
    #[serde(default)]
    pub type_matches: Vec<TypeMatches>,
}

/// One match type bucket (International, League, Domestic, Women).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMatches {
    #[serde(default)]
    pub match_type: Option<String>,
    #[serde(default)]
    pub series_matches: Vec<SeriesMatches>,
}

/// Either a series with its matches or an advert (no wrapper).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMatches {
    #[serde(default)]
    pub series_ad_wrapper: Option<SeriesAdWrapper>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesAdWrapper {
    #[serde(default, deserialize_with = "de_lossy_id")]
    pub series_id: Option<u64>,
    #[serde(default)]
    pub series_name: Option<String>,
    #[serde(default)]
    pub matches: Vec<LiveMatch>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMatch {
    #[serde(default)]
    pub match_info: MatchInfo,
    #[serde(default)]
    pub match_score: MatchScore,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    #[serde(default, deserialize_with = "de_lossy_id")]
    pub match_id: Option<u64>,
    #[serde(default)]
    pub series_name: Option<String>,
    #[serde(default)]
    pub match_desc: Option<String>,
    #[serde(default)]
    pub match_format: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub team1: TeamInfo,
    #[serde(default)]
    pub team2: TeamInfo,
    #[serde(default)]
    pub venue_info: VenueInfo,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub team_s_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VenueInfo {
    #[serde(default)]
    pub ground: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    #[serde(default)]
    pub team1_score: Option<TeamScore>,
    #[serde(default)]
    pub team2_score: Option<TeamScore>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TeamScore {
    #[serde(default)]
    pub inngs1: Option<InningsScore>,
    #[serde(default)]
    pub inngs2: Option<InningsScore>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct InningsScore {
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub wickets: u32,
    #[serde(default)]
    pub overs: f64,
}

impl std::fmt::Display for InningsScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} in {} overs", self.runs, self.wickets, self.overs)
    }
}

// ----------------------------------------------------------------------
// Player search and profile
// ----------------------------------------------------------------------

/// Root of `/stats/v1/player/search`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerSearch {
    #[serde(default)]
    pub player: Vec<PlayerHit>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHit {
    #[serde(default, deserialize_with = "de_lossy_id")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "de_lossy_string")]
    pub face_image_id: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
}

/// Root of `/stats/v1/player/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    #[serde(default, deserialize_with = "de_lossy_id")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nick_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Batting style.
    #[serde(default)]
    pub bat: Option<String>,
    /// Bowling style.
    #[serde(default)]
    pub bowl: Option<String>,
    #[serde(default)]
    pub intl_team: Option<String>,
    /// Comma-separated list of every side the player has represented.
    #[serde(default)]
    pub teams: Option<String>,
    #[serde(default, alias = "DoB")]
    pub dob: Option<String>,
    #[serde(default)]
    pub birth_place: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "de_lossy_string")]
    pub face_image_id: Option<String>,
    #[serde(default, rename = "webURL")]
    pub web_url: Option<String>,
    #[serde(default)]
    pub rankings: Rankings,
}

/// ICC rankings split by discipline. Keys are rank labels such as
/// `testRank` or `odiBestRank`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Rankings {
    #[serde(default)]
    pub bat: BTreeMap<String, Value>,
    #[serde(default)]
    pub bowl: BTreeMap<String, Value>,
    #[serde(default)]
    pub all: BTreeMap<String, Value>,
}

impl Rankings {
    pub fn is_empty(&self) -> bool {
        self.bat.is_empty() && self.bowl.is_empty() && self.all.is_empty()
    }
}

impl PlayerProfile {
    /// Profile image, upgraded to https; otherwise the face image derived
    /// from `faceImageId`; otherwise a placeholder.
    pub fn image_url(&self) -> String {
        if let Some(image) = self.image.as_deref().filter(|s| !s.is_empty()) {
            return match image.strip_prefix("http://") {
                Some(rest) => format!("https://{}", rest),
                None => image.to_string(),
            };
        }
        self.face_image_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(face_image_url)
            .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string())
    }
}

// ----------------------------------------------------------------------
// Stats and career tables
// ----------------------------------------------------------------------

/// Root of `/stats/v1/player/{id}/batting` and `/bowling`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatsTable {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub values: Vec<StatsRow>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatsRow {
    #[serde(default)]
    pub values: Vec<Value>,
}

impl StatsTable {
    /// The stats grid, headers as columns. Empty when the payload had no headers.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(self.headers.iter().cloned());
        if self.headers.is_empty() {
            return table;
        }
        for row in &self.values {
            table.push_row(row.values.iter().map(|v| Cell::from(value_text(v))).collect());
        }
        table
    }
}

/// Root of `/stats/v1/player/{id}/career`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CareerInfo {
    #[serde(default)]
    pub values: Vec<CareerFormat>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerFormat {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub debut: Option<String>,
    #[serde(default)]
    pub last_played: Option<String>,
}

impl CareerInfo {
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(["Format", "Debut", "Last Played"]);
        for f in &self.values {
            table.push_row(vec![
                Cell::from(f.name.clone()),
                Cell::from(f.debut.clone()),
                Cell::from(f.last_played.clone()),
            ]);
        }
        table
    }
}
