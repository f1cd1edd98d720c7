//! Flattening the live-matches envelope into one row per match.

use serde::Serialize;

use super::types::{InningsScore, LiveEnvelope, TeamScore};
use crate::core::table::{Cell, Table};

/// Everything the live page prints for one match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveMatchSummary {
    pub match_type: String,
    pub series_name: String,
    pub team1: String,
    pub team2: String,
    pub description: String,
    pub format: String,
    pub status: String,
    pub ground: String,
    pub city: String,
    /// First-innings score of each side; both `None` before play starts.
    pub team1_score: Option<InningsScore>,
    pub team2_score: Option<InningsScore>,
}

impl LiveMatchSummary {
    pub fn has_scores(&self) -> bool {
        self.team1_score.is_some() || self.team2_score.is_some()
    }

    pub fn venue(&self) -> String {
        format!("{}, {}", self.ground, self.city)
    }
}

fn first_innings(score: &Option<TeamScore>) -> Option<InningsScore> {
    score.as_ref().and_then(|s| s.inngs1)
}

/// Walk type → series → match, skipping advert slots.
pub fn summarize(envelope: &LiveEnvelope) -> Vec<LiveMatchSummary> {
    let mut out = Vec::new();
    for bucket in &envelope.type_matches {
        let match_type = bucket.match_type.clone().unwrap_or_else(|| "Unknown".to_string());
        for series in &bucket.series_matches {
            let Some(wrapper) = &series.series_ad_wrapper else {
                continue;
            };
            let series_name = wrapper
                .series_name
                .clone()
                .unwrap_or_else(|| "Unknown Series".to_string());

            for m in &wrapper.matches {
                let info = &m.match_info;
                out.push(LiveMatchSummary {
                    match_type: match_type.clone(),
                    series_name: series_name.clone(),
                    team1: info.team1.team_name.clone().unwrap_or_default(),
                    team2: info.team2.team_name.clone().unwrap_or_default(),
                    description: info.match_desc.clone().unwrap_or_default(),
                    format: info.match_format.clone().unwrap_or_default(),
                    status: info.status.clone().unwrap_or_default(),
                    ground: info.venue_info.ground.clone().unwrap_or_default(),
                    city: info.venue_info.city.clone().unwrap_or_default(),
                    team1_score: first_innings(&m.match_score.team1_score),
                    team2_score: first_innings(&m.match_score.team2_score),
                });
            }
        }
    }
    out
}

/// One row per match, for `--csv`/`--xlsx` and machine output.
pub fn to_table(matches: &[LiveMatchSummary]) -> Table {
    let mut table = Table::new([
        "match_type",
        "series",
        "team1",
        "team2",
        "match",
        "format",
        "status",
        "venue",
        "team1_score",
        "team2_score",
    ]);
    for m in matches {
        table.push_row(vec![
            Cell::from(m.match_type.as_str()),
            Cell::from(m.series_name.as_str()),
            Cell::from(m.team1.as_str()),
            Cell::from(m.team2.as_str()),
            Cell::from(m.description.as_str()),
            Cell::from(m.format.as_str()),
            Cell::from(m.status.as_str()),
            Cell::from(m.venue()),
            Cell::from(m.team1_score.map(|s| s.to_string())),
            Cell::from(m.team2_score.map(|s| s.to_string())),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope() -> LiveEnvelope {
        serde_json::from_value(json!({
            "typeMatches": [
                {
                    "matchType": "League",
                    "seriesMatches": [
                        { "adDetail": {} },
                        {
                            "seriesAdWrapper": {
                                "seriesName": "Indian Premier League 2025",
                                "matches": [
                                    {
                                        "matchInfo": {
                                            "matchDesc": "12th Match",
                                            "matchFormat": "T20",
                                            "status": "Innings Break",
                                            "team1": { "teamName": "Mumbai Indians" },
                                            "team2": { "teamName": "Chennai Super Kings" },
                                            "venueInfo": { "ground": "Wankhede Stadium", "city": "Mumbai" }
                                        },
                                        "matchScore": {
                                            "team1Score": { "inngs1": { "runs": 187, "wickets": 5, "overs": 20 } }
                                        }
                                    },
                                    {
                                        "matchInfo": {
                                            "matchDesc": "13th Match",
                                            "status": "Starts at 19:30"
                                        }
                                    }
                                ]
                            }
                        }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_summarize_skips_adverts() {
        let matches = summarize(&envelope());
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].match_type, "League");
        assert_eq!(matches[0].series_name, "Indian Premier League 2025");
        assert_eq!(matches[0].venue(), "Wankhede Stadium, Mumbai");
    }

    #[test]
    fn test_scores_only_when_present() {
        let matches = summarize(&envelope());
        assert!(matches[0].has_scores());
        assert_eq!(matches[0].team1_score.unwrap().runs, 187);
        assert!(matches[0].team2_score.is_none());
        assert!(!matches[1].has_scores());
    }

    #[test]
    fn test_summary_table() {
        let table = to_table(&summarize(&envelope()));
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.column("team1_score").unwrap()[0],
            &Cell::from("187/5 in 20 overs")
        );
        assert!(table.column("team2_score").unwrap()[1].is_null());
    }

    #[test]
    fn test_no_matches() {
        assert!(summarize(&LiveEnvelope::default()).is_empty());
    }
}
