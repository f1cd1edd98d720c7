//! End-to-end tests of the Cricbuzz client against a mock API

use cricbuzz_livestats::{
    cli::{types::StatKind, OutputArgs},
    commands::{live_matches::handle_live_matches, CommandContext},
    core::Config,
    cricbuzz::{summarize, CricbuzzClient, LiveEnvelope, PlayerProfile, StatsTable},
};
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn client(server: &MockServer) -> CricbuzzClient {
    let config = Config {
        api_key: Some("secret".to_string()),
        base_url: server.uri(),
        retry_backoff: Duration::from_millis(1),
        cache_dir: None,
        ..Config::default()
    };
    CricbuzzClient::new(&config).unwrap()
}

fn live_context(server: &MockServer, cache: &tempfile::TempDir) -> CommandContext {
    CommandContext::new(Config {
        api_key: Some("secret".to_string()),
        base_url: server.uri(),
        retry_backoff: Duration::from_millis(1),
        live_cache_ttl: Duration::from_secs(60),
        cache_dir: Some(cache.path().to_path_buf()),
        ..Config::default()
    })
}

async fn mount_live(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/matches/v1/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "typeMatches": [{
                "matchType": "League",
                "seriesMatches": [{
                    "seriesAdWrapper": {
                        "seriesName": "The Hundred Men's Competition 2024",
                        "matches": [{
                            "matchInfo": {
                                "matchDesc": "Eliminator",
                                "matchFormat": "HUNDRED",
                                "status": "Innings break",
                                "team1": { "teamName": "Oval Invincibles" },
                                "team2": { "teamName": "Southern Brave" }
                            }
                        }]
                    }
                }]
            }]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_repeated_live_page_loads_make_one_request() {
    let server = MockServer::start().await;
    mount_live(&server, 1).await;
    let cache = tempfile::tempdir().unwrap();
    let ctx = live_context(&server, &cache);

    handle_live_matches(&ctx, false, &OutputArgs::default())
        .await
        .unwrap();
    handle_live_matches(&ctx, false, &OutputArgs::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_live_page_refresh_always_requests() {
    let server = MockServer::start().await;
    mount_live(&server, 2).await;
    let cache = tempfile::tempdir().unwrap();
    let ctx = live_context(&server, &cache);

    handle_live_matches(&ctx, false, &OutputArgs::default())
        .await
        .unwrap();
    handle_live_matches(&ctx, true, &OutputArgs::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_live_page_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/matches/v1/live"))
        .and(header("x-rapidapi-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "typeMatches": [{
                "matchType": "Domestic",
                "seriesMatches": [{
                    "seriesAdWrapper": {
                        "seriesName": "Ranji Trophy",
                        "matches": [{
                            "matchInfo": {
                                "matchDesc": "Elite Group A",
                                "matchFormat": "TEST",
                                "status": "Day 2: Stumps",
                                "team1": { "teamName": "Mumbai" },
                                "team2": { "teamName": "Baroda" },
                                "venueInfo": { "ground": "Sharad Pawar Cricket Academy", "city": "Mumbai" }
                            },
                            "matchScore": {
                                "team1Score": { "inngs1": { "runs": 214, "wickets": 10, "overs": 78.4 } },
                                "team2Score": { "inngs1": { "runs": 90, "wickets": 2, "overs": 31 } }
                            }
                        }]
                    }
                }]
            }]
        })))
        .mount(&server)
        .await;

    let body = client(&server).live_matches(false).await.unwrap();
    let envelope: LiveEnvelope = serde_json::from_value(body).unwrap();
    let matches = summarize(&envelope);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].series_name, "Ranji Trophy");
    assert_eq!(
        matches[0].team1_score.unwrap().to_string(),
        "214/10 in 78.4 overs"
    );
}

#[tokio::test]
async fn test_profile_and_stats_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats/v1/player/1413"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1413",
            "name": "Virat Kohli",
            "faceImageId": "170661"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats/v1/player/1413/batting"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "headers": ["ROWHEADER", "Test", "ODI"],
            "values": [{ "values": ["Runs", "9230", "14181"] }]
        })))
        .mount(&server)
        .await;

    let client = client(&server);

    let profile: PlayerProfile =
        serde_json::from_value(client.player_profile(1413).await.unwrap()).unwrap();
    assert_eq!(profile.name.as_deref(), Some("Virat Kohli"));
    assert_eq!(
        profile.image_url(),
        "https://www.cricbuzz.com/a/img/v1/152x152/i1/c170661.jpg"
    );

    let stats: StatsTable =
        serde_json::from_value(client.player_stats(1413, StatKind::Batting).await.unwrap())
            .unwrap();
    let table = stats.to_table();
    assert_eq!(table.columns, vec!["ROWHEADER", "Test", "ODI"]);
    assert_eq!(table.rows[0][1].to_string(), "9230");
}
