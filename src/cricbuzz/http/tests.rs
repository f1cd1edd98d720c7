//! Unit tests for the Cricbuzz client against a mock server

use super::*;
use crate::CricError;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn test_config(server: &MockServer) -> Config {
    Config {
        api_key: Some("test-key".to_string()),
        base_url: server.uri(),
        max_retries: 2,
        retry_backoff: Duration::from_millis(5),
        live_cache_ttl: Duration::from_secs(60),
        cache_dir: None,
        ..Config::default()
    }
}

fn disk_cached_config(server: &MockServer, dir: &tempfile::TempDir) -> Config {
    Config {
        cache_dir: Some(dir.path().to_path_buf()),
        ..test_config(server)
    }
}

fn live_body() -> Value {
    json!({
        "typeMatches": [{
            "matchType": "International",
            "seriesMatches": [{
                "seriesAdWrapper": {
                    "seriesName": "India tour of England",
                    "matches": [{ "matchInfo": { "matchId": 1, "matchDesc": "3rd Test" } }]
                }
            }]
        }]
    })
}

#[tokio::test]
async fn test_requests_carry_rapidapi_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/matches/v1/live"))
        .and(header("x-rapidapi-key", "test-key"))
        .and(header("x-rapidapi-host", "127.0.0.1"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = CricbuzzClient::new(&test_config(&server)).unwrap();
    let body = client.live_matches(false).await.unwrap();
    assert_eq!(body, live_body());
}

#[tokio::test]
async fn test_retries_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats/v1/player/1413"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats/v1/player/1413"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Virat Kohli" })))
        .mount(&server)
        .await;

    let client = CricbuzzClient::new(&test_config(&server)).unwrap();
    let body = client.player_profile(1413).await.unwrap();

    assert_eq!(body["name"], "Virat Kohli");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_gives_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = CricbuzzClient::new(&test_config(&server)).unwrap();
    let result = client.career_info(1).await;

    assert!(matches!(result, Err(CricError::Http(_))));
    // first attempt plus two retries
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_invalid_json_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.max_retries = 0;
    let client = CricbuzzClient::new(&config).unwrap();

    assert!(client.search_players("kohli").await.is_err());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_live_matches_cached_within_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/matches/v1/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = CricbuzzClient::new(&test_config(&server)).unwrap();
    let first = client.live_matches(false).await.unwrap();
    let second = client.live_matches(false).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_live_matches_refetched_after_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/matches/v1/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .expect(2)
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.live_cache_ttl = Duration::from_millis(50);
    let client = CricbuzzClient::new(&config).unwrap();

    client.live_matches(false).await.unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;
    client.live_matches(false).await.unwrap();
}

#[tokio::test]
async fn test_live_matches_shared_between_clients_through_disk() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/matches/v1/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = disk_cached_config(&server, &dir);

    let first = CricbuzzClient::new(&config)
        .unwrap()
        .live_matches(false)
        .await
        .unwrap();
    let second = CricbuzzClient::new(&config)
        .unwrap()
        .live_matches(false)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert!(dir.path().join(LIVE_SNAPSHOT_FILE).exists());
}

#[tokio::test]
async fn test_stale_disk_snapshot_is_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/matches/v1/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = disk_cached_config(&server, &dir);
    SnapshotFile::new(dir.path().join(LIVE_SNAPSHOT_FILE), config.live_cache_ttl)
        .write_at(
            &json!({"typeMatches": []}),
            chrono::Utc::now() - chrono::Duration::minutes(5),
        )
        .unwrap();

    let body = CricbuzzClient::new(&config)
        .unwrap()
        .live_matches(false)
        .await
        .unwrap();
    assert_eq!(body, live_body());
}

#[tokio::test]
async fn test_unwritable_cache_dir_does_not_fail_live() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/matches/v1/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();
    let config = Config {
        cache_dir: Some(blocker),
        ..test_config(&server)
    };

    let body = CricbuzzClient::new(&config)
        .unwrap()
        .live_matches(false)
        .await
        .unwrap();
    assert_eq!(body, live_body());
}

#[tokio::test]
async fn test_refresh_bypasses_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/matches/v1/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = CricbuzzClient::new(&test_config(&server)).unwrap();
    client.live_matches(false).await.unwrap();
    client.live_matches(true).await.unwrap();
}

#[tokio::test]
async fn test_search_sends_player_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats/v1/player/search"))
        .and(query_param("plrN", "Kohli"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "player": [{ "id": "1413", "name": "Virat Kohli" }] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = CricbuzzClient::new(&test_config(&server)).unwrap();
    let body = client.search_players("  Kohli ").await.unwrap();
    assert_eq!(body["player"][0]["id"], "1413");
}

#[tokio::test]
async fn test_stats_path_per_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats/v1/player/8733/bowling"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "headers": ["ROWHEADER"] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CricbuzzClient::new(&test_config(&server)).unwrap();
    let body = client.player_stats(8733, StatKind::Bowling).await.unwrap();
    assert_eq!(body["headers"][0], "ROWHEADER");
}

#[test]
fn test_client_requires_api_key() {
    let config = Config::default();
    assert!(matches!(
        CricbuzzClient::new(&config),
        Err(CricError::MissingApiKey { .. })
    ));
}
