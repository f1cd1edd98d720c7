//! Unit tests for storage functionality

use super::*;
use crate::cli::types::{
    BattingStyle, InningsId, MatchId, MatchStatus, PlayerId, Role, TeamId, TossDecision, VenueId,
    VictoryType,
};
use crate::core::table::Cell;
use crate::CricError;
use chrono::NaiveDate;

fn create_test_db() -> CricketDatabase {
    CricketDatabase::new_in_memory().unwrap()
}

fn team(name: &str, country: &str, short: Option<&str>) -> TeamRecord {
    TeamRecord {
        name: name.to_string(),
        country: country.to_string(),
        short_name: short.map(str::to_string),
        logo_url: None,
    }
}

fn venue(name: &str, city: &str, capacity: Option<u32>) -> VenueRecord {
    VenueRecord {
        name: name.to_string(),
        city: Some(city.to_string()),
        country: Some("India".to_string()),
        capacity,
        established: None,
    }
}

fn player(name: &str, team_id: TeamId, role: Role) -> PlayerRecord {
    PlayerRecord {
        full_name: name.to_string(),
        short_name: None,
        team_id,
        country: "India".to_string(),
        role,
        batting_style: Some(BattingStyle::RightHanded),
        bowling_style: None,
        dob: None,
    }
}

fn fixture(home: TeamId, away: TeamId, venue_id: Option<VenueId>) -> MatchRecord {
    MatchRecord {
        series_id: None,
        description: "1st ODI".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        venue_id,
        home_team_id: home,
        away_team_id: away,
        status: MatchStatus::Upcoming,
        winner_team_id: None,
        toss_winner_id: None,
        toss_decision: None,
        victory_margin: None,
        victory_type: None,
    }
}

fn innings(match_id: MatchId, batting: TeamId) -> InningsRecord {
    InningsRecord {
        match_id,
        innings_no: 1,
        batting_team_id: batting,
        bowling_team_id: None,
        runs: 250,
        wickets: 8,
        overs: 50.0,
    }
}

fn batting(innings_id: InningsId, player_id: PlayerId, runs: u32, balls: u32) -> BattingRecord {
    BattingRecord {
        innings_id,
        player_id,
        runs,
        balls,
        fours: 4,
        sixes: 1,
        dismissal: Some("caught".to_string()),
        batting_position: 3,
        strike_rate: 0.0,
    }
}

fn bowling(innings_id: InningsId, player_id: PlayerId, wickets: u32, runs: u32) -> BowlingRecord {
    BowlingRecord {
        innings_id,
        player_id,
        overs: 10.0,
        maidens: 1,
        runs,
        wickets,
        economy: runs as f64 / 10.0,
        dots: 30,
        wides: 0,
        no_balls: 0,
    }
}

/// Two teams, a venue, one match with one innings and one player on each side.
struct Seeded {
    db: CricketDatabase,
    india: TeamId,
    australia: TeamId,
    venue: VenueId,
    match_id: MatchId,
    innings_id: InningsId,
    batter: PlayerId,
    bowler: PlayerId,
}

fn seeded() -> Seeded {
    let mut db = create_test_db();
    let india = db.insert_team(&team("India", "India", Some("IND"))).unwrap();
    let australia = db
        .insert_team(&team("Australia", "Australia", Some("AUS")))
        .unwrap();
    let venue = db
        .insert_venue(&venue("Wankhede Stadium", "Mumbai", Some(33000)))
        .unwrap();
    let batter = db
        .insert_player(&player("Virat Kohli", india, Role::Batsman))
        .unwrap();
    let bowler = db
        .insert_player(&PlayerRecord {
            country: "Australia".to_string(),
            ..player("Pat Cummins", australia, Role::Bowler)
        })
        .unwrap();
    let match_id = db
        .insert_match(&fixture(india, australia, Some(venue)))
        .unwrap();
    let innings_id = db.insert_innings(&innings(match_id, india)).unwrap();

    Seeded {
        db,
        india,
        australia,
        venue,
        match_id,
        innings_id,
        batter,
        bowler,
    }
}

fn row_count(db: &CricketDatabase, table: &str) -> i64 {
    let t = db
        .query_table(&format!("SELECT COUNT(*) FROM {table}"), &[])
        .unwrap();
    match t.rows[0][0] {
        Cell::Integer(n) => n,
        ref other => panic!("Expected integer count, got {:?}", other),
    }
}

#[test]
fn test_database_creation() {
    let db = create_test_db();
    let names = db.table_names().unwrap();
    assert_eq!(
        names,
        vec![
            "batting",
            "bowling",
            "innings",
            "matches",
            "partnerships",
            "player_aggregates",
            "players",
            "series",
            "teams",
            "venues",
        ]
    );
}

#[test]
fn test_schema_init_is_idempotent() {
    let db = create_test_db();
    db.initialize_schema().unwrap();
    assert_eq!(db.table_names().unwrap().len(), 10);
}

#[test]
fn test_table_descriptions_cover_schema() {
    let db = create_test_db();
    let mut described: Vec<&str> = TABLE_DESCRIPTIONS.iter().map(|(name, _)| *name).collect();
    described.sort_unstable();
    assert_eq!(db.table_names().unwrap(), described);
}

#[test]
fn test_team_round_trip() {
    let mut db = create_test_db();
    let record = TeamRecord {
        name: "New Zealand".to_string(),
        country: "New Zealand".to_string(),
        short_name: Some("NZ".to_string()),
        logo_url: Some("https://example.com/nz.png".to_string()),
    };
    let id = db.insert_team(&record).unwrap();

    let stored = db.get_team(id).unwrap().unwrap();
    assert_eq!(stored.team_id, id);
    assert_eq!(stored.record, record);
}

#[test]
fn test_duplicate_team_rejected_case_insensitive() {
    let mut db = create_test_db();
    db.insert_team(&team("India", "India", Some("IND"))).unwrap();

    let by_name = db.insert_team(&team("INDIA", "India", None));
    assert!(matches!(
        by_name,
        Err(CricError::Duplicate { entity: "team", .. })
    ));

    let by_short = db.insert_team(&team("India A", "India", Some("ind")));
    assert!(matches!(by_short, Err(CricError::Duplicate { .. })));
    assert_eq!(row_count(&db, "teams"), 1);
}

#[test]
fn test_update_team_may_keep_its_own_name() {
    let mut db = create_test_db();
    let id = db.insert_team(&team("India", "India", Some("IND"))).unwrap();

    let mut record = team("India", "Bharat", Some("IND"));
    record.logo_url = Some("https://example.com/ind.png".to_string());
    db.update_team(id, &record).unwrap();

    assert_eq!(db.get_team(id).unwrap().unwrap().record, record);
}

#[test]
fn test_update_missing_team_is_not_found() {
    let mut db = create_test_db();
    let result = db.update_team(TeamId::new(99), &team("Ghost", "Nowhere", None));
    assert!(matches!(
        result,
        Err(CricError::NotFound { entity: "team", id: 99 })
    ));
}

#[test]
fn test_delete_team_guarded_by_players_and_matches() {
    let mut s = seeded();

    let deps = s.db.team_dependents(s.india).unwrap();
    assert_eq!(deps.players, 1);
    assert_eq!(deps.matches, 1);

    match s.db.delete_team(s.india) {
        Err(CricError::HasDependents { entity, dependents, .. }) => {
            assert_eq!(entity, "team");
            assert_eq!(dependents, "1 players and 1 matches");
        }
        other => panic!("Expected HasDependents, got {:?}", other),
    }
    assert_eq!(row_count(&s.db, "teams"), 2);
}

#[test]
fn test_delete_unreferenced_team() {
    let mut db = create_test_db();
    let id = db.insert_team(&team("Scotland", "Scotland", None)).unwrap();
    db.delete_team(id).unwrap();
    assert!(db.get_team(id).unwrap().is_none());
    assert!(matches!(
        db.delete_team(id),
        Err(CricError::NotFound { .. })
    ));
}

#[test]
fn test_list_teams_counts_and_sort() {
    let mut s = seeded();
    s.db.insert_team(&team("Zimbabwe", "Zimbabwe", None)).unwrap();
    s.db
        .insert_player(&player("Rohit Sharma", s.india, Role::Batsman))
        .unwrap();

    let by_players = s
        .db
        .list_teams(&TeamFilter {
            search: None,
            sort: TeamSort::MostPlayers,
        })
        .unwrap();
    assert_eq!(by_players.len(), 3);
    assert_eq!(by_players.rows[0][1], Cell::from("India"));
    let counts = by_players.column("player_count").unwrap();
    assert_eq!(*counts[0], Cell::Integer(2));

    let searched = s
        .db
        .list_teams(&TeamFilter {
            search: Some("aus".to_string()),
            sort: TeamSort::Name,
        })
        .unwrap();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched.rows[0][1], Cell::from("Australia"));
}

#[test]
fn test_duplicate_venue_is_per_city() {
    let mut db = create_test_db();
    db.insert_venue(&venue("Central Stadium", "Mumbai", None))
        .unwrap();

    let same_city = db.insert_venue(&venue("central stadium", "MUMBAI", None));
    assert!(matches!(
        same_city,
        Err(CricError::Duplicate { entity: "venue", .. })
    ));

    db.insert_venue(&venue("Central Stadium", "Delhi", None))
        .unwrap();
    assert_eq!(row_count(&db, "venues"), 2);
}

#[test]
fn test_delete_venue_guarded_by_matches() {
    let mut s = seeded();
    assert_eq!(s.db.venue_match_count(s.venue).unwrap(), 1);
    assert!(matches!(
        s.db.delete_venue(s.venue),
        Err(CricError::HasDependents { entity: "venue", .. })
    ));

    let empty = s
        .db
        .insert_venue(&venue("Eden Gardens", "Kolkata", Some(66000)))
        .unwrap();
    s.db.delete_venue(empty).unwrap();
    assert_eq!(row_count(&s.db, "venues"), 1);
}

#[test]
fn test_list_venues_filters() {
    let mut s = seeded();
    s.db.insert_venue(&venue("Eden Gardens", "Kolkata", Some(66000)))
        .unwrap();
    s.db.insert_venue(&venue("Small Ground", "Pune", None))
        .unwrap();

    let big = s
        .db
        .list_venues(&VenueFilter {
            min_capacity: Some(50000),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(big.len(), 1);
    assert_eq!(big.rows[0][1], Cell::from("Eden Gardens"));

    let all = s.db.list_venues(&VenueFilter::default()).unwrap();
    assert_eq!(all.len(), 3);
    // largest first, unknown capacity last
    assert_eq!(all.rows[0][1], Cell::from("Eden Gardens"));
    assert_eq!(all.rows[2][1], Cell::from("Small Ground"));
    let matches = all.column("match_count").unwrap();
    assert_eq!(*matches[1], Cell::Integer(1));
}

#[test]
fn test_player_round_trip() {
    let mut db = create_test_db();
    let team_id = db.insert_team(&team("India", "India", None)).unwrap();
    let record = PlayerRecord {
        full_name: "Ravindra Jadeja".to_string(),
        short_name: Some("Jadeja".to_string()),
        team_id,
        country: "India".to_string(),
        role: Role::AllRounder,
        batting_style: Some(BattingStyle::LeftHanded),
        bowling_style: Some("Left-arm orthodox".to_string()),
        dob: NaiveDate::from_ymd_opt(1988, 12, 6),
    };
    let id = db.insert_player(&record).unwrap();

    let stored = db.get_player(id).unwrap().unwrap();
    assert_eq!(stored.record, record);
}

#[test]
fn test_list_players_filters() {
    let mut s = seeded();
    s.db
        .insert_player(&player("Jasprit Bumrah", s.india, Role::Bowler))
        .unwrap();

    let bowlers = s
        .db
        .list_players(&PlayerFilter {
            role: Some(Role::Bowler),
            ..Default::default()
        })
        .unwrap();
    let names: Vec<String> = bowlers.rows.iter().map(|r| r[1].to_string()).collect();
    assert_eq!(names, vec!["Jasprit Bumrah", "Pat Cummins"]);

    let indian_bowlers = s
        .db
        .list_players(&PlayerFilter {
            team: Some("India".to_string()),
            role: Some(Role::Bowler),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(indian_bowlers.len(), 1);

    let searched = s
        .db
        .list_players(&PlayerFilter {
            search: Some("KOHLI".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched.column("team_name").unwrap()[0], &Cell::from("India"));
}

#[test]
fn test_delete_player_cascades_statistics() {
    let mut s = seeded();
    s.db
        .insert_batting(&batting(s.innings_id, s.batter, 82, 53))
        .unwrap();
    s.db
        .insert_bowling(&bowling(s.innings_id, s.batter, 1, 20))
        .unwrap();
    s.db
        .insert_batting(&batting(s.innings_id, s.bowler, 5, 9))
        .unwrap();

    let removed = s.db.delete_player(s.batter).unwrap();
    assert_eq!(removed.batting, 1);
    assert_eq!(removed.bowling, 1);
    assert!(s.db.get_player(s.batter).unwrap().is_none());
    assert_eq!(row_count(&s.db, "batting"), 1);
    assert_eq!(row_count(&s.db, "bowling"), 0);
}

#[test]
fn test_match_round_trip() {
    let mut s = seeded();
    let record = MatchRecord {
        status: MatchStatus::Completed,
        winner_team_id: Some(s.australia),
        toss_winner_id: Some(s.india),
        toss_decision: Some(TossDecision::Bat),
        victory_margin: Some(6),
        victory_type: Some(VictoryType::Wickets),
        ..fixture(s.india, s.australia, Some(s.venue))
    };
    let id = s.db.insert_match(&record).unwrap();

    assert_eq!(s.db.get_match(id).unwrap().unwrap().record, record);
}

#[test]
fn test_delete_match_cascades_innings() {
    let mut s = seeded();
    s.db
        .insert_batting(&batting(s.innings_id, s.batter, 82, 53))
        .unwrap();
    s.db
        .insert_bowling(&bowling(s.innings_id, s.bowler, 3, 45))
        .unwrap();

    let deps = s.db.match_dependents(s.match_id).unwrap();
    assert_eq!(deps.innings, 1);
    assert_eq!(deps.batting, 1);
    assert_eq!(deps.bowling, 1);

    s.db.delete_match(s.match_id).unwrap();
    assert_eq!(row_count(&s.db, "matches"), 0);
    assert_eq!(row_count(&s.db, "innings"), 0);
    assert_eq!(row_count(&s.db, "batting"), 0);
    assert_eq!(row_count(&s.db, "bowling"), 0);
    // players survive
    assert_eq!(row_count(&s.db, "players"), 2);
}

#[test]
fn test_list_matches_search_and_status() {
    let mut s = seeded();
    let mut done = fixture(s.australia, s.india, None);
    done.description = "2nd ODI".to_string();
    done.date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
    done.status = MatchStatus::Completed;
    s.db.insert_match(&done).unwrap();

    let all = s.db.list_matches(&MatchFilter::default()).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all.rows[0][1], Cell::from("2nd ODI"));

    let completed = s
        .db
        .list_matches(&MatchFilter {
            status: Some(MatchStatus::Completed),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(completed.len(), 1);

    let by_team = s
        .db
        .list_matches(&MatchFilter {
            search: Some("austr".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(by_team.len(), 2);
}

#[test]
fn test_batting_round_trip_and_listing() {
    let mut s = seeded();
    let mut record = batting(s.innings_id, s.batter, 82, 53);
    record.strike_rate = 154.72;
    let id = s.db.insert_batting(&record).unwrap();
    s.db
        .insert_batting(&batting(s.innings_id, s.bowler, 12, 20))
        .unwrap();

    assert_eq!(s.db.get_batting(id).unwrap().unwrap().record, record);

    let fifties = s
        .db
        .list_batting(&BattingFilter {
            min_runs: Some(50),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(fifties.len(), 1);
    assert_eq!(fifties.column("player_name").unwrap()[0], &Cell::from("Virat Kohli"));

    s.db.delete_batting(id).unwrap();
    assert!(s.db.get_batting(id).unwrap().is_none());
}

#[test]
fn test_bowling_listing_and_summary() {
    let mut s = seeded();
    let other = s
        .db
        .insert_player(&player("Mitchell Starc", s.australia, Role::Bowler))
        .unwrap();
    s.db
        .insert_bowling(&bowling(s.innings_id, s.bowler, 3, 45))
        .unwrap();
    s.db
        .insert_bowling(&bowling(s.innings_id, other, 3, 38))
        .unwrap();

    let table = s.db.list_bowling(&BowlingFilter::default()).unwrap();
    assert_eq!(table.len(), 2);
    // equal wickets: better economy first
    assert_eq!(table.column("player_name").unwrap()[0], &Cell::from("Mitchell Starc"));

    let summary = summarize_bowling(&table).unwrap();
    assert_eq!(summary.total_wickets, 6);
    assert_eq!(summary.best_player, "Mitchell Starc");
    assert_eq!(summary.best_wickets, 3);
    assert_eq!(summary.best_runs, 38);

    let economical = s
        .db
        .list_bowling(&BowlingFilter {
            max_economy: Some(4.0),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(economical.len(), 1);
}

#[test]
fn test_summary_of_empty_listing_is_none() {
    let db = create_test_db();
    let table = db.list_bowling(&BowlingFilter::default()).unwrap();
    assert!(summarize_bowling(&table).is_none());
}

#[test]
fn test_lookups() {
    let s = seeded();
    let teams = s.db.lookup_teams().unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].label, "Australia");

    let innings = s.db.lookup_innings().unwrap();
    assert_eq!(innings.len(), 1);
    assert_eq!(innings[0].label, "1st ODI - India");
    assert_eq!(innings[0].id, s.innings_id.as_i64());

    assert!(s.db.lookup_series().unwrap().is_empty());
    assert_eq!(s.db.lookup_matches().unwrap().len(), 1);
}

#[test]
fn test_stddev_is_population() {
    let db = create_test_db();
    let table = db
        .query_table(
            "SELECT STDDEV(column1) FROM (VALUES (2), (4), (4), (4), (5), (5), (7), (9))",
            &[],
        )
        .unwrap();
    let sd = table.rows[0][0].as_f64().unwrap();
    assert!((sd - 2.0).abs() < 1e-9, "got {}", sd);
}

#[test]
fn test_stddev_of_nothing_is_null() {
    let db = create_test_db();
    let table = db
        .query_table("SELECT STDDEV(runs) FROM batting", &[])
        .unwrap();
    assert!(table.rows[0][0].is_null());
}

#[test]
fn test_catalog_is_numbered() {
    assert_eq!(ANALYTICS_QUERIES.len(), 25);
    for (i, q) in ANALYTICS_QUERIES.iter().enumerate() {
        assert_eq!(q.id, i + 1);
        assert!(!q.question.is_empty());
    }
    assert!(find_query(0).is_none());
    assert!(find_query(26).is_none());
}

#[test]
fn test_every_analytics_query_runs_on_empty_database() {
    let db = create_test_db();
    for q in ANALYTICS_QUERIES {
        let result = db.run_analytics(q.id);
        assert!(result.is_ok(), "query {} failed: {:?}", q.id, result.err());
    }
}

#[test]
fn test_unknown_analytics_query() {
    let db = create_test_db();
    assert!(matches!(
        db.run_analytics(42),
        Err(CricError::UnknownQuery { id: 42 })
    ));
}

#[test]
fn test_analytics_on_seeded_data() {
    let mut s = seeded();
    s.db
        .insert_player(&PlayerRecord {
            country: "Australia".to_string(),
            ..player("Mitchell Marsh", s.australia, Role::AllRounder)
        })
        .unwrap();

    let india = s.db.run_analytics(1).unwrap();
    assert_eq!(india.columns, vec!["full_name", "role", "batting_style", "bowling_style"]);
    assert_eq!(india.len(), 1);
    assert_eq!(india.rows[0][0], Cell::from("Virat Kohli"));

    let roles = s.db.run_analytics(6).unwrap();
    assert_eq!(roles.len(), 3);

    let mut done = fixture(s.india, s.australia, Some(s.venue));
    done.status = MatchStatus::Completed;
    done.winner_team_id = Some(s.india);
    done.toss_winner_id = Some(s.india);
    done.toss_decision = Some(TossDecision::Bat);
    s.db.insert_match(&done).unwrap();

    let toss = s.db.run_analytics(17).unwrap();
    assert_eq!(toss.len(), 1);
    assert_eq!(toss.column("win_percentage").unwrap()[0], &Cell::Real(100.0));

    let wins = s.db.run_analytics(5).unwrap();
    assert_eq!(wins.rows[0][0], Cell::from("India"));
    assert_eq!(wins.rows[0][1], Cell::Integer(1));
}

#[test]
fn test_execute_script_loads_rows() {
    let db = create_test_db();
    db.execute_script(
        "INSERT INTO series (name, host_country, format, start_date, planned_matches)
         VALUES ('Border-Gavaskar Trophy', 'Australia', 'Test', '2024-11-22', 5);
         INSERT INTO series (name, format, start_date) VALUES ('Old Series', 'ODI', '2019-01-01');",
    )
    .unwrap();

    let series_2024 = db.run_analytics(8).unwrap();
    assert_eq!(series_2024.len(), 1);
    assert_eq!(series_2024.rows[0][0], Cell::from("Border-Gavaskar Trophy"));
}
