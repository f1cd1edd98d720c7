//! The fixed catalog of analytical questions and the SQL that answers them.
//!
//! All statements are written for SQLite: `strftime` stands in for year and
//! quarter extraction, two-argument `MIN`/`MAX` for `LEAST`/`GREATEST`, and
//! `STDDEV` is the population standard deviation registered on every
//! connection (see `schema`).

/// One predefined question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsQuery {
    /// 1-based position in the catalog.
    pub id: usize,
    pub question: &'static str,
    pub sql: &'static str,
}

/// Look up a question by its 1-based number.
pub fn find_query(id: usize) -> Option<&'static AnalyticsQuery> {
    ANALYTICS_QUERIES.iter().find(|q| q.id == id)
}

/// Table name and a one-line description, for the "available tables" listing.
pub const TABLE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("teams", "Team information including name, country and logo."),
    (
        "venues",
        "Venue details like name, city, country, capacity and year established.",
    ),
    (
        "series",
        "Series information including name, host country, format and dates.",
    ),
    (
        "matches",
        "Match details including teams, venue, result, toss and status.",
    ),
    (
        "players",
        "Player details including role and batting and bowling styles.",
    ),
    (
        "innings",
        "Innings of each match with batting and bowling teams and the score.",
    ),
    (
        "batting",
        "Individual batting performances: runs, balls, boundaries and strike rate.",
    ),
    (
        "bowling",
        "Individual bowling performances: overs, maidens, runs, wickets and economy.",
    ),
    (
        "partnerships",
        "Batting partnerships between two players with runs and wicket number.",
    ),
    (
        "player_aggregates",
        "Career statistics per player and format.",
    ),
];

pub const ANALYTICS_QUERIES: &[AnalyticsQuery] = &[
    AnalyticsQuery {
        id: 1,
        question: "Find all players who represent India",
        sql: "SELECT full_name, role, batting_style, bowling_style
FROM players
WHERE country = 'India'",
    },
    AnalyticsQuery {
        id: 2,
        question: "Show recent matches from the last 30 days",
        sql: "SELECT m.description,
       home.name AS home_team,
       away.name AS away_team,
       v.name AS venue_name,
       v.city,
       m.date
FROM matches m
JOIN teams home ON m.home_team_id = home.team_id
JOIN teams away ON m.away_team_id = away.team_id
JOIN venues v ON m.venue_id = v.venue_id
WHERE m.date >= date('now', '-30 day')
  AND m.status = 'completed'
ORDER BY m.date DESC",
    },
    AnalyticsQuery {
        id: 3,
        question: "Top 10 highest run scorers in ODI cricket",
        sql: "SELECT p.full_name,
       pa.runs AS total_runs,
       pa.avg AS batting_average,
       pa.hundreds AS centuries
FROM player_aggregates pa
JOIN players p ON pa.player_id = p.player_id
WHERE pa.format = 'ODI'
ORDER BY pa.runs DESC
LIMIT 10",
    },
    AnalyticsQuery {
        id: 4,
        question: "Large capacity venues (50,000+ spectators)",
        sql: "SELECT name, city, country, capacity
FROM venues
WHERE capacity > 50000
ORDER BY capacity DESC",
    },
    AnalyticsQuery {
        id: 5,
        question: "Team win counts",
        sql: "SELECT t.name AS team_name,
       COUNT(m.winner_team_id) AS wins
FROM teams t
LEFT JOIN matches m ON t.team_id = m.winner_team_id
WHERE m.status = 'completed'
GROUP BY t.team_id, t.name
ORDER BY wins DESC",
    },
    AnalyticsQuery {
        id: 6,
        question: "Player count by role",
        sql: "SELECT role, COUNT(*) AS player_count
FROM players
WHERE role IS NOT NULL
GROUP BY role
ORDER BY player_count DESC",
    },
    AnalyticsQuery {
        id: 7,
        question: "Highest individual scores by format",
        sql: "SELECT format, MAX(high_score) AS highest_score
FROM player_aggregates
WHERE format IN ('Test', 'ODI', 'T20')
GROUP BY format",
    },
    AnalyticsQuery {
        id: 8,
        question: "Series starting in 2024",
        sql: "SELECT name, host_country, format, start_date, planned_matches
FROM series
WHERE strftime('%Y', start_date) = '2024'",
    },
    AnalyticsQuery {
        id: 9,
        question: "All-rounders with 1000+ runs and 50+ wickets",
        sql: "SELECT p.full_name,
       SUM(pa.runs) AS total_runs,
       SUM(pa.wickets) AS total_wickets,
       pa.format
FROM players p
JOIN player_aggregates pa ON p.player_id = pa.player_id
WHERE p.role = 'All-rounder'
  AND pa.format IN ('ODI', 'Test')
GROUP BY p.player_id, p.full_name, pa.format
HAVING SUM(pa.runs) > 1000
   AND SUM(pa.wickets) > 50
ORDER BY pa.format, total_runs DESC",
    },
    AnalyticsQuery {
        id: 10,
        question: "Last 20 completed matches",
        sql: "SELECT m.description,
       home.name AS home_team,
       away.name AS away_team,
       winner.name AS winning_team,
       m.victory_margin,
       m.victory_type,
       v.name AS venue_name
FROM matches m
JOIN teams home ON m.home_team_id = home.team_id
JOIN teams away ON m.away_team_id = away.team_id
JOIN teams winner ON m.winner_team_id = winner.team_id
JOIN venues v ON m.venue_id = v.venue_id
WHERE m.status = 'completed'
ORDER BY m.date DESC
LIMIT 20",
    },
    AnalyticsQuery {
        id: 11,
        question: "Player performance across formats",
        sql: "WITH format_stats AS (
    SELECT p.player_id, p.full_name, pa.format, pa.runs, pa.avg
    FROM players p
    JOIN player_aggregates pa ON p.player_id = pa.player_id
    WHERE pa.runs > 0
),
multi_format_players AS (
    SELECT player_id, full_name
    FROM format_stats
    GROUP BY player_id, full_name
    HAVING COUNT(DISTINCT format) >= 2
)
SELECT mfp.full_name,
       MAX(CASE WHEN fs.format = 'Test' THEN fs.runs END) AS test_runs,
       MAX(CASE WHEN fs.format = 'ODI' THEN fs.runs END) AS odi_runs,
       MAX(CASE WHEN fs.format = 'T20' THEN fs.runs END) AS t20_runs,
       ROUND(AVG(fs.avg), 2) AS overall_avg
FROM multi_format_players mfp
JOIN format_stats fs ON mfp.player_id = fs.player_id
GROUP BY mfp.player_id, mfp.full_name",
    },
    AnalyticsQuery {
        id: 12,
        question: "Team performance home vs away",
        sql: "SELECT t.name AS team_name,
       COUNT(CASE WHEN v.country = t.country THEN m.winner_team_id END) AS home_wins,
       COUNT(CASE WHEN v.country != t.country THEN m.winner_team_id END) AS away_wins
FROM teams t
LEFT JOIN matches m ON t.team_id = m.winner_team_id
LEFT JOIN venues v ON m.venue_id = v.venue_id
WHERE m.status = 'completed'
GROUP BY t.team_id, t.name
ORDER BY COUNT(m.winner_team_id) DESC",
    },
    AnalyticsQuery {
        id: 13,
        question: "100+ run partnerships",
        sql: "SELECT p1.full_name AS player_a,
       p2.full_name AS player_b,
       pt.runs AS partnership_runs,
       i.innings_no
FROM partnerships pt
JOIN players p1 ON pt.player_a = p1.player_id
JOIN players p2 ON pt.player_b = p2.player_id
JOIN innings i ON pt.innings_id = i.innings_id
WHERE pt.runs >= 100
ORDER BY pt.runs DESC",
    },
    AnalyticsQuery {
        id: 14,
        question: "Bowling performance by venue",
        sql: "SELECT p.full_name,
       v.name AS venue_name,
       v.city,
       v.country,
       COUNT(DISTINCT m.match_id) AS matches_played,
       ROUND(AVG(b.economy), 2) AS avg_economy,
       SUM(b.wickets) AS total_wickets,
       ROUND(AVG(b.overs), 2) AS avg_overs_per_match,
       ROUND(AVG(b.maidens), 2) AS avg_maidens_per_match
FROM bowling b
JOIN innings i ON b.innings_id = i.innings_id
JOIN matches m ON i.match_id = m.match_id
JOIN venues v ON m.venue_id = v.venue_id
JOIN players p ON b.player_id = p.player_id
WHERE b.overs >= 4
GROUP BY p.player_id, p.full_name, v.venue_id, v.name, v.city, v.country
HAVING COUNT(DISTINCT m.match_id) >= 3
ORDER BY avg_economy ASC",
    },
    AnalyticsQuery {
        id: 15,
        question: "Player performance in close matches",
        sql: "WITH close_matches AS (
    SELECT match_id
    FROM matches
    WHERE status = 'completed'
      AND ((victory_type = 'runs' AND victory_margin < 50)
           OR (victory_type = 'wickets' AND victory_margin < 5))
),
close_batting AS (
    SELECT b.player_id,
           i.match_id,
           b.runs,
           CASE WHEN m.winner_team_id = i.batting_team_id THEN 1 ELSE 0 END AS team_won
    FROM batting b
    JOIN innings i ON b.innings_id = i.innings_id
    JOIN matches m ON i.match_id = m.match_id
    WHERE m.match_id IN (SELECT match_id FROM close_matches)
),
player_stats AS (
    SELECT p.player_id,
           p.full_name,
           COUNT(DISTINCT cb.match_id) AS close_matches_played,
           ROUND(AVG(cb.runs), 2) AS avg_runs_in_close_matches,
           SUM(cb.team_won) AS close_matches_won_when_batted,
           ROUND(SUM(cb.team_won) * 100.0 / COUNT(DISTINCT cb.match_id), 2) AS win_percentage_when_batted
    FROM close_batting cb
    JOIN players p ON cb.player_id = p.player_id
    GROUP BY p.player_id, p.full_name
    HAVING COUNT(DISTINCT cb.match_id) >= 2
)
SELECT full_name,
       close_matches_played,
       avg_runs_in_close_matches,
       close_matches_won_when_batted,
       win_percentage_when_batted,
       CASE
           WHEN avg_runs_in_close_matches >= 50 AND win_percentage_when_batted >= 60 THEN 'Exceptional Performer'
           WHEN avg_runs_in_close_matches >= 35 AND win_percentage_when_batted >= 50 THEN 'Strong Performer'
           WHEN avg_runs_in_close_matches >= 25 THEN 'Good Performer'
           ELSE 'Average Performer'
       END AS performance_category
FROM player_stats
ORDER BY avg_runs_in_close_matches DESC, win_percentage_when_batted DESC",
    },
    AnalyticsQuery {
        id: 16,
        question: "Yearly batting performance trends",
        sql: "WITH yearly_stats AS (
    SELECT b.player_id,
           CAST(strftime('%Y', m.date) AS INTEGER) AS year,
           COUNT(DISTINCT m.match_id) AS matches_played,
           AVG(b.runs) AS avg_runs,
           AVG(b.strike_rate) AS avg_strike_rate
    FROM batting b
    JOIN innings i ON b.innings_id = i.innings_id
    JOIN matches m ON i.match_id = m.match_id
    WHERE m.date >= '2020-01-01'
    GROUP BY b.player_id, strftime('%Y', m.date)
    HAVING COUNT(DISTINCT m.match_id) >= 5
)
SELECT p.full_name,
       ys.year,
       ys.matches_played,
       ROUND(ys.avg_runs, 2) AS avg_runs_per_match,
       ROUND(ys.avg_strike_rate, 2) AS avg_strike_rate
FROM yearly_stats ys
JOIN players p ON ys.player_id = p.player_id
ORDER BY p.full_name, ys.year",
    },
    AnalyticsQuery {
        id: 17,
        question: "Toss advantage analysis",
        sql: "SELECT toss_decision,
       COUNT(*) AS total_matches,
       COUNT(CASE WHEN winner_team_id = toss_winner_id THEN 1 END) AS wins_after_toss,
       ROUND(COUNT(CASE WHEN winner_team_id = toss_winner_id THEN 1 END) * 100.0 / COUNT(*), 2) AS win_percentage
FROM matches
WHERE status = 'completed'
  AND toss_decision IS NOT NULL
GROUP BY toss_decision",
    },
    AnalyticsQuery {
        id: 18,
        question: "Most economical bowlers in limited-overs cricket",
        sql: "SELECT p.full_name,
       pa.format,
       pa.matches AS total_matches,
       ROUND(pa.economy, 2) AS economy_rate,
       pa.wickets AS total_wickets,
       pa.bowling_avg
FROM player_aggregates pa
JOIN players p ON pa.player_id = p.player_id
WHERE pa.format IN ('ODI', 'T20')
  AND pa.matches >= 10
  AND pa.wickets > 0
ORDER BY pa.economy ASC",
    },
    AnalyticsQuery {
        id: 19,
        question: "Batting consistency analysis",
        sql: "WITH player_consistency AS (
    SELECT p.player_id,
           p.full_name,
           AVG(b.runs) AS avg_runs,
           STDDEV(b.runs) AS std_dev_runs,
           COUNT(*) AS innings_played
    FROM batting b
    JOIN innings i ON b.innings_id = i.innings_id
    JOIN matches m ON i.match_id = m.match_id
    JOIN players p ON b.player_id = p.player_id
    WHERE m.date >= '2022-01-01'
      AND b.balls >= 10
    GROUP BY p.player_id, p.full_name
    HAVING COUNT(*) >= 5
)
SELECT full_name,
       ROUND(avg_runs, 2) AS average_runs,
       ROUND(std_dev_runs, 2) AS standard_deviation,
       innings_played,
       ROUND(std_dev_runs / NULLIF(avg_runs, 0), 2) AS consistency_ratio
FROM player_consistency
ORDER BY std_dev_runs ASC",
    },
    AnalyticsQuery {
        id: 20,
        question: "Player matches and averages by format",
        sql: "SELECT p.full_name,
       COUNT(DISTINCT CASE WHEN s.format = 'Test' THEN m.match_id END) AS test_matches,
       MAX(CASE WHEN pa.format = 'Test' THEN pa.avg END) AS test_avg,
       COUNT(DISTINCT CASE WHEN s.format = 'ODI' THEN m.match_id END) AS odi_matches,
       MAX(CASE WHEN pa.format = 'ODI' THEN pa.avg END) AS odi_avg,
       COUNT(DISTINCT CASE WHEN s.format = 'T20' THEN m.match_id END) AS t20_matches,
       MAX(CASE WHEN pa.format = 'T20' THEN pa.avg END) AS t20_avg,
       COUNT(DISTINCT m.match_id) AS total_matches
FROM players p
JOIN batting b ON p.player_id = b.player_id
JOIN innings i ON b.innings_id = i.innings_id
JOIN matches m ON i.match_id = m.match_id
JOIN series s ON m.series_id = s.series_id
LEFT JOIN player_aggregates pa ON p.player_id = pa.player_id AND pa.format = s.format
GROUP BY p.player_id, p.full_name
HAVING COUNT(DISTINCT m.match_id) >= 15
ORDER BY total_matches DESC",
    },
    AnalyticsQuery {
        id: 21,
        question: "Comprehensive player performance ranking",
        sql: "WITH performance_scores AS (
    SELECT p.full_name,
           pa.format,
           (pa.runs * 0.01)
             + (COALESCE(pa.avg, 0) * 0.5)
             + (COALESCE(pa.strike_rate, 0) * 0.3) AS batting_points,
           (COALESCE(pa.wickets, 0) * 2)
             + ((50 - COALESCE(pa.bowling_avg, 50)) * 0.5)
             + ((6 - COALESCE(pa.economy, 6)) * 2) AS bowling_points,
           (COALESCE(pa.catches, 0) * 0.5)
             + (COALESCE(pa.stumpings, 0) * 1) AS fielding_points,
           pa.runs,
           pa.avg,
           pa.strike_rate,
           pa.wickets
    FROM player_aggregates pa
    JOIN players p ON pa.player_id = p.player_id
    WHERE pa.matches >= 10
)
SELECT full_name,
       format,
       ROUND(batting_points + bowling_points + fielding_points, 2) AS total_score,
       ROUND(batting_points, 2) AS batting_score,
       ROUND(bowling_points, 2) AS bowling_score,
       ROUND(fielding_points, 2) AS fielding_score,
       runs,
       avg AS batting_avg,
       strike_rate,
       wickets
FROM performance_scores
ORDER BY format, total_score DESC",
    },
    AnalyticsQuery {
        id: 22,
        question: "Head-to-head team analysis",
        sql: "WITH head_to_head AS (
    SELECT MIN(m.home_team_id, m.away_team_id) AS team1_id,
           MAX(m.home_team_id, m.away_team_id) AS team2_id,
           t1.name AS team1_name,
           t2.name AS team2_name,
           COUNT(*) AS total_matches,
           COUNT(CASE WHEN m.winner_team_id = MIN(m.home_team_id, m.away_team_id) THEN 1 END) AS team1_wins,
           COUNT(CASE WHEN m.winner_team_id = MAX(m.home_team_id, m.away_team_id) THEN 1 END) AS team2_wins,
           AVG(CASE WHEN m.winner_team_id = MIN(m.home_team_id, m.away_team_id) THEN m.victory_margin END) AS team1_avg_margin,
           AVG(CASE WHEN m.winner_team_id = MAX(m.home_team_id, m.away_team_id) THEN m.victory_margin END) AS team2_avg_margin
    FROM matches m
    JOIN teams t1 ON MIN(m.home_team_id, m.away_team_id) = t1.team_id
    JOIN teams t2 ON MAX(m.home_team_id, m.away_team_id) = t2.team_id
    WHERE m.status = 'completed'
      AND m.date >= date('now', '-3 years')
    GROUP BY MIN(m.home_team_id, m.away_team_id),
             MAX(m.home_team_id, m.away_team_id),
             t1.name, t2.name
    HAVING COUNT(*) >= 5
)
SELECT team1_name,
       team2_name,
       total_matches,
       team1_wins,
       team2_wins,
       ROUND(team1_avg_margin, 1) AS team1_avg_victory_margin,
       ROUND(team2_avg_margin, 1) AS team2_avg_victory_margin,
       ROUND(team1_wins * 100.0 / total_matches, 1) AS team1_win_percentage,
       ROUND(team2_wins * 100.0 / total_matches, 1) AS team2_win_percentage
FROM head_to_head
ORDER BY total_matches DESC",
    },
    AnalyticsQuery {
        id: 23,
        question: "Recent player form analysis",
        sql: "WITH recent_matches AS (
    SELECT b.player_id,
           m.date,
           b.runs,
           b.strike_rate,
           ROW_NUMBER() OVER (PARTITION BY b.player_id ORDER BY m.date DESC) AS match_rank
    FROM batting b
    JOIN innings i ON b.innings_id = i.innings_id
    JOIN matches m ON i.match_id = m.match_id
),
player_stats AS (
    SELECT player_id,
           AVG(CASE WHEN match_rank <= 5 THEN runs END) AS avg_last_5,
           AVG(runs) AS avg_last_10,
           AVG(strike_rate) AS avg_sr_last_10,
           COUNT(CASE WHEN runs >= 50 THEN 1 END) AS scores_above_50,
           STDDEV(runs) AS consistency_std
    FROM recent_matches
    WHERE match_rank <= 10
    GROUP BY player_id
    HAVING COUNT(*) >= 5
)
SELECT p.full_name,
       ROUND(ps.avg_last_5, 2) AS avg_last_5_matches,
       ROUND(ps.avg_last_10, 2) AS avg_last_10_matches,
       ROUND(ps.avg_sr_last_10, 2) AS avg_strike_rate,
       ps.scores_above_50,
       ROUND(ps.consistency_std, 2) AS consistency_score,
       CASE
           WHEN ps.avg_last_5 > 45 AND ps.scores_above_50 >= 3 THEN 'Excellent Form'
           WHEN ps.avg_last_5 > 35 AND ps.scores_above_50 >= 2 THEN 'Good Form'
           WHEN ps.avg_last_5 > 25 THEN 'Average Form'
           ELSE 'Poor Form'
       END AS form_category
FROM player_stats ps
JOIN players p ON ps.player_id = p.player_id
ORDER BY ps.avg_last_5 DESC",
    },
    AnalyticsQuery {
        id: 24,
        question: "Successful batting partnerships",
        sql: "WITH partnership_stats AS (
    SELECT player_a,
           player_b,
           COUNT(*) AS total_partnerships,
           AVG(runs) AS avg_partnership,
           MAX(runs) AS highest_partnership,
           COUNT(CASE WHEN runs >= 50 THEN 1 END) AS partnerships_50_plus,
           ROUND(COUNT(CASE WHEN runs >= 50 THEN 1 END) * 100.0 / COUNT(*), 2) AS success_rate
    FROM partnerships
    GROUP BY player_a, player_b
    HAVING COUNT(*) >= 5
)
SELECT p1.full_name AS player_a,
       p2.full_name AS player_b,
       ps.total_partnerships,
       ROUND(ps.avg_partnership, 2) AS avg_runs,
       ps.highest_partnership,
       ps.partnerships_50_plus,
       ps.success_rate
FROM partnership_stats ps
JOIN players p1 ON ps.player_a = p1.player_id
JOIN players p2 ON ps.player_b = p2.player_id
ORDER BY ps.success_rate DESC, ps.avg_partnership DESC",
    },
    AnalyticsQuery {
        id: 25,
        question: "Player performance time-series analysis",
        sql: "WITH quarterly_raw AS (
    SELECT b.player_id,
           CAST(strftime('%Y', m.date) AS INTEGER) AS yr,
           (CAST(strftime('%m', m.date) AS INTEGER) + 2) / 3 AS qtr,
           COUNT(DISTINCT m.match_id) AS matches_played,
           AVG(b.runs) AS avg_runs,
           AVG(b.strike_rate) AS avg_sr
    FROM batting b
    JOIN innings i ON b.innings_id = i.innings_id
    JOIN matches m ON i.match_id = m.match_id
    WHERE m.status = 'completed'
    GROUP BY b.player_id, yr, qtr
    HAVING COUNT(DISTINCT m.match_id) >= 3
),
qualified_players AS (
    SELECT player_id
    FROM quarterly_raw
    GROUP BY player_id
    HAVING COUNT(*) >= 6
),
quarterly_stats AS (
    SELECT qr.player_id,
           qr.yr || '-Q' || qr.qtr AS quarter_label,
           qr.yr * 4 + qr.qtr AS quarter_index,
           qr.avg_runs,
           qr.avg_sr
    FROM quarterly_raw qr
    JOIN qualified_players qp ON qr.player_id = qp.player_id
),
quarterly_comparison AS (
    SELECT player_id,
           quarter_label,
           quarter_index,
           avg_runs,
           avg_sr,
           LAG(avg_runs) OVER (PARTITION BY player_id ORDER BY quarter_index) AS prev_avg_runs,
           LAG(avg_sr) OVER (PARTITION BY player_id ORDER BY quarter_index) AS prev_avg_sr
    FROM quarterly_stats
),
trajectory_means AS (
    SELECT player_id,
           AVG(quarter_index) AS mean_index,
           AVG(avg_runs) AS mean_runs,
           AVG(avg_sr) AS mean_sr
    FROM quarterly_stats
    GROUP BY player_id
),
career_trajectory AS (
    SELECT q.player_id,
           SUM((q.quarter_index - c.mean_index) * (q.avg_runs - c.mean_runs))
             / SUM((q.quarter_index - c.mean_index) * (q.quarter_index - c.mean_index)) AS runs_trend,
           SUM((q.quarter_index - c.mean_index) * (q.avg_sr - c.mean_sr))
             / SUM((q.quarter_index - c.mean_index) * (q.quarter_index - c.mean_index)) AS sr_trend
    FROM quarterly_stats q
    JOIN trajectory_means c ON q.player_id = c.player_id
    GROUP BY q.player_id
)
SELECT p.full_name,
       qc.quarter_label,
       ROUND(qc.avg_runs, 2) AS quarterly_avg_runs,
       ROUND(qc.avg_sr, 2) AS quarterly_avg_sr,
       ROUND(qc.avg_runs - qc.prev_avg_runs, 2) AS runs_change,
       ROUND(qc.avg_sr - qc.prev_avg_sr, 2) AS sr_change,
       CASE
           WHEN (qc.avg_runs - qc.prev_avg_runs) > 10 AND (qc.avg_sr - qc.prev_avg_sr) > 5 THEN 'Improving'
           WHEN (qc.avg_runs - qc.prev_avg_runs) < -10 AND (qc.avg_sr - qc.prev_avg_sr) < -5 THEN 'Declining'
           ELSE 'Stable'
       END AS performance_trend,
       CASE
           WHEN ct.runs_trend > 0.3 AND ct.sr_trend > 0.2 THEN 'Career Ascending'
           WHEN ct.runs_trend < -0.3 AND ct.sr_trend < -0.2 THEN 'Career Declining'
           ELSE 'Career Stable'
       END AS career_phase
FROM quarterly_comparison qc
JOIN career_trajectory ct ON qc.player_id = ct.player_id
JOIN players p ON qc.player_id = p.player_id
WHERE qc.prev_avg_runs IS NOT NULL
ORDER BY p.full_name, qc.quarter_index",
    },
];
