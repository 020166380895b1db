//! Wire types and client for the henrygd NCAA API.
//! Endpoints: https://ncaa-api.henrygd.me/scoreboard/football/fbs/{year}, with
//! /schedule/football/fbs/{year} as fallback.
use bowl_picks_app::ports::feeds::{FeedError, ScheduleFeed, ScheduledGame};
use bowl_picks_core::{FinalScore, GameSide};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{get_json, http_client};

pub const NCAA_HENRYGD: &str = "https://ncaa-api.henrygd.me";

#[derive(Deserialize, Default, Debug)]
pub struct ScoreboardResponse {
    #[serde(default)]
    pub games: Vec<ScoreboardEntry>,
}

#[derive(Deserialize, Default, Debug)]
pub struct ScoreboardEntry {
    #[serde(default)]
    pub game: ScoreboardGame,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardGame {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub game_state: String,
    #[serde(default)]
    pub home: ScoreboardTeam,
    #[serde(default)]
    pub away: ScoreboardTeam,
}

#[derive(Deserialize, Default, Debug)]
pub struct ScoreboardTeam {
    #[serde(default)]
    pub names: TeamNames,
    /// Sent as a string ("24"), sometimes as a number, empty before kickoff.
    #[serde(default)]
    pub score: Option<serde_json::Value>,
}

#[derive(Deserialize, Default, Debug)]
pub struct TeamNames {
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub full: String,
}

impl TeamNames {
    fn display(&self) -> &str {
        let short = self.short.trim();
        if short.is_empty() { self.full.trim() } else { short }
    }
}

/// Season schedule, used when the scoreboard is unavailable. Carries no times or scores.
#[derive(Deserialize, Default, Debug)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub weeks: Vec<ScheduleWeek>,
}

#[derive(Deserialize, Default, Debug)]
pub struct ScheduleWeek {
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Deserialize, Default, Debug)]
pub struct ScheduleGame {
    pub name: Option<String>,
    #[serde(default)]
    pub home: ScheduleTeam,
    #[serde(default)]
    pub away: ScheduleTeam,
}

#[derive(Deserialize, Default, Debug)]
pub struct ScheduleTeam {
    #[serde(default)]
    pub name: String,
}

fn is_playoff_title(lowered: &str) -> bool {
    ["playoff", "semifinal", "championship"]
        .iter()
        .any(|word| lowered.contains(word))
}

fn parse_score(value: Option<&serde_json::Value>) -> Option<u32> {
    match value? {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_kickoff(start_time: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(start_time.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Maps one scoreboard entry to a schedule entry; entries without both teams are dropped.
pub fn map_scoreboard_game(game: &ScoreboardGame) -> Option<ScheduledGame> {
    let home_team = game.home.names.display();
    let away_team = game.away.names.display();
    if home_team.is_empty() || away_team.is_empty() {
        return None;
    }

    let title = game.title.trim();
    let lowered = title.to_lowercase();
    let bowl_name = if lowered.contains("bowl") || lowered.contains("playoff") {
        title.to_string()
    } else {
        format!("{} vs {}", away_team, home_team)
    };
    let is_playoff = is_playoff_title(&lowered);

    let score = match (
        parse_score(game.home.score.as_ref()),
        parse_score(game.away.score.as_ref()),
    ) {
        (Some(home), Some(away)) => Some(FinalScore::new(home, away)),
        _ => None,
    };
    let winner = if game.game_state == "final" {
        score
            .and_then(|s| s.leading_side())
            .map(|side| match side {
                GameSide::Home => home_team.to_string(),
                GameSide::Away => away_team.to_string(),
            })
    } else {
        None
    };

    Some(ScheduledGame {
        bowl_name,
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        kickoff: parse_kickoff(&game.start_time),
        is_playoff,
        winner,
        score,
    })
}

/// Maps one schedule entry; entries without both teams are dropped.
pub fn map_schedule_game(game: &ScheduleGame) -> Option<ScheduledGame> {
    let home_team = game.home.name.trim();
    let away_team = game.away.name.trim();
    if home_team.is_empty() || away_team.is_empty() {
        return None;
    }
    let bowl_name = match game.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("{} vs {}", away_team, home_team),
    };

    Some(ScheduledGame {
        is_playoff: is_playoff_title(&bowl_name.to_lowercase()),
        bowl_name,
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        kickoff: None,
        winner: None,
        score: None,
    })
}

/// Bowl schedule for one season from the henrygd scoreboard.
#[derive(Debug, Clone)]
pub struct NcaaScheduleFeed {
    client: Client,
    base_url: String,
    year: i32,
}

impl NcaaScheduleFeed {
    pub fn new(year: i32) -> Self {
        Self::with_base_url(NCAA_HENRYGD, year)
    }

    pub fn with_base_url(base_url: &str, year: i32) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            year,
        }
    }
}

#[async_trait::async_trait]
impl ScheduleFeed for NcaaScheduleFeed {
    async fn fetch_schedule(&self) -> Result<Vec<ScheduledGame>, FeedError> {
        let url = format!("{}/scoreboard/football/fbs/{}", self.base_url, self.year);
        let scoreboard_error =
            match get_json::<ScoreboardResponse>(self.client.get(&url), "NCAA scoreboard").await {
                Ok(response) => {
                    let games: Vec<ScheduledGame> = response
                        .games
                        .iter()
                        .filter_map(|entry| map_scoreboard_game(&entry.game))
                        .collect();
                    log::debug!(
                        "NCAA scoreboard {} returned {} usable games",
                        self.year,
                        games.len()
                    );
                    return Ok(games);
                }
                Err(e) => e,
            };

        log::warn!("{}, falling back to the season schedule", scoreboard_error);
        let url = format!("{}/schedule/football/fbs/{}", self.base_url, self.year);
        match get_json::<ScheduleResponse>(self.client.get(&url), "NCAA schedule").await {
            Ok(response) => {
                let games: Vec<ScheduledGame> = response
                    .weeks
                    .iter()
                    .flat_map(|week| week.games.iter())
                    .filter_map(map_schedule_game)
                    .collect();
                log::debug!(
                    "NCAA schedule {} returned {} usable games",
                    self.year,
                    games.len()
                );
                Ok(games)
            }
            Err(e) => {
                log::warn!("{}", e);
                Err(scoreboard_error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCOREBOARD: &str = r#"{
        "games": [
            {"game": {
                "title": "Rose Bowl Game presented by Prudential",
                "startTime": "2025-01-01T22:10:00Z",
                "gameState": "final",
                "home": {"names": {"short": "Oregon", "full": "University of Oregon"}, "score": "21"},
                "away": {"names": {"short": "Ohio St.", "full": "Ohio State"}, "score": "41"}
            }},
            {"game": {
                "title": "CFP Semifinal",
                "startTime": "2025-01-09T19:30:00-05:00",
                "gameState": "pre",
                "home": {"names": {"short": "", "full": "Notre Dame"}, "score": ""},
                "away": {"names": {"short": "Penn St.", "full": "Penn State"}}
            }},
            {"game": {
                "title": "",
                "startTime": "not a time",
                "gameState": "live",
                "home": {"names": {"short": "Navy"}, "score": 14},
                "away": {"names": {"short": "Army"}, "score": 7}
            }},
            {"game": {
                "title": "Mystery Bowl",
                "home": {"names": {"short": "Somebody"}}
            }}
        ]
    }"#;

    fn parsed() -> Vec<ScheduledGame> {
        let response: ScoreboardResponse = serde_json::from_str(SCOREBOARD).unwrap();
        response
            .games
            .iter()
            .filter_map(|e| map_scoreboard_game(&e.game))
            .collect()
    }

    #[test]
    fn test_final_game_gets_winner_and_score() {
        let games = parsed();
        assert_eq!(games.len(), 3);
        let rose = &games[0];
        assert_eq!(rose.bowl_name, "Rose Bowl Game presented by Prudential");
        assert_eq!(rose.home_team, "Oregon");
        assert_eq!(rose.away_team, "Ohio St.");
        assert_eq!(rose.winner.as_deref(), Some("Ohio St."));
        assert_eq!(rose.score, Some(FinalScore::new(21, 41)));
        assert!(!rose.is_playoff);
        assert!(rose.kickoff.is_some());
    }

    #[test]
    fn test_playoff_title_and_name_fallbacks() {
        let games = parsed();
        let semi = &games[1];
        assert!(semi.is_playoff);
        assert_eq!(semi.bowl_name, "Penn St. vs Notre Dame");
        assert_eq!(semi.home_team, "Notre Dame");
        assert_eq!(semi.winner, None);
        assert_eq!(semi.score, None);
        assert_eq!(
            semi.kickoff,
            Some(DateTime::parse_from_rfc3339("2025-01-10T00:30:00Z").unwrap().with_timezone(&Utc))
        );

        let live = &games[2];
        assert_eq!(live.bowl_name, "Army vs Navy");
        assert_eq!(live.kickoff, None);
        assert_eq!(live.winner, None);
        assert_eq!(live.score, Some(FinalScore::new(14, 7)));
    }

    #[tokio::test]
    async fn test_fetch_schedule_from_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/scoreboard/football/fbs/2024")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SCOREBOARD)
            .create_async()
            .await;

        let feed = NcaaScheduleFeed::with_base_url(&server.url(), 2024);
        let games = feed.fetch_schedule().await.unwrap();
        assert_eq!(games.len(), 3);
        mock.assert_async().await;
    }

    const SCHEDULE: &str = r#"{
        "weeks": [
            {"games": [
                {"name": "Sugar Bowl", "home": {"name": "Georgia"}, "away": {"name": "Notre Dame"}},
                {"home": {"name": "Navy"}, "away": {"name": "Army"}}
            ]},
            {"games": [
                {"name": "CFP National Championship", "home": {"name": "Ohio St."}, "away": {"name": "Notre Dame"}},
                {"name": "TBD Bowl", "home": {"name": ""}, "away": {"name": "Boise St."}}
            ]}
        ]
    }"#;

    #[tokio::test]
    async fn test_schedule_fallback_when_scoreboard_fails() {
        let mut server = mockito::Server::new_async().await;
        let _scoreboard = server
            .mock("GET", "/scoreboard/football/fbs/2024")
            .with_status(404)
            .create_async()
            .await;
        let schedule = server
            .mock("GET", "/schedule/football/fbs/2024")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SCHEDULE)
            .create_async()
            .await;

        let feed = NcaaScheduleFeed::with_base_url(&server.url(), 2024);
        let games = feed.fetch_schedule().await.unwrap();
        schedule.assert_async().await;

        assert_eq!(games.len(), 3);
        assert_eq!(games[0].bowl_name, "Sugar Bowl");
        assert_eq!(games[0].home_team, "Georgia");
        assert_eq!(games[0].kickoff, None);
        assert_eq!(games[1].bowl_name, "Army vs Navy");
        assert!(!games[1].is_playoff);
        assert!(games[2].is_playoff);
        assert_eq!(games[2].winner, None);
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/scoreboard/football/fbs/2024")
            .with_status(502)
            .create_async()
            .await;

        let feed = NcaaScheduleFeed::with_base_url(&server.url(), 2024);
        assert!(matches!(
            feed.fetch_schedule().await,
            Err(FeedError::Unavailable(_))
        ));
    }
}
