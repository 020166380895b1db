use bowl_picks_core::FinalScore;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// One entry of an upstream bowl schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledGame {
    pub bowl_name: String,
    pub home_team: String,
    pub away_team: String,
    pub kickoff: Option<DateTime<Utc>>,
    pub is_playoff: bool,
    pub winner: Option<String>,
    pub score: Option<FinalScore>,
}

/// Betting line for a matchup, spread relative to the home team.
#[derive(Clone, Debug, PartialEq)]
pub struct GameOdds {
    pub home_team: String,
    pub away_team: String,
    pub spread: Option<f64>,
    pub over_under: Option<f64>,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed unavailable: {0}")]
    Unavailable(String),
    #[error("malformed feed response: {0}")]
    Malformed(String),
}

#[async_trait::async_trait]
pub trait ScheduleFeed {
    async fn fetch_schedule(&self) -> Result<Vec<ScheduledGame>, FeedError>;
}

#[async_trait::async_trait]
pub trait OddsFeed {
    fn is_configured(&self) -> bool;
    async fn fetch_odds(&self) -> Result<Vec<GameOdds>, FeedError>;
    /// Remaining request quota reported by the provider, if known.
    async fn remaining_requests(&self) -> Option<u32>;
}
