use bowl_picks_core::{FinalScore, Game, GameDetails, GameId};
use chrono::{DateTime, Utc};
use validator::Validate;

use crate::domain::{RepoError, RepoRetrieveError, RepoUpdateError};

#[async_trait::async_trait]
pub trait GameRepository {
    async fn create_game(
        &self,
        details: GameDetails,
        created_at: DateTime<Utc>,
    ) -> Result<Game, RepoError>;
    async fn get_game(&self, id: GameId) -> Result<Game, RepoRetrieveError>;
    async fn update_game(&self, id: GameId, details: GameDetails) -> Result<Game, RepoUpdateError>;
    /// Removes the game together with every pick that references it.
    async fn delete_game(&self, id: GameId) -> Result<(), RepoUpdateError>;
    /// All live games in creation order.
    async fn list_games(&self) -> Result<Vec<Game>, RepoError>;
}

#[derive(Validate)]
struct GameNamesValidator {
    #[validate(length(min = 1, max = 100, message = "bowl name must be 1-100 characters"))]
    bowl_name: String,
    #[validate(length(min = 1, max = 100, message = "home team must be 1-100 characters"))]
    home_team: String,
    #[validate(length(min = 1, max = 100, message = "away team must be 1-100 characters"))]
    away_team: String,
}

/// Checks the invariants every stored game record has to satisfy.
pub fn validate_details(details: &GameDetails) -> Result<(), String> {
    let names = GameNamesValidator {
        bowl_name: details.bowl_name.clone(),
        home_team: details.home_team.clone(),
        away_team: details.away_team.clone(),
    };
    if let Err(e) = names.validate() {
        return Err(format!("Invalid game: {}", e));
    }
    if details.home_team == details.away_team {
        return Err("home and away team must differ".to_string());
    }
    if details.spread.is_some_and(|s| !s.is_finite()) {
        return Err("spread must be a finite number".to_string());
    }
    if details.over_under.is_some_and(|t| !t.is_finite()) {
        return Err("over/under must be a finite number".to_string());
    }
    if !details.winner_is_consistent() {
        return Err(format!(
            "winner must be '{}' or '{}'",
            details.home_team, details.away_team
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, Default)]
pub struct NewGame {
    pub bowl_name: String,
    pub home_team: String,
    pub away_team: String,
    pub kickoff: Option<DateTime<Utc>>,
    pub spread: Option<f64>,
    pub over_under: Option<f64>,
    pub is_playoff: bool,
}

impl NewGame {
    pub fn into_details(self) -> Result<GameDetails, String> {
        let details = GameDetails {
            bowl_name: self.bowl_name.trim().to_string(),
            home_team: self.home_team.trim().to_string(),
            away_team: self.away_team.trim().to_string(),
            kickoff: self.kickoff,
            spread: self.spread,
            over_under: self.over_under,
            is_playoff: self.is_playoff,
            winner: None,
            score: None,
        };
        validate_details(&details)?;
        Ok(details)
    }
}

/// Partial update; `None` leaves a field as it is. For the optional fields
/// `Some(None)` clears the stored value.
#[derive(Clone, Debug, Default)]
pub struct GameUpdate {
    pub bowl_name: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub kickoff: Option<Option<DateTime<Utc>>>,
    pub spread: Option<Option<f64>>,
    pub over_under: Option<Option<f64>>,
    pub is_playoff: Option<bool>,
    pub winner: Option<String>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

impl GameUpdate {
    pub fn is_empty(&self) -> bool {
        self.bowl_name.is_none()
            && self.home_team.is_none()
            && self.away_team.is_none()
            && self.kickoff.is_none()
            && self.spread.is_none()
            && self.over_under.is_none()
            && self.is_playoff.is_none()
            && self.winner.is_none()
            && self.home_score.is_none()
            && self.away_score.is_none()
    }

    pub fn apply(&self, current: &GameDetails) -> Result<GameDetails, String> {
        let mut next = current.clone();
        if let Some(name) = &self.bowl_name {
            next.bowl_name = name.trim().to_string();
        }
        if let Some(team) = &self.home_team {
            next.home_team = team.trim().to_string();
        }
        if let Some(team) = &self.away_team {
            next.away_team = team.trim().to_string();
        }
        if let Some(kickoff) = self.kickoff {
            next.kickoff = kickoff;
        }
        if let Some(spread) = self.spread {
            next.spread = spread;
        }
        if let Some(total) = self.over_under {
            next.over_under = total;
        }
        if let Some(is_playoff) = self.is_playoff {
            next.is_playoff = is_playoff;
        }
        if let Some(winner) = &self.winner {
            next.winner = Some(winner.clone());
        }
        next.score = match (self.home_score, self.away_score, current.score) {
            (None, None, score) => score,
            (Some(home), Some(away), _) => Some(FinalScore::new(home, away)),
            (Some(home), None, Some(score)) => Some(FinalScore::new(home, score.away)),
            (None, Some(away), Some(score)) => Some(FinalScore::new(score.home, away)),
            (_, _, None) => {
                return Err("home and away score must be posted together".to_string());
            }
        };
        validate_details(&next)?;
        Ok(next)
    }
}
