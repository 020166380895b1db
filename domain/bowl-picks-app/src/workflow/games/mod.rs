use bowl_picks_core::{Game, spread_display};
use chrono::{DateTime, Utc};

pub mod create;
pub mod delete;
pub mod import;
pub mod list;
pub mod refresh_odds;
pub mod update;

/// A game as presented to callers, with its lock state evaluated at read time.
#[derive(Clone, Debug, PartialEq)]
pub struct GameView {
    pub game: Game,
    pub is_locked: bool,
    pub home_spread: String,
    pub away_spread: String,
}

impl GameView {
    pub fn at(game: Game, as_of: DateTime<Utc>) -> Self {
        let details = &game.details;
        Self {
            is_locked: game.is_locked(as_of),
            home_spread: spread_display(details, &details.home_team),
            away_spread: spread_display(details, &details.away_team),
            game,
        }
    }
}
