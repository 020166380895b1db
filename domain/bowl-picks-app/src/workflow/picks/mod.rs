use bowl_picks_core::{Game, Pick, PickOutcome};
use chrono::{DateTime, Utc};

pub mod list;
pub mod submit;
pub mod users;

#[derive(Clone, Debug, PartialEq)]
pub struct PickView {
    pub pick: Pick,
    pub outcome: PickOutcome,
    pub is_locked: bool,
}

impl PickView {
    pub fn of(pick: Pick, game: &Game, as_of: DateTime<Utc>) -> Self {
        Self {
            outcome: pick.outcome(&game.details),
            is_locked: game.is_locked(as_of),
            pick,
        }
    }
}
