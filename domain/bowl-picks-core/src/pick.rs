use chrono::{DateTime, Utc};

use crate::{GameDetails, GameId, ParticipantName};

#[derive(Clone, Debug, PartialEq)]
pub struct Pick {
    pub game_id: GameId,
    pub participant: ParticipantName,
    pub picked_team: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    Pending,
    Correct,
    Incorrect,
}

impl PickOutcome {
    pub fn is_correct(&self) -> Option<bool> {
        match self {
            PickOutcome::Pending => None,
            PickOutcome::Correct => Some(true),
            PickOutcome::Incorrect => Some(false),
        }
    }
}

impl Pick {
    /// Derived from the game as it is now, never stored.
    pub fn outcome(&self, game: &GameDetails) -> PickOutcome {
        match game.winner.as_deref() {
            None => PickOutcome::Pending,
            Some(winner) if winner == self.picked_team => PickOutcome::Correct,
            Some(_) => PickOutcome::Incorrect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(team: &str) -> Pick {
        Pick {
            game_id: GameId(1),
            participant: "Emily".to_string(),
            picked_team: team.to_string(),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_outcome_follows_current_winner() {
        let mut game = GameDetails::new("Sugar Bowl", "Georgia", "Notre Dame");
        let p = pick("Georgia");
        assert_eq!(p.outcome(&game), PickOutcome::Pending);

        game.winner = Some("Notre Dame".to_string());
        assert_eq!(p.outcome(&game), PickOutcome::Incorrect);

        game.winner = Some("Georgia".to_string());
        assert_eq!(p.outcome(&game), PickOutcome::Correct);
        assert_eq!(p.outcome(&game).is_correct(), Some(true));
    }
}
