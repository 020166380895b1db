use crate::{GameDetails, GameSide};

/// A point spread seen from one team's perspective.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpreadLine(pub f64);

impl SpreadLine {
    pub fn is_pick_em(&self) -> bool {
        self.0 == 0.0
    }
}

impl std::fmt::Display for SpreadLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_pick_em() {
            write!(f, "PK")
        } else if self.0 > 0.0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// The home-relative spread flipped to `team`'s side.
pub fn spread_for(game: &GameDetails, team: &str) -> Option<SpreadLine> {
    let spread = game.spread?;
    match game.side_of(team)? {
        GameSide::Home => Some(SpreadLine(spread)),
        // -0.0 would otherwise render as "-0"
        GameSide::Away if spread == 0.0 => Some(SpreadLine(0.0)),
        GameSide::Away => Some(SpreadLine(-spread)),
    }
}

pub fn spread_display(game: &GameDetails, team: &str) -> String {
    spread_for(game, team)
        .map(|line| line.to_string())
        .unwrap_or_default()
}
