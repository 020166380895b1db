use chrono::{DateTime, Utc};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(pub i64);

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameSide {
    Home,
    Away,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinalScore {
    pub home: u32,
    pub away: u32,
}

impl FinalScore {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// The side with more points, `None` on a tie.
    pub fn leading_side(&self) -> Option<GameSide> {
        if self.home > self.away {
            Some(GameSide::Home)
        } else if self.away > self.home {
            Some(GameSide::Away)
        } else {
            None
        }
    }
}

/// Everything about a contest except its identity.
#[derive(Clone, Debug, PartialEq)]
pub struct GameDetails {
    pub bowl_name: String,
    pub home_team: String,
    pub away_team: String,
    pub kickoff: Option<DateTime<Utc>>,
    /// Home-relative line; negative means the home team is favored.
    pub spread: Option<f64>,
    pub over_under: Option<f64>,
    pub is_playoff: bool,
    pub winner: Option<String>,
    pub score: Option<FinalScore>,
}

impl GameDetails {
    pub fn new(bowl_name: &str, home_team: &str, away_team: &str) -> Self {
        Self {
            bowl_name: bowl_name.to_string(),
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            kickoff: None,
            spread: None,
            over_under: None,
            is_playoff: false,
            winner: None,
            score: None,
        }
    }

    pub fn side_of(&self, team: &str) -> Option<GameSide> {
        if team == self.home_team {
            Some(GameSide::Home)
        } else if team == self.away_team {
            Some(GameSide::Away)
        } else {
            None
        }
    }

    pub fn has_team(&self, team: &str) -> bool {
        self.side_of(team).is_some()
    }

    pub fn team(&self, side: GameSide) -> &str {
        match side {
            GameSide::Home => &self.home_team,
            GameSide::Away => &self.away_team,
        }
    }

    pub fn has_result(&self) -> bool {
        self.winner.is_some()
    }

    /// A game stops taking picks once kickoff has passed or a winner is posted.
    /// For a fixed record this is monotonic in `as_of`.
    pub fn is_locked(&self, as_of: DateTime<Utc>) -> bool {
        self.winner.is_some() || self.kickoff.is_some_and(|kickoff| as_of >= kickoff)
    }

    /// Winner must name one of the two teams exactly.
    pub fn winner_is_consistent(&self) -> bool {
        self.winner.as_deref().is_none_or(|w| self.has_team(w))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    pub id: GameId,
    pub created_at: DateTime<Utc>,
    pub details: GameDetails,
}

impl Game {
    pub fn is_locked(&self, as_of: DateTime<Utc>) -> bool {
        self.details.is_locked(as_of)
    }

    pub fn has_team(&self, team: &str) -> bool {
        self.details.has_team(team)
    }

    pub fn winner(&self) -> Option<&str> {
        self.details.winner.as_deref()
    }
}
