use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{Game, GameId, Pick, PickOutcome, StandingsEntry, standings};

/// Starting calendar year of a season, 2024 for the 2024-25 bowl season.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeasonYear(pub i32);

impl SeasonYear {
    pub const MIN: i32 = 1900;
    pub const MAX: i32 = 9999;

    pub fn is_valid(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }

    pub fn label(&self) -> String {
        format!("{}-{:02}", self.0, (self.0 + 1).rem_euclid(100))
    }
}

impl std::fmt::Display for SeasonYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeasonArchive {
    pub year: SeasonYear,
    pub created_at: DateTime<Utc>,
    pub games: Vec<Game>,
    pub picks: Vec<Pick>,
    pub standings: Vec<StandingsEntry>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArchivedPick {
    pub pick: Pick,
    pub outcome: PickOutcome,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArchiveSummary {
    pub year: SeasonYear,
    pub created_at: DateTime<Utc>,
}

impl SeasonArchive {
    /// Freezes the given season state, ranking it with the live standings rule.
    pub fn snapshot(
        year: SeasonYear,
        created_at: DateTime<Utc>,
        games: Vec<Game>,
        picks: Vec<Pick>,
    ) -> Self {
        let standings = standings(&games, &picks);
        Self {
            year,
            created_at,
            games,
            picks,
            standings,
        }
    }

    pub fn summary(&self) -> ArchiveSummary {
        ArchiveSummary {
            year: self.year,
            created_at: self.created_at,
        }
    }

    pub fn recomputed_standings(&self) -> Vec<StandingsEntry> {
        standings(&self.games, &self.picks)
    }

    /// Frozen picks with outcomes derived from the frozen games. Picks whose game is
    /// missing from the archive are left out.
    pub fn picks_with_outcomes(&self) -> Vec<ArchivedPick> {
        let games: HashMap<GameId, &Game> = self.games.iter().map(|g| (g.id, g)).collect();
        self.picks
            .iter()
            .filter_map(|pick| {
                let game = games.get(&pick.game_id)?;
                Some(ArchivedPick {
                    pick: pick.clone(),
                    outcome: pick.outcome(&game.details),
                })
            })
            .collect()
    }
}
