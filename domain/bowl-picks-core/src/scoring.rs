use std::collections::{BTreeMap, HashMap};

use crate::{Game, GameId, ParticipantName, Pick, PickOutcome};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandingsEntry {
    pub participant: ParticipantName,
    pub correct_picks: u32,
    pub pending_picks: u32,
    pub total_picks: u32,
}

impl StandingsEntry {
    fn new(participant: ParticipantName) -> Self {
        Self {
            participant,
            correct_picks: 0,
            pending_picks: 0,
            total_picks: 0,
        }
    }

    pub fn decided_picks(&self) -> u32 {
        self.total_picks - self.pending_picks
    }

    pub fn accuracy(&self) -> Option<f64> {
        match self.decided_picks() {
            0 => None,
            decided => Some(self.correct_picks as f64 / decided as f64),
        }
    }

    fn record(&mut self, outcome: PickOutcome) {
        self.total_picks += 1;
        match outcome {
            PickOutcome::Pending => self.pending_picks += 1,
            PickOutcome::Correct => self.correct_picks += 1,
            PickOutcome::Incorrect => {}
        }
    }
}

/// Ranks every participant with at least one pick: most correct first, then fewest
/// pending, then name. Picks for games missing from `games` are skipped.
pub fn standings<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    picks: impl IntoIterator<Item = &'a Pick>,
) -> Vec<StandingsEntry> {
    let games: HashMap<GameId, &Game> = games.into_iter().map(|g| (g.id, g)).collect();

    let mut entries: BTreeMap<&str, StandingsEntry> = BTreeMap::new();
    for pick in picks {
        let Some(game) = games.get(&pick.game_id) else {
            continue;
        };
        entries
            .entry(pick.participant.as_str())
            .or_insert_with(|| StandingsEntry::new(pick.participant.clone()))
            .record(pick.outcome(&game.details));
    }

    let mut ranked: Vec<StandingsEntry> = entries.into_values().collect();
    ranked.sort_by(|a, b| {
        b.correct_picks
            .cmp(&a.correct_picks)
            .then(a.pending_picks.cmp(&b.pending_picks))
            .then_with(|| a.participant.cmp(&b.participant))
    });
    ranked
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolLeader {
    pub participant: ParticipantName,
    pub correct_picks: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSummary {
    pub total_correct: u32,
    pub total_pending: u32,
    pub total_picks: u32,
    pub leader: Option<PoolLeader>,
}

pub fn pool_summary(standings: &[StandingsEntry]) -> PoolSummary {
    PoolSummary {
        total_correct: standings.iter().map(|e| e.correct_picks).sum(),
        total_pending: standings.iter().map(|e| e.pending_picks).sum(),
        total_picks: standings.iter().map(|e| e.total_picks).sum(),
        leader: standings.first().map(|e| PoolLeader {
            participant: e.participant.clone(),
            correct_picks: e.correct_picks,
        }),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::GameDetails;

    fn game(id: i64, home: &str, away: &str, winner: Option<&str>) -> Game {
        let mut details = GameDetails::new("Bowl", home, away);
        details.winner = winner.map(str::to_string);
        Game {
            id: GameId(id),
            created_at: Utc::now(),
            details,
        }
    }

    fn pick(game_id: i64, who: &str, team: &str) -> Pick {
        Pick {
            game_id: GameId(game_id),
            participant: who.to_string(),
            picked_team: team.to_string(),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_standings_order() {
        let games = vec![
            game(1, "A", "B", Some("A")),
            game(2, "C", "D", Some("D")),
            game(3, "E", "F", None),
        ];
        let picks = vec![
            pick(1, "Sarah", "A"),
            pick(2, "Sarah", "C"),
            pick(3, "Sarah", "E"),
            pick(1, "Matt", "A"),
            pick(2, "Matt", "C"),
            pick(1, "Billy", "B"),
            pick(2, "Billy", "D"),
            pick(1, "Anna", "A"),
            pick(2, "Anna", "D"),
        ];

        let ranked = standings(&games, &picks);
        let names: Vec<&str> = ranked.iter().map(|e| e.participant.as_str()).collect();
        // Billy and Matt tie on 1 correct / 0 pending, broken by name.
        // Sarah also has 1 correct but one pick still pending.
        assert_eq!(names, vec!["Anna", "Billy", "Matt", "Sarah"]);

        let sarah = &ranked[3];
        assert_eq!(sarah.correct_picks, 1);
        assert_eq!(sarah.pending_picks, 1);
        assert_eq!(sarah.total_picks, 3);
        assert_eq!(sarah.decided_picks(), 2);
        assert_eq!(sarah.accuracy(), Some(0.5));
    }

    #[test]
    fn test_standings_is_idempotent() {
        let games = vec![game(1, "A", "B", None), game(2, "C", "D", Some("C"))];
        let picks = vec![
            pick(2, "Jean", "C"),
            pick(1, "John", "B"),
            pick(2, "John", "C"),
            pick(1, "Coconut", "A"),
        ];
        let first = standings(&games, &picks);
        assert_eq!(first, standings(&games, &picks));
        assert_eq!(first[0].participant, "Jean");
    }

    #[test]
    fn test_accuracy_undefined_without_decided_picks() {
        let games = vec![game(1, "A", "B", None)];
        let picks = vec![pick(1, "Papa Jack", "A")];
        let ranked = standings(&games, &picks);
        assert_eq!(ranked[0].accuracy(), None);
    }

    #[test]
    fn test_picks_for_unknown_games_are_skipped() {
        let games = vec![game(1, "A", "B", Some("A"))];
        let picks = vec![pick(1, "Emily", "A"), pick(99, "Emily", "X"), pick(99, "Ghost", "X")];
        let ranked = standings(&games, &picks);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].total_picks, 1);
    }

    #[test]
    fn test_pool_summary_matches_standings() {
        let games = vec![game(1, "A", "B", Some("B")), game(2, "C", "D", None)];
        let picks = vec![
            pick(1, "Jean", "B"),
            pick(2, "Jean", "C"),
            pick(1, "John", "A"),
            pick(2, "John", "D"),
        ];
        let ranked = standings(&games, &picks);
        let summary = pool_summary(&ranked);
        assert_eq!(summary.total_correct, 1);
        assert_eq!(summary.total_pending, 2);
        assert_eq!(summary.total_picks, 4);
        assert_eq!(
            summary.leader,
            Some(PoolLeader {
                participant: "Jean".to_string(),
                correct_picks: 1
            })
        );
        assert_eq!(pool_summary(&[]).leader, None);
    }
}
