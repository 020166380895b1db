use std::sync::Arc;

use bowl_picks_core::GameId;

use crate::{
    PoolError, PoolResult,
    domain::{
        RepoRetrieveError, RepoUpdateError,
        game::{GameRepository, GameUpdate},
        pick::PickRepository,
        season_lock::SeasonLock,
    },
    ports::clock::Clock,
    storage_failure,
    workflow::games::GameView,
};

#[async_trait::async_trait]
pub trait UpdateGameUseCase {
    async fn update_game(&self, game_id: GameId, update: GameUpdate) -> PoolResult<GameView>;
}

pub struct UpdateGameUseCaseImpl<S: GameRepository + PickRepository, C: Clock> {
    store: Arc<S>,
    season_lock: Arc<SeasonLock>,
    clock: Arc<C>,
}

impl<S: GameRepository + PickRepository, C: Clock> UpdateGameUseCaseImpl<S, C> {
    pub fn new(store: Arc<S>, season_lock: Arc<SeasonLock>, clock: Arc<C>) -> Self {
        Self {
            store,
            season_lock,
            clock,
        }
    }
}

#[async_trait::async_trait]
impl<
    S: GameRepository + PickRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
> UpdateGameUseCase for UpdateGameUseCaseImpl<S, C>
{
    async fn update_game(&self, game_id: GameId, update: GameUpdate) -> PoolResult<GameView> {
        let guard = self.season_lock.lock_game(game_id).await;

        let current = match self.store.get_game(game_id).await {
            Ok(game) => game,
            Err(RepoRetrieveError::NotFound) => {
                guard.forget();
                return PoolError::not_found(format!("game {} does not exist", game_id));
            }
            Err(RepoRetrieveError::StorageError(e)) => {
                return Err(storage_failure("Failed to load game", e));
            }
        };
        if update.is_empty() {
            return Ok(GameView::at(current, self.clock.now()));
        }

        let next = match update.apply(&current.details) {
            Ok(next) => next,
            Err(e) => return PoolError::validation(e),
        };

        let now = self.clock.now();
        if current.is_locked(now) && !next.is_locked(now) {
            log::warn!("Rejected update that would unlock game {}", game_id);
            return PoolError::locked(format!(
                "game {} is locked and cannot be reopened",
                game_id
            ));
        }

        // Picks name their team, so a rename may not drop a team somebody picked.
        if next.home_team != current.details.home_team
            || next.away_team != current.details.away_team
        {
            let picks = self
                .store
                .list_picks_for_game(game_id)
                .await
                .map_err(|e| storage_failure("Failed to list picks for game", e))?;
            if let Some(pick) = picks.iter().find(|p| !next.has_team(&p.picked_team)) {
                return PoolError::validation(format!(
                    "cannot rename '{}' in game {}: {} picked it",
                    pick.picked_team, game_id, pick.participant
                ));
            }
        }

        let game = match self.store.update_game(game_id, next).await {
            Ok(game) => game,
            Err(RepoUpdateError::NotFound) => {
                guard.forget();
                return PoolError::not_found(format!("game {} does not exist", game_id));
            }
            Err(RepoUpdateError::StorageError(e)) => {
                return Err(storage_failure("Failed to update game", e));
            }
        };

        if current.winner() != game.winner() {
            if let Some(winner) = game.winner() {
                log::info!("Posted result for game {}: {} won", game_id, winner);
            }
        }
        Ok(GameView::at(game, now))
    }
}

#[cfg(test)]
mod tests {
    use bowl_picks_core::{Pick, PickOutcome};
    use chrono::Duration;

    use super::*;
    use crate::{
        domain::{game::NewGame, memory::InMemoryPoolStore},
        ports::clock::ManualClock,
        testing::kickoff_day,
        workflow::picks::PickView,
    };

    struct Fixture {
        store: Arc<InMemoryPoolStore>,
        clock: Arc<ManualClock>,
        season_lock: Arc<SeasonLock>,
        use_case: UpdateGameUseCaseImpl<InMemoryPoolStore, ManualClock>,
        game_id: GameId,
    }

    async fn setup() -> Fixture {
        let store = Arc::new(InMemoryPoolStore::new());
        let clock = Arc::new(ManualClock::new(kickoff_day() - Duration::hours(1)));
        let details = NewGame {
            bowl_name: "Peach Bowl".to_string(),
            home_team: "Arizona State".to_string(),
            away_team: "Texas".to_string(),
            kickoff: Some(kickoff_day()),
            spread: Some(-3.0),
            ..Default::default()
        }
        .into_details()
        .unwrap();
        let game = store.create_game(details, clock.now()).await.unwrap();
        let season_lock = Arc::new(SeasonLock::new());
        let use_case = UpdateGameUseCaseImpl::new(store.clone(), season_lock.clone(), clock.clone());
        Fixture {
            store,
            clock,
            season_lock,
            use_case,
            game_id: game.id,
        }
    }

    async fn pick(f: &Fixture, participant: &str, team: &str) {
        f.store
            .save_pick(Pick {
                game_id: f.game_id,
                participant: participant.to_string(),
                picked_team: team.to_string(),
                submitted_at: f.clock.now(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_result_can_be_posted_before_kickoff() {
        let f = setup().await;
        let view = f
            .use_case
            .update_game(
                f.game_id,
                GameUpdate {
                    winner: Some("Texas".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(view.is_locked);
    }

    #[tokio::test]
    async fn test_locked_game_cannot_be_reopened() {
        let f = setup().await;
        f.clock.advance(Duration::hours(2));

        let reopen = GameUpdate {
            kickoff: Some(Some(kickoff_day() + Duration::days(1))),
            ..Default::default()
        };
        assert!(matches!(
            f.use_case.update_game(f.game_id, reopen).await,
            Err(PoolError::Locked(_))
        ));

        let to_be_announced = GameUpdate {
            kickoff: Some(None),
            ..Default::default()
        };
        assert!(matches!(
            f.use_case.update_game(f.game_id, to_be_announced).await,
            Err(PoolError::Locked(_))
        ));

        let spread = GameUpdate {
            spread: Some(Some(2.5)),
            ..Default::default()
        };
        let view = f.use_case.update_game(f.game_id, spread).await.unwrap();
        assert!(view.is_locked);
        assert_eq!(view.home_spread, "+2.5");
        assert_eq!(view.game.details.kickoff, Some(kickoff_day()));
    }

    #[tokio::test]
    async fn test_optional_fields_can_be_cleared() {
        let f = setup().await;
        let view = f
            .use_case
            .update_game(
                f.game_id,
                GameUpdate {
                    kickoff: Some(None),
                    spread: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(view.game.details.kickoff, None);
        assert_eq!(view.game.details.spread, None);
        assert_eq!(view.home_spread, "");
        assert!(!view.is_locked);

        f.clock.advance(Duration::days(30));
        let stored = f.store.get_game(f.game_id).await.unwrap();
        assert!(!stored.is_locked(f.clock.now()));
    }

    #[tokio::test]
    async fn test_rename_keeps_picked_teams() {
        let f = setup().await;
        pick(&f, "Alice", "Texas").await;

        let rename = GameUpdate {
            away_team: Some("Texas Longhorns".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            f.use_case.update_game(f.game_id, rename).await,
            Err(PoolError::Validation(_))
        ));
        assert_eq!(
            f.store.get_game(f.game_id).await.unwrap().details.away_team,
            "Texas"
        );

        let rename_unpicked = GameUpdate {
            home_team: Some("Arizona St.".to_string()),
            ..Default::default()
        };
        f.use_case
            .update_game(f.game_id, rename_unpicked)
            .await
            .unwrap();

        let result = GameUpdate {
            winner: Some("Texas".to_string()),
            ..Default::default()
        };
        let game = f.use_case.update_game(f.game_id, result).await.unwrap().game;
        let picks = f.store.list_picks_for_game(f.game_id).await.unwrap();
        let view = PickView::of(picks[0].clone(), &game, f.clock.now());
        assert_eq!(view.outcome, PickOutcome::Correct);
    }

    #[tokio::test]
    async fn test_update_of_unknown_game() {
        let f = setup().await;
        let result = f
            .use_case
            .update_game(
                GameId(f.game_id.0 + 100),
                GameUpdate {
                    spread: Some(Some(1.0)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(PoolError::NotFound(_))));
        assert_eq!(f.season_lock.tracked_games(), 0);
    }
}
