use std::sync::Arc;

use crate::{
    PoolError, PoolResult,
    domain::{
        game::{GameRepository, NewGame},
        season_lock::SeasonLock,
    },
    ports::clock::Clock,
    storage_failure,
    workflow::games::GameView,
};

#[async_trait::async_trait]
pub trait CreateGameUseCase {
    async fn create_game(&self, game: NewGame) -> PoolResult<GameView>;
}

pub struct CreateGameUseCaseImpl<G: GameRepository, C: Clock> {
    game_repository: Arc<G>,
    season_lock: Arc<SeasonLock>,
    clock: Arc<C>,
}

impl<G: GameRepository, C: Clock> CreateGameUseCaseImpl<G, C> {
    pub fn new(game_repository: Arc<G>, season_lock: Arc<SeasonLock>, clock: Arc<C>) -> Self {
        Self {
            game_repository,
            season_lock,
            clock,
        }
    }
}

#[async_trait::async_trait]
impl<G: GameRepository + Send + Sync + 'static, C: Clock + Send + Sync + 'static> CreateGameUseCase
    for CreateGameUseCaseImpl<G, C>
{
    async fn create_game(&self, game: NewGame) -> PoolResult<GameView> {
        let details = match game.into_details() {
            Ok(details) => details,
            Err(e) => return PoolError::validation(e),
        };

        let _season = self.season_lock.enter_season().await;
        let game = self
            .game_repository
            .create_game(details, self.clock.now())
            .await
            .map_err(|e| storage_failure("Failed to create game", e))?;

        log::info!(
            "Created game {}: {} ({} vs {})",
            game.id,
            game.details.bowl_name,
            game.details.away_team,
            game.details.home_team
        );
        Ok(GameView::at(game, self.clock.now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::memory::InMemoryPoolStore, ports::clock::ManualClock, testing::kickoff_day};

    #[tokio::test]
    async fn test_create_rejects_same_teams() {
        let store = Arc::new(InMemoryPoolStore::new());
        let use_case = CreateGameUseCaseImpl::new(
            store.clone(),
            Arc::new(SeasonLock::new()),
            Arc::new(ManualClock::new(kickoff_day())),
        );
        let result = use_case
            .create_game(NewGame {
                bowl_name: "Orange Bowl".to_string(),
                home_team: "Texas".to_string(),
                away_team: " Texas ".to_string(),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(PoolError::Validation(_))));
        assert!(store.list_games().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_presents_tbd_game_unlocked() {
        let use_case = CreateGameUseCaseImpl::new(
            Arc::new(InMemoryPoolStore::new()),
            Arc::new(SeasonLock::new()),
            Arc::new(ManualClock::new(kickoff_day())),
        );
        let view = use_case
            .create_game(NewGame {
                bowl_name: "CFP Championship".to_string(),
                home_team: "TBD 1".to_string(),
                away_team: "TBD 2".to_string(),
                is_playoff: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(!view.is_locked);
        assert!(view.game.details.is_playoff);
        assert_eq!(view.home_spread, "");
        assert_eq!(view.away_spread, "");
    }
}
