use std::sync::Arc;

use crate::{
    PoolResult, domain::game::GameRepository, ports::clock::Clock, storage_failure,
    workflow::games::GameView,
};

#[async_trait::async_trait]
pub trait ListGamesUseCase {
    async fn list_games(&self) -> PoolResult<Vec<GameView>>;
}

pub struct ListGamesUseCaseImpl<G: GameRepository, C: Clock> {
    game_repository: Arc<G>,
    clock: Arc<C>,
}

impl<G: GameRepository, C: Clock> ListGamesUseCaseImpl<G, C> {
    pub fn new(game_repository: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            game_repository,
            clock,
        }
    }
}

#[async_trait::async_trait]
impl<G: GameRepository + Send + Sync + 'static, C: Clock + Send + Sync + 'static> ListGamesUseCase
    for ListGamesUseCaseImpl<G, C>
{
    async fn list_games(&self) -> PoolResult<Vec<GameView>> {
        let games = self
            .game_repository
            .list_games()
            .await
            .map_err(|e| storage_failure("Failed to list games", e))?;
        let now = self.clock.now();
        Ok(games.into_iter().map(|g| GameView::at(g, now)).collect())
    }
}
