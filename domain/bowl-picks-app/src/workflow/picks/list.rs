use std::{collections::HashMap, sync::Arc};

use bowl_picks_core::{Game, GameId};

use crate::{
    PoolError, PoolResult,
    domain::{RepoRetrieveError, game::GameRepository, pick::PickRepository},
    ports::clock::Clock,
    storage_failure,
    workflow::picks::PickView,
};

#[async_trait::async_trait]
pub trait ListPicksUseCase {
    async fn list_picks(&self) -> PoolResult<Vec<PickView>>;
    async fn list_picks_for_game(&self, game_id: GameId) -> PoolResult<Vec<PickView>>;
}

pub struct ListPicksUseCaseImpl<S: GameRepository + PickRepository, C: Clock> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S: GameRepository + PickRepository, C: Clock> ListPicksUseCaseImpl<S, C> {
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }
}

#[async_trait::async_trait]
impl<S: GameRepository + PickRepository + Send + Sync + 'static, C: Clock + Send + Sync + 'static>
    ListPicksUseCase for ListPicksUseCaseImpl<S, C>
{
    async fn list_picks(&self) -> PoolResult<Vec<PickView>> {
        let games: HashMap<GameId, Game> = self
            .store
            .list_games()
            .await
            .map_err(|e| storage_failure("Failed to list games", e))?
            .into_iter()
            .map(|g| (g.id, g))
            .collect();
        let picks = self
            .store
            .list_picks()
            .await
            .map_err(|e| storage_failure("Failed to list picks", e))?;

        let now = self.clock.now();
        Ok(picks
            .into_iter()
            .filter_map(|pick| {
                let game = games.get(&pick.game_id)?;
                Some(PickView::of(pick, game, now))
            })
            .collect())
    }

    async fn list_picks_for_game(&self, game_id: GameId) -> PoolResult<Vec<PickView>> {
        let game = match self.store.get_game(game_id).await {
            Ok(game) => game,
            Err(RepoRetrieveError::NotFound) => {
                return PoolError::not_found(format!("game {} does not exist", game_id));
            }
            Err(RepoRetrieveError::StorageError(e)) => {
                return Err(storage_failure("Failed to load game", e));
            }
        };
        let picks = self
            .store
            .list_picks_for_game(game_id)
            .await
            .map_err(|e| storage_failure("Failed to list picks", e))?;

        let now = self.clock.now();
        Ok(picks
            .into_iter()
            .map(|pick| PickView::of(pick, &game, now))
            .collect())
    }
}
