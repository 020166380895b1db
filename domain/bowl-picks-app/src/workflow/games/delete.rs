use std::sync::Arc;

use bowl_picks_core::GameId;

use crate::{
    PoolError, PoolResult,
    domain::{RepoUpdateError, game::GameRepository, season_lock::SeasonLock},
    storage_failure,
};

#[async_trait::async_trait]
pub trait DeleteGameUseCase {
    async fn delete_game(&self, game_id: GameId) -> PoolResult<()>;
}

pub struct DeleteGameUseCaseImpl<G: GameRepository> {
    game_repository: Arc<G>,
    season_lock: Arc<SeasonLock>,
}

impl<G: GameRepository> DeleteGameUseCaseImpl<G> {
    pub fn new(game_repository: Arc<G>, season_lock: Arc<SeasonLock>) -> Self {
        Self {
            game_repository,
            season_lock,
        }
    }
}

#[async_trait::async_trait]
impl<G: GameRepository + Send + Sync + 'static> DeleteGameUseCase for DeleteGameUseCaseImpl<G> {
    async fn delete_game(&self, game_id: GameId) -> PoolResult<()> {
        let guard = self.season_lock.lock_game(game_id).await;
        let result = self.game_repository.delete_game(game_id).await;
        match &result {
            Ok(()) | Err(RepoUpdateError::NotFound) => guard.forget(),
            Err(RepoUpdateError::StorageError(_)) => drop(guard),
        }

        match result {
            Ok(()) => {
                log::info!("Deleted game {} and its picks", game_id);
                Ok(())
            }
            Err(RepoUpdateError::NotFound) => {
                PoolError::not_found(format!("game {} does not exist", game_id))
            }
            Err(RepoUpdateError::StorageError(e)) => {
                Err(storage_failure("Failed to delete game", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bowl_picks_core::{GameDetails, Pick};
    use chrono::Utc;

    use super::*;
    use crate::domain::{memory::InMemoryPoolStore, pick::PickRepository};

    #[tokio::test]
    async fn test_delete_removes_picks_and_is_not_repeatable() {
        let store = Arc::new(InMemoryPoolStore::new());
        let game = store
            .create_game(GameDetails::new("Holiday Bowl", "Syracuse", "Washington State"), Utc::now())
            .await
            .unwrap();
        store
            .save_pick(Pick {
                game_id: game.id,
                participant: "Sarah".to_string(),
                picked_team: "Syracuse".to_string(),
                submitted_at: Utc::now(),
            })
            .await
            .unwrap();

        let use_case = DeleteGameUseCaseImpl::new(store.clone(), Arc::new(SeasonLock::new()));
        use_case.delete_game(game.id).await.unwrap();
        assert!(store.list_picks().await.unwrap().is_empty());

        assert!(matches!(
            use_case.delete_game(game.id).await,
            Err(PoolError::NotFound(_))
        ));
    }
}
