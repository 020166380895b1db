use std::sync::Arc;

use bowl_picks_core::{StandingsEntry, standings};

use crate::{
    PoolResult,
    domain::{game::GameRepository, pick::PickRepository},
    storage_failure,
};

#[async_trait::async_trait]
pub trait LeaderboardUseCase {
    async fn leaderboard(&self) -> PoolResult<Vec<StandingsEntry>>;
}

pub struct LeaderboardUseCaseImpl<S: GameRepository + PickRepository> {
    store: Arc<S>,
}

impl<S: GameRepository + PickRepository> LeaderboardUseCaseImpl<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

/// Standings for the live season, computed fresh from the current games and picks.
pub(crate) async fn live_standings<S: GameRepository + PickRepository>(
    store: &S,
) -> PoolResult<Vec<StandingsEntry>> {
    let games = store
        .list_games()
        .await
        .map_err(|e| storage_failure("Failed to list games", e))?;
    let picks = store
        .list_picks()
        .await
        .map_err(|e| storage_failure("Failed to list picks", e))?;
    Ok(standings(&games, &picks))
}

#[async_trait::async_trait]
impl<S: GameRepository + PickRepository + Send + Sync + 'static> LeaderboardUseCase
    for LeaderboardUseCaseImpl<S>
{
    async fn leaderboard(&self) -> PoolResult<Vec<StandingsEntry>> {
        live_standings(self.store.as_ref()).await
    }
}
