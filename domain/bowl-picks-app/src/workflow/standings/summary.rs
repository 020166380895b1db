use std::sync::Arc;

use bowl_picks_core::{PoolSummary, pool_summary};

use crate::{
    PoolResult,
    domain::{game::GameRepository, pick::PickRepository},
    workflow::standings::leaderboard::live_standings,
};

#[async_trait::async_trait]
pub trait PoolSummaryUseCase {
    async fn summary(&self) -> PoolResult<PoolSummary>;
}

pub struct PoolSummaryUseCaseImpl<S: GameRepository + PickRepository> {
    store: Arc<S>,
}

impl<S: GameRepository + PickRepository> PoolSummaryUseCaseImpl<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<S: GameRepository + PickRepository + Send + Sync + 'static> PoolSummaryUseCase
    for PoolSummaryUseCaseImpl<S>
{
    async fn summary(&self) -> PoolResult<PoolSummary> {
        let standings = live_standings(self.store.as_ref()).await?;
        Ok(pool_summary(&standings))
    }
}
