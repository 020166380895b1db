use std::{collections::BTreeSet, sync::Arc};

use bowl_picks_core::ParticipantName;

use crate::{
    PoolResult, domain::pick::PickRepository, ports::participants::ParticipantDirectory,
    storage_failure,
};

#[async_trait::async_trait]
pub trait ListUsersUseCase {
    async fn list_users(&self) -> PoolResult<Vec<ParticipantName>>;
}

pub struct ListUsersUseCaseImpl<P: PickRepository, D: ParticipantDirectory> {
    pick_repository: Arc<P>,
    participant_directory: Arc<D>,
}

impl<P: PickRepository, D: ParticipantDirectory> ListUsersUseCaseImpl<P, D> {
    pub fn new(pick_repository: Arc<P>, participant_directory: Arc<D>) -> Self {
        Self {
            pick_repository,
            participant_directory,
        }
    }
}

#[async_trait::async_trait]
impl<P: PickRepository + Send + Sync + 'static, D: ParticipantDirectory + Send + Sync + 'static>
    ListUsersUseCase for ListUsersUseCaseImpl<P, D>
{
    /// Registered participants, or everyone who has picked when the directory is open.
    async fn list_users(&self) -> PoolResult<Vec<ParticipantName>> {
        let registered = self.participant_directory.participants();
        if !registered.is_empty() {
            return Ok(registered);
        }
        let names: BTreeSet<ParticipantName> = self
            .pick_repository
            .list_picks()
            .await
            .map_err(|e| storage_failure("Failed to list picks", e))?
            .into_iter()
            .map(|p| p.participant)
            .collect();
        Ok(names.into_iter().collect())
    }
}
