use std::sync::Arc;

use bowl_picks_core::SeasonYear;

use crate::{
    PoolError, PoolResult,
    domain::{RepoRetrieveError, archive::ArchiveRepository},
    storage_failure,
    workflow::archive::ArchiveView,
};

#[async_trait::async_trait]
pub trait GetArchiveUseCase {
    async fn get_archive(&self, year: SeasonYear) -> PoolResult<ArchiveView>;
}

pub struct GetArchiveUseCaseImpl<A: ArchiveRepository> {
    archive_repository: Arc<A>,
}

impl<A: ArchiveRepository> GetArchiveUseCaseImpl<A> {
    pub fn new(archive_repository: Arc<A>) -> Self {
        Self { archive_repository }
    }
}

#[async_trait::async_trait]
impl<A: ArchiveRepository + Send + Sync + 'static> GetArchiveUseCase for GetArchiveUseCaseImpl<A> {
    async fn get_archive(&self, year: SeasonYear) -> PoolResult<ArchiveView> {
        match self.archive_repository.get_archive(year).await {
            Ok(archive) => {
                let picks = archive.picks_with_outcomes();
                Ok(ArchiveView { archive, picks })
            }
            Err(RepoRetrieveError::NotFound) => {
                PoolError::not_found(format!("no archive for season {}", year.label()))
            }
            Err(RepoRetrieveError::StorageError(e)) => {
                Err(storage_failure("Failed to load archive", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bowl_picks_core::{GameDetails, Pick, PickOutcome, SeasonArchive};
    use chrono::Utc;

    use super::*;
    use crate::domain::{game::GameRepository, memory::InMemoryPoolStore, pick::PickRepository};

    #[tokio::test]
    async fn test_archived_picks_carry_outcomes() {
        let store = Arc::new(InMemoryPoolStore::new());
        let mut details = GameDetails::new("Gasparilla Bowl", "Florida", "Tulane");
        details.winner = Some("Florida".to_string());
        let game = store.create_game(details, Utc::now()).await.unwrap();
        store
            .save_pick(Pick {
                game_id: game.id,
                participant: "Ray".to_string(),
                picked_team: "Tulane".to_string(),
                submitted_at: Utc::now(),
            })
            .await
            .unwrap();

        let archive = SeasonArchive::snapshot(
            SeasonYear(2024),
            Utc::now(),
            store.list_games().await.unwrap(),
            store.list_picks().await.unwrap(),
        );
        store.archive_season(archive).await.unwrap();

        let use_case = GetArchiveUseCaseImpl::new(store);
        let view = use_case.get_archive(SeasonYear(2024)).await.unwrap();
        assert_eq!(view.picks.len(), 1);
        assert_eq!(view.picks[0].outcome, PickOutcome::Incorrect);
        assert_eq!(view.archive.recomputed_standings(), view.archive.standings);

        assert!(matches!(
            use_case.get_archive(SeasonYear(2019)).await,
            Err(PoolError::NotFound(_))
        ));
    }
}
