use std::sync::Arc;

use bowl_picks_core::{ArchiveSummary, SeasonArchive, SeasonYear};

use crate::{
    PoolError, PoolResult,
    domain::{
        RepoCreateError, RepoRetrieveError, archive::ArchiveRepository, game::GameRepository,
        pick::PickRepository, season_lock::SeasonLock,
    },
    ports::clock::Clock,
    storage_failure,
};

#[async_trait::async_trait]
pub trait CreateArchiveUseCase {
    async fn create_archive(&self, year: SeasonYear) -> PoolResult<ArchiveSummary>;
}

pub struct CreateArchiveUseCaseImpl<
    S: GameRepository + PickRepository + ArchiveRepository,
    C: Clock,
> {
    store: Arc<S>,
    season_lock: Arc<SeasonLock>,
    clock: Arc<C>,
}

impl<S: GameRepository + PickRepository + ArchiveRepository, C: Clock>
    CreateArchiveUseCaseImpl<S, C>
{
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
    S: GameRepository + PickRepository + ArchiveRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
> CreateArchiveUseCase for CreateArchiveUseCaseImpl<S, C>
{
    async fn create_archive(&self, year: SeasonYear) -> PoolResult<ArchiveSummary> {
        if !year.is_valid() {
            return PoolError::validation(format!(
                "season year must be between {} and {}",
                SeasonYear::MIN,
                SeasonYear::MAX
            ));
        }

        let rollover = self.season_lock.lock_for_rollover().await;

        match self.store.get_archive(year).await {
            Ok(_) => {
                return PoolError::conflict(format!("season {} is already archived", year.label()));
            }
            Err(RepoRetrieveError::NotFound) => {}
            Err(RepoRetrieveError::StorageError(e)) => {
                return Err(storage_failure("Failed to check existing archive", e));
            }
        }

        let games = self
            .store
            .list_games()
            .await
            .map_err(|e| storage_failure("Failed to list games for archive", e))?;
        let picks = self
            .store
            .list_picks()
            .await
            .map_err(|e| storage_failure("Failed to list picks for archive", e))?;

        let archive = SeasonArchive::snapshot(year, self.clock.now(), games, picks);
        let summary = archive.summary();
        let (game_count, pick_count) = (archive.games.len(), archive.picks.len());

        match self.store.archive_season(archive).await {
            Ok(()) => {}
            Err(RepoCreateError::Conflict) => {
                return PoolError::conflict(format!("season {} is already archived", year.label()));
            }
            Err(RepoCreateError::StorageError(e)) => {
                return Err(storage_failure("Failed to archive season", e));
            }
        }
        rollover.reset_games();

        log::info!(
            "Archived season {} with {} games and {} picks",
            year.label(),
            game_count,
            pick_count
        );
        Ok(summary)
    }
}
