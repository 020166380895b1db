use std::sync::Arc;

use bowl_picks_core::SeasonYear;

use crate::{PoolResult, domain::archive::ArchiveRepository, storage_failure};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeasonStatus {
    pub year: SeasonYear,
    pub is_active: bool,
    pub is_archived: bool,
}

#[async_trait::async_trait]
pub trait ListSeasonsUseCase {
    /// The live season and every archived one, most recent first.
    async fn list_seasons(&self) -> PoolResult<Vec<SeasonStatus>>;
}

pub struct ListSeasonsUseCaseImpl<A: ArchiveRepository> {
    archive_repository: Arc<A>,
    live_season: SeasonYear,
}

impl<A: ArchiveRepository> ListSeasonsUseCaseImpl<A> {
    pub fn new(archive_repository: Arc<A>, live_season: SeasonYear) -> Self {
        Self {
            archive_repository,
            live_season,
        }
    }
}

#[async_trait::async_trait]
impl<A: ArchiveRepository + Send + Sync + 'static> ListSeasonsUseCase
    for ListSeasonsUseCaseImpl<A>
{
    async fn list_seasons(&self) -> PoolResult<Vec<SeasonStatus>> {
        let archives = self
            .archive_repository
            .list_archives()
            .await
            .map_err(|e| storage_failure("Failed to list archives", e))?;

        let mut seasons: Vec<SeasonStatus> = archives
            .iter()
            .map(|archive| SeasonStatus {
                year: archive.year,
                is_active: archive.year == self.live_season,
                is_archived: true,
            })
            .collect();
        if !seasons.iter().any(|s| s.is_active) {
            seasons.push(SeasonStatus {
                year: self.live_season,
                is_active: true,
                is_archived: false,
            });
        }
        seasons.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(seasons)
    }
}
