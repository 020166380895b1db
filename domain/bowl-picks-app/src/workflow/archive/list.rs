use std::sync::Arc;

use bowl_picks_core::ArchiveSummary;

use crate::{PoolResult, domain::archive::ArchiveRepository, storage_failure};

#[async_trait::async_trait]
pub trait ListArchivesUseCase {
    /// Archived seasons, most recent first.
    async fn list_archives(&self) -> PoolResult<Vec<ArchiveSummary>>;
}

pub struct ListArchivesUseCaseImpl<A: ArchiveRepository> {
    archive_repository: Arc<A>,
}

impl<A: ArchiveRepository> ListArchivesUseCaseImpl<A> {
    pub fn new(archive_repository: Arc<A>) -> Self {
        Self { archive_repository }
    }
}

#[async_trait::async_trait]
impl<A: ArchiveRepository + Send + Sync + 'static> ListArchivesUseCase
    for ListArchivesUseCaseImpl<A>
{
    async fn list_archives(&self) -> PoolResult<Vec<ArchiveSummary>> {
        let mut archives = self
            .archive_repository
            .list_archives()
            .await
            .map_err(|e| storage_failure("Failed to list archives", e))?;
        archives.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(archives)
    }
}

#[cfg(test)]
mod tests {
    use bowl_picks_core::{SeasonArchive, SeasonYear};
    use chrono::Utc;

    use super::*;
    use crate::domain::memory::InMemoryPoolStore;

    #[tokio::test]
    async fn test_most_recent_season_first() {
        let store = Arc::new(InMemoryPoolStore::new());
        for year in [2022, 2024, 2023] {
            store
                .archive_season(SeasonArchive::snapshot(
                    SeasonYear(year),
                    Utc::now(),
                    Vec::new(),
                    Vec::new(),
                ))
                .await
                .unwrap();
        }
        let years: Vec<i32> = ListArchivesUseCaseImpl::new(store)
            .list_archives()
            .await
            .unwrap()
            .iter()
            .map(|a| a.year.0)
            .collect();
        assert_eq!(years, vec![2024, 2023, 2022]);
    }
}
