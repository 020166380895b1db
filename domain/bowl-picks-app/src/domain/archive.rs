use bowl_picks_core::{ArchiveSummary, SeasonArchive, SeasonYear};

use crate::domain::{RepoCreateError, RepoError, RepoRetrieveError};

#[async_trait::async_trait]
pub trait ArchiveRepository {
    /// Stores the archive and empties the live games and picks as one unit. Fails with
    /// `Conflict` without touching anything when the year is already archived.
    async fn archive_season(&self, archive: SeasonArchive) -> Result<(), RepoCreateError>;
    async fn get_archive(&self, year: SeasonYear) -> Result<SeasonArchive, RepoRetrieveError>;
    async fn list_archives(&self) -> Result<Vec<ArchiveSummary>, RepoError>;
}
