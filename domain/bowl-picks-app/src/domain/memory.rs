use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use bowl_picks_core::{
    ArchiveSummary, Game, GameDetails, GameId, ParticipantName, Pick, SeasonArchive, SeasonYear,
};
use chrono::{DateTime, Utc};

use crate::domain::{
    RepoCreateError, RepoError, RepoRetrieveError, RepoUpdateError, archive::ArchiveRepository,
    game::GameRepository, pick::PickRepository,
};

struct PoolTables {
    games: BTreeMap<GameId, Game>,
    picks: BTreeMap<(GameId, ParticipantName), Pick>,
    archives: BTreeMap<SeasonYear, SeasonArchive>,
    next_game_id: i64,
}

impl PoolTables {
    fn new() -> Self {
        Self {
            games: BTreeMap::new(),
            picks: BTreeMap::new(),
            archives: BTreeMap::new(),
            next_game_id: 1,
        }
    }

    fn increment_game_id(&mut self) -> GameId {
        let id = GameId(self.next_game_id);
        self.next_game_id += 1;
        id
    }
}

const POISONED: &str = "pool store lock poisoned";

/// Process-local store for all live and archived season data. Records are cloned in and
/// out under one lock, so readers never observe a half-applied write.
#[derive(Clone)]
pub struct InMemoryPoolStore {
    tables: Arc<RwLock<PoolTables>>,
}

impl InMemoryPoolStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(PoolTables::new())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, PoolTables>, String> {
        self.tables.read().map_err(|_| POISONED.to_string())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, PoolTables>, String> {
        self.tables.write().map_err(|_| POISONED.to_string())
    }
}

#[async_trait::async_trait]
impl GameRepository for InMemoryPoolStore {
    async fn create_game(
        &self,
        details: GameDetails,
        created_at: DateTime<Utc>,
    ) -> Result<Game, RepoError> {
        let mut tables = self.write().map_err(RepoError::StorageError)?;
        let id = tables.increment_game_id();
        let game = Game {
            id,
            created_at,
            details,
        };
        tables.games.insert(id, game.clone());
        Ok(game)
    }

    async fn get_game(&self, id: GameId) -> Result<Game, RepoRetrieveError> {
        let tables = self.read().map_err(RepoRetrieveError::StorageError)?;
        tables
            .games
            .get(&id)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn update_game(&self, id: GameId, details: GameDetails) -> Result<Game, RepoUpdateError> {
        let mut tables = self.write().map_err(RepoUpdateError::StorageError)?;
        let game = tables.games.get_mut(&id).ok_or(RepoUpdateError::NotFound)?;
        game.details = details;
        Ok(game.clone())
    }

    async fn delete_game(&self, id: GameId) -> Result<(), RepoUpdateError> {
        let mut tables = self.write().map_err(RepoUpdateError::StorageError)?;
        if tables.games.remove(&id).is_none() {
            return Err(RepoUpdateError::NotFound);
        }
        tables.picks.retain(|(game_id, _), _| *game_id != id);
        Ok(())
    }

    async fn list_games(&self) -> Result<Vec<Game>, RepoError> {
        let tables = self.read().map_err(RepoError::StorageError)?;
        Ok(tables.games.values().cloned().collect())
    }
}

#[async_trait::async_trait]
impl PickRepository for InMemoryPoolStore {
    async fn save_pick(&self, pick: Pick) -> Result<(), RepoError> {
        let mut tables = self.write().map_err(RepoError::StorageError)?;
        if !tables.games.contains_key(&pick.game_id) {
            return Err(RepoError::StorageError(format!(
                "pick references missing game {}",
                pick.game_id
            )));
        }
        tables
            .picks
            .insert((pick.game_id, pick.participant.clone()), pick);
        Ok(())
    }

    async fn list_picks_for_game(&self, game_id: GameId) -> Result<Vec<Pick>, RepoError> {
        let tables = self.read().map_err(RepoError::StorageError)?;
        Ok(tables
            .picks
            .values()
            .filter(|p| p.game_id == game_id)
            .cloned()
            .collect())
    }

    async fn list_picks(&self) -> Result<Vec<Pick>, RepoError> {
        let tables = self.read().map_err(RepoError::StorageError)?;
        Ok(tables.picks.values().cloned().collect())
    }
}

#[async_trait::async_trait]
impl ArchiveRepository for InMemoryPoolStore {
    async fn archive_season(&self, archive: SeasonArchive) -> Result<(), RepoCreateError> {
        let mut tables = self.write().map_err(RepoCreateError::StorageError)?;
        if tables.archives.contains_key(&archive.year) {
            return Err(RepoCreateError::Conflict);
        }
        tables.archives.insert(archive.year, archive);
        tables.games.clear();
        tables.picks.clear();
        Ok(())
    }

    async fn get_archive(&self, year: SeasonYear) -> Result<SeasonArchive, RepoRetrieveError> {
        let tables = self.read().map_err(RepoRetrieveError::StorageError)?;
        tables
            .archives
            .get(&year)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn list_archives(&self) -> Result<Vec<ArchiveSummary>, RepoError> {
        let tables = self.read().map_err(RepoError::StorageError)?;
        Ok(tables.archives.values().map(|a| a.summary()).collect())
    }
}
