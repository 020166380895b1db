use std::sync::Arc;

use bowl_picks_core::GameId;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Serializes writes against the live season.
///
/// Every writer holds the shared side of the season gate; writers touching an
/// existing game additionally hold that game's mutex, so a lock check and the write
/// that depends on it cannot interleave with another write to the same game.
/// Season rollover takes the exclusive side and therefore runs alone.
pub struct SeasonLock {
    season: RwLock<()>,
    games: DashMap<GameId, Arc<Mutex<()>>>,
}

pub struct GameWriteGuard<'a> {
    lock: &'a SeasonLock,
    game_id: GameId,
    _game: OwnedMutexGuard<()>,
    _season: RwLockReadGuard<'a, ()>,
}

pub struct RolloverGuard<'a> {
    lock: &'a SeasonLock,
    _season: RwLockWriteGuard<'a, ()>,
}

impl SeasonLock {
    pub fn new() -> Self {
        Self {
            season: RwLock::new(()),
            games: DashMap::new(),
        }
    }

    /// For writes that add to the season without touching an existing game.
    pub async fn enter_season(&self) -> RwLockReadGuard<'_, ()> {
        self.season.read().await
    }

    pub async fn lock_game(&self, game_id: GameId) -> GameWriteGuard<'_> {
        let season = self.season.read().await;
        let game_mutex = self
            .games
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        GameWriteGuard {
            lock: self,
            game_id,
            _game: game_mutex.lock_owned().await,
            _season: season,
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_games(&self) -> usize {
        self.games.len()
    }

    pub async fn lock_for_rollover(&self) -> RolloverGuard<'_> {
        RolloverGuard {
            _season: self.season.write().await,
            lock: self,
        }
    }
}

impl GameWriteGuard<'_> {
    /// Releases the guard of a game that no longer exists (or never did) and drops its
    /// mutex, unless another writer is already queued on it.
    pub fn forget(self) {
        // one reference in the map, one in this guard
        self.lock
            .games
            .remove_if(&self.game_id, |_, mutex| Arc::strong_count(mutex) <= 2);
    }
}

impl RolloverGuard<'_> {
    /// No writer can hold a game mutex while the rollover guard is alive.
    pub fn reset_games(&self) {
        self.lock.games.clear();
    }
}
