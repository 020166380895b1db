use bowl_picks_core::{GameId, Pick};

use crate::domain::RepoError;

#[async_trait::async_trait]
pub trait PickRepository {
    /// Inserts the pick or replaces the one stored for the same game and participant.
    async fn save_pick(&self, pick: Pick) -> Result<(), RepoError>;
    async fn list_picks_for_game(&self, game_id: GameId) -> Result<Vec<Pick>, RepoError>;
    async fn list_picks(&self) -> Result<Vec<Pick>, RepoError>;
}
