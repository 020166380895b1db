use bowl_picks_app::domain::{RepoError, pick::PickRepository};
use bowl_picks_core::{GameId, Pick};
use sqlx::{Row, sqlite::SqliteRow};

use crate::{SqlitePoolStore, from_millis, to_millis};

fn pick_from_row(row: &SqliteRow) -> Result<Pick, String> {
    let read = |e: sqlx::Error| e.to_string();
    let submitted_at: i64 = row.try_get("submitted_at").map_err(read)?;
    Ok(Pick {
        game_id: GameId(row.try_get("game_id").map_err(read)?),
        participant: row.try_get("participant").map_err(read)?,
        picked_team: row.try_get("picked_team").map_err(read)?,
        submitted_at: from_millis(submitted_at)?,
    })
}

fn picks_from_rows(rows: Vec<SqliteRow>) -> Result<Vec<Pick>, RepoError> {
    rows.iter()
        .map(|row| pick_from_row(row).map_err(RepoError::StorageError))
        .collect()
}

#[async_trait::async_trait]
impl PickRepository for SqlitePoolStore {
    async fn save_pick(&self, pick: Pick) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO picks (game_id, participant, picked_team, submitted_at) VALUES (?, ?, ?, ?) \
             ON CONFLICT (game_id, participant) DO UPDATE SET picked_team = excluded.picked_team, submitted_at = excluded.submitted_at",
        )
        .bind(pick.game_id.0)
        .bind(&pick.participant)
        .bind(&pick.picked_team)
        .bind(to_millis(pick.submitted_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::StorageError(e.to_string()))?;
        Ok(())
    }

    async fn list_picks_for_game(&self, game_id: GameId) -> Result<Vec<Pick>, RepoError> {
        let rows = sqlx::query(
            "SELECT game_id, participant, picked_team, submitted_at FROM picks WHERE game_id = ? ORDER BY participant",
        )
        .bind(game_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::StorageError(e.to_string()))?;
        picks_from_rows(rows)
    }

    async fn list_picks(&self) -> Result<Vec<Pick>, RepoError> {
        let rows = sqlx::query(
            "SELECT game_id, participant, picked_team, submitted_at FROM picks ORDER BY game_id, participant",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::StorageError(e.to_string()))?;
        picks_from_rows(rows)
    }
}
