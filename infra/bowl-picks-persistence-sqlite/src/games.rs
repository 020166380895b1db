use bowl_picks_app::domain::{
    RepoError, RepoRetrieveError, RepoUpdateError, game::GameRepository,
};
use bowl_picks_core::{FinalScore, Game, GameDetails, GameId};
use chrono::{DateTime, Utc};
use sqlx::{Row, sqlite::SqliteRow};

use crate::{SqlitePoolStore, from_millis, to_millis};

const GAME_COLUMNS: &str = "id, bowl_name, home_team, away_team, kickoff, spread, over_under, \
    is_playoff, winner, home_score, away_score, created_at";

fn score_from_columns(home: Option<i64>, away: Option<i64>) -> Result<Option<FinalScore>, String> {
    match (home, away) {
        (Some(home), Some(away)) => {
            let home = u32::try_from(home).map_err(|e| e.to_string())?;
            let away = u32::try_from(away).map_err(|e| e.to_string())?;
            Ok(Some(FinalScore::new(home, away)))
        }
        (None, None) => Ok(None),
        _ => Err("game row has only one score".to_string()),
    }
}

pub(crate) fn game_from_row(row: &SqliteRow) -> Result<Game, String> {
    let read = |e: sqlx::Error| e.to_string();
    let kickoff: Option<i64> = row.try_get("kickoff").map_err(read)?;
    let created_at: i64 = row.try_get("created_at").map_err(read)?;
    Ok(Game {
        id: GameId(row.try_get("id").map_err(read)?),
        created_at: from_millis(created_at)?,
        details: GameDetails {
            bowl_name: row.try_get("bowl_name").map_err(read)?,
            home_team: row.try_get("home_team").map_err(read)?,
            away_team: row.try_get("away_team").map_err(read)?,
            kickoff: kickoff.map(from_millis).transpose()?,
            spread: row.try_get("spread").map_err(read)?,
            over_under: row.try_get("over_under").map_err(read)?,
            is_playoff: row.try_get("is_playoff").map_err(read)?,
            winner: row.try_get("winner").map_err(read)?,
            score: score_from_columns(
                row.try_get("home_score").map_err(read)?,
                row.try_get("away_score").map_err(read)?,
            )?,
        },
    })
}

impl SqlitePoolStore {
    async fn fetch_game(&self, id: GameId) -> Result<Option<Game>, String> {
        let row = sqlx::query(&format!("SELECT {} FROM games WHERE id = ?", GAME_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| e.to_string())?;
        row.as_ref().map(game_from_row).transpose()
    }
}

#[async_trait::async_trait]
impl GameRepository for SqlitePoolStore {
    async fn create_game(
        &self,
        details: GameDetails,
        created_at: DateTime<Utc>,
    ) -> Result<Game, RepoError> {
        let res = sqlx::query(
            "INSERT INTO games (bowl_name, home_team, away_team, kickoff, spread, over_under, is_playoff, winner, home_score, away_score, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&details.bowl_name)
        .bind(&details.home_team)
        .bind(&details.away_team)
        .bind(details.kickoff.map(to_millis))
        .bind(details.spread)
        .bind(details.over_under)
        .bind(details.is_playoff)
        .bind(&details.winner)
        .bind(details.score.map(|s| i64::from(s.home)))
        .bind(details.score.map(|s| i64::from(s.away)))
        .bind(to_millis(created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::StorageError(e.to_string()))?;

        let id = GameId(res.last_insert_rowid());
        match self.fetch_game(id).await {
            Ok(Some(game)) => Ok(game),
            Ok(None) => Err(RepoError::StorageError(format!(
                "game {} vanished after insert",
                id
            ))),
            Err(e) => Err(RepoError::StorageError(e)),
        }
    }

    async fn get_game(&self, id: GameId) -> Result<Game, RepoRetrieveError> {
        match self.fetch_game(id).await {
            Ok(Some(game)) => Ok(game),
            Ok(None) => Err(RepoRetrieveError::NotFound),
            Err(e) => Err(RepoRetrieveError::StorageError(e)),
        }
    }

    async fn update_game(&self, id: GameId, details: GameDetails) -> Result<Game, RepoUpdateError> {
        let res = sqlx::query(
            "UPDATE games SET bowl_name = ?, home_team = ?, away_team = ?, kickoff = ?, spread = ?, over_under = ?, is_playoff = ?, winner = ?, home_score = ?, away_score = ? WHERE id = ?",
        )
        .bind(&details.bowl_name)
        .bind(&details.home_team)
        .bind(&details.away_team)
        .bind(details.kickoff.map(to_millis))
        .bind(details.spread)
        .bind(details.over_under)
        .bind(details.is_playoff)
        .bind(&details.winner)
        .bind(details.score.map(|s| i64::from(s.home)))
        .bind(details.score.map(|s| i64::from(s.away)))
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoUpdateError::StorageError(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(RepoUpdateError::NotFound);
        }
        match self.fetch_game(id).await {
            Ok(Some(game)) => Ok(game),
            Ok(None) => Err(RepoUpdateError::NotFound),
            Err(e) => Err(RepoUpdateError::StorageError(e)),
        }
    }

    async fn delete_game(&self, id: GameId) -> Result<(), RepoUpdateError> {
        let storage = |e: sqlx::Error| RepoUpdateError::StorageError(e.to_string());
        let mut tx = self.pool.begin().await.map_err(storage)?;
        sqlx::query("DELETE FROM picks WHERE game_id = ?")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;
        let res = sqlx::query("DELETE FROM games WHERE id = ?")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;
        if res.rows_affected() == 0 {
            tx.rollback().await.map_err(storage)?;
            return Err(RepoUpdateError::NotFound);
        }
        tx.commit().await.map_err(storage)?;
        Ok(())
    }

    async fn list_games(&self) -> Result<Vec<Game>, RepoError> {
        let rows = sqlx::query(&format!("SELECT {} FROM games ORDER BY id", GAME_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        rows.iter()
            .map(|row| game_from_row(row).map_err(RepoError::StorageError))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use bowl_picks_app::domain::pick::PickRepository;
    use bowl_picks_core::Pick;
    use chrono::TimeZone;

    use super::*;

    fn cotton_bowl() -> GameDetails {
        let mut details = GameDetails::new("Cotton Bowl", "Texas", "Ohio State");
        details.kickoff = Some(Utc.with_ymd_and_hms(2025, 1, 10, 19, 30, 0).unwrap());
        details.spread = Some(-1.5);
        details.over_under = Some(53.5);
        details.is_playoff = true;
        details
    }

    #[tokio::test]
    async fn test_game_survives_storage() {
        let store = SqlitePoolStore::in_memory().await.unwrap();
        let created_at = Utc.with_ymd_and_hms(2024, 12, 8, 12, 0, 0).unwrap();
        let created = store.create_game(cotton_bowl(), created_at).await.unwrap();
        let loaded = store.get_game(created.id).await.unwrap();
        assert_eq!(loaded, created);

        let mut result = cotton_bowl();
        result.winner = Some("Ohio State".to_string());
        result.score = Some(FinalScore::new(14, 28));
        let updated = store.update_game(created.id, result).await.unwrap();
        assert_eq!(updated.winner(), Some("Ohio State"));
        assert_eq!(updated.details.score, Some(FinalScore::new(14, 28)));
        assert_eq!(updated.created_at, created_at);
    }

    #[tokio::test]
    async fn test_created_game_matches_stored_row() {
        let store = SqlitePoolStore::in_memory().await.unwrap();
        let precise = Utc.with_ymd_and_hms(2024, 12, 8, 12, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let mut details = cotton_bowl();
        details.kickoff = Some(precise + chrono::Duration::days(30));

        let created = store.create_game(details, precise).await.unwrap();
        assert_eq!(created.created_at.timestamp_subsec_nanos(), 123_000_000);
        assert_eq!(store.get_game(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_missing_game() {
        let store = SqlitePoolStore::in_memory().await.unwrap();
        assert!(matches!(
            store.get_game(GameId(7)).await,
            Err(RepoRetrieveError::NotFound)
        ));
        assert!(matches!(
            store.update_game(GameId(7), cotton_bowl()).await,
            Err(RepoUpdateError::NotFound)
        ));
        assert!(matches!(
            store.delete_game(GameId(7)).await,
            Err(RepoUpdateError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_picks() {
        let store = SqlitePoolStore::in_memory().await.unwrap();
        let keep = store.create_game(cotton_bowl(), Utc::now()).await.unwrap();
        let gone = store
            .create_game(GameDetails::new("Orange Bowl", "Notre Dame", "Penn State"), Utc::now())
            .await
            .unwrap();
        for (game_id, team) in [(keep.id, "Texas"), (gone.id, "Penn State")] {
            store
                .save_pick(Pick {
                    game_id,
                    participant: "Matt".to_string(),
                    picked_team: team.to_string(),
                    submitted_at: Utc::now(),
                })
                .await
                .unwrap();
        }

        store.delete_game(gone.id).await.unwrap();
        let games = store.list_games().await.unwrap();
        assert_eq!(games.len(), 1);
        let picks = store.list_picks().await.unwrap();
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].game_id, keep.id);
    }
}
