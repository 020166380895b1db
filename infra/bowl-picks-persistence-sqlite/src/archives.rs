use bowl_picks_app::domain::{
    RepoCreateError, RepoError, RepoRetrieveError, archive::ArchiveRepository,
};
use bowl_picks_core::{
    ArchiveSummary, FinalScore, Game, GameDetails, GameId, Pick, SeasonArchive, SeasonYear,
    StandingsEntry,
};
use serde::{Deserialize, Serialize};
use sqlx::Row;

use crate::{SqlitePoolStore, from_millis, to_millis};

#[derive(Serialize, Deserialize)]
struct ArchivedGameEntity {
    id: i64,
    created_at: i64,
    bowl_name: String,
    home_team: String,
    away_team: String,
    kickoff: Option<i64>,
    spread: Option<f64>,
    over_under: Option<f64>,
    is_playoff: bool,
    winner: Option<String>,
    home_score: Option<u32>,
    away_score: Option<u32>,
}

impl From<&Game> for ArchivedGameEntity {
    fn from(game: &Game) -> Self {
        let details = &game.details;
        Self {
            id: game.id.0,
            created_at: to_millis(game.created_at),
            bowl_name: details.bowl_name.clone(),
            home_team: details.home_team.clone(),
            away_team: details.away_team.clone(),
            kickoff: details.kickoff.map(to_millis),
            spread: details.spread,
            over_under: details.over_under,
            is_playoff: details.is_playoff,
            winner: details.winner.clone(),
            home_score: details.score.map(|s| s.home),
            away_score: details.score.map(|s| s.away),
        }
    }
}

impl ArchivedGameEntity {
    fn into_game(self) -> Result<Game, String> {
        let score = match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some(FinalScore::new(home, away)),
            _ => None,
        };
        Ok(Game {
            id: GameId(self.id),
            created_at: from_millis(self.created_at)?,
            details: GameDetails {
                bowl_name: self.bowl_name,
                home_team: self.home_team,
                away_team: self.away_team,
                kickoff: self.kickoff.map(from_millis).transpose()?,
                spread: self.spread,
                over_under: self.over_under,
                is_playoff: self.is_playoff,
                winner: self.winner,
                score,
            },
        })
    }
}

#[derive(Serialize, Deserialize)]
struct ArchivedPickEntity {
    game_id: i64,
    participant: String,
    picked_team: String,
    submitted_at: i64,
}

impl From<&Pick> for ArchivedPickEntity {
    fn from(pick: &Pick) -> Self {
        Self {
            game_id: pick.game_id.0,
            participant: pick.participant.clone(),
            picked_team: pick.picked_team.clone(),
            submitted_at: to_millis(pick.submitted_at),
        }
    }
}

impl ArchivedPickEntity {
    fn into_pick(self) -> Result<Pick, String> {
        Ok(Pick {
            game_id: GameId(self.game_id),
            participant: self.participant,
            picked_team: self.picked_team,
            submitted_at: from_millis(self.submitted_at)?,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct StandingsEntity {
    participant: String,
    correct_picks: u32,
    pending_picks: u32,
    total_picks: u32,
}

impl From<&StandingsEntry> for StandingsEntity {
    fn from(entry: &StandingsEntry) -> Self {
        Self {
            participant: entry.participant.clone(),
            correct_picks: entry.correct_picks,
            pending_picks: entry.pending_picks,
            total_picks: entry.total_picks,
        }
    }
}

impl From<StandingsEntity> for StandingsEntry {
    fn from(entity: StandingsEntity) -> Self {
        StandingsEntry {
            participant: entity.participant,
            correct_picks: entity.correct_picks,
            pending_picks: entity.pending_picks,
            total_picks: entity.total_picks,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to encode archive: {}", e))
}

fn from_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Failed to decode archive: {}", e))
}

fn decode_archive(
    year: i64,
    created_at: i64,
    games: &str,
    picks: &str,
    standings: &str,
) -> Result<SeasonArchive, String> {
    let year = i32::try_from(year).map_err(|e| e.to_string())?;
    let games = from_json::<Vec<ArchivedGameEntity>>(games)?
        .into_iter()
        .map(ArchivedGameEntity::into_game)
        .collect::<Result<Vec<_>, _>>()?;
    let picks = from_json::<Vec<ArchivedPickEntity>>(picks)?
        .into_iter()
        .map(ArchivedPickEntity::into_pick)
        .collect::<Result<Vec<_>, _>>()?;
    let standings = from_json::<Vec<StandingsEntity>>(standings)?
        .into_iter()
        .map(StandingsEntry::from)
        .collect();
    Ok(SeasonArchive {
        year: SeasonYear(year),
        created_at: from_millis(created_at)?,
        games,
        picks,
        standings,
    })
}

#[async_trait::async_trait]
impl ArchiveRepository for SqlitePoolStore {
    async fn archive_season(&self, archive: SeasonArchive) -> Result<(), RepoCreateError> {
        let games: Vec<ArchivedGameEntity> = archive.games.iter().map(Into::into).collect();
        let picks: Vec<ArchivedPickEntity> = archive.picks.iter().map(Into::into).collect();
        let standings: Vec<StandingsEntity> = archive.standings.iter().map(Into::into).collect();
        let (games, picks, standings) = (
            to_json(&games).map_err(RepoCreateError::StorageError)?,
            to_json(&picks).map_err(RepoCreateError::StorageError)?,
            to_json(&standings).map_err(RepoCreateError::StorageError)?,
        );

        let storage = |e: sqlx::Error| RepoCreateError::StorageError(e.to_string());
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT year FROM archives WHERE year = ?")
            .bind(archive.year.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage)?;
        if existing.is_some() {
            tx.rollback().await.map_err(storage)?;
            return Err(RepoCreateError::Conflict);
        }

        sqlx::query(
            "INSERT INTO archives (year, created_at, games, picks, standings) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(archive.year.0)
        .bind(to_millis(archive.created_at))
        .bind(games)
        .bind(picks)
        .bind(standings)
        .execute(&mut *tx)
        .await
        .map_err(storage)?;
        sqlx::query("DELETE FROM picks")
            .execute(&mut *tx)
            .await
            .map_err(storage)?;
        sqlx::query("DELETE FROM games")
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        tx.commit().await.map_err(storage)?;
        Ok(())
    }

    async fn get_archive(&self, year: SeasonYear) -> Result<SeasonArchive, RepoRetrieveError> {
        let storage = |e: sqlx::Error| RepoRetrieveError::StorageError(e.to_string());
        let row = sqlx::query(
            "SELECT year, created_at, games, picks, standings FROM archives WHERE year = ?",
        )
        .bind(year.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?
        .ok_or(RepoRetrieveError::NotFound)?;

        let year: i64 = row.try_get("year").map_err(storage)?;
        let created_at: i64 = row.try_get("created_at").map_err(storage)?;
        let games: String = row.try_get("games").map_err(storage)?;
        let picks: String = row.try_get("picks").map_err(storage)?;
        let standings: String = row.try_get("standings").map_err(storage)?;
        decode_archive(year, created_at, &games, &picks, &standings)
            .map_err(RepoRetrieveError::StorageError)
    }

    async fn list_archives(&self) -> Result<Vec<ArchiveSummary>, RepoError> {
        let rows: Vec<(i64, i64)> =
            sqlx::query_as("SELECT year, created_at FROM archives ORDER BY year DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::StorageError(e.to_string()))?;
        rows.into_iter()
            .map(|(year, created_at)| {
                let year = i32::try_from(year).map_err(|e| RepoError::StorageError(e.to_string()))?;
                Ok(ArchiveSummary {
                    year: SeasonYear(year),
                    created_at: from_millis(created_at).map_err(RepoError::StorageError)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use bowl_picks_app::domain::{game::GameRepository, pick::PickRepository};
    use chrono::{TimeZone, Utc};

    use super::*;

    async fn seeded_store() -> SqlitePoolStore {
        let store = SqlitePoolStore::in_memory().await.unwrap();
        let mut details = GameDetails::new("Rose Bowl", "Oregon", "Ohio State");
        details.kickoff = Some(Utc.with_ymd_and_hms(2025, 1, 1, 22, 0, 0).unwrap());
        details.spread = Some(-2.5);
        details.winner = Some("Ohio State".to_string());
        details.score = Some(FinalScore::new(21, 41));
        let game = store
            .create_game(details, Utc.with_ymd_and_hms(2024, 12, 8, 0, 0, 0).unwrap())
            .await
            .unwrap();
        for (who, team) in [("Anna", "Ohio State"), ("Billy", "Oregon")] {
            store
                .save_pick(Pick {
                    game_id: game.id,
                    participant: who.to_string(),
                    picked_team: team.to_string(),
                    submitted_at: Utc.with_ymd_and_hms(2024, 12, 30, 8, 0, 0).unwrap(),
                })
                .await
                .unwrap();
        }
        store
    }

    fn snapshot_of(year: i32, games: Vec<Game>, picks: Vec<Pick>) -> SeasonArchive {
        SeasonArchive::snapshot(
            SeasonYear(year),
            Utc.with_ymd_and_hms(2025, 1, 25, 12, 0, 0).unwrap(),
            games,
            picks,
        )
    }

    #[tokio::test]
    async fn test_archive_is_stored_and_live_season_cleared() {
        let store = seeded_store().await;
        let archive = snapshot_of(
            2024,
            store.list_games().await.unwrap(),
            store.list_picks().await.unwrap(),
        );
        store.archive_season(archive.clone()).await.unwrap();

        assert!(store.list_games().await.unwrap().is_empty());
        assert!(store.list_picks().await.unwrap().is_empty());

        let loaded = store.get_archive(SeasonYear(2024)).await.unwrap();
        assert_eq!(loaded, archive);
        assert_eq!(loaded.recomputed_standings(), loaded.standings);
        assert_eq!(loaded.standings[0].participant, "Anna");
    }

    #[tokio::test]
    async fn test_second_archive_conflicts_without_side_effects() {
        let store = seeded_store().await;
        let first = snapshot_of(2024, Vec::new(), Vec::new());
        store.archive_season(first.clone()).await.unwrap();

        let refill = store
            .create_game(GameDetails::new("Sun Bowl", "Duke", "Ole Miss"), Utc::now())
            .await
            .unwrap();
        let second = snapshot_of(2024, store.list_games().await.unwrap(), Vec::new());
        assert!(matches!(
            store.archive_season(second).await,
            Err(RepoCreateError::Conflict)
        ));

        assert_eq!(store.get_archive(SeasonYear(2024)).await.unwrap(), first);
        assert_eq!(store.list_games().await.unwrap()[0].id, refill.id);
    }

    #[tokio::test]
    async fn test_listing_and_missing_years() {
        let store = SqlitePoolStore::in_memory().await.unwrap();
        for year in [2022, 2024] {
            store
                .archive_season(snapshot_of(year, Vec::new(), Vec::new()))
                .await
                .unwrap();
        }
        let years: Vec<SeasonYear> = store
            .list_archives()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.year)
            .collect();
        assert_eq!(years, vec![SeasonYear(2024), SeasonYear(2022)]);
        assert!(matches!(
            store.get_archive(SeasonYear(2023)).await,
            Err(RepoRetrieveError::NotFound)
        ));
    }
}
