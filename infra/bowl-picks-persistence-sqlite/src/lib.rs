use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

pub mod archives;
pub mod games;
pub mod picks;

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS games (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        bowl_name TEXT NOT NULL,
        home_team TEXT NOT NULL,
        away_team TEXT NOT NULL,
        kickoff INTEGER,
        spread REAL,
        over_under REAL,
        is_playoff INTEGER NOT NULL DEFAULT 0,
        winner TEXT,
        home_score INTEGER,
        away_score INTEGER,
        created_at INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS picks (
        game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
        participant TEXT NOT NULL,
        picked_team TEXT NOT NULL,
        submitted_at INTEGER NOT NULL,
        PRIMARY KEY (game_id, participant)
    )",
    "CREATE TABLE IF NOT EXISTS archives (
        year INTEGER PRIMARY KEY,
        created_at INTEGER NOT NULL,
        games TEXT NOT NULL,
        picks TEXT NOT NULL,
        standings TEXT NOT NULL
    )",
];

/// Live season and archives stored in one SQLite database.
pub struct SqlitePoolStore {
    pool: Pool<Sqlite>,
}

impl SqlitePoolStore {
    /// Opens (and creates if needed) the database file at `path`.
    pub async fn open(path: &str) -> Result<Self, String> {
        let conn_options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(conn_options)
            .await
            .map_err(|e| format!("Failed to open {}: {}", path, e))?;
        Self::with_pool(pool).await
    }

    /// A private database that lives as long as the store.
    pub async fn in_memory() -> Result<Self, String> {
        let conn_options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| e.to_string())?
            .foreign_keys(true);
        // every connection would otherwise get its own empty database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(conn_options)
            .await
            .map_err(|e| format!("Failed to open in-memory database: {}", e))?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: Pool<Sqlite>) -> Result<Self, String> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(|e| format!("Failed to create schema: {}", e))?;
        }
        log::debug!("SQLite schema ready");
        Ok(Self { pool })
    }
}

fn to_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>, String> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| format!("invalid timestamp {}", millis))
}
