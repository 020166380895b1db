use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bowl_picks_app::workflow::games::GameView;
use bowl_picks_core::{ArchiveSummary, SeasonYear};
use chrono::{DateTime, Utc};

use crate::{
    AppState, ServiceError,
    auth::Auth,
    games::JsonGame,
    picks::{JsonStandingsEntry, outcome_name, ranked},
};

#[derive(serde::Serialize, Clone)]
pub struct JsonArchiveSummary {
    year: i32,
    label: String,
    created_at: DateTime<Utc>,
}

impl From<ArchiveSummary> for JsonArchiveSummary {
    fn from(summary: ArchiveSummary) -> Self {
        JsonArchiveSummary {
            year: summary.year.0,
            label: summary.year.label(),
            created_at: summary.created_at,
        }
    }
}

#[derive(serde::Serialize, Clone)]
pub struct JsonSeason {
    year: i32,
    label: String,
    is_active: bool,
    is_archived: bool,
}

#[derive(serde::Serialize, Clone)]
pub struct JsonArchivedPick {
    game_id: i64,
    participant: String,
    picked_team: String,
    submitted_at: DateTime<Utc>,
    outcome: &'static str,
    is_correct: Option<bool>,
}

#[derive(serde::Serialize, Clone)]
pub struct JsonArchive {
    year: i32,
    label: String,
    created_at: DateTime<Utc>,
    games: Vec<JsonGame>,
    picks: Vec<JsonArchivedPick>,
    standings: Vec<JsonStandingsEntry>,
}

#[derive(serde::Deserialize)]
pub struct JsonCreateArchive {
    year: i32,
}

pub async fn list_archives(
    _auth: Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonArchiveSummary>>, ServiceError> {
    let archives = state.app.archive_list_use_case.list_archives().await?;
    Ok(Json(archives.into_iter().map(Into::into).collect()))
}

pub async fn list_seasons(
    _auth: Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonSeason>>, ServiceError> {
    let seasons = state.app.season_list_use_case.list_seasons().await?;
    Ok(Json(
        seasons
            .into_iter()
            .map(|season| JsonSeason {
                year: season.year.0,
                label: season.year.label(),
                is_active: season.is_active,
                is_archived: season.is_archived,
            })
            .collect(),
    ))
}

pub async fn get_archive(
    _auth: Auth,
    Path(year): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<JsonArchive>, ServiceError> {
    let view = state
        .app
        .archive_get_use_case
        .get_archive(SeasonYear(year))
        .await?;
    let archive = view.archive;
    // Frozen games are rendered as of the moment the season was closed.
    let games = archive
        .games
        .into_iter()
        .map(|game| GameView::at(game, archive.created_at).into())
        .collect();
    let picks = view
        .picks
        .into_iter()
        .map(|archived| JsonArchivedPick {
            game_id: archived.pick.game_id.0,
            participant: archived.pick.participant,
            picked_team: archived.pick.picked_team,
            submitted_at: archived.pick.submitted_at,
            outcome: outcome_name(archived.outcome),
            is_correct: archived.outcome.is_correct(),
        })
        .collect();

    Ok(Json(JsonArchive {
        year: archive.year.0,
        label: archive.year.label(),
        created_at: archive.created_at,
        games,
        picks,
        standings: ranked(archive.standings),
    }))
}

pub async fn create_archive(
    auth: Auth,
    State(state): State<AppState>,
    Json(body): Json<JsonCreateArchive>,
) -> Result<(StatusCode, Json<JsonArchiveSummary>), ServiceError> {
    auth.require_admin()?;
    let summary = state
        .app
        .archive_create_use_case
        .create_archive(SeasonYear(body.year))
        .await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}
