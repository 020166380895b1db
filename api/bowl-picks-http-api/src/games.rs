use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bowl_picks_app::{
    domain::game::{GameUpdate, NewGame},
    workflow::games::GameView,
};
use bowl_picks_core::GameId;
use chrono::{DateTime, Utc};

use crate::{AppState, ServiceError, auth::Auth};

#[derive(serde::Serialize, Clone)]
pub struct JsonGame {
    id: i64,
    bowl_name: String,
    home_team: String,
    away_team: String,
    game_time: Option<DateTime<Utc>>,
    spread: Option<f64>,
    over_under: Option<f64>,
    is_playoff: bool,
    winner: Option<String>,
    home_score: Option<u32>,
    away_score: Option<u32>,
    is_locked: bool,
    home_spread_display: String,
    away_spread_display: String,
    created_at: DateTime<Utc>,
}

impl From<GameView> for JsonGame {
    fn from(view: GameView) -> Self {
        let details = view.game.details;
        JsonGame {
            id: view.game.id.0,
            bowl_name: details.bowl_name,
            home_team: details.home_team,
            away_team: details.away_team,
            game_time: details.kickoff,
            spread: details.spread,
            over_under: details.over_under,
            is_playoff: details.is_playoff,
            winner: details.winner,
            home_score: details.score.map(|s| s.home),
            away_score: details.score.map(|s| s.away),
            is_locked: view.is_locked,
            home_spread_display: view.home_spread,
            away_spread_display: view.away_spread,
            created_at: view.game.created_at,
        }
    }
}

#[derive(serde::Deserialize)]
pub struct JsonCreateGame {
    #[serde(default)]
    bowl_name: String,
    #[serde(default)]
    home_team: String,
    #[serde(default)]
    away_team: String,
    game_time: Option<DateTime<Utc>>,
    spread: Option<f64>,
    over_under: Option<f64>,
    #[serde(default)]
    is_playoff: bool,
}

/// Keeps an explicit `null` (clear the field) apart from a missing field (keep it).
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    <Option<T> as serde::Deserialize>::deserialize(deserializer).map(Some)
}

#[derive(serde::Deserialize)]
pub struct JsonUpdateGame {
    bowl_name: Option<String>,
    home_team: Option<String>,
    away_team: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    game_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    spread: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    over_under: Option<Option<f64>>,
    is_playoff: Option<bool>,
    winner: Option<String>,
    home_score: Option<u32>,
    away_score: Option<u32>,
}

pub async fn list_games(
    _auth: Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonGame>>, ServiceError> {
    let games = state.app.game_list_use_case.list_games().await?;
    Ok(Json(games.into_iter().map(JsonGame::from).collect()))
}

pub async fn create_game(
    auth: Auth,
    State(state): State<AppState>,
    Json(body): Json<JsonCreateGame>,
) -> Result<(StatusCode, Json<JsonGame>), ServiceError> {
    auth.require_admin()?;
    let game = NewGame {
        bowl_name: body.bowl_name,
        home_team: body.home_team,
        away_team: body.away_team,
        kickoff: body.game_time,
        spread: body.spread,
        over_under: body.over_under,
        is_playoff: body.is_playoff,
    };
    let view = state.app.game_create_use_case.create_game(game).await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

pub async fn update_game(
    auth: Auth,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(body): Json<JsonUpdateGame>,
) -> Result<Json<JsonGame>, ServiceError> {
    auth.require_admin()?;
    let update = GameUpdate {
        bowl_name: body.bowl_name,
        home_team: body.home_team,
        away_team: body.away_team,
        kickoff: body.game_time,
        spread: body.spread,
        over_under: body.over_under,
        is_playoff: body.is_playoff,
        winner: body.winner,
        home_score: body.home_score,
        away_score: body.away_score,
    };
    let view = state
        .app
        .game_update_use_case
        .update_game(GameId(id), update)
        .await?;
    Ok(Json(view.into()))
}

pub async fn delete_game(
    auth: Auth,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, ServiceError> {
    auth.require_admin()?;
    state.app.game_delete_use_case.delete_game(GameId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
