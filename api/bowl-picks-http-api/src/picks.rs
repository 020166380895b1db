use axum::{
    Json,
    extract::{Path, State},
};
use bowl_picks_app::workflow::picks::PickView;
use bowl_picks_core::{GameId, PickOutcome, PoolSummary, StandingsEntry};
use chrono::{DateTime, Utc};

use crate::{AppState, ServiceError, auth::Auth};

#[derive(serde::Serialize, Clone)]
pub struct JsonPick {
    game_id: i64,
    participant: String,
    picked_team: String,
    submitted_at: DateTime<Utc>,
    outcome: &'static str,
    is_correct: Option<bool>,
    is_locked: bool,
}

pub(crate) fn outcome_name(outcome: PickOutcome) -> &'static str {
    match outcome {
        PickOutcome::Pending => "pending",
        PickOutcome::Correct => "correct",
        PickOutcome::Incorrect => "incorrect",
    }
}

impl From<PickView> for JsonPick {
    fn from(view: PickView) -> Self {
        JsonPick {
            game_id: view.pick.game_id.0,
            participant: view.pick.participant,
            picked_team: view.pick.picked_team,
            submitted_at: view.pick.submitted_at,
            outcome: outcome_name(view.outcome),
            is_correct: view.outcome.is_correct(),
            is_locked: view.is_locked,
        }
    }
}

#[derive(serde::Deserialize)]
pub struct JsonSubmitPick {
    game_id: i64,
    participant: String,
    picked_team: String,
}

#[derive(serde::Serialize, Clone)]
pub struct JsonUser {
    name: String,
}

#[derive(serde::Serialize, Clone)]
pub struct JsonStandingsEntry {
    rank: usize,
    participant: String,
    correct_picks: u32,
    pending_picks: u32,
    total_picks: u32,
    accuracy: Option<f64>,
}

pub(crate) fn ranked(standings: Vec<StandingsEntry>) -> Vec<JsonStandingsEntry> {
    standings
        .into_iter()
        .enumerate()
        .map(|(i, entry)| JsonStandingsEntry {
            rank: i + 1,
            accuracy: entry.accuracy(),
            participant: entry.participant,
            correct_picks: entry.correct_picks,
            pending_picks: entry.pending_picks,
            total_picks: entry.total_picks,
        })
        .collect()
}

#[derive(serde::Serialize, Clone)]
pub struct JsonLeader {
    participant: String,
    correct_picks: u32,
}

#[derive(serde::Serialize, Clone)]
pub struct JsonPoolSummary {
    total_correct: u32,
    total_pending: u32,
    total_picks: u32,
    leader: Option<JsonLeader>,
}

impl From<PoolSummary> for JsonPoolSummary {
    fn from(summary: PoolSummary) -> Self {
        JsonPoolSummary {
            total_correct: summary.total_correct,
            total_pending: summary.total_pending,
            total_picks: summary.total_picks,
            leader: summary.leader.map(|l| JsonLeader {
                participant: l.participant,
                correct_picks: l.correct_picks,
            }),
        }
    }
}

pub async fn list_picks(
    _auth: Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonPick>>, ServiceError> {
    let picks = state.app.pick_list_use_case.list_picks().await?;
    Ok(Json(picks.into_iter().map(JsonPick::from).collect()))
}

pub async fn list_picks_for_game(
    _auth: Auth,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonPick>>, ServiceError> {
    let picks = state
        .app
        .pick_list_use_case
        .list_picks_for_game(GameId(id))
        .await?;
    Ok(Json(picks.into_iter().map(JsonPick::from).collect()))
}

pub async fn submit_pick(
    auth: Auth,
    State(state): State<AppState>,
    Json(body): Json<JsonSubmitPick>,
) -> Result<Json<JsonPick>, ServiceError> {
    auth.require_participant()?;
    let view = state
        .app
        .pick_submit_use_case
        .submit_pick(GameId(body.game_id), &body.participant, &body.picked_team)
        .await?;
    Ok(Json(view.into()))
}

pub async fn list_users(
    _auth: Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonUser>>, ServiceError> {
    let users = state.app.user_list_use_case.list_users().await?;
    Ok(Json(users.into_iter().map(|name| JsonUser { name }).collect()))
}

pub async fn leaderboard(
    _auth: Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonStandingsEntry>>, ServiceError> {
    let standings = state.app.leaderboard_use_case.leaderboard().await?;
    Ok(Json(ranked(standings)))
}

pub async fn summary(
    _auth: Auth,
    State(state): State<AppState>,
) -> Result<Json<JsonPoolSummary>, ServiceError> {
    let summary = state.app.pool_summary_use_case.summary().await?;
    Ok(Json(summary.into()))
}
