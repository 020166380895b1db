use axum::{Json, extract::State};
use bowl_picks_app::workflow::{
    games::{import::ImportReport, refresh_odds::OddsRefreshReport},
    status::api_status::ApiStatus,
};

use crate::{AppState, ServiceError, auth::Auth};

#[derive(serde::Serialize, Clone)]
pub struct JsonImportReport {
    fetched: usize,
    imported: usize,
    skipped: usize,
}

impl From<ImportReport> for JsonImportReport {
    fn from(report: ImportReport) -> Self {
        JsonImportReport {
            fetched: report.fetched,
            imported: report.imported,
            skipped: report.skipped,
        }
    }
}

#[derive(serde::Serialize, Clone)]
pub struct JsonOddsRefreshReport {
    updated: usize,
    requests_remaining: Option<u32>,
}

impl From<OddsRefreshReport> for JsonOddsRefreshReport {
    fn from(report: OddsRefreshReport) -> Self {
        JsonOddsRefreshReport {
            updated: report.updated,
            requests_remaining: report.requests_remaining,
        }
    }
}

#[derive(serde::Serialize, Clone)]
pub struct JsonApiStatus {
    odds_configured: bool,
    odds_requests_remaining: Option<u32>,
}

impl From<ApiStatus> for JsonApiStatus {
    fn from(status: ApiStatus) -> Self {
        JsonApiStatus {
            odds_configured: status.odds_configured,
            odds_requests_remaining: status.odds_requests_remaining,
        }
    }
}

pub async fn import_games(
    auth: Auth,
    State(state): State<AppState>,
) -> Result<Json<JsonImportReport>, ServiceError> {
    auth.require_admin()?;
    let report = state.app.game_import_use_case.import_games().await?;
    Ok(Json(report.into()))
}

pub async fn refresh_odds(
    auth: Auth,
    State(state): State<AppState>,
) -> Result<Json<JsonOddsRefreshReport>, ServiceError> {
    auth.require_admin()?;
    let report = state.app.odds_refresh_use_case.refresh_odds().await?;
    Ok(Json(report.into()))
}

pub async fn api_status(
    auth: Auth,
    State(state): State<AppState>,
) -> Result<Json<JsonApiStatus>, ServiceError> {
    auth.require_admin()?;
    Ok(Json(state.app.api_status_use_case.api_status().await.into()))
}
