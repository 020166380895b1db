use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, StatusCode, header},
    response::IntoResponse,
    routing::{get, post, put},
};
use bowl_picks_app::{Application, PoolError, ports::authentication::AuthenticationPort};
use tower_http::cors::CorsLayer;

mod admin;
mod archive;
mod auth;
mod games;
mod picks;

pub use auth::Auth;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
    pub auth: Arc<dyn AuthenticationPort + Send + Sync + 'static>,
}

pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/games", get(games::list_games).post(games::create_game))
        .route(
            "/games/{id}",
            put(games::update_game).delete(games::delete_game),
        )
        .route("/picks", get(picks::list_picks).post(picks::submit_pick))
        .route("/picks/game/{id}", get(picks::list_picks_for_game))
        .route("/picks/users", get(picks::list_users))
        .route("/picks/leaderboard", get(picks::leaderboard))
        .route("/picks/summary", get(picks::summary))
        .route("/archive", get(archive::list_archives))
        .route("/archive/create", post(archive::create_archive))
        .route("/archive/seasons/all", get(archive::list_seasons))
        .route("/archive/{year}", get(archive::get_archive))
        .route("/admin/import-games", post(admin::import_games))
        .route("/admin/refresh-odds", post(admin::refresh_odds))
        .route("/admin/api-status", get(admin::api_status))
        .with_state(state);

    if cors_origins.is_empty() {
        router
    } else {
        router.layer(build_cors_layer(cors_origins))
    }
}

fn build_cors_layer(cors_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

pub async fn run(
    state: AppState,
    host: &str,
    port: u16,
    cors_origins: &[String],
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let router = router(state, cors_origins);
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    log::info!("HTTP API listening on {}:{}", host, port);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    log::info!("HTTP API shut down gracefully");
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug)]
pub enum ServiceError {
    Pool(PoolError),
    Unauthorized(String),
    Forbidden(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Pool(e) => write!(f, "{}", e),
            ServiceError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ServiceError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::http::Response<axum::body::Body> {
        let (status, msg) = match self {
            ServiceError::Pool(PoolError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg),
            ServiceError::Pool(PoolError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg),
            ServiceError::Pool(PoolError::Locked(msg)) => (StatusCode::CONFLICT, msg),
            ServiceError::Pool(PoolError::Conflict(msg)) => (StatusCode::CONFLICT, msg),
            ServiceError::Pool(PoolError::Unavailable(msg)) => {
                (StatusCode::SERVICE_UNAVAILABLE, msg)
            }
            ServiceError::Pool(PoolError::Storage(msg)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ServiceError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServiceError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };
        let body = serde_json::json!({ "error": msg });
        (status, Json(body)).into_response()
    }
}

impl From<PoolError> for ServiceError {
    fn from(value: PoolError) -> Self {
        ServiceError::Pool(value)
    }
}
