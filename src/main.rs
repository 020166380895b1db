use std::sync::Arc;

use bowl_picks_app::{
    build_application,
    domain::{
        archive::ArchiveRepository, game::GameRepository, memory::InMemoryPoolStore,
        pick::PickRepository,
    },
    ports::{clock::SystemClock, participants::StaticParticipantDirectory},
};
use bowl_picks_core::SeasonYear;
use bowl_picks_feeds::{ncaa::NcaaScheduleFeed, odds::OddsApiFeed};
use bowl_picks_http_api::AppState;
use bowl_picks_persistence_sqlite::SqlitePoolStore;
use log::info;

use crate::{auth::SharedSecretAuth, config::ServerConfig};

mod auth;
mod config;
mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

async fn serve<S>(store: Arc<S>, config: &ServerConfig) -> std::io::Result<()>
where
    S: GameRepository + PickRepository + ArchiveRepository + Send + Sync + 'static,
{
    let participant_directory = Arc::new(StaticParticipantDirectory::new(
        config.participants.iter().cloned(),
    ));
    if config.participants.is_empty() {
        info!("No participant list configured, anyone may submit picks");
    }
    let schedule_feed = Arc::new(NcaaScheduleFeed::new(config.schedule_year));
    let odds_feed = Arc::new(OddsApiFeed::new(config.odds_api_key.clone()));

    let app = build_application(
        store,
        participant_directory,
        schedule_feed,
        odds_feed,
        Arc::new(SystemClock),
        SeasonYear(config.schedule_year),
    );
    let state = AppState {
        app: Arc::new(app),
        auth: Arc::new(SharedSecretAuth::new(
            config.admin_password.clone(),
            config.pool_password.clone(),
        )),
    };

    info!("Starting application for the {} schedule", config.schedule_year);
    bowl_picks_http_api::run(
        state,
        &config.http_host,
        config.http_port,
        &config.cors_origins,
        shutdown_signal(),
    )
    .await
}

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("No .env file loaded: {}", e);
    }

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logs::init_logger(config.log_files.as_ref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let result = match &config.database_path {
        Some(path) => match SqlitePoolStore::open(path).await {
            Ok(store) => {
                info!("Using SQLite database at {}", path);
                serve(Arc::new(store), &config).await
            }
            Err(e) => {
                log::error!("Failed to open database {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            log::warn!("BOWL_PICKS_DB not set, pool data lives in memory only");
            serve(Arc::new(InMemoryPoolStore::new()), &config).await
        }
    };

    if let Err(e) = result {
        log::error!("HTTP API failed: {}", e);
        std::process::exit(1);
    }
}
