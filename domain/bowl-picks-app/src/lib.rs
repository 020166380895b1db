use std::sync::Arc;

use bowl_picks_core::SeasonYear;
use thiserror::Error;

use crate::{
    domain::{
        archive::ArchiveRepository, game::GameRepository, pick::PickRepository,
        season_lock::SeasonLock,
    },
    ports::{
        clock::Clock,
        feeds::{OddsFeed, ScheduleFeed},
        participants::ParticipantDirectory,
    },
    workflow::{
        archive::{
            create::{CreateArchiveUseCase, CreateArchiveUseCaseImpl},
            get::{GetArchiveUseCase, GetArchiveUseCaseImpl},
            list::{ListArchivesUseCase, ListArchivesUseCaseImpl},
            seasons::{ListSeasonsUseCase, ListSeasonsUseCaseImpl},
        },
        games::{
            create::{CreateGameUseCase, CreateGameUseCaseImpl},
            delete::{DeleteGameUseCase, DeleteGameUseCaseImpl},
            import::{ImportGamesUseCase, ImportGamesUseCaseImpl},
            list::{ListGamesUseCase, ListGamesUseCaseImpl},
            refresh_odds::{RefreshOddsUseCase, RefreshOddsUseCaseImpl},
            update::{UpdateGameUseCase, UpdateGameUseCaseImpl},
        },
        picks::{
            list::{ListPicksUseCase, ListPicksUseCaseImpl},
            submit::{SubmitPickUseCase, SubmitPickUseCaseImpl},
            users::{ListUsersUseCase, ListUsersUseCaseImpl},
        },
        standings::{
            leaderboard::{LeaderboardUseCase, LeaderboardUseCaseImpl},
            summary::{PoolSummaryUseCase, PoolSummaryUseCaseImpl},
        },
        status::api_status::{ApiStatusUseCase, ApiStatusUseCaseImpl},
    },
};

pub mod domain;
pub mod ports;
pub mod workflow;

#[derive(Debug, Error, PartialEq)]
pub enum PoolError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("locked: {0}")]
    Locked(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unavailable: {0}")]
    Unavailable(String),
    #[error("storage error: {0}")]
    Storage(String),
}

pub type PoolResult<T> = Result<T, PoolError>;

impl PoolError {
    pub fn validation<T, R>(msg: T) -> PoolResult<R>
    where
        T: Into<String>,
    {
        Err(PoolError::Validation(msg.into()))
    }

    pub fn not_found<T, R>(msg: T) -> PoolResult<R>
    where
        T: Into<String>,
    {
        Err(PoolError::NotFound(msg.into()))
    }

    pub fn locked<T, R>(msg: T) -> PoolResult<R>
    where
        T: Into<String>,
    {
        Err(PoolError::Locked(msg.into()))
    }

    pub fn conflict<T, R>(msg: T) -> PoolResult<R>
    where
        T: Into<String>,
    {
        Err(PoolError::Conflict(msg.into()))
    }

    pub fn unavailable<T, R>(msg: T) -> PoolResult<R>
    where
        T: Into<String>,
    {
        Err(PoolError::Unavailable(msg.into()))
    }
}

/// Logs a persistence failure and turns it into the error reported to callers.
pub(crate) fn storage_failure(context: &str, error: impl std::fmt::Display) -> PoolError {
    log::error!("{}: {}", context, error);
    PoolError::Storage(context.to_string())
}

pub struct Application {
    pub game_create_use_case: Box<dyn CreateGameUseCase + Send + Sync + 'static>,
    pub game_update_use_case: Box<dyn UpdateGameUseCase + Send + Sync + 'static>,
    pub game_delete_use_case: Box<dyn DeleteGameUseCase + Send + Sync + 'static>,
    pub game_list_use_case: Box<dyn ListGamesUseCase + Send + Sync + 'static>,
    pub game_import_use_case: Box<dyn ImportGamesUseCase + Send + Sync + 'static>,
    pub odds_refresh_use_case: Box<dyn RefreshOddsUseCase + Send + Sync + 'static>,

    pub pick_submit_use_case: Box<dyn SubmitPickUseCase + Send + Sync + 'static>,
    pub pick_list_use_case: Box<dyn ListPicksUseCase + Send + Sync + 'static>,
    pub user_list_use_case: Box<dyn ListUsersUseCase + Send + Sync + 'static>,

    pub leaderboard_use_case: Box<dyn LeaderboardUseCase + Send + Sync + 'static>,
    pub pool_summary_use_case: Box<dyn PoolSummaryUseCase + Send + Sync + 'static>,

    pub archive_create_use_case: Box<dyn CreateArchiveUseCase + Send + Sync + 'static>,
    pub archive_get_use_case: Box<dyn GetArchiveUseCase + Send + Sync + 'static>,
    pub archive_list_use_case: Box<dyn ListArchivesUseCase + Send + Sync + 'static>,
    pub season_list_use_case: Box<dyn ListSeasonsUseCase + Send + Sync + 'static>,

    pub api_status_use_case: Box<dyn ApiStatusUseCase + Send + Sync + 'static>,
}

pub fn build_application<
    S: GameRepository + PickRepository + ArchiveRepository + Send + Sync + 'static,
    D: ParticipantDirectory + Send + Sync + 'static,
    SF: ScheduleFeed + Send + Sync + 'static,
    OF: OddsFeed + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
>(
    store: Arc<S>,
    participant_directory: Arc<D>,
    schedule_feed: Arc<SF>,
    odds_feed: Arc<OF>,
    clock: Arc<C>,
    live_season: SeasonYear,
) -> Application {
    let season_lock = Arc::new(SeasonLock::new());

    let create_game_use_case = Arc::new(CreateGameUseCaseImpl::new(
        store.clone(),
        season_lock.clone(),
        clock.clone(),
    ));
    let update_game_use_case = Arc::new(UpdateGameUseCaseImpl::new(
        store.clone(),
        season_lock.clone(),
        clock.clone(),
    ));

    Application {
        game_create_use_case: Box::new(CreateGameUseCaseImpl::new(
            store.clone(),
            season_lock.clone(),
            clock.clone(),
        )),
        game_update_use_case: Box::new(UpdateGameUseCaseImpl::new(
            store.clone(),
            season_lock.clone(),
            clock.clone(),
        )),
        game_delete_use_case: Box::new(DeleteGameUseCaseImpl::new(
            store.clone(),
            season_lock.clone(),
        )),
        game_list_use_case: Box::new(ListGamesUseCaseImpl::new(store.clone(), clock.clone())),
        game_import_use_case: Box::new(ImportGamesUseCaseImpl::new(
            schedule_feed,
            store.clone(),
            create_game_use_case,
            update_game_use_case.clone(),
        )),
        odds_refresh_use_case: Box::new(RefreshOddsUseCaseImpl::new(
            odds_feed.clone(),
            store.clone(),
            update_game_use_case,
        )),

        pick_submit_use_case: Box::new(SubmitPickUseCaseImpl::new(
            store.clone(),
            participant_directory.clone(),
            season_lock.clone(),
            clock.clone(),
        )),
        pick_list_use_case: Box::new(ListPicksUseCaseImpl::new(store.clone(), clock.clone())),
        user_list_use_case: Box::new(ListUsersUseCaseImpl::new(
            store.clone(),
            participant_directory,
        )),

        leaderboard_use_case: Box::new(LeaderboardUseCaseImpl::new(store.clone())),
        pool_summary_use_case: Box::new(PoolSummaryUseCaseImpl::new(store.clone())),

        archive_create_use_case: Box::new(CreateArchiveUseCaseImpl::new(
            store.clone(),
            season_lock,
            clock,
        )),
        archive_get_use_case: Box::new(GetArchiveUseCaseImpl::new(store.clone())),
        archive_list_use_case: Box::new(ListArchivesUseCaseImpl::new(store.clone())),
        season_list_use_case: Box::new(ListSeasonsUseCaseImpl::new(store, live_season)),

        api_status_use_case: Box::new(ApiStatusUseCaseImpl::new(odds_feed)),
    }
}
