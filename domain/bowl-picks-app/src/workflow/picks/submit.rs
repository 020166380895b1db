use std::sync::Arc;

use bowl_picks_core::{GameId, Pick};

use crate::{
    PoolError, PoolResult,
    domain::{
        RepoRetrieveError, game::GameRepository, pick::PickRepository, season_lock::SeasonLock,
    },
    ports::{clock::Clock, participants::ParticipantDirectory},
    storage_failure,
    workflow::picks::PickView,
};

#[async_trait::async_trait]
pub trait SubmitPickUseCase {
    async fn submit_pick(
        &self,
        game_id: GameId,
        participant: &str,
        picked_team: &str,
    ) -> PoolResult<PickView>;
}

pub struct SubmitPickUseCaseImpl<
    S: GameRepository + PickRepository,
    D: ParticipantDirectory,
    C: Clock,
> {
    store: Arc<S>,
    participant_directory: Arc<D>,
    season_lock: Arc<SeasonLock>,
    clock: Arc<C>,
}

impl<S: GameRepository + PickRepository, D: ParticipantDirectory, C: Clock>
    SubmitPickUseCaseImpl<S, D, C>
{
    pub fn new(
        store: Arc<S>,
        participant_directory: Arc<D>,
        season_lock: Arc<SeasonLock>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            participant_directory,
            season_lock,
            clock,
        }
    }
}

#[async_trait::async_trait]
impl<
    S: GameRepository + PickRepository + Send + Sync + 'static,
    D: ParticipantDirectory + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
> SubmitPickUseCase for SubmitPickUseCaseImpl<S, D, C>
{
    async fn submit_pick(
        &self,
        game_id: GameId,
        participant: &str,
        picked_team: &str,
    ) -> PoolResult<PickView> {
        let participant = participant.trim();
        if participant.is_empty() {
            return PoolError::validation("participant name must not be empty");
        }
        if !self.participant_directory.is_registered(participant) {
            return PoolError::not_found(format!("unknown participant '{}'", participant));
        }

        let guard = self.season_lock.lock_game(game_id).await;

        let game = match self.store.get_game(game_id).await {
            Ok(game) => game,
            Err(RepoRetrieveError::NotFound) => {
                guard.forget();
                return PoolError::not_found(format!("game {} does not exist", game_id));
            }
            Err(RepoRetrieveError::StorageError(e)) => {
                return Err(storage_failure("Failed to load game for pick", e));
            }
        };

        let now = self.clock.now();
        if game.is_locked(now) {
            log::warn!(
                "Rejected pick by {} for locked game {}",
                participant,
                game_id
            );
            return PoolError::locked(format!("game {} is locked", game_id));
        }
        if !game.has_team(picked_team) {
            return PoolError::validation(format!(
                "'{}' does not play in game {}",
                picked_team, game_id
            ));
        }

        let pick = Pick {
            game_id,
            participant: participant.to_string(),
            picked_team: picked_team.to_string(),
            submitted_at: now,
        };
        self.store
            .save_pick(pick.clone())
            .await
            .map_err(|e| storage_failure("Failed to save pick", e))?;

        log::debug!("{} picked {} in game {}", participant, picked_team, game_id);
        Ok(PickView::of(pick, &game, now))
    }
}
