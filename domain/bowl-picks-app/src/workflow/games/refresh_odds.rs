use std::sync::Arc;

use crate::{
    PoolError, PoolResult,
    domain::game::{GameRepository, GameUpdate},
    ports::feeds::OddsFeed,
    storage_failure,
    workflow::games::update::UpdateGameUseCase,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OddsRefreshReport {
    pub updated: usize,
    pub requests_remaining: Option<u32>,
}

#[async_trait::async_trait]
pub trait RefreshOddsUseCase {
    async fn refresh_odds(&self) -> PoolResult<OddsRefreshReport>;
}

pub struct RefreshOddsUseCaseImpl<F: OddsFeed, G: GameRepository, UG: UpdateGameUseCase> {
    odds_feed: Arc<F>,
    game_repository: Arc<G>,
    update_game_use_case: Arc<UG>,
}

impl<F: OddsFeed, G: GameRepository, UG: UpdateGameUseCase> RefreshOddsUseCaseImpl<F, G, UG> {
    pub fn new(odds_feed: Arc<F>, game_repository: Arc<G>, update_game_use_case: Arc<UG>) -> Self {
        Self {
            odds_feed,
            game_repository,
            update_game_use_case,
        }
    }
}

#[async_trait::async_trait]
impl<
    F: OddsFeed + Send + Sync + 'static,
    G: GameRepository + Send + Sync + 'static,
    UG: UpdateGameUseCase + Send + Sync + 'static,
> RefreshOddsUseCase for RefreshOddsUseCaseImpl<F, G, UG>
{
    async fn refresh_odds(&self) -> PoolResult<OddsRefreshReport> {
        let odds = match self.odds_feed.fetch_odds().await {
            Ok(odds) => odds,
            Err(e) => {
                log::warn!("Odds refresh aborted: {}", e);
                return PoolError::unavailable(e.to_string());
            }
        };

        let games = self
            .game_repository
            .list_games()
            .await
            .map_err(|e| storage_failure("Failed to list games for odds refresh", e))?;

        let mut updated = 0;
        for game in games {
            let Some(line) = odds.iter().find(|o| {
                o.home_team == game.details.home_team && o.away_team == game.details.away_team
            }) else {
                continue;
            };
            if line.spread.is_none() && line.over_under.is_none() {
                continue;
            }
            let update = GameUpdate {
                spread: line.spread.map(Some),
                over_under: line.over_under.map(Some),
                ..Default::default()
            };
            match self.update_game_use_case.update_game(game.id, update).await {
                Ok(_) => updated += 1,
                Err(PoolError::NotFound(_)) => continue,
                Err(PoolError::Validation(e)) => {
                    log::warn!("Ignoring odds for game {}: {}", game.id, e);
                }
                Err(e) => return Err(e),
            }
        }

        let requests_remaining = self.odds_feed.remaining_requests().await;
        log::info!(
            "Refreshed odds for {} games ({:?} requests remaining)",
            updated,
            requests_remaining
        );
        Ok(OddsRefreshReport {
            updated,
            requests_remaining,
        })
    }
}
