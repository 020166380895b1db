use std::{collections::HashSet, sync::Arc};

use crate::{
    PoolError, PoolResult,
    domain::game::{GameRepository, GameUpdate, NewGame},
    ports::feeds::{ScheduleFeed, ScheduledGame},
    storage_failure,
    workflow::games::{create::CreateGameUseCase, update::UpdateGameUseCase},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub fetched: usize,
    pub imported: usize,
    pub skipped: usize,
}

#[async_trait::async_trait]
pub trait ImportGamesUseCase {
    async fn import_games(&self) -> PoolResult<ImportReport>;
}

pub struct ImportGamesUseCaseImpl<
    F: ScheduleFeed,
    G: GameRepository,
    CG: CreateGameUseCase,
    UG: UpdateGameUseCase,
> {
    schedule_feed: Arc<F>,
    game_repository: Arc<G>,
    create_game_use_case: Arc<CG>,
    update_game_use_case: Arc<UG>,
}

impl<F: ScheduleFeed, G: GameRepository, CG: CreateGameUseCase, UG: UpdateGameUseCase>
    ImportGamesUseCaseImpl<F, G, CG, UG>
{
    pub fn new(
        schedule_feed: Arc<F>,
        game_repository: Arc<G>,
        create_game_use_case: Arc<CG>,
        update_game_use_case: Arc<UG>,
    ) -> Self {
        Self {
            schedule_feed,
            game_repository,
            create_game_use_case,
            update_game_use_case,
        }
    }

    async fn import_one(&self, entry: ScheduledGame) -> PoolResult<()> {
        let created = self
            .create_game_use_case
            .create_game(NewGame {
                bowl_name: entry.bowl_name,
                home_team: entry.home_team,
                away_team: entry.away_team,
                kickoff: entry.kickoff,
                spread: None,
                over_under: None,
                is_playoff: entry.is_playoff,
            })
            .await?;

        if entry.winner.is_some() || entry.score.is_some() {
            let result = GameUpdate {
                winner: entry.winner,
                home_score: entry.score.map(|s| s.home),
                away_score: entry.score.map(|s| s.away),
                ..Default::default()
            };
            self.update_game_use_case
                .update_game(created.game.id, result)
                .await?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<
    F: ScheduleFeed + Send + Sync + 'static,
    G: GameRepository + Send + Sync + 'static,
    CG: CreateGameUseCase + Send + Sync + 'static,
    UG: UpdateGameUseCase + Send + Sync + 'static,
> ImportGamesUseCase for ImportGamesUseCaseImpl<F, G, CG, UG>
{
    async fn import_games(&self) -> PoolResult<ImportReport> {
        let schedule = match self.schedule_feed.fetch_schedule().await {
            Ok(schedule) => schedule,
            Err(e) => {
                log::warn!("Schedule import aborted: {}", e);
                return PoolError::unavailable(e.to_string());
            }
        };

        let mut known: HashSet<(String, String)> = self
            .game_repository
            .list_games()
            .await
            .map_err(|e| storage_failure("Failed to list games for import", e))?
            .into_iter()
            .map(|g| (g.details.home_team, g.details.away_team))
            .collect();

        let mut report = ImportReport {
            fetched: schedule.len(),
            ..Default::default()
        };
        for entry in schedule {
            let key = (entry.home_team.trim().to_string(), entry.away_team.trim().to_string());
            if known.contains(&key) {
                report.skipped += 1;
                continue;
            }
            let bowl_name = entry.bowl_name.clone();
            match self.import_one(entry).await {
                Ok(()) => {
                    known.insert(key);
                    report.imported += 1;
                }
                Err(PoolError::Validation(e)) => {
                    log::warn!("Skipping scheduled game {}: {}", bowl_name, e);
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "Imported {} of {} scheduled games ({} skipped)",
            report.imported,
            report.fetched,
            report.skipped
        );
        Ok(report)
    }
}
