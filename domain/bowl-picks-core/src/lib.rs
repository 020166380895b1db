mod archive;
mod game;
mod pick;
mod scoring;
mod spread;

pub use archive::{ArchiveSummary, ArchivedPick, SeasonArchive, SeasonYear};
pub use game::{FinalScore, Game, GameDetails, GameId, GameSide};
pub use pick::{Pick, PickOutcome};
pub use scoring::{PoolLeader, PoolSummary, StandingsEntry, pool_summary, standings};
pub use spread::{SpreadLine, spread_display, spread_for};

pub type ParticipantName = String;
