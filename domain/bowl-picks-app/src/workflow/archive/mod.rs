use bowl_picks_core::{ArchivedPick, SeasonArchive};

pub mod create;
pub mod get;
pub mod list;
pub mod seasons;

/// A stored archive with per-pick outcomes recomputed from its frozen games.
#[derive(Clone, Debug, PartialEq)]
pub struct ArchiveView {
    pub archive: SeasonArchive,
    pub picks: Vec<ArchivedPick>,
}
