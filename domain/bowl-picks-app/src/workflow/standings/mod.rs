pub mod leaderboard;
pub mod summary;
