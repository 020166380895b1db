pub mod archive;
pub mod games;
pub mod picks;
pub mod standings;
pub mod status;
