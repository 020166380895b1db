pub mod authentication;
pub mod clock;
pub mod feeds;
pub mod participants;
