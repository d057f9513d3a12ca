//! Live-game opponent scouting for League of Legends ranked play.
//!
//! The binary resolves a Riot ID and fetches the live game snapshot through a
//! rate-limited [`api::client::RiotApiClient`]. [`scout::Scouter`] takes that
//! snapshot, collects ranked standing and recent ranked-solo history for every
//! enemy, and classifies each one with the fixed threat rule in
//! [`analysis::threat`]. [`display::render`] turns the report into text.

pub mod analysis;
pub mod api;
pub mod champions;
pub mod coach;
pub mod config;
pub mod display;
pub mod error;
pub mod scout;
