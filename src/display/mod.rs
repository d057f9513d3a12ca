pub mod output;
pub mod report;

pub use report::{render, render_champion_stats, render_player_stats};
