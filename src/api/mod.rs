pub mod client;
pub mod endpoints;
pub mod models;
pub mod transport;

use crate::analysis::ranked::RankedStanding;
use crate::champions::ChampionCatalog;
use crate::error::AppError;
use crate::scout::{LiveGameSnapshot, PlayerIdentity};

use models::{ChampionMasteryDto, MatchDto};

/// Remote match data operations the scouting pipeline depends on.
///
/// Implementations must be shareable across worker threads; the rate limit
/// they enforce is one budget for every caller.
pub trait MatchDataSource: Sync {
    fn resolve_account(&self, game_name: &str, tag_line: &str) -> Result<PlayerIdentity, AppError>;

    fn get_ranked_standing(&self, puuid: &str) -> Result<RankedStanding, AppError>;

    /// Newest first, at most `count` ids.
    fn list_match_ids(&self, puuid: &str, count: usize, queue: Option<u32>) -> Result<Vec<String>, AppError>;

    fn get_match_detail(&self, match_id: &str) -> Result<MatchDto, AppError>;

    /// `AppError::NotInGame` when the player has no active game.
    fn get_live_game(&self, puuid: &str) -> Result<LiveGameSnapshot, AppError>;

    /// Highest mastery points first.
    fn get_champion_masteries(&self, puuid: &str, limit: usize) -> Result<Vec<ChampionMasteryDto>, AppError>;

    fn champion_catalog(&self) -> Result<ChampionCatalog, AppError>;
}
