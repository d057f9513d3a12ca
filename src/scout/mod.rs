mod scouter;

pub use scouter::{Scouter, MATCH_DETAILS_TO_FETCH, MATCH_IDS_TO_LIST};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::analysis::match_history::PlayerStats;
use crate::analysis::ranked::RankedStanding;
use crate::analysis::recommender::Recommendation;
use crate::analysis::threat::{effective_winrate, ThreatAssessment, ThreatLevel};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
}

impl PlayerIdentity {
    /// `gameName#tagLine`, or just the name when no tag is known.
    pub fn riot_id(&self) -> String {
        if self.tag_line.is_empty() {
            self.game_name.clone()
        } else {
            format!("{}#{}", self.game_name, self.tag_line)
        }
    }

    pub fn has_puuid(&self) -> bool {
        !self.puuid.is_empty()
    }
}

/// Splits `Name#TAG` into its two halves. Both must be non-empty.
pub fn split_riot_id(riot_id: &str) -> Result<(String, String), AppError> {
    match riot_id.rsplit_once('#') {
        Some((name, tag)) if !name.trim().is_empty() && !tag.trim().is_empty() => {
            Ok((name.trim().to_string(), tag.trim().to_string()))
        }
        _ => Err(AppError::InvalidRiotId),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveGameParticipant {
    /// Bots and hidden players carry an empty puuid.
    pub identity: PlayerIdentity,
    pub team_id: i64,
    pub champion_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveGameSnapshot {
    pub game_id: i64,
    pub game_mode: String,
    pub queue_id: Option<u32>,
    /// Epoch milliseconds, 0 if the game has not started yet.
    pub game_start_time: i64,
    pub participants: Vec<LiveGameParticipant>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMember {
    pub name: String,
    pub champion: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpponentProfile {
    pub identity: PlayerIdentity,
    /// Champion picked in the live game.
    pub champion: String,
    /// `None` when the standing could not be fetched.
    pub standing: Option<RankedStanding>,
    /// `None` on fetch failure or when no recent ranked match could be read.
    pub stats: Option<PlayerStats>,
    pub assessment: ThreatAssessment,
    /// Up to three champion names, most played first.
    pub main_champions: Vec<String>,
}

impl OpponentProfile {
    pub fn threat(&self) -> ThreatLevel {
        self.assessment.level
    }

    pub fn score(&self) -> i32 {
        self.assessment.score
    }

    pub fn winrate(&self) -> Option<f64> {
        effective_winrate(self.standing.as_ref(), self.stats.as_ref())
    }

    pub fn rank_label(&self) -> String {
        self.standing
            .as_ref()
            .map_or_else(|| "Unknown".to_string(), |s| s.to_string())
    }

    pub fn has_partial_data(&self) -> bool {
        self.stats.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoutingReport {
    pub game_id: i64,
    pub game_mode: String,
    pub queue_id: Option<u32>,
    pub game_start_time: i64,
    pub player_name: String,
    pub player_champion: String,
    /// Teammates other than the player, in snapshot order.
    pub allies: Vec<TeamMember>,
    /// Enemies in snapshot order; never re-sorted.
    pub enemies: Vec<OpponentProfile>,
    pub recommendations: Vec<Recommendation>,
}

impl ScoutingReport {
    pub fn threats(&self) -> impl Iterator<Item = &OpponentProfile> {
        self.enemies.iter().filter(|e| e.threat().is_threat())
    }

    pub fn partial_data_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.has_partial_data()).count()
    }
}

/// Shared cancellation flag. Cloning shares the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn check(&self) -> Result<(), AppError> {
        if self.is_cancelled() {
            Err(AppError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn riot_id_splits_on_last_hash() {
        assert_eq!(
            split_riot_id("Faker#KR1").unwrap(),
            ("Faker".to_string(), "KR1".to_string())
        );
        assert_eq!(
            split_riot_id("We#Are#EUW").unwrap(),
            ("We#Are".to_string(), "EUW".to_string())
        );
    }

    #[test]
    fn riot_id_without_both_halves_is_rejected() {
        assert_eq!(split_riot_id("Faker"), Err(AppError::InvalidRiotId));
        assert_eq!(split_riot_id("#KR1"), Err(AppError::InvalidRiotId));
        assert_eq!(split_riot_id("Faker#"), Err(AppError::InvalidRiotId));
    }

    #[test]
    fn cancel_token_clones_share_the_flag() {
        let token = CancelToken::new();
        let worker = token.clone();
        assert!(worker.check().is_ok());
        token.cancel();
        assert_eq!(worker.check(), Err(AppError::Cancelled));
    }
}
