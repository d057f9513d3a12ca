//! Fixed point rule turning ranked tier, winrate and KDA into a threat level.
//!
//! Tier: CHALLENGER/GRANDMASTER +5, MASTER +4, DIAMOND/EMERALD +3,
//! PLATINUM +2, GOLD +1, anything lower or unranked +0.
//! Winrate (season record, else recent matches): >=60% +2, >=55% +1, <45% -1.
//! KDA (recent matches): >=4 +2, >=3 +1.
//! Score >=7 VERY HIGH, >=5 HIGH, >=3 MEDIUM, otherwise LOW.

use std::fmt;

use super::match_history::PlayerStats;
use super::ranked::{RankedStanding, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    VeryHigh,
    /// Neither ranked standing nor match statistics were available.
    Unknown,
}

impl ThreatLevel {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 7 => ThreatLevel::VeryHigh,
            s if s >= 5 => ThreatLevel::High,
            s if s >= 3 => ThreatLevel::Medium,
            _ => ThreatLevel::Low,
        }
    }

    pub fn is_threat(&self) -> bool {
        matches!(self, ThreatLevel::High | ThreatLevel::VeryHigh)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "LOW",
            ThreatLevel::Medium => "MEDIUM",
            ThreatLevel::High => "HIGH",
            ThreatLevel::VeryHigh => "VERY HIGH",
            ThreatLevel::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreatAssessment {
    pub level: ThreatLevel,
    pub score: i32,
    pub tier_points: i32,
    pub winrate_points: i32,
    pub kda_points: i32,
}

impl ThreatAssessment {
    /// One-sentence breakdown of how the score was reached.
    pub fn explain(&self) -> String {
        if self.level == ThreatLevel::Unknown {
            return "no ranked or match data available".to_string();
        }
        format!(
            "tier {:+}, winrate {:+}, KDA {:+} = {} ({})",
            self.tier_points, self.winrate_points, self.kda_points, self.score, self.level
        )
    }
}

pub fn tier_points(tier: Option<Tier>) -> i32 {
    match tier {
        Some(Tier::Challenger | Tier::Grandmaster) => 5,
        Some(Tier::Master) => 4,
        Some(Tier::Diamond | Tier::Emerald) => 3,
        Some(Tier::Platinum) => 2,
        Some(Tier::Gold) => 1,
        _ => 0,
    }
}

pub fn winrate_points(winrate: Option<f64>) -> i32 {
    match winrate {
        Some(w) if w >= 60.0 => 2,
        Some(w) if w >= 55.0 => 1,
        Some(w) if w < 45.0 => -1,
        _ => 0,
    }
}

pub fn kda_points(kda: f64) -> i32 {
    if kda >= 4.0 {
        2
    } else if kda >= 3.0 {
        1
    } else {
        0
    }
}

/// Season winrate when the standing has games, else the recent-match winrate.
pub fn effective_winrate(standing: Option<&RankedStanding>, stats: Option<&PlayerStats>) -> Option<f64> {
    standing
        .and_then(RankedStanding::winrate)
        .or_else(|| stats.filter(|s| s.has_games()).map(|s| s.winrate))
}

pub fn assess(standing: Option<&RankedStanding>, stats: Option<&PlayerStats>) -> ThreatAssessment {
    let stats = stats.filter(|s| s.has_games());

    let tier_points = tier_points(standing.and_then(RankedStanding::tier));
    let winrate_points = winrate_points(effective_winrate(standing, stats));
    let kda_points = kda_points(stats.map_or(0.0, |s| s.kda_avg));
    let score = tier_points + winrate_points + kda_points;

    let level = if standing.is_none() && stats.is_none() {
        ThreatLevel::Unknown
    } else {
        ThreatLevel::from_score(score)
    };

    ThreatAssessment {
        level,
        score,
        tier_points,
        winrate_points,
        kda_points,
    }
}

pub fn classify(standing: Option<&RankedStanding>, stats: Option<&PlayerStats>) -> (ThreatLevel, i32) {
    let assessment = assess(standing, stats);
    (assessment.level, assessment.score)
}
