use std::fmt;

use super::threat::ThreatLevel;
use crate::scout::OpponentProfile;

/// Threat count at which the team is advised to play for the enemy's mistakes.
pub const CAUTION_THRESHOLD: usize = 2;

const GENERAL_ADVICE: &[&str] = &[
    "Communicate with your team from champion select onwards",
    "Place defensive wards when facing experienced players",
    "Adapt your playstyle to the level of each opponent",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    Threat {
        name: String,
        champion: String,
        rank: String,
        level: ThreatLevel,
        winrate: Option<f64>,
    },
    Advice(String),
    PlayCautiously { threats: usize },
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Threat {
                name,
                champion,
                rank,
                level,
                winrate,
            } => {
                write!(f, "{} on {} ({}) - {} threat", name, champion, rank, level)?;
                match winrate {
                    Some(w) => write!(f, " - WR: {:.1}%", w),
                    None => write!(f, " - WR: Unknown"),
                }
            }
            Recommendation::Advice(text) => f.write_str(text),
            Recommendation::PlayCautiously { threats } => write!(
                f,
                "{} threats detected: play cautiously and wait for their mistakes",
                threats
            ),
        }
    }
}

pub struct ThreatRecommender;

impl ThreatRecommender {
    /// Opponents classified HIGH or VERY HIGH, in report order.
    pub fn threats(enemies: &[OpponentProfile]) -> Vec<&OpponentProfile> {
        enemies.iter().filter(|e| e.threat().is_threat()).collect()
    }

    /// Pure function of the already classified profiles: one line per threat,
    /// the general advice, then a caution advisory when threats pile up.
    pub fn recommendations(enemies: &[OpponentProfile]) -> Vec<Recommendation> {
        let threats = Self::threats(enemies);

        let mut recommendations: Vec<Recommendation> = threats
            .iter()
            .map(|e| Recommendation::Threat {
                name: e.identity.riot_id(),
                champion: e.champion.clone(),
                rank: e.rank_label(),
                level: e.threat(),
                winrate: e.winrate(),
            })
            .collect();

        recommendations.extend(GENERAL_ADVICE.iter().map(|a| Recommendation::Advice(a.to_string())));

        if threats.len() >= CAUTION_THRESHOLD {
            recommendations.push(Recommendation::PlayCautiously {
                threats: threats.len(),
            });
        }

        recommendations
    }
}
