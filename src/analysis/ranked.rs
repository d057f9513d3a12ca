use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Iron => "IRON",
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
            Tier::Emerald => "EMERALD",
            Tier::Diamond => "DIAMOND",
            Tier::Master => "MASTER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Challenger => "CHALLENGER",
        }
    }

    /// Apex tiers have no divisions.
    pub fn is_apex(&self) -> bool {
        matches!(self, Tier::Master | Tier::Grandmaster | Tier::Challenger)
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IRON" => Ok(Tier::Iron),
            "BRONZE" => Ok(Tier::Bronze),
            "SILVER" => Ok(Tier::Silver),
            "GOLD" => Ok(Tier::Gold),
            "PLATINUM" => Ok(Tier::Platinum),
            "EMERALD" => Ok(Tier::Emerald),
            "DIAMOND" => Ok(Tier::Diamond),
            "MASTER" => Ok(Tier::Master),
            "GRANDMASTER" => Ok(Tier::Grandmaster),
            "CHALLENGER" => Ok(Tier::Challenger),
            other => Err(format!("unknown tier '{}'", other)),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranked-solo standing. `Unranked` is a real answer, distinct from "could not fetch".
#[derive(Debug, Clone, PartialEq)]
pub enum RankedStanding {
    Ranked {
        tier: Tier,
        division: String,
        league_points: i32,
        wins: u32,
        losses: u32,
    },
    Unranked,
}

impl RankedStanding {
    pub fn tier(&self) -> Option<Tier> {
        match self {
            RankedStanding::Ranked { tier, .. } => Some(*tier),
            RankedStanding::Unranked => None,
        }
    }

    pub fn games(&self) -> u32 {
        match self {
            RankedStanding::Ranked { wins, losses, .. } => wins + losses,
            RankedStanding::Unranked => 0,
        }
    }

    pub fn record(&self) -> Option<(u32, u32)> {
        match self {
            RankedStanding::Ranked { wins, losses, .. } if wins + losses > 0 => Some((*wins, *losses)),
            _ => None,
        }
    }

    /// Season winrate as a percentage; `None` without games.
    pub fn winrate(&self) -> Option<f64> {
        self.record()
            .map(|(wins, losses)| wins as f64 / (wins + losses) as f64 * 100.0)
    }
}

impl fmt::Display for RankedStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankedStanding::Ranked {
                tier,
                division,
                league_points,
                ..
            } => {
                if tier.is_apex() || division.is_empty() {
                    write!(f, "{} ({} LP)", tier, league_points)
                } else {
                    write!(f, "{} {} ({} LP)", tier, division, league_points)
                }
            }
            RankedStanding::Unranked => f.write_str("Unranked"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_parse_case_insensitively_and_order() {
        assert_eq!("emerald".parse::<Tier>().unwrap(), Tier::Emerald);
        assert!(Tier::Challenger > Tier::Master);
        assert!("WOOD".parse::<Tier>().is_err());
    }

    #[test]
    fn standing_labels() {
        let gold = RankedStanding::Ranked {
            tier: Tier::Gold,
            division: "II".to_string(),
            league_points: 40,
            wins: 13,
            losses: 7,
        };
        assert_eq!(gold.to_string(), "GOLD II (40 LP)");
        assert_eq!(gold.winrate(), Some(65.0));

        let chall = RankedStanding::Ranked {
            tier: Tier::Challenger,
            division: "I".to_string(),
            league_points: 1200,
            wins: 0,
            losses: 0,
        };
        assert_eq!(chall.to_string(), "CHALLENGER (1200 LP)");
        assert_eq!(chall.winrate(), None);
        assert_eq!(RankedStanding::Unranked.to_string(), "Unranked");
    }
}
