use serde::Deserialize;
use std::collections::HashMap;

use crate::analysis::match_history::MatchRecord;
use crate::analysis::ranked::{RankedStanding, Tier};
use crate::scout::{LiveGameParticipant, LiveGameSnapshot, PlayerIdentity};

use super::endpoints::RANKED_SOLO_QUEUE_TYPE;

// Account V1 response
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub tag_line: Option<String>,
}

impl AccountDto {
    /// Falls back to the requested name when the account hides its Riot id.
    pub fn into_identity(self, game_name: &str, tag_line: &str) -> PlayerIdentity {
        PlayerIdentity {
            puuid: self.puuid,
            game_name: self.game_name.unwrap_or_else(|| game_name.to_string()),
            tag_line: self.tag_line.unwrap_or_else(|| tag_line.to_string()),
        }
    }
}

// League V4 response (one entry per queue)
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub league_points: i32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

/// Picks the ranked-solo entry; no entry (or an unrecognised tier) is `Unranked`.
pub fn ranked_solo_standing(entries: &[LeagueEntryDto]) -> RankedStanding {
    entries
        .iter()
        .find(|e| e.queue_type == RANKED_SOLO_QUEUE_TYPE)
        .and_then(|e| {
            let tier = e.tier.parse::<Tier>().ok()?;
            Some(RankedStanding::Ranked {
                tier,
                division: e.rank.clone(),
                league_points: e.league_points,
                wins: e.wins,
                losses: e.losses,
            })
        })
        .unwrap_or(RankedStanding::Unranked)
}

// Match V5 response
#[derive(Debug, Deserialize, Clone)]
pub struct MatchDto {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    /// Seconds.
    pub game_duration: i64,
    pub participants: Vec<ParticipantDto>,
    #[serde(default)]
    pub queue_id: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    #[serde(default)]
    pub champion_id: i64,
    pub champion_name: String,
    pub team_id: i64,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    #[serde(default)]
    pub total_minions_killed: u32,
    #[serde(default)]
    pub neutral_minions_killed: u32,
    #[serde(default)]
    pub vision_score: u32,
    #[serde(default)]
    pub total_damage_dealt_to_champions: u64,
    #[serde(default)]
    pub gold_earned: u64,
    #[serde(default)]
    pub team_position: String, // TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY
}

impl MatchDto {
    /// Extracts the subject's participant row, if the subject played this match.
    pub fn record_for(&self, puuid: &str) -> Option<MatchRecord> {
        let p = self.info.participants.iter().find(|p| p.puuid == puuid)?;
        Some(MatchRecord {
            match_id: self.metadata.match_id.clone(),
            win: p.win,
            kills: p.kills,
            deaths: p.deaths,
            assists: p.assists,
            champion: p.champion_name.clone(),
            role: if p.team_position.is_empty() {
                "UNKNOWN".to_string()
            } else {
                p.team_position.clone()
            },
            minions_killed: p.total_minions_killed,
            neutral_minions_killed: p.neutral_minions_killed,
            vision_score: p.vision_score,
            damage_to_champions: p.total_damage_dealt_to_champions,
            gold_earned: p.gold_earned,
            duration_seconds: self.info.game_duration.max(0) as u64,
        })
    }
}

// Spectator V5 response
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CurrentGameInfo {
    pub game_id: i64,
    #[serde(default)]
    pub game_mode: String,
    #[serde(default)]
    pub game_queue_config_id: Option<u32>,
    /// Epoch milliseconds; 0 while still loading.
    #[serde(default)]
    pub game_start_time: i64,
    pub participants: Vec<CurrentGameParticipant>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CurrentGameParticipant {
    #[serde(default)]
    pub puuid: Option<String>,
    pub team_id: i64,
    pub champion_id: i64,
    #[serde(default)]
    pub riot_id: Option<String>,
    #[serde(default)]
    pub summoner_name: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

impl From<CurrentGameInfo> for LiveGameSnapshot {
    fn from(game: CurrentGameInfo) -> Self {
        let participants = game
            .participants
            .into_iter()
            .map(|p| {
                let display = p
                    .riot_id
                    .or(p.summoner_name)
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| "Unknown".to_string());
                let (game_name, tag_line) = match display.split_once('#') {
                    Some((name, tag)) => (name.to_string(), tag.to_string()),
                    None => (display, String::new()),
                };
                LiveGameParticipant {
                    identity: PlayerIdentity {
                        puuid: p.puuid.filter(|id| !p.bot && !id.is_empty()).unwrap_or_default(),
                        game_name,
                        tag_line,
                    },
                    team_id: p.team_id,
                    champion_id: p.champion_id,
                }
            })
            .collect();

        LiveGameSnapshot {
            game_id: game.game_id,
            game_mode: game.game_mode,
            queue_id: game.game_queue_config_id,
            game_start_time: game.game_start_time,
            participants,
        }
    }
}

// Champion Mastery V4 response
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChampionMasteryDto {
    pub champion_id: i64,
    pub champion_level: u32,
    pub champion_points: u64,
}

// Data Dragon Champion response
#[derive(Debug, Deserialize)]
pub struct DataDragonChampions {
    pub data: HashMap<String, ChampionInfo>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChampionInfo {
    pub id: String,
    pub name: String,
    /// Numeric champion id as a string.
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(queue: &str, tier: &str) -> LeagueEntryDto {
        LeagueEntryDto {
            queue_type: queue.to_string(),
            tier: tier.to_string(),
            rank: "II".to_string(),
            league_points: 40,
            wins: 30,
            losses: 20,
        }
    }

    #[test]
    fn ranked_solo_entry_is_selected_over_flex() {
        let standing = ranked_solo_standing(&[
            entry("RANKED_FLEX_SR", "CHALLENGER"),
            entry(RANKED_SOLO_QUEUE_TYPE, "GOLD"),
        ]);
        assert_eq!(standing.tier(), Some(Tier::Gold));
    }

    #[test]
    fn no_solo_entry_is_unranked() {
        assert_eq!(ranked_solo_standing(&[entry("RANKED_FLEX_SR", "GOLD")]), RankedStanding::Unranked);
        assert_eq!(ranked_solo_standing(&[]), RankedStanding::Unranked);
    }

    #[test]
    fn spectator_payload_converts_to_snapshot() {
        let raw = r#"{
            "gameId": 7, "gameMode": "CLASSIC", "gameQueueConfigId": 420, "gameStartTime": 0,
            "participants": [
                {"puuid": "a", "teamId": 100, "championId": 157, "riotId": "Blue#EUW"},
                {"puuid": null, "teamId": 200, "championId": 1, "riotId": "Bot Annie", "bot": true}
            ]
        }"#;
        let game: CurrentGameInfo = serde_json::from_str(raw).unwrap();
        let snapshot = LiveGameSnapshot::from(game);
        assert_eq!(snapshot.participants.len(), 2);
        assert_eq!(snapshot.participants[0].identity.riot_id(), "Blue#EUW");
        assert_eq!(snapshot.participants[1].identity.puuid, "");
        assert_eq!(snapshot.participants[1].identity.riot_id(), "Bot Annie");
    }
}
