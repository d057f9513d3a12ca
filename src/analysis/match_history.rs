use std::collections::HashMap;

use tracing::debug;

use super::champion_stats::{top_champions, ChampionStats, ChampionStatsTracker};
use crate::api::models::MatchDto;

/// One finished match seen from one player's seat.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub match_id: String,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub champion: String,
    pub role: String,
    pub minions_killed: u32,
    pub neutral_minions_killed: u32,
    pub vision_score: u32,
    pub damage_to_champions: u64,
    pub gold_earned: u64,
    pub duration_seconds: u64,
}

impl MatchRecord {
    pub fn creep_score(&self) -> u32 {
        self.minions_killed + self.neutral_minions_killed
    }

    /// CS per whole minute; matches shorter than a minute count as 0.
    pub fn cs_per_min(&self) -> f64 {
        let minutes = self.duration_seconds / 60;
        if minutes == 0 {
            0.0
        } else {
            self.creep_score() as f64 / minutes as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentGame {
    pub champion: String,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub creep_score: u32,
    pub cs_per_min: f64,
    pub vision_score: u32,
    pub damage: u64,
    pub gold: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleCount {
    pub role: String,
    pub games: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerStats {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    /// Percentage in `[0, 100]`.
    pub winrate: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub kda_avg: f64,
    pub cs_per_min_avg: f64,
    pub vision_score_avg: f64,
    pub champions: HashMap<String, ChampionStats>,
    /// In order of first appearance.
    pub roles: Vec<RoleCount>,
    /// In input order (newest first when fed from a match-id listing).
    pub recent: Vec<RecentGame>,
}

impl PlayerStats {
    pub fn has_games(&self) -> bool {
        self.total_games > 0
    }

    pub fn top_champions(&self, n: usize) -> Vec<&ChampionStats> {
        top_champions(&self.champions, n)
    }

    /// Most played role; ties go to the role seen first.
    pub fn main_role(&self) -> Option<&str> {
        let mut best: Option<&RoleCount> = None;
        for role in &self.roles {
            if best.map_or(true, |b| role.games > b.games) {
                best = Some(role);
            }
        }
        best.map(|r| r.role.as_str())
    }
}

/// Folds full match payloads for `puuid`. Matches the player does not appear
/// in are skipped.
pub fn aggregate(matches: &[MatchDto], puuid: &str) -> PlayerStats {
    let records = matches.iter().filter_map(|m| {
        let record = m.record_for(puuid);
        if record.is_none() {
            debug!(match_id = %m.metadata.match_id, "subject not in match, skipping");
        }
        record
    });
    aggregate_records(records)
}

/// An empty sequence yields a zero-valued `PlayerStats` ("no data").
pub fn aggregate_records<I>(records: I) -> PlayerStats
where
    I: IntoIterator<Item = MatchRecord>,
{
    let mut stats = PlayerStats::default();
    let mut tracker = ChampionStatsTracker::new();
    let (mut kills, mut deaths, mut assists) = (0u64, 0u64, 0u64);
    let (mut cs_per_min_sum, mut vision_sum) = (0.0f64, 0u64);

    for record in records {
        stats.total_games += 1;
        if record.win {
            stats.wins += 1;
        } else {
            stats.losses += 1;
        }
        kills += u64::from(record.kills);
        deaths += u64::from(record.deaths);
        assists += u64::from(record.assists);

        let cs_per_min = record.cs_per_min();
        cs_per_min_sum += cs_per_min;
        vision_sum += u64::from(record.vision_score);

        tracker.add_game(&record.champion, record.win, record.kills, record.deaths, record.assists);
        match stats.roles.iter_mut().find(|r| r.role == record.role) {
            Some(role) => role.games += 1,
            None => stats.roles.push(RoleCount {
                role: record.role.clone(),
                games: 1,
            }),
        }

        stats.recent.push(RecentGame {
            champion: record.champion.clone(),
            win: record.win,
            kills: record.kills,
            deaths: record.deaths,
            assists: record.assists,
            creep_score: record.creep_score(),
            cs_per_min,
            vision_score: record.vision_score,
            damage: record.damage_to_champions,
            gold: record.gold_earned,
        });
    }

    stats.champions = tracker.into_stats();
    if stats.total_games == 0 {
        return stats;
    }

    let games = stats.total_games as f64;
    stats.winrate = stats.wins as f64 / games * 100.0;
    stats.avg_kills = kills as f64 / games;
    stats.avg_deaths = deaths as f64 / games;
    stats.avg_assists = assists as f64 / games;
    stats.kda_avg = (stats.avg_kills + stats.avg_assists) / stats.avg_deaths.max(1.0);
    stats.cs_per_min_avg = cs_per_min_sum / games;
    stats.vision_score_avg = vision_sum as f64 / games;
    stats
}

/// Head-to-head record on one champion against one enemy champion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchupRecord {
    pub games: u32,
    pub wins: u32,
}

impl MatchupRecord {
    pub fn winrate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64 * 100.0
        }
    }
}

/// Games in which `puuid` played `champion` while the enemy team fielded
/// `enemy_champion`.
pub fn matchup_record(matches: &[MatchDto], puuid: &str, champion: &str, enemy_champion: &str) -> MatchupRecord {
    let mut record = MatchupRecord::default();
    for m in matches {
        let Some(me) = m.info.participants.iter().find(|p| p.puuid == puuid) else {
            continue;
        };
        if !same_champion(&me.champion_name, champion) {
            continue;
        }
        let faced = m
            .info
            .participants
            .iter()
            .any(|p| p.team_id != me.team_id && same_champion(&p.champion_name, enemy_champion));
        if faced {
            record.games += 1;
            if me.win {
                record.wins += 1;
            }
        }
    }
    record
}

// Match payloads use the internal key ("LeeSin"), users type the display name.
fn same_champion(a: &str, b: &str) -> bool {
    let key = |s: &str| -> String {
        s.chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect()
    };
    key(a) == key(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{MatchInfo, MatchMetadata, ParticipantDto};
    use proptest::prelude::*;

    fn record(champion: &str, win: bool, k: u32, d: u32, a: u32) -> MatchRecord {
        MatchRecord {
            match_id: "EUW1_1".to_string(),
            win,
            kills: k,
            deaths: d,
            assists: a,
            champion: champion.to_string(),
            role: "MIDDLE".to_string(),
            minions_killed: 180,
            neutral_minions_killed: 20,
            vision_score: 20,
            damage_to_champions: 15_000,
            gold_earned: 11_000,
            duration_seconds: 1_800,
        }
    }

    fn participant(puuid: &str) -> ParticipantDto {
        ParticipantDto {
            puuid: puuid.to_string(),
            champion_id: 103,
            champion_name: "Ahri".to_string(),
            team_id: 100,
            win: true,
            kills: 4,
            deaths: 1,
            assists: 6,
            total_minions_killed: 200,
            neutral_minions_killed: 0,
            vision_score: 30,
            total_damage_dealt_to_champions: 20_000,
            gold_earned: 12_000,
            team_position: "MIDDLE".to_string(),
        }
    }

    fn match_with(id: &str, puuids: &[&str], duration: i64) -> MatchDto {
        MatchDto {
            metadata: MatchMetadata {
                match_id: id.to_string(),
                participants: puuids.iter().map(|p| p.to_string()).collect(),
            },
            info: MatchInfo {
                game_duration: duration,
                participants: puuids.iter().map(|p| participant(p)).collect(),
                queue_id: 420,
            },
        }
    }

    #[test]
    fn kda_uses_averages_with_deaths_floored() {
        let stats = aggregate_records(vec![
            record("Ahri", true, 3, 2, 5),
            record("Ahri", false, 1, 4, 2),
            record("Lux", true, 6, 1, 3),
        ]);

        assert_eq!(stats.total_games, 3);
        assert_eq!((stats.wins, stats.losses), (2, 1));
        assert!((stats.avg_kills - 10.0 / 3.0).abs() < 1e-9);
        assert!((stats.avg_deaths - 7.0 / 3.0).abs() < 1e-9);
        assert!((stats.avg_assists - 10.0 / 3.0).abs() < 1e-9);
        assert!((stats.kda_avg - 20.0 / 7.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", stats.kda_avg), "2.86");
    }

    #[test]
    fn empty_input_is_zero_valued_not_an_error() {
        let stats = aggregate_records(Vec::new());
        assert_eq!(stats, PlayerStats::default());
        assert!(!stats.has_games());
        assert_eq!(stats.kda_avg, 0.0);
        assert_eq!(stats.winrate, 0.0);
    }

    #[test]
    fn matches_without_the_subject_are_skipped() {
        let matches = vec![
            match_with("EUW1_1", &["me", "x"], 1_800),
            match_with("EUW1_2", &["x", "y"], 1_800),
        ];
        let stats = aggregate(&matches, "me");
        assert_eq!(stats.total_games, 1);
    }

    #[test]
    fn sub_minute_match_counts_zero_cs_per_min() {
        let stats = aggregate(&[match_with("EUW1_1", &["me"], 45)], "me");
        assert_eq!(stats.cs_per_min_avg, 0.0);
        assert_eq!(stats.total_games, 1);
    }

    #[test]
    fn cs_per_min_uses_whole_minutes() {
        // 200 cs over 30m59s counts as 30 minutes.
        let stats = aggregate(&[match_with("EUW1_1", &["me"], 30 * 60 + 59)], "me");
        assert!((stats.cs_per_min_avg - 200.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn deathless_history_divides_by_one() {
        let stats = aggregate_records(vec![record("Janna", true, 0, 0, 12)]);
        assert_eq!(stats.kda_avg, 12.0);
    }

    #[test]
    fn roles_and_main_role_follow_encounter_order() {
        let mut jungle = record("Vi", true, 1, 1, 1);
        jungle.role = "JUNGLE".to_string();
        let stats = aggregate_records(vec![
            jungle.clone(),
            record("Ahri", true, 1, 1, 1),
            record("Ahri", true, 1, 1, 1),
            jungle,
        ]);
        assert_eq!(stats.roles[0].role, "JUNGLE");
        assert_eq!(stats.main_role(), Some("JUNGLE"));
    }

    #[test]
    fn matchup_counts_only_games_against_the_enemy_champion() {
        let versus = |id: &str, enemy: &str, enemy_team: i64, win: bool| {
            let mut m = match_with(id, &["me", "foe"], 1_800);
            m.info.participants[0].win = win;
            m.info.participants[1].champion_name = enemy.to_string();
            m.info.participants[1].team_id = enemy_team;
            m
        };
        let matches = vec![
            versus("EUW1_1", "LeeSin", 200, true),
            versus("EUW1_2", "LeeSin", 200, false),
            versus("EUW1_3", "LeeSin", 100, true),
            versus("EUW1_4", "Zed", 200, true),
            versus("EUW1_5", "LeeSin", 200, true),
        ];

        let record = matchup_record(&matches, "me", "ahri", "Lee Sin");

        assert_eq!(record, MatchupRecord { games: 3, wins: 2 });
        assert!((record.winrate() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(matchup_record(&matches, "me", "Lux", "Lee Sin").games, 0);
    }

    fn arb_record() -> impl Strategy<Value = MatchRecord> {
        (
            any::<bool>(),
            0u32..30,
            0u32..30,
            0u32..40,
            prop::sample::select(vec!["Ahri", "Zed", "Lee Sin", "Thresh"]),
            0u64..4_000,
        )
            .prop_map(|(win, k, d, a, champ, duration)| {
                let mut r = record(champ, win, k, d, a);
                r.duration_seconds = duration;
                r
            })
    }

    proptest! {
        #[test]
        fn aggregate_invariants_hold(records in prop::collection::vec(arb_record(), 1..25)) {
            let n = records.len() as u32;
            let stats = aggregate_records(records);

            prop_assert_eq!(stats.total_games, n);
            prop_assert_eq!(stats.wins + stats.losses, stats.total_games);
            prop_assert!((0.0..=100.0).contains(&stats.winrate));
            prop_assert!(stats.kda_avg >= 0.0 && stats.kda_avg.is_finite());
            prop_assert!(stats.cs_per_min_avg >= 0.0 && stats.cs_per_min_avg.is_finite());
            prop_assert!(stats.vision_score_avg >= 0.0);
            let champion_games: u32 = stats.champions.values().map(|c| c.games).sum();
            prop_assert_eq!(champion_games, n);
        }
    }
}
