use crate::analysis::match_history::{MatchupRecord, PlayerStats};
use crate::scout::ScoutingReport;

const PROMPT_MAINS: usize = 2;
const PROMPT_TOP_CHAMPIONS: usize = 3;

fn role_name(role: &str) -> &str {
    match role {
        "TOP" => "Top",
        "JUNGLE" => "Jungle",
        "MIDDLE" => "Mid",
        "BOTTOM" => "ADC",
        "UTILITY" => "Support",
        "UNKNOWN" | "" => "Flex",
        other => other,
    }
}

/// Compact enemy briefing, one line per opponent in report order.
pub fn pregame_prompt(report: &ScoutingReport) -> String {
    let mut prompt = format!(
        "Pre-game briefing for {} playing {}\n\nEnemies:\n",
        report.player_name, report.player_champion
    );

    for (idx, enemy) in report.enemies.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. {} [{}] ({})",
            idx + 1,
            enemy.identity.riot_id(),
            enemy.champion,
            enemy.rank_label()
        ));
        if let Some((wins, losses)) = enemy.standing.as_ref().and_then(|s| s.record()) {
            let winrate = enemy.winrate().unwrap_or_default();
            prompt.push_str(&format!(" - {}W-{}L ({:.0}%)", wins, losses, winrate));
        }
        if let Some(stats) = &enemy.stats {
            prompt.push_str(&format!(" - {:.1} KDA", stats.kda_avg));
        }
        prompt.push_str(&format!(" - Threat: {}", enemy.threat()));
        if !enemy.main_champions.is_empty() {
            let mains: Vec<&str> = enemy
                .main_champions
                .iter()
                .take(PROMPT_MAINS)
                .map(String::as_str)
                .collect();
            prompt.push_str(&format!(" - Usual mains: {}", mains.join(", ")));
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!(
        "\nProfessional analysis in 5 sections for {}:\n\
         1. Threat level (each enemy 1-5, why, how to counter)\n\
         2. Win conditions (2-3 priorities)\n\
         3. Lose conditions (2-3 traps to avoid)\n\
         4. Gameplan (early / mid / late)\n\
         5. Priority calls (3-5 tactics)\n\n\
         Direct, technical, specific to {}.",
        report.player_champion, report.player_champion
    ));
    prompt
}

/// Performance review prompt for a player's recent ranked games.
pub fn performance_prompt(stats: &PlayerStats, player_name: &str) -> String {
    let main_role = role_name(stats.main_role().unwrap_or("UNKNOWN"));

    let mut prompt = format!(
        "LoL coach - review of {} ({} games)\n\n\
         Main role: {}\n\n\
         Overall stats:\n\
         - {}W-{}L ({:.1}% WR)\n\
         - {:.2} KDA ({:.1}/{:.1}/{:.1})\n\
         - {:.1} CS/min\n\
         - {:.1} vision score\n\n\
         Top champions:",
        player_name,
        stats.total_games,
        main_role,
        stats.wins,
        stats.losses,
        stats.winrate,
        stats.kda_avg,
        stats.avg_kills,
        stats.avg_deaths,
        stats.avg_assists,
        stats.cs_per_min_avg,
        stats.vision_score_avg
    );

    for champ in stats.top_champions(PROMPT_TOP_CHAMPIONS) {
        prompt.push_str(&format!(
            "\n{}: {}g, {:.0}% WR, {:.1} KDA",
            champ.name,
            champ.games,
            champ.win_rate(),
            champ.kda()
        ));
    }

    prompt.push_str(&format!(
        "\n\nReview this {role} player in 5 sections:\n\
         1. Diagnosis (1 paragraph)\n\
         2. Strengths (2-3)\n\
         3. Critical weaknesses (3-4)\n\
         4. Action plan (3-5 precise tips for {role})\n\
         5. Champion pool (which to keep or drop for {role})\n\n\
         Be direct and technical, use numbers.",
        role = main_role
    ));
    prompt
}

/// Lane matchup briefing. `history` is the player's own record in this
/// matchup, when any recent game had it.
pub fn matchup_prompt(champion: &str, enemy_champion: &str, rank: &str, history: Option<MatchupRecord>) -> String {
    let mut prompt = format!(
        "Matchup coaching\n\n\
         Your champion: {}\n\
         Enemy champion: {}\n\
         Your rank: {}\n",
        champion, enemy_champion, rank
    );

    if let Some(record) = history.filter(|r| r.games > 0) {
        prompt.push_str(&format!(
            "\nHistory in this matchup: {} games, {:.1}% WR\n",
            record.games,
            record.winrate()
        ));
    }

    prompt.push_str(&format!(
        "\nMatchup analysis in 5 sections:\n\
         1. Overview (who is favoured and why)\n\
         2. Laning phase (first 15 minutes)\n\
         3. Power spikes (when {} is strong, when {} is strong)\n\
         4. Combos and traps (what to avoid, how to punish)\n\
         5. Build and runes (adaptations)\n\n\
         Be specific and actionable.",
        champion, enemy_champion
    ));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::match_history::{aggregate_records, MatchRecord};
    use crate::analysis::ranked::{RankedStanding, Tier};
    use crate::analysis::threat::assess;
    use crate::scout::{OpponentProfile, PlayerIdentity};

    fn record(champion: &str, role: &str) -> MatchRecord {
        MatchRecord {
            match_id: "m".to_string(),
            win: true,
            kills: 4,
            deaths: 2,
            assists: 8,
            champion: champion.to_string(),
            role: role.to_string(),
            minions_killed: 20,
            neutral_minions_killed: 0,
            vision_score: 60,
            damage_to_champions: 8_000,
            gold_earned: 8_000,
            duration_seconds: 1_500,
        }
    }

    #[test]
    fn performance_prompt_uses_main_role_and_shared_champion_order() {
        let stats = aggregate_records(vec![
            record("Thresh", "UTILITY"),
            record("Nautilus", "UTILITY"),
            record("Nautilus", "UTILITY"),
            record("Thresh", "UTILITY"),
            record("Lulu", "UTILITY"),
        ]);

        let prompt = performance_prompt(&stats, "Keria#T1");

        assert!(prompt.contains("Main role: Support"));
        let thresh = prompt.find("Thresh: 2g").unwrap();
        let naut = prompt.find("Nautilus: 2g").unwrap();
        let lulu = prompt.find("Lulu: 1g").unwrap();
        assert!(thresh < naut && naut < lulu);
    }

    #[test]
    fn matchup_prompt_includes_history_only_when_played() {
        let with_history = matchup_prompt(
            "Ahri",
            "Zed",
            "GOLD II (40 LP)",
            Some(MatchupRecord { games: 4, wins: 3 }),
        );
        assert!(with_history.contains("Your champion: Ahri\nEnemy champion: Zed\nYour rank: GOLD II (40 LP)\n"));
        assert!(with_history.contains("History in this matchup: 4 games, 75.0% WR"));
        assert!(with_history.contains("when Ahri is strong, when Zed is strong"));

        let fresh = matchup_prompt("Ahri", "Zed", "Unranked", Some(MatchupRecord::default()));
        assert!(!fresh.contains("History in this matchup"));
        assert_eq!(fresh, matchup_prompt("Ahri", "Zed", "Unranked", None));
    }

    #[test]
    fn pregame_prompt_lists_enemies_in_report_order() {
        let standing = RankedStanding::Ranked {
            tier: Tier::Diamond,
            division: "IV".to_string(),
            league_points: 12,
            wins: 60,
            losses: 40,
        };
        let enemy = |name: &str, standing: Option<RankedStanding>, mains: Vec<String>| OpponentProfile {
            identity: PlayerIdentity {
                puuid: name.to_string(),
                game_name: name.to_string(),
                tag_line: "NA1".to_string(),
            },
            champion: "Zed".to_string(),
            assessment: assess(standing.as_ref(), None),
            standing,
            stats: None,
            main_champions: mains,
        };
        let report = ScoutingReport {
            game_id: 1,
            game_mode: "CLASSIC".to_string(),
            queue_id: Some(420),
            game_start_time: 0,
            player_name: "Me#NA1".to_string(),
            player_champion: "Ahri".to_string(),
            allies: Vec::new(),
            enemies: vec![
                enemy("Second", None, Vec::new()),
                enemy(
                    "First",
                    Some(standing),
                    vec!["Zed".to_string(), "Talon".to_string(), "Qiyana".to_string()],
                ),
            ],
            recommendations: Vec::new(),
        };

        let prompt = pregame_prompt(&report);

        assert!(prompt.starts_with("Pre-game briefing for Me#NA1 playing Ahri"));
        assert!(prompt.contains("1. Second#NA1 [Zed] (Unknown) - Threat: UNKNOWN\n"));
        assert!(prompt.contains(
            "2. First#NA1 [Zed] (DIAMOND IV (12 LP)) - 60W-40L (60%) - Threat: HIGH - Usual mains: Zed, Talon\n"
        ));
    }
}
