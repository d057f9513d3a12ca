// Plain-text rendering of reports. No color codes and no I/O, so the same
// report always renders to the same text.

use chrono::{DateTime, Utc};

use crate::analysis::match_history::PlayerStats;
use crate::analysis::recommender::Recommendation;
use crate::scout::{OpponentProfile, ScoutingReport};

const WIDTH: usize = 80;
const UNKNOWN: &str = "Unknown";
const TOP_CHAMPIONS_IN_HISTORY: usize = 5;

pub fn render(report: &ScoutingReport) -> String {
    let mut lines = Vec::new();
    let heavy = "=".repeat(WIDTH);
    let light = "-".repeat(WIDTH);

    lines.push(heavy.clone());
    lines.push("PRE-GAME SCOUTING REPORT".to_string());
    lines.push(heavy.clone());

    let mode = if report.game_mode.is_empty() {
        UNKNOWN
    } else {
        report.game_mode.as_str()
    };
    match report.queue_id {
        Some(queue) => lines.push(format!("Game mode : {} (queue {})", mode, queue)),
        None => lines.push(format!("Game mode : {}", mode)),
    }
    lines.push(format!("Started   : {}", format_start(report.game_start_time)));
    lines.push(format!("You       : {} on {}", report.player_name, report.player_champion));
    if !report.allies.is_empty() {
        let allies: Vec<String> = report
            .allies
            .iter()
            .map(|a| format!("{} ({})", a.name, a.champion))
            .collect();
        lines.push(format!("Allies    : {}", allies.join(", ")));
    }

    lines.push(String::new());
    lines.push(light.clone());
    lines.push(format!("ENEMY TEAM ({} players)", report.enemies.len()));
    lines.push(light.clone());

    for (idx, enemy) in report.enemies.iter().enumerate() {
        lines.push(String::new());
        render_opponent(&mut lines, idx + 1, enemy);
    }

    let partial = report.partial_data_count();
    if partial > 0 {
        lines.push(String::new());
        lines.push(format!("Note: recent match data unavailable for {} of {} enemies", partial, report.enemies.len()));
    }

    lines.push(String::new());
    lines.push(light.clone());
    lines.push("RECOMMENDATIONS".to_string());
    lines.push(light);

    let threats: Vec<&Recommendation> = report
        .recommendations
        .iter()
        .filter(|r| matches!(r, Recommendation::Threat { .. }))
        .collect();
    if threats.is_empty() {
        lines.push("No high-threat opponents identified".to_string());
    } else {
        lines.push("Threats identified:".to_string());
        lines.extend(threats.iter().map(|r| format!("  - {}", r)));
    }

    lines.push(String::new());
    lines.push("Strategy:".to_string());
    lines.extend(
        report
            .recommendations
            .iter()
            .filter(|r| !matches!(r, Recommendation::Threat { .. }))
            .map(|r| format!("  - {}", r)),
    );
    lines.push(heavy);

    lines.join("\n")
}

fn format_start(epoch_millis: i64) -> String {
    if epoch_millis <= 0 {
        return "not started".to_string();
    }
    DateTime::<Utc>::from_timestamp_millis(epoch_millis)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn render_opponent(lines: &mut Vec<String>, position: usize, enemy: &OpponentProfile) {
    lines.push(format!("{}. {} - {}", position, enemy.identity.riot_id(), enemy.champion));
    lines.push(format!("   Rank        : {}", enemy.rank_label()));

    let record = enemy.standing.as_ref().and_then(|s| s.record());
    match record {
        Some((wins, losses)) => lines.push(format!(
            "   Season      : {}W - {}L ({:.1}% WR)",
            wins,
            losses,
            wins as f64 / (wins + losses) as f64 * 100.0
        )),
        None => lines.push(format!("   Season      : {}", UNKNOWN)),
    }

    lines.push(format!(
        "   Threat      : {} ({})",
        enemy.threat(),
        enemy.assessment.explain()
    ));

    match &enemy.stats {
        Some(stats) => {
            lines.push(format!(
                "   Recent form : {}W - {}L over the last {} ranked games",
                stats.wins, stats.losses, stats.total_games
            ));
            lines.push(format!(
                "   Averages    : {:.1}/{:.1}/{:.1} ({:.2} KDA), {:.1} CS/min, {:.1} vision",
                stats.avg_kills,
                stats.avg_deaths,
                stats.avg_assists,
                stats.kda_avg,
                stats.cs_per_min_avg,
                stats.vision_score_avg
            ));
        }
        None => lines.push(format!("   Recent form : {}", UNKNOWN)),
    }

    if enemy.main_champions.is_empty() {
        lines.push(format!("   Mains       : {}", UNKNOWN));
    } else {
        lines.push(format!("   Mains       : {}", enemy.main_champions.join(", ")));
    }
}

/// Performance report for the non-pregame history analysis.
pub fn render_player_stats(stats: &PlayerStats, player_name: &str) -> String {
    if !stats.has_games() {
        return format!("No recent ranked data available for {}", player_name);
    }

    let heavy = "=".repeat(WIDTH / 4 * 3);
    let mut lines = vec![
        heavy.clone(),
        format!("PERFORMANCE REPORT - {}", player_name),
        heavy.clone(),
        String::new(),
        format!("Overall ({} games):", stats.total_games),
        format!("  - Wins / Losses : {}W - {}L", stats.wins, stats.losses),
        format!("  - Winrate       : {:.1}%", stats.winrate),
        format!("  - Average KDA   : {:.2}", stats.kda_avg),
        format!(
            "  - K/D/A         : {:.1} / {:.1} / {:.1}",
            stats.avg_kills, stats.avg_deaths, stats.avg_assists
        ),
        format!("  - CS/min        : {:.1}", stats.cs_per_min_avg),
        format!("  - Vision score  : {:.1}", stats.vision_score_avg),
    ];

    lines.push(String::new());
    lines.push("Most played champions:".to_string());
    for champ in stats.top_champions(TOP_CHAMPIONS_IN_HISTORY) {
        lines.push(format!(
            "  - {}: {} games - {:.1}% WR - {:.2} KDA",
            champ.name,
            champ.games,
            champ.win_rate(),
            champ.kda()
        ));
    }

    let mut roles: Vec<_> = stats.roles.iter().filter(|r| r.role != "UNKNOWN").collect();
    if !roles.is_empty() {
        roles.sort_by(|a, b| b.games.cmp(&a.games));
        lines.push(String::new());
        lines.push("Roles played:".to_string());
        lines.extend(roles.iter().map(|r| format!("  - {}: {} games", r.role, r.games)));
    }

    lines.push(heavy);
    lines.join("\n")
}

/// Every champion played, most games first, with per-champion averages.
pub fn render_champion_stats(stats: &PlayerStats, player_name: &str) -> String {
    if !stats.has_games() {
        return format!("No recent ranked data available for {}", player_name);
    }

    let heavy = "=".repeat(WIDTH / 4 * 3);
    let mut lines = vec![
        heavy.clone(),
        format!("CHAMPION STATISTICS - {} ({} games)", player_name, stats.total_games),
        heavy.clone(),
    ];

    for (idx, champ) in stats.top_champions(usize::MAX).iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("{}. {}", idx + 1, champ.name));
        lines.push(format!("   Games    : {}", champ.games));
        lines.push(format!("   Winrate  : {:.1}%", champ.win_rate()));
        lines.push(format!("   KDA      : {:.2}", champ.kda()));
        lines.push(format!(
            "   K/D/A    : {:.1} / {:.1} / {:.1}",
            champ.avg_kills(),
            champ.avg_deaths(),
            champ.avg_assists()
        ));
    }

    lines.push(String::new());
    lines.push(heavy);
    lines.join("\n")
}
