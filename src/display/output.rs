use crate::analysis::match_history::PlayerStats;
use crate::analysis::recommender::Recommendation;
use crate::analysis::threat::ThreatLevel;
use crate::scout::ScoutingReport;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct EnemyRow {
    #[tabled(rename = "#")]
    number: String,
    player: String,
    champion: String,
    rank: String,
    #[tabled(rename = "win rate")]
    win_rate: String,
    kda: String,
    threat: String,
    mains: String,
}

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "#")]
    number: String,
    champion: String,
    result: String,
    kda: String,
    #[tabled(rename = "cs/min")]
    cs_per_min: String,
    vision: String,
    damage: String,
}

fn colored_threat(level: ThreatLevel) -> String {
    let label = level.label();
    match level {
        ThreatLevel::VeryHigh => label.red().bold().to_string(),
        ThreatLevel::High => label.red().to_string(),
        ThreatLevel::Medium => label.yellow().to_string(),
        ThreatLevel::Low => label.green().to_string(),
        ThreatLevel::Unknown => label.dimmed().to_string(),
    }
}

pub fn display_scouting_report(report: &ScoutingReport) {
    println!(
        "\n{}",
        format!("🎮 Enemy team scouting for {} ({})", report.player_name, report.player_champion)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(80).cyan());

    let rows: Vec<EnemyRow> = report
        .enemies
        .iter()
        .enumerate()
        .map(|(idx, enemy)| EnemyRow {
            number: format!("{}", idx + 1),
            player: enemy.identity.riot_id(),
            champion: enemy.champion.clone(),
            rank: enemy.rank_label(),
            win_rate: enemy
                .winrate()
                .map_or_else(|| "Unknown".to_string(), |w| format!("{:.1}%", w)),
            kda: enemy
                .stats
                .as_ref()
                .map_or_else(|| "Unknown".to_string(), |s| format!("{:.2}", s.kda_avg)),
            threat: colored_threat(enemy.threat()),
            mains: if enemy.main_champions.is_empty() {
                "Unknown".to_string()
            } else {
                enemy.main_champions.join(", ")
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    let partial = report.partial_data_count();
    if partial > 0 {
        println!(
            "{}",
            format!("⚠️  Recent match data unavailable for {} of {} enemies", partial, report.enemies.len()).yellow()
        );
    }

    println!("\n{}", "Recommendations".bold().yellow());
    for rec in &report.recommendations {
        match rec {
            Recommendation::Threat { .. } => println!("  {} {}", "⚠️".red(), rec),
            Recommendation::PlayCautiously { .. } => println!("  {} {}", "🛡️".red(), rec.to_string().bold()),
            Recommendation::Advice(_) => println!("  • {}", rec),
        }
    }
    println!();
}

pub fn display_recent_games(stats: &PlayerStats) {
    if stats.recent.is_empty() {
        return;
    }

    println!(
        "\n{}",
        format!("📊 RECENT RANKED GAMES (Last {})", stats.recent.len()).bold().cyan()
    );
    println!("{}\n", "=".repeat(80).cyan());
    println!(
        "{} {} W / {} L ({:.1}% WR)\n",
        "📈 Overall:".bold(),
        stats.wins.to_string().green(),
        stats.losses.to_string().red(),
        stats.winrate
    );

    let rows: Vec<MatchRow> = stats
        .recent
        .iter()
        .enumerate()
        .map(|(idx, game)| MatchRow {
            number: format!("{}", idx + 1),
            champion: game.champion.clone(),
            result: if game.win {
                "WIN".green().to_string()
            } else {
                "LOSS".red().to_string()
            },
            kda: format!("{}/{}/{}", game.kills, game.deaths, game.assists),
            cs_per_min: format!("{:.1}", game.cs_per_min),
            vision: game.vision_score.to_string(),
            damage: game.damage.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_coach(text: &str) {
    println!("\n{}", "🧠 Coach".bold().magenta());
    println!("{}\n", "=".repeat(80).magenta());
    println!("{}\n", text);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
