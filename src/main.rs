use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::ProgressBar;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use league_scout::analysis::match_history::{aggregate, matchup_record};
use league_scout::api::client::RiotApiClient;
use league_scout::api::endpoints::RANKED_SOLO_QUEUE_ID;
use league_scout::api::models::MatchDto;
use league_scout::api::MatchDataSource;
use league_scout::coach::{self, prompt};
use league_scout::config::Config;
use league_scout::display::output::{
    display_coach, display_error, display_info, display_recent_games, display_scouting_report, display_success,
};
use league_scout::display::{render, render_champion_stats, render_player_stats};
use league_scout::error::AppError;
use league_scout::scout::{split_riot_id, CancelToken, OpponentProfile, PlayerIdentity, Scouter, MATCH_IDS_TO_LIST};

/// match-v5 refuses larger id pages.
const MAX_MATCH_COUNT: usize = 100;

#[derive(Parser, Debug)]
#[command(name = "League Scout")]
#[command(about = "Scout the enemy team of a live ranked game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scout every enemy in the player's current game
    Scout(ScoutArgs),
    /// Summarize the player's recent ranked-solo games
    History(PlayerArgs),
    /// Per-champion statistics over recent ranked-solo games
    Champions(ChampionsArgs),
    /// Coach a lane matchup, using the player's record in it
    Matchup(MatchupArgs),
}

#[derive(Args, Debug)]
struct ScoutArgs {
    #[command(flatten)]
    player: PlayerArgs,

    /// Print the plain-text report instead of the colored table
    #[arg(long)]
    plain: bool,
}

#[derive(Args, Debug)]
struct ChampionsArgs {
    #[command(flatten)]
    player: PlayerArgs,

    /// Ranked games to analyze (1-100)
    #[arg(short = 'n', long, default_value = "50")]
    count: usize,
}

#[derive(Args, Debug)]
struct MatchupArgs {
    #[command(flatten)]
    player: PlayerArgs,

    /// Your champion
    #[arg(long)]
    champion: String,

    /// Enemy laner's champion
    #[arg(long)]
    enemy: String,

    /// Ranked games searched for past games in this matchup (1-100)
    #[arg(short = 'n', long, default_value = "50")]
    count: usize,
}

#[derive(Args, Debug)]
struct PlayerArgs {
    /// Riot game name, or the full Riot ID as Name#TAG
    game_name: String,

    /// Riot tag line (omit when the game name already contains #TAG)
    tag_line: Option<String>,

    /// Platform region, e.g. euw1, na1, kr (default: RIOT_REGION or euw1)
    #[arg(short, long)]
    region: Option<String>,

    /// Opponents scouted in parallel (1-5)
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// Ask the configured LLM provider for a written analysis
    #[arg(long)]
    coach: bool,
}

impl PlayerArgs {
    fn riot_id(&self) -> Result<(String, String), AppError> {
        match &self.tag_line {
            Some(tag) if !self.game_name.trim().is_empty() && !tag.trim().is_empty() => {
                Ok((self.game_name.trim().to_string(), tag.trim().to_string()))
            }
            Some(_) => Err(AppError::InvalidRiotId),
            None => split_riot_id(&self.game_name),
        }
    }

    fn config(&self) -> Result<Config, AppError> {
        let mut config = Config::from_env()?;
        if let Some(region) = &self.region {
            config.set_region(region)?;
        }
        if let Some(concurrency) = self.concurrency {
            config.set_concurrency(concurrency);
        }
        Ok(config)
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Scout(args) => scout(args),
        Command::History(args) => history(args),
        Command::Champions(args) => champions(args),
        Command::Matchup(args) => matchup(args),
    };

    if let Err(e) = result {
        display_error(&format!("{:#}", e));
        if e.downcast_ref::<AppError>().is_some_and(AppError::is_remote_failure) {
            display_info("The Riot API may be degraded, try again in a minute.");
        }
        process::exit(1);
    }
}

fn scout(args: ScoutArgs) -> Result<()> {
    let (game_name, tag_line) = args.player.riot_id()?;
    let config = args.player.config()?;

    display_info(&format!(
        "Looking up {}#{} in region {}",
        game_name, tag_line, config.region
    ));
    let client = RiotApiClient::new(config.clone());

    let me = client.resolve_account(&game_name, &tag_line)?;
    debug!(puuid = %me.puuid, "account resolved");

    let snapshot = client.get_live_game(&me.puuid)?;
    display_success(&format!("Found live game {} ({})", snapshot.game_id, snapshot.game_mode));

    let my_team = snapshot
        .participants
        .iter()
        .find(|p| p.identity.puuid == me.puuid)
        .map(|p| p.team_id);
    let enemy_count = snapshot
        .participants
        .iter()
        .filter(|p| Some(p.team_id) != my_team)
        .count();

    let pb = ProgressBar::new(enemy_count as u64);
    pb.set_message("Scouting enemies");
    let progress = |profile: &OpponentProfile| {
        pb.set_message(profile.identity.riot_id());
        pb.inc(1);
    };

    let report = Scouter::new(&client, &config).scout_with(&snapshot, &me.puuid, &CancelToken::new(), &progress)?;
    pb.finish_with_message("✓ Enemy team scouted");

    if args.plain {
        println!("{}", render(&report));
    } else {
        display_scouting_report(&report);
    }

    if args.player.coach {
        ask_coach(&config, &prompt::pregame_prompt(&report))?;
    }
    Ok(())
}

fn history(args: PlayerArgs) -> Result<()> {
    let (game_name, tag_line) = args.riot_id()?;
    let config = args.config()?;

    display_info(&format!(
        "Fetching ranked history for {}#{} in region {}",
        game_name, tag_line, config.region
    ));
    let client = RiotApiClient::new(config.clone());
    let me = client.resolve_account(&game_name, &tag_line)?;

    let stats = aggregate(&fetch_ranked_matches(&client, &me, MATCH_IDS_TO_LIST)?, &me.puuid);
    if !stats.has_games() {
        return Err(AppError::NoRankedGames.into());
    }

    let player_name = me.riot_id();
    display_recent_games(&stats);
    println!("{}", render_player_stats(&stats, &player_name));

    if args.coach {
        ask_coach(&config, &prompt::performance_prompt(&stats, &player_name))?;
    }
    Ok(())
}

fn champions(args: ChampionsArgs) -> Result<()> {
    let (game_name, tag_line) = args.player.riot_id()?;
    let config = args.player.config()?;

    display_info(&format!(
        "Fetching champion statistics for {}#{} in region {}",
        game_name, tag_line, config.region
    ));
    let client = RiotApiClient::new(config.clone());
    let me = client.resolve_account(&game_name, &tag_line)?;

    let count = args.count.clamp(1, MAX_MATCH_COUNT);
    let stats = aggregate(&fetch_ranked_matches(&client, &me, count)?, &me.puuid);
    if !stats.has_games() {
        return Err(AppError::NoRankedGames.into());
    }

    let player_name = me.riot_id();
    println!("{}", render_champion_stats(&stats, &player_name));

    if args.player.coach {
        ask_coach(&config, &prompt::performance_prompt(&stats, &player_name))?;
    }
    Ok(())
}

fn matchup(args: MatchupArgs) -> Result<()> {
    let (game_name, tag_line) = args.player.riot_id()?;
    let config = args.player.config()?;

    display_info(&format!(
        "Looking up {} vs {} for {}#{} in region {}",
        args.champion, args.enemy, game_name, tag_line, config.region
    ));
    let client = RiotApiClient::new(config.clone());
    let me = client.resolve_account(&game_name, &tag_line)?;

    let rank = match client.get_ranked_standing(&me.puuid) {
        Ok(standing) => standing.to_string(),
        Err(e) => {
            debug!(error = %e, "ranked standing unavailable");
            "Unknown".to_string()
        }
    };

    // No ranked history is fine here: the matchup can still be coached.
    let matches = match fetch_ranked_matches(&client, &me, args.count.clamp(1, MAX_MATCH_COUNT)) {
        Ok(matches) => matches,
        Err(e) if e.downcast_ref::<AppError>() == Some(&AppError::NoRankedGames) => Vec::new(),
        Err(e) => return Err(e),
    };
    let record = matchup_record(&matches, &me.puuid, &args.champion, &args.enemy);
    if record.games > 0 {
        display_success(&format!(
            "{} vs {}: {}W - {}L ({:.1}% WR) over {} games",
            args.champion,
            args.enemy,
            record.wins,
            record.games - record.wins,
            record.winrate(),
            record.games
        ));
    } else {
        display_info(&format!("No recent ranked games as {} against {}", args.champion, args.enemy));
    }

    if args.player.coach {
        let briefing = prompt::matchup_prompt(&args.champion, &args.enemy, &rank, Some(record));
        ask_coach(&config, &briefing)?;
    }
    Ok(())
}

/// Newest `count` ranked-solo matches. Unreadable matches are skipped.
fn fetch_ranked_matches(client: &RiotApiClient, me: &PlayerIdentity, count: usize) -> Result<Vec<MatchDto>> {
    let match_ids = client
        .list_match_ids(&me.puuid, count, Some(RANKED_SOLO_QUEUE_ID))
        .context("listing ranked matches")?;
    if match_ids.is_empty() {
        return Err(AppError::NoRankedGames.into());
    }
    display_success(&format!("Found {} matches to analyze", match_ids.len()));

    let pb = ProgressBar::new(match_ids.len() as u64);
    pb.set_message("Fetching match details");
    let mut matches = Vec::with_capacity(match_ids.len());
    for match_id in &match_ids {
        match client.get_match_detail(match_id) {
            Ok(detail) => matches.push(detail),
            Err(e) => debug!(match_id = %match_id, error = %e, "skipping unreadable match"),
        }
        pb.inc(1);
    }
    pb.finish_with_message("✓ Match data fetched");
    Ok(matches)
}

/// The report is already printed, so a failing provider is reported but not fatal.
fn ask_coach(config: &Config, prompt: &str) -> Result<()> {
    let generator = coach::from_config(config)?;
    display_info("Asking the coach...");
    match generator.complete(prompt) {
        Ok(text) => display_coach(&text),
        Err(e) => display_error(&e.to_string()),
    }
    Ok(())
}
