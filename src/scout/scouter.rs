use std::thread;

use tracing::{info, warn};

use super::{CancelToken, LiveGameParticipant, LiveGameSnapshot, OpponentProfile, ScoutingReport, TeamMember};
use crate::analysis::match_history::{aggregate, PlayerStats};
use crate::analysis::ranked::RankedStanding;
use crate::analysis::recommender::ThreatRecommender;
use crate::analysis::threat::assess;
use crate::api::endpoints::RANKED_SOLO_QUEUE_ID;
use crate::api::MatchDataSource;
use crate::champions::ChampionCatalog;
use crate::config::{Config, MAX_CONCURRENCY};
use crate::error::AppError;

/// Ranked-solo match ids requested per opponent.
pub const MATCH_IDS_TO_LIST: usize = 20;
/// Details fetched per opponent, newest first.
pub const MATCH_DETAILS_TO_FETCH: usize = 10;
const MAIN_CHAMPIONS: usize = 3;

type Progress<'p> = &'p (dyn Fn(&OpponentProfile) + Sync);

pub struct Scouter<'a, S: MatchDataSource + ?Sized> {
    source: &'a S,
    concurrency: usize,
}

impl<'a, S: MatchDataSource + ?Sized> Scouter<'a, S> {
    pub fn new(source: &'a S, config: &Config) -> Self {
        Self::with_concurrency(source, config.concurrency)
    }

    pub fn with_concurrency(source: &'a S, concurrency: usize) -> Self {
        Scouter {
            source,
            concurrency: concurrency.clamp(1, MAX_CONCURRENCY),
        }
    }

    pub fn scout(&self, snapshot: &LiveGameSnapshot, self_puuid: &str) -> Result<ScoutingReport, AppError> {
        self.scout_with(snapshot, self_puuid, &CancelToken::new(), &|_| {})
    }

    /// Full scouting pass. `progress` runs on the worker thread once per
    /// finished opponent. A cancelled pass returns `AppError::Cancelled` and
    /// discards whatever was collected.
    pub fn scout_with(
        &self,
        snapshot: &LiveGameSnapshot,
        self_puuid: &str,
        cancel: &CancelToken,
        progress: Progress<'_>,
    ) -> Result<ScoutingReport, AppError> {
        let me = snapshot
            .participants
            .iter()
            .find(|p| p.identity.puuid == self_puuid && !self_puuid.is_empty())
            .ok_or_else(|| AppError::SelfNotInGame(self_puuid.to_string()))?;

        let (allies, enemies): (Vec<&LiveGameParticipant>, Vec<&LiveGameParticipant>) = snapshot
            .participants
            .iter()
            .filter(|p| !std::ptr::eq(*p, me))
            .partition(|p| p.team_id == me.team_id);

        info!(
            game_id = snapshot.game_id,
            enemies = enemies.len(),
            concurrency = self.concurrency,
            "scouting enemy team"
        );

        cancel.check()?;
        let catalog = self.source.champion_catalog().unwrap_or_else(|e| {
            warn!(error = %e, "champion catalog unavailable, falling back to champion ids");
            ChampionCatalog::default()
        });

        let profiles = self.scout_opponents(&enemies, &catalog, cancel, progress)?;
        let recommendations = ThreatRecommender::recommendations(&profiles);

        let report = ScoutingReport {
            game_id: snapshot.game_id,
            game_mode: snapshot.game_mode.clone(),
            queue_id: snapshot.queue_id,
            game_start_time: snapshot.game_start_time,
            player_name: me.identity.riot_id(),
            player_champion: catalog.name_for(me.champion_id),
            allies: allies
                .iter()
                .map(|p| TeamMember {
                    name: p.identity.riot_id(),
                    champion: catalog.name_for(p.champion_id),
                })
                .collect(),
            enemies: profiles,
            recommendations,
        };

        info!(
            threats = report.threats().count(),
            partial = report.partial_data_count(),
            "scouting finished"
        );
        Ok(report)
    }

    /// Runs at most `concurrency` opponents at a time; each result lands in
    /// the slot of its opponent.
    fn scout_opponents(
        &self,
        enemies: &[&LiveGameParticipant],
        catalog: &ChampionCatalog,
        cancel: &CancelToken,
        progress: Progress<'_>,
    ) -> Result<Vec<OpponentProfile>, AppError> {
        let mut profiles = Vec::with_capacity(enemies.len());

        if self.concurrency <= 1 {
            for enemy in enemies {
                let profile = self.scout_opponent(enemy, catalog, cancel)?;
                progress(&profile);
                profiles.push(profile);
            }
            return Ok(profiles);
        }

        for batch in enemies.chunks(self.concurrency) {
            let batch_profiles = thread::scope(|scope| {
                let handles: Vec<_> = batch
                    .iter()
                    .map(|enemy| {
                        let enemy: &LiveGameParticipant = enemy;
                        let handle = scope.spawn(move || {
                            let profile = self.scout_opponent(enemy, catalog, cancel)?;
                            progress(&profile);
                            Ok::<OpponentProfile, AppError>(profile)
                        });
                        (enemy, handle)
                    })
                    .collect();

                let mut out = Vec::with_capacity(handles.len());
                for (enemy, handle) in handles {
                    let profile = match handle.join() {
                        Ok(result) => result?,
                        Err(_) => {
                            warn!(player = %enemy.identity.riot_id(), "opponent worker panicked");
                            unavailable_profile(enemy, catalog)
                        }
                    };
                    out.push(profile);
                }
                Ok::<Vec<OpponentProfile>, AppError>(out)
            })?;
            profiles.extend(batch_profiles);
            cancel.check()?;
        }

        Ok(profiles)
    }

    fn scout_opponent(
        &self,
        enemy: &LiveGameParticipant,
        catalog: &ChampionCatalog,
        cancel: &CancelToken,
    ) -> Result<OpponentProfile, AppError> {
        cancel.check()?;
        let identity = &enemy.identity;
        if !identity.has_puuid() {
            return Ok(unavailable_profile(enemy, catalog));
        }

        let (standing, stats) = match self.collect(&identity.puuid, cancel) {
            Ok(collected) => collected,
            Err(AppError::Cancelled) => return Err(AppError::Cancelled),
            Err(e) => {
                warn!(player = %identity.riot_id(), error = %e, "opponent data unavailable");
                (None, None)
            }
        };

        let main_champions = match &stats {
            Some(stats) => stats
                .top_champions(MAIN_CHAMPIONS)
                .into_iter()
                .map(|c| c.name.clone())
                .collect(),
            None => {
                cancel.check()?;
                self.mastery_mains(&identity.puuid, catalog)
            }
        };

        Ok(OpponentProfile {
            identity: identity.clone(),
            champion: catalog.name_for(enemy.champion_id),
            assessment: assess(standing.as_ref(), stats.as_ref()),
            standing,
            stats,
            main_champions,
        })
    }

    /// Ranked standing plus recent ranked-solo statistics. A failed standing or
    /// id listing fails the whole opponent; single unreadable matches are skipped.
    fn collect(
        &self,
        puuid: &str,
        cancel: &CancelToken,
    ) -> Result<(Option<RankedStanding>, Option<PlayerStats>), AppError> {
        cancel.check()?;
        let standing = self.source.get_ranked_standing(puuid)?;

        cancel.check()?;
        let match_ids = match self
            .source
            .list_match_ids(puuid, MATCH_IDS_TO_LIST, Some(RANKED_SOLO_QUEUE_ID))
        {
            Ok(ids) => ids,
            Err(AppError::NotFound(_)) => Vec::new(),
            Err(e) => return Err(e),
        };

        let mut matches = Vec::with_capacity(MATCH_DETAILS_TO_FETCH);
        for match_id in match_ids.iter().take(MATCH_DETAILS_TO_FETCH) {
            cancel.check()?;
            match self.source.get_match_detail(match_id) {
                Ok(detail) => matches.push(detail),
                Err(e) => warn!(match_id = %match_id, error = %e, "skipping unreadable match"),
            }
        }

        let stats = aggregate(&matches, puuid);
        Ok((Some(standing), Some(stats).filter(PlayerStats::has_games)))
    }

    /// Fallback mains from champion mastery, resolved to names.
    fn mastery_mains(&self, puuid: &str, catalog: &ChampionCatalog) -> Vec<String> {
        match self.source.get_champion_masteries(puuid, MAIN_CHAMPIONS) {
            Ok(masteries) => masteries
                .iter()
                .take(MAIN_CHAMPIONS)
                .map(|m| catalog.name_for(m.champion_id))
                .collect(),
            Err(e) => {
                warn!(error = %e, "champion mastery unavailable");
                Vec::new()
            }
        }
    }
}

fn unavailable_profile(enemy: &LiveGameParticipant, catalog: &ChampionCatalog) -> OpponentProfile {
    OpponentProfile {
        identity: enemy.identity.clone(),
        champion: catalog.name_for(enemy.champion_id),
        standing: None,
        stats: None,
        assessment: assess(None, None),
        main_champions: Vec::new(),
    }
}
