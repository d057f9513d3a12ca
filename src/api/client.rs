use crate::analysis::ranked::RankedStanding;
use crate::champions::ChampionCatalog;
use crate::config::Config;
use crate::error::AppError;
use crate::scout::{LiveGameSnapshot, PlayerIdentity};
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde::de::DeserializeOwned;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use super::endpoints;
use super::models::*;
use super::transport::{Transport, UreqTransport};
use super::MatchDataSource;

/// Used when a 429 arrives without a usable `Retry-After` header.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;
type PauseFn = Box<dyn Fn(Duration) + Send + Sync>;

pub struct RiotApiClient {
    config: Config,
    transport: Box<dyn Transport>,
    // One budget shared by every thread that holds a reference to this client.
    per_second: DirectLimiter,
    per_two_minutes: DirectLimiter,
    clock: DefaultClock,
    pause: PauseFn,
}

impl RiotApiClient {
    pub fn new(config: Config) -> Self {
        Self::with_transport_and_pause(config, Box::new(UreqTransport::new()), Box::new(thread::sleep))
    }

    pub fn with_transport_and_pause(config: Config, transport: Box<dyn Transport>, pause: PauseFn) -> Self {
        let per_second = RateLimiter::direct(Quota::per_second(config.requests_per_second));
        let long_budget = config.requests_per_two_minutes;
        let long_quota = Quota::with_period(Duration::from_secs(120) / long_budget.get())
            .map(|q| q.allow_burst(long_budget))
            .unwrap_or_else(|| Quota::per_second(config.requests_per_second));
        RiotApiClient {
            config,
            transport,
            per_second,
            per_two_minutes: RateLimiter::direct(long_quota),
            clock: DefaultClock::default(),
            pause,
        }
    }

    fn platform(&self) -> &str {
        &self.config.region
    }

    /// Blocks the calling thread until both budgets admit one more request.
    fn acquire_permit(&self) {
        for limiter in [&self.per_second, &self.per_two_minutes] {
            while let Err(not_until) = limiter.check() {
                thread::sleep(not_until.wait_time_from(self.clock.now()));
            }
        }
    }

    /// Issues a GET. A 429 pauses for exactly the signalled duration and
    /// retries the identical request once; a second 429 is `RemoteUnavailable`.
    fn execute_request(&self, url: &str, metered: bool) -> Result<String, AppError> {
        let headers: Vec<(&str, &str)> = if metered {
            vec![("X-Riot-Token", self.config.api_key.as_str())]
        } else {
            Vec::new()
        };

        let mut retried = false;
        loop {
            if metered {
                self.acquire_permit();
            }
            debug!(url, "remote request");

            let response = self
                .transport
                .get(url, &headers)
                .map_err(AppError::RemoteUnavailable)?;

            match response.status {
                200..=299 => return Ok(response.body),
                404 => return Err(AppError::NotFound(url.to_string())),
                429 if !retried => {
                    let wait = response.retry_after.unwrap_or(DEFAULT_RETRY_AFTER);
                    warn!(url, wait_secs = wait.as_secs_f64(), "rate limited, waiting before retry");
                    (self.pause)(wait);
                    retried = true;
                }
                429 => {
                    return Err(AppError::RemoteUnavailable(format!(
                        "rate limited again after waiting: {}",
                        url
                    )))
                }
                status => {
                    return Err(AppError::RemoteUnavailable(format!("HTTP {} from {}", status, url)));
                }
            }
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let body = self.execute_request(url, true)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }
}

impl MatchDataSource for RiotApiClient {
    fn resolve_account(&self, game_name: &str, tag_line: &str) -> Result<PlayerIdentity, AppError> {
        let url = endpoints::account_by_riot_id(self.platform(), game_name, tag_line);
        let account: AccountDto = self.get_json(&url).map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound(format!("account {}#{}", game_name, tag_line)),
            other => other,
        })?;
        Ok(account.into_identity(game_name, tag_line))
    }

    fn get_ranked_standing(&self, puuid: &str) -> Result<RankedStanding, AppError> {
        let url = endpoints::league_entries_by_puuid(self.platform(), puuid);
        match self.get_json::<Vec<LeagueEntryDto>>(&url) {
            Ok(entries) => Ok(ranked_solo_standing(&entries)),
            Err(AppError::NotFound(_)) => Ok(RankedStanding::Unranked),
            Err(e) => Err(e),
        }
    }

    fn list_match_ids(&self, puuid: &str, count: usize, queue: Option<u32>) -> Result<Vec<String>, AppError> {
        let url = endpoints::match_ids_by_puuid(self.platform(), puuid, count, queue);
        let mut ids: Vec<String> = self.get_json(&url)?;
        ids.truncate(count);
        Ok(ids)
    }

    fn get_match_detail(&self, match_id: &str) -> Result<MatchDto, AppError> {
        let url = endpoints::match_by_id(self.platform(), match_id);
        self.get_json(&url).map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound(format!("match {}", match_id)),
            other => other,
        })
    }

    fn get_live_game(&self, puuid: &str) -> Result<LiveGameSnapshot, AppError> {
        let url = endpoints::active_game_by_puuid(self.platform(), puuid);
        match self.get_json::<CurrentGameInfo>(&url) {
            Ok(game) => Ok(LiveGameSnapshot::from(game)),
            Err(AppError::NotFound(_)) => Err(AppError::NotInGame(puuid.to_string())),
            Err(e) => Err(e),
        }
    }

    fn get_champion_masteries(&self, puuid: &str, limit: usize) -> Result<Vec<ChampionMasteryDto>, AppError> {
        let url = endpoints::champion_masteries_by_puuid(self.platform(), puuid, limit);
        let mut masteries: Vec<ChampionMasteryDto> = self.get_json(&url)?;
        masteries.sort_by(|a, b| b.champion_points.cmp(&a.champion_points));
        masteries.truncate(limit);
        Ok(masteries)
    }

    fn champion_catalog(&self) -> Result<ChampionCatalog, AppError> {
        let url = endpoints::data_dragon_champions(&self.config.ddragon_version);
        let body = self.execute_request(&url, false)?;
        let data: DataDragonChampions =
            serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))?;
        Ok(ChampionCatalog::from_data_dragon(&data))
    }
}
