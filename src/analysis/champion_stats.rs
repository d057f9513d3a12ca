use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ChampionStats {
    pub name: String,
    pub games: u32,
    pub wins: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    /// Position of the first game on this champion in the aggregated sequence.
    pub first_seen: usize,
}

impl ChampionStats {
    pub fn new(name: String, first_seen: usize) -> Self {
        ChampionStats {
            name,
            games: 0,
            wins: 0,
            kills: 0,
            deaths: 0,
            assists: 0,
            first_seen,
        }
    }

    /// Percentage in `[0, 100]`.
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64 * 100.0
        }
    }

    pub fn kda(&self) -> f64 {
        (self.kills + self.assists) as f64 / self.deaths.max(1) as f64
    }

    pub fn avg_kills(&self) -> f64 {
        self.per_game(self.kills)
    }

    pub fn avg_deaths(&self) -> f64 {
        self.per_game(self.deaths)
    }

    pub fn avg_assists(&self) -> f64 {
        self.per_game(self.assists)
    }

    fn per_game(&self, total: u32) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            total as f64 / self.games as f64
        }
    }
}

#[derive(Debug, Default)]
pub struct ChampionStatsTracker {
    stats: HashMap<String, ChampionStats>,
    games_seen: usize,
}

impl ChampionStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_game(&mut self, champion_name: &str, won: bool, kills: u32, deaths: u32, assists: u32) {
        let order = self.games_seen;
        self.games_seen += 1;

        let entry = self
            .stats
            .entry(champion_name.to_string())
            .or_insert_with(|| ChampionStats::new(champion_name.to_string(), order));

        entry.games += 1;
        if won {
            entry.wins += 1;
        }
        entry.kills += kills;
        entry.deaths += deaths;
        entry.assists += assists;
    }

    pub fn into_stats(self) -> HashMap<String, ChampionStats> {
        self.stats
    }
}

/// The one ordering used for every "top champions" view: most games first,
/// ties kept in the order the champions were first encountered.
pub fn top_champions(champions: &HashMap<String, ChampionStats>, n: usize) -> Vec<&ChampionStats> {
    let mut ranked: Vec<&ChampionStats> = champions.values().collect();
    ranked.sort_by_key(|c| c.first_seen);
    ranked.sort_by(|a, b| b.games.cmp(&a.games));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_accumulates_per_champion() {
        let mut tracker = ChampionStatsTracker::new();
        tracker.add_game("Ahri", true, 5, 2, 7);
        tracker.add_game("Ahri", false, 1, 4, 3);
        let stats = tracker.into_stats();

        let ahri = &stats["Ahri"];
        assert_eq!((ahri.games, ahri.wins, ahri.kills, ahri.deaths, ahri.assists), (2, 1, 6, 6, 10));
        assert_eq!(ahri.win_rate(), 50.0);
        assert!((ahri.kda() - 16.0 / 6.0).abs() < 1e-9);
        assert_eq!((ahri.avg_kills(), ahri.avg_deaths(), ahri.avg_assists()), (3.0, 3.0, 5.0));
    }

    #[test]
    fn top_champions_break_ties_by_first_encounter() {
        let mut tracker = ChampionStatsTracker::new();
        for champ in ["Zed", "Ahri", "Lux", "Ahri", "Zed", "Lux", "Yasuo"] {
            tracker.add_game(champ, true, 0, 0, 0);
        }
        let stats = tracker.into_stats();

        let names: Vec<&str> = top_champions(&stats, 3).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Ahri", "Lux"]);
    }

    #[test]
    fn deathless_champion_kda_floors_deaths_at_one() {
        let mut tracker = ChampionStatsTracker::new();
        tracker.add_game("Janna", true, 1, 0, 20);
        assert_eq!(tracker.into_stats()["Janna"].kda(), 21.0);
    }
}
