// Endpoint URL builders for the Riot Games API and Data Dragon.
// Platform-scoped endpoints use the platform id (euw1, na1, ...), match and
// account endpoints use the regional routing value (europe, americas, ...).

use crate::error::AppError;

/// Ranked Solo/Duo queue id used for match-id filtering.
pub const RANKED_SOLO_QUEUE_ID: u32 = 420;
/// Queue type string used by league-v4 entries.
pub const RANKED_SOLO_QUEUE_TYPE: &str = "RANKED_SOLO_5x5";

const PLATFORMS: &[(&str, &str)] = &[
    ("EUW", "euw1"),
    ("EUN", "eun1"),
    ("NA", "na1"),
    ("KR", "kr"),
    ("BR", "br1"),
    ("JP", "jp1"),
    ("LA1", "la1"),
    ("LA2", "la2"),
    ("OC", "oc1"),
    ("TR", "tr1"),
    ("RU", "ru"),
    ("PH", "ph2"),
    ("SG", "sg2"),
    ("TH", "th2"),
    ("TW", "tw2"),
    ("VN", "vn2"),
];

/// Accepts either a short region name (`EUW`) or a platform id (`euw1`).
pub fn platform_id(region: &str) -> Result<&'static str, AppError> {
    let wanted = region.trim();
    PLATFORMS
        .iter()
        .find(|(short, platform)| short.eq_ignore_ascii_case(wanted) || platform.eq_ignore_ascii_case(wanted))
        .map(|(_, platform)| *platform)
        .ok_or_else(|| AppError::ConfigError(format!("unknown region '{}'", region)))
}

pub fn regional_routing(platform: &str) -> &'static str {
    match platform {
        "na1" | "br1" | "la1" | "la2" => "americas",
        "euw1" | "eun1" | "tr1" | "ru" => "europe",
        "kr" | "jp1" => "asia",
        "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
        _ => "europe",
    }
}

fn platform_base(platform: &str) -> String {
    format!("https://{}.api.riotgames.com", platform)
}

fn regional_base(platform: &str) -> String {
    format!("https://{}.api.riotgames.com", regional_routing(platform))
}

pub fn account_by_riot_id(platform: &str, game_name: &str, tag_line: &str) -> String {
    format!(
        "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
        regional_base(platform),
        urlencoding::encode(game_name),
        urlencoding::encode(tag_line)
    )
}

pub fn league_entries_by_puuid(platform: &str, puuid: &str) -> String {
    format!("{}/lol/league/v4/entries/by-puuid/{}", platform_base(platform), puuid)
}

pub fn match_ids_by_puuid(platform: &str, puuid: &str, count: usize, queue: Option<u32>) -> String {
    let mut url = format!(
        "{}/lol/match/v5/matches/by-puuid/{}/ids?count={}",
        regional_base(platform),
        puuid,
        count
    );
    if let Some(queue) = queue {
        url.push_str(&format!("&queue={}", queue));
    }
    url
}

pub fn match_by_id(platform: &str, match_id: &str) -> String {
    format!("{}/lol/match/v5/matches/{}", regional_base(platform), match_id)
}

pub fn active_game_by_puuid(platform: &str, puuid: &str) -> String {
    format!(
        "{}/lol/spectator/v5/active-games/by-summoner/{}",
        platform_base(platform),
        puuid
    )
}

pub fn champion_masteries_by_puuid(platform: &str, puuid: &str, count: usize) -> String {
    format!(
        "{}/lol/champion-mastery/v4/champion-masteries/by-puuid/{}/top?count={}",
        platform_base(platform),
        puuid,
        count
    )
}

pub fn data_dragon_champions(version: &str) -> String {
    format!(
        "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/champion.json",
        version
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_lookup_uses_regional_host_and_encodes_name() {
        let url = account_by_riot_id("euw1", "Hide on bush", "KR1");
        assert_eq!(
            url,
            "https://europe.api.riotgames.com/riot/account/v1/accounts/by-riot-id/Hide%20on%20bush/KR1"
        );
    }

    #[test]
    fn account_lookup_encodes_reserved_and_non_ascii_characters() {
        let url = account_by_riot_id("kr", "페이커/#?", "KR 1");
        assert!(url.ends_with("/by-riot-id/%ED%8E%98%EC%9D%B4%EC%BB%A4%2F%23%3F/KR%201"));
    }

    #[test]
    fn match_ids_carry_queue_filter_when_given() {
        let url = match_ids_by_puuid("kr", "abc", 20, Some(RANKED_SOLO_QUEUE_ID));
        assert_eq!(
            url,
            "https://asia.api.riotgames.com/lol/match/v5/matches/by-puuid/abc/ids?count=20&queue=420"
        );
        assert!(!match_ids_by_puuid("kr", "abc", 5, None).contains("queue"));
    }

    #[test]
    fn spectator_uses_platform_host() {
        assert_eq!(
            active_game_by_puuid("na1", "p"),
            "https://na1.api.riotgames.com/lol/spectator/v5/active-games/by-summoner/p"
        );
    }
}
