use std::collections::HashMap;

use crate::api::models::DataDragonChampions;

/// Champion id to display name, built from Data Dragon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChampionCatalog {
    names: HashMap<i64, String>,
}

impl ChampionCatalog {
    pub fn from_data_dragon(data: &DataDragonChampions) -> Self {
        let names = data
            .data
            .values()
            .filter_map(|info| info.key.parse::<i64>().ok().map(|key| (key, info.name.clone())))
            .collect();
        ChampionCatalog { names }
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        ChampionCatalog {
            names: pairs.into_iter().map(|(id, name)| (id, name.into())).collect(),
        }
    }

    /// Unknown ids still produce a stable, readable label.
    pub fn name_for(&self, champion_id: i64) -> String {
        self.names
            .get(&champion_id)
            .cloned()
            .unwrap_or_else(|| format!("Champion #{}", champion_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dragon_keys_become_numeric_ids() {
        let raw = r#"{"data": {
            "Ahri": {"id": "Ahri", "name": "Ahri", "key": "103"},
            "MonkeyKing": {"id": "MonkeyKing", "name": "Wukong", "key": "62"}
        }}"#;
        let data: DataDragonChampions = serde_json::from_str(raw).unwrap();
        let catalog = ChampionCatalog::from_data_dragon(&data);

        assert_eq!(catalog.name_for(103), "Ahri");
        assert_eq!(catalog.name_for(62), "Wukong");
        assert_eq!(catalog.name_for(9999), "Champion #9999");
    }
}
