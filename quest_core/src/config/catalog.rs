//! Catalog - Map, class, enemy, object and treasure records

use super::ConfigError;
use crate::source::{EquipmentItem, StatTemplate};
use crate::types::ItemKind;
use crate::world::TileMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the data service hands to the game, already decoded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Tile grid, rows of 0 (forest) / 1 (road)
    #[serde(default)]
    pub map: Vec<Vec<u8>>,
    #[serde(default)]
    pub classes: Vec<StatTemplate>,
    #[serde(default)]
    pub enemies: Vec<StatTemplate>,
    #[serde(default)]
    pub objects: Vec<EquipmentItem>,
    /// One entry per chest, each holding the items offered in it
    #[serde(default)]
    pub treasures: Vec<Vec<EquipmentItem>>,
}

impl Catalog {
    /// Load and validate a catalog from a JSON file
    pub fn load_json(path: &Path) -> Result<Self, ConfigError> {
        let catalog: Catalog = super::load_json(path)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let catalog: Catalog = super::parse_json(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the map shape and that no chest is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        TileMap::from_grid(&self.map)?;
        if let Some(index) = self.treasures.iter().position(|t| t.is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "treasure chest {index} offers no items"
            )));
        }
        Ok(())
    }

    /// Build the tile map
    pub fn tile_map(&self) -> Result<TileMap, ConfigError> {
        TileMap::from_grid(&self.map)
    }

    /// Enemy templates typed "basic", or untyped
    ///
    /// Templates of any other non-boss type are never spawned.
    pub fn basic_enemies(&self) -> Vec<StatTemplate> {
        self.enemies
            .iter()
            .filter(|e| match e.kind.as_deref() {
                None => true,
                Some(t) if t.eq_ignore_ascii_case("basic") => true,
                Some(t) => {
                    if !e.tier().is_boss() {
                        log::debug!("Skipping enemy {} with type {:?}", e.name, t);
                    }
                    false
                }
            })
            .cloned()
            .collect()
    }

    /// Boss templates
    pub fn bosses(&self) -> Vec<StatTemplate> {
        self.enemies
            .iter()
            .filter(|e| e.tier().is_boss())
            .cloned()
            .collect()
    }

    /// Ground objects of one kind
    pub fn objects_of_kind(&self, kind: &ItemKind) -> Vec<EquipmentItem> {
        self.objects
            .iter()
            .filter(|o| &o.kind == kind)
            .cloned()
            .collect()
    }

    /// Look up a class by name (case-insensitive)
    pub fn class_named(&self, name: &str) -> Option<&StatTemplate> {
        self.classes
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "map": [[0, 1, 0], [1, 1, 1], [0, 1, 0]],
        "classes": [
            {"name": "Warrior", "hp": 30, "armor": 5, "atk": 4, "speed": 2, "hits": 1},
            {"name": "Mage", "hp": 15, "atk": 7, "speed": 4}
        ],
        "enemies": [
            {"name": "Goblin", "hp": 8, "attack": 2, "speed": 1, "type": "basic"},
            {"name": "Dragon", "hp": 60, "attack": 8, "speed": 3, "type": "boss"}
        ],
        "objects": [
            {"name": "Sword", "type": "weapon", "atk": 3},
            {"name": "Ring", "type": "jewelry", "speed": 1},
            {"name": "Cape", "type": "item", "armor": 2}
        ],
        "treasures": [
            [
                {"name": "Axe", "type": "weapon", "atk": 6},
                {"name": "Amulet", "type": "jewelry", "hp": 5},
                {"name": "Shield", "type": "item", "armor": 4}
            ]
        ]
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::from_json_str(CATALOG).unwrap();

        assert_eq!(catalog.classes.len(), 2);
        assert_eq!(catalog.basic_enemies().len(), 1);
        assert_eq!(catalog.bosses()[0].name, "Dragon");
        assert_eq!(catalog.objects_of_kind(&ItemKind::Weapon).len(), 1);
        assert_eq!(catalog.treasures[0].len(), 3);
        assert!(catalog.class_named("mage").is_some());
    }

    #[test]
    fn test_only_basic_or_untyped_enemies_are_basic() {
        let json = r#"{
            "map": [[1]],
            "enemies": [
                {"name": "Goblin", "type": "basic"},
                {"name": "Rat"},
                {"name": "Knight", "type": "elite"},
                {"name": "Dragon", "type": "boss"}
            ]
        }"#;
        let catalog = Catalog::from_json_str(json).unwrap();

        let basics: Vec<_> = catalog.basic_enemies().into_iter().map(|e| e.name).collect();
        assert_eq!(basics, vec!["Goblin", "Rat"]);
        let bosses: Vec<_> = catalog.bosses().into_iter().map(|e| e.name).collect();
        assert_eq!(bosses, vec!["Dragon"]);
    }

    #[test]
    fn test_empty_treasure_rejected() {
        let json = r#"{"map": [[1]], "treasures": [[]]}"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_ragged_map_rejected() {
        let json = r#"{"map": [[1, 1], [1]]}"#;
        assert!(Catalog::from_json_str(json).is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = Catalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::JsonError(_)));
    }
}
