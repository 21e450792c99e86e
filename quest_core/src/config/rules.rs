//! Tunable game rules

use super::ConfigError;
use crate::source::BaseStats;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All tunable rules, loadable from a TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRules {
    #[serde(default)]
    pub combat: CombatRules,
    #[serde(default)]
    pub stats: StatRules,
    #[serde(default)]
    pub spawn: SpawnRules,
}

impl GameRules {
    /// Load and validate rules from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let rules: GameRules = super::load_toml(path)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Parse and validate rules from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let rules: GameRules = super::parse_toml(content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject rule sets that would break the game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.combat.min_damage == 0 {
            return Err(ConfigError::ValidationError(
                "combat.min_damage must be at least 1, otherwise a fight can never end".to_string(),
            ));
        }
        if self.spawn.object_ratio <= 0.0 {
            return Err(ConfigError::ValidationError(
                "spawn.object_ratio must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRules {
    /// Lowest damage a single hit can deal, whatever the attacker's attack
    #[serde(default = "default_min_damage")]
    pub min_damage: u32,
}

impl Default for CombatRules {
    fn default() -> Self {
        CombatRules {
            min_damage: default_min_damage(),
        }
    }
}

impl CombatRules {
    /// Damage dealt by one hit from an attacker with the given attack value
    ///
    /// Never below 1, so health strictly drops on every hit.
    pub fn damage_for(&self, attack: i32) -> u32 {
        let attack = u32::try_from(attack).unwrap_or(0);
        attack.max(self.min_damage).max(1)
    }
}

fn default_min_damage() -> u32 {
    1
}

/// Fallback stats for template fields the catalog leaves out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRules {
    #[serde(default)]
    pub class_defaults: BaseStats,
    #[serde(default)]
    pub enemy_defaults: BaseStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRules {
    /// Basic enemies placed when a session starts
    #[serde(default = "default_basic_enemy_count")]
    pub basic_enemy_count: usize,
    /// Orbs placed for every class in the catalog
    #[serde(default = "default_orbs_per_class")]
    pub orbs_per_class: usize,
    /// Boss spawns within this many tiles of the player
    #[serde(default = "default_boss_spawn_radius")]
    pub boss_spawn_radius: f64,
    /// Base tiles-per-object ratio for ground item placement
    #[serde(default = "default_object_ratio")]
    pub object_ratio: f64,
    /// Floor on the number of ground items of each kind
    #[serde(default = "default_min_objects_per_kind")]
    pub min_objects_per_kind: usize,
}

impl Default for SpawnRules {
    fn default() -> Self {
        SpawnRules {
            basic_enemy_count: default_basic_enemy_count(),
            orbs_per_class: default_orbs_per_class(),
            boss_spawn_radius: default_boss_spawn_radius(),
            object_ratio: default_object_ratio(),
            min_objects_per_kind: default_min_objects_per_kind(),
        }
    }
}

fn default_basic_enemy_count() -> usize {
    5
}
fn default_orbs_per_class() -> usize {
    4
}
fn default_boss_spawn_radius() -> f64 {
    5.0
}
fn default_object_ratio() -> f64 {
    30.0
}
fn default_min_objects_per_kind() -> usize {
    5
}
