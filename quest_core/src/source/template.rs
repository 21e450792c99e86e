//! Class and enemy templates as delivered by the catalog

use crate::types::EnemyTier;
use serde::{Deserialize, Serialize};

/// Resolved base values of the five attributes
///
/// Copied by value into every character built from a template, so two
/// characters never share stat state through a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    #[serde(default = "default_health")]
    pub health: i32,
    #[serde(default)]
    pub shield: i32,
    #[serde(default = "default_attack")]
    pub attack: i32,
    #[serde(default)]
    pub speed: i32,
    #[serde(default = "default_hit_count")]
    pub hit_count: i32,
}

impl Default for BaseStats {
    fn default() -> Self {
        BaseStats {
            health: default_health(),
            shield: 0,
            attack: default_attack(),
            speed: 0,
            hit_count: default_hit_count(),
        }
    }
}

fn default_health() -> i32 {
    10
}
fn default_attack() -> i32 {
    1
}
fn default_hit_count() -> i32 {
    1
}

/// A class or enemy record: `{ name, hp, armor, atk, speed, hits, type }`
///
/// Every numeric field is optional. Enemy records spell attack as `attack`,
/// class records as `atk`; both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hp: Option<i32>,
    #[serde(default)]
    pub armor: Option<i32>,
    #[serde(default, alias = "attack")]
    pub atk: Option<i32>,
    #[serde(default)]
    pub speed: Option<i32>,
    #[serde(default)]
    pub hits: Option<i32>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Sprite identifier, passed through for renderers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_name: Option<String>,
}

impl StatTemplate {
    /// Create a named template with no stats set
    pub fn named(name: impl Into<String>) -> Self {
        StatTemplate {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Resolve to concrete base stats
    ///
    /// A field that is absent or zero takes the fallback value.
    pub fn resolve(&self, defaults: &BaseStats) -> BaseStats {
        fn pick(value: Option<i32>, fallback: i32) -> i32 {
            match value {
                Some(v) if v != 0 => v,
                _ => fallback,
            }
        }

        BaseStats {
            health: pick(self.hp, defaults.health),
            shield: pick(self.armor, defaults.shield),
            attack: pick(self.atk, defaults.attack),
            speed: pick(self.speed, defaults.speed),
            hit_count: pick(self.hits, defaults.hit_count),
        }
    }

    /// Enemy rank from the `type` field
    pub fn tier(&self) -> EnemyTier {
        EnemyTier::from_type_name(self.kind.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let template = StatTemplate::named("Nobody");
        let base = template.resolve(&BaseStats::default());

        assert_eq!(base.health, 10);
        assert_eq!(base.shield, 0);
        assert_eq!(base.attack, 1);
        assert_eq!(base.speed, 0);
        assert_eq!(base.hit_count, 1);
    }

    #[test]
    fn test_zero_fields_fall_back() {
        let template = StatTemplate {
            hp: Some(0),
            atk: Some(0),
            ..StatTemplate::named("Hollow")
        };
        let base = template.resolve(&BaseStats::default());
        assert_eq!(base.health, 10);
        assert_eq!(base.attack, 1);
    }

    #[test]
    fn test_parse_class_record() {
        let json = r#"{"name":"Warrior","hp":30,"armor":5,"atk":4,"speed":2,"hits":1}"#;
        let template: StatTemplate = serde_json::from_str(json).unwrap();
        let base = template.resolve(&BaseStats::default());

        assert_eq!(
            base,
            BaseStats {
                health: 30,
                shield: 5,
                attack: 4,
                speed: 2,
                hit_count: 1
            }
        );
    }

    #[test]
    fn test_parse_enemy_record_with_attack_alias() {
        let json = r#"{"name":"Dragon","hp":80,"attack":9,"type":"boss","meta_name":"dragon"}"#;
        let template: StatTemplate = serde_json::from_str(json).unwrap();

        assert_eq!(template.atk, Some(9));
        assert_eq!(template.tier(), EnemyTier::Boss);
        assert_eq!(template.meta_name.as_deref(), Some("dragon"));
    }

    #[test]
    fn test_base_stats_toml_defaults() {
        let base: BaseStats = toml::from_str("health = 25").unwrap();
        assert_eq!(base.health, 25);
        assert_eq!(base.attack, 1);
        assert_eq!(base.hit_count, 1);
    }
}
