//! EquipmentItem - Gear records and the bonuses they grant

use crate::source::StatSource;
use crate::types::{Attribute, ItemKind};
use serde::{Deserialize, Serialize};

/// A piece of gear: `{ name, type, atk?, armor?, speed?, hp? }`
///
/// Immutable once loaded; inventories hold their own copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub atk: i32,
    /// Armor bonus, granted as shield
    #[serde(default)]
    pub armor: i32,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub hp: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_name: Option<String>,
}

impl EquipmentItem {
    /// Create an item with no bonuses
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        EquipmentItem {
            name: name.into(),
            kind,
            atk: 0,
            armor: 0,
            speed: 0,
            hp: 0,
            meta_name: None,
        }
    }

    pub fn with_atk(mut self, atk: i32) -> Self {
        self.atk = atk;
        self
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self
    }
}

impl StatSource for EquipmentItem {
    fn id(&self) -> &str {
        &self.name
    }

    fn bonuses(&self) -> Vec<(Attribute, i32)> {
        [
            (Attribute::Attack, self.atk),
            (Attribute::Shield, self.armor),
            (Attribute::Speed, self.speed),
            (Attribute::Health, self.hp),
        ]
        .into_iter()
        .filter(|(_, bonus)| *bonus != 0)
        .collect()
    }
}
