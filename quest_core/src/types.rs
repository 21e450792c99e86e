//! Core types shared across quest_core

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five tracked attributes of a StatBlock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Health,
    Shield,
    Attack,
    Speed,
    HitCount,
}

impl Attribute {
    /// Get all attributes
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::Health,
            Attribute::Shield,
            Attribute::Attack,
            Attribute::Speed,
            Attribute::HitCount,
        ]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::Health => "health",
            Attribute::Shield => "shield",
            Attribute::Attack => "attack",
            Attribute::Speed => "speed",
            Attribute::HitCount => "hit count",
        };
        f.write_str(name)
    }
}

/// Semantic type of an equipment item, deciding which inventory slot takes it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    /// The single general-purpose slot ("item" in catalog data)
    General,
    Weapon,
    Jewelry,
    /// Anything the catalog sends that matches no slot
    Unknown(String),
}

impl From<String> for ItemKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "item" | "general-item" | "general_item" => ItemKind::General,
            "weapon" => ItemKind::Weapon,
            "jewelry" => ItemKind::Jewelry,
            _ => ItemKind::Unknown(s),
        }
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::General => "item".to_string(),
            ItemKind::Weapon => "weapon".to_string(),
            ItemKind::Jewelry => "jewelry".to_string(),
            ItemKind::Unknown(s) => s,
        }
    }
}

/// Enemy rank taken from the template's `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyTier {
    #[default]
    Basic,
    Boss,
}

impl EnemyTier {
    /// Parse the catalog `type` string; anything other than "boss" is basic
    pub fn from_type_name(name: Option<&str>) -> Self {
        match name {
            Some(t) if t.eq_ignore_ascii_case("boss") => EnemyTier::Boss,
            _ => EnemyTier::Basic,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, EnemyTier::Boss)
    }
}

/// A tile coordinate on the map (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Euclidean distance in tiles
    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Movement direction for one step of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Parse a movement key: U, D, L or R (case-insensitive)
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'u' => Some(Direction::Up),
            'd' => Some(Direction::Down),
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            _ => None,
        }
    }
}
