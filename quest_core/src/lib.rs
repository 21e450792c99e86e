//! quest_core - Core rules for a tile-based exploration game
//!
//! This library provides:
//! - StatBlock: Current and maximum values with shield-first damage absorption
//! - EquipmentItem: Catalog gear applied to and removed from a StatBlock
//! - Inventory: One general item, one weapon and two jewelry slots
//! - Character: Player or enemy, with class changes that keep gear bonuses
//! - Combat: Deterministic turn-based resolution between two characters
//! - GameSession: Movement, spawning, pickups and treasure choices on a tile map

pub mod character;
pub mod combat;
pub mod config;
pub mod inventory;
pub mod prelude;
pub mod session;
pub mod source;
pub mod stat_block;
pub mod types;
pub mod world;

// Re-export core types for convenience
pub use character::{Character, CharacterKind};
pub use combat::{start_combat, start_combat_with, Combat, CombatObserver, CombatOutcome, Side};
pub use config::{Catalog, ConfigError, GameRules};
pub use inventory::{EquipOutcome, Inventory};
pub use session::{GameEvent, GameSession, SessionError, SessionStatus};
pub use source::{BaseStats, EquipmentItem, StatSource, StatTemplate};
pub use stat_block::{DamageReport, StatBlock, StatValue};
pub use types::{Attribute, Direction, EnemyTier, ItemKind, Position};
pub use world::{Tile, TileMap};
