//! Prelude module for convenient imports
//!
//! ```rust
//! use quest_core::prelude::*;
//! ```

// Core types
pub use crate::stat_block::{StatBlock, StatValue};
pub use crate::types::{Attribute, Direction, ItemKind, Position};

// Characters and equipment
pub use crate::character::Character;
pub use crate::inventory::{EquipOutcome, Inventory};
pub use crate::source::{BaseStats, EquipmentItem, StatSource, StatTemplate};

// Combat
pub use crate::combat::{start_combat, start_combat_with, CombatObserver, CombatOutcome, Side};

// World and session
pub use crate::config::{Catalog, GameRules};
pub use crate::session::{GameEvent, GameSession, SessionStatus};
pub use crate::world::TileMap;
