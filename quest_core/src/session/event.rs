//! Session events - What happened during one player action

use crate::combat::CombatOutcome;
use crate::source::EquipmentItem;
use crate::types::{Direction, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Exploring,
    /// A chest is open and waits for `choose_treasure`
    ChoosingTreasure,
    Victory,
    GameOver,
}

impl SessionStatus {
    /// Whether the session has ended
    pub fn is_over(&self) -> bool {
        matches!(self, SessionStatus::Victory | SessionStatus::GameOver)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStatus::Exploring => "exploring",
            SessionStatus::ChoosingTreasure => "choosing treasure",
            SessionStatus::Victory => "victory",
            SessionStatus::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// One outcome of a player action, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Moved {
        from: Position,
        to: Position,
    },
    /// Forest or map edge in the way
    Blocked {
        at: Position,
        direction: Direction,
    },
    Combat {
        enemy: String,
        outcome: CombatOutcome,
    },
    EnemyDefeated {
        name: String,
        boss: bool,
    },
    PlayerDefeated {
        by: String,
    },
    ClassChanged {
        class: String,
    },
    ItemEquipped {
        item: String,
        replaced: Option<String>,
    },
    /// No inventory slot takes this item
    ItemRejected {
        item: String,
    },
    TreasureOpened {
        items: Vec<EquipmentItem>,
    },
    BossSpawned {
        name: String,
        position: Position,
    },
    Victory,
}
