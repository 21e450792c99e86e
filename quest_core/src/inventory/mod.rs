//! Inventory - Fixed equipment slots for the player

use crate::source::EquipmentItem;
use crate::types::ItemKind;
use serde::{Deserialize, Serialize};

/// Number of jewelry slots
pub const JEWELRY_SLOTS: usize = 2;

/// Result of putting an item into the inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipOutcome {
    /// The item went into its slot; `replaced` is whatever it pushed out
    Equipped { replaced: Option<EquipmentItem> },
    /// No slot accepts this kind of item; nothing changed
    Rejected,
}

impl EquipOutcome {
    /// The evicted item, if any
    pub fn replaced(&self) -> Option<&EquipmentItem> {
        match self {
            EquipOutcome::Equipped { replaced } => replaced.as_ref(),
            EquipOutcome::Rejected => None,
        }
    }

    pub fn into_replaced(self) -> Option<EquipmentItem> {
        match self {
            EquipOutcome::Equipped { replaced } => replaced,
            EquipOutcome::Rejected => None,
        }
    }

    pub fn is_equipped(&self) -> bool {
        matches!(self, EquipOutcome::Equipped { .. })
    }
}

/// Player equipment: one general item, one weapon, up to two jewelry
///
/// Only tracks slot occupancy. Stat bonuses are applied by the owning
/// character, which removes the replaced item's bonuses before applying the
/// new item's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    general_item: Option<EquipmentItem>,
    weapon: Option<EquipmentItem>,
    jewelry: Vec<EquipmentItem>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an item into the slot matching its kind
    ///
    /// General items and weapons swap out whatever held the slot. Jewelry
    /// fills free slots first; once both are taken the item at index 0 is
    /// replaced.
    pub fn equip(&mut self, item: EquipmentItem) -> EquipOutcome {
        match item.kind {
            ItemKind::General => EquipOutcome::Equipped {
                replaced: self.general_item.replace(item),
            },
            ItemKind::Weapon => EquipOutcome::Equipped {
                replaced: self.weapon.replace(item),
            },
            ItemKind::Jewelry => {
                if self.jewelry.len() < JEWELRY_SLOTS {
                    self.jewelry.push(item);
                    EquipOutcome::Equipped { replaced: None }
                } else {
                    let replaced = std::mem::replace(&mut self.jewelry[0], item);
                    EquipOutcome::Equipped {
                        replaced: Some(replaced),
                    }
                }
            }
            ItemKind::Unknown(_) => EquipOutcome::Rejected,
        }
    }

    pub fn general_item(&self) -> Option<&EquipmentItem> {
        self.general_item.as_ref()
    }

    pub fn weapon(&self) -> Option<&EquipmentItem> {
        self.weapon.as_ref()
    }

    pub fn jewelry(&self) -> &[EquipmentItem] {
        &self.jewelry
    }

    /// All equipped items: general item, weapon, then jewelry in slot order
    pub fn equipped(&self) -> impl Iterator<Item = &EquipmentItem> {
        self.general_item
            .iter()
            .chain(self.weapon.iter())
            .chain(self.jewelry.iter())
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.equipped().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
