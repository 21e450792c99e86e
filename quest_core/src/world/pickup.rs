//! Things lying on the map that trigger once when the player steps on them

use crate::source::{EquipmentItem, StatTemplate};
use crate::types::Position;
use serde::{Deserialize, Serialize};

/// An orb that switches the player to its class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassOrb {
    pub position: Position,
    pub class: StatTemplate,
    pub collected: bool,
}

impl ClassOrb {
    pub fn new(class: StatTemplate, position: Position) -> Self {
        ClassOrb {
            position,
            class,
            collected: false,
        }
    }

    /// Whether stepping on `pos` triggers this orb
    pub fn triggers_at(&self, pos: Position) -> bool {
        !self.collected && self.position == pos
    }

    /// Mark collected and hand out the class
    pub fn collect(&mut self) -> &StatTemplate {
        self.collected = true;
        &self.class
    }
}

/// A piece of equipment lying on the ground
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundItem {
    pub position: Position,
    pub item: EquipmentItem,
    pub collected: bool,
}

impl GroundItem {
    pub fn new(item: EquipmentItem, position: Position) -> Self {
        GroundItem {
            position,
            item,
            collected: false,
        }
    }

    pub fn triggers_at(&self, pos: Position) -> bool {
        !self.collected && self.position == pos
    }

    pub fn collect(&mut self) -> &EquipmentItem {
        self.collected = true;
        &self.item
    }
}

/// A chest offering a choice between several items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasureChest {
    pub position: Position,
    pub items: Vec<EquipmentItem>,
    pub opened: bool,
}

impl TreasureChest {
    pub fn new(items: Vec<EquipmentItem>, position: Position) -> Self {
        TreasureChest {
            position,
            items,
            opened: false,
        }
    }

    pub fn triggers_at(&self, pos: Position) -> bool {
        !self.opened && self.position == pos
    }

    /// Open the chest and return the items on offer
    pub fn open(&mut self) -> &[EquipmentItem] {
        self.opened = true;
        &self.items
    }
}
