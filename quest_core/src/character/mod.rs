//! Character - A player or an enemy owning one StatBlock

use crate::inventory::{EquipOutcome, Inventory};
use crate::source::{BaseStats, EquipmentItem, StatSource, StatTemplate};
use crate::stat_block::{DamageReport, StatBlock};
use crate::types::EnemyTier;
use serde::{Deserialize, Serialize};

/// Name used for a player created without a class
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Player-only state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub inventory: Inventory,
    /// Class currently held, `None` for the classless starting player
    pub current_class: Option<StatTemplate>,
    /// Stats of the current class before any equipment bonus
    pub base_stats: BaseStats,
    /// Fallbacks used when a class template leaves a field out
    defaults: BaseStats,
}

/// Enemy-only state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyState {
    pub template: StatTemplate,
    pub tier: EnemyTier,
}

/// What kind of character this is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterKind {
    Player(PlayerState),
    Enemy(EnemyState),
}

/// A combatant: player or enemy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    name: String,
    stats: StatBlock,
    kind: CharacterKind,
    /// Terminal flag; a dead character is never revived
    dead: bool,
}

impl Character {
    /// Create a player, optionally starting with a class
    pub fn player(class: Option<&StatTemplate>, defaults: &BaseStats) -> Self {
        let base_stats = class
            .map(|c| c.resolve(defaults))
            .unwrap_or(*defaults);
        let name = class
            .map(|c| c.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string());

        if let Some(class) = class {
            log::info!("Starting class: {} ({:?})", class.name, base_stats);
        }

        Character {
            name,
            stats: StatBlock::from_base(&base_stats),
            kind: CharacterKind::Player(PlayerState {
                inventory: Inventory::new(),
                current_class: class.cloned(),
                base_stats,
                defaults: *defaults,
            }),
            dead: false,
        }
    }

    /// Create an enemy from its catalog template
    pub fn enemy(template: &StatTemplate, defaults: &BaseStats) -> Self {
        let base_stats = template.resolve(defaults);
        Character {
            name: template.name.clone(),
            stats: StatBlock::from_base(&base_stats),
            kind: CharacterKind::Enemy(EnemyState {
                template: template.clone(),
                tier: template.tier(),
            }),
            dead: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    /// Direct stat access for callers that manage their own bookkeeping
    pub fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    pub fn kind(&self) -> &CharacterKind {
        &self.kind
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, CharacterKind::Player(_))
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, CharacterKind::Enemy(_))
    }

    /// Whether this is a boss enemy
    pub fn is_boss(&self) -> bool {
        match &self.kind {
            CharacterKind::Enemy(enemy) => enemy.tier.is_boss(),
            CharacterKind::Player(_) => false,
        }
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.kind {
            CharacterKind::Player(state) => Some(state),
            CharacterKind::Enemy(_) => None,
        }
    }

    pub fn inventory(&self) -> Option<&Inventory> {
        self.player_state().map(|p| &p.inventory)
    }

    pub fn current_class(&self) -> Option<&StatTemplate> {
        self.player_state().and_then(|p| p.current_class.as_ref())
    }

    pub fn base_stats(&self) -> Option<&BaseStats> {
        self.player_state().map(|p| &p.base_stats)
    }

    /// Apply damage through the StatBlock; reaching 0 health marks the
    /// character dead
    pub fn apply_damage(&mut self, amount: u32) -> DamageReport {
        let report = self.stats.apply_damage(amount);
        self.settle_death();
        report
    }

    /// Latch the dead flag once health is depleted
    fn settle_death(&mut self) {
        if self.stats.is_depleted() && !self.dead {
            log::info!("{} has died ({})", self.name, self.stats.summary());
            self.dead = true;
        }
    }

    /// Whether the character is dead (health hit 0, or marked by the game)
    pub fn is_dead(&self) -> bool {
        self.dead || self.stats.is_depleted()
    }

    /// Mark the character dead
    pub fn mark_dead(&mut self) {
        self.dead = true;
    }

    /// Equip an item, keeping stats consistent with the inventory
    ///
    /// The replaced item's bonuses are removed before the new item's bonuses
    /// are applied. Enemies have no inventory and reject every item.
    pub fn equip(&mut self, item: EquipmentItem) -> EquipOutcome {
        let CharacterKind::Player(player) = &mut self.kind else {
            log::debug!("{} has no inventory, ignoring {}", self.name, item.name);
            return EquipOutcome::Rejected;
        };

        let outcome = player.inventory.equip(item.clone());
        match &outcome {
            EquipOutcome::Equipped { replaced } => {
                if let Some(old) = replaced {
                    old.remove(&mut self.stats);
                    log::info!("Replaced: {}", old.id());
                }
                item.apply(&mut self.stats);
                log::info!("Equipped: {} ({})", item.id(), String::from(item.kind.clone()));
            }
            EquipOutcome::Rejected => {
                log::debug!("No slot accepts {}, ignoring", item.id());
            }
        }
        // Losing a health bonus can take a wounded player to 0
        self.settle_death();
        outcome
    }

    /// Switch the player to a new class
    ///
    /// Equipment bonuses are defined relative to the class base stats, so all
    /// of them are stripped, the stats are reset to the new class, and the
    /// bonuses are applied again on top. Returns false for enemies and for
    /// dead players, who are never revived by the reset.
    pub fn change_class(&mut self, class: &StatTemplate) -> bool {
        if self.is_dead() {
            log::debug!("{} is dead, ignoring class change to {}", self.name, class.name);
            return false;
        }
        let CharacterKind::Player(player) = &mut self.kind else {
            return false;
        };

        log::info!("Class change: {}", class.name);
        log::debug!("Stats before class change: {}", self.stats.summary());

        let equipped: Vec<EquipmentItem> = player.inventory.equipped().cloned().collect();
        for item in &equipped {
            item.remove(&mut self.stats);
        }

        let base_stats = class.resolve(&player.defaults);
        self.stats.reset_to(&base_stats);
        player.base_stats = base_stats;

        for item in &equipped {
            item.apply(&mut self.stats);
        }

        player.current_class = Some(class.clone());
        if !class.name.is_empty() {
            self.name = class.name.clone();
        }

        log::debug!("Stats after class change: {}", self.stats.summary());
        self.settle_death();
        true
    }
}
