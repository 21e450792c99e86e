//! Spawner - Random placement of enemies and pickups on road tiles

use super::map::{ObjectCounts, TileMap};
use super::pickup::{ClassOrb, GroundItem, TreasureChest};
use crate::character::Character;
use crate::source::{BaseStats, EquipmentItem, StatTemplate};
use crate::types::{ItemKind, Position};
use rand::seq::SliceRandom;
use rand::Rng;

/// An enemy standing on the map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemySpawn {
    pub position: Position,
    pub character: Character,
}

impl EnemySpawn {
    /// Whether this living enemy stands on `pos`
    pub fn triggers_at(&self, pos: Position) -> bool {
        !self.character.is_dead() && self.position == pos
    }
}

/// Picks random road tiles, never the one the player stands on
pub struct Spawner<'a> {
    map: &'a TileMap,
    avoid: Position,
}

impl<'a> Spawner<'a> {
    pub fn new(map: &'a TileMap, avoid: Position) -> Self {
        Spawner { map, avoid }
    }

    fn candidates(&self) -> Vec<Position> {
        self.map
            .road_tiles()
            .into_iter()
            .filter(|p| *p != self.avoid)
            .collect()
    }

    /// Any road tile other than the avoided one; the origin if there is none
    pub fn random_road_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        match self.candidates().choose(rng) {
            Some(pos) => *pos,
            None => {
                log::warn!("No road tile available for spawning, using the origin");
                Position::default()
            }
        }
    }

    /// A road tile within `radius` tiles of the avoided one
    ///
    /// Falls back to any road tile when none lies inside the radius.
    pub fn random_road_position_within<R: Rng + ?Sized>(&self, radius: f64, rng: &mut R) -> Position {
        let nearby: Vec<Position> = self
            .candidates()
            .into_iter()
            .filter(|p| p.distance_to(self.avoid) <= radius)
            .collect();

        match nearby.choose(rng) {
            Some(pos) => *pos,
            None => self.random_road_position(rng),
        }
    }

    /// Place `count` basic enemies drawn (with repeats) from `templates`
    pub fn spawn_enemies<R: Rng + ?Sized>(
        &self,
        templates: &[StatTemplate],
        count: usize,
        defaults: &BaseStats,
        rng: &mut R,
    ) -> Vec<EnemySpawn> {
        let mut enemies = Vec::with_capacity(count);
        if templates.is_empty() {
            return enemies;
        }

        for _ in 0..count {
            if let Some(template) = templates.choose(rng) {
                enemies.push(EnemySpawn {
                    position: self.random_road_position(rng),
                    character: Character::enemy(template, defaults),
                });
            }
        }

        log::info!(
            "Spawned {} enemies: {:?}",
            enemies.len(),
            enemies.iter().map(|e| e.character.name()).collect::<Vec<_>>()
        );
        enemies
    }

    /// Place one random boss near the avoided tile
    pub fn spawn_boss<R: Rng + ?Sized>(
        &self,
        bosses: &[StatTemplate],
        radius: f64,
        defaults: &BaseStats,
        rng: &mut R,
    ) -> Option<EnemySpawn> {
        let Some(template) = bosses.choose(rng) else {
            log::warn!("No boss available to spawn");
            return None;
        };

        let position = self.random_road_position_within(radius, rng);
        log::info!("BOSS SPAWNED: {} at {}", template.name, position);
        Some(EnemySpawn {
            position,
            character: Character::enemy(template, defaults),
        })
    }

    /// Place `per_class` orbs for every class
    pub fn spawn_class_orbs<R: Rng + ?Sized>(
        &self,
        classes: &[StatTemplate],
        per_class: usize,
        rng: &mut R,
    ) -> Vec<ClassOrb> {
        let orbs: Vec<ClassOrb> = classes
            .iter()
            .flat_map(|class| std::iter::repeat(class).take(per_class))
            .map(|class| ClassOrb::new(class.clone(), self.random_road_position(rng)))
            .collect();

        log::info!("Spawned {} class orbs", orbs.len());
        orbs
    }

    /// Place ground objects, drawing each kind without repeats
    pub fn spawn_objects<R: Rng + ?Sized>(
        &self,
        objects: &[EquipmentItem],
        counts: ObjectCounts,
        rng: &mut R,
    ) -> Vec<GroundItem> {
        let mut placed = Vec::new();
        for (kind, count) in [
            (ItemKind::General, counts.items),
            (ItemKind::Weapon, counts.weapons),
            (ItemKind::Jewelry, counts.jewelry),
        ] {
            let pool: Vec<&EquipmentItem> = objects.iter().filter(|o| o.kind == kind).collect();
            let chosen: Vec<EquipmentItem> = pool
                .choose_multiple(rng, count)
                .map(|item| (*item).clone())
                .collect();
            for item in chosen {
                placed.push(GroundItem::new(item, self.random_road_position(rng)));
            }
        }

        log::info!("Spawned {} objects", placed.len());
        placed
    }

    /// Place one chest per treasure record
    pub fn spawn_treasures<R: Rng + ?Sized>(
        &self,
        treasures: &[Vec<EquipmentItem>],
        rng: &mut R,
    ) -> Vec<TreasureChest> {
        let chests: Vec<TreasureChest> = treasures
            .iter()
            .map(|items| TreasureChest::new(items.clone(), self.random_road_position(rng)))
            .collect();

        log::info!("Spawned {} treasure chests", chests.len());
        chests
    }
}
