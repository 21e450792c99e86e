//! GameSession - One run of exploration on a tile map
//!
//! The session owns the player and everything placed on the map. Each
//! `move_player` call moves one tile and resolves whatever waits on the
//! destination: enemies are fought, orbs change the class, ground items are
//! equipped and chests pause the session until a treasure is chosen.

mod event;

pub use event::{GameEvent, SessionStatus};

use crate::character::Character;
use crate::combat::{start_combat_with, LogObserver};
use crate::config::{Catalog, ConfigError, GameRules};
use crate::source::{EquipmentItem, StatTemplate};
use crate::world::{
    object_counts_for_map_size, ClassOrb, EnemySpawn, GroundItem, Spawner, TileMap, TreasureChest,
};
use crate::types::{Direction, Position};
use rand::Rng;
use thiserror::Error;

/// Session action error
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No treasure choice is pending")]
    NoPendingChoice,
    #[error("Treasure choice {index} out of range, chest holds {len} item(s)")]
    ChoiceOutOfRange { index: usize, len: usize },
    #[error("A treasure choice must be made before moving")]
    ChoicePending,
    #[error("The session has ended ({0})")]
    SessionEnded(SessionStatus),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything placed on the map besides the player
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub enemies: Vec<EnemySpawn>,
    /// Boss templates held back until every basic enemy is dead
    pub bosses: Vec<StatTemplate>,
    pub orbs: Vec<ClassOrb>,
    pub items: Vec<GroundItem>,
    pub chests: Vec<TreasureChest>,
}

pub struct GameSession<R: Rng> {
    map: TileMap,
    player: Character,
    position: Position,
    enemies: Vec<EnemySpawn>,
    bosses: Vec<StatTemplate>,
    boss_spawned: bool,
    orbs: Vec<ClassOrb>,
    items: Vec<GroundItem>,
    chests: Vec<TreasureChest>,
    pending_treasure: Option<Vec<EquipmentItem>>,
    status: SessionStatus,
    rules: GameRules,
    rng: R,
}

impl<R: Rng> GameSession<R> {
    /// Start a session from a catalog, placing everything at random
    ///
    /// The player starts classless on the road tile nearest the map centre.
    pub fn new(catalog: &Catalog, rules: GameRules, mut rng: R) -> Result<Self, SessionError> {
        rules.validate()?;
        let map = catalog.tile_map()?;
        let start = map.center_road_position();

        let layout = {
            let spawner = Spawner::new(&map, start);
            let counts = object_counts_for_map_size(map.tile_count(), &rules.spawn);
            log::info!(
                "Placing up to {} objects on {} tiles: {:?}",
                counts.total(),
                map.tile_count(),
                counts
            );

            Layout {
                enemies: spawner.spawn_enemies(
                    &catalog.basic_enemies(),
                    rules.spawn.basic_enemy_count,
                    &rules.stats.enemy_defaults,
                    &mut rng,
                ),
                bosses: catalog.bosses(),
                orbs: spawner.spawn_class_orbs(&catalog.classes, rules.spawn.orbs_per_class, &mut rng),
                items: spawner.spawn_objects(&catalog.objects, counts, &mut rng),
                chests: spawner.spawn_treasures(&catalog.treasures, &mut rng),
            }
        };

        let player = Character::player(None, &rules.stats.class_defaults);
        Ok(Self::from_layout(map, player, start, layout, rules, rng))
    }

    /// Start a session with an explicit layout
    pub fn from_layout(
        map: TileMap,
        player: Character,
        start: Position,
        layout: Layout,
        rules: GameRules,
        rng: R,
    ) -> Self {
        log::info!("Session started at {} on a {}x{} map", start, map.width(), map.height());
        GameSession {
            map,
            player,
            position: start,
            enemies: layout.enemies,
            bosses: layout.bosses,
            boss_spawned: false,
            orbs: layout.orbs,
            items: layout.items,
            chests: layout.chests,
            pending_treasure: None,
            status: SessionStatus::Exploring,
            rules,
            rng,
        }
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn enemies(&self) -> &[EnemySpawn] {
        &self.enemies
    }

    pub fn orbs(&self) -> &[ClassOrb] {
        &self.orbs
    }

    pub fn items(&self) -> &[GroundItem] {
        &self.items
    }

    pub fn chests(&self) -> &[TreasureChest] {
        &self.chests
    }

    pub fn boss_spawned(&self) -> bool {
        self.boss_spawned
    }

    /// Items of the open chest, while a choice is pending
    pub fn pending_treasure(&self) -> Option<&[EquipmentItem]> {
        self.pending_treasure.as_deref()
    }

    /// Living basic enemies left on the map
    pub fn basic_enemies_alive(&self) -> usize {
        self.enemies
            .iter()
            .filter(|e| !e.character.is_boss() && !e.character.is_dead())
            .count()
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.status.is_over() {
            return Err(SessionError::SessionEnded(self.status));
        }
        Ok(())
    }

    /// Move the player one tile and resolve what waits there
    pub fn move_player(&mut self, direction: Direction) -> Result<Vec<GameEvent>, SessionError> {
        self.ensure_active()?;
        if self.status == SessionStatus::ChoosingTreasure {
            return Err(SessionError::ChoicePending);
        }

        let mut events = Vec::new();
        let target = self
            .map
            .neighbor(self.position, direction)
            .filter(|pos| self.map.is_walkable(*pos));

        let Some(to) = target else {
            log::debug!("Blocked moving {:?} from {}", direction, self.position);
            events.push(GameEvent::Blocked {
                at: self.position,
                direction,
            });
            return Ok(events);
        };

        events.push(GameEvent::Moved {
            from: self.position,
            to,
        });
        self.position = to;

        self.resolve_enemies(&mut events);
        if self.status.is_over() {
            return Ok(events);
        }
        self.resolve_orbs(&mut events);
        self.resolve_items(&mut events);
        if self.status.is_over() {
            return Ok(events);
        }
        self.resolve_chests(&mut events);
        self.check_boss_spawn(&mut events);

        Ok(events)
    }

    /// Equip the chosen item of the open chest and resume exploring
    pub fn choose_treasure(&mut self, index: usize) -> Result<Vec<GameEvent>, SessionError> {
        self.ensure_active()?;
        let items = self
            .pending_treasure
            .as_ref()
            .ok_or(SessionError::NoPendingChoice)?;
        let item = items
            .get(index)
            .cloned()
            .ok_or(SessionError::ChoiceOutOfRange {
                index,
                len: items.len(),
            })?;

        log::info!("Treasure chosen: {}", item.name);
        self.pending_treasure = None;
        self.status = SessionStatus::Exploring;

        let mut events = Vec::new();
        self.equip(item, &mut events);
        Ok(events)
    }

    fn resolve_enemies(&mut self, events: &mut Vec<GameEvent>) {
        let position = self.position;
        for spawn in self.enemies.iter_mut().filter(|e| e.triggers_at(position)) {
            let enemy = &mut spawn.character;
            let outcome = start_combat_with(&mut self.player, enemy, &self.rules.combat, &mut LogObserver);
            let enemy_name = enemy.name().to_string();
            let boss = enemy.is_boss();
            let player_won = outcome.attacker_won();

            events.push(GameEvent::Combat {
                enemy: enemy_name.clone(),
                outcome,
            });

            if !player_won {
                self.player.mark_dead();
                Self::end_with_player_death(&mut self.status, self.player.name(), &enemy_name, events);
                return;
            }

            enemy.mark_dead();
            events.push(GameEvent::EnemyDefeated {
                name: enemy_name.clone(),
                boss,
            });

            if boss {
                log::info!("VICTORY: {} defeated", enemy_name);
                events.push(GameEvent::Victory);
                self.status = SessionStatus::Victory;
                return;
            }
        }
    }

    fn resolve_orbs(&mut self, events: &mut Vec<GameEvent>) {
        let position = self.position;
        for orb in self.orbs.iter_mut().filter(|o| o.triggers_at(position)) {
            let class = orb.collect();
            if self.player.change_class(class) {
                events.push(GameEvent::ClassChanged {
                    class: class.name.clone(),
                });
            }
            if self.player.is_dead() {
                Self::end_with_player_death(&mut self.status, self.player.name(), &class.name, events);
                return;
            }
        }
    }

    fn resolve_items(&mut self, events: &mut Vec<GameEvent>) {
        let position = self.position;
        let picked: Vec<EquipmentItem> = self
            .items
            .iter_mut()
            .filter(|i| i.triggers_at(position))
            .map(|i| i.collect().clone())
            .collect();
        for item in picked {
            self.equip(item, events);
            if self.status.is_over() {
                return;
            }
        }
    }

    fn resolve_chests(&mut self, events: &mut Vec<GameEvent>) {
        let position = self.position;
        // One chest at a time; another on the same tile waits for the next visit
        if let Some(chest) = self.chests.iter_mut().find(|c| c.triggers_at(position)) {
            let items = chest.open().to_vec();
            log::info!("Treasure opened at {} with {} item(s)", position, items.len());
            events.push(GameEvent::TreasureOpened {
                items: items.clone(),
            });
            self.pending_treasure = Some(items);
            self.status = SessionStatus::ChoosingTreasure;
        }
    }

    fn check_boss_spawn(&mut self, events: &mut Vec<GameEvent>) {
        if self.boss_spawned || self.basic_enemies_alive() > 0 {
            return;
        }
        self.boss_spawned = true;

        let spawner = Spawner::new(&self.map, self.position);
        match spawner.spawn_boss(
            &self.bosses,
            self.rules.spawn.boss_spawn_radius,
            &self.rules.stats.enemy_defaults,
            &mut self.rng,
        ) {
            Some(boss) => {
                events.push(GameEvent::BossSpawned {
                    name: boss.character.name().to_string(),
                    position: boss.position,
                });
                self.enemies.push(boss);
            }
            None => {
                log::info!("VICTORY: every enemy defeated and no boss left");
                events.push(GameEvent::Victory);
                self.status = SessionStatus::Victory;
            }
        }
    }

    fn equip(&mut self, item: EquipmentItem, events: &mut Vec<GameEvent>) {
        let name = item.name.clone();
        let outcome = self.player.equip(item);
        if !outcome.is_equipped() {
            events.push(GameEvent::ItemRejected { item: name });
            return;
        }

        let replaced = outcome.into_replaced().map(|old| old.name);
        let cause = replaced.clone().unwrap_or_else(|| name.clone());
        events.push(GameEvent::ItemEquipped {
            item: name,
            replaced,
        });
        if self.player.is_dead() {
            Self::end_with_player_death(&mut self.status, self.player.name(), &cause, events);
        }
    }

    fn end_with_player_death(
        status: &mut SessionStatus,
        player: &str,
        cause: &str,
        events: &mut Vec<GameEvent>,
    ) {
        log::info!("GAME OVER: {} was defeated by {}", player, cause);
        events.push(GameEvent::PlayerDefeated {
            by: cause.to_string(),
        });
        *status = SessionStatus::GameOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BaseStats;
    use crate::types::ItemKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn corridor() -> TileMap {
        TileMap::from_grid(&[vec![1, 1, 1, 1, 1], vec![0, 0, 1, 0, 0]]).unwrap()
    }

    fn enemy_at(name: &str, hp: i32, atk: i32, x: usize) -> EnemySpawn {
        let template = StatTemplate {
            hp: Some(hp),
            atk: Some(atk),
            ..StatTemplate::named(name)
        };
        EnemySpawn {
            position: Position::new(x, 0),
            character: Character::enemy(&template, &BaseStats::default()),
        }
    }

    fn boss_template() -> StatTemplate {
        StatTemplate {
            hp: Some(3),
            kind: Some("boss".to_string()),
            ..StatTemplate::named("Dragon")
        }
    }

    fn strong_player() -> Character {
        let class = StatTemplate {
            hp: Some(50),
            atk: Some(10),
            speed: Some(5),
            ..StatTemplate::named("Warrior")
        };
        Character::player(Some(&class), &BaseStats::default())
    }

    fn session(layout: Layout, player: Character) -> GameSession<StdRng> {
        GameSession::from_layout(
            corridor(),
            player,
            Position::new(2, 0),
            layout,
            GameRules::default(),
            StdRng::seed_from_u64(42),
        )
    }

    #[test]
    fn test_blocked_by_forest_and_edge() {
        let layout = Layout {
            enemies: vec![enemy_at("Goblin", 5, 1, 0)],
            ..Layout::default()
        };
        let mut game = session(layout, strong_player());

        game.move_player(Direction::Down).unwrap();
        assert_eq!(game.position(), Position::new(2, 1));

        let events = game.move_player(Direction::Left).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::Blocked {
                at: Position::new(2, 1),
                direction: Direction::Left
            }]
        );

        let events = game.move_player(Direction::Down).unwrap();
        assert!(matches!(events[0], GameEvent::Blocked { .. }));
        assert_eq!(game.position(), Position::new(2, 1));
    }

    #[test]
    fn test_enemy_fight_marks_enemy_dead() {
        let layout = Layout {
            enemies: vec![enemy_at("Goblin", 5, 1, 1), enemy_at("Rat", 5, 1, 4)],
            ..Layout::default()
        };
        let mut game = session(layout, strong_player());

        let events = game.move_player(Direction::Left).unwrap();
        assert!(events.iter().any(|e| matches!(e, GameEvent::Combat { enemy, .. } if enemy == "Goblin")));
        assert!(events.contains(&GameEvent::EnemyDefeated {
            name: "Goblin".to_string(),
            boss: false
        }));
        assert!(game.enemies()[0].character.is_dead());
        assert_eq!(game.basic_enemies_alive(), 1);

        // Dead enemies do not fight again
        game.move_player(Direction::Right).unwrap();
        let events = game.move_player(Direction::Left).unwrap();
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Combat { .. })));
    }

    #[test]
    fn test_player_death_ends_session() {
        let layout = Layout {
            enemies: vec![enemy_at("Troll", 100, 50, 3)],
            ..Layout::default()
        };
        let mut game = session(layout, Character::player(None, &BaseStats::default()));

        let events = game.move_player(Direction::Right).unwrap();
        assert!(events.contains(&GameEvent::PlayerDefeated {
            by: "Troll".to_string()
        }));
        assert_eq!(game.status(), SessionStatus::GameOver);
        assert!(game.player().is_dead());

        let err = game.move_player(Direction::Left).unwrap_err();
        assert!(matches!(err, SessionError::SessionEnded(SessionStatus::GameOver)));
    }

    #[test]
    fn test_boss_spawns_then_victory() {
        let layout = Layout {
            enemies: vec![enemy_at("Goblin", 5, 1, 3)],
            bosses: vec![boss_template()],
            ..Layout::default()
        };
        let mut game = session(layout, strong_player());

        let events = game.move_player(Direction::Right).unwrap();
        let spawned = events.iter().find_map(|e| match e {
            GameEvent::BossSpawned { name, position } => Some((name.clone(), *position)),
            _ => None,
        });
        let (name, boss_pos) = spawned.unwrap();
        assert_eq!(name, "Dragon");
        assert!(game.boss_spawned());
        assert_ne!(boss_pos, game.position());

        // Walk the corridor to the boss; the only side tile hangs below x = 2
        let target_x = if boss_pos.y == 1 { 2 } else { boss_pos.x };
        while game.position().x != target_x {
            let step = if target_x > game.position().x {
                Direction::Right
            } else {
                Direction::Left
            };
            game.move_player(step).unwrap();
        }
        if boss_pos.y == 1 {
            game.move_player(Direction::Down).unwrap();
        }

        assert_eq!(game.position(), boss_pos);
        assert_eq!(game.status(), SessionStatus::Victory);
    }

    #[test]
    fn test_no_boss_means_victory_once_enemies_die() {
        let layout = Layout {
            enemies: vec![enemy_at("Goblin", 5, 1, 3)],
            ..Layout::default()
        };
        let mut game = session(layout, strong_player());

        let events = game.move_player(Direction::Right).unwrap();
        assert_eq!(events.last(), Some(&GameEvent::Victory));
        assert_eq!(game.status(), SessionStatus::Victory);
    }

    #[test]
    fn test_orb_changes_class_once() {
        let mage = StatTemplate {
            hp: Some(7),
            atk: Some(9),
            ..StatTemplate::named("Mage")
        };
        let layout = Layout {
            enemies: vec![enemy_at("Goblin", 5, 1, 0)],
            orbs: vec![ClassOrb::new(mage, Position::new(3, 0))],
            ..Layout::default()
        };
        let mut game = session(layout, Character::player(None, &BaseStats::default()));

        let events = game.move_player(Direction::Right).unwrap();
        assert!(events.contains(&GameEvent::ClassChanged {
            class: "Mage".to_string()
        }));
        assert_eq!(game.player().name(), "Mage");
        assert_eq!(game.player().stats().attack.maximum, 9);
        assert!(game.orbs()[0].collected);
    }

    #[test]
    fn test_ground_item_equipped() {
        let sword = EquipmentItem::new("Sword", ItemKind::Weapon).with_atk(5);
        let layout = Layout {
            enemies: vec![enemy_at("Goblin", 5, 1, 0)],
            items: vec![GroundItem::new(sword, Position::new(3, 0))],
            ..Layout::default()
        };
        let mut game = session(layout, Character::player(None, &BaseStats::default()));

        let events = game.move_player(Direction::Right).unwrap();
        assert!(events.contains(&GameEvent::ItemEquipped {
            item: "Sword".to_string(),
            replaced: None
        }));
        assert_eq!(game.player().stats().attack.current, 6);
    }

    #[test]
    fn test_losing_health_gear_ends_session() {
        let mut player = Character::player(None, &BaseStats::default());
        player.equip(EquipmentItem::new("Amulet", ItemKind::Jewelry).with_hp(10));
        player.equip(EquipmentItem::new("Ring", ItemKind::Jewelry).with_armor(1));
        player.apply_damage(18);

        let charm = EquipmentItem::new("Charm", ItemKind::Jewelry).with_speed(1);
        let mage = StatTemplate {
            hp: Some(30),
            ..StatTemplate::named("Mage")
        };
        let layout = Layout {
            enemies: vec![enemy_at("Goblin", 5, 1, 0)],
            items: vec![GroundItem::new(charm, Position::new(3, 0))],
            orbs: vec![ClassOrb::new(mage, Position::new(4, 0))],
            ..Layout::default()
        };
        let mut game = session(layout, player);

        let events = game.move_player(Direction::Right).unwrap();
        assert_eq!(
            events.last(),
            Some(&GameEvent::PlayerDefeated {
                by: "Amulet".to_string()
            })
        );
        assert_eq!(game.status(), SessionStatus::GameOver);
        assert!(game.player().is_dead());
        assert_eq!(game.player().stats().health.current, -7);

        // The orb one tile further can no longer be reached
        assert!(!game.orbs()[0].collected);
        assert!(matches!(
            game.move_player(Direction::Right),
            Err(SessionError::SessionEnded(SessionStatus::GameOver))
        ));
    }

    #[test]
    fn test_dead_player_is_not_revived_by_orb() {
        let mut player = Character::player(None, &BaseStats::default());
        player.equip(EquipmentItem::new("Amulet", ItemKind::Jewelry).with_hp(10));
        player.equip(EquipmentItem::new("Ring", ItemKind::Jewelry));
        player.apply_damage(18);
        player.equip(EquipmentItem::new("Charm", ItemKind::Jewelry));
        assert!(player.is_dead());

        let layout = Layout {
            enemies: vec![enemy_at("Goblin", 5, 1, 0)],
            orbs: vec![ClassOrb::new(StatTemplate::named("Mage"), Position::new(3, 0))],
            ..Layout::default()
        };
        let mut game = session(layout, player);

        let events = game.move_player(Direction::Right).unwrap();
        assert!(!events.iter().any(|e| matches!(e, GameEvent::ClassChanged { .. })));
        assert_eq!(game.status(), SessionStatus::GameOver);
        assert!(game.player().is_dead());
        assert!(game.player().stats().health.current <= 0);
    }

    #[test]
    fn test_treasure_choice_flow() {
        let chest = TreasureChest::new(
            vec![
                EquipmentItem::new("Axe", ItemKind::Weapon).with_atk(3),
                EquipmentItem::new("Amulet", ItemKind::Jewelry).with_hp(4),
            ],
            Position::new(1, 0),
        );
        let layout = Layout {
            enemies: vec![enemy_at("Goblin", 5, 1, 4)],
            chests: vec![chest],
            ..Layout::default()
        };
        let mut game = session(layout, Character::player(None, &BaseStats::default()));

        assert!(matches!(game.choose_treasure(0), Err(SessionError::NoPendingChoice)));

        game.move_player(Direction::Left).unwrap();
        assert_eq!(game.status(), SessionStatus::ChoosingTreasure);
        assert_eq!(game.pending_treasure().map(|t| t.len()), Some(2));
        assert!(matches!(game.move_player(Direction::Right), Err(SessionError::ChoicePending)));
        assert!(matches!(
            game.choose_treasure(5),
            Err(SessionError::ChoiceOutOfRange { index: 5, len: 2 })
        ));

        let events = game.choose_treasure(1).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::ItemEquipped {
                item: "Amulet".to_string(),
                replaced: None
            }]
        );
        assert_eq!(game.status(), SessionStatus::Exploring);
        assert_eq!(game.player().stats().health.maximum, 14);

        // An opened chest stays shut
        game.move_player(Direction::Right).unwrap();
        game.move_player(Direction::Left).unwrap();
        assert_eq!(game.status(), SessionStatus::Exploring);
    }

    #[test]
    fn test_new_places_catalog_content() {
        let json = r#"{
            "map": [[1,1,1,1,1],[1,0,1,0,1],[1,1,1,1,1]],
            "classes": [{"name": "Warrior", "hp": 30, "atk": 4}],
            "enemies": [{"name": "Goblin", "hp": 5}, {"name": "Dragon", "hp": 40, "type": "boss"}],
            "objects": [{"name": "Sword", "type": "weapon", "atk": 2}],
            "treasures": [[{"name": "Ring", "type": "jewelry", "speed": 1}]]
        }"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        let game = GameSession::new(&catalog, GameRules::default(), StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(game.position(), Position::new(2, 1));
        assert_eq!(game.enemies().len(), 5);
        assert_eq!(game.basic_enemies_alive(), 5);
        assert_eq!(game.orbs().len(), 4);
        assert_eq!(game.items().len(), 1);
        assert_eq!(game.chests().len(), 1);
        assert!(!game.boss_spawned());
        assert_eq!(game.player().name(), "Player");
        assert!(game.enemies().iter().all(|e| e.position != game.position()));
    }
}
