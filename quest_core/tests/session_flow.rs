//! Integration test: Load catalog -> Explore -> Fight every enemy -> Beat the boss
//!
//! Drives whole sessions on a small hand-built map with a seeded RNG.

use quest_core::{
    Catalog, Direction, GameEvent, GameRules, GameSession, Position, SessionError, SessionStatus,
    TileMap,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, VecDeque};

const CATALOG: &str = r#"{
    "map": [
        [1, 1, 1, 1, 1, 1, 1],
        [1, 0, 0, 1, 0, 0, 1],
        [1, 0, 0, 1, 0, 0, 1],
        [1, 1, 1, 1, 1, 1, 1],
        [1, 0, 0, 1, 0, 0, 1],
        [1, 0, 0, 1, 0, 0, 1],
        [1, 1, 1, 1, 1, 1, 1]
    ],
    "classes": [
        {"name": "Warrior", "hp": 150, "armor": 5, "atk": 25, "speed": 8},
        {"name": "Mage", "hp": 120, "atk": 30, "speed": 9}
    ],
    "enemies": [
        {"name": "Goblin", "hp": 5, "atk": 1},
        {"name": "Wolf", "hp": 8, "atk": 2, "speed": 3},
        {"name": "Dragon", "hp": 40, "atk": 4, "speed": 2, "type": "boss"}
    ],
    "objects": [
        {"name": "Torch", "type": "item", "hp": 2},
        {"name": "Sword", "type": "weapon", "atk": 3},
        {"name": "Dagger", "type": "weapon", "atk": 1, "speed": 2},
        {"name": "Ring", "type": "jewelry", "armor": 1},
        {"name": "Charm", "type": "jewelry", "speed": 1}
    ],
    "treasures": [
        [
            {"name": "Axe", "type": "weapon", "atk": 6},
            {"name": "Amulet", "type": "jewelry", "hp": 10},
            {"name": "Cloak", "type": "item", "armor": 4}
        ]
    ]
}"#;

const RULES: &str = r#"
[stats.class_defaults]
health = 200
attack = 30
speed = 9
"#;

fn new_session(seed: u64) -> GameSession<ChaCha8Rng> {
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    let rules = GameRules::parse(RULES).unwrap();
    GameSession::new(&catalog, rules, ChaCha8Rng::seed_from_u64(seed)).unwrap()
}

/// Shortest walk over road tiles from `from` to `to`, never entering `avoid`
fn search(map: &TileMap, from: Position, to: Position, avoid: &[Position]) -> Option<Vec<Direction>> {
    let mut came_from: HashMap<Position, (Position, Direction)> = HashMap::new();
    let mut queue = VecDeque::from([from]);

    while let Some(pos) = queue.pop_front() {
        if pos == to {
            break;
        }
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let Some(next) = map.neighbor(pos, direction) else {
                continue;
            };
            let blocked = next != to && avoid.contains(&next);
            if map.is_walkable(next) && !blocked && next != from && !came_from.contains_key(&next) {
                came_from.insert(next, (pos, direction));
                queue.push_back(next);
            }
        }
    }

    let mut steps = Vec::new();
    let mut current = to;
    while current != from {
        let (prev, direction) = came_from.get(&current)?;
        steps.push(*direction);
        current = *prev;
    }
    steps.reverse();
    Some(steps)
}

/// Walk to `target` around living enemies when possible, picking the first
/// treasure whenever a chest opens
fn walk_to(game: &mut GameSession<ChaCha8Rng>, target: Position, log: &mut Vec<GameEvent>) {
    let enemies: Vec<Position> = game
        .enemies()
        .iter()
        .filter(|e| !e.character.is_dead())
        .map(|e| e.position)
        .collect();
    let steps = search(game.map(), game.position(), target, &enemies)
        .or_else(|| search(game.map(), game.position(), target, &[]))
        .unwrap_or_default();

    for direction in steps {
        if game.status().is_over() {
            return;
        }
        log.extend(game.move_player(direction).unwrap());
        if game.status() == SessionStatus::ChoosingTreasure {
            log.extend(game.choose_treasure(0).unwrap());
        }
    }
}

#[test]
fn test_full_session_reaches_victory() {
    let mut game = new_session(7);
    let mut log = Vec::new();

    assert_eq!(game.position(), Position::new(3, 3));
    assert_eq!(game.enemies().len(), 5);
    assert_eq!(game.orbs().len(), 8);
    assert_eq!(game.chests().len(), 1);

    // Sweep every pickup first, then every enemy
    let pickups: Vec<Position> = game
        .orbs()
        .iter()
        .map(|o| o.position)
        .chain(game.items().iter().map(|i| i.position))
        .chain(game.chests().iter().map(|c| c.position))
        .collect();
    for target in pickups {
        walk_to(&mut game, target, &mut log);
    }

    if !game.status().is_over() {
        assert!(game.orbs().iter().all(|o| o.collected));
        assert!(game.chests().iter().all(|c| c.opened));
        assert!(game.player().current_class().is_some());
        let inventory = game.player().inventory().unwrap();
        assert_eq!(inventory.jewelry().len(), 2);
        assert!(inventory.weapon().is_some());
        assert!(inventory.general_item().is_some());
    }

    for _ in 0..20 {
        if game.status().is_over() {
            break;
        }
        let next = game
            .enemies()
            .iter()
            .find(|e| !e.character.is_dead())
            .map(|e| e.position);
        match next {
            Some(target) => walk_to(&mut game, target, &mut log),
            None => break,
        }
    }

    assert_eq!(game.status(), SessionStatus::Victory);
    assert!(game.boss_spawned());
    assert_eq!(game.basic_enemies_alive(), 0);
    assert!(log.iter().any(|e| matches!(e, GameEvent::BossSpawned { name, .. } if name == "Dragon")));
    assert!(log.iter().any(|e| matches!(e, GameEvent::EnemyDefeated { boss: true, .. })));
    assert_eq!(log.last(), Some(&GameEvent::Victory));
    assert_eq!(
        log.iter().filter(|e| matches!(e, GameEvent::TreasureOpened { .. })).count(),
        1
    );

    let err = game.move_player(Direction::Up).unwrap_err();
    assert!(matches!(err, SessionError::SessionEnded(SessionStatus::Victory)));
}

#[test]
fn test_same_seed_same_layout() {
    let first = new_session(99);
    let second = new_session(99);

    let enemy_layout = |game: &GameSession<ChaCha8Rng>| -> Vec<(String, Position)> {
        game.enemies()
            .iter()
            .map(|e| (e.character.name().to_string(), e.position))
            .collect()
    };
    assert_eq!(enemy_layout(&first), enemy_layout(&second));
    assert_eq!(first.orbs(), second.orbs());
    assert_eq!(first.items(), second.items());
    assert_eq!(first.chests(), second.chests());
}

#[test]
fn test_nothing_spawns_on_the_start_tile() {
    for seed in 0..20 {
        let game = new_session(seed);
        let start = game.position();

        assert!(game.enemies().iter().all(|e| e.position != start));
        assert!(game.orbs().iter().all(|o| o.position != start));
        assert!(game.items().iter().all(|i| i.position != start));
        assert!(game.chests().iter().all(|c| c.position != start));
    }
}

#[test]
fn test_weak_player_loses() {
    let mut catalog = Catalog::from_json_str(CATALOG).unwrap();
    catalog.classes.clear();
    catalog.objects.clear();
    catalog.treasures.clear();
    let rules = GameRules::parse("[stats.class_defaults]\nhealth = 1\nspeed = 0").unwrap();
    let mut game = GameSession::new(&catalog, rules, ChaCha8Rng::seed_from_u64(3)).unwrap();
    let mut log = Vec::new();

    let target = game.enemies()[0].position;
    walk_to(&mut game, target, &mut log);

    assert_eq!(game.status(), SessionStatus::GameOver);
    assert!(game.player().is_dead());
    assert!(log.iter().any(|e| matches!(e, GameEvent::PlayerDefeated { .. })));
    assert!(!log.iter().any(|e| matches!(e, GameEvent::EnemyDefeated { .. })));
    assert!(matches!(
        game.choose_treasure(0),
        Err(SessionError::SessionEnded(SessionStatus::GameOver))
    ));
}
