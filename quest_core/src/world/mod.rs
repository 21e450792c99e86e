//! World - Tile map, spawning and pickups

mod map;
mod pickup;
mod spawn;

pub use map::{object_counts_for_map_size, ObjectCounts, Tile, TileMap};
pub use pickup::{ClassOrb, GroundItem, TreasureChest};
pub use spawn::{EnemySpawn, Spawner};
