//! TileMap - The walkable grid the player explores

use crate::config::{ConfigError, SpawnRules};
use crate::types::{Direction, Position};
use serde::{Deserialize, Serialize};

/// A single map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    /// Blocks movement
    Forest,
    /// Walkable
    Road,
}

impl From<u8> for Tile {
    fn from(code: u8) -> Self {
        match code {
            1 => Tile::Road,
            _ => Tile::Forest,
        }
    }
}

/// Rectangular grid of tiles, indexed by (column, row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Build from rows of tile codes (0 = forest, 1 = road)
    pub fn from_grid(grid: &[Vec<u8>]) -> Result<Self, ConfigError> {
        let height = grid.len();
        let width = grid.first().map(Vec::len).unwrap_or(0);

        if height == 0 || width == 0 {
            return Err(ConfigError::ValidationError("map grid is empty".to_string()));
        }
        if let Some(row) = grid.iter().position(|r| r.len() != width) {
            return Err(ConfigError::ValidationError(format!(
                "map row {row} has {} tiles, expected {width}",
                grid[row].len()
            )));
        }

        let tiles = grid.iter().flatten().map(|&code| Tile::from(code)).collect();
        Ok(TileMap { width, height, tiles })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of tiles
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Tile at a position, `None` outside the map
    pub fn tile(&self, pos: Position) -> Option<Tile> {
        if pos.x < self.width && pos.y < self.height {
            Some(self.tiles[pos.y * self.width + pos.x])
        } else {
            None
        }
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile(pos) == Some(Tile::Road)
    }

    /// Adjacent position in a direction, `None` past the edge
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (x, y) = match direction {
            Direction::Up => (Some(pos.x), pos.y.checked_sub(1)),
            Direction::Down => (Some(pos.x), pos.y.checked_add(1)),
            Direction::Left => (pos.x.checked_sub(1), Some(pos.y)),
            Direction::Right => (pos.x.checked_add(1), Some(pos.y)),
        };
        let next = Position::new(x?, y?);
        self.tile(next).map(|_| next)
    }

    /// Every road tile, row by row
    pub fn road_tiles(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == Tile::Road)
            .map(|(i, _)| Position::new(i % self.width, i / self.width))
            .collect()
    }

    /// Centre tile of the grid
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Road tile nearest to the centre, used as the player start
    ///
    /// Searches squares of growing radius around the centre, scanning each
    /// square row by row. Falls back to the centre itself when the map has
    /// no road at all.
    pub fn center_road_position(&self) -> Position {
        let center = self.center();
        if self.is_walkable(center) {
            return center;
        }

        let max_radius = self.width.max(self.height) as isize;
        let (cx, cy) = (center.x as isize, center.y as isize);
        for r in 1..=max_radius {
            for dy in -r..=r {
                for dx in -r..=r {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if nx < 0 || ny < 0 {
                        continue;
                    }
                    let candidate = Position::new(nx as usize, ny as usize);
                    if self.is_walkable(candidate) {
                        log::debug!("Start road found at {}", candidate);
                        return candidate;
                    }
                }
            }
        }

        log::warn!("No road tile on the map, starting at the centre");
        center
    }
}

/// How many ground objects of each kind to place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCounts {
    pub items: usize,
    pub weapons: usize,
    pub jewelry: usize,
}

impl ObjectCounts {
    pub fn total(&self) -> usize {
        self.items + self.weapons + self.jewelry
    }
}

/// Scale ground object counts with the map size
///
/// Roughly one object per `object_ratio` tiles (the ratio shrinks slightly on
/// large maps, never below 20), split 35% items, 35% weapons and 30% jewelry,
/// plus a bonus of one per ten tiles of map side.
pub fn object_counts_for_map_size(tile_count: usize, rules: &SpawnRules) -> ObjectCounts {
    let tiles = tile_count as f64;
    let scale_factor = tiles.sqrt() / 100.0;
    let ratio = (rules.object_ratio - scale_factor * 5.0).max(20.0);

    let total = (tiles / ratio).floor();
    let size_bonus = (tiles.sqrt() / 10.0).floor() as usize;
    let share = |fraction: f64| ((total * fraction).floor() as usize + size_bonus).max(rules.min_objects_per_kind);

    ObjectCounts {
        items: share(0.35),
        weapons: share(0.35),
        jewelry: share(0.30),
    }
}
