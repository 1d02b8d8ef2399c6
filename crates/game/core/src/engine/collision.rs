//! Tile collision probes.
//!
//! Actors collide with the lower half of their 16 × 16 box. A probe reads
//! the behavior grid at `(x, y + 0x0B)` pushed `offset` pixels toward the
//! facing direction; vertical probes straddle two columns and keep the most
//! blocking behavior.

use crate::config::GameConfig;
use crate::state::{Direction, RoomTiles, TileBehavior, TileCoord};

/// Vertical offset of the probe inside an actor's box.
pub const PROBE_Y: i32 = 0x0B;

/// Result of a collision probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileCollision {
    pub collides: bool,
    pub behavior: TileBehavior,
    /// Tile that produced `behavior`.
    pub coord: TileCoord,
}

/// Probe distance used for one pixel of movement toward `dir`.
pub const fn move_offset(dir: Direction) -> i32 {
    if dir.contains(Direction::UP) {
        4
    } else if dir.contains(Direction::DOWN) {
        5
    } else if dir.contains(Direction::LEFT) {
        1
    } else if dir.contains(Direction::RIGHT) {
        0x10
    } else {
        0
    }
}

/// Most blocking behavior under the probe.
///
/// The probe row is clamped to the playfield top, so a probe above the room
/// reads the first row rather than walkable space.
pub fn collides_with_tile(
    tiles: &RoomTiles,
    x: i32,
    y: i32,
    dir: Direction,
    offset: i32,
) -> TileCollision {
    let (dx, dy) = dir.delta();
    let px = x + dx * offset;
    let py = (y + PROBE_Y + dy * offset).max(GameConfig::PLAYFIELD_TOP);

    let mut coord = TileCoord::from_pixel(px, py);
    let mut behavior = tiles.get(coord);
    if dir.is_vertical() {
        let next = TileCoord::new(coord.col + 1, coord.row);
        let other = tiles.get(next);
        // Strict: the first column keeps ties.
        if other > behavior {
            behavior = other;
            coord = next;
        }
    }

    TileCollision {
        collides: behavior.collides(),
        behavior,
        coord,
    }
}

/// Probe for an actor about to move one pixel toward `dir`.
pub fn collides_with_tile_moving(
    tiles: &RoomTiles,
    config: &GameConfig,
    x: i32,
    y: i32,
    dir: Direction,
    is_player: bool,
) -> TileCollision {
    let offset = move_offset(dir);
    let mut hit = collides_with_tile(tiles, x, y, dir, offset);
    if is_player && config.no_clip {
        hit.collides = false;
        return hit;
    }

    if dir.is_vertical() && hit.behavior != TileBehavior::Wall {
        let upper = collides_with_tile(tiles, x, y - 8, dir, offset);
        if upper.behavior == TileBehavior::Wall {
            hit = upper;
        }
    }

    if is_player && hit.behavior == TileBehavior::Doorway {
        hit.collides = false;
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles_with(coord: TileCoord, behavior: TileBehavior) -> RoomTiles {
        let mut tiles = RoomTiles::default();
        tiles.set(coord, behavior);
        tiles
    }

    #[test]
    fn left_probe_hits_wall() {
        // Player at (0x20, 0x80): probe (0x1F, 0x8B) lands in col 3, row 9.
        let tiles = tiles_with(TileCoord::new(3, 9), TileBehavior::Wall);
        let hit = collides_with_tile_moving(&tiles, &GameConfig::new(), 0x20, 0x80, Direction::LEFT, true);
        assert!(hit.collides);
        assert_eq!(hit.behavior, TileBehavior::Wall);
    }

    #[test]
    fn vertical_probe_keeps_most_blocking_column() {
        let mut tiles = tiles_with(TileCoord::new(4, 6), TileBehavior::Water);
        tiles.set(TileCoord::new(5, 6), TileBehavior::Armos);
        let hit = collides_with_tile(&tiles, 0x20, 0x68, Direction::DOWN, 0);
        assert_eq!(hit.behavior, TileBehavior::Armos);
        assert_eq!(hit.coord, TileCoord::new(5, 6));
    }

    #[test]
    fn ties_stay_on_first_column() {
        let mut tiles = tiles_with(TileCoord::new(4, 6), TileBehavior::Wall);
        tiles.set(TileCoord::new(5, 6), TileBehavior::Wall);
        let hit = collides_with_tile(&tiles, 0x20, 0x68, Direction::DOWN, 0);
        assert_eq!(hit.coord, TileCoord::new(4, 6));
    }

    #[test]
    fn walkable_never_outranks_a_blocker() {
        let tiles = tiles_with(TileCoord::new(4, 6), TileBehavior::GenericSolid);
        let hit = collides_with_tile(&tiles, 0x20, 0x68, Direction::UP, 0);
        assert_eq!(hit.behavior, TileBehavior::GenericSolid);
        assert!(hit.collides);
    }

    #[test]
    fn probe_above_playfield_clamps_to_first_row() {
        let tiles = tiles_with(TileCoord::new(4, 0), TileBehavior::Wall);
        let hit = collides_with_tile(&tiles, 0x20, 0x20, Direction::UP, 4);
        assert_eq!(hit.coord.row, 0);
        assert_eq!(hit.behavior, TileBehavior::Wall);
    }

    #[test]
    fn upper_wall_overrides_vertical_probe() {
        // Probe lands on row 4 (Sand); 8 px higher is row 3 (Wall).
        let mut tiles = tiles_with(TileCoord::new(4, 4), TileBehavior::Sand);
        tiles.set(TileCoord::new(4, 3), TileBehavior::Wall);
        let hit = collides_with_tile_moving(&tiles, &GameConfig::new(), 0x20, 0x5D, Direction::UP, true);
        assert_eq!(hit.behavior, TileBehavior::Wall);
        assert!(hit.collides);
    }

    #[test]
    fn doorway_only_blocks_monsters() {
        let tiles = tiles_with(TileCoord::new(3, 9), TileBehavior::Doorway);
        let config = GameConfig::new();
        assert!(!collides_with_tile_moving(&tiles, &config, 0x20, 0x80, Direction::LEFT, true).collides);
        assert!(collides_with_tile_moving(&tiles, &config, 0x20, 0x80, Direction::LEFT, false).collides);
    }

    #[test]
    fn no_clip_applies_to_the_player_only() {
        let tiles = tiles_with(TileCoord::new(3, 9), TileBehavior::Wall);
        let config = GameConfig::new().with_no_clip(true);
        assert!(!collides_with_tile_moving(&tiles, &config, 0x20, 0x80, Direction::LEFT, true).collides);
        assert!(collides_with_tile_moving(&tiles, &config, 0x20, 0x80, Direction::LEFT, false).collides);
    }
}
