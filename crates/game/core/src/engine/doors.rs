//! Underworld door tiles and door events.
//!
//! A door occupies a 4 × 2 (or 2 × 4) patch of fine tiles in front of the
//! room wall and a matching patch behind it on the room edge. The front patch
//! takes the behavior from [`door_behavior`]; the behind patch follows it
//! whenever the front becomes a doorway.

use super::errors::EngineError;
use crate::env::{GameEnv, RoomDef, SoundEffect};
use crate::state::{
    ActorKind, ActorPhase, Direction, DoorState, DoorType, Point, TileBehavior, TileCoord,
    TriggeredDoor, WorldState, door_behavior, door_state,
};

/// Ticks between a bomb triggering a bombable wall and the wall opening.
pub const BOMB_DOOR_DELAY: u8 = 2;
/// Reach of a fading bomb toward a door midpoint.
pub const BOMB_DOOR_REACH: i32 = 0x20;

/// Fine-tile patches of one door: `(cols, rows)` of the front and behind parts.
struct DoorPatch {
    front_cols: (i32, i32),
    front_rows: (i32, i32),
    behind_cols: (i32, i32),
    behind_rows: (i32, i32),
}

fn patch(dir: Direction) -> DoorPatch {
    if dir == Direction::UP {
        DoorPatch {
            front_cols: (14, 17),
            front_rows: (2, 3),
            behind_cols: (14, 17),
            behind_rows: (0, 1),
        }
    } else if dir == Direction::DOWN {
        DoorPatch {
            front_cols: (14, 17),
            front_rows: (18, 19),
            behind_cols: (14, 17),
            behind_rows: (20, 21),
        }
    } else if dir == Direction::LEFT {
        DoorPatch {
            front_cols: (2, 3),
            front_rows: (9, 12),
            behind_cols: (0, 1),
            behind_rows: (9, 12),
        }
    } else {
        DoorPatch {
            front_cols: (28, 29),
            front_rows: (9, 12),
            behind_cols: (30, 31),
            behind_rows: (9, 12),
        }
    }
}

fn tiles_in(cols: (i32, i32), rows: (i32, i32)) -> impl Iterator<Item = TileCoord> {
    (rows.0..=rows.1).flat_map(move |row| (cols.0..=cols.1).map(move |col| TileCoord::new(col, row)))
}

/// Front tiles of the door on side `dir`.
pub fn front_tiles(dir: Direction) -> impl Iterator<Item = TileCoord> {
    let patch = patch(dir);
    tiles_in(patch.front_cols, patch.front_rows)
}

/// Tiles on the room edge behind the door on side `dir`.
pub fn behind_tiles(dir: Direction) -> impl Iterator<Item = TileCoord> {
    let patch = patch(dir);
    tiles_in(patch.behind_cols, patch.behind_rows)
}

/// Screen point at the middle of a door opening.
pub fn door_midpoint(dir: Direction) -> Point {
    if dir == Direction::UP {
        Point::new(0x80, 0x50)
    } else if dir == Direction::DOWN {
        Point::new(0x80, 0xE0)
    } else if dir == Direction::LEFT {
        Point::new(0x10, 0x98)
    } else {
        Point::new(0xF0, 0x98)
    }
}

/// Persisted or forced open flag of the current room's door.
pub fn is_door_open(world: &WorldState, dir: Direction) -> bool {
    world.room_flags().doors_open.contains(dir) || world.doors.forced_open.contains(dir)
}

/// Visual state of the current room's door on side `dir`.
pub fn current_door_state(world: &WorldState, room: &RoomDef, dir: Direction) -> DoorState {
    door_state(room.doors.get(dir), is_door_open(world, dir))
}

/// Rewrites the behavior tiles of one door from its type and open flag.
pub fn update_door_tiles(world: &mut WorldState, room: &RoomDef, dir: Direction) {
    if world.is_overworld() {
        return;
    }
    let behavior = door_behavior(room.doors.get(dir), is_door_open(world, dir));
    for coord in front_tiles(dir) {
        world.tiles.set(coord, behavior);
    }
    let behind = if behavior == TileBehavior::Doorway {
        TileBehavior::Doorway
    } else {
        TileBehavior::Wall
    };
    for coord in behind_tiles(dir) {
        world.tiles.set(coord, behind);
    }
}

pub fn update_all_door_tiles(world: &mut WorldState, room: &RoomDef) {
    for dir in Direction::CARDINALS {
        update_door_tiles(world, room, dir);
    }
}

/// Opens a door on both sides: this room's flag and the neighbor's opposite
/// flag are persisted.
pub fn open_door(
    world: &mut WorldState,
    env: &GameEnv<'_>,
    dir: Direction,
) -> Result<(), EngineError> {
    let room = world.current_room(env)?;
    world.room_flags_mut().doors_open |= dir;
    if let Some(next) = room.connections.get(dir) {
        world.profile.room_flags_mut(&world.world_name, next).doors_open |= dir.opposite();
    }
    update_door_tiles(world, room, dir);
    env.effect(SoundEffect::Door);
    tracing::debug!(room = %world.room_id, ?dir, "door opened");
    Ok(())
}

/// Opens a locked door the player walked into, spending a key unless the
/// magic key is held. Returns true if the door opened.
pub fn try_unlock(
    world: &mut WorldState,
    env: &GameEnv<'_>,
    dir: Direction,
) -> Result<bool, EngineError> {
    let room = world.current_room(env)?;
    if !room.doors.get(dir).is_keyed() || is_door_open(world, dir) {
        return Ok(false);
    }

    let inventory = &mut world.profile.inventory;
    if !inventory.magic_key {
        if inventory.keys == 0 {
            return Ok(false);
        }
        inventory.keys -= 1;
    }
    open_door(world, env, dir)?;
    Ok(true)
}

/// Opens every closed shutter of the current room.
pub fn open_shutters(world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let room = world.current_room(env)?;
    for dir in Direction::CARDINALS {
        if room.doors.get(dir) == DoorType::Shutter && !world.room_flags().doors_open.contains(dir) {
            open_door(world, env, dir)?;
        }
    }
    Ok(())
}

/// Finds a closed bombable door with a fading bomb close to its midpoint.
pub fn find_bombed_door(world: &WorldState, room: &RoomDef) -> Option<Direction> {
    Direction::CARDINALS.into_iter().find(|&dir| {
        room.doors.get(dir) == DoorType::Bombable
            && !is_door_open(world, dir)
            && world.actors.of_kind(ActorKind::Bomb).any(|bomb| {
                bomb.phase == ActorPhase::Fading
                    && Point::new(bomb.x() + 8, bomb.y() + 8).distance(door_midpoint(dir))
                        <= BOMB_DOOR_REACH
            })
    })
}

/// Arms the bombable-door trigger.
pub fn trigger_door(world: &mut WorldState, dir: Direction) {
    world.doors.triggered = Some(TriggeredDoor {
        dir,
        delay: BOMB_DOOR_DELAY,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_door_patches_cover_expected_tiles() {
        let front: Vec<_> = front_tiles(Direction::UP).collect();
        assert_eq!(front.len(), 8);
        assert!(front.contains(&TileCoord::new(14, 2)));
        assert!(front.contains(&TileCoord::new(17, 3)));
        let behind: Vec<_> = behind_tiles(Direction::UP).collect();
        assert!(behind.iter().all(|coord| coord.row <= 1));
    }

    #[test]
    fn side_doors_span_four_rows() {
        let front: Vec<_> = front_tiles(Direction::RIGHT).collect();
        assert_eq!(front.len(), 8);
        assert!(front.iter().all(|coord| (28..=29).contains(&coord.col)));
        assert!(front.iter().all(|coord| (9..=12).contains(&coord.row)));
        let behind: Vec<_> = behind_tiles(Direction::LEFT).collect();
        assert!(behind.iter().all(|coord| coord.col <= 1));
    }

    #[test]
    fn midpoints_sit_on_the_playfield_edges() {
        assert_eq!(door_midpoint(Direction::UP), Point::new(0x80, 0x50));
        assert_eq!(door_midpoint(Direction::DOWN), Point::new(0x80, 0xE0));
        assert_eq!(door_midpoint(Direction::LEFT), Point::new(0x10, 0x98));
        assert_eq!(door_midpoint(Direction::RIGHT), Point::new(0xF0, 0x98));
    }
}
