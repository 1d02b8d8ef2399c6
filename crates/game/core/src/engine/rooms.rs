//! Room resolution, loading and population.

use super::doors;
use super::errors::EngineError;
use crate::actors;
use crate::env::{GameEnv, RoomDef, RoomId, RoomKind, SecretTrigger, SoundEffect, WorldId};
use crate::state::{
    ActorKind, ActorPhase, Direction, DoorControl, EntranceRecord, ObjectFlags, Point, RoomTiles,
    TileBehavior, TimerKey, WorldState,
};

/// Ticks a freshly placed monster stays harmless.
pub const SPAWN_TICKS: u16 = 0x10;
/// Cadence of statue fireballs.
pub const STATUE_PERIOD: u16 = 0x60;

const OLD_MAN_POSITION: Point = Point::new(0x78, 0x80);
const FLAME_POSITIONS: [Point; 2] = [Point::new(0x48, 0x80), Point::new(0xA8, 0x80)];
const GIFT_POSITION: Point = Point::new(0x78, 0x98);

/// Where a room exit leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomTarget {
    pub world: WorldId,
    pub room: RoomId,
    /// Set when the target came off the entrance stack.
    pub arrival: Option<EntranceRecord>,
}

/// Result of walking out of a maze room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MazeOutcome {
    /// Leave through the connection as usual.
    Exit,
    /// Scroll back into the same room.
    Stay,
}

/// Resolves the room reached by leaving the current one toward `dir`.
///
/// Falls back to the entrance stack and then to the overworld entry room.
pub fn resolve_next_room(
    world: &mut WorldState,
    env: &GameEnv<'_>,
    dir: Direction,
) -> Result<RoomTarget, EngineError> {
    let room = world.current_room(env)?;
    if let Some(next) = room.connections.get(dir) {
        return Ok(RoomTarget {
            world: world.world_id,
            room: next,
            arrival: None,
        });
    }

    if let Some(record) = world.entrances.pop() {
        return Ok(RoomTarget {
            world: record.world,
            room: record.room,
            arrival: Some(record),
        });
    }

    let overworld = env.world(WorldId::OVERWORLD)?;
    tracing::warn!(
        room = %world.room_id,
        ?dir,
        entry = %overworld.entry_room,
        "no exit; falling back to the entry room"
    );
    Ok(RoomTarget {
        world: WorldId::OVERWORLD,
        room: overworld.entry_room,
        arrival: None,
    })
}

/// Advances the maze walk of the current room.
pub fn advance_maze(
    world: &mut WorldState,
    env: &GameEnv<'_>,
    room: &RoomDef,
    dir: Direction,
) -> MazeOutcome {
    let Some(maze) = &room.maze else {
        return MazeOutcome::Exit;
    };

    if dir == maze.exit {
        world.maze_step = 0;
        return MazeOutcome::Exit;
    }

    let step = world.maze_step as usize;
    if maze.path.get(step) != Some(&dir) {
        world.maze_step = 0;
        return MazeOutcome::Stay;
    }

    if step + 1 == maze.path.len() {
        world.maze_step = 0;
        env.effect(SoundEffect::Secret);
        MazeOutcome::Exit
    } else {
        world.maze_step += 1;
        MazeOutcome::Stay
    }
}

/// Makes a room current: switches world metadata, rebuilds the behavior grid
/// and drops the previous room's actors.
pub fn load_room(
    world: &mut WorldState,
    env: &GameEnv<'_>,
    world_id: WorldId,
    room_id: RoomId,
) -> Result<(), EngineError> {
    let world_def = env.world(world_id)?;
    let room = env.room(world_id, room_id)?;

    if world.world_id != world_id || world.room_id != room_id {
        world.maze_step = 0;
    }
    world.world_id = world_id;
    world.world_name.clone_from(&world_def.name);
    world.world_kind = world_def.kind;
    world.level_number = world_def.level_number;
    world.room_id = room_id;
    world.room_kind = room.kind;
    world.tiles = RoomTiles::from_grid(room.behavior_grid(world_id)?);

    let flags = world.room_flags();
    if room.secret == SecretTrigger::BombCave && flags.objects.contains(ObjectFlags::SECRET_FOUND) {
        if let Some(block) = room.secret_block {
            world.tiles.set_block(block.x, block.y, TileBehavior::Cave);
        }
    }

    world.actors.clear();
    world.edge_spawns.clear();
    world.doors = DoorControl::default();
    world.economy.room_kill_count = 0;
    world.timers.set(TimerKey::Statue, STATUE_PERIOD);
    doors::update_all_door_tiles(world, room);

    let flags = world.room_flags_mut();
    let first_visit = !flags.visited;
    flags.visited = true;
    if first_visit {
        world.profile.stats.rooms_visited += 1;
    }

    tracing::debug!(world = ?world_id, room = %room_id, first_visit, "room loaded");
    Ok(())
}

/// Object flag guarding a room's item: caves hand out gifts.
pub fn item_flag(room: &RoomDef) -> ObjectFlags {
    if room.kind == RoomKind::Cave {
        ObjectFlags::GIFT_TAKEN
    } else {
        ObjectFlags::ITEM_TAKEN
    }
}

/// Spawns the current room's monsters, item and cave people.
///
/// The first visit within the history window places the full monster list;
/// a revisit restores the count persisted when the player last walked out.
pub fn populate_room(world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let room = world.current_room(env)?;
    let revisit = world.history.contains(world.room_id);
    world.history.record(world.room_id);

    let flags = world.room_flags();
    let count = match (revisit, flags.object_count) {
        (true, Some(count)) => count as usize,
        _ => room.monsters.len(),
    }
    .min(room.monsters.len());

    let monsters = &room.monsters[..count];
    if room.monsters_from_edges {
        world.edge_spawns.extend(monsters.iter().copied());
    } else {
        for &kind in monsters {
            let position = free_spawn_position(world, env);
            let id = actors::spawn(world, kind, position)?;
            if let Some(actor) = world.actors.get_mut(id) {
                actor.phase = ActorPhase::Spawning;
                actor.timer = SPAWN_TICKS;
            }
        }
    }

    if room.kind == RoomKind::Cave {
        actors::spawn(world, ActorKind::OldMan, OLD_MAN_POSITION)?;
        for position in FLAME_POSITIONS {
            actors::spawn(world, ActorKind::Flame, position)?;
        }
    }

    if let Some(room_item) = room.item {
        let taken = flags.objects.contains(item_flag(room));
        let hidden = room.secret == SecretTrigger::FoesItem
            && !flags.objects.contains(ObjectFlags::SECRET_FOUND);
        if !taken && !hidden {
            let position = if room.kind == RoomKind::Cave {
                GIFT_POSITION
            } else {
                room_item.position
            };
            actors::spawn_item(world, room_item.item, position, true)?;
        }
    }

    tracing::debug!(room = %world.room_id, revisit, monsters = count, "room populated");
    Ok(())
}

/// Picks a clear block for a monster, away from the player.
pub fn free_spawn_position(world: &mut WorldState, env: &GameEnv<'_>) -> Point {
    for attempt in 0..16 {
        let roll = world.roll(env, 0x5350_0000 | attempt);
        let col = 2 + (roll % 12) as i32;
        let row = 2 + ((roll >> 8) % 7) as i32;
        let candidate = Point::new(col * 0x10, 0x40 + row * 0x10);
        if world.tiles.is_block_clear(candidate.x, candidate.y)
            && candidate.distance(world.player.position) > 0x20
        {
            return candidate;
        }
    }

    (2..9)
        .flat_map(|row| (2..14).map(move |col| Point::new(col * 0x10, 0x40 + row * 0x10)))
        .find(|p| world.tiles.is_block_clear(p.x, p.y))
        .unwrap_or(Point::new(0x78, 0x90))
}

/// Edge position for a monster walking in from the room border.
pub fn edge_spawn_position(world: &mut WorldState, env: &GameEnv<'_>) -> Option<Point> {
    let roll = world.roll(env, 0x4544_4745);
    let side = Direction::from_ordinal((roll % 4) as usize)?;
    let start = (roll >> 8) as i32;
    for i in 0..16 {
        let along = (start + i).rem_euclid(if side.is_vertical() { 16 } else { 11 });
        let candidate = if side == Direction::LEFT {
            Point::new(0, 0x40 + along * 0x10)
        } else if side == Direction::RIGHT {
            Point::new(0xF0, 0x40 + along * 0x10)
        } else if side == Direction::UP {
            Point::new(along * 0x10, 0x40)
        } else {
            Point::new(along * 0x10, 0xE0)
        };
        if world.tiles.is_block_clear(candidate.x, candidate.y)
            && candidate.distance(world.player.position) > 0x20
        {
            return Some(candidate);
        }
    }
    None
}

/// Record describing where the player stands now, for the entrance stack.
pub fn origin_record(world: &WorldState, position: Point) -> EntranceRecord {
    EntranceRecord {
        world: world.world_id,
        room: world.room_id,
        position,
        facing: world.player.facing,
    }
}
