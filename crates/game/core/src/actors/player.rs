//! Player control: sword, B items, movement and room exits.

use crate::engine::collision::{PROBE_Y, collides_with_tile_moving};
use crate::engine::modes::{cave::CAVE_START, cellar::CELLAR_START};
use crate::engine::{EngineError, Goto, doors};
use crate::env::{Buttons, GameEnv, RoomKind, SoundEffect};
use crate::state::{
    ActorId, ActorKind, ActorPhase, Direction, EntranceRecord, ItemSlot, PaletteState, Point,
    TileBehavior, TimerKey, WorldState,
};

/// Distance from the player to the sword blade.
pub const SWORD_REACH: i32 = 0x0C;
pub const SWORD_TICKS: u16 = 0x0C;
/// Distance a bomb is placed ahead of the player.
pub const BOMB_REACH: i32 = 0x10;
/// Ticks a boomerang keeps a monster frozen.
pub const BOOMERANG_STUN: u16 = 0x40;
/// Color steps played after lighting a room.
pub const CANDLE_COLOR_STEPS: u8 = 4;
/// Where the whirlwind drops the player.
pub const WHIRLWIND_DROP: Point = Point::new(0x70, 0x90);

/// Room-edge thresholds `(left, right, up, down)` that start a Leave.
pub const OVERWORLD_EDGES: (i32, i32, i32, i32) = (0, 0xF0, 0x40, 0xE0);
pub const UNDERWORLD_EDGES: (i32, i32, i32, i32) = (0x10, 0xE0, 0x50, 0xD0);

pub fn update(world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    world.player.moving = Direction::empty();
    if world.fanfare.is_some() {
        return Ok(());
    }

    let frame = world.frame;
    if env.is_button_pressing(frame, Buttons::A) {
        swing_sword(world, env)?;
    } else if env.is_button_pressing(frame, Buttons::B) {
        use_item(world, env)?;
    }
    if world.pending().is_some() || world.timers.is_running(TimerKey::SwordSwing) {
        return Ok(());
    }

    let dir = env.buttons_down(frame).direction().primary();
    if dir.is_empty() {
        return Ok(());
    }
    world.player.facing = dir;
    if step(world, env, dir)? {
        check_exit(world, dir);
    }
    Ok(())
}

fn swing_sword(world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    if world.profile.inventory.sword == 0
        || world.stun.no_sword > 0
        || world.actors.contains_kind(ActorKind::Sword)
    {
        return Ok(());
    }
    let facing = world.player.facing;
    let position = world.player.position.offset(facing, SWORD_REACH);
    let id = super::spawn_unique(world, ActorKind::Sword, position)?;
    if let Some(sword) = world.actors.get_mut(id) {
        sword.owner = Some(ActorId::PLAYER);
        sword.facing = facing;
    }
    world.timers.set(TimerKey::SwordSwing, SWORD_TICKS);
    env.effect(SoundEffect::Sword);
    Ok(())
}

fn use_item(world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    match world.profile.inventory.selected {
        Some(ItemSlot::Bombs) => {
            if world.profile.inventory.bombs == 0 || world.actors.contains_kind(ActorKind::Bomb) {
                return Ok(());
            }
            let position = world.player.position.offset(world.player.facing, BOMB_REACH);
            super::spawn(world, ActorKind::Bomb, position)?;
            world.profile.inventory.bombs -= 1;
        }
        Some(ItemSlot::Candle) => {
            let dark_room = world.current_world(env)?.is_dark(world.room_id);
            if !world.is_overworld() && dark_room && world.palette.is_dark() {
                world.palette = PaletteState {
                    dark_step: 0,
                    color_seq: CANDLE_COLOR_STEPS,
                };
            }
        }
        Some(ItemSlot::Recorder) => {
            let def = world.current_world(env)?;
            let room = world.current_room(env)?;
            if let (true, Some(destination)) = (def.allow_whirlwind, room.recorder_destination) {
                tracing::debug!(from = %world.room_id, to = %destination, "whirlwind");
                world.goto(Goto::LoadLevel {
                    world: world.world_id,
                    restart: false,
                    arrival: Some(EntranceRecord {
                        world: world.world_id,
                        room: destination,
                        position: WHIRLWIND_DROP,
                        facing: Direction::DOWN,
                    }),
                });
            }
        }
        Some(ItemSlot::Boomerang) => {
            let player = world.player.position;
            let facing = world.player.facing;
            let (dx, dy) = facing.delta();
            for monster in world.actors.iter_mut().filter(|a| a.kind.is_monster() && !a.deleted) {
                let (ox, oy) = (monster.x() - player.x, monster.y() - player.y);
                let in_line = if facing.is_vertical() {
                    ox.abs() < 0x10 && oy.signum() == dy
                } else {
                    oy.abs() < 0x10 && ox.signum() == dx
                };
                if in_line && monster.phase == ActorPhase::Active {
                    monster.timer = BOOMERANG_STUN;
                }
            }
        }
        None => {}
    }
    Ok(())
}

/// Moves the player one pixel. Returns true if the player moved.
fn step(world: &mut WorldState, env: &GameEnv<'_>, dir: Direction) -> Result<bool, EngineError> {
    let (x, y) = (world.player.x(), world.player.y());
    let hit = collides_with_tile_moving(&world.tiles, env.config(), x, y, dir, true);
    if hit.collides {
        match hit.behavior {
            TileBehavior::Door if !world.is_overworld() => {
                doors::try_unlock(world, env, dir)?;
            }
            TileBehavior::Cave if world.is_overworld() && dir == Direction::UP => {
                world.goto(Goto::Stairs(TileBehavior::Cave));
            }
            _ => {}
        }
        return Ok(false);
    }

    let under = world.tiles.at_pixel(x + 8, y + PROBE_Y);
    if matches!(under, TileBehavior::Sand | TileBehavior::SlowStairs) && world.frame & 1 == 1 {
        return Ok(false);
    }

    world.player.position = world.player.position.offset(dir, 1);
    world.player.moving = dir;

    let now = world.tiles.at_pixel(world.player.x() + 8, world.player.y() + PROBE_Y);
    if now == TileBehavior::Stairs
        && under != TileBehavior::Stairs
        && !world.is_overworld()
        && world.room_kind == RoomKind::Normal
    {
        world.goto(Goto::Stairs(TileBehavior::Stairs));
    }
    Ok(true)
}

/// Starts the mode that takes the player out of the room, if any.
fn check_exit(world: &mut WorldState, dir: Direction) {
    let (x, y) = (world.player.x(), world.player.y());
    match world.room_kind {
        RoomKind::Cave => {
            if dir == Direction::DOWN && y >= CAVE_START.y {
                world.goto(Goto::ExitCave);
            }
        }
        RoomKind::Cellar => {
            if dir == Direction::UP && y <= CELLAR_START.y {
                world.goto(Goto::LeaveCellar);
            }
        }
        RoomKind::Normal => {
            let (left, right, up, down) = if world.is_overworld() {
                OVERWORLD_EDGES
            } else {
                UNDERWORLD_EDGES
            };
            let leaving = (dir == Direction::LEFT && x <= left)
                || (dir == Direction::RIGHT && x >= right)
                || (dir == Direction::UP && y <= up)
                || (dir == Direction::DOWN && y >= down);
            if leaving && world.pending().is_none() {
                world.goto(Goto::Leave(dir));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Profile;

    #[test]
    fn overworld_edges_start_a_leave() {
        let mut world = WorldState::new(0, Profile::default());
        world.player.position = Point::new(0xF0, 0x80);
        check_exit(&mut world, Direction::RIGHT);
        assert_eq!(world.pending(), Some(&Goto::Leave(Direction::RIGHT)));
    }

    #[test]
    fn cave_exit_needs_downward_motion() {
        let mut world = WorldState::new(0, Profile::default());
        world.room_kind = RoomKind::Cave;
        world.player.position = CAVE_START;
        check_exit(&mut world, Direction::LEFT);
        assert!(world.pending().is_none());
        check_exit(&mut world, Direction::DOWN);
        assert_eq!(world.pending(), Some(&Goto::ExitCave));
    }
}
