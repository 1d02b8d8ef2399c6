//! End-of-tick room checks.
//!
//! Hooks run after the actor flush, in priority order, and apply the room
//! rules that depend on the whole tick's outcome: secrets, shutters, bombed
//! doors, statues, the item fanfare and B-item auto-select.

use std::sync::{Arc, OnceLock};

use super::doors;
use super::errors::EngineError;
use super::rooms::{self, STATUE_PERIOD};
use crate::actors;
use crate::env::{GameEnv, SecretTrigger, SoundEffect};
use crate::state::{
    ActorKind, Direction, DoorType, ObjectFlags, Point, TimerKey, WorldState, countdown,
};

/// A rule applied once per playing tick.
///
/// Hooks are executed in priority order (lower priority values execute first).
pub trait FrameHook: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the priority of this hook. Lower values execute first.
    fn priority(&self) -> i32 {
        0
    }

    /// Cheap pre-check on the world state.
    fn should_trigger(&self, world: &WorldState) -> bool;

    fn apply(&self, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError>;
}

fn room_cleared(world: &WorldState) -> bool {
    world.actors.monster_count() == 0 && world.edge_spawns.is_empty()
}

/// Room secrets unlocked by fighting.
#[derive(Debug)]
pub struct SecretHook;

impl FrameHook for SecretHook {
    fn name(&self) -> &'static str {
        "secret"
    }

    fn should_trigger(&self, world: &WorldState) -> bool {
        world.economy.room_kill_count > 0 || room_cleared(world)
    }

    fn apply(&self, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
        let room = world.current_room(env)?;
        let flags = world.room_flags();
        match room.secret {
            SecretTrigger::FoesDoor if room_cleared(world) => {
                let closed = Direction::CARDINALS.into_iter().any(|dir| {
                    room.doors.get(dir) == DoorType::Shutter && !doors::is_door_open(world, dir)
                });
                if closed {
                    world.doors.shutters_requested = true;
                }
            }
            SecretTrigger::FoesItem
                if room_cleared(world) && !flags.objects.contains(ObjectFlags::SECRET_FOUND) =>
            {
                world.room_flags_mut().objects |= ObjectFlags::SECRET_FOUND;
                if let Some(item) = room.item {
                    if !flags.objects.contains(rooms::item_flag(room)) {
                        actors::spawn_item(world, item.item, item.position, true)?;
                    }
                }
                env.effect(SoundEffect::Secret);
                tracing::debug!(room = %world.room_id, "room item revealed");
            }
            SecretTrigger::Ringleader if world.economy.room_kill_count > 0 => {
                for actor in world.actors.iter_mut().filter(|a| a.kind.is_monster() && !a.deleted) {
                    actor.kill();
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Opens shutters once something asked for it.
#[derive(Debug)]
pub struct ShutterHook;

impl FrameHook for ShutterHook {
    fn name(&self) -> &'static str {
        "shutter"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn should_trigger(&self, world: &WorldState) -> bool {
        world.doors.shutters_requested
    }

    fn apply(&self, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
        world.doors.shutters_requested = false;
        doors::open_shutters(world, env)?;
        world.room_flags_mut().objects |= ObjectFlags::SHUTTERS_OPEN;
        Ok(())
    }
}

/// Bombable walls: arms the trigger, then opens the door when it runs out.
#[derive(Debug)]
pub struct DoorHook;

impl FrameHook for DoorHook {
    fn name(&self) -> &'static str {
        "door"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn should_trigger(&self, world: &WorldState) -> bool {
        !world.is_overworld()
    }

    fn apply(&self, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
        if let Some(triggered) = &mut world.doors.triggered {
            triggered.delay = triggered.delay.saturating_sub(1);
            if triggered.delay == 0 {
                let dir = triggered.dir;
                world.doors.triggered = None;
                doors::open_door(world, env, dir)?;
            }
            return Ok(());
        }

        let room = world.current_room(env)?;
        if let Some(dir) = doors::find_bombed_door(world, room) {
            doors::trigger_door(world, dir);
            tracing::debug!(room = %world.room_id, ?dir, "bombable door triggered");
        }
        Ok(())
    }
}

/// Statues spit a fireball at the player on a fixed cadence.
#[derive(Debug)]
pub struct StatueHook;

impl FrameHook for StatueHook {
    fn name(&self) -> &'static str {
        "statue"
    }

    fn priority(&self) -> i32 {
        30
    }

    fn should_trigger(&self, world: &WorldState) -> bool {
        !world.timers.is_running(TimerKey::Statue)
    }

    fn apply(&self, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
        world.timers.set(TimerKey::Statue, STATUE_PERIOD);
        let room = world.current_room(env)?;
        for &statue in &room.statues {
            let aim = aim_at(statue, world.player.position);
            let id = actors::spawn(world, ActorKind::Fireball, statue)?;
            if let Some(fireball) = world.actors.get_mut(id) {
                fireball.facing = aim;
                fireball.moving = aim;
            }
        }
        if !room.statues.is_empty() {
            env.effect(SoundEffect::Fireball);
        }
        Ok(())
    }
}

/// Direction from `from` toward `to`; axes closer than 8 px are dropped.
pub fn aim_at(from: Point, to: Point) -> Direction {
    let mut dir = Direction::empty();
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    if dx > 8 {
        dir |= Direction::RIGHT;
    } else if dx < -8 {
        dir |= Direction::LEFT;
    }
    if dy > 8 {
        dir |= Direction::DOWN;
    } else if dy < -8 {
        dir |= Direction::UP;
    }
    if dir.is_empty() { Direction::DOWN } else { dir }
}

/// Ends the item-hold pose.
#[derive(Debug)]
pub struct FanfareHook;

impl FrameHook for FanfareHook {
    fn name(&self) -> &'static str {
        "fanfare"
    }

    fn priority(&self) -> i32 {
        40
    }

    fn should_trigger(&self, world: &WorldState) -> bool {
        world.fanfare.is_some()
    }

    fn apply(&self, world: &mut WorldState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
        if let Some(fanfare) = &mut world.fanfare {
            if countdown(&mut fanfare.timer) {
                world.fanfare = None;
            }
        }
        Ok(())
    }
}

/// Moves the B selection off an exhausted item.
#[derive(Debug)]
pub struct AutoSelectHook;

impl FrameHook for AutoSelectHook {
    fn name(&self) -> &'static str {
        "auto_select"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn should_trigger(&self, _world: &WorldState) -> bool {
        true
    }

    fn apply(&self, world: &mut WorldState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
        if world.profile.inventory.auto_select() {
            tracing::debug!(selected = ?world.profile.inventory.selected, "b item auto-selected");
        }
        Ok(())
    }
}

/// Returns the default set of hooks that should be applied after every playing tick.
/// Hooks are returned in an Arc for efficient sharing without cloning.
pub fn default_hooks() -> Arc<[Arc<dyn FrameHook>]> {
    static HOOKS: OnceLock<Arc<[Arc<dyn FrameHook>]>> = OnceLock::new();
    HOOKS
        .get_or_init(|| {
            let mut hooks: Vec<Arc<dyn FrameHook>> = vec![
                Arc::new(SecretHook),
                Arc::new(ShutterHook),
                Arc::new(DoorHook),
                Arc::new(StatueHook),
                Arc::new(FanfareHook),
                Arc::new(AutoSelectHook),
            ];
            hooks.sort_by_key(|h| h.priority());
            hooks.into()
        })
        .clone()
}

/// Runs every triggered hook.
pub fn run_hooks(world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    for hook in default_hooks().iter() {
        if hook.should_trigger(world) {
            hook.apply(world, env)?;
        }
    }
    Ok(())
}
