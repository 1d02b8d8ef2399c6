//! Walking into a freshly loaded room.

use super::{FADE_TICKS, fade_toward};
use crate::engine::{EngineError, GameMode, Goto, Machine, doors, rooms};
use crate::env::{GameEnv, SoundEffect};
use crate::state::{Direction, DoorType, StatusBar, WorldState, countdown};

/// Ticks spent standing when entering without a direction.
pub const ENTER_WAIT: u16 = 0x0C;
pub const WALK_DISTANCE: i32 = 0x10;
/// Walk past a thick door frame.
pub const DEEP_WALK_DISTANCE: i32 = 0x20;
pub const CAVE_WALK_DISTANCE: i32 = 0x10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnterState {
    #[default]
    Start,
    Wait,
    FadeIn,
    Walk,
    WalkCave,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnterMachine {
    pub state: EnterState,
    /// Direction of travel; empty for a standing entry.
    pub dir: Direction,
    pub timer: u16,
    /// Axis coordinate the walk ends on.
    pub target: i32,
    /// State to resume once the fade-in ends.
    next: EnterState,
    from_cave: bool,
}

impl EnterMachine {
    pub fn new(dir: Direction) -> Self {
        Self {
            state: EnterState::Start,
            dir,
            timer: 0,
            target: 0,
            next: EnterState::Wait,
            from_cave: false,
        }
    }

    /// Entry that first returns to the room on top of the entrance stack.
    pub fn exit_cave() -> Self {
        Self {
            from_cave: true,
            ..Self::new(Direction::empty())
        }
    }
}

pub fn update(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let Machine::Enter(enter) = machine else {
        return Err(machine.mismatch(GameMode::Enter));
    };

    match enter.state {
        EnterState::Start => start(enter, world, env)?,
        EnterState::FadeIn => {
            if fade_toward(world, &mut enter.timer, FADE_TICKS, 0) {
                enter.state = enter.next;
                if enter.state == EnterState::Wait {
                    enter.timer = ENTER_WAIT;
                }
            }
        }
        EnterState::Wait => {
            if countdown(&mut enter.timer) {
                finish(world, env)?;
            }
        }
        EnterState::Walk => {
            if world.walk_player_toward(enter.dir, enter.target) {
                finish(world, env)?;
            }
        }
        EnterState::WalkCave => {
            if world.walk_player_toward(Direction::DOWN, enter.target) {
                finish(world, env)?;
            }
        }
    }
    Ok(())
}

fn start(enter: &mut EnterMachine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    if enter.from_cave {
        let record = world.entrances.pop().ok_or(EngineError::EmptyEntranceStack)?;
        rooms::load_room(world, env, record.world, record.room)?;
        world.player.position = record.position;
        world.player.facing = Direction::DOWN;
        world.emerge_from_mouth = true;
    }

    world.doors.triggered = None;
    let room = world.current_room(env)?;
    let entry = enter.dir.opposite();
    if !entry.is_empty() && room.doors.get(entry) == DoorType::Shutter {
        world.doors.forced_open |= entry;
        doors::update_door_tiles(world, room, entry);
    }

    let walk = if world.emerge_from_mouth {
        world.emerge_from_mouth = false;
        enter.target = world.player.y() + CAVE_WALK_DISTANCE;
        EnterState::WalkCave
    } else if enter.dir.is_empty() {
        enter.timer = ENTER_WAIT;
        EnterState::Wait
    } else {
        let distance = if !world.is_overworld() && room.doors.get(entry).is_deep() {
            DEEP_WALK_DISTANCE
        } else {
            WALK_DISTANCE
        };
        let (dx, dy) = enter.dir.delta();
        enter.target = if enter.dir.is_vertical() {
            world.player.y() + dy * distance
        } else {
            world.player.x() + dx * distance
        };
        EnterState::Walk
    };

    let lit = !world.current_world(env)?.is_dark(world.room_id);
    enter.state = if lit && world.palette.is_dark() {
        enter.next = walk;
        enter.timer = FADE_TICKS;
        EnterState::FadeIn
    } else {
        walk
    };
    Ok(())
}

fn finish(world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let room = world.current_room(env)?;
    let forced = std::mem::take(&mut world.doors.forced_open);
    let mut closed = false;
    for dir in Direction::CARDINALS.into_iter().filter(|dir| forced.contains(*dir)) {
        doors::update_door_tiles(world, room, dir);
        closed |= !doors::is_door_open(world, dir);
    }
    if closed {
        env.effect(SoundEffect::Door);
    }

    world.player.moving = Direction::empty();
    world.status_bar = StatusBar::all();
    rooms::populate_room(world, env)?;
    world.goto(Goto::Play);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_cave_starts_without_direction() {
        let machine = EnterMachine::exit_cave();
        assert!(machine.from_cave);
        assert!(machine.dir.is_empty());
        assert_eq!(machine.state, EnterState::Start);
    }
}
