//! Cave and shortcut rooms.

use crate::engine::{EngineError, GameMode, Machine, play, rooms};
use crate::env::{GameEnv, RoomId};
use crate::state::{Direction, Point, StatusBar, WorldState, countdown};

pub const CAVE_WAIT: u16 = 0x1B;
pub const CAVE_START: Point = Point::new(0x70, 0xDD);
pub const CAVE_WALK_Y: i32 = 0xD5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaveState {
    #[default]
    Start,
    Wait,
    LoadRoom,
    Walk,
    Play,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaveMachine {
    pub state: CaveState,
    pub timer: u16,
    pub room: RoomId,
    /// Shortcut caves report as `PlayShortcuts`.
    pub shortcut: bool,
}

impl CaveMachine {
    pub fn new(room: RoomId, shortcut: bool) -> Self {
        Self {
            state: CaveState::Start,
            timer: 0,
            room,
            shortcut,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == CaveState::Play
    }
}

pub fn update(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let Machine::PlayCave(cave) = machine else {
        return Err(machine.mismatch(GameMode::PlayCave));
    };

    match cave.state {
        CaveState::Start => {
            cave.timer = CAVE_WAIT;
            cave.state = CaveState::Wait;
        }
        CaveState::Wait => {
            if countdown(&mut cave.timer) {
                cave.state = CaveState::LoadRoom;
            }
        }
        CaveState::LoadRoom => {
            rooms::load_room(world, env, world.world_id, cave.room)?;
            world.palette.dark_step = 0;
            world.player.position = CAVE_START;
            world.player.facing = Direction::UP;
            rooms::populate_room(world, env)?;
            cave.state = CaveState::Walk;
        }
        CaveState::Walk => {
            if world.walk_player_toward(Direction::UP, CAVE_WALK_Y) {
                world.player.moving = Direction::empty();
                world.status_bar = StatusBar::all();
                cave.state = CaveState::Play;
            }
        }
        CaveState::Play => play::tick(world, env)?,
    }
    Ok(())
}
