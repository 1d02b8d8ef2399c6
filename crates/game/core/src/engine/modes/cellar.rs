//! Cellar descent, play and exit.

use super::{FADE_TICKS, fade_toward, room_darkness};
use crate::engine::{EngineError, GameMode, Goto, Machine, play, rooms};
use crate::env::{GameEnv, RoomId};
use crate::state::{Direction, PaletteState, Point, StatusBar, WorldState};

/// Where the player appears at the foot of the ladder.
pub const CELLAR_START: Point = Point::new(0x30, 0x44);
/// Walk-in target below the ladder.
pub const CELLAR_WALK_Y: i32 = 0x60;
/// Players left of this x take the first exit.
pub const CELLAR_SPLIT_X: i32 = 0x80;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellarState {
    #[default]
    Start,
    FadeOut,
    LoadRoom,
    FadeIn,
    Walk,
    Play,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellarMachine {
    pub state: CellarState,
    pub timer: u16,
    pub cellar: RoomId,
}

impl CellarMachine {
    pub fn new() -> Self {
        Self {
            state: CellarState::Start,
            timer: 0,
            cellar: RoomId::default(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == CellarState::Play
    }
}

impl Default for CellarMachine {
    fn default() -> Self {
        Self::new()
    }
}

pub fn update_play(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let Machine::PlayCellar(cellar) = machine else {
        return Err(machine.mismatch(GameMode::PlayCellar));
    };

    match cellar.state {
        CellarState::Start => {
            let room = world.current_room(env)?;
            let stairs = room.stairs.ok_or(EngineError::MissingStairs {
                world: world.world_id,
                room: world.room_id,
            })?;
            cellar.cellar = stairs.cellar;
            cellar.timer = FADE_TICKS;
            cellar.state = CellarState::FadeOut;
        }
        CellarState::FadeOut => {
            if fade_toward(world, &mut cellar.timer, FADE_TICKS, PaletteState::DARK) {
                cellar.state = CellarState::LoadRoom;
            }
        }
        CellarState::LoadRoom => {
            rooms::load_room(world, env, world.world_id, cellar.cellar)?;
            world.player.position = CELLAR_START;
            world.player.facing = Direction::DOWN;
            rooms::populate_room(world, env)?;
            cellar.timer = FADE_TICKS;
            cellar.state = CellarState::FadeIn;
        }
        CellarState::FadeIn => {
            if fade_toward(world, &mut cellar.timer, FADE_TICKS, 0) {
                cellar.state = CellarState::Walk;
            }
        }
        CellarState::Walk => {
            if world.walk_player_toward(Direction::DOWN, CELLAR_WALK_Y) {
                world.player.moving = Direction::empty();
                world.status_bar = StatusBar::all();
                cellar.state = CellarState::Play;
            }
        }
        CellarState::Play => play::tick(world, env)?,
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeaveCellarState {
    #[default]
    Start,
    FadeOut,
    LoadRoom,
    FadeIn,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeaveCellarMachine {
    pub state: LeaveCellarState,
    pub timer: u16,
    pub target: RoomId,
}

impl LeaveCellarMachine {
    pub fn new() -> Self {
        Self {
            state: LeaveCellarState::Start,
            timer: 0,
            target: RoomId::default(),
        }
    }
}

impl Default for LeaveCellarMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Exit a cellar leads to from the player's side of the room.
pub fn cellar_exit(exits: [RoomId; 2], player_x: i32) -> RoomId {
    if player_x < CELLAR_SPLIT_X { exits[0] } else { exits[1] }
}

pub fn update_leave(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let Machine::LeaveCellar(leave) = machine else {
        return Err(machine.mismatch(GameMode::LeaveCellar));
    };

    match leave.state {
        LeaveCellarState::Start => {
            let room = world.current_room(env)?;
            let exits = room.cellar_exits.ok_or(EngineError::MissingCellarExit {
                world: world.world_id,
                room: world.room_id,
            })?;
            leave.target = cellar_exit(exits, world.player.x());
            leave.timer = FADE_TICKS;
            leave.state = LeaveCellarState::FadeOut;
        }
        LeaveCellarState::FadeOut => {
            if fade_toward(world, &mut leave.timer, FADE_TICKS, PaletteState::DARK) {
                leave.state = LeaveCellarState::LoadRoom;
            }
        }
        LeaveCellarState::LoadRoom => {
            world.entrances.pop();
            rooms::load_room(world, env, world.world_id, leave.target)?;
            let room = world.current_room(env)?;
            let stairs = room.stairs.ok_or(EngineError::MissingStairs {
                world: world.world_id,
                room: world.room_id,
            })?;
            world.player.position = stairs.position;
            world.player.facing = Direction::DOWN;
            leave.timer = FADE_TICKS;
            leave.state = LeaveCellarState::FadeIn;
        }
        LeaveCellarState::FadeIn => {
            let dark = world.current_world(env)?.is_dark(world.room_id);
            if fade_toward(world, &mut leave.timer, FADE_TICKS, room_darkness(dark)) {
                world.goto(Goto::Enter(Direction::empty()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_follows_player_side() {
        let exits = [RoomId(0x21), RoomId(0x24)];
        assert_eq!(cellar_exit(exits, 0x7F), RoomId(0x21));
        assert_eq!(cellar_exit(exits, 0x80), RoomId(0x24));
    }

    #[test]
    fn cellar_reports_init_until_playing() {
        let mut machine = CellarMachine::new();
        assert!(!machine.is_playing());
        machine.state = CellarState::Play;
        assert!(machine.is_playing());
    }
}
