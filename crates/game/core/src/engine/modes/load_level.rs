//! Switching worlds.

use super::room_darkness;
use crate::engine::{EngineError, GameMode, Goto, Machine, rooms};
use crate::env::{GameEnv, WorldId};
use crate::state::{
    Actor, Direction, DoorControl, EntranceRecord, StatusBar, StunTimers, WorldState, countdown,
};

/// Ticks between loading a level and starting the unfurl.
pub const LOAD_WAIT: u16 = 0x12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadLevelState {
    #[default]
    Load,
    Wait,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadLevelMachine {
    pub state: LoadLevelState,
    pub world: WorldId,
    pub restart: bool,
    pub arrival: Option<EntranceRecord>,
    pub timer: u16,
}

impl LoadLevelMachine {
    pub fn new(world: WorldId, restart: bool, arrival: Option<EntranceRecord>) -> Self {
        Self {
            state: LoadLevelState::Load,
            world,
            restart,
            arrival,
            timer: 0,
        }
    }
}

pub fn update(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let Machine::LoadLevel(load) = machine else {
        return Err(machine.mismatch(GameMode::LoadLevel));
    };

    match load.state {
        LoadLevelState::Load => {
            load_level(world, env, load.world, load.restart, load.arrival)?;
            load.timer = LOAD_WAIT;
            load.state = LoadLevelState::Wait;
        }
        LoadLevelState::Wait => {
            if countdown(&mut load.timer) {
                world.goto(Goto::Unfurl);
            }
        }
    }
    Ok(())
}

/// Resets per-world state and places the player in `target`.
pub fn load_level(
    world: &mut WorldState,
    env: &GameEnv<'_>,
    target: WorldId,
    restart: bool,
    arrival: Option<EntranceRecord>,
) -> Result<(), EngineError> {
    env.stop_all();
    let def = env.world(target)?;

    let entering_level = world.is_overworld() && !target.is_overworld() && !restart;
    let origin = entering_level.then(|| world.entrances.peek().copied()).flatten();

    world.actors.clear();
    world.history.clear();
    world.entrances.clear();
    world.edge_spawns.clear();
    world.timers.clear();
    world.stun = StunTimers::default();
    world.doors = DoorControl::default();
    world.fanfare = None;
    world.economy.reset_world();
    if let Some(origin) = origin {
        world.entrances.push(origin);
    }

    let arrival = arrival.filter(|record| !restart && record.world == target);
    let (room, position, facing) = match arrival {
        Some(record) => (record.room, record.position, record.facing),
        None => (def.entry_room, def.start_position, Direction::UP),
    };

    rooms::load_room(world, env, target, room)?;
    world.player = Actor::player(position);
    world.player.facing = facing;

    let room_def = world.current_room(env)?;
    world.emerge_from_mouth = arrival.is_some() && room_def.cave_mouth == Some(position);
    world.palette.dark_step = room_darkness(def.is_dark(room));
    world.palette.color_seq = 0;
    world.status_bar = StatusBar::empty();

    tracing::info!(world = %def.name, room = %room, restart, "level loaded");
    Ok(())
}
