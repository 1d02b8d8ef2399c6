//! Walking out through a door opening to the room edge.

use crate::engine::{EngineError, GameMode, Goto, Machine};
use crate::env::GameEnv;
use crate::state::{Direction, WorldState};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeaveMachine {
    pub dir: Direction,
}

impl LeaveMachine {
    pub fn new(dir: Direction) -> Self {
        Self { dir }
    }
}

/// Coordinate on the walk axis where the room edge lies.
pub fn edge_coordinate(dir: Direction) -> i32 {
    if dir == Direction::LEFT {
        0
    } else if dir == Direction::RIGHT {
        0xF0
    } else if dir == Direction::UP {
        0x40
    } else {
        0xE0
    }
}

pub fn update(machine: &mut Machine, world: &mut WorldState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
    let Machine::Leave(leave) = machine else {
        return Err(machine.mismatch(GameMode::Leave));
    };

    let dir = leave.dir.primary();
    if world.walk_player_toward(dir, edge_coordinate(dir)) {
        world.goto(Goto::Scroll(dir));
    }
    Ok(())
}
