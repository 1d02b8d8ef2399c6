//! Free play in a normal room.

use crate::engine::{EngineError, GameMode, Machine, play};
use crate::env::GameEnv;
use crate::state::WorldState;

pub fn update(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    if !matches!(machine, Machine::Play) {
        return Err(machine.mismatch(GameMode::Play));
    }
    play::tick(world, env)
}
