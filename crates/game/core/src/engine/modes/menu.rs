//! Title demo and game menu.

use crate::engine::{EngineError, GameMode, Goto, Machine};
use crate::env::{Buttons, GameEnv, WorldId};
use crate::state::WorldState;

pub fn update_demo(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    if !matches!(machine, Machine::Demo) {
        return Err(machine.mismatch(GameMode::Demo));
    }
    if env.is_button_pressing(world.frame, Buttons::START) {
        world.goto(Goto::Menu);
    }
    Ok(())
}

pub fn update_menu(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    if !matches!(machine, Machine::GameMenu) {
        return Err(machine.mismatch(GameMode::GameMenu));
    }
    if env.is_button_pressing(world.frame, Buttons::START) {
        world.goto(Goto::restart(WorldId::OVERWORLD));
    }
    Ok(())
}
