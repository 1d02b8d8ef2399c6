//! Curtain wipe that reveals a freshly loaded level.

use crate::engine::{EngineError, GameMode, Goto, Machine};
use crate::env::{Canvas, GameEnv};
use crate::state::{Direction, WorldState};

pub const UNFURL_SPEED: i32 = 8;
/// Half the screen; the wipe is done once each side has opened this far.
pub const UNFURL_WIDTH: i32 = 0x80;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnfurlMachine {
    pub started: bool,
    pub width: i32,
}

impl UnfurlMachine {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn update(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let Machine::Unfurl(unfurl) = machine else {
        return Err(machine.mismatch(GameMode::Unfurl));
    };

    if !unfurl.started {
        unfurl.started = true;
        env.play_song(world.current_world(env)?.song);
    }
    unfurl.width = (unfurl.width + UNFURL_SPEED).min(UNFURL_WIDTH);
    if unfurl.width == UNFURL_WIDTH {
        world.goto(Goto::Enter(Direction::empty()));
    }
    Ok(())
}

pub fn draw(unfurl: &UnfurlMachine, world: &WorldState, canvas: &mut dyn Canvas) {
    canvas.draw_room(world.world_id, world.room_id, 0, 0);
    canvas.draw_curtains(UNFURL_WIDTH - unfurl.width, UNFURL_WIDTH + unfurl.width);
}
