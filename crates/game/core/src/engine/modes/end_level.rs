//! Triforce celebration and return to the overworld.

use crate::engine::{EngineError, GameMode, Goto, Machine};
use crate::env::{Canvas, GameEnv, Song, WorldId};
use crate::state::{Direction, WorldState, countdown};

pub const WAIT1_TICKS: u16 = 0x30;
pub const FLASH_TICKS: u16 = 0x30;
/// Hit points restored per tick while filling hearts.
pub const FILL_HP_PER_TICK: u16 = 6;
pub const WAIT2_TICKS: u16 = 0x80;
/// Curtain width at which the furl ends.
pub const FURL_WIDTH: i32 = 0x80;
pub const WAIT3_TICKS: u16 = 0x80;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndLevelState {
    #[default]
    Start,
    Wait1,
    Flash,
    FillHearts,
    Wait2,
    Furl,
    Wait3,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndLevelMachine {
    pub state: EndLevelState,
    pub timer: u16,
    /// Width of each closing curtain.
    pub curtain: i32,
}

impl EndLevelMachine {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn update(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let Machine::EndLevel(end) = machine else {
        return Err(machine.mismatch(GameMode::EndLevel));
    };

    match end.state {
        EndLevelState::Start => {
            env.push_song(Song::Triforce);
            world.actors.clear();
            world.edge_spawns.clear();
            world.player.moving = Direction::empty();
            end.timer = WAIT1_TICKS;
            end.state = EndLevelState::Wait1;
        }
        EndLevelState::Wait1 => {
            if countdown(&mut end.timer) {
                end.timer = FLASH_TICKS;
                end.state = EndLevelState::Flash;
            }
        }
        EndLevelState::Flash => {
            if countdown(&mut end.timer) {
                end.state = EndLevelState::FillHearts;
            }
        }
        EndLevelState::FillHearts => {
            let profile = &mut world.profile;
            profile.heal(FILL_HP_PER_TICK);
            if profile.hp >= profile.max_hp() {
                end.timer = WAIT2_TICKS;
                end.state = EndLevelState::Wait2;
            }
        }
        EndLevelState::Wait2 => {
            if countdown(&mut end.timer) {
                end.state = EndLevelState::Furl;
            }
        }
        EndLevelState::Furl => {
            end.curtain += 1;
            if end.curtain >= FURL_WIDTH {
                end.timer = WAIT3_TICKS;
                end.state = EndLevelState::Wait3;
            }
        }
        EndLevelState::Wait3 => {
            if countdown(&mut end.timer) {
                let arrival = world
                    .entrances
                    .iter()
                    .find(|record| record.world.is_overworld())
                    .copied();
                tracing::info!(level = world.level_number, "level complete");
                world.goto(Goto::LoadLevel {
                    world: WorldId::OVERWORLD,
                    restart: arrival.is_none(),
                    arrival,
                });
            }
        }
    }
    Ok(())
}

pub fn draw(end: &EndLevelMachine, world: &WorldState, canvas: &mut dyn Canvas) {
    canvas.draw_room(world.world_id, world.room_id, 0, 0);
    if end.curtain > 0 {
        canvas.draw_curtains(end.curtain, 0x100 - end.curtain);
    }
}
