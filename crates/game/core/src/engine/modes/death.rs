//! Player death sequence.
//!
//! Every stage has a fixed budget; nothing the player does can shorten it.

use crate::engine::{CleanupHook, EngineError, GameMode, Goto, Machine};
use crate::env::{Canvas, GameEnv, Song, SoundEffect};
use crate::state::{ActorKind, Direction, PaletteState, WorldState, countdown};

pub const FLASH_TICKS: u16 = 0x20;
pub const WAIT1_TICKS: u16 = 6;
pub const TURN_STEPS: u8 = 16;
pub const TURN_TICKS: u16 = 5;
pub const FADE_STEPS: u8 = 4;
pub const FADE_STEP_TICKS: u16 = 10;
pub const GRAY_TICKS: u16 = 0x18;
pub const SPARK_TICKS: [u16; 2] = [10, 4];
pub const WAIT2_TICKS: u16 = 0x2E;

/// Facing order while the player spins.
pub const TURN_ORDER: [Direction; 4] = [Direction::DOWN, Direction::LEFT, Direction::UP, Direction::RIGHT];

/// Palette row of the player sprite and the gray it turns.
pub const PLAYER_PALETTE: u8 = 4;
pub const GRAY_COLOR: u8 = 0x10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeathState {
    #[default]
    Start,
    Flash,
    Wait1,
    Turn,
    Fade,
    GrayPlayer,
    Spark,
    Wait2,
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeathMachine {
    pub state: DeathState,
    pub timer: u16,
    /// Steps taken in the current multi-step stage.
    pub step: u8,
}

impl DeathMachine {
    pub fn new() -> Self {
        Self::default()
    }

    fn enter(&mut self, state: DeathState, timer: u16) {
        self.state = state;
        self.timer = timer;
        self.step = 0;
    }
}

pub fn update(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let Machine::Death(death) = machine else {
        return Err(machine.mismatch(GameMode::Death));
    };

    match death.state {
        DeathState::Start => {
            env.stop_all();
            world.actors.clear();
            world.edge_spawns.clear();
            world.fanfare = None;
            world.cleanup = Some(CleanupHook::ResetPalette);
            world.player.moving = Direction::empty();
            death.enter(DeathState::Flash, FLASH_TICKS);
        }
        DeathState::Flash => {
            if countdown(&mut death.timer) {
                death.enter(DeathState::Wait1, WAIT1_TICKS);
            }
        }
        DeathState::Wait1 => {
            if countdown(&mut death.timer) {
                env.play_song(Song::Death);
                death.enter(DeathState::Turn, TURN_TICKS);
            }
        }
        DeathState::Turn => {
            if countdown(&mut death.timer) {
                world.player.facing = TURN_ORDER[death.step as usize % TURN_ORDER.len()];
                death.step += 1;
                if death.step == TURN_STEPS {
                    death.enter(DeathState::Fade, FADE_STEP_TICKS);
                } else {
                    death.timer = TURN_TICKS;
                }
            }
        }
        DeathState::Fade => {
            if countdown(&mut death.timer) {
                world.palette.dark_step = (world.palette.dark_step + 1).min(PaletteState::DARK);
                death.step += 1;
                if death.step == FADE_STEPS {
                    death.enter(DeathState::GrayPlayer, GRAY_TICKS);
                } else {
                    death.timer = FADE_STEP_TICKS;
                }
            }
        }
        DeathState::GrayPlayer => {
            if countdown(&mut death.timer) {
                env.effect(SoundEffect::PlayerDie);
                death.enter(DeathState::Spark, SPARK_TICKS[0]);
            }
        }
        DeathState::Spark => {
            if countdown(&mut death.timer) {
                death.step += 1;
                match SPARK_TICKS.get(death.step as usize) {
                    Some(&ticks) => death.timer = ticks,
                    None => death.enter(DeathState::Wait2, WAIT2_TICKS),
                }
            }
        }
        DeathState::Wait2 => {
            if countdown(&mut death.timer) {
                death.enter(DeathState::GameOver, 0);
            }
        }
        DeathState::GameOver => {
            world.profile.stats.deaths = world.profile.stats.deaths.saturating_add(1);
            tracing::info!(deaths = world.profile.stats.deaths, "game over");
            world.goto(Goto::Continue);
        }
    }
    Ok(())
}

pub fn draw(death: &DeathMachine, world: &WorldState, canvas: &mut dyn Canvas) {
    canvas.set_dark_step(world.palette.dark_step);
    match death.state {
        DeathState::GrayPlayer => {
            for index in 1..=3 {
                // Color in the index slot; backends rely on this order.
                canvas.set_color(PLAYER_PALETTE, GRAY_COLOR, index);
            }
            canvas.draw_sprite(ActorKind::Player, 0, world.player.x(), world.player.y(), PLAYER_PALETTE);
        }
        DeathState::Spark | DeathState::Wait2 | DeathState::GameOver => {}
        _ => canvas.draw_sprite(ActorKind::Player, 0, world.player.x(), world.player.y(), PLAYER_PALETTE),
    }
}
