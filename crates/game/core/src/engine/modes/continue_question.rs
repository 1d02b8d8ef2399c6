//! Continue / Save / Retry prompt after a game over.

use crate::engine::{EngineError, GameMode, Goto, Machine};
use crate::env::{Buttons, GameEnv, SoundEffect, WorldId};
use crate::state::{HEART_HP, HostRequest, WorldState};

/// Hearts restored when continuing.
pub const CONTINUE_HEARTS: u16 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContinueOption {
    #[default]
    Continue,
    Save,
    Retry,
}

impl ContinueOption {
    const ALL: [Self; 3] = [Self::Continue, Self::Save, Self::Retry];

    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self as usize + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinueMachine {
    pub selected: ContinueOption,
}

impl ContinueMachine {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn update(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let Machine::Continue(question) = machine else {
        return Err(machine.mismatch(GameMode::ContinueQuestion));
    };

    let frame = world.frame;
    if env.is_button_pressing(frame, Buttons::SELECT) || env.is_button_pressing(frame, Buttons::DOWN) {
        question.selected = question.selected.next();
        env.effect(SoundEffect::Cursor);
    } else if env.is_button_pressing(frame, Buttons::UP) {
        question.selected = question.selected.previous();
        env.effect(SoundEffect::Cursor);
    } else if env.is_button_pressing(frame, Buttons::START) {
        match question.selected {
            ContinueOption::Continue => {
                let profile = &mut world.profile;
                profile.hp = (CONTINUE_HEARTS * HEART_HP).min(profile.max_hp());
                world.goto(Goto::restart(WorldId::OVERWORLD));
            }
            ContinueOption::Save | ContinueOption::Retry => {
                world.host_requests.push(HostRequest::SaveProfile);
                world.goto(Goto::Menu);
            }
        }
        tracing::debug!(choice = %question.selected, "continue prompt answered");
    }
    Ok(())
}
