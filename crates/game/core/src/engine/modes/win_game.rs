//! Ending sequence after the final triforce.

use crate::engine::{CleanupHook, EngineError, GameMode, Goto, Machine};
use crate::env::{GameEnv, Song};
use crate::state::{Direction, HostRequest, WorldState, countdown};

/// Highest quest index.
pub const LAST_QUEST: u8 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WinGameState {
    #[default]
    Start,
    Text1,
    Stand,
    Hold1,
    Colors,
    Hold2,
    Text2,
    Hold3,
    NoObjects,
    Credits,
}

impl WinGameState {
    /// Ticks the stage lasts; `Start` and `NoObjects` are single-step.
    pub const fn budget(self) -> u16 {
        match self {
            Self::Start | Self::NoObjects => 0,
            Self::Text1 => 0x60,
            Self::Stand => 0x40,
            Self::Hold1 => 0x40,
            Self::Colors => 0x20,
            Self::Hold2 => 0x40,
            Self::Text2 => 0x80,
            Self::Hold3 => 0x40,
            Self::Credits => 0x180,
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::Text1),
            Self::Text1 => Some(Self::Stand),
            Self::Stand => Some(Self::Hold1),
            Self::Hold1 => Some(Self::Colors),
            Self::Colors => Some(Self::Hold2),
            Self::Hold2 => Some(Self::Text2),
            Self::Text2 => Some(Self::Hold3),
            Self::Hold3 => Some(Self::NoObjects),
            Self::NoObjects => Some(Self::Credits),
            Self::Credits => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WinGameMachine {
    pub state: WinGameState,
    pub timer: u16,
}

impl WinGameMachine {
    pub fn new() -> Self {
        Self::default()
    }

    fn advance(&mut self) -> bool {
        match self.state.next() {
            Some(next) => {
                self.state = next;
                self.timer = next.budget();
                true
            }
            None => false,
        }
    }
}

pub fn update(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let Machine::WinGame(win) = machine else {
        return Err(machine.mismatch(GameMode::WinGame));
    };

    match win.state {
        WinGameState::Start => {
            env.play_song(Song::Ending);
            world.cleanup = Some(CleanupHook::ResetPalette);
            world.player.moving = Direction::empty();
            win.advance();
        }
        WinGameState::NoObjects => {
            world.actors.clear();
            world.edge_spawns.clear();
            win.advance();
        }
        WinGameState::Colors => {
            world.palette.color_seq = (win.timer & 7) as u8;
            if countdown(&mut win.timer) {
                world.palette.color_seq = 0;
                win.advance();
            }
        }
        _ => {
            if countdown(&mut win.timer) && !win.advance() {
                let profile = &mut world.profile;
                profile.quest = (profile.quest + 1).min(LAST_QUEST);
                world.host_requests.push(HostRequest::SaveProfile);
                tracing::info!(quest = world.profile.quest, "game won");
                world.goto(Goto::Menu);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_run_in_order_and_end_after_credits() {
        let mut state = WinGameState::Start;
        let mut seen = vec![state];
        while let Some(next) = state.next() {
            seen.push(next);
            state = next;
        }
        assert_eq!(seen.len(), 10);
        assert_eq!(state, WinGameState::Credits);
        assert_eq!(WinGameState::Credits.budget(), 0x180);
    }
}
