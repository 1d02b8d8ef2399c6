//! Top-level modes, the per-mode machine records and the handler table.

use std::sync::OnceLock;

use strum::{EnumCount, IntoEnumIterator};

use super::errors::EngineError;
use super::modes::{
    self, CaveMachine, CellarMachine, ContinueMachine, DeathMachine, EndLevelMachine,
    EnterMachine, LeaveCellarMachine, LeaveMachine, LoadLevelMachine, ScrollMachine,
    StairsMachine, UnfurlMachine, WinGameMachine,
};
use crate::env::{GameEnv, RoomId, WorldId};
use crate::state::{Direction, EntranceRecord, TileBehavior, WorldState};

/// Top-level game mode.
///
/// `InitPlayCave` and `InitPlayCellar` are internal; hosts see them through
/// [`GameMode::public_mode`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    Demo,
    GameMenu,
    LoadLevel,
    Unfurl,
    Enter,
    Play,
    Leave,
    Scroll,
    ContinueQuestion,
    PlayCellar,
    LeaveCellar,
    PlayCave,
    PlayShortcuts,
    Stairs,
    Death,
    EndLevel,
    WinGame,
    InitPlayCellar,
    InitPlayCave,
}

impl GameMode {
    pub const fn public_mode(self) -> Self {
        match self {
            Self::InitPlayCave => Self::PlayCave,
            Self::InitPlayCellar => Self::PlayCellar,
            other => other,
        }
    }

    /// Modes in which monsters live and the room's object count is tracked.
    pub const fn is_playing(self) -> bool {
        matches!(
            self,
            Self::Play | Self::PlayCave | Self::PlayCellar | Self::PlayShortcuts
        )
    }
}

/// Mode change request, applied after the current step returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Goto {
    Menu,
    LoadLevel {
        world: WorldId,
        /// Restart at the world's start position instead of an arrival point.
        restart: bool,
        arrival: Option<EntranceRecord>,
    },
    Unfurl,
    /// Walk into the current room from `dir`; empty means no walk.
    Enter(Direction),
    /// Pop the entrance stack and walk out of the cave mouth.
    ExitCave,
    Play,
    Leave(Direction),
    Scroll(Direction),
    Stairs(TileBehavior),
    PlayCellar,
    LeaveCellar,
    PlayCave {
        room: RoomId,
        shortcut: bool,
    },
    Death,
    EndLevel,
    WinGame,
    Continue,
}

impl Goto {
    pub const fn load_level(world: WorldId) -> Self {
        Self::LoadLevel {
            world,
            restart: false,
            arrival: None,
        }
    }

    pub const fn restart(world: WorldId) -> Self {
        Self::LoadLevel {
            world,
            restart: true,
            arrival: None,
        }
    }
}

/// Work the outgoing mode leaves for the dispatcher to run on the next mode
/// change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CleanupHook {
    ResetPalette,
    StopEffects,
}

impl CleanupHook {
    pub fn run(self, world: &mut WorldState, env: &GameEnv<'_>) {
        match self {
            Self::ResetPalette => world.palette = Default::default(),
            Self::StopEffects => env.stop_effects(),
        }
    }
}

/// State of the active mode. Exactly one record exists at a time; a `Goto`
/// replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Machine {
    Demo,
    GameMenu,
    LoadLevel(LoadLevelMachine),
    Unfurl(UnfurlMachine),
    Enter(EnterMachine),
    Play,
    Leave(LeaveMachine),
    Scroll(ScrollMachine),
    Continue(ContinueMachine),
    PlayCellar(CellarMachine),
    LeaveCellar(LeaveCellarMachine),
    PlayCave(CaveMachine),
    Stairs(StairsMachine),
    Death(DeathMachine),
    EndLevel(EndLevelMachine),
    WinGame(WinGameMachine),
}

impl Machine {
    /// Internal mode of the record, including the `Init*` aliases.
    pub fn mode(&self) -> GameMode {
        match self {
            Self::Demo => GameMode::Demo,
            Self::GameMenu => GameMode::GameMenu,
            Self::LoadLevel(_) => GameMode::LoadLevel,
            Self::Unfurl(_) => GameMode::Unfurl,
            Self::Enter(_) => GameMode::Enter,
            Self::Play => GameMode::Play,
            Self::Leave(_) => GameMode::Leave,
            Self::Scroll(_) => GameMode::Scroll,
            Self::Continue(_) => GameMode::ContinueQuestion,
            Self::PlayCellar(machine) if machine.is_playing() => GameMode::PlayCellar,
            Self::PlayCellar(_) => GameMode::InitPlayCellar,
            Self::LeaveCellar(_) => GameMode::LeaveCellar,
            Self::PlayCave(machine) if !machine.is_playing() => GameMode::InitPlayCave,
            Self::PlayCave(machine) if machine.shortcut => GameMode::PlayShortcuts,
            Self::PlayCave(_) => GameMode::PlayCave,
            Self::Stairs(_) => GameMode::Stairs,
            Self::Death(_) => GameMode::Death,
            Self::EndLevel(_) => GameMode::EndLevel,
            Self::WinGame(_) => GameMode::WinGame,
        }
    }

    /// Fresh record for a requested mode.
    pub fn enter(goto: Goto) -> Self {
        match goto {
            Goto::Menu => Self::GameMenu,
            Goto::LoadLevel {
                world,
                restart,
                arrival,
            } => Self::LoadLevel(LoadLevelMachine::new(world, restart, arrival)),
            Goto::Unfurl => Self::Unfurl(UnfurlMachine::new()),
            Goto::Enter(dir) => Self::Enter(EnterMachine::new(dir)),
            Goto::ExitCave => Self::Enter(EnterMachine::exit_cave()),
            Goto::Play => Self::Play,
            Goto::Leave(dir) => Self::Leave(LeaveMachine::new(dir)),
            Goto::Scroll(dir) => Self::Scroll(ScrollMachine::new(dir)),
            Goto::Stairs(behavior) => Self::Stairs(StairsMachine::new(behavior)),
            Goto::PlayCellar => Self::PlayCellar(CellarMachine::new()),
            Goto::LeaveCellar => Self::LeaveCellar(LeaveCellarMachine::new()),
            Goto::PlayCave { room, shortcut } => Self::PlayCave(CaveMachine::new(room, shortcut)),
            Goto::Death => Self::Death(DeathMachine::new()),
            Goto::EndLevel => Self::EndLevel(EndLevelMachine::new()),
            Goto::WinGame => Self::WinGame(WinGameMachine::new()),
            Goto::Continue => Self::Continue(ContinueMachine::new()),
        }
    }

    pub(crate) fn mismatch(&self, expected: GameMode) -> EngineError {
        EngineError::MachineMismatch {
            expected,
            found: self.mode(),
        }
    }
}

/// Step function of one mode.
pub type ModeHandler =
    fn(&mut Machine, &mut WorldState, &GameEnv<'_>) -> Result<(), EngineError>;

/// Total mapping from [`GameMode`] to its step function.
pub struct ModeTable {
    handlers: [Option<ModeHandler>; GameMode::COUNT],
}

impl ModeTable {
    /// The table every engine dispatches through, built and checked once.
    pub fn standard() -> Result<&'static ModeTable, EngineError> {
        static TABLE: OnceLock<ModeTable> = OnceLock::new();
        let table = TABLE.get_or_init(ModeTable::build);
        table.validate()?;
        Ok(table)
    }

    fn build() -> Self {
        let mut table = Self {
            handlers: [None; GameMode::COUNT],
        };
        table.register(GameMode::Demo, modes::menu::update_demo);
        table.register(GameMode::GameMenu, modes::menu::update_menu);
        table.register(GameMode::LoadLevel, modes::load_level::update);
        table.register(GameMode::Unfurl, modes::unfurl::update);
        table.register(GameMode::Enter, modes::enter::update);
        table.register(GameMode::Play, modes::play::update);
        table.register(GameMode::Leave, modes::leave::update);
        table.register(GameMode::Scroll, modes::scroll::update);
        table.register(GameMode::ContinueQuestion, modes::continue_question::update);
        table.register(GameMode::PlayCellar, modes::cellar::update_play);
        table.register(GameMode::InitPlayCellar, modes::cellar::update_play);
        table.register(GameMode::LeaveCellar, modes::cellar::update_leave);
        table.register(GameMode::PlayCave, modes::cave::update);
        table.register(GameMode::PlayShortcuts, modes::cave::update);
        table.register(GameMode::InitPlayCave, modes::cave::update);
        table.register(GameMode::Stairs, modes::stairs::update);
        table.register(GameMode::Death, modes::death::update);
        table.register(GameMode::EndLevel, modes::end_level::update);
        table.register(GameMode::WinGame, modes::win_game::update);
        table
    }

    fn register(&mut self, mode: GameMode, handler: ModeHandler) {
        self.handlers[mode as usize] = Some(handler);
    }

    /// Fails on the first mode without a handler.
    pub fn validate(&self) -> Result<(), EngineError> {
        match GameMode::iter().find(|mode| self.handlers[*mode as usize].is_none()) {
            Some(mode) => Err(EngineError::UnmappedMode(mode)),
            None => Ok(()),
        }
    }

    pub fn handler(&self, mode: GameMode) -> Result<ModeHandler, EngineError> {
        self.handlers[mode as usize].ok_or(EngineError::UnmappedMode(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_mode_hides_init_modes() {
        assert_eq!(GameMode::InitPlayCave.public_mode(), GameMode::PlayCave);
        assert_eq!(GameMode::InitPlayCellar.public_mode(), GameMode::PlayCellar);
        for mode in GameMode::iter().filter(|m| !matches!(m, GameMode::InitPlayCave | GameMode::InitPlayCellar)) {
            assert_eq!(mode.public_mode(), mode);
        }
    }

    #[test]
    fn standard_table_is_total() {
        let table = ModeTable::standard().unwrap();
        for mode in GameMode::iter() {
            assert!(table.handler(mode).is_ok(), "{mode} unmapped");
        }
    }

    #[test]
    fn empty_table_reports_first_unmapped_mode() {
        let table = ModeTable {
            handlers: [None; GameMode::COUNT],
        };
        assert_eq!(table.validate(), Err(EngineError::UnmappedMode(GameMode::Demo)));
    }

    #[test]
    fn cave_machine_reports_init_until_playing() {
        let machine = Machine::enter(Goto::PlayCave {
            room: RoomId(0x80),
            shortcut: true,
        });
        assert_eq!(machine.mode(), GameMode::InitPlayCave);
        assert_eq!(machine.mode().public_mode(), GameMode::PlayCave);
    }

    #[test]
    fn playing_modes() {
        assert!(GameMode::PlayShortcuts.is_playing());
        assert!(!GameMode::InitPlayCave.is_playing());
        assert!(!GameMode::Scroll.is_playing());
    }
}
