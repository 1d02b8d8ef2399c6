//! Per-mode sub-machines.
//!
//! Each mode owns a small record stored in [`super::Machine`] and a step
//! function registered in the mode table. Records are replaced wholesale on
//! every mode change, so no handler ever sees another mode's leftovers.
pub mod cave;
pub mod cellar;
pub mod continue_question;
pub mod death;
pub mod end_level;
pub mod enter;
pub mod leave;
pub mod load_level;
pub mod menu;
pub mod play;
pub mod scroll;
pub mod stairs;
pub mod unfurl;
pub mod win_game;

pub use cave::CaveMachine;
pub use cellar::{CellarMachine, LeaveCellarMachine};
pub use continue_question::{ContinueMachine, ContinueOption};
pub use death::DeathMachine;
pub use end_level::EndLevelMachine;
pub use enter::EnterMachine;
pub use leave::LeaveMachine;
pub use load_level::LoadLevelMachine;
pub use scroll::ScrollMachine;
pub use stairs::StairsMachine;
pub use unfurl::UnfurlMachine;
pub use win_game::WinGameMachine;

use crate::state::{PaletteState, WorldState, countdown};

/// Ticks per palette step of a standard fade.
pub const FADE_TICKS: u16 = 9;

/// Steps the palette one notch toward `target` every `ticks` ticks.
///
/// Returns true once the palette sits on `target`.
pub(crate) fn fade_toward(world: &mut WorldState, timer: &mut u16, ticks: u16, target: u8) -> bool {
    let step = &mut world.palette.dark_step;
    if *step == target {
        return true;
    }
    if !countdown(timer) {
        return false;
    }
    if *step < target {
        *step += 1;
    } else {
        *step -= 1;
    }
    if *step == target {
        return true;
    }
    *timer = ticks;
    false
}

/// Palette step a room should be drawn with.
pub(crate) fn room_darkness(dark: bool) -> u8 {
    if dark { PaletteState::DARK } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Profile;

    #[test]
    fn fade_takes_four_steps_of_nine_ticks() {
        let mut world = WorldState::new(0, Profile::default());
        let mut timer = FADE_TICKS;
        let mut ticks = 0;
        while !fade_toward(&mut world, &mut timer, FADE_TICKS, PaletteState::DARK) {
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(ticks + 1, 4 * FADE_TICKS);
        assert_eq!(world.palette.dark_step, PaletteState::DARK);
    }

    #[test]
    fn fade_to_current_step_is_immediate() {
        let mut world = WorldState::new(0, Profile::default());
        let mut timer = FADE_TICKS;
        assert!(fade_toward(&mut world, &mut timer, FADE_TICKS, 0));
        assert_eq!(timer, FADE_TICKS);
    }
}
