//! Level-triggered button input.
//!
//! The engine reads the button set once per tick through [`InputOracle`].
//! "Pressing" means down this frame and up the frame before, so an oracle only
//! has to answer `buttons_down` for arbitrary frames.

use bitflags::bitflags;

use crate::state::Direction;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Buttons: u8 {
        const RIGHT  = 1 << 0;
        const LEFT   = 1 << 1;
        const DOWN   = 1 << 2;
        const UP     = 1 << 3;
        const START  = 1 << 4;
        const SELECT = 1 << 5;
        const B      = 1 << 6;
        const A      = 1 << 7;
    }
}

impl Buttons {
    pub const DPAD: Self = Self::RIGHT.union(Self::LEFT).union(Self::DOWN).union(Self::UP);

    /// Directional pad as a direction set. Bit layouts line up.
    pub const fn direction(self) -> Direction {
        Direction::from_bits_truncate(self.intersection(Self::DPAD).bits())
    }
}

pub trait InputOracle: Send + Sync {
    /// Buttons held during `frame`.
    fn buttons_down(&self, frame: u64) -> Buttons;

    fn is_button_down(&self, frame: u64, button: Buttons) -> bool {
        self.buttons_down(frame).contains(button)
    }

    fn is_button_pressing(&self, frame: u64, button: Buttons) -> bool {
        let previous = match frame.checked_sub(1) {
            Some(previous) => self.buttons_down(previous),
            None => Buttons::empty(),
        };
        self.buttons_down(frame).contains(button) && !previous.contains(button)
    }
}

/// One timestamped change of the held button set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputEvent {
    pub frame: u64,
    pub buttons: Buttons,
}

impl InputEvent {
    pub const fn new(frame: u64, buttons: Buttons) -> Self {
        Self { frame, buttons }
    }
}

/// Input replayed from timestamped events.
///
/// Each event holds its button set until the next event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ScriptedInput {
    events: Vec<InputEvent>,
}

impl ScriptedInput {
    pub fn new(mut events: Vec<InputEvent>) -> Self {
        events.sort_by_key(|event| event.frame);
        Self { events }
    }

    /// Holds `buttons` from `from` until (not including) `until`.
    pub fn hold(mut self, from: u64, until: u64, buttons: Buttons) -> Self {
        self.events.push(InputEvent::new(from, buttons));
        self.events.push(InputEvent::new(until, Buttons::empty()));
        self.events.sort_by_key(|event| event.frame);
        self
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }
}

impl InputOracle for ScriptedInput {
    fn buttons_down(&self, frame: u64) -> Buttons {
        let index = self.events.partition_point(|event| event.frame <= frame);
        index
            .checked_sub(1)
            .map(|i| self.events[i].buttons)
            .unwrap_or_default()
    }
}

/// Input that never presses anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl InputOracle for NoInput {
    fn buttons_down(&self, _frame: u64) -> Buttons {
        Buttons::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_hold_until_replaced() {
        let input = ScriptedInput::new(vec![
            InputEvent::new(10, Buttons::LEFT),
            InputEvent::new(20, Buttons::A | Buttons::LEFT),
            InputEvent::new(25, Buttons::empty()),
        ]);
        assert_eq!(input.buttons_down(9), Buttons::empty());
        assert_eq!(input.buttons_down(10), Buttons::LEFT);
        assert_eq!(input.buttons_down(19), Buttons::LEFT);
        assert!(input.is_button_down(22, Buttons::A));
        assert_eq!(input.buttons_down(30), Buttons::empty());
    }

    #[test]
    fn pressing_is_edge_triggered() {
        let input = ScriptedInput::default().hold(5, 8, Buttons::START);
        assert!(!input.is_button_pressing(4, Buttons::START));
        assert!(input.is_button_pressing(5, Buttons::START));
        assert!(!input.is_button_pressing(6, Buttons::START));
        assert!(input.is_button_down(6, Buttons::START));
    }

    #[test]
    fn dpad_maps_onto_directions() {
        assert_eq!((Buttons::UP | Buttons::A).direction(), Direction::UP);
        assert_eq!(
            (Buttons::DOWN | Buttons::RIGHT).direction(),
            Direction::DOWN | Direction::RIGHT
        );
        assert!(Buttons::START.direction().is_empty());
    }
}
