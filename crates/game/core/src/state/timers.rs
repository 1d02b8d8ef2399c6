//! Global named timers and per-purpose stun timers.
//!
//! Both decrement once per playing tick and saturate at zero.

use std::collections::BTreeMap;

/// Names of the global countdowns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimerKey {
    /// Monsters frozen by the clock item.
    Clock,
    /// Statue fireball cadence.
    Statue,
    /// Player damage immunity.
    PlayerInvincible,
    /// Sword swing in progress.
    SwordSwing,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalTimers {
    timers: BTreeMap<TimerKey, u16>,
}

impl GlobalTimers {
    pub fn get(&self, key: TimerKey) -> u16 {
        self.timers.get(&key).copied().unwrap_or(0)
    }

    pub fn set(&mut self, key: TimerKey, ticks: u16) {
        self.timers.insert(key, ticks);
    }

    pub fn is_running(&self, key: TimerKey) -> bool {
        self.get(key) > 0
    }

    pub fn tick(&mut self) {
        for value in self.timers.values_mut() {
            *value = value.saturating_sub(1);
        }
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

/// Fixed set of throttles keyed by purpose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StunTimers {
    /// Grace period after a room change before the sword can be swung.
    pub no_sword: u8,
    /// Spacing between red leevers surfacing.
    pub red_leever: u8,
    /// Delay before monsters refresh their idea of where the player is.
    pub observed_player: u8,
    /// Spacing between edge spawns.
    pub edge_spawn: u8,
}

impl StunTimers {
    pub fn tick(&mut self) {
        self.no_sword = self.no_sword.saturating_sub(1);
        self.red_leever = self.red_leever.saturating_sub(1);
        self.observed_player = self.observed_player.saturating_sub(1);
        self.edge_spawn = self.edge_spawn.saturating_sub(1);
    }
}

/// Ticks a countdown and reports whether it has run out.
///
/// A timer set to `n` expires on the `n`th call.
pub fn countdown(timer: &mut u16) -> bool {
    *timer = timer.saturating_sub(1);
    *timer == 0
}
