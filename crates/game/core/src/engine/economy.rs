//! Kill counters and the monster drop table.

use crate::state::{ActorKind, DropClass, ItemId};

/// Drop chance per class, compared against a random byte.
pub const DROP_RATES: [u8; 4] = [0x50, 0x98, 0x68, 0x68];

/// Drop items indexed by `class * 10 + kill_cycle`.
pub const DROP_ITEMS: [ItemId; 40] = {
    use ItemId::*;
    [
        // A
        Rupee, Heart, Rupee, Fairy, Rupee, Heart, Heart, Rupee, Rupee, Heart,
        // B
        Bomb, Rupee, Clock, Rupee, Heart, Bomb, Rupee, Rupee, Heart, Heart,
        // C
        Rupee, Heart, Rupee, FiveRupees, Heart, Clock, Rupee, Rupee, Rupee, Heart,
        // D
        Heart, Fairy, Rupee, Heart, Fairy, Heart, Heart, Heart, Rupee, Heart,
    ]
};

pub const KILL_CYCLE_LEN: u8 = 10;
/// World kills that guarantee a fairy.
pub const FAIRY_KILLS: u8 = 16;
/// Kills without taking damage that guarantee a help drop.
pub const HELP_DROP_KILLS: u8 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KillEconomy {
    pub kill_cycle: u8,
    pub world_kill_count: u8,
    pub room_kill_count: u8,
    /// Kills since the player was last hurt.
    pub help_drop_counter: u8,
    /// Alternates the help drop between five rupees and a bomb.
    pub help_drop_value: u8,
}

impl KillEconomy {
    /// Updates the counters for one kill and decides its drop.
    ///
    /// `roll` is a fresh random byte for the class-rate check.
    pub fn record_kill(&mut self, kind: ActorKind, roll: u8) -> Option<ItemId> {
        if !kind.skips_kill_cycle() {
            self.kill_cycle = (self.kill_cycle + 1) % KILL_CYCLE_LEN;
        }
        if kind.counts_room_kill() {
            self.room_kill_count = self.room_kill_count.saturating_add(1);
        }
        self.world_kill_count = self.world_kill_count.saturating_add(1);
        self.help_drop_counter = self.help_drop_counter.saturating_add(1);

        if self.world_kill_count == FAIRY_KILLS {
            self.world_kill_count = 0;
            self.help_drop_counter = 0;
            self.help_drop_value = 0;
            return Some(ItemId::Fairy);
        }

        if self.help_drop_counter >= HELP_DROP_KILLS {
            self.help_drop_counter = 0;
            let item = if self.help_drop_value == 0 {
                ItemId::FiveRupees
            } else {
                ItemId::Bomb
            };
            self.help_drop_value ^= 1;
            return Some(item);
        }

        let class = kind.drop_class()?;
        (roll < DROP_RATES[class.index()]).then(|| drop_item(class, self.kill_cycle))
    }

    /// Taking damage resets the help-drop streak.
    pub fn on_player_damaged(&mut self) {
        self.help_drop_counter = 0;
    }

    /// Counters scoped to one world are reset on level load.
    pub fn reset_world(&mut self) {
        self.world_kill_count = 0;
        self.room_kill_count = 0;
    }
}

pub fn drop_item(class: DropClass, cycle: u8) -> ItemId {
    DROP_ITEMS[drop_index(class, cycle)]
}

pub const fn drop_index(class: DropClass, cycle: u8) -> usize {
    class.index() * KILL_CYCLE_LEN as usize + (cycle % KILL_CYCLE_LEN) as usize
}
