//! Persisted save profile.
//!
//! Per-room flags are created lazily on first access and then live for the
//! whole profile. Rooms are keyed by world name and room id so content can
//! renumber worlds without invalidating saves.

use std::collections::BTreeMap;

use bitflags::bitflags;
use strum::IntoEnumIterator;

use super::types::{Direction, ItemId, ItemSlot};
use crate::env::RoomId;

/// Hit points per heart container.
pub const HEART_HP: u16 = 0x100;

bitflags! {
    /// Per-object interaction flags of one room.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ObjectFlags: u8 {
        const ITEM_TAKEN    = 1 << 0;
        const SECRET_FOUND  = 1 << 1;
        const SHUTTERS_OPEN = 1 << 2;
        const GIFT_TAKEN    = 1 << 3;
    }
}

/// Persisted state of one room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomFlags {
    pub visited: bool,
    /// Doors opened by key or bomb, per direction.
    pub doors_open: Direction,
    /// Monsters left when the player last walked out; `None` before that.
    pub object_count: Option<u8>,
    pub objects: ObjectFlags,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomKey {
    pub world: String,
    pub room: RoomId,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    /// 0 none, 1 wooden, 2 white, 3 magic.
    pub sword: u8,
    pub bombs: u8,
    pub max_bombs: u8,
    pub rupees: u16,
    pub keys: u8,
    pub magic_key: bool,
    pub candle: bool,
    pub recorder: bool,
    pub boomerang: bool,
    /// Bit `n - 1` set for each level whose triforce piece was taken.
    pub triforce: u8,
    pub selected: Option<ItemSlot>,
}

impl Inventory {
    pub const MAX_RUPEES: u16 = 255;
    pub const DEFAULT_MAX_BOMBS: u8 = 8;
    pub const BOMB_PICKUP: u8 = 4;

    pub fn new() -> Self {
        Self {
            max_bombs: Self::DEFAULT_MAX_BOMBS,
            ..Self::default()
        }
    }

    pub fn has(&self, slot: ItemSlot) -> bool {
        match slot {
            ItemSlot::Boomerang => self.boomerang,
            ItemSlot::Bombs => self.bombs > 0,
            ItemSlot::Candle => self.candle,
            ItemSlot::Recorder => self.recorder,
        }
    }

    /// Selects the first usable B item if the current one is unusable.
    ///
    /// Returns true if the selection changed.
    pub fn auto_select(&mut self) -> bool {
        if self.selected.is_some_and(|slot| self.has(slot)) {
            return false;
        }
        let next = ItemSlot::iter().find(|slot| self.has(*slot));
        let changed = next != self.selected;
        self.selected = next;
        changed
    }

    fn add_rupees(&mut self, amount: u16) {
        self.rupees = (self.rupees + amount).min(Self::MAX_RUPEES);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    pub deaths: u16,
    pub kills: u32,
    pub rooms_visited: u32,
    pub items_collected: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
    pub name: String,
    /// 0 first quest, 1 second quest.
    pub quest: u8,
    pub hearts: u8,
    pub hp: u16,
    pub inventory: Inventory,
    pub stats: Statistics,
    rooms: BTreeMap<RoomKey, RoomFlags>,
}

impl Profile {
    pub fn new(name: impl Into<String>, hearts: u8) -> Self {
        Self {
            name: name.into(),
            quest: 0,
            hearts,
            hp: hearts as u16 * HEART_HP,
            inventory: Inventory::new(),
            stats: Statistics::default(),
            rooms: BTreeMap::new(),
        }
    }

    pub fn max_hp(&self) -> u16 {
        self.hearts as u16 * HEART_HP
    }

    pub fn heal(&mut self, amount: u16) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp());
    }

    /// Applies damage and returns true if the player died.
    pub fn damage(&mut self, amount: u16) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.hp == 0
    }

    /// Persisted flags of a room, if ever touched.
    pub fn room_flags(&self, world: &str, room: RoomId) -> Option<&RoomFlags> {
        self.rooms.get(&RoomKey {
            world: world.to_string(),
            room,
        })
    }

    /// Persisted flags of a room, created on first access.
    pub fn room_flags_mut(&mut self, world: &str, room: RoomId) -> &mut RoomFlags {
        self.rooms
            .entry(RoomKey {
                world: world.to_string(),
                room,
            })
            .or_default()
    }

    pub fn rooms(&self) -> impl Iterator<Item = (&RoomKey, &RoomFlags)> {
        self.rooms.iter()
    }

    /// Applies an item pickup. `level` is the current level number.
    pub fn collect(&mut self, item: ItemId, level: u8) {
        let inventory = &mut self.inventory;
        match item {
            ItemId::Rupee => inventory.add_rupees(1),
            ItemId::FiveRupees => inventory.add_rupees(5),
            ItemId::Heart => self.heal(HEART_HP),
            ItemId::Fairy => self.heal(HEART_HP * 3),
            ItemId::Clock => {}
            ItemId::Bomb => {
                inventory.bombs = (inventory.bombs + Inventory::BOMB_PICKUP).min(inventory.max_bombs);
            }
            ItemId::Key => inventory.keys = inventory.keys.saturating_add(1),
            ItemId::MagicKey => inventory.magic_key = true,
            ItemId::Sword => inventory.sword = inventory.sword.max(1),
            ItemId::WhiteSword => inventory.sword = inventory.sword.max(2),
            ItemId::MagicSword => inventory.sword = 3,
            ItemId::HeartContainer => {
                self.hearts = self.hearts.saturating_add(1);
                self.heal(HEART_HP);
            }
            ItemId::Candle => inventory.candle = true,
            ItemId::Recorder => inventory.recorder = true,
            ItemId::Boomerang => inventory.boomerang = true,
            ItemId::TriforcePiece => {
                if (1..=8).contains(&level) {
                    inventory.triforce |= 1 << (level - 1);
                }
            }
            ItemId::TriforceOfPower => {}
        }
        self.stats.items_collected += 1;
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new("link", crate::config::GameConfig::DEFAULT_STARTING_HEARTS)
    }
}

/// Profile persistence failures.
#[cfg(feature = "serde")]
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("failed to encode profile: {0}")]
    Encode(String),

    #[error("failed to decode profile: {0}")]
    Decode(String),
}

#[cfg(feature = "serde")]
impl crate::error::GameError for ProfileError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Encode(_) => "PROFILE_ENCODE",
            Self::Decode(_) => "PROFILE_DECODE",
        }
    }
}

#[cfg(feature = "serde")]
impl Profile {
    /// Compact binary form handed to the host's save hook.
    pub fn encode(&self) -> Result<Vec<u8>, ProfileError> {
        bincode::serialize(self).map_err(|e| ProfileError::Encode(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProfileError> {
        bincode::deserialize(bytes).map_err(|e| ProfileError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_flags_are_created_lazily_and_stay_stable() {
        let mut profile = Profile::default();
        assert!(profile.room_flags("overworld", RoomId(0x77)).is_none());

        profile.room_flags_mut("overworld", RoomId(0x77)).visited = true;
        profile.room_flags_mut("overworld", RoomId(0x77)).doors_open |= Direction::UP;

        let flags = profile.room_flags("overworld", RoomId(0x77)).unwrap();
        assert!(flags.visited);
        assert_eq!(flags.doors_open, Direction::UP);
        assert!(profile.room_flags("level-1", RoomId(0x77)).is_none());
    }

    #[test]
    fn heart_container_raises_max_and_heals() {
        let mut profile = Profile::new("zelda", 3);
        profile.damage(HEART_HP * 2);
        profile.collect(ItemId::HeartContainer, 0);
        assert_eq!(profile.hearts, 4);
        assert_eq!(profile.hp, HEART_HP * 2);
    }

    #[test]
    fn damage_reports_death_at_zero() {
        let mut profile = Profile::new("zelda", 1);
        assert!(!profile.damage(0x80));
        assert!(profile.damage(0x100));
        assert_eq!(profile.hp, 0);
    }

    #[test]
    fn auto_select_skips_exhausted_bombs() {
        let mut inventory = Inventory::new();
        inventory.bombs = 1;
        assert!(inventory.auto_select());
        assert_eq!(inventory.selected, Some(ItemSlot::Bombs));

        inventory.bombs = 0;
        inventory.candle = true;
        assert!(inventory.auto_select());
        assert_eq!(inventory.selected, Some(ItemSlot::Candle));
        assert!(!inventory.auto_select());
    }

    #[test]
    fn triforce_piece_sets_level_bit() {
        let mut profile = Profile::default();
        profile.collect(ItemId::TriforcePiece, 3);
        assert_eq!(profile.inventory.triforce, 0b100);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn encode_decode_preserves_room_flags() {
        let mut profile = Profile::default();
        profile.room_flags_mut("level-1", RoomId(0x22)).object_count = Some(2);
        let bytes = profile.encode().unwrap();
        assert_eq!(Profile::decode(&bytes).unwrap(), profile);
    }
}
