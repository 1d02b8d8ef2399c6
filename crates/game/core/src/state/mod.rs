//! Authoritative game state representation.
//!
//! [`GameState`] owns the active mode record and the [`WorldState`]
//! aggregate every step function mutates. Hosts clone or query it but mutate
//! it exclusively through [`crate::engine::GameEngine`].
pub mod history;
pub mod profile;
pub mod registry;
pub mod snapshot;
pub mod timers;
pub mod types;
pub mod world;

pub use history::{EntranceRecord, EntranceStack, RoomHistory};
pub use profile::{HEART_HP, Inventory, ObjectFlags, Profile, RoomFlags, RoomKey, Statistics};
#[cfg(feature = "serde")]
pub use profile::ProfileError;
pub use registry::ActorRegistry;
pub use snapshot::{ActorSnapshot, StateSnapshot};
pub use timers::{GlobalTimers, StunTimers, TimerKey, countdown};
pub use types::{
    Actor, ActorId, ActorKind, ActorPhase, Direction, DoorState, DoorType, DropClass, ItemId,
    ItemSlot, Point, TileBehavior, TileCoord, door_behavior, door_state,
};
pub use world::{
    DoorControl, Fanfare, HostRequest, PaletteState, RoomTiles, StatusBar, TriggeredDoor,
    WorldState,
};

use crate::engine::{GameMode, Machine};

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified. Combined with the
    /// frame number and a per-frame draw counter for every roll.
    pub game_seed: u64,

    /// Record of the active mode.
    pub machine: Machine,

    /// Mode seen by the previous update, used to detect transitions.
    pub last_mode: GameMode,

    pub world: WorldState,
}

impl GameState {
    /// A session sitting in the title demo.
    pub fn new(game_seed: u64, profile: Profile) -> Self {
        Self {
            game_seed,
            machine: Machine::Demo,
            last_mode: GameMode::Demo,
            world: WorldState::new(game_seed, profile),
        }
    }

    pub fn with_seed(game_seed: u64) -> Self {
        Self::new(game_seed, Profile::default())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_seed(0)
    }
}
