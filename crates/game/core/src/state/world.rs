//! Shared world aggregate handed to every mode handler.
//!
//! Fields are grouped by concern: location and live tiles, actors and timers,
//! navigation history, profile, presentation hints and the door controller.
//! Sub-machine records are not stored here; each mode owns its own.

use std::collections::VecDeque;

use bitflags::bitflags;

use super::history::{EntranceStack, RoomHistory};
use super::profile::{Profile, RoomFlags};
use super::registry::ActorRegistry;
use super::timers::{GlobalTimers, StunTimers};
use super::types::{Actor, ActorKind, Direction, ItemId, Point, TileBehavior, TileCoord};
use crate::config::GameConfig;
use crate::engine::{CleanupHook, EngineError, Goto, KillEconomy};
use crate::env::{GameEnv, RoomDef, RoomId, RoomKind, WorldDef, WorldId, WorldKind, compute_seed};

/// Live behavior grid of the current room.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomTiles {
    cells: Vec<TileBehavior>,
}

impl Default for RoomTiles {
    fn default() -> Self {
        Self {
            cells: vec![TileBehavior::GenericWalkable; GameConfig::ROOM_COLUMNS * GameConfig::ROOM_ROWS],
        }
    }
}

impl RoomTiles {
    /// Wraps a grid produced by [`RoomDef::behavior_grid`].
    pub fn from_grid(cells: Vec<TileBehavior>) -> Self {
        let mut tiles = Self::default();
        let len = tiles.cells.len().min(cells.len());
        tiles.cells[..len].copy_from_slice(&cells[..len]);
        tiles
    }

    /// Behavior at a fine tile; anything off the grid is walkable.
    pub fn get(&self, coord: TileCoord) -> TileBehavior {
        if !coord.in_bounds() {
            return TileBehavior::GenericWalkable;
        }
        self.cells[coord.row as usize * GameConfig::ROOM_COLUMNS + coord.col as usize]
    }

    pub fn set(&mut self, coord: TileCoord, behavior: TileBehavior) {
        if coord.in_bounds() {
            self.cells[coord.row as usize * GameConfig::ROOM_COLUMNS + coord.col as usize] = behavior;
        }
    }

    /// Behavior under a screen pixel.
    pub fn at_pixel(&self, x: i32, y: i32) -> TileBehavior {
        self.get(TileCoord::from_pixel(x, y))
    }

    /// Sets the 2 × 2 fine tiles of the block containing a pixel.
    pub fn set_block(&mut self, x: i32, y: i32, behavior: TileBehavior) {
        let origin = TileCoord::from_pixel(x & !0xF, y);
        let row = origin.row & !1;
        for (dc, dr) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            self.set(TileCoord::new(origin.col + dc, row + dr), behavior);
        }
    }

    /// True if every fine tile of the 16 × 16 box at a pixel is walkable.
    pub fn is_block_clear(&self, x: i32, y: i32) -> bool {
        [(0, 0), (8, 0), (0, 8), (8, 8)]
            .iter()
            .all(|(dx, dy)| !self.at_pixel(x + dx, y + dy).collides())
    }
}

bitflags! {
    /// Status-bar features currently shown.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct StatusBar: u8 {
        const MAP       = 1 << 0;
        const INVENTORY = 1 << 1;
        const EQUIPMENT = 1 << 2;
        const HEARTS    = 1 << 3;
    }
}

/// Palette fade bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaletteState {
    /// 0 fully lit, 4 fully dark.
    pub dark_step: u8,
    /// Remaining steps of the lit-room color sequence.
    pub color_seq: u8,
}

impl PaletteState {
    pub const DARK: u8 = 4;

    pub fn is_dark(&self) -> bool {
        self.dark_step > 0
    }
}

/// Door opening scheduled by the door hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggeredDoor {
    pub dir: Direction,
    /// Ticks left before the door opens.
    pub delay: u8,
}

/// Door controller state for the current room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorControl {
    pub triggered: Option<TriggeredDoor>,
    /// Shutters held open while the player walks in.
    pub forced_open: Direction,
    /// Open every shutter on the next hook pass.
    pub shutters_requested: bool,
}

/// Item-hold pose after picking up a power item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fanfare {
    pub item: ItemId,
    pub timer: u16,
}

/// Requests the host drains after each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostRequest {
    SaveProfile,
    ReturnToMenu,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub frame: u64,
    pub game_seed: u64,
    rng_draws: u32,

    // ----- location -----
    pub world_id: WorldId,
    pub world_name: String,
    pub world_kind: WorldKind,
    pub level_number: u8,
    pub room_id: RoomId,
    pub room_kind: RoomKind,
    pub tiles: RoomTiles,

    // ----- actors and timers -----
    pub player: Actor,
    pub actors: ActorRegistry,
    pub timers: GlobalTimers,
    pub stun: StunTimers,
    pub edge_spawns: VecDeque<ActorKind>,
    pub observed_player: Point,
    pub economy: KillEconomy,

    // ----- navigation -----
    pub history: RoomHistory,
    pub entrances: EntranceStack,
    pub maze_step: u8,
    /// Set when the next Enter should walk out of the cave mouth.
    pub emerge_from_mouth: bool,

    // ----- persisted -----
    pub profile: Profile,

    // ----- presentation -----
    pub palette: PaletteState,
    pub status_bar: StatusBar,
    pub fanfare: Option<Fanfare>,
    pub toasts: Vec<String>,
    pub host_requests: Vec<HostRequest>,

    pub doors: DoorControl,
    pub cleanup: Option<CleanupHook>,
    pending: Option<Goto>,
}

impl WorldState {
    pub fn new(game_seed: u64, profile: Profile) -> Self {
        Self {
            frame: 0,
            game_seed,
            rng_draws: 0,
            world_id: WorldId::OVERWORLD,
            world_name: String::new(),
            world_kind: WorldKind::Overworld,
            level_number: 0,
            room_id: RoomId::default(),
            room_kind: RoomKind::Normal,
            tiles: RoomTiles::default(),
            player: Actor::player(Point::default()),
            actors: ActorRegistry::new(),
            timers: GlobalTimers::default(),
            stun: StunTimers::default(),
            edge_spawns: VecDeque::new(),
            observed_player: Point::default(),
            economy: KillEconomy::default(),
            history: RoomHistory::default(),
            entrances: EntranceStack::default(),
            maze_step: 0,
            emerge_from_mouth: false,
            profile,
            palette: PaletteState::default(),
            status_bar: StatusBar::all(),
            fanfare: None,
            toasts: Vec::new(),
            host_requests: Vec::new(),
            doors: DoorControl::default(),
            cleanup: None,
            pending: None,
        }
    }

    /// Requests a mode change, applied once the current step returns.
    pub fn goto(&mut self, goto: Goto) {
        self.pending = Some(goto);
    }

    pub fn take_pending(&mut self) -> Option<Goto> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&Goto> {
        self.pending.as_ref()
    }

    /// Closes the current frame.
    pub fn advance_frame(&mut self) {
        self.frame += 1;
        self.rng_draws = 0;
    }

    /// Monsters the room still holds: live ones plus edge spawns not yet placed.
    pub fn owed_monsters(&self) -> usize {
        self.actors.monster_count() + self.edge_spawns.len()
    }

    /// Seed for the next draw this frame.
    fn next_seed(&mut self, context: u32) -> u64 {
        let seed = compute_seed(self.game_seed, self.frame, self.rng_draws, context);
        self.rng_draws = self.rng_draws.wrapping_add(1);
        seed
    }

    /// Next deterministic roll for this frame.
    pub fn roll(&mut self, env: &GameEnv<'_>, context: u32) -> u32 {
        let seed = self.next_seed(context);
        env.next_u32(seed)
    }

    pub fn roll_byte(&mut self, env: &GameEnv<'_>, context: u32) -> u8 {
        let seed = self.next_seed(context);
        env.next_byte(seed)
    }

    pub fn is_overworld(&self) -> bool {
        self.world_kind == WorldKind::Overworld
    }

    pub fn current_world<'e>(&self, env: &GameEnv<'e>) -> Result<&'e WorldDef, EngineError> {
        Ok(env.world(self.world_id)?)
    }

    pub fn current_room<'e>(&self, env: &GameEnv<'e>) -> Result<&'e RoomDef, EngineError> {
        Ok(env.room(self.world_id, self.room_id)?)
    }

    /// Persisted flags of the current room, or defaults if never touched.
    pub fn room_flags(&self) -> RoomFlags {
        self.profile
            .room_flags(&self.world_name, self.room_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn room_flags_mut(&mut self) -> &mut RoomFlags {
        self.profile.room_flags_mut(&self.world_name, self.room_id)
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "toast");
        self.toasts.push(message);
    }

    /// Moves the player one pixel per call toward `target` along one axis.
    ///
    /// Returns true once the player stands on the target.
    pub fn walk_player_toward(&mut self, dir: Direction, target: i32) -> bool {
        let position = &mut self.player.position;
        let axis = if dir.is_vertical() {
            &mut position.y
        } else {
            &mut position.x
        };
        if *axis < target {
            *axis += 1;
        } else if *axis > target {
            *axis -= 1;
        }
        self.player.facing = dir;
        self.player.moving = dir;
        *axis == target
    }
}
