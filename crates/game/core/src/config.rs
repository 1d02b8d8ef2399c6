/// Game configuration constants and tunable parameters.
///
/// The constants describe the fixed playfield geometry and container limits.
/// The runtime fields are debug toggles a host may flip from a config file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Doubles the room scroll speed.
    pub speed_up: bool,
    /// Lets the player walk through every tile behavior.
    pub no_clip: bool,
    /// Player never takes damage.
    pub invincible: bool,
    /// Heart containers granted to a fresh profile.
    pub starting_hearts: u8,
}

impl GameConfig {
    // ===== playfield geometry =====
    /// Screen y of the first playfield row.
    pub const PLAYFIELD_TOP: i32 = 0x40;
    pub const PLAYFIELD_WIDTH: i32 = 0x100;
    pub const PLAYFIELD_HEIGHT: i32 = 0xB0;
    /// Edge of a fine (behavior) tile in pixels.
    pub const TILE_SIZE: i32 = 8;
    /// Edge of a layout block in pixels.
    pub const BLOCK_SIZE: i32 = 16;
    pub const ROOM_COLUMNS: usize = 32;
    pub const ROOM_ROWS: usize = 22;
    pub const BLOCK_COLUMNS: usize = 16;
    pub const BLOCK_ROWS: usize = 11;

    // ===== compile-time limits =====
    pub const ROOM_HISTORY_LEN: usize = 6;
    pub const MAX_ENTRANCES: usize = 8;
    pub const MAX_MAZE_PATH: usize = 8;
    pub const MAX_ACTORS: usize = 48;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_HEARTS: u8 = 3;

    pub const fn new() -> Self {
        Self {
            speed_up: false,
            no_clip: false,
            invincible: false,
            starting_hearts: Self::DEFAULT_STARTING_HEARTS,
        }
    }

    /// Bottom-most y an actor's top edge can take inside the playfield.
    pub const fn playfield_bottom() -> i32 {
        Self::PLAYFIELD_TOP + Self::PLAYFIELD_HEIGHT - Self::BLOCK_SIZE
    }

    pub const fn with_speed_up(mut self, speed_up: bool) -> Self {
        self.speed_up = speed_up;
        self
    }

    pub const fn with_no_clip(mut self, no_clip: bool) -> Self {
        self.no_clip = no_clip;
        self
    }

    pub const fn with_invincible(mut self, invincible: bool) -> Self {
        self.invincible = invincible;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
