//! Tile behaviors and the door rule tables.
//!
//! Door resolution is two pure, exhaustive functions of `(DoorType, open)`:
//! one for the live collision behavior and one for the drawn glyph.

/// Collision classification of a fine tile.
///
/// Variants are declared from least to most blocking; the derived `Ord` is
/// the "most blocking wins" order used when a probe straddles two tiles.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileBehavior {
    #[default]
    GenericWalkable,
    Sand,
    SlowStairs,
    Stairs,
    Doorway,
    Water,
    GenericSolid,
    Cave,
    Armos,
    Door,
    Wall,
}

impl TileBehavior {
    /// True for every behavior at or above `Doorway`.
    pub fn collides(self) -> bool {
        self >= Self::Doorway
    }

    /// Parses one character of a room layout row.
    pub const fn from_layout_char(c: char) -> Option<Self> {
        Some(match c {
            '.' => Self::GenericWalkable,
            ',' => Self::Sand,
            '=' => Self::SlowStairs,
            '>' => Self::Stairs,
            'd' => Self::Doorway,
            '~' => Self::Water,
            '#' => Self::GenericSolid,
            'C' => Self::Cave,
            'A' => Self::Armos,
            'D' => Self::Door,
            'W' => Self::Wall,
            _ => return None,
        })
    }
}

/// Static rule for one room edge.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorType {
    Open,
    Wall,
    FalseWall,
    FalseWall2,
    Bombable,
    Key,
    Key2,
    Shutter,
    #[default]
    None,
}

impl DoorType {
    /// Doors that open by walking into them with a key.
    pub const fn is_keyed(self) -> bool {
        matches!(self, Self::Key | Self::Key2)
    }

    /// Doors whose opening is two blocks deep once passed.
    pub const fn is_deep(self) -> bool {
        matches!(self, Self::Shutter | Self::Bombable)
    }
}

/// Visual glyph of a door derived from its type and open flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorState {
    Open,
    Wall,
    Locked,
    Bombed,
    Shutter,
}

impl DoorState {
    /// A blown-open wall counts as open.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open | Self::Bombed)
    }
}

/// Collision behavior of a door's front tiles.
pub const fn door_behavior(door: DoorType, open: bool) -> TileBehavior {
    use TileBehavior as B;
    match (door, open) {
        (DoorType::Open, _) => B::Doorway,
        (DoorType::Wall, _) => B::Wall,
        (DoorType::FalseWall, _) => B::Doorway,
        (DoorType::FalseWall2, false) => B::Wall,
        (DoorType::FalseWall2, true) => B::Doorway,
        (DoorType::Bombable, false) => B::Wall,
        (DoorType::Bombable, true) => B::Doorway,
        (DoorType::Key | DoorType::Key2, false) => B::Door,
        (DoorType::Key | DoorType::Key2, true) => B::Doorway,
        (DoorType::Shutter, false) => B::Door,
        (DoorType::Shutter, true) => B::Doorway,
        (DoorType::None, _) => B::Wall,
    }
}

/// Drawn glyph of a door.
pub const fn door_state(door: DoorType, open: bool) -> DoorState {
    match (door, open) {
        (DoorType::Open, _) => DoorState::Open,
        (DoorType::Wall, _) => DoorState::Wall,
        (DoorType::FalseWall | DoorType::FalseWall2, _) => DoorState::Wall,
        (DoorType::Bombable, false) => DoorState::Wall,
        (DoorType::Bombable, true) => DoorState::Bombed,
        (DoorType::Key | DoorType::Key2, false) => DoorState::Locked,
        (DoorType::Key | DoorType::Key2, true) => DoorState::Open,
        (DoorType::Shutter, false) => DoorState::Shutter,
        (DoorType::Shutter, true) => DoorState::Open,
        (DoorType::None, _) => DoorState::Wall,
    }
}
