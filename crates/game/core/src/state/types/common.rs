use std::fmt;

use bitflags::bitflags;

use crate::config::GameConfig;

/// Unique identifier for any actor tracked by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl ActorId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Screen position in pixels. `y` includes the status-bar offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance, the metric used by every proximity check.
    pub fn distance(self, other: Point) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub const fn offset(self, dir: Direction, amount: i32) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx * amount,
            y: self.y + dy * amount,
        }
    }
}

bitflags! {
    /// Facing and movement directions.
    ///
    /// Single bits are the four cardinals; combinations express diagonal
    /// facings. The empty set means "no direction".
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Direction: u8 {
        const RIGHT = 1 << 0;
        const LEFT  = 1 << 1;
        const DOWN  = 1 << 2;
        const UP    = 1 << 3;
    }
}

impl Direction {
    pub const VERTICAL: Self = Self::UP.union(Self::DOWN);
    pub const HORIZONTAL: Self = Self::LEFT.union(Self::RIGHT);

    /// Cardinals in ordinal order.
    pub const CARDINALS: [Self; 4] = [Self::RIGHT, Self::LEFT, Self::DOWN, Self::UP];

    /// Swaps each axis component.
    pub const fn opposite(self) -> Self {
        let mut out = Self::empty();
        if self.contains(Self::RIGHT) {
            out = out.union(Self::LEFT);
        }
        if self.contains(Self::LEFT) {
            out = out.union(Self::RIGHT);
        }
        if self.contains(Self::DOWN) {
            out = out.union(Self::UP);
        }
        if self.contains(Self::UP) {
            out = out.union(Self::DOWN);
        }
        out
    }

    /// Index of a single cardinal (Right 0, Left 1, Down 2, Up 3).
    ///
    /// For combinations the lowest set bit decides.
    pub const fn ordinal(self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.bits().trailing_zeros() as usize)
        }
    }

    pub const fn from_ordinal(index: usize) -> Option<Self> {
        if index < 4 {
            Some(Self::CARDINALS[index])
        } else {
            None
        }
    }

    pub const fn is_vertical(self) -> bool {
        self.intersects(Self::VERTICAL)
    }

    pub const fn is_horizontal(self) -> bool {
        self.intersects(Self::HORIZONTAL)
    }

    /// True if exactly one cardinal bit is set.
    pub const fn is_cardinal(self) -> bool {
        self.bits().count_ones() == 1
    }

    /// Unit step in screen space (y grows downward).
    pub const fn delta(self) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.contains(Self::RIGHT) {
            dx += 1;
        }
        if self.contains(Self::LEFT) {
            dx -= 1;
        }
        if self.contains(Self::DOWN) {
            dy += 1;
        }
        if self.contains(Self::UP) {
            dy -= 1;
        }
        (dx, dy)
    }

    /// Keeps the vertical component if any, else the horizontal one.
    pub const fn primary(self) -> Self {
        if self.contains(Self::UP) {
            Self::UP
        } else if self.contains(Self::DOWN) {
            Self::DOWN
        } else if self.contains(Self::LEFT) {
            Self::LEFT
        } else if self.contains(Self::RIGHT) {
            Self::RIGHT
        } else {
            Self::empty()
        }
    }
}

/// Fine-tile coordinate in the 32 × 22 behavior grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct TileCoord {
    pub col: i32,
    pub row: i32,
}

impl TileCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Tile containing the given screen pixel.
    pub const fn from_pixel(x: i32, y: i32) -> Self {
        Self {
            col: x.div_euclid(GameConfig::TILE_SIZE),
            row: (y - GameConfig::PLAYFIELD_TOP).div_euclid(GameConfig::TILE_SIZE),
        }
    }

    pub const fn in_bounds(self) -> bool {
        self.col >= 0
            && self.row >= 0
            && (self.col as usize) < GameConfig::ROOM_COLUMNS
            && (self.row as usize) < GameConfig::ROOM_ROWS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_swaps_each_axis() {
        assert_eq!(Direction::UP.opposite(), Direction::DOWN);
        assert_eq!(Direction::LEFT.opposite(), Direction::RIGHT);
        assert_eq!(
            (Direction::UP | Direction::LEFT).opposite(),
            Direction::DOWN | Direction::RIGHT
        );
        assert_eq!(Direction::empty().opposite(), Direction::empty());
    }

    #[test]
    fn ordinal_round_trips_for_cardinals() {
        for (index, dir) in Direction::CARDINALS.iter().enumerate() {
            assert_eq!(dir.ordinal(), Some(index));
            assert_eq!(Direction::from_ordinal(index), Some(*dir));
        }
        assert_eq!(Direction::empty().ordinal(), None);
        assert_eq!(Direction::from_ordinal(4), None);
    }

    #[test]
    fn tile_coord_accounts_for_playfield_top() {
        assert_eq!(TileCoord::from_pixel(0, 0x40), TileCoord::new(0, 0));
        assert_eq!(TileCoord::from_pixel(0x17, 0x4F), TileCoord::new(2, 1));
        assert!(!TileCoord::from_pixel(-1, 0x40).in_bounds());
        assert!(!TileCoord::new(32, 0).in_bounds());
    }
}
