//! Static world and room content.
//!
//! Worlds and rooms are immutable after load. Everything that changes during
//! play (visited flags, open doors, object counts) lives in the profile.

use arrayvec::ArrayVec;

use super::audio::Song;
use super::error::ContentError;
use crate::config::GameConfig;
use crate::state::{ActorKind, Direction, DoorType, ItemId, Point, TileBehavior};

/// Identifier of a world. The overworld is always world 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WorldId(pub u8);

impl WorldId {
    pub const OVERWORLD: Self = Self(0);

    pub const fn is_overworld(self) -> bool {
        self.0 == 0
    }
}

/// Room identifier within a world, conventionally `row << 4 | column`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RoomId(pub u8);

impl core::fmt::Display for RoomId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldKind {
    #[default]
    Overworld,
    Underworld,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomKind {
    #[default]
    Normal,
    Cave,
    Cellar,
}

/// What clears a room's secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SecretTrigger {
    #[default]
    None,
    /// Shutters open once every monster is gone.
    FoesDoor,
    /// The room item appears once every monster is gone.
    FoesItem,
    /// Killing the first monster kills the rest.
    Ringleader,
    /// A bomb blast on the secret block reveals a cave.
    BombCave,
}

/// Directional room links.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Connections {
    pub up: Option<RoomId>,
    pub down: Option<RoomId>,
    pub left: Option<RoomId>,
    pub right: Option<RoomId>,
}

impl Connections {
    pub fn get(&self, dir: Direction) -> Option<RoomId> {
        match dir.primary() {
            d if d == Direction::UP => self.up,
            d if d == Direction::DOWN => self.down,
            d if d == Direction::LEFT => self.left,
            d if d == Direction::RIGHT => self.right,
            _ => None,
        }
    }
}

/// Door rule per edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DoorSet {
    pub up: DoorType,
    pub down: DoorType,
    pub left: DoorType,
    pub right: DoorType,
}

impl DoorSet {
    pub fn get(&self, dir: Direction) -> DoorType {
        match dir.primary() {
            d if d == Direction::UP => self.up,
            d if d == Direction::DOWN => self.down,
            d if d == Direction::LEFT => self.left,
            d if d == Direction::RIGHT => self.right,
            _ => DoorType::None,
        }
    }
}

/// Direction sequence that must be walked to leave a maze room.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeDef {
    /// Leaving this way is always allowed and resets progress.
    pub exit: Direction,
    pub path: ArrayVec<Direction, { GameConfig::MAX_MAZE_PATH }>,
}

/// Where an overworld cave or stairway leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Entrance {
    Cave(RoomId),
    Shortcut(RoomId),
    Level(WorldId),
}

/// Underworld stairs leading down to a cellar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StairsDef {
    pub position: Point,
    pub cellar: RoomId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomItem {
    pub item: ItemId,
    pub position: Point,
}

/// Static definition of one room.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomDef {
    pub id: RoomId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: RoomKind,
    /// 11 rows of 16 block characters; see [`TileBehavior::from_layout_char`].
    pub layout: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub connections: Connections,
    #[cfg_attr(feature = "serde", serde(default))]
    pub doors: DoorSet,
    #[cfg_attr(feature = "serde", serde(default))]
    pub monsters: Vec<ActorKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub monsters_from_edges: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item: Option<RoomItem>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub secret: SecretTrigger,
    /// Block whose bombing reveals a cave, for [`SecretTrigger::BombCave`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub secret_block: Option<Point>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub maze: Option<MazeDef>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub recorder_destination: Option<RoomId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entrance: Option<Entrance>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cave_mouth: Option<Point>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stairs: Option<StairsDef>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cellar_exits: Option<[RoomId; 2]>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub statues: Vec<Point>,
}

impl RoomDef {
    /// Expands the block layout into the 32 × 22 fine behavior grid.
    pub fn behavior_grid(&self, world: WorldId) -> Result<Vec<TileBehavior>, ContentError> {
        if self.layout.len() != GameConfig::BLOCK_ROWS {
            return Err(ContentError::LayoutRows {
                world,
                room: self.id,
                rows: self.layout.len(),
            });
        }

        let mut grid = vec![TileBehavior::GenericWalkable; GameConfig::ROOM_COLUMNS * GameConfig::ROOM_ROWS];
        for (block_row, line) in self.layout.iter().enumerate() {
            let count = line.chars().count();
            if count != GameConfig::BLOCK_COLUMNS {
                return Err(ContentError::LayoutColumns {
                    world,
                    room: self.id,
                    row: block_row,
                    columns: count,
                });
            }
            for (block_col, c) in line.chars().enumerate() {
                let behavior = TileBehavior::from_layout_char(c).ok_or(ContentError::LayoutChar {
                    world,
                    room: self.id,
                    found: c,
                })?;
                for (dc, dr) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                    let col = block_col * 2 + dc;
                    let row = block_row * 2 + dr;
                    grid[row * GameConfig::ROOM_COLUMNS + col] = behavior;
                }
            }
        }
        Ok(grid)
    }
}

/// Static definition of a world: the overworld or one underworld level.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldDef {
    pub id: WorldId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: WorldKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub level_number: u8,
    pub entry_room: RoomId,
    pub start_position: Point,
    #[cfg_attr(feature = "serde", serde(default))]
    pub song: Song,
    /// Rooms drawn with the dark palette.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dark_rooms: Vec<RoomId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_whirlwind: bool,
    /// Opaque palette rows forwarded to the canvas.
    #[cfg_attr(feature = "serde", serde(default))]
    pub palettes: Vec<[u8; 4]>,
    pub rooms: Vec<RoomDef>,
}

impl WorldDef {
    pub fn room(&self, id: RoomId) -> Option<&RoomDef> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn is_dark(&self, id: RoomId) -> bool {
        self.dark_rooms.contains(&id)
    }

    pub fn is_overworld(&self) -> bool {
        self.kind == WorldKind::Overworld
    }
}

/// Read-only access to world content.
pub trait WorldOracle: Send + Sync {
    fn world(&self, id: WorldId) -> Option<&WorldDef>;

    fn room(&self, world: WorldId, room: RoomId) -> Option<&RoomDef> {
        self.world(world).and_then(|def| def.room(room))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_room() -> RoomDef {
        RoomDef {
            id: RoomId(0x10),
            layout: vec!["................".to_string(); 11],
            ..RoomDef::default()
        }
    }

    #[test]
    fn layout_expands_blocks_to_fine_tiles() {
        let mut room = open_room();
        room.layout[0] = "W...............".to_string();
        let grid = room.behavior_grid(WorldId::OVERWORLD).unwrap();
        assert_eq!(grid.len(), 32 * 22);
        assert_eq!(grid[0], TileBehavior::Wall);
        assert_eq!(grid[1], TileBehavior::Wall);
        assert_eq!(grid[32], TileBehavior::Wall);
        assert_eq!(grid[33], TileBehavior::Wall);
        assert_eq!(grid[2], TileBehavior::GenericWalkable);
    }

    #[test]
    fn layout_rejects_bad_shapes() {
        let mut room = open_room();
        room.layout.pop();
        assert!(matches!(
            room.behavior_grid(WorldId::OVERWORLD),
            Err(ContentError::LayoutRows { rows: 10, .. })
        ));

        let mut room = open_room();
        room.layout[3] = "..?.............".to_string();
        assert!(matches!(
            room.behavior_grid(WorldId::OVERWORLD),
            Err(ContentError::LayoutChar { found: '?', .. })
        ));
    }

    #[test]
    fn connections_use_primary_direction() {
        let connections = Connections {
            up: Some(RoomId(1)),
            left: Some(RoomId(2)),
            ..Connections::default()
        };
        assert_eq!(connections.get(Direction::UP), Some(RoomId(1)));
        assert_eq!(connections.get(Direction::UP | Direction::LEFT), Some(RoomId(1)));
        assert_eq!(connections.get(Direction::LEFT), Some(RoomId(2)));
        assert_eq!(connections.get(Direction::DOWN), None);
    }
}
