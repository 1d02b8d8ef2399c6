//! Oracle access and content validation errors.

use super::map::{RoomId, WorldId};
use crate::error::{ErrorSeverity, GameError};
use crate::state::Direction;

/// Errors that occur when accessing oracle data.
///
/// A missing world oracle or a reference to content that was never loaded
/// means the host wired the engine incorrectly; the engine cannot proceed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("WorldOracle not available")]
    WorldsNotAvailable,

    #[error("world {0:?} not found")]
    WorldNotFound(WorldId),

    #[error("room {room} not found in world {world:?}")]
    RoomNotFound { world: WorldId, room: RoomId },
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WorldsNotAvailable => "ORACLE_WORLDS_NOT_AVAILABLE",
            Self::WorldNotFound(_) => "ORACLE_WORLD_NOT_FOUND",
            Self::RoomNotFound { .. } => "ORACLE_ROOM_NOT_FOUND",
        }
    }
}

/// Malformed static content detected at load time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentError {
    #[error("world {0:?} is defined twice")]
    DuplicateWorld(WorldId),

    #[error("room {room} is defined twice in world {world:?}")]
    DuplicateRoom { world: WorldId, room: RoomId },

    #[error("no overworld (world 0) was loaded")]
    MissingOverworld,

    #[error("entry room {room} of world {world:?} does not exist")]
    MissingEntryRoom { world: WorldId, room: RoomId },

    #[error("room {room} of world {world:?} has {rows} layout rows, expected 11")]
    LayoutRows {
        world: WorldId,
        room: RoomId,
        rows: usize,
    },

    #[error("room {room} of world {world:?} row {row} has {columns} columns, expected 16")]
    LayoutColumns {
        world: WorldId,
        room: RoomId,
        row: usize,
        columns: usize,
    },

    #[error("room {room} of world {world:?} uses unknown layout character {found:?}")]
    LayoutChar {
        world: WorldId,
        room: RoomId,
        found: char,
    },

    #[error("room {room} of world {world:?} connects {dir:?} to missing room {target}")]
    DanglingConnection {
        world: WorldId,
        room: RoomId,
        dir: Direction,
        target: RoomId,
    },

    #[error("room {room} of world {world:?} has a passable {dir:?} door but no connection")]
    DoorWithoutConnection {
        world: WorldId,
        room: RoomId,
        dir: Direction,
    },

    #[error("room {room} of world {world:?} has an entrance to missing content")]
    DanglingEntrance { world: WorldId, room: RoomId },

    #[error("room {room} of world {world:?} references a missing cellar or cellar exit")]
    DanglingCellar { world: WorldId, room: RoomId },

    #[error("maze in room {room} of world {world:?} has an empty path")]
    EmptyMaze { world: WorldId, room: RoomId },

    #[error("room {room} of world {world:?} uses BombCave without a secret block")]
    MissingSecretBlock { world: WorldId, room: RoomId },
}

impl GameError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use ContentError::*;
        match self {
            DuplicateWorld(_) => "CONTENT_DUPLICATE_WORLD",
            DuplicateRoom { .. } => "CONTENT_DUPLICATE_ROOM",
            MissingOverworld => "CONTENT_MISSING_OVERWORLD",
            MissingEntryRoom { .. } => "CONTENT_MISSING_ENTRY_ROOM",
            LayoutRows { .. } => "CONTENT_LAYOUT_ROWS",
            LayoutColumns { .. } => "CONTENT_LAYOUT_COLUMNS",
            LayoutChar { .. } => "CONTENT_LAYOUT_CHAR",
            DanglingConnection { .. } => "CONTENT_DANGLING_CONNECTION",
            DoorWithoutConnection { .. } => "CONTENT_DOOR_WITHOUT_CONNECTION",
            DanglingEntrance { .. } => "CONTENT_DANGLING_ENTRANCE",
            DanglingCellar { .. } => "CONTENT_DANGLING_CELLAR",
            EmptyMaze { .. } => "CONTENT_EMPTY_MAZE",
            MissingSecretBlock { .. } => "CONTENT_MISSING_SECRET_BLOCK",
        }
    }
}
