pub mod actor;
pub mod common;
pub mod item;
pub mod tile;

pub use actor::{Actor, ActorKind, ActorPhase, DropClass};
pub use common::{ActorId, Direction, Point, TileCoord};
pub use item::{ItemId, ItemSlot};
pub use tile::{DoorState, DoorType, TileBehavior, door_behavior, door_state};
