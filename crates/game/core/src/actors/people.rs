//! Cave dwellers.

use crate::engine::EngineError;
use crate::env::GameEnv;
use crate::state::{Actor, ActorId, ActorKind, Direction, Point, WorldState};

pub const FLICKER_TICKS: u16 = 4;

/// Cave flames are scenery: they neither block nor hurt.
pub fn new_flame(id: ActorId, kind: ActorKind, position: Point) -> Actor {
    let mut flame = Actor::new(id, kind, position);
    flame.decoration = true;
    flame.timer = FLICKER_TICKS;
    flame
}

/// Mirrors the sprite every few ticks.
pub fn update_flame(flame: &mut Actor, _world: &mut WorldState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
    flame.timer = flame.timer.saturating_sub(1);
    if flame.timer == 0 {
        flame.timer = FLICKER_TICKS;
        flame.facing = if flame.facing == Direction::LEFT {
            Direction::RIGHT
        } else {
            Direction::LEFT
        };
    }
    Ok(())
}
