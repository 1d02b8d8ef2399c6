//! Descending a cave mouth or underworld stairs.

use crate::engine::{EngineError, GameMode, Goto, Machine, rooms};
use crate::env::{Entrance, GameEnv, SoundEffect};
use crate::state::{Direction, Point, TileBehavior, WorldState};

/// Distance walked into a cave mouth.
pub const CAVE_DESCENT: i32 = 0x10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StairsState {
    #[default]
    Start,
    Walk,
    WalkCave,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StairsMachine {
    pub state: StairsState,
    /// Tile the player stepped on.
    pub behavior: TileBehavior,
    pub target: Point,
}

impl StairsMachine {
    pub fn new(behavior: TileBehavior) -> Self {
        Self {
            state: StairsState::Start,
            behavior,
            target: Point::default(),
        }
    }
}

pub fn update(machine: &mut Machine, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let Machine::Stairs(stairs) = machine else {
        return Err(machine.mismatch(GameMode::Stairs));
    };

    match stairs.state {
        StairsState::Start => {
            let room = world.current_room(env)?;
            let cave = stairs.behavior == TileBehavior::Cave;
            let origin = match room.cave_mouth {
                Some(mouth) if cave => mouth,
                _ => world.player.position,
            };
            world.entrances.push(rooms::origin_record(world, origin));

            if cave {
                env.effect(SoundEffect::Stairs);
                stairs.target = Point::new(world.player.x(), world.player.y() - CAVE_DESCENT);
                stairs.state = StairsState::WalkCave;
            } else {
                stairs.target = match room.stairs {
                    Some(def) if !world.is_overworld() => def.position,
                    _ => world.player.position,
                };
                stairs.state = StairsState::Walk;
            }
        }
        StairsState::WalkCave => {
            if world.walk_player_toward(Direction::UP, stairs.target.y) {
                finish(world, env)?;
            }
        }
        StairsState::Walk => {
            let reached = if world.player.x() != stairs.target.x {
                let dir = if world.player.x() < stairs.target.x {
                    Direction::RIGHT
                } else {
                    Direction::LEFT
                };
                world.walk_player_toward(dir, stairs.target.x);
                false
            } else if world.player.y() != stairs.target.y {
                let dir = if world.player.y() < stairs.target.y {
                    Direction::DOWN
                } else {
                    Direction::UP
                };
                world.walk_player_toward(dir, stairs.target.y)
            } else {
                true
            };
            if reached {
                finish(world, env)?;
            }
        }
    }
    Ok(())
}

fn finish(world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let room = world.current_room(env)?;
    if world.is_overworld() {
        let goto = match room.entrance {
            Some(Entrance::Cave(room)) => Goto::PlayCave {
                room,
                shortcut: false,
            },
            Some(Entrance::Shortcut(room)) => Goto::PlayCave {
                room,
                shortcut: true,
            },
            Some(Entrance::Level(level)) => Goto::load_level(level),
            None => {
                return Err(EngineError::MissingEntrance {
                    world: world.world_id,
                    room: world.room_id,
                });
            }
        };
        world.goto(goto);
    } else if room.stairs.is_some() {
        world.goto(Goto::PlayCellar);
    } else {
        return Err(EngineError::MissingStairs {
            world: world.world_id,
            room: world.room_id,
        });
    }
    Ok(())
}
