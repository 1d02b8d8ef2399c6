//! Debug commands typed into the host console.
//!
//! ```text
//! room <world> <room>   jump to a room (numbers in decimal or 0x hex)
//! item <name>           grant an item, e.g. `item white_sword`
//! ```

use core::str::FromStr;

use super::mode::{Goto, Machine};
use crate::env::{GameEnv, RoomId, WorldId};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Direction, EntranceRecord, GameState, ItemId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cheat {
    Room { world: WorldId, room: RoomId },
    Item(ItemId),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CheatError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`{0}` is not a number")]
    BadNumber(String),

    #[error("room {room} does not exist in world {}", world.0)]
    UnknownRoom { world: WorldId, room: RoomId },

    #[error("unknown item `{0}`")]
    UnknownItem(String),
}

impl GameError for CheatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => "CHEAT_UNKNOWN_COMMAND",
            Self::MissingArgument { .. } => "CHEAT_MISSING_ARGUMENT",
            Self::BadNumber(_) => "CHEAT_BAD_NUMBER",
            Self::UnknownRoom { .. } => "CHEAT_UNKNOWN_ROOM",
            Self::UnknownItem(_) => "CHEAT_UNKNOWN_ITEM",
        }
    }
}

fn parse_u8(text: &str) -> Result<u8, CheatError> {
    let parsed = match text.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|_| CheatError::BadNumber(text.to_string()))
}

impl FromStr for Cheat {
    type Err = CheatError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("room") => {
                let (Some(world), Some(room)) = (words.next(), words.next()) else {
                    return Err(CheatError::MissingArgument {
                        command: "room",
                        expected: "<world> <room>",
                    });
                };
                Ok(Self::Room {
                    world: WorldId(parse_u8(world)?),
                    room: RoomId(parse_u8(room)?),
                })
            }
            Some("item") => {
                let name = words.next().ok_or(CheatError::MissingArgument {
                    command: "item",
                    expected: "<name>",
                })?;
                ItemId::from_str(name)
                    .map(Self::Item)
                    .map_err(|_| CheatError::UnknownItem(name.to_string()))
            }
            other => Err(CheatError::UnknownCommand(other.unwrap_or_default().to_string())),
        }
    }
}

/// Applies a parsed cheat. Room jumps replace the active mode with a level
/// load that lands in the named room.
pub fn apply(cheat: Cheat, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), CheatError> {
    match cheat {
        Cheat::Room { world, room } => {
            let def = env
                .world(world)
                .ok()
                .filter(|def| def.room(room).is_some())
                .ok_or(CheatError::UnknownRoom { world, room })?;
            tracing::info!(world = %def.name, %room, "cheat: room jump");
            state.machine = Machine::enter(Goto::LoadLevel {
                world,
                restart: false,
                arrival: Some(EntranceRecord {
                    world,
                    room,
                    position: def.start_position,
                    facing: Direction::UP,
                }),
            });
        }
        Cheat::Item(item) => {
            tracing::info!(%item, "cheat: item");
            let level = state.world.level_number;
            state.world.profile.collect(item, level);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_room_numbers_in_hex_and_decimal() {
        assert_eq!(
            "room 1 0x22".parse::<Cheat>(),
            Ok(Cheat::Room {
                world: WorldId(1),
                room: RoomId(0x22),
            })
        );
        assert_eq!(
            "room 0x01 34".parse::<Cheat>(),
            Ok(Cheat::Room {
                world: WorldId(1),
                room: RoomId(34),
            })
        );
    }

    #[test]
    fn item_names_are_snake_case() {
        assert_eq!("item white_sword".parse::<Cheat>(), Ok(Cheat::Item(ItemId::WhiteSword)));
        assert_eq!(
            "item excalibur".parse::<Cheat>(),
            Err(CheatError::UnknownItem("excalibur".into()))
        );
    }

    #[test]
    fn malformed_commands_are_rejected() {
        assert!(matches!("room 1".parse::<Cheat>(), Err(CheatError::MissingArgument { .. })));
        assert!(matches!("room x 1".parse::<Cheat>(), Err(CheatError::BadNumber(_))));
        assert!(matches!("".parse::<Cheat>(), Err(CheatError::UnknownCommand(_))));
    }

    #[test]
    fn room_jump_needs_an_existing_room() {
        let mut state = GameState::default();
        let cheat = Cheat::Room {
            world: WorldId(3),
            room: RoomId(1),
        };
        assert_eq!(
            apply(cheat, &mut state, &GameEnv::empty()),
            Err(CheatError::UnknownRoom {
                world: WorldId(3),
                room: RoomId(1),
            })
        );
    }

    #[test]
    fn item_cheat_goes_through_the_profile() {
        let mut state = GameState::default();
        apply(Cheat::Item(ItemId::Key), &mut state, &GameEnv::empty()).unwrap();
        assert_eq!(state.world.profile.inventory.keys, 1);
    }
}
