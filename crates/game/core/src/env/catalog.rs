//! In-memory world oracle.
//!
//! `WorldCatalog` owns every loaded world and rejects malformed content up
//! front so the engine never meets a dangling reference mid-transition.

use std::collections::BTreeMap;

use super::error::ContentError;
use super::map::{Entrance, RoomDef, RoomKind, SecretTrigger, WorldDef, WorldId, WorldOracle};
use crate::state::{Direction, DoorType};

/// Validated set of worlds keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldCatalog {
    worlds: BTreeMap<WorldId, WorldDef>,
}

impl WorldCatalog {
    /// Builds a catalog, validating every cross reference.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContentError`] found.
    pub fn new(worlds: Vec<WorldDef>) -> Result<Self, ContentError> {
        let mut map = BTreeMap::new();
        for world in worlds {
            let id = world.id;
            if map.insert(id, world).is_some() {
                return Err(ContentError::DuplicateWorld(id));
            }
        }
        let catalog = Self { worlds: map };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn worlds(&self) -> impl Iterator<Item = &WorldDef> {
        self.worlds.values()
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    fn validate(&self) -> Result<(), ContentError> {
        if !self.worlds.contains_key(&WorldId::OVERWORLD) {
            return Err(ContentError::MissingOverworld);
        }
        for world in self.worlds.values() {
            self.validate_world(world)?;
        }
        Ok(())
    }

    fn validate_world(&self, world: &WorldDef) -> Result<(), ContentError> {
        let mut seen = std::collections::BTreeSet::new();
        for room in &world.rooms {
            if !seen.insert(room.id) {
                return Err(ContentError::DuplicateRoom {
                    world: world.id,
                    room: room.id,
                });
            }
        }
        if world.room(world.entry_room).is_none() {
            return Err(ContentError::MissingEntryRoom {
                world: world.id,
                room: world.entry_room,
            });
        }
        for room in &world.rooms {
            room.behavior_grid(world.id)?;
            self.validate_links(world, room)?;
        }
        Ok(())
    }

    fn validate_links(&self, world: &WorldDef, room: &RoomDef) -> Result<(), ContentError> {
        let (wid, rid) = (world.id, room.id);

        for dir in Direction::CARDINALS {
            match room.connections.get(dir) {
                Some(target) if world.room(target).is_none() => {
                    return Err(ContentError::DanglingConnection {
                        world: wid,
                        room: rid,
                        dir,
                        target,
                    });
                }
                None if !world.is_overworld()
                    && !matches!(room.doors.get(dir), DoorType::None | DoorType::Wall) =>
                {
                    return Err(ContentError::DoorWithoutConnection {
                        world: wid,
                        room: rid,
                        dir,
                    });
                }
                _ => {}
            }
        }

        if let Some(entrance) = room.entrance {
            let resolves = match entrance {
                Entrance::Cave(target) | Entrance::Shortcut(target) => world
                    .room(target)
                    .is_some_and(|cave| cave.kind == RoomKind::Cave),
                Entrance::Level(level) => self.worlds.contains_key(&level),
            };
            if !resolves {
                return Err(ContentError::DanglingEntrance { world: wid, room: rid });
            }
        }

        if let Some(stairs) = room.stairs {
            let resolves = world
                .room(stairs.cellar)
                .is_some_and(|cellar| cellar.kind == RoomKind::Cellar);
            if !resolves {
                return Err(ContentError::DanglingCellar { world: wid, room: rid });
            }
        }

        if room.kind == RoomKind::Cellar {
            let exits_resolve = room
                .cellar_exits
                .is_some_and(|exits| exits.iter().all(|exit| world.room(*exit).is_some()));
            if !exits_resolve {
                return Err(ContentError::DanglingCellar { world: wid, room: rid });
            }
        }

        if let Some(maze) = &room.maze {
            if maze.path.is_empty() {
                return Err(ContentError::EmptyMaze { world: wid, room: rid });
            }
        }

        if room.secret == SecretTrigger::BombCave
            && (room.secret_block.is_none() || room.entrance.is_none())
        {
            return Err(ContentError::MissingSecretBlock { world: wid, room: rid });
        }

        Ok(())
    }
}

impl WorldOracle for WorldCatalog {
    fn world(&self, id: WorldId) -> Option<&WorldDef> {
        self.worlds.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::map::{Connections, RoomId};
    use crate::state::Point;

    fn room(id: u8) -> RoomDef {
        RoomDef {
            id: RoomId(id),
            layout: vec!["................".to_string(); 11],
            ..RoomDef::default()
        }
    }

    fn overworld(rooms: Vec<RoomDef>) -> WorldDef {
        WorldDef {
            id: WorldId::OVERWORLD,
            name: "overworld".to_string(),
            entry_room: RoomId(0x77),
            start_position: Point::new(0x78, 0x8D),
            rooms,
            ..WorldDef::default()
        }
    }

    #[test]
    fn accepts_linked_rooms() {
        let mut a = room(0x77);
        a.connections = Connections {
            left: Some(RoomId(0x76)),
            ..Connections::default()
        };
        let catalog = WorldCatalog::new(vec![overworld(vec![a, room(0x76)])]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.room(WorldId::OVERWORLD, RoomId(0x76)).is_some());
    }

    #[test]
    fn rejects_dangling_connection() {
        let mut a = room(0x77);
        a.connections.up = Some(RoomId(0x67));
        let err = WorldCatalog::new(vec![overworld(vec![a])]).unwrap_err();
        assert!(matches!(
            err,
            ContentError::DanglingConnection {
                target: RoomId(0x67),
                ..
            }
        ));
    }

    #[test]
    fn rejects_missing_overworld_and_entry_room() {
        assert_eq!(
            WorldCatalog::new(Vec::new()).unwrap_err(),
            ContentError::MissingOverworld
        );
        let err = WorldCatalog::new(vec![overworld(vec![room(0x10)])]).unwrap_err();
        assert!(matches!(err, ContentError::MissingEntryRoom { .. }));
    }

    #[test]
    fn rejects_entrance_to_missing_level() {
        let mut a = room(0x77);
        a.entrance = Some(Entrance::Level(WorldId(3)));
        let err = WorldCatalog::new(vec![overworld(vec![a])]).unwrap_err();
        assert!(matches!(err, ContentError::DanglingEntrance { .. }));
    }
}
