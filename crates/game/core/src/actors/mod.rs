//! Actor behaviors and the kind → behavior factory.
//!
//! Every [`ActorKind`] maps to a constructor and a per-tick update function.
//! The table is built once and checked for totality before first use, so an
//! unmapped kind surfaces as [`EngineError::UnmappedActorKind`] instead of a
//! silent no-op.
pub mod item;
pub mod monster;
pub mod people;
pub mod player;
pub mod weapons;

use std::sync::OnceLock;

use strum::{EnumCount, IntoEnumIterator};

use crate::engine::EngineError;
use crate::env::GameEnv;
use crate::state::{Actor, ActorId, ActorKind, ItemId, Point, WorldState};

pub type Constructor = fn(ActorId, ActorKind, Point) -> Actor;

/// Per-tick behavior. The actor is detached from the registry while it runs;
/// spawns it makes are deferred until the pass ends.
pub type UpdateFn = fn(&mut Actor, &mut WorldState, &GameEnv<'_>) -> Result<(), EngineError>;

#[derive(Clone, Copy)]
pub struct ActorEntry {
    pub construct: Constructor,
    pub update: UpdateFn,
}

pub struct ActorFactory {
    entries: [Option<ActorEntry>; ActorKind::COUNT],
}

impl ActorFactory {
    pub fn standard() -> Result<&'static ActorFactory, EngineError> {
        static FACTORY: OnceLock<ActorFactory> = OnceLock::new();
        let factory = FACTORY.get_or_init(ActorFactory::build);
        factory.validate()?;
        Ok(factory)
    }

    fn build() -> Self {
        let mut factory = Self {
            entries: [None; ActorKind::COUNT],
        };
        factory.register(ActorKind::Player, Actor::new, idle);
        factory.register(ActorKind::Sword, weapons::new_sword, weapons::update_sword);
        factory.register(ActorKind::Bomb, weapons::new_bomb, weapons::update_bomb);
        factory.register(ActorKind::Fireball, Actor::new, weapons::update_fireball);
        factory.register(ActorKind::Item, Actor::new, item::update);
        for kind in [
            ActorKind::Octorok,
            ActorKind::Moblin,
            ActorKind::Stalfos,
            ActorKind::Gel,
            ActorKind::Keese,
            ActorKind::Goriya,
        ] {
            factory.register(kind, Actor::new, monster::update);
        }
        factory.register(ActorKind::RedLeever, monster::new_leever, monster::update);
        factory.register(ActorKind::OldMan, Actor::new, idle);
        factory.register(ActorKind::Flame, people::new_flame, people::update_flame);
        factory
    }

    fn register(&mut self, kind: ActorKind, construct: Constructor, update: UpdateFn) {
        self.entries[kind as usize] = Some(ActorEntry { construct, update });
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        match ActorKind::iter().find(|kind| self.entries[*kind as usize].is_none()) {
            Some(kind) => Err(EngineError::UnmappedActorKind(kind)),
            None => Ok(()),
        }
    }

    pub fn entry(&self, kind: ActorKind) -> Result<ActorEntry, EngineError> {
        self.entries[kind as usize].ok_or(EngineError::UnmappedActorKind(kind))
    }

    pub fn create(&self, id: ActorId, kind: ActorKind, position: Point) -> Result<Actor, EngineError> {
        Ok((self.entry(kind)?.construct)(id, kind, position))
    }
}

fn idle(_: &mut Actor, _: &mut WorldState, _: &GameEnv<'_>) -> Result<(), EngineError> {
    Ok(())
}

/// Creates an actor through the factory and adds it to the registry.
pub fn spawn(world: &mut WorldState, kind: ActorKind, position: Point) -> Result<ActorId, EngineError> {
    let id = world.actors.allocate_id();
    let actor = ActorFactory::standard()?.create(id, kind, position)?;
    Ok(world.actors.add(actor))
}

/// Like [`spawn`], replacing every live actor of the same kind.
pub fn spawn_unique(
    world: &mut WorldState,
    kind: ActorKind,
    position: Point,
) -> Result<ActorId, EngineError> {
    let id = world.actors.allocate_id();
    let actor = ActorFactory::standard()?.create(id, kind, position)?;
    Ok(world.actors.add_unique(actor))
}

/// Places an item on the floor. Drops expire; room items stay.
pub fn spawn_item(
    world: &mut WorldState,
    item: ItemId,
    position: Point,
    room_item: bool,
) -> Result<ActorId, EngineError> {
    let id = world.actors.allocate_id();
    let mut actor = ActorFactory::standard()?.create(id, ActorKind::Item, position)?;
    actor.item = Some(item);
    actor.room_item = room_item;
    if !room_item {
        actor.timer = item::DROP_LIFETIME;
    }
    Ok(world.actors.add(actor))
}

/// Runs every live actor's update once.
pub fn update_all(world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let factory = ActorFactory::standard()?;
    let mut actors = world.actors.begin_update();
    let mut result = Ok(());
    for actor in actors.iter_mut().filter(|actor| !actor.deleted) {
        result = factory
            .entry(actor.kind)
            .and_then(|entry| (entry.update)(actor, world, env));
        if result.is_err() {
            break;
        }
    }
    world.actors.end_update(actors);
    result
}
