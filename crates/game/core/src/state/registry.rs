//! Live actor list.
//!
//! The registry never removes an actor while the engine is iterating. Actors
//! mark themselves deleted and the end-of-tick flush takes them out; spawns
//! made during iteration are parked and appended when the iteration ends.

use super::types::{Actor, ActorId, ActorKind};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorRegistry {
    live: Vec<Actor>,
    pending: Vec<Actor>,
    iterating: bool,
    /// Kinds removed while the live list was out for an update pass.
    doomed: Vec<ActorKind>,
    /// Never reused; 0 is the player.
    next_id: u32,
}

impl Default for ActorRegistry {
    fn default() -> Self {
        Self {
            live: Vec::new(),
            pending: Vec::new(),
            iterating: false,
            doomed: Vec::new(),
            next_id: 1,
        }
    }
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    /// Adds an actor, deferring it if an update pass is running.
    pub fn add(&mut self, actor: Actor) -> ActorId {
        let id = actor.id;
        if self.iterating {
            self.pending.push(actor);
        } else {
            self.live.push(actor);
        }
        id
    }

    /// Adds an actor after removing every existing actor of the same kind.
    pub fn add_unique(&mut self, actor: Actor) -> ActorId {
        self.remove_kind(actor.kind);
        self.add(actor)
    }

    /// Removes every actor of a kind and returns how many were dropped.
    ///
    /// During an update pass the live actors are out of reach; they are marked
    /// deleted when the pass ends and flushed with the rest.
    pub fn remove_kind(&mut self, kind: ActorKind) -> usize {
        let mut removed = 0;
        if self.iterating {
            self.doomed.push(kind);
        } else {
            let before = self.live.len();
            self.live.retain(|actor| actor.kind != kind);
            removed += before - self.live.len();
        }
        let before = self.pending.len();
        self.pending.retain(|actor| actor.kind != kind);
        removed + before - self.pending.len()
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.live
            .iter()
            .chain(self.pending.iter())
            .find(|actor| actor.id == id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.live
            .iter_mut()
            .chain(self.pending.iter_mut())
            .find(|actor| actor.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.live.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.live.iter_mut()
    }

    pub fn of_kind(&self, kind: ActorKind) -> impl Iterator<Item = &Actor> {
        self.live
            .iter()
            .filter(move |actor| actor.kind == kind && !actor.deleted)
    }

    pub fn contains_kind(&self, kind: ActorKind) -> bool {
        self.of_kind(kind).next().is_some()
            || self.pending.iter().any(|actor| actor.kind == kind)
    }

    /// Monsters still alive; the value persisted as a room's object count.
    pub fn monster_count(&self) -> usize {
        self.live
            .iter()
            .chain(self.pending.iter())
            .filter(|actor| actor.kind.is_monster() && !actor.deleted && !actor.decoration)
            .count()
    }

    pub fn len(&self) -> usize {
        self.live.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.live.clear();
        self.pending.clear();
    }

    /// Keeps only the actors matching `keep`.
    pub fn clear_except(&mut self, keep: impl Fn(&Actor) -> bool) {
        self.live.retain(&keep);
        self.pending.retain(&keep);
    }

    /// Takes the live list for an update pass.
    pub fn begin_update(&mut self) -> Vec<Actor> {
        self.iterating = true;
        std::mem::take(&mut self.live)
    }

    /// Restores the live list and appends spawns parked during the pass.
    pub fn end_update(&mut self, actors: Vec<Actor>) {
        let stray = std::mem::replace(&mut self.live, actors);
        self.live.extend(stray);
        for kind in std::mem::take(&mut self.doomed) {
            for actor in self.live.iter_mut().filter(|a| a.kind == kind) {
                actor.deleted = true;
            }
        }
        self.live.append(&mut self.pending);
        self.iterating = false;
    }

    /// Removes deleted actors and returns them so kills can be processed.
    pub fn flush_deleted(&mut self) -> Vec<Actor> {
        let (deleted, live): (Vec<Actor>, Vec<Actor>) =
            std::mem::take(&mut self.live).into_iter().partition(|a| a.deleted);
        self.live = live;
        deleted
    }
}
