//! Compact, hashable view of the deterministic parts of a session.
//!
//! Two runs of the same recording must produce byte-identical digests at every
//! checkpoint; the snapshot therefore only holds positions, kinds and the
//! profile, never presentation state.

#[cfg(feature = "serde")]
use sha2::{Digest, Sha256};

#[cfg(feature = "serde")]
use super::profile::ProfileError;
use super::profile::Profile;
use super::types::{ActorKind, Point};
use super::world::WorldState;
use crate::env::{RoomId, WorldId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSnapshot {
    pub kind: ActorKind,
    pub position: Point,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateSnapshot {
    pub frame: u64,
    pub world: WorldId,
    pub room: RoomId,
    pub player: Point,
    /// Live actors in registry order.
    pub actors: Vec<ActorSnapshot>,
    pub profile: Profile,
}

impl StateSnapshot {
    pub fn capture(world: &WorldState) -> Self {
        Self {
            frame: world.frame,
            world: world.world_id,
            room: world.room_id,
            player: world.player.position,
            actors: world
                .actors
                .iter()
                .filter(|actor| !actor.deleted)
                .map(|actor| ActorSnapshot {
                    kind: actor.kind,
                    position: actor.position,
                })
                .collect(),
            profile: world.profile.clone(),
        }
    }

    /// SHA-256 over the frame, location, actors and the profile's bincode
    /// encoding.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], ProfileError> {
        let mut hasher = Sha256::new();
        hasher.update(self.frame.to_le_bytes());
        hasher.update([self.world.0, self.room.0]);
        hash_point(&mut hasher, self.player);
        for actor in &self.actors {
            hasher.update([actor.kind as u8]);
            hash_point(&mut hasher, actor.position);
        }
        hasher.update(self.profile.encode()?);
        Ok(hasher.finalize().into())
    }
}

#[cfg(feature = "serde")]
fn hash_point(hasher: &mut Sha256, point: Point) {
    hasher.update(point.x.to_le_bytes());
    hasher.update(point.y.to_le_bytes());
}
