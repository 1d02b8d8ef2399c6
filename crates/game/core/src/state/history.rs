//! Entrance stack and recent-room ring.

use arrayvec::ArrayVec;

use super::types::{Direction, Point};
use crate::config::GameConfig;
use crate::env::{RoomId, WorldId};

/// Where the player came from before entering a cave, cellar or level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntranceRecord {
    pub world: WorldId,
    pub room: RoomId,
    pub position: Point,
    pub facing: Direction,
}

/// Bounded LIFO of entrance records. Pushing onto a full stack drops the
/// oldest record.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntranceStack {
    records: ArrayVec<EntranceRecord, { GameConfig::MAX_ENTRANCES }>,
}

impl EntranceStack {
    pub fn push(&mut self, record: EntranceRecord) {
        if self.records.is_full() {
            self.records.remove(0);
        }
        self.records.push(record);
    }

    pub fn pop(&mut self) -> Option<EntranceRecord> {
        self.records.pop()
    }

    pub fn peek(&self) -> Option<&EntranceRecord> {
        self.records.last()
    }

    /// Records from the oldest to the most recent.
    pub fn iter(&self) -> impl Iterator<Item = &EntranceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Ring of recently visited rooms, used to tell first visits from revisits.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomHistory {
    slots: [Option<RoomId>; GameConfig::ROOM_HISTORY_LEN],
    next: usize,
}

impl RoomHistory {
    pub fn contains(&self, room: RoomId) -> bool {
        self.slots.contains(&Some(room))
    }

    /// Records a room unless it is already in the ring.
    pub fn record(&mut self, room: RoomId) {
        if self.contains(room) {
            return;
        }
        self.slots[self.next] = Some(room);
        self.next = (self.next + 1) % GameConfig::ROOM_HISTORY_LEN;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(room: u8) -> EntranceRecord {
        EntranceRecord {
            world: WorldId::OVERWORLD,
            room: RoomId(room),
            position: Point::new(0x40, 0x80),
            facing: Direction::DOWN,
        }
    }

    #[test]
    fn entrance_stack_is_lifo_and_bounded() {
        let mut stack = EntranceStack::default();
        for room in 0..10 {
            stack.push(record(room));
        }
        assert_eq!(stack.len(), GameConfig::MAX_ENTRANCES);
        assert_eq!(stack.pop().map(|r| r.room), Some(RoomId(9)));
        assert_eq!(stack.peek().map(|r| r.room), Some(RoomId(8)));
    }

    #[test]
    fn history_forgets_after_six_rooms() {
        let mut history = RoomHistory::default();
        for room in 0..6 {
            history.record(RoomId(room));
        }
        assert!(history.contains(RoomId(0)));
        history.record(RoomId(6));
        assert!(!history.contains(RoomId(0)));
        assert!(history.contains(RoomId(6)));
    }

    #[test]
    fn revisiting_does_not_push_out_other_rooms() {
        let mut history = RoomHistory::default();
        for room in 0..6 {
            history.record(RoomId(room));
        }
        history.record(RoomId(3));
        assert!(history.contains(RoomId(0)));
    }
}
