use super::common::{ActorId, Direction, Point};
use super::item::ItemId;

/// Type tag of every live simulation entity.
///
/// The actor factory maps each tag to a constructor and an update function and
/// checks at startup that no tag is left unmapped.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    Player,
    Sword,
    Bomb,
    Item,
    Fireball,
    Octorok,
    Moblin,
    Stalfos,
    Gel,
    Keese,
    RedLeever,
    Goriya,
    OldMan,
    Flame,
}

/// Drop table row selected by a monster's kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum DropClass {
    A,
    B,
    C,
    D,
}

impl DropClass {
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl ActorKind {
    pub const fn is_monster(self) -> bool {
        matches!(
            self,
            Self::Octorok
                | Self::Moblin
                | Self::Stalfos
                | Self::Gel
                | Self::Keese
                | Self::RedLeever
                | Self::Goriya
        )
    }

    /// Kinds whose death does not advance the world kill cycle.
    pub const fn skips_kill_cycle(self) -> bool {
        matches!(self, Self::Gel)
    }

    /// Kinds whose death does not count toward the room's kill count.
    pub const fn counts_room_kill(self) -> bool {
        self.is_monster() && !matches!(self, Self::Keese)
    }

    pub const fn drop_class(self) -> Option<DropClass> {
        match self {
            Self::Octorok | Self::Gel | Self::Keese => Some(DropClass::A),
            Self::Moblin | Self::Goriya => Some(DropClass::B),
            Self::Stalfos => Some(DropClass::C),
            Self::RedLeever => Some(DropClass::D),
            _ => None,
        }
    }

    pub const fn max_hp(self) -> u8 {
        match self {
            Self::Gel | Self::Keese => 1,
            Self::Octorok | Self::RedLeever => 1,
            Self::Moblin | Self::Stalfos => 2,
            Self::Goriya => 3,
            _ => 0,
        }
    }

    /// Hit-point units taken from the player on contact.
    pub const fn contact_damage(self) -> u16 {
        match self {
            Self::Gel | Self::Keese => 0x40,
            Self::Octorok | Self::Moblin | Self::Stalfos | Self::RedLeever => 0x80,
            Self::Goriya => 0x100,
            Self::Fireball => 0x80,
            _ => 0,
        }
    }

    /// Fliers ignore tile collision.
    pub const fn flies(self) -> bool {
        matches!(self, Self::Keese | Self::Fireball)
    }
}

/// Life-cycle phase for kinds that animate through fixed stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorPhase {
    #[default]
    Active,
    /// Monster materializing; harmless and immobile.
    Spawning,
    Fuse,
    Blast,
    Fading,
    Burrowed,
    Surfaced,
}

/// A live simulation entity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub position: Point,
    pub facing: Direction,
    /// Direction of motion this tick; empty when standing still.
    pub moving: Direction,
    /// General-purpose countdown, decremented by the timer service.
    pub timer: u16,
    pub phase: ActorPhase,
    pub hp: u8,
    /// Ticks of damage immunity left.
    pub invincibility: u8,
    /// Purely visual; excluded from object counts and contacts.
    pub decoration: bool,
    /// Marked for removal at the end-of-tick flush.
    pub deleted: bool,
    /// Deleted because it died; feeds the kill economy on flush.
    pub killed: bool,
    /// Actor that spawned this one (sword owner, statue fireball).
    pub owner: Option<ActorId>,
    /// Item actor this one carries.
    pub holding_item: Option<ActorId>,
    /// Item granted on pickup, for `Item` actors.
    pub item: Option<ItemId>,
    /// Room item placed by content, as opposed to a drop.
    pub room_item: bool,
}

impl Actor {
    pub fn new(id: ActorId, kind: ActorKind, position: Point) -> Self {
        Self {
            id,
            kind,
            position,
            facing: Direction::DOWN,
            moving: Direction::empty(),
            timer: 0,
            phase: ActorPhase::Active,
            hp: kind.max_hp(),
            invincibility: 0,
            decoration: false,
            deleted: false,
            killed: false,
            owner: None,
            holding_item: None,
            item: None,
            room_item: false,
        }
    }

    pub fn player(position: Point) -> Self {
        Self::new(ActorId::PLAYER, ActorKind::Player, position)
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    /// Marks the actor dead so the flush step runs the kill economy.
    pub fn kill(&mut self) {
        self.killed = true;
        self.deleted = true;
    }

    /// 16 × 16 box overlap with a margin shaved off every side.
    pub fn overlaps(&self, other: &Actor, margin: i32) -> bool {
        let size = 0x10 - margin * 2;
        let ax = self.position.x + margin;
        let ay = self.position.y + margin;
        let bx = other.position.x + margin;
        let by = other.position.y + margin;
        ax < bx + size && bx < ax + size && ay < by + size && by < ay + size
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::player(Point::default())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_monster_has_a_drop_class_and_hit_points() {
        for kind in ActorKind::iter().filter(|kind| kind.is_monster()) {
            assert!(kind.drop_class().is_some(), "{kind} has no drop class");
            assert!(kind.max_hp() > 0, "{kind} has no hit points");
        }
    }

    #[test]
    fn keese_advances_cycle_but_not_room_kills() {
        assert!(!ActorKind::Keese.skips_kill_cycle());
        assert!(!ActorKind::Keese.counts_room_kill());
        assert!(ActorKind::Gel.skips_kill_cycle());
        assert!(ActorKind::Octorok.counts_room_kill());
    }

    #[test]
    fn overlap_respects_margin() {
        let a = Actor::new(ActorId(1), ActorKind::Octorok, Point::new(0x40, 0x80));
        let mut b = Actor::new(ActorId(2), ActorKind::Octorok, Point::new(0x4E, 0x80));
        assert!(a.overlaps(&b, 0));
        assert!(!a.overlaps(&b, 4));
        b.position.x = 0x47;
        assert!(a.overlaps(&b, 4));
    }
}
