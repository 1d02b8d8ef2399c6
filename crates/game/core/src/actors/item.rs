//! Items lying on the floor and what picking one up does.

use crate::engine::{EngineError, Goto, rooms};
use crate::env::{GameEnv, RoomKind, Song, SoundEffect};
use crate::state::{Actor, ActorId, ActorKind, Fanfare, ItemId, TimerKey, WorldState};

/// Ticks a monster drop stays on the floor.
pub const DROP_LIFETIME: u16 = 0x1FF;
/// Ticks monsters stay frozen after the clock is picked up.
pub const CLOCK_TICKS: u16 = 0x100;
/// Ticks the player holds a power item overhead.
pub const FANFARE_TICKS: u16 = 0x80;

pub fn update(item: &mut Actor, _world: &mut WorldState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
    if item.room_item {
        return Ok(());
    }
    item.timer = item.timer.saturating_sub(1);
    if item.timer == 0 {
        item.deleted = true;
    }
    Ok(())
}

fn pickup_sound(item: ItemId) -> SoundEffect {
    match item {
        ItemId::Rupee | ItemId::FiveRupees => SoundEffect::Rupee,
        ItemId::Heart | ItemId::Fairy => SoundEffect::Heart,
        ItemId::Key | ItemId::MagicKey | ItemId::HeartContainer => SoundEffect::KeyHeart,
        _ => SoundEffect::Item,
    }
}

/// Grants the item carried by actor `id` and removes it from the room.
pub fn pick_up(world: &mut WorldState, env: &GameEnv<'_>, id: ActorId) -> Result<(), EngineError> {
    let Some(actor) = world.actors.get_mut(id) else {
        return Ok(());
    };
    if actor.deleted {
        return Ok(());
    }
    actor.deleted = true;
    let room_item = actor.room_item;
    let Some(item) = actor.item else {
        return Ok(());
    };

    world.profile.collect(item, world.level_number);
    env.effect(pickup_sound(item));
    tracing::debug!(%item, room = %world.room_id, "item collected");

    if item == ItemId::Clock {
        world.timers.set(TimerKey::Clock, CLOCK_TICKS);
    }
    if room_item {
        let flag = rooms::item_flag(world.current_room(env)?);
        world.room_flags_mut().objects |= flag;
        if world.room_kind == RoomKind::Cave {
            world.actors.remove_kind(ActorKind::OldMan);
            world.actors.remove_kind(ActorKind::Flame);
        }
    }
    if item.is_power_item() {
        world.fanfare = Some(Fanfare {
            item,
            timer: FANFARE_TICKS,
        });
        env.push_song(Song::Fanfare);
    }

    match item {
        ItemId::TriforcePiece => world.goto(Goto::EndLevel),
        ItemId::TriforceOfPower => world.goto(Goto::WinGame),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AudioCue, AudioLog, AudioSink, Env};
    use crate::state::{Point, Profile};

    fn drop_in(world: &mut WorldState, item: ItemId) -> ActorId {
        crate::actors::spawn_item(world, item, Point::new(0x40, 0x80), false).unwrap()
    }

    #[test]
    fn rupee_drop_adds_rupees_and_plays_sound() {
        let audio = AudioLog::new();
        let sink: &dyn AudioSink = &audio;
        let env: GameEnv<'_> = Env::new(None, None, Some(sink), None, None);
        let mut world = WorldState::new(0, Profile::default());
        let id = drop_in(&mut world, ItemId::FiveRupees);
        pick_up(&mut world, &env, id).unwrap();
        assert_eq!(world.profile.inventory.rupees, 5);
        assert!(world.actors.get(id).unwrap().deleted);
        assert!(audio.contains(AudioCue::Effect(SoundEffect::Rupee)));
    }

    #[test]
    fn clock_freezes_and_power_items_start_fanfare() {
        let env = GameEnv::empty();
        let mut world = WorldState::new(0, Profile::default());
        let clock = drop_in(&mut world, ItemId::Clock);
        pick_up(&mut world, &env, clock).unwrap();
        assert_eq!(world.timers.get(TimerKey::Clock), CLOCK_TICKS);

        let sword = drop_in(&mut world, ItemId::WhiteSword);
        pick_up(&mut world, &env, sword).unwrap();
        assert_eq!(world.profile.inventory.sword, 2);
        assert_eq!(world.fanfare.map(|f| f.item), Some(ItemId::WhiteSword));
    }

    #[test]
    fn triforce_piece_ends_the_level() {
        let env = GameEnv::empty();
        let mut world = WorldState::new(0, Profile::default());
        world.level_number = 2;
        let piece = drop_in(&mut world, ItemId::TriforcePiece);
        pick_up(&mut world, &env, piece).unwrap();
        assert_eq!(world.profile.inventory.triforce, 0b10);
        assert_eq!(world.pending(), Some(&Goto::EndLevel));
    }

    #[test]
    fn drops_time_out() {
        let env = GameEnv::empty();
        let mut world = WorldState::new(0, Profile::default());
        let mut rupee = Actor::new(ActorId(9), ActorKind::Item, Point::new(0x40, 0x80));
        rupee.timer = 2;
        update(&mut rupee, &mut world, &env).unwrap();
        assert!(!rupee.deleted);
        update(&mut rupee, &mut world, &env).unwrap();
        assert!(rupee.deleted);
    }
}
