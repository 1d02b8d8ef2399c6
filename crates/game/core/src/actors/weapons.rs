//! Sword, bombs and fireballs.

use crate::config::GameConfig;
use crate::engine::EngineError;
use crate::env::{GameEnv, SoundEffect};
use crate::state::{
    Actor, ActorId, ActorKind, ActorPhase, ObjectFlags, Point, TileBehavior, WorldState,
};

use super::player::{SWORD_REACH, SWORD_TICKS};

pub const FUSE_TICKS: u16 = 0x30;
pub const BLAST_TICKS: u16 = 0x0C;
pub const FADE_TICKS: u16 = 0x0B;
/// How close a blast must be to a bombable block to open it.
pub const SECRET_REACH: i32 = 0x18;
pub const FIREBALL_SPEED: i32 = 2;

pub fn new_sword(id: ActorId, kind: ActorKind, position: Point) -> Actor {
    let mut sword = Actor::new(id, kind, position);
    sword.timer = SWORD_TICKS;
    sword
}

/// The blade tracks the player and vanishes when the swing ends.
pub fn update_sword(sword: &mut Actor, world: &mut WorldState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
    sword.facing = world.player.facing;
    sword.position = world.player.position.offset(sword.facing, SWORD_REACH);
    sword.timer = sword.timer.saturating_sub(1);
    if sword.timer == 0 {
        sword.deleted = true;
    }
    Ok(())
}

pub fn new_bomb(id: ActorId, kind: ActorKind, position: Point) -> Actor {
    let mut bomb = Actor::new(id, kind, position);
    bomb.phase = ActorPhase::Fuse;
    bomb.timer = FUSE_TICKS;
    bomb
}

pub fn update_bomb(bomb: &mut Actor, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    bomb.timer = bomb.timer.saturating_sub(1);
    if bomb.timer > 0 {
        return Ok(());
    }
    match bomb.phase {
        ActorPhase::Fuse => {
            bomb.phase = ActorPhase::Blast;
            bomb.timer = BLAST_TICKS;
            env.effect(SoundEffect::Bomb);
            blast_secret(bomb.position, world, env)?;
        }
        ActorPhase::Blast => {
            bomb.phase = ActorPhase::Fading;
            bomb.timer = FADE_TICKS;
        }
        _ => bomb.deleted = true,
    }
    Ok(())
}

/// Opens a bombable cave in the overworld.
fn blast_secret(center: Point, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    if !world.is_overworld() || world.room_flags().objects.contains(ObjectFlags::SECRET_FOUND) {
        return Ok(());
    }
    let room = world.current_room(env)?;
    let Some(block) = room.secret_block else {
        return Ok(());
    };
    if block.distance(center) > SECRET_REACH {
        return Ok(());
    }
    world.tiles.set_block(block.x, block.y, TileBehavior::Cave);
    world.room_flags_mut().objects |= ObjectFlags::SECRET_FOUND;
    env.effect(SoundEffect::Secret);
    tracing::debug!(room = %world.room_id, "bombed a secret cave open");
    Ok(())
}

pub fn update_fireball(fireball: &mut Actor, _world: &mut WorldState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
    fireball.position = fireball.position.offset(fireball.moving, FIREBALL_SPEED);
    let Point { x, y } = fireball.position;
    let off_field = !(0..GameConfig::PLAYFIELD_WIDTH).contains(&x)
        || !(GameConfig::PLAYFIELD_TOP..GameConfig::playfield_bottom()).contains(&y)
        || fireball.moving.is_empty();
    if off_field {
        fireball.deleted = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Direction, Profile};

    #[test]
    fn bomb_runs_fuse_blast_fade() {
        let env = GameEnv::empty();
        let mut world = WorldState::new(0, Profile::default());
        world.world_kind = crate::env::WorldKind::Underworld;
        let mut bomb = new_bomb(ActorId(2), ActorKind::Bomb, Point::new(0x80, 0x90));
        for _ in 0..FUSE_TICKS {
            update_bomb(&mut bomb, &mut world, &env).unwrap();
        }
        assert_eq!(bomb.phase, ActorPhase::Blast);
        for _ in 0..BLAST_TICKS {
            update_bomb(&mut bomb, &mut world, &env).unwrap();
        }
        assert_eq!(bomb.phase, ActorPhase::Fading);
        for _ in 0..FADE_TICKS {
            update_bomb(&mut bomb, &mut world, &env).unwrap();
        }
        assert!(bomb.deleted);
    }

    #[test]
    fn fireballs_leave_the_playfield() {
        let env = GameEnv::empty();
        let mut world = WorldState::new(0, Profile::default());
        let mut fireball = Actor::new(ActorId(3), ActorKind::Fireball, Point::new(2, 0x80));
        fireball.moving = Direction::LEFT;
        update_fireball(&mut fireball, &mut world, &env).unwrap();
        assert!(!fireball.deleted);
        update_fireball(&mut fireball, &mut world, &env).unwrap();
        assert!(fireball.deleted);
    }

    #[test]
    fn sword_follows_the_player() {
        let env = GameEnv::empty();
        let mut world = WorldState::new(0, Profile::default());
        world.player.position = Point::new(0x40, 0x80);
        world.player.facing = Direction::UP;
        let mut sword = new_sword(ActorId(1), ActorKind::Sword, Point::default());
        update_sword(&mut sword, &mut world, &env).unwrap();
        assert_eq!(sword.position, Point::new(0x40, 0x80 - SWORD_REACH));
        assert_eq!(sword.timer, SWORD_TICKS - 1);
    }
}
