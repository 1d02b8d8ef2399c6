//! Monster behavior shared by every hostile kind.

use crate::config::GameConfig;
use crate::engine::EngineError;
use crate::engine::collision::collides_with_tile_moving;
use crate::env::GameEnv;
use crate::state::{Actor, ActorId, ActorKind, ActorPhase, Direction, Point, TimerKey, WorldState};

/// Ticks a red leever stays underground before it may surface again.
pub const LEEVER_BURROW_TICKS: u16 = 0x80;
/// Ticks a surfaced red leever walks before burrowing.
pub const LEEVER_SURFACE_TICKS: u16 = 0xC0;
/// Minimum spacing between two leevers surfacing.
pub const LEEVER_SPACING: u8 = 0x40;
/// One roll in this many turns the monster toward a new direction.
const TURN_CHANCE: u32 = 0x10;
/// One roll in this many fires a fireball for kinds that shoot.
const SHOOT_CHANCE: u32 = 0x60;

pub fn new_leever(id: ActorId, kind: ActorKind, position: Point) -> Actor {
    let mut actor = Actor::new(id, kind, position);
    actor.phase = ActorPhase::Burrowed;
    actor.timer = LEEVER_BURROW_TICKS;
    actor
}

pub fn update(actor: &mut Actor, world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    actor.invincibility = actor.invincibility.saturating_sub(1);
    actor.moving = Direction::empty();

    match actor.phase {
        ActorPhase::Spawning => {
            actor.timer = actor.timer.saturating_sub(1);
            if actor.timer == 0 {
                actor.phase = ActorPhase::Active;
            }
            return Ok(());
        }
        ActorPhase::Burrowed => {
            actor.timer = actor.timer.saturating_sub(1);
            if actor.timer == 0 && world.stun.red_leever == 0 {
                actor.phase = ActorPhase::Surfaced;
                actor.timer = LEEVER_SURFACE_TICKS;
                world.stun.red_leever = LEEVER_SPACING;
            }
            return Ok(());
        }
        ActorPhase::Surfaced => {
            actor.timer = actor.timer.saturating_sub(1);
            if actor.timer == 0 {
                actor.phase = ActorPhase::Burrowed;
                actor.timer = LEEVER_BURROW_TICKS;
                return Ok(());
            }
        }
        _ => {}
    }

    if world.timers.is_running(TimerKey::Clock) {
        return Ok(());
    }
    // Boomerang stun.
    if actor.phase == ActorPhase::Active && actor.timer > 0 {
        actor.timer -= 1;
        return Ok(());
    }

    if !actor.facing.is_cardinal() || world.roll(env, actor.id.0) % TURN_CHANCE == 0 {
        actor.facing = choose_direction(actor, world, env);
    }
    step(actor, world, env);

    if matches!(actor.kind, ActorKind::Octorok | ActorKind::Goriya)
        && world.roll(env, actor.id.0) % SHOOT_CHANCE == 0
    {
        let facing = actor.facing;
        let id = super::spawn(world, ActorKind::Fireball, actor.position.offset(facing, 8))?;
        if let Some(fireball) = world.actors.get_mut(id) {
            fireball.owner = Some(actor.id);
            fireball.facing = facing;
            fireball.moving = facing;
        }
    }
    Ok(())
}

/// Half the time toward the last observed player position, otherwise random.
fn choose_direction(actor: &Actor, world: &mut WorldState, env: &GameEnv<'_>) -> Direction {
    let roll = world.roll(env, actor.id.0);
    if roll & 1 == 0 {
        let target = world.observed_player;
        let (dx, dy) = (target.x - actor.x(), target.y - actor.y());
        if dx.abs() > dy.abs() {
            if dx > 0 { Direction::RIGHT } else { Direction::LEFT }
        } else if dy > 0 {
            Direction::DOWN
        } else {
            Direction::UP
        }
    } else {
        Direction::from_ordinal((roll >> 1) as usize % 4).unwrap_or(Direction::DOWN)
    }
}

fn step(actor: &mut Actor, world: &WorldState, env: &GameEnv<'_>) {
    let dir = actor.facing;
    let next = actor.position.offset(dir, 1);
    if !in_bounds(next) {
        actor.facing = dir.opposite();
        return;
    }
    if !actor.kind.flies() {
        let hit = collides_with_tile_moving(&world.tiles, env.config(), actor.x(), actor.y(), dir, false);
        if hit.collides {
            actor.facing = dir.opposite();
            return;
        }
    }
    actor.position = next;
    actor.moving = dir;
}

fn in_bounds(position: Point) -> bool {
    let bottom = GameConfig::playfield_bottom() - 0x10;
    (0x10..=0xE0).contains(&position.x) && (GameConfig::PLAYFIELD_TOP + 0x10..=bottom).contains(&position.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Profile;

    #[test]
    fn leevers_start_underground() {
        let leever = new_leever(ActorId(4), ActorKind::RedLeever, Point::new(0x60, 0x80));
        assert_eq!(leever.phase, ActorPhase::Burrowed);
        assert_eq!(leever.timer, LEEVER_BURROW_TICKS);
    }

    #[test]
    fn leevers_surface_one_at_a_time() {
        let env = GameEnv::empty();
        let mut world = WorldState::new(1, Profile::default());
        let mut a = new_leever(ActorId(4), ActorKind::RedLeever, Point::new(0x60, 0x80));
        let mut b = new_leever(ActorId(5), ActorKind::RedLeever, Point::new(0x80, 0x80));
        a.timer = 1;
        b.timer = 1;
        update(&mut a, &mut world, &env).unwrap();
        update(&mut b, &mut world, &env).unwrap();
        assert_eq!(a.phase, ActorPhase::Surfaced);
        assert_eq!(b.phase, ActorPhase::Burrowed);
        assert_eq!(world.stun.red_leever, LEEVER_SPACING);
    }

    #[test]
    fn spawning_monsters_hold_still() {
        let env = GameEnv::empty();
        let mut world = WorldState::new(1, Profile::default());
        let mut moblin = Actor::new(ActorId(6), ActorKind::Moblin, Point::new(0x60, 0x80));
        moblin.phase = ActorPhase::Spawning;
        moblin.timer = 2;
        update(&mut moblin, &mut world, &env).unwrap();
        assert_eq!(moblin.position, Point::new(0x60, 0x80));
        update(&mut moblin, &mut world, &env).unwrap();
        assert_eq!(moblin.phase, ActorPhase::Active);
    }

    #[test]
    fn clock_freezes_monsters() {
        let env = GameEnv::empty();
        let mut world = WorldState::new(1, Profile::default());
        world.timers.set(TimerKey::Clock, 5);
        let mut gel = Actor::new(ActorId(7), ActorKind::Gel, Point::new(0x60, 0x80));
        update(&mut gel, &mut world, &env).unwrap();
        assert_eq!(gel.position, Point::new(0x60, 0x80));
        assert!(gel.moving.is_empty());
    }
}
