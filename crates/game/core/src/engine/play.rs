//! The playing tick shared by Play, PlayCave and PlayCellar.
//!
//! Order within a tick is fixed:
//!
//! 1. global timers, then stun timers;
//! 2. the player, every live actor, then contacts;
//! 3. edge spawns whose throttle cleared;
//! 4. the deletion flush, feeding kills into the economy;
//! 5. frame hooks.

use super::errors::EngineError;
use super::hook;
use super::mode::Goto;
use super::rooms::{self, SPAWN_TICKS};
use crate::actors::{self, item, player};
use crate::env::{GameEnv, SoundEffect};
use crate::state::{Actor, ActorKind, ActorPhase, Point, TimerKey, WorldState};

/// Player damage immunity after a hit.
pub const PLAYER_INVINCIBLE_TICKS: u16 = 0x20;
/// Monster damage immunity after a hit.
pub const MONSTER_INVINCIBLE_TICKS: u8 = 0x10;
/// Reach of a bomb blast from its center.
pub const BLAST_RADIUS: i32 = 0x18;
pub const BOMB_DAMAGE: u8 = 4;
/// Ticks between two monsters walking in from the edge.
pub const EDGE_SPAWN_SPACING: u8 = 0x20;
/// Ticks between refreshes of the player position monsters chase.
pub const OBSERVE_PERIOD: u8 = 0x10;

const SWORD_MARGIN: i32 = 2;
const PICKUP_MARGIN: i32 = 4;
const CONTACT_MARGIN: i32 = 3;

pub fn tick(world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    world.timers.tick();
    world.stun.tick();
    if world.stun.observed_player == 0 {
        world.observed_player = world.player.position;
        world.stun.observed_player = OBSERVE_PERIOD;
    }

    player::update(world, env)?;
    actors::update_all(world, env)?;
    resolve_contacts(world, env)?;
    spawn_from_edges(world, env)?;
    flush_deleted(world, env)?;
    hook::run_hooks(world, env)
}

/// Sword damage by sword level.
pub const fn sword_damage(level: u8) -> u8 {
    match level {
        0 | 1 => 1,
        2 => 2,
        _ => 4,
    }
}

fn is_vulnerable(actor: &Actor) -> bool {
    actor.kind.is_monster()
        && !actor.deleted
        && !actor.decoration
        && actor.invincibility == 0
        && !matches!(actor.phase, ActorPhase::Spawning | ActorPhase::Burrowed)
}

fn is_harmful(actor: &Actor) -> bool {
    !actor.deleted
        && !actor.decoration
        && (actor.kind == ActorKind::Fireball
            || (actor.kind.is_monster()
                && !matches!(actor.phase, ActorPhase::Spawning | ActorPhase::Burrowed)))
}

fn hurt_monster(monster: &mut Actor, damage: u8, env: &GameEnv<'_>) {
    monster.hp = monster.hp.saturating_sub(damage);
    monster.invincibility = MONSTER_INVINCIBLE_TICKS;
    if monster.hp == 0 {
        monster.kill();
        env.effect(SoundEffect::MonsterDie);
    } else {
        env.effect(SoundEffect::MonsterHurt);
    }
}

/// Weapon hits, item pickups and player contact damage.
pub fn resolve_contacts(world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    let swords: Vec<Actor> = world.actors.of_kind(ActorKind::Sword).cloned().collect();
    let blasts: Vec<Point> = world
        .actors
        .of_kind(ActorKind::Bomb)
        .filter(|bomb| bomb.phase == ActorPhase::Blast)
        .map(|bomb| bomb.position)
        .collect();
    let damage = sword_damage(world.profile.inventory.sword);

    for monster in world.actors.iter_mut().filter(|a| is_vulnerable(a)) {
        if swords.iter().any(|sword| sword.overlaps(monster, SWORD_MARGIN)) {
            hurt_monster(monster, damage, env);
        } else if blasts.iter().any(|&blast| blast.distance(monster.position) <= BLAST_RADIUS) {
            hurt_monster(monster, BOMB_DAMAGE, env);
        }
    }

    let pickups: Vec<_> = world
        .actors
        .of_kind(ActorKind::Item)
        .filter(|item| item.overlaps(&world.player, PICKUP_MARGIN))
        .map(|item| item.id)
        .collect();
    for id in pickups {
        item::pick_up(world, env, id)?;
    }

    if world.timers.is_running(TimerKey::PlayerInvincible) || world.fanfare.is_some() {
        return Ok(());
    }
    let player = world.player.clone();
    let Some(attacker) = world
        .actors
        .iter_mut()
        .find(|actor| is_harmful(actor) && actor.overlaps(&player, CONTACT_MARGIN))
    else {
        return Ok(());
    };
    let amount = attacker.kind.contact_damage();
    if attacker.kind == ActorKind::Fireball {
        attacker.deleted = true;
    }

    world.timers.set(TimerKey::PlayerInvincible, PLAYER_INVINCIBLE_TICKS);
    world.economy.on_player_damaged();
    env.effect(SoundEffect::PlayerHurt);
    if env.config().invincible {
        return Ok(());
    }
    if world.profile.damage(amount) {
        tracing::debug!(room = %world.room_id, "player died");
        world.goto(Goto::Death);
    }
    Ok(())
}

/// Lets the next queued edge monster in once the spacing timer clears.
fn spawn_from_edges(world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    if world.stun.edge_spawn > 0 || world.edge_spawns.is_empty() {
        return Ok(());
    }
    let Some(position) = rooms::edge_spawn_position(world, env) else {
        return Ok(());
    };
    let Some(kind) = world.edge_spawns.pop_front() else {
        return Ok(());
    };
    let id = actors::spawn(world, kind, position)?;
    if let Some(monster) = world.actors.get_mut(id) {
        monster.phase = ActorPhase::Spawning;
        monster.timer = SPAWN_TICKS;
    }
    world.stun.edge_spawn = EDGE_SPAWN_SPACING;
    Ok(())
}

/// Drops deleted actors; every killed monster rolls on the drop table.
fn flush_deleted(world: &mut WorldState, env: &GameEnv<'_>) -> Result<(), EngineError> {
    for actor in world.actors.flush_deleted() {
        if !actor.killed || !actor.kind.is_monster() {
            continue;
        }
        world.profile.stats.kills += 1;
        let roll = world.roll_byte(env, actor.id.0);
        if let Some(drop) = world.economy.record_kill(actor.kind, roll) {
            actors::spawn_item(world, drop, actor.position, false)?;
        }
    }
    Ok(())
}
