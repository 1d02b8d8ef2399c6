//! Entrance stack bookkeeping across caves, cellars and level gates.

mod common;

use common::{
    CAVE_MOUTH, CAVE_MOUTH_ROOM, CAVE_ROOM, CELLAR, Harness, LADDER_POSITION, LEVEL_GATE,
    LEVEL_LADDER, LEVEL_ONE, LEVEL_STAIRS, hold_from, run_timed, run_until_mode, ticks_in,
};
use overworld_core::engine::modes::FADE_TICKS;
use overworld_core::engine::modes::cave::{CAVE_START, CAVE_WAIT, CAVE_WALK_Y};
use overworld_core::engine::modes::cellar::{CELLAR_START, CELLAR_WALK_Y};
use overworld_core::engine::modes::enter::{CAVE_WALK_DISTANCE, ENTER_WAIT};
use overworld_core::engine::modes::load_level::LOAD_WAIT;
use overworld_core::engine::modes::stairs::CAVE_DESCENT;
use overworld_core::env::AudioCue;
use overworld_core::state::{PaletteState, TileBehavior};
use overworld_core::{
    Buttons, Direction, EngineError, GameEngine, GameMode, GameState, Goto, Machine, Point,
    SoundEffect, WorldId,
};

/// Handler calls for one full fade between lit and dark.
const FADE: u32 = PaletteState::DARK as u32 * FADE_TICKS as u32;

#[test]
fn cave_round_trip_pushes_then_pops_the_mouth() {
    let idle = Harness::new();
    let mut state = GameState::with_seed(21);
    let mut engine = GameEngine::new(&mut state);
    engine.run_cheat(&idle.env(), "room 0 0x66").unwrap();
    run_until_mode(&mut engine, &idle.env(), GameMode::Play);
    assert!(engine.state().world.entrances.is_empty());

    // Walking up into the cave block descends.
    let up = Harness::with_input(hold_from(0, Buttons::UP));
    let spans = run_timed(&mut engine, &up.env(), 500, |engine| {
        engine.state().machine.mode() == GameMode::PlayCave
    });
    assert_eq!(
        spans[1..],
        [
            (GameMode::Stairs, 1 + CAVE_DESCENT as u32),
            (
                GameMode::InitPlayCave,
                1 + u32::from(CAVE_WAIT) + 1 + (CAVE_START.y - CAVE_WALK_Y) as u32,
            ),
        ]
    );
    assert!(up.audio.contains(AudioCue::Effect(SoundEffect::Stairs)));

    let world = &engine.state().world;
    assert_eq!(world.room_id, CAVE_ROOM);
    assert_eq!(world.player.position, Point::new(CAVE_START.x, CAVE_WALK_Y));
    assert_eq!(world.entrances.len(), 1);
    let record = world.entrances.peek().copied().unwrap();
    assert_eq!(record.world, WorldId::OVERWORLD);
    assert_eq!(record.room, CAVE_MOUTH_ROOM);
    assert_eq!(record.position, CAVE_MOUTH);

    // Walking down out of the cave returns to the mouth.
    let down = Harness::with_input(hold_from(0, Buttons::DOWN));
    let spans = run_timed(&mut engine, &down.env(), 200, |engine| {
        engine.mode() == GameMode::Play
    });
    assert_eq!(spans.first().map(|(mode, _)| *mode), Some(GameMode::PlayCave));
    assert_eq!(
        ticks_in(&spans, GameMode::Enter),
        Some(1 + CAVE_WALK_DISTANCE as u32)
    );

    let world = &engine.state().world;
    assert!(world.entrances.is_empty());
    assert_eq!(world.room_id, CAVE_MOUTH_ROOM);
    assert_eq!(world.player.position, CAVE_MOUTH.offset(Direction::DOWN, CAVE_WALK_DISTANCE));
    assert_eq!(world.player.facing, Direction::DOWN);
}

#[test]
fn cellar_round_trip_leaves_by_the_west_exit() {
    let idle = Harness::new();
    let mut state = GameState::with_seed(22);
    let mut engine = GameEngine::new(&mut state);
    engine.run_cheat(&idle.env(), "room 1 0x12").unwrap();
    run_until_mode(&mut engine, &idle.env(), GameMode::Play);
    assert!(engine.state().world.entrances.is_empty());

    // Stepping onto the stairs tile on the way up.
    let up = Harness::with_input(hold_from(0, Buttons::UP));
    let spans = run_timed(&mut engine, &up.env(), 1_000, |engine| {
        engine.state().machine.mode() == GameMode::PlayCellar
    });
    assert!(ticks_in(&spans, GameMode::Stairs).is_some());
    assert_eq!(
        ticks_in(&spans, GameMode::InitPlayCellar),
        Some(1 + FADE + 1 + FADE + (CELLAR_WALK_Y - CELLAR_START.y) as u32)
    );

    let world = &engine.state().world;
    assert_eq!((world.world_id, world.room_id), (LEVEL_ONE, CELLAR));
    assert_eq!(world.player.position, Point::new(CELLAR_START.x, CELLAR_WALK_Y));
    assert_eq!(world.entrances.len(), 1);
    assert_eq!(world.entrances.peek().map(|record| record.room), Some(LEVEL_STAIRS));

    // Still holding up: back to the ladder, out on the west side.
    let spans = run_timed(&mut engine, &up.env(), 1_000, |engine| {
        engine.mode() == GameMode::Play && engine.state().world.room_id == LEVEL_LADDER
    });
    assert_eq!(
        spans[1..],
        [
            (GameMode::LeaveCellar, 1 + FADE + 1 + FADE),
            (GameMode::Enter, 1 + u32::from(ENTER_WAIT)),
        ]
    );

    let world = &engine.state().world;
    assert!(world.entrances.is_empty());
    assert_eq!(world.player.position, LADDER_POSITION);
    assert_eq!(world.palette.dark_step, 0);
}

#[test]
fn level_gate_keeps_the_overworld_record_until_the_level_ends() {
    let idle = Harness::new();
    let mut state = GameState::with_seed(23);
    let mut engine = GameEngine::new(&mut state);
    engine.run_cheat(&idle.env(), "room 0 0x67").unwrap();
    run_until_mode(&mut engine, &idle.env(), GameMode::Play);
    assert!(engine.state().world.entrances.is_empty());

    let up = Harness::with_input(hold_from(0, Buttons::UP));
    let spans = run_timed(&mut engine, &up.env(), 1_000, |engine| {
        engine.mode() == GameMode::Play && engine.state().world.world_id == LEVEL_ONE
    });
    assert_eq!(
        spans[1..],
        [
            (GameMode::Stairs, 1 + CAVE_DESCENT as u32),
            (GameMode::LoadLevel, 1 + u32::from(LOAD_WAIT)),
            (GameMode::Unfurl, 0x10),
            (GameMode::Enter, 1 + u32::from(ENTER_WAIT)),
        ]
    );

    // Loading the level cleared the stack but carried the gate record over.
    let world = &engine.state().world;
    assert_eq!(world.entrances.len(), 1);
    let record = world.entrances.peek().copied().unwrap();
    assert_eq!((record.world, record.room), (WorldId::OVERWORLD, LEVEL_GATE));
    assert_eq!(record.position, CAVE_MOUTH);

    state.world.profile.hp = state.world.profile.max_hp();
    state.machine = Machine::enter(Goto::EndLevel);
    let mut engine = GameEngine::new(&mut state);
    let spans = run_timed(&mut engine, &idle.env(), 2_000, |engine| {
        engine.mode() == GameMode::Play
    });

    // Arriving on the cave mouth walks out of it instead of standing.
    assert_eq!(
        spans[1..],
        [
            (GameMode::LoadLevel, 1 + u32::from(LOAD_WAIT)),
            (GameMode::Unfurl, 0x10),
            (GameMode::Enter, 1 + CAVE_WALK_DISTANCE as u32),
        ]
    );
    let world = &engine.state().world;
    assert!(world.entrances.is_empty());
    assert_eq!((world.world_id, world.room_id), (WorldId::OVERWORLD, LEVEL_GATE));
    assert_eq!(world.player.position, CAVE_MOUTH.offset(Direction::DOWN, CAVE_WALK_DISTANCE));
}

#[test]
fn overworld_cave_without_entrance_is_an_error() {
    let idle = Harness::new();
    let mut state = GameState::with_seed(24);
    let mut engine = GameEngine::new(&mut state);
    engine.start_game();
    run_until_mode(&mut engine, &idle.env(), GameMode::Play);

    // The entry room names no entrance.
    state.machine = Machine::enter(Goto::Stairs(TileBehavior::Cave));
    let mut engine = GameEngine::new(&mut state);
    let result = (0..=CAVE_DESCENT).try_for_each(|_| engine.update(&idle.env()));

    assert!(matches!(result, Err(EngineError::MissingEntrance { .. })));
}
