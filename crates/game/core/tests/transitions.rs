//! Mode sequences driven through the public engine surface.

mod common;

use common::{
    Harness, LEVEL_EAST, LEVEL_ONE, OVERWORLD_ENTRY, OVERWORLD_START, OVERWORLD_WEST, hold_from,
    run_until, run_until_mode,
};
use overworld_core::env::AudioCue;
use overworld_core::state::HEART_HP;
use overworld_core::{
    Buttons, GameEngine, GameMode, GameState, Point, ScriptedInput, Song, WorldId,
};

#[test]
fn new_game_loads_unfurls_and_enters_the_entry_room() {
    let harness = Harness::new();
    let env = harness.env();
    let mut state = GameState::with_seed(1);
    let mut engine = GameEngine::new(&mut state);

    engine.start_game();
    let modes = run_until_mode(&mut engine, &env, GameMode::Play);

    assert_eq!(
        modes,
        [GameMode::LoadLevel, GameMode::Unfurl, GameMode::Enter, GameMode::Play]
    );
    let world = &engine.state().world;
    assert_eq!(world.world_id, WorldId::OVERWORLD);
    assert_eq!(world.room_id, OVERWORLD_ENTRY);
    assert_eq!(world.player.position, OVERWORLD_START);
    assert!(harness.audio.contains(AudioCue::Song(Song::Overworld)));
}

#[test]
fn walking_off_an_edge_scrolls_into_the_neighbor() {
    let mut state = GameState::with_seed(2);
    let mut engine = GameEngine::new(&mut state);

    let idle = Harness::new();
    engine.start_game();
    run_until_mode(&mut engine, &idle.env(), GameMode::Play);

    let walking = Harness::with_input(hold_from(0, Buttons::LEFT));
    let modes = run_until(&mut engine, &walking.env(), 1_000, |engine| {
        engine.mode() == GameMode::Play && engine.state().world.room_id == OVERWORLD_WEST
    });

    assert_eq!(
        modes,
        [
            GameMode::Play,
            GameMode::Leave,
            GameMode::Scroll,
            GameMode::Enter,
            GameMode::Play,
        ]
    );
    // Arrived on the east edge, then walked one block in.
    assert_eq!(engine.state().world.player.x(), 0xE0);
    assert_eq!(engine.state().world.player.y(), OVERWORLD_START.y);
}

#[test]
fn death_runs_to_the_continue_prompt_and_continue_restarts() {
    let mut state = GameState::with_seed(3);
    let mut engine = GameEngine::new(&mut state);

    let idle = Harness::new();
    engine.start_game();
    run_until_mode(&mut engine, &idle.env(), GameMode::Play);

    engine.goto_death();
    let modes = run_until_mode(&mut engine, &idle.env(), GameMode::ContinueQuestion);
    assert_eq!(modes, [GameMode::Death, GameMode::ContinueQuestion]);
    assert_eq!(engine.state().world.profile.stats.deaths, 1);
    assert!(engine.state().world.actors.is_empty());
    assert!(idle.audio.contains(AudioCue::Song(Song::Death)));

    let frame = engine.state().world.frame;
    let start = Harness::with_input(ScriptedInput::default().hold(frame, frame + 1, Buttons::START));
    engine.update(&start.env()).unwrap();

    assert_eq!(engine.mode(), GameMode::LoadLevel);
    let world = &engine.state().world;
    assert_eq!(world.palette.dark_step, 0);
    assert_eq!(
        world.profile.hp,
        (3 * HEART_HP).min(world.profile.max_hp())
    );
}

#[test]
fn room_cheat_loads_the_named_room() {
    let harness = Harness::new();
    let env = harness.env();
    let mut state = GameState::with_seed(4);
    let mut engine = GameEngine::new(&mut state);

    engine.run_cheat(&env, "room 1 0x11").unwrap();
    let modes = run_until_mode(&mut engine, &env, GameMode::Play);

    assert_eq!(modes.first(), Some(&GameMode::LoadLevel));
    let world = &engine.state().world;
    assert_eq!(world.world_id, LEVEL_ONE);
    assert_eq!(world.room_id, LEVEL_EAST);
    assert_eq!(world.player.position, Point::new(0x78, 0xC0));
    assert!(engine.take_toasts().is_empty());
}

#[test]
fn menu_request_reaches_the_host() {
    let harness = Harness::new();
    let mut state = GameState::with_seed(5);
    let mut engine = GameEngine::new(&mut state);

    engine.start_game();
    run_until_mode(&mut engine, &harness.env(), GameMode::Play);
    engine.goto_menu();

    assert_eq!(engine.mode(), GameMode::GameMenu);
    assert_eq!(
        engine.take_host_requests(),
        [overworld_core::HostRequest::ReturnToMenu]
    );
}
