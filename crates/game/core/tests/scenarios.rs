//! Room-level behavior: walls, bombable doors, maze rooms and exit fallback.

mod common;

use common::{
    Harness, LEVEL_EAST, LEVEL_ENTRY, LEVEL_ONE, MAZE_ROOM, OVERWORLD_ENTRY, OVERWORLD_WEST,
    hold_from, run_until, run_until_mode,
};
use overworld_core::engine::doors;
use overworld_core::engine::rooms::{self, MazeOutcome};
use overworld_core::env::{AudioCue, DrawCall, RecordingCanvas, SoundEffect};
use overworld_core::state::{DoorState, TileBehavior, TileCoord, TriggeredDoor, WorldState};
use overworld_core::{
    ActorKind, Buttons, Direction, GameEngine, GameMode, GameState, Point, Profile, WorldId,
};

#[test]
fn wall_row_stops_the_player_inside_the_room() {
    let harness = Harness::with_input(hold_from(0, Buttons::UP));
    let env = harness.env();
    let mut state = GameState::with_seed(10);
    let mut engine = GameEngine::new(&mut state);

    engine.start_game();
    run_until_mode(&mut engine, &env, GameMode::Play);
    for _ in 0..150 {
        engine.update(&env).unwrap();
    }
    let stopped = engine.state().world.player.y();
    for _ in 0..10 {
        engine.update(&env).unwrap();
    }

    assert_eq!(engine.mode(), GameMode::Play);
    assert_eq!(engine.state().world.room_id, OVERWORLD_ENTRY);
    assert_eq!(engine.state().world.player.y(), stopped);
    // The top block row covers y 0x40..0x50.
    assert!((0x48..=0x58).contains(&stopped), "stopped at {stopped:#x}");
}

#[test]
fn bombed_wall_opens_on_both_sides() {
    let harness = Harness::new();
    let env = harness.env();
    let mut state = GameState::with_seed(11);
    let mut engine = GameEngine::new(&mut state);

    engine.goto_load_level(LEVEL_ONE, true);
    run_until_mode(&mut engine, &env, GameMode::Play);
    assert_eq!(engine.state().world.room_id, LEVEL_ENTRY);
    let room = env.room(LEVEL_ONE, LEVEL_ENTRY).unwrap();
    assert_eq!(
        doors::current_door_state(&engine.state().world, room, Direction::RIGHT),
        DoorState::Wall
    );

    // Center of the bomb sits one block from the east door.
    engine.add_object(ActorKind::Bomb, Point::new(0xD8, 0x88)).unwrap();
    run_until(&mut engine, &env, 200, |engine| {
        engine.state().world.doors.triggered.is_some()
    });
    assert_eq!(
        engine.state().world.doors.triggered,
        Some(TriggeredDoor {
            dir: Direction::RIGHT,
            delay: doors::BOMB_DOOR_DELAY,
        })
    );

    engine.update(&env).unwrap();
    assert!(!doors::is_door_open(&engine.state().world, Direction::RIGHT));
    engine.update(&env).unwrap();

    let world = &engine.state().world;
    assert!(world.room_flags().doors_open.contains(Direction::RIGHT));
    let neighbor = world
        .profile
        .room_flags(&world.world_name, LEVEL_EAST)
        .expect("neighbor flags were written");
    assert!(neighbor.doors_open.contains(Direction::LEFT));

    let state = doors::current_door_state(world, room, Direction::RIGHT);
    assert_eq!(state, DoorState::Bombed);
    assert!(state.is_open());
    assert_eq!(world.tiles.get(TileCoord::new(28, 10)), TileBehavior::Doorway);
    assert_eq!(world.tiles.get(TileCoord::new(31, 10)), TileBehavior::Doorway);
    assert!(harness.audio.contains(AudioCue::Effect(SoundEffect::Door)));

    let mut canvas = RecordingCanvas::default();
    engine.draw(&env, &mut canvas).unwrap();
    assert!(canvas.calls.contains(&DrawCall::Door {
        dir: Direction::RIGHT,
        state: DoorState::Bombed,
    }));
}

#[test]
fn exit_without_connection_falls_back_to_the_entry_room() {
    let mut harness = Harness::with_input(hold_from(0, Buttons::LEFT));
    harness.config = harness.config.clone().with_invincible(true);
    let env = harness.env();
    let mut state = GameState::with_seed(12);
    let mut engine = GameEngine::new(&mut state);

    engine.start_game();
    run_until(&mut engine, &env, 1_000, |engine| {
        engine.mode() == GameMode::Play && engine.state().world.room_id == OVERWORLD_WEST
    });
    // The west room has no western neighbor and the entrance stack is empty.
    run_until(&mut engine, &env, 1_000, |engine| {
        engine.mode() == GameMode::Play && engine.state().world.room_id == OVERWORLD_ENTRY
    });

    assert_eq!(engine.state().world.world_id, WorldId::OVERWORLD);
    assert_eq!(engine.state().world.player.x(), 0xE0);
}

#[test]
fn maze_room_needs_the_full_path() {
    let harness = Harness::new();
    let env = harness.env();
    let mut world = WorldState::new(0, Profile::default());
    rooms::load_room(&mut world, &env, WorldId::OVERWORLD, MAZE_ROOM).unwrap();
    let room = env.room(WorldId::OVERWORLD, MAZE_ROOM).unwrap();

    // A wrong turn starts over.
    assert_eq!(rooms::advance_maze(&mut world, &env, room, Direction::UP), MazeOutcome::Stay);
    assert_eq!(rooms::advance_maze(&mut world, &env, room, Direction::RIGHT), MazeOutcome::Stay);
    assert_eq!(world.maze_step, 0);

    for dir in [Direction::UP, Direction::LEFT] {
        assert_eq!(rooms::advance_maze(&mut world, &env, room, dir), MazeOutcome::Stay);
    }
    assert_eq!(world.maze_step, 2);
    assert!(!harness.audio.contains(AudioCue::Effect(SoundEffect::Secret)));
    assert_eq!(rooms::advance_maze(&mut world, &env, room, Direction::UP), MazeOutcome::Exit);
    assert_eq!(world.maze_step, 0);
    assert!(harness.audio.contains(AudioCue::Effect(SoundEffect::Secret)));

    // The exit direction always leaves and resets progress.
    rooms::advance_maze(&mut world, &env, room, Direction::UP);
    assert_eq!(rooms::advance_maze(&mut world, &env, room, Direction::DOWN), MazeOutcome::Exit);
    assert_eq!(world.maze_step, 0);
}

#[test]
fn queued_edge_spawns_count_as_monsters_left_behind() {
    let harness = Harness::new();
    let env = harness.env();
    let mut state = GameState::with_seed(14);
    let mut engine = GameEngine::new(&mut state);
    engine.start_game();
    run_until_mode(&mut engine, &env, GameMode::Play);

    // Walked in on a monsters-from-edges room; none has stepped in yet.
    state.world.edge_spawns.extend([ActorKind::Octorok, ActorKind::Moblin]);
    let mut engine = GameEngine::new(&mut state);
    engine.goto_death();
    engine.update(&env).unwrap();

    let flags = engine.state().world.room_flags();
    assert_eq!(flags.object_count, Some(2));
    assert!(engine.state().world.edge_spawns.is_empty());
}
