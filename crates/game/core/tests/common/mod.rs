//! Shared fixture world and stepping helpers for the integration tests.
#![allow(dead_code)]

use arrayvec::ArrayVec;
use overworld_core::env::{
    AudioSink, Connections, DoorSet, Entrance, InputOracle, MazeDef, RngOracle, RoomKind,
    StairsDef, WorldKind,
};
use overworld_core::state::DoorType;
use overworld_core::{
    ActorKind, AudioLog, Buttons, Direction, Env, GameConfig, GameEngine, GameEnv, GameMode,
    InputEvent, PcgRng, Point, RoomDef, RoomId, ScriptedInput, WorldCatalog, WorldDef, WorldId,
    WorldOracle,
};

pub const OVERWORLD_ENTRY: RoomId = RoomId(0x77);
pub const OVERWORLD_WEST: RoomId = RoomId(0x76);
pub const MAZE_ROOM: RoomId = RoomId(0x61);
/// Overworld room whose cave leads to [`CAVE_ROOM`].
pub const CAVE_MOUTH_ROOM: RoomId = RoomId(0x66);
/// Overworld room whose cave leads down into [`LEVEL_ONE`].
pub const LEVEL_GATE: RoomId = RoomId(0x67);
pub const CAVE_ROOM: RoomId = RoomId(0x80);
pub const LEVEL_ONE: WorldId = WorldId(1);
pub const LEVEL_ENTRY: RoomId = RoomId(0x10);
pub const LEVEL_EAST: RoomId = RoomId(0x11);
/// Level room with a staircase down to [`CELLAR`].
pub const LEVEL_STAIRS: RoomId = RoomId(0x12);
/// Second stairs room; the cellar's west exit.
pub const LEVEL_LADDER: RoomId = RoomId(0x13);
pub const CELLAR: RoomId = RoomId(0x90);

/// Start position in the overworld: close to the west edge.
pub const OVERWORLD_START: Point = Point::new(0x10, 0x90);
pub const LEVEL_START: Point = Point::new(0x78, 0xC0);

/// Where the player stands after walking out of a cave, just below the
/// cave block of [`cave_mouth_layout`].
pub const CAVE_MOUTH: Point = Point::new(0x10, 0x70);
/// Stairs straight above [`LEVEL_START`], one block below the stairs tile.
pub const STAIRS_POSITION: Point = Point::new(0x78, 0x60);
pub const LADDER_POSITION: Point = Point::new(0x40, 0x90);

fn layout(rows: [&str; 11]) -> Vec<String> {
    rows.iter().map(|row| row.to_string()).collect()
}

fn open_layout() -> Vec<String> {
    vec!["................".to_string(); 11]
}

fn walled_top_layout() -> Vec<String> {
    layout([
        "WWWWWWWWWWWWWWWW",
        "................",
        "................",
        "................",
        "................",
        "................",
        "................",
        "................",
        "................",
        "................",
        "................",
    ])
}

/// A cave block straight above [`OVERWORLD_START`].
fn cave_mouth_layout() -> Vec<String> {
    layout([
        "................",
        "................",
        ".C..............",
        "................",
        "................",
        "................",
        "................",
        "................",
        "................",
        "................",
        "................",
    ])
}

/// A stairs tile straight above [`LEVEL_START`].
fn stairs_layout() -> Vec<String> {
    layout([
        "................",
        "................",
        "........>.......",
        "................",
        "................",
        "................",
        "................",
        "................",
        "................",
        "................",
        "................",
    ])
}

pub fn overworld() -> WorldDef {
    let entry = RoomDef {
        id: OVERWORLD_ENTRY,
        layout: walled_top_layout(),
        connections: Connections {
            left: Some(OVERWORLD_WEST),
            ..Connections::default()
        },
        ..RoomDef::default()
    };
    let west = RoomDef {
        id: OVERWORLD_WEST,
        layout: open_layout(),
        connections: Connections {
            right: Some(OVERWORLD_ENTRY),
            ..Connections::default()
        },
        monsters: vec![ActorKind::Octorok, ActorKind::Moblin],
        ..RoomDef::default()
    };
    let maze = RoomDef {
        id: MAZE_ROOM,
        layout: open_layout(),
        maze: Some(MazeDef {
            exit: Direction::DOWN,
            path: [Direction::UP, Direction::LEFT, Direction::UP]
                .into_iter()
                .collect::<ArrayVec<_, { GameConfig::MAX_MAZE_PATH }>>(),
        }),
        ..RoomDef::default()
    };
    let cave_mouth = RoomDef {
        id: CAVE_MOUTH_ROOM,
        layout: cave_mouth_layout(),
        entrance: Some(Entrance::Cave(CAVE_ROOM)),
        cave_mouth: Some(CAVE_MOUTH),
        ..RoomDef::default()
    };
    let gate = RoomDef {
        id: LEVEL_GATE,
        layout: cave_mouth_layout(),
        entrance: Some(Entrance::Level(LEVEL_ONE)),
        cave_mouth: Some(CAVE_MOUTH),
        ..RoomDef::default()
    };
    let cave = RoomDef {
        id: CAVE_ROOM,
        kind: RoomKind::Cave,
        layout: open_layout(),
        ..RoomDef::default()
    };

    WorldDef {
        id: WorldId::OVERWORLD,
        name: "overworld".to_string(),
        kind: WorldKind::Overworld,
        entry_room: OVERWORLD_ENTRY,
        start_position: OVERWORLD_START,
        rooms: vec![entry, west, maze, cave_mouth, gate, cave],
        ..WorldDef::default()
    }
}

pub fn level_one() -> WorldDef {
    let entry = RoomDef {
        id: LEVEL_ENTRY,
        kind: RoomKind::Normal,
        layout: open_layout(),
        connections: Connections {
            right: Some(LEVEL_EAST),
            ..Connections::default()
        },
        doors: DoorSet {
            right: DoorType::Bombable,
            ..DoorSet::default()
        },
        ..RoomDef::default()
    };
    let east = RoomDef {
        id: LEVEL_EAST,
        layout: open_layout(),
        connections: Connections {
            left: Some(LEVEL_ENTRY),
            ..Connections::default()
        },
        doors: DoorSet {
            left: DoorType::Bombable,
            ..DoorSet::default()
        },
        ..RoomDef::default()
    };
    let stairs = RoomDef {
        id: LEVEL_STAIRS,
        layout: stairs_layout(),
        stairs: Some(StairsDef {
            position: STAIRS_POSITION,
            cellar: CELLAR,
        }),
        ..RoomDef::default()
    };
    let ladder = RoomDef {
        id: LEVEL_LADDER,
        layout: open_layout(),
        stairs: Some(StairsDef {
            position: LADDER_POSITION,
            cellar: CELLAR,
        }),
        ..RoomDef::default()
    };
    let cellar = RoomDef {
        id: CELLAR,
        kind: RoomKind::Cellar,
        layout: open_layout(),
        cellar_exits: Some([LEVEL_LADDER, LEVEL_STAIRS]),
        ..RoomDef::default()
    };

    WorldDef {
        id: LEVEL_ONE,
        name: "level-1".to_string(),
        kind: WorldKind::Underworld,
        level_number: 1,
        entry_room: LEVEL_ENTRY,
        start_position: LEVEL_START,
        rooms: vec![entry, east, stairs, ladder, cellar],
        ..WorldDef::default()
    }
}

pub fn catalog() -> WorldCatalog {
    WorldCatalog::new(vec![overworld(), level_one()]).expect("fixture content is valid")
}

/// Collaborators owned by a test; borrowed into a [`GameEnv`] per call.
pub struct Harness {
    pub catalog: WorldCatalog,
    pub input: ScriptedInput,
    pub audio: AudioLog,
    pub config: GameConfig,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_input(ScriptedInput::default())
    }

    pub fn with_input(input: ScriptedInput) -> Self {
        Self {
            catalog: catalog(),
            input,
            audio: AudioLog::new(),
            config: GameConfig::new(),
        }
    }

    pub fn env(&self) -> GameEnv<'_> {
        let worlds: &dyn WorldOracle = &self.catalog;
        let input: &dyn InputOracle = &self.input;
        let audio: &dyn AudioSink = &self.audio;
        let rng: &dyn RngOracle = &PcgRng;
        Env::with_all(worlds, input, audio, rng, &self.config)
    }
}

/// Steps until `done` holds, returning every public mode seen on the way.
///
/// Panics if `limit` frames pass first.
pub fn run_until(
    engine: &mut GameEngine<'_>,
    env: &GameEnv<'_>,
    limit: usize,
    done: impl Fn(&GameEngine<'_>) -> bool,
) -> Vec<GameMode> {
    let mut modes = vec![engine.mode()];
    for _ in 0..limit {
        if done(engine) {
            return modes;
        }
        engine.update(env).expect("update succeeds");
        let mode = engine.mode();
        if modes.last() != Some(&mode) {
            modes.push(mode);
        }
    }
    if done(engine) {
        return modes;
    }
    panic!("condition not reached within {limit} frames; modes seen: {modes:?}");
}

pub fn run_until_mode(
    engine: &mut GameEngine<'_>,
    env: &GameEnv<'_>,
    mode: GameMode,
) -> Vec<GameMode> {
    run_until(engine, env, 2_000, |engine| engine.mode() == mode)
}

/// Steps until `done` holds, returning each internal mode in order with the
/// number of updates its handler ran for.
///
/// `Init*` modes are reported separately from the playing mode they lead to.
pub fn run_timed(
    engine: &mut GameEngine<'_>,
    env: &GameEnv<'_>,
    limit: usize,
    done: impl Fn(&GameEngine<'_>) -> bool,
) -> Vec<(GameMode, u32)> {
    let mut spans: Vec<(GameMode, u32)> = Vec::new();
    for _ in 0..limit {
        if done(engine) {
            return spans;
        }
        let mode = engine.state().machine.mode();
        engine.update(env).expect("update succeeds");
        match spans.last_mut() {
            Some((last, ticks)) if *last == mode => *ticks += 1,
            _ => spans.push((mode, 1)),
        }
    }
    if done(engine) {
        return spans;
    }
    panic!("condition not reached within {limit} frames; spans: {spans:?}");
}

/// Handler calls of the first run of `mode` in `spans`.
pub fn ticks_in(spans: &[(GameMode, u32)], mode: GameMode) -> Option<u32> {
    spans
        .iter()
        .find(|(seen, _)| *seen == mode)
        .map(|(_, ticks)| *ticks)
}

/// Input holding `buttons` from `from` onward.
pub fn hold_from(from: u64, buttons: Buttons) -> ScriptedInput {
    ScriptedInput::new(vec![InputEvent::new(from, buttons)])
}
