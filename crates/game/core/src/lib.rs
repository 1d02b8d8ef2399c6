//! Deterministic, frame-driven world orchestrator.
//!
//! `overworld-core` owns the top-level game modes (scrolling between rooms,
//! entering and leaving caves and cellars, death, level transitions), the
//! live actor registry and its timers, tile collision, doors and the
//! kill/drop economy. Everything the simulation consumes from the outside
//! (world content, buttons, audio, randomness, drawing) comes through the
//! oracle traits in [`env`], so the same state can be stepped by a game
//! client, a headless replay runner or a test.
//!
//! All state mutation flows through [`engine::GameEngine`], and supporting
//! crates depend on the types re-exported here.
pub mod actors;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use config::GameConfig;
pub use engine::{Cheat, CheatError, EngineError, GameEngine, GameMode, Goto, Machine};
#[cfg(feature = "serde")]
pub use engine::{Checkpoint, InputRecording, ReplayError, run_recording, verify_determinism};
pub use env::{
    AudioCue, AudioLog, AudioSink, Buttons, Canvas, ContentError, DrawCall, Env, GameEnv,
    InputEvent, InputOracle, NoInput, NullAudio, OracleError, PcgRng, RecordingCanvas, RngOracle,
    RoomDef, RoomId, ScriptedInput, Song, SoundEffect, WorldCatalog, WorldDef, WorldId,
    WorldOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Actor, ActorId, ActorKind, Direction, GameState, HostRequest, ItemId, Point, Profile,
    StateSnapshot, WorldState,
};
