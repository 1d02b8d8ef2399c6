//! Traits describing the engine's external collaborators.
//!
//! Oracles expose static world content, button input, audio output and
//! randomness. The [`Env`] aggregate bundles them so the engine can reach
//! everything it needs without coupling to concrete implementations.
mod audio;
mod canvas;
mod catalog;
mod error;
mod input;
mod map;
mod rng;

pub use audio::{AudioCue, AudioLog, AudioSink, NullAudio, Song, SongStream, SoundEffect};
pub use canvas::{Canvas, DrawCall, RecordingCanvas};
pub use catalog::WorldCatalog;
pub use error::{ContentError, OracleError};
pub use input::{Buttons, InputEvent, InputOracle, NoInput, ScriptedInput};
pub use map::{
    Connections, DoorSet, Entrance, MazeDef, RoomDef, RoomId, RoomItem, RoomKind, SecretTrigger,
    StairsDef, WorldDef, WorldId, WorldKind, WorldOracle,
};
pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::config::GameConfig;

static DEFAULT_CONFIG: GameConfig = GameConfig::new();

/// Aggregates the collaborators consulted during `update`.
///
/// Only the world oracle is mandatory. Missing input reads as no buttons,
/// missing audio is silent and a missing RNG falls back to [`PcgRng`].
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, W, I, A, R>
where
    W: WorldOracle + ?Sized,
    I: InputOracle + ?Sized,
    A: AudioSink + ?Sized,
    R: RngOracle + ?Sized,
{
    worlds: Option<&'a W>,
    input: Option<&'a I>,
    audio: Option<&'a A>,
    rng: Option<&'a R>,
    config: Option<&'a GameConfig>,
}

pub type GameEnv<'a> = Env<
    'a,
    dyn WorldOracle + 'a,
    dyn InputOracle + 'a,
    dyn AudioSink + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, W, I, A, R> Env<'a, W, I, A, R>
where
    W: WorldOracle + ?Sized,
    I: InputOracle + ?Sized,
    A: AudioSink + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        worlds: Option<&'a W>,
        input: Option<&'a I>,
        audio: Option<&'a A>,
        rng: Option<&'a R>,
        config: Option<&'a GameConfig>,
    ) -> Self {
        Self {
            worlds,
            input,
            audio,
            rng,
            config,
        }
    }

    pub fn with_all(
        worlds: &'a W,
        input: &'a I,
        audio: &'a A,
        rng: &'a R,
        config: &'a GameConfig,
    ) -> Self {
        Self::new(
            Some(worlds),
            Some(input),
            Some(audio),
            Some(rng),
            Some(config),
        )
    }

    pub fn empty() -> Self {
        Self {
            worlds: None,
            input: None,
            audio: None,
            rng: None,
            config: None,
        }
    }

    /// Returns the WorldOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::WorldsNotAvailable` if no world oracle was provided.
    pub fn worlds(&self) -> Result<&'a W, OracleError> {
        self.worlds.ok_or(OracleError::WorldsNotAvailable)
    }

    /// Looks up a world definition.
    pub fn world(&self, id: WorldId) -> Result<&'a WorldDef, OracleError> {
        self.worlds()?
            .world(id)
            .ok_or(OracleError::WorldNotFound(id))
    }

    /// Looks up a room definition.
    pub fn room(&self, world: WorldId, room: RoomId) -> Result<&'a RoomDef, OracleError> {
        self.world(world)?
            .room(room)
            .ok_or(OracleError::RoomNotFound { world, room })
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config.unwrap_or(&DEFAULT_CONFIG)
    }

    pub fn buttons_down(&self, frame: u64) -> Buttons {
        self.input
            .map(|input| input.buttons_down(frame))
            .unwrap_or_default()
    }

    pub fn is_button_down(&self, frame: u64, button: Buttons) -> bool {
        self.input
            .is_some_and(|input| input.is_button_down(frame, button))
    }

    pub fn is_button_pressing(&self, frame: u64, button: Buttons) -> bool {
        self.input
            .is_some_and(|input| input.is_button_pressing(frame, button))
    }

    pub fn next_u32(&self, seed: u64) -> u32 {
        match self.rng {
            Some(rng) => rng.next_u32(seed),
            None => PcgRng.next_u32(seed),
        }
    }

    pub fn next_byte(&self, seed: u64) -> u8 {
        match self.rng {
            Some(rng) => rng.next_byte(seed),
            None => PcgRng.next_byte(seed),
        }
    }

    pub fn effect(&self, effect: SoundEffect) {
        if let Some(audio) = self.audio {
            audio.effect(effect);
        }
    }

    pub fn play_song(&self, song: Song) {
        if let Some(audio) = self.audio {
            audio.play_song(song, SongStream::Main, true);
        }
    }

    pub fn push_song(&self, song: Song) {
        if let Some(audio) = self.audio {
            audio.push_song(song);
        }
    }

    pub fn stop_all(&self) {
        if let Some(audio) = self.audio {
            audio.stop_all();
        }
    }

    pub fn stop_effects(&self) {
        if let Some(audio) = self.audio {
            audio.stop_effects();
        }
    }
}

impl<'a, W, I, A, R> Env<'a, W, I, A, R>
where
    W: WorldOracle + 'a,
    I: InputOracle + 'a,
    A: AudioSink + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn into_game_env(self) -> GameEnv<'a> {
        let worlds: Option<&'a dyn WorldOracle> = self.worlds.map(|worlds| worlds as _);
        let input: Option<&'a dyn InputOracle> = self.input.map(|input| input as _);
        let audio: Option<&'a dyn AudioSink> = self.audio.map(|audio| audio as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(worlds, input, audio, rng, self.config)
    }
}
