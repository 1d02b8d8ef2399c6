//! Record/playback determinism check.
//!
//! A recording is a seed, a timestamped button script and a list of frames at
//! which the state is hashed. Playing it twice against the same content must
//! produce identical digests at every checkpoint.

use super::{EngineError, GameEngine};
use crate::config::GameConfig;
use crate::env::{
    AudioSink, Env, GameEnv, InputEvent, InputOracle, NullAudio, PcgRng, RngOracle, ScriptedInput,
    WorldOracle,
};
use crate::error::{ErrorSeverity, GameError};
use crate::state::GameState;

/// Seeded button script with checkpoint frames.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputRecording {
    pub seed: u64,
    pub input: ScriptedInput,
    /// Frames after which the state is hashed, in any order.
    pub checkpoints: Vec<u64>,
}

impl InputRecording {
    pub fn new(seed: u64, events: Vec<InputEvent>, checkpoints: Vec<u64>) -> Self {
        Self {
            seed,
            input: ScriptedInput::new(events),
            checkpoints,
        }
    }

    /// Number of frames a playback runs: up to the last checkpoint.
    pub fn frames(&self) -> u64 {
        self.checkpoints.iter().copied().max().unwrap_or(0)
    }
}

impl InputOracle for InputRecording {
    fn buttons_down(&self, frame: u64) -> crate::env::Buttons {
        self.input.buttons_down(frame)
    }
}

/// State digest taken once `frame` updates have run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Checkpoint {
    pub frame: u64,
    pub digest: [u8; 32],
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("playbacks diverged at frame {frame}")]
    Diverged { frame: u64 },

    #[error("playbacks produced {first} and {second} checkpoints")]
    CheckpointCount { first: usize, second: usize },
}

impl GameError for ReplayError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Engine(error) => error.severity(),
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Engine(error) => error.error_code(),
            Self::Diverged { .. } => "REPLAY_DIVERGED",
            Self::CheckpointCount { .. } => "REPLAY_CHECKPOINT_COUNT",
        }
    }
}

/// Plays a recording from a fresh game and returns its checkpoints in frame
/// order.
pub fn run_recording(
    recording: &InputRecording,
    worlds: &dyn WorldOracle,
    config: &GameConfig,
) -> Result<Vec<Checkpoint>, EngineError> {
    let audio = NullAudio;
    let input: &dyn InputOracle = recording;
    let audio: &dyn AudioSink = &audio;
    let rng: &dyn RngOracle = &PcgRng;
    let env: GameEnv<'_> = Env::with_all(worlds, input, audio, rng, config);

    let mut marks = recording.checkpoints.clone();
    marks.sort_unstable();
    marks.dedup();

    let mut state = GameState::with_seed(recording.seed);
    let mut engine = GameEngine::new(&mut state);
    engine.start_game();

    let mut checkpoints = Vec::with_capacity(marks.len());
    let mut marks = marks.into_iter().peekable();
    // Frame 0 checkpoints hash the state before any update.
    for frame in 0..=recording.frames() {
        while marks.next_if_eq(&frame).is_some() {
            checkpoints.push(Checkpoint {
                frame,
                digest: engine.snapshot().digest()?,
            });
        }
        if frame < recording.frames() {
            engine.update(&env)?;
        }
    }
    tracing::debug!(frames = recording.frames(), checkpoints = checkpoints.len(), "recording played");
    Ok(checkpoints)
}

/// Plays the recording twice and fails on the first differing checkpoint.
pub fn verify_determinism(
    recording: &InputRecording,
    worlds: &dyn WorldOracle,
    config: &GameConfig,
) -> Result<Vec<Checkpoint>, ReplayError> {
    let first = run_recording(recording, worlds, config)?;
    let second = run_recording(recording, worlds, config)?;
    if first.len() != second.len() {
        return Err(ReplayError::CheckpointCount {
            first: first.len(),
            second: second.len(),
        });
    }
    if let Some((a, _)) = first.iter().zip(&second).find(|(a, b)| a != b) {
        tracing::error!(frame = a.frame, "playback diverged");
        return Err(ReplayError::Diverged { frame: a.frame });
    }
    Ok(first)
}
