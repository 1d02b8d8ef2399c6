//! Input recording loader.

use std::path::Path;

use anyhow::Context;
use overworld_core::InputRecording;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`InputRecording`] from RON files.
///
/// ```ron
/// (
///     seed: 0x5EED,
///     input: [
///         (frame: 60, buttons: "LEFT"),
///         (frame: 120, buttons: ""),
///     ],
///     checkpoints: [0, 60, 240],
/// )
/// ```
pub struct RecordingLoader;

impl RecordingLoader {
    pub fn load(path: &Path) -> LoadResult<InputRecording> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parses a recording. Events are re-sorted by frame since playback
    /// searches them.
    pub fn parse(content: &str) -> LoadResult<InputRecording> {
        let raw: InputRecording = ron::from_str(content).context("failed to parse recording RON")?;
        Ok(InputRecording::new(
            raw.seed,
            raw.input.events().to_vec(),
            raw.checkpoints,
        ))
    }
}
