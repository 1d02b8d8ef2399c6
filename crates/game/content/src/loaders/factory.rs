//! Content factory for loading everything from one data directory.

use std::path::{Path, PathBuf};

use overworld_core::{GameConfig, InputRecording, WorldCatalog};

use crate::loaders::{ConfigLoader, LoadResult, RecordingLoader, WorldLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── worlds/
/// │   ├── 00-overworld.ron
/// │   └── 01-level-1.ron
/// └── recordings/
///     └── demo.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Content shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load engine configuration from `config.toml`, or the defaults if the
    /// file does not exist.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(GameConfig::new());
        }
        ConfigLoader::load(&path)
    }

    /// Load and validate every world under `worlds/`.
    pub fn load_worlds(&self) -> LoadResult<WorldCatalog> {
        WorldLoader::load(&self.data_dir.join("worlds"))
    }

    /// Load `recordings/{name}.ron`.
    pub fn load_recording(&self, name: &str) -> LoadResult<InputRecording> {
        let path = self.data_dir.join("recordings").join(format!("{name}.ron"));
        RecordingLoader::load(&path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
