//! Where the runner reads worlds, configuration and recordings from.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use overworld_content::{ConfigLoader, ContentFactory, RecordingLoader, WorldLoader};
use overworld_core::{GameConfig, InputRecording, WorldCatalog};

/// Content locations shared by the playback commands.
///
/// Anything not given explicitly comes from the bundled data directory.
#[derive(Args, Debug, Clone, Default)]
pub struct ContentArgs {
    /// World file or directory of `*.ron` world files
    #[arg(long, value_name = "PATH", env = "OVERWORLD_WORLDS")]
    pub worlds: Option<PathBuf>,

    /// Engine configuration (TOML)
    #[arg(long, value_name = "FILE", env = "OVERWORLD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Data directory with `worlds/`, `config.toml` and `recordings/`
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Everything one playback needs.
pub struct Content {
    pub worlds: WorldCatalog,
    pub config: GameConfig,
    pub recording: InputRecording,
}

impl ContentArgs {
    fn factory(&self) -> ContentFactory {
        match &self.data_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        }
    }

    /// Loads worlds, config and the recording.
    ///
    /// `recording` is a path to a RON file; without one the data
    /// directory's `recordings/demo.ron` is used.
    pub fn load(&self, recording: Option<&PathBuf>) -> Result<Content> {
        let factory = self.factory();

        let worlds = match &self.worlds {
            Some(path) => WorldLoader::load(path),
            None => factory.load_worlds(),
        }
        .context("Failed to load worlds")?;

        let config = match &self.config {
            Some(path) => ConfigLoader::load(path),
            None => factory.load_config(),
        }
        .context("Failed to load config")?;

        let recording = match recording {
            Some(path) => RecordingLoader::load(path),
            None => factory.load_recording("demo"),
        }
        .context("Failed to load recording")?;

        tracing::info!(
            worlds = worlds.len(),
            seed = recording.seed,
            frames = recording.frames(),
            checkpoints = recording.checkpoints.len(),
            "Content loaded"
        );

        Ok(Content {
            worlds,
            config,
            recording,
        })
    }
}
