//! Content loaders for reading game data from files.
//!
//! Every loader returns `anyhow::Result` with the offending path in the
//! error context.

pub mod config;
pub mod factory;
pub mod recording;
pub mod world;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use recording::RecordingLoader;
pub use world::WorldLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
