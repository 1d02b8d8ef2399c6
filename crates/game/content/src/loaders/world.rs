//! World content loader.
//!
//! Each RON file holds one [`WorldDef`]. A directory of world files is
//! loaded in file-name order and validated as a whole, so cross-world
//! references (level entrances) resolve at load time.

use std::path::{Path, PathBuf};

use anyhow::Context;
use overworld_core::{WorldCatalog, WorldDef};

use crate::loaders::{LoadResult, read_file};

/// Loader for world definitions from RON files.
pub struct WorldLoader;

impl WorldLoader {
    /// Loads a catalog from a world directory or a single world file.
    pub fn load(path: &Path) -> LoadResult<WorldCatalog> {
        let worlds = if path.is_dir() {
            Self::load_dir(path)?
        } else {
            vec![Self::load_world(path)?]
        };
        Self::build(worlds).with_context(|| format!("invalid world content in {}", path.display()))
    }

    /// Reads every `*.ron` file in `dir`.
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<WorldDef>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .with_context(|| format!("failed to list {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
            .collect();
        files.sort();

        files.iter().map(|file| Self::load_world(file)).collect()
    }

    pub fn load_world(path: &Path) -> LoadResult<WorldDef> {
        let content = read_file(path)?;
        let world = Self::parse(&content).with_context(|| format!("in {}", path.display()))?;
        tracing::debug!(world = %world.name, rooms = world.rooms.len(), path = %path.display(), "world file loaded");
        Ok(world)
    }

    pub fn parse(content: &str) -> LoadResult<WorldDef> {
        let world: WorldDef = ron::from_str(content).context("failed to parse world RON")?;
        Ok(world)
    }

    /// Validates parsed worlds into a catalog.
    pub fn build(worlds: Vec<WorldDef>) -> LoadResult<WorldCatalog> {
        let catalog = WorldCatalog::new(worlds)?;
        tracing::info!(worlds = catalog.len(), "world catalog ready");
        Ok(catalog)
    }
}
