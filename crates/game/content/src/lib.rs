//! Data-driven world content and loaders.
//!
//! This crate reads the static content the engine consumes through its
//! oracles:
//! - world and room definitions (RON), validated into a `WorldCatalog`
//! - engine configuration (TOML)
//! - seeded input recordings with checkpoints (RON)
//!
//! Content never appears in game state; hosts load it once and lend it to
//! the engine each frame.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, RecordingLoader, WorldLoader};
