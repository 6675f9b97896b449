//! Content loaders for reading economy data from files.
//!
//! Each loader turns one RON/TOML file into the oracle implementation the
//! runtime hands to [`economy_core::Env`]. Every loader also has a `parse`
//! entry point taking the file contents, used for the embedded defaults.

pub mod config;
pub mod creatures;
pub mod factory;
pub mod quests;
pub mod tables;

pub use config::ConfigLoader;
pub use creatures::{CreatureCatalog, CreatureLoader};
pub use factory::{ContentBundle, ContentFactory};
pub use quests::{QuestCatalog, QuestLoader};
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
