//! Data-driven economy content and loaders.
//!
//! This crate houses the static content of the economy and the loaders for its
//! RON/TOML data files:
//! - Creature catalog per rarity tier (RON)
//! - Daily and weekly quest templates (RON)
//! - Reward tables: rarity chances, wheel, foods, activities, lootboxes (RON)
//! - Economy configuration (TOML)
//!
//! Content is consumed by runtime oracles and never appears in account state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentBundle, ContentFactory, CreatureCatalog, CreatureLoader, QuestCatalog,
    QuestLoader, TablesLoader,
};
