//! Types surfaced to runtime clients.
mod errors;
mod types;

pub use errors::{ProgressionError, QuestError, ResolveError, RuntimeError, StoreError};
pub use types::{ActionResult, QuestClaim, QuestView};
