//! Runtime orchestration for the creature economy.
//!
//! This crate wires the pure rules of `economy-core` to an account store, a
//! clock, randomness and the static content of `economy-content`. Consumers
//! embed [`Economy`] and call its entry points from any number of tasks.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the façade and builder
//! - [`api`] exposes the result and error types clients interact with
//! - [`resolver`], [`quests`] and [`progression`] are the three services
//! - [`hooks`] provides post-commit side effects
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod clock;
pub mod hooks;
pub mod oracle;
pub mod progression;
pub mod quests;
pub mod repository;
pub mod resolver;
pub mod rng;
pub mod runtime;

pub use api::{
    ActionResult, ProgressionError, QuestClaim, QuestError, QuestView, ResolveError, RuntimeError,
    StoreError,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use hooks::{
    HookContext, HookCriticality, HookError, HookRegistry, PostCommitHook, QuestProgressHook,
};
pub use oracle::OracleManager;
pub use progression::{ProgressionAggregator, ProgressionOutcome};
pub use quests::QuestTracker;
pub use repository::{AccountStore, InMemoryAccountStore, TimedStore, UpdateOutcome};
pub use resolver::ActionResolver;
pub use rng::RngSource;
pub use runtime::{Economy, EconomyBuilder, RuntimeConfig};
