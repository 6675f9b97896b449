//! Post-commit hook system.
//!
//! Hooks run after an action's conditional update has been applied. They react
//! to the committed plan (quest progress, notifications, audit trails) and can
//! never change the result already handed to the caller.
//!
//! # Architecture
//!
//! - Hooks are registered in the [`crate::EconomyBuilder`] and sorted by priority
//! - After each commit, hooks whose `should_trigger` holds run in priority order
//! - Failures are logged according to [`HookCriticality`] and otherwise dropped

mod quest;
mod registry;

pub use quest::QuestProgressHook;
pub use registry::HookRegistry;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use economy_core::{Account, ActionPlan, ActionRequest};

use crate::api::{QuestError, StoreError};

/// How loudly a hook failure is reported.
///
/// A committed action cannot be rolled back by a hook, so no level aborts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Failure is logged as an error. This is the default level.
    Important,

    /// Failure is expected now and then and logged at debug level.
    Optional,
}

/// Errors a hook can report.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error(transparent)]
    Quest(#[from] QuestError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Other(String),
}

/// Read-only view of a committed action.
#[derive(Clone, Copy, Debug)]
pub struct HookContext<'a> {
    pub request: &'a ActionRequest,
    pub plan: &'a ActionPlan,
    /// The account as written by the action's conditional update.
    pub account: &'a Account,
    pub now: DateTime<Utc>,
}

/// Side effect run after an action commits.
#[async_trait]
pub trait PostCommitHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging).
    fn name(&self) -> &'static str;

    /// Lower values execute first.
    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool;

    async fn run(&self, ctx: &HookContext<'_>) -> Result<(), HookError>;
}
