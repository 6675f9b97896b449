//! Conditional (compare-and-swap) account updates.
//!
//! A store applies a [`Mutation`] only when its [`Predicate`] holds against the
//! account it currently holds, as one atomic step. [`ConditionalUpdate`] is the
//! reference evaluation of that step and is what the in-memory store runs under
//! its write lock:
//!
//! 1. `pre_validate` - every predicate condition holds on the stored account
//! 2. `apply` - the mutation runs on a scratch copy
//! 3. `post_validate` - the copy still satisfies the account invariants
//!
//! Only when all three pass does the copy replace the stored account.
mod mutation;
mod predicate;

pub use mutation::{Change, Mutation, MutationError};
pub use predicate::{Condition, Predicate, marker_is_current};

use crate::error::{EconomyError, ErrorSeverity};
use crate::state::Account;

/// Why a conditional update did not apply.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum UpdateRejection {
    #[error("predicate failed: {0:?}")]
    PredicateFailed(Condition),

    #[error("mutation failed: {0}")]
    MutationFailed(#[from] MutationError),

    #[error("account invariant violated: {0}")]
    InvariantViolated(&'static str),
}

impl EconomyError for UpdateRejection {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PredicateFailed(_) => ErrorSeverity::Recoverable,
            Self::MutationFailed(_) => ErrorSeverity::Validation,
            Self::InvariantViolated(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PredicateFailed(_) => "UPDATE_PREDICATE_FAILED",
            Self::MutationFailed(_) => "UPDATE_MUTATION_FAILED",
            Self::InvariantViolated(_) => "UPDATE_INVARIANT_VIOLATED",
        }
    }
}

/// Defines how a change to an account is validated and applied.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the mutation. Hooks must stay
/// side-effect free.
pub trait AccountTransition {
    type Error;

    /// Validates pre-conditions using the account **before** mutation.
    fn pre_validate(&self, _account: &Account) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the change. Assumes `pre_validate` has already run successfully.
    fn apply(&self, account: &mut Account) -> Result<(), Self::Error>;

    /// Validates post-conditions using the account **after** mutation.
    fn post_validate(&self, _account: &Account) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Predicate and mutation evaluated as one unit.
#[derive(Clone, Copy, Debug)]
pub struct ConditionalUpdate<'a> {
    pub predicate: &'a Predicate,
    pub mutation: &'a Mutation,
}

impl<'a> ConditionalUpdate<'a> {
    pub fn new(predicate: &'a Predicate, mutation: &'a Mutation) -> Self {
        Self {
            predicate,
            mutation,
        }
    }

    /// Evaluates the update against `current` and returns the next account
    /// without touching `current`.
    pub fn evaluate(&self, current: &Account) -> Result<Account, UpdateRejection> {
        self.pre_validate(current)?;
        let mut next = current.clone();
        self.apply(&mut next)?;
        self.post_validate(&next)?;
        Ok(next)
    }
}

impl AccountTransition for ConditionalUpdate<'_> {
    type Error = UpdateRejection;

    fn pre_validate(&self, account: &Account) -> Result<(), Self::Error> {
        match self.predicate.first_failure(account) {
            Some(condition) => Err(UpdateRejection::PredicateFailed(condition.clone())),
            None => Ok(()),
        }
    }

    fn apply(&self, account: &mut Account) -> Result<(), Self::Error> {
        self.mutation.apply(account).map_err(UpdateRejection::from)
    }

    fn post_validate(&self, account: &Account) -> Result<(), Self::Error> {
        account
            .check_invariants()
            .map_err(UpdateRejection::InvariantViolated)
    }
}
