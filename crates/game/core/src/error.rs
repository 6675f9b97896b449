//! Common error infrastructure for economy-core.
//!
//! This module provides shared types and traits used across all error types in the
//! crate. Domain-specific errors (`ActionError`, `UpdateRejection`, `ClaimError`) are
//! defined next to the operations that raise them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each operation family has its own error enum
//! - **Severity Classification**: Errors are categorized so callers can decide
//!   whether to retry, surface the message, or page someone
//! - **Stable Codes**: Every variant exposes a static code for metrics and tests

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions that may succeed on retry or later
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors such as missing content
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with the same or an alternative request.
    ///
    /// Examples: action on cooldown, lost a concurrent update
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: gifting to yourself, betting zero
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: a committed account violating its own invariants
    Internal,

    /// Fatal error - the economy cannot continue.
    ///
    /// Examples: missing creature catalog
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all economy-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait EconomyError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Returns true when re-submitting the same request may succeed.
    fn is_retryable(&self) -> bool {
        self.severity().is_recoverable()
    }
}
