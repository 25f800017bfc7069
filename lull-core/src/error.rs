// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the lull timing primitives.
//!
//! Normal operation raises no errors: cancelling an inert timer, flushing an
//! idle debouncer and a clock that jumps backwards are all absorbed silently.
//! What remains are input validation and the absence of a runtime to schedule
//! timers on.
//!
//! # Examples
//!
//! ```
//! use lull_core::{LullError, Result};
//!
//! fn validate(delay_ms: i64) -> Result<u64> {
//!     u64::try_from(delay_ms).map_err(|_| LullError::negative_duration("delay", delay_ms))
//! }
//!
//! assert!(validate(-5).is_err());
//! ```

/// Root error type for all lull operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LullError {
    /// A delay or wait expressed in milliseconds was negative
    #[error("{what} must be non-negative, got {millis}ms")]
    NegativeDuration {
        /// Which parameter was rejected (`delay`, `wait`)
        what: &'static str,
        /// The rejected value
        millis: i64,
    },

    /// A timer was started outside of any runtime context
    #[error("no {runtime} runtime available to schedule the timer")]
    RuntimeUnavailable {
        /// Name of the runtime that was expected
        runtime: &'static str,
    },
}

impl LullError {
    /// Create a validation error for a negative millisecond value
    pub fn negative_duration(what: &'static str, millis: i64) -> Self {
        Self::NegativeDuration { what, millis }
    }

    /// Create an error for a missing runtime context
    pub fn runtime_unavailable(runtime: &'static str) -> Self {
        Self::RuntimeUnavailable { runtime }
    }

    /// Check if retrying the same operation could succeed
    ///
    /// A missing runtime can appear later (e.g. the caller moves into a
    /// runtime context); a negative duration never becomes valid.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::RuntimeUnavailable { .. })
    }
}

/// Specialized Result type for lull operations
pub type Result<T> = core::result::Result<T, LullError>;

/// Convert a signed millisecond count into a [`Duration`](core::time::Duration).
///
/// # Errors
/// Returns [`LullError::NegativeDuration`] when `millis` is below zero.
pub fn duration_from_millis(what: &'static str, millis: i64) -> Result<core::time::Duration> {
    u64::try_from(millis)
        .map(core::time::Duration::from_millis)
        .map_err(|_| LullError::negative_duration(what, millis))
}
