// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Debouncing wrapper around a target function.
//!
//! A [`Debouncer`] coalesces a burst of calls (calls spaced no more than
//! `wait` apart) into one invocation of its target:
//!
//! - Every call records its time. The first call of a burst arms a timer for
//!   `wait`; later calls while that timer is armed are absorbed.
//! - When the timer fires it checks the time since the *latest* call. If the
//!   burst went quiet for the full `wait` the target is invoked (trailing
//!   edge); otherwise the timer is re-armed for what is left of the wait.
//! - With `leading` enabled the first call of a burst also invokes the target
//!   right away (leading edge).
//!
//! The target receives the arguments captured at construction on every
//! invocation; calls carry no arguments of their own.
//!
//! # Example
//!
//! ```rust,no_run
//! use lull::{DebounceOptions, Debouncer};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> lull::Result<()> {
//! let reindex = Debouncer::new(
//!     Duration::from_millis(200),
//!     |path: &String| path.len(),
//!     DebounceOptions::leading(),
//!     "src/lib.rs".to_string(),
//! );
//!
//! // Leading edge: invoked immediately.
//! assert_eq!(reindex.call()?, Some(10));
//! // Same burst: absorbed, returns the cached result.
//! assert_eq!(reindex.call()?, Some(10));
//!
//! // Don't wait for the trailing edge.
//! assert_eq!(reindex.flush(), Some(10));
//! # Ok(())
//! # }
//! ```

mod implementation;
mod options;

pub use options::DebounceOptions;

use core::fmt;
use core::time::Duration;
use std::sync::Arc;

use lull_core::Result;
use lull_runtime::runtime::Runtime;

use crate::DefaultRuntime;
use implementation::Shared;

/// Debounced wrapper around a target `FnMut(&A) -> R`.
///
/// Clones share the same state and timer, so a clone handed to another task
/// belongs to the same burst.
///
/// The target runs either on the caller (leading edge, [`flush`](Self::flush))
/// or on a runtime task (trailing edge). Invocations never overlap.
///
/// The target may call back into its own debouncer. Such a [`call`](Self::call)
/// is absorbed into the next burst without a leading invocation, and such a
/// [`flush`](Self::flush) returns the cached result.
pub struct Debouncer<A, R, RT = DefaultRuntime>
where
    R: Send,
    RT: Runtime,
{
    shared: Arc<Shared<A, R, RT>>,
}

impl<A, R> Debouncer<A, R>
where
    A: Send + Sync + 'static,
    R: Clone + Send + 'static,
{
    /// Wraps `target` on the [`DefaultRuntime`].
    ///
    /// `args` is captured once and passed to every invocation of `target`.
    pub fn new<F>(wait: Duration, target: F, options: DebounceOptions, args: A) -> Self
    where
        F: FnMut(&A) -> R + Send + 'static,
    {
        Self::with_runtime(wait, target, options, args)
    }
}

impl<A, R, RT> Debouncer<A, R, RT>
where
    A: Send + Sync + 'static,
    R: Clone + Send + 'static,
    RT: Runtime,
{
    /// Wraps `target` on an explicit runtime.
    pub fn with_runtime<F>(wait: Duration, target: F, options: DebounceOptions, args: A) -> Self
    where
        F: FnMut(&A) -> R + Send + 'static,
    {
        Self {
            shared: Arc::new(Shared::new(wait, Box::new(target), options, args)),
        }
    }

    /// The debounced call.
    ///
    /// Returns the target's result when this call invoked it on the leading
    /// edge, otherwise the result of the most recent invocation (`None` if the
    /// target never ran).
    ///
    /// # Errors
    /// [`lull_core::LullError::RuntimeUnavailable`] when a timer has to be armed
    /// and the runtime cannot schedule it.
    pub fn call(&self) -> Result<Option<R>> {
        self.shared.call()
    }

    /// Drops any pending invocation and forgets the current burst.
    ///
    /// The next call is treated as the first call of a new burst.
    pub fn cancel(&self) {
        self.shared.cancel();
    }

    /// Invokes the target now if an invocation is pending.
    ///
    /// With nothing pending returns the cached result without side effects.
    pub fn flush(&self) -> Option<R> {
        self.shared.flush()
    }

    /// `true` while a timer is armed.
    pub fn pending(&self) -> bool {
        self.shared.pending()
    }

    /// Result of the most recent invocation.
    pub fn last_result(&self) -> Option<R> {
        self.shared.last_result()
    }

    pub fn wait(&self) -> Duration {
        self.shared.wait()
    }

    pub fn options(&self) -> DebounceOptions {
        self.shared.options()
    }
}

impl<A, R, RT> Clone for Debouncer<A, R, RT>
where
    R: Send,
    RT: Runtime,
{
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A, R, RT> fmt::Debug for Debouncer<A, R, RT>
where
    A: Send + Sync + 'static,
    R: Clone + Send + 'static,
    RT: Runtime,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("wait", &self.wait())
            .field("options", &self.options())
            .field("pending", &self.pending())
            .field("runtime", &RT::NAME)
            .finish()
    }
}
