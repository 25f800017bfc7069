// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cancellable one-shot timers and a debouncer for callbacks.
//!
//! The crate offers two primitives on top of the runtime abstraction of
//! `lull-runtime`:
//!
//! - **[`TimerHandle`]** - a callback scheduled once after a delay, cancellable
//!   any number of times without error
//! - **[`Debouncer`]** - wraps a target function and coalesces bursts of calls
//!   into a single trailing (and optionally leading) invocation
//!
//! # Runtime Support
//!
//! Enable runtime-specific features in your `Cargo.toml`:
//! - `runtime-tokio` (default) - timers are tokio tasks, clock is `tokio::time::Instant`
//! - `runtime-smol` - timers are smol tasks backed by `async_io::Timer`
//!
//! # Example
//!
//! ```rust,no_run
//! use lull::{make_debouncer, DebounceOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> lull::Result<()> {
//! let search = make_debouncer(
//!     250,
//!     |query: &String| println!("searching for {query}"),
//!     DebounceOptions::default(),
//!     "rust".to_string(),
//! )?;
//!
//! // Three keystrokes, one search ~250ms after the last one.
//! search.call()?;
//! search.call()?;
//! search.call()?;
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-smol")))]
compile_error!("lull needs a runtime: enable `runtime-tokio` or `runtime-smol`");

mod debounce;
pub mod prelude;
pub mod timer;

pub use debounce::{DebounceOptions, Debouncer};
pub use lull_core::{LullError, Result};
pub use timer::{TimerHandle, TimerStatus};

use core::time::Duration;
use lull_core::error::duration_from_millis;

/// Runtime used by the convenience constructors.
#[cfg(feature = "runtime-tokio")]
pub type DefaultRuntime = lull_runtime::impls::tokio::TokioRuntime;

/// Runtime used by the convenience constructors.
#[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
pub type DefaultRuntime = lull_runtime::impls::smol::SmolRuntime;

/// Schedules `callback` to run once, `delay_ms` milliseconds from now, on the
/// default runtime.
///
/// # Errors
/// [`LullError::NegativeDuration`] for a negative delay, and
/// [`LullError::RuntimeUnavailable`] outside of a runtime context.
pub fn start_timer<F>(delay_ms: i64, callback: F) -> Result<TimerHandle>
where
    F: FnOnce() + Send + 'static,
{
    let delay = duration_from_millis("delay", delay_ms)?;
    timer::start::<DefaultRuntime, _>(delay, callback)
}

/// Cancels a timer. A no-op for handles that already fired, were cancelled,
/// or were never started.
pub fn cancel_timer(handle: &TimerHandle) {
    handle.cancel();
}

/// Wraps `target` in a [`Debouncer`] waiting `wait_ms` milliseconds of silence.
///
/// `args` is captured once and passed to every invocation of `target`.
///
/// # Errors
/// [`LullError::NegativeDuration`] for a negative wait.
pub fn make_debouncer<A, R, F>(
    wait_ms: i64,
    target: F,
    options: DebounceOptions,
    args: A,
) -> Result<Debouncer<A, R>>
where
    A: Send + Sync + 'static,
    R: Clone + Send + 'static,
    F: FnMut(&A) -> R + Send + 'static,
{
    let wait: Duration = duration_from_millis("wait", wait_ms)?;
    Ok(Debouncer::new(wait, target, options, args))
}
