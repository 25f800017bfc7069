// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cancellable one-shot timers.
//!
//! [`start`] schedules a callback to run once after a delay, as a detached task
//! of the chosen [`Runtime`]. The returned [`TimerHandle`] can be cancelled any
//! number of times, before or after the timer fired, without error.
//!
//! A handle moves out of [`TimerStatus::Armed`] exactly once. Firing and
//! cancelling both try the same compare-and-swap on the handle status, so when
//! the two race only one of them wins: either the callback runs, or the
//! cancellation took effect.
//!
//! The handle is closed *before* the callback body runs, so code inside the
//! callback already observes the timer as inert.
//!
//! # Example
//!
//! ```rust,no_run
//! use lull::timer::{self, TimerStatus};
//! use lull::DefaultRuntime;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> lull::Result<()> {
//! let handle = timer::start::<DefaultRuntime, _>(Duration::from_millis(100), || {
//!     println!("fired");
//! })?;
//!
//! assert!(handle.is_active());
//! handle.cancel();
//! handle.cancel(); // no-op
//! assert_eq!(handle.status(), TimerStatus::Cancelled);
//! # Ok(())
//! # }
//! ```

use core::pin::pin;
use core::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use core::time::Duration;
use std::sync::Arc;

use futures::future::{select, Either};
use lull_core::{debug, trace, CancelSignal, Result};
use lull_runtime::runtime::Runtime;
use lull_runtime::timer::Timer;

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// Lifecycle of a [`TimerHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerStatus {
    /// Never started.
    Inert,
    /// Scheduled and not yet fired or cancelled.
    Armed,
    /// The callback was dispatched.
    Fired,
    /// Cancelled before it fired.
    Cancelled,
}

impl TimerStatus {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Inert => 0,
            Self::Armed => 1,
            Self::Fired => 2,
            Self::Cancelled => 3,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Armed,
            2 => Self::Fired,
            3 => Self::Cancelled,
            _ => Self::Inert,
        }
    }
}

/// Shared identity of one scheduled callback.
///
/// Clones refer to the same timer. Dropping a handle does not cancel the timer.
#[derive(Clone, Debug)]
pub struct TimerHandle {
    slot: Arc<Slot>,
}

#[derive(Debug)]
struct Slot {
    id: u64,
    status: AtomicU8,
    wake: CancelSignal,
}

impl TimerHandle {
    /// A handle that was never started. Cancelling it is a no-op.
    pub fn inert() -> Self {
        Self::with_status(TimerStatus::Inert)
    }

    fn armed() -> Self {
        Self::with_status(TimerStatus::Armed)
    }

    fn with_status(status: TimerStatus) -> Self {
        Self {
            slot: Arc::new(Slot {
                id: NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed),
                status: AtomicU8::new(status.as_u8()),
                wake: CancelSignal::new(),
            }),
        }
    }

    /// Process-unique identifier, handy in logs.
    pub fn id(&self) -> u64 {
        self.slot.id
    }

    pub fn status(&self) -> TimerStatus {
        TimerStatus::from_u8(self.slot.status.load(Ordering::Acquire))
    }

    /// `true` while the callback is still pending.
    pub fn is_active(&self) -> bool {
        self.status() == TimerStatus::Armed
    }

    /// `true` once the timer fired, was cancelled, or if it never started.
    pub fn is_closed(&self) -> bool {
        !self.is_active()
    }

    /// Cancels the timer if it is still pending.
    ///
    /// Returns `true` when this call disarmed the timer; `false` when it had
    /// already fired, was already cancelled, or was never started.
    pub fn cancel(&self) -> bool {
        let disarmed = self.close(TimerStatus::Cancelled);
        if disarmed {
            self.slot.wake.raise();
            debug!("timer {} cancelled", self.id());
        }
        disarmed
    }

    fn close(&self, to: TimerStatus) -> bool {
        self.slot
            .status
            .compare_exchange(
                TimerStatus::Armed.as_u8(),
                to.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Two handles are the same timer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

impl Default for TimerHandle {
    fn default() -> Self {
        Self::inert()
    }
}

/// Schedules `callback` to run once after `delay` on runtime `RT`.
///
/// Returns immediately. Even with a zero delay the callback is dispatched as a
/// separate task, never inline.
///
/// # Errors
/// [`lull_core::LullError::RuntimeUnavailable`] when `RT` cannot spawn from the
/// calling context.
pub fn start<RT, F>(delay: Duration, callback: F) -> Result<TimerHandle>
where
    RT: Runtime,
    F: FnOnce() + Send + 'static,
{
    let handle = TimerHandle::armed();
    let task_handle = handle.clone();
    let clock = RT::Timer::default();
    // Measured from now, not from when the task is first polled. No deadline
    // instant is computed, so any `Duration` is accepted.
    let armed_at = clock.now();

    RT::spawn(async move {
        let now = clock.now();
        let elapsed = if now > armed_at {
            now - armed_at
        } else {
            Duration::ZERO
        };
        let sleep = pin!(clock.sleep_future(delay.saturating_sub(elapsed)));
        let cancelled = pin!(task_handle.slot.wake.cancelled());

        match select(sleep, cancelled).await {
            Either::Left(_) => {
                if task_handle.close(TimerStatus::Fired) {
                    trace!("timer {} fired", task_handle.id());
                    callback();
                } else {
                    debug!("timer {} cancelled at its deadline", task_handle.id());
                }
            }
            Either::Right(_) => trace!("timer {} released early", task_handle.id()),
        }
    })?;

    trace!("timer {} armed for {:?} on {}", handle.id(), delay, RT::NAME);
    Ok(handle)
}
