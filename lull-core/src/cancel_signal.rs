// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic, one-way cancellation signal.
//!
//! A timer task sleeps on its deadline and on a [`CancelSignal`] at the same
//! time. Raising the signal wakes the task so the runtime resource backing the
//! sleep is released right away instead of at the original deadline.

use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use std::sync::Arc;

/// Clonable handle to a shared "cancelled" flag with async notification.
///
/// # Example
///
/// ```
/// use lull_core::CancelSignal;
///
/// let signal = CancelSignal::new();
/// let observer = signal.clone();
///
/// assert!(!observer.is_raised());
/// signal.raise();
/// assert!(observer.is_raised());
///
/// // Already raised: resolves on first poll.
/// futures::executor::block_on(observer.cancelled());
/// ```
#[derive(Clone, Debug)]
pub struct CancelSignal {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    raised: AtomicBool,
    event: Event,
}

impl CancelSignal {
    /// Create a signal that has not been raised.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                raised: AtomicBool::new(false),
                event: Event::new(),
            }),
        }
    }

    /// Raise the signal and wake every waiter.
    ///
    /// Idempotent: only the first call notifies. Returns `true` for that call.
    pub fn raise(&self) -> bool {
        let first = !self.inner.raised.swap(true, Ordering::AcqRel);
        if first {
            self.inner.event.notify(usize::MAX);
        }
        first
    }

    /// Non-blocking check of the flag.
    pub fn is_raised(&self) -> bool {
        self.inner.raised.load(Ordering::Acquire)
    }

    /// Wait until the signal is raised. Resolves immediately if it already is.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled {
            signal: self,
            listener: None,
        }
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`CancelSignal::cancelled()`].
#[derive(Debug)]
pub struct Cancelled<'a> {
    signal: &'a CancelSignal,
    listener: Option<EventListener>,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        loop {
            if self.signal.is_raised() {
                return Poll::Ready(());
            }

            match self.listener.as_mut() {
                // Re-check the flag after registering: a raise() between the
                // check above and listen() would otherwise be missed.
                None => self.listener = Some(self.signal.inner.event.listen()),
                Some(listener) => {
                    if Pin::new(listener).poll(cx).is_pending() {
                        return Poll::Pending;
                    }
                    self.listener = None;
                }
            }
        }
    }
}
