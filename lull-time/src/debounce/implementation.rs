// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::ops::Sub;
use core::time::Duration;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use lull_core::{debug, trace, warn, Result};
use lull_runtime::mutex::MutexLike;
use lull_runtime::runtime::Runtime;
use lull_runtime::timer::Timer;

use super::options::DebounceOptions;
use crate::timer::{self, TimerHandle};

pub(super) type Target<A, R> = Box<dyn FnMut(&A) -> R + Send>;

/// `true` when a call at `now` starts a new burst.
///
/// A clock that went backwards counts as due rather than as a fault.
pub(super) fn is_due<I>(last_call: Option<I>, now: I, wait: Duration) -> bool
where
    I: Copy + Ord + Sub<I, Output = Duration>,
{
    match last_call {
        None => true,
        Some(last) if now < last => true,
        Some(last) => now - last > wait,
    }
}

/// What is left of `wait` measured from the last call.
pub(super) fn remaining_wait<I>(last_call: Option<I>, now: I, wait: Duration) -> Duration
where
    I: Copy + Ord + Sub<I, Output = Duration>,
{
    match last_call {
        Some(last) if now >= last => wait.saturating_sub(now - last),
        _ => Duration::ZERO,
    }
}

struct ArmedTimer {
    handle: TimerHandle,
    generation: u64,
}

struct DebounceState<R, I> {
    armed: Option<ArmedTimer>,
    last_call_time: Option<I>,
    last_result: Option<R>,
    // Stamp of the most recently armed timer. A fire callback carrying any
    // other stamp belongs to a timer that was cancelled, flushed or replaced.
    generation: u64,
    // Thread currently running the target, if any.
    invoker: Option<ThreadId>,
}

impl<R, I> DebounceState<R, I> {
    /// `true` when the caller is the target itself, calling back into its
    /// own debouncer while the target mutex is held.
    fn is_reentrant(&self) -> bool {
        self.invoker == Some(thread::current().id())
    }
}

/// Clears [`DebounceState::invoker`] when the target returns or unwinds.
struct InvokerGuard<'a, R, RT>
where
    R: Send,
    RT: Runtime,
{
    state: &'a RT::Mutex<DebounceState<R, RT::Instant>>,
}

impl<R, RT> Drop for InvokerGuard<'_, R, RT>
where
    R: Send,
    RT: Runtime,
{
    fn drop(&mut self) {
        self.state.lock().invoker = None;
    }
}

enum CallOutcome<R> {
    Leading,
    Cached(Option<R>),
}

pub(super) struct Shared<A, R, RT>
where
    R: Send,
    RT: Runtime,
{
    wait: Duration,
    options: DebounceOptions,
    args: A,
    clock: RT::Timer,
    // Lock order: `target` may be held while taking `state`, never the reverse.
    target: RT::Mutex<Target<A, R>>,
    state: RT::Mutex<DebounceState<R, RT::Instant>>,
}

impl<A, R, RT> Shared<A, R, RT>
where
    A: Send + Sync + 'static,
    R: Clone + Send + 'static,
    RT: Runtime,
{
    pub(super) fn new(
        wait: Duration,
        target: Target<A, R>,
        options: DebounceOptions,
        args: A,
    ) -> Self {
        Self {
            wait,
            options,
            args,
            clock: RT::Timer::default(),
            target: MutexLike::new(target),
            state: MutexLike::new(DebounceState {
                armed: None,
                last_call_time: None,
                last_result: None,
                generation: 0,
                invoker: None,
            }),
        }
    }

    pub(super) fn wait(&self) -> Duration {
        self.wait
    }

    pub(super) fn options(&self) -> DebounceOptions {
        self.options
    }

    pub(super) fn pending(&self) -> bool {
        self.state.lock().armed.is_some()
    }

    pub(super) fn last_result(&self) -> Option<R> {
        self.state.lock().last_result.clone()
    }

    pub(super) fn call(self: &Arc<Self>) -> Result<Option<R>> {
        let now = self.clock.now();

        let outcome = {
            let mut state = self.state.lock();
            let is_invoking = is_due(state.last_call_time, now, self.wait);
            let previous_call_time = state.last_call_time.replace(now);

            if state.armed.is_some() {
                trace!("debounced call absorbed, timer already armed");
                CallOutcome::Cached(state.last_result.clone())
            } else {
                // Armed in both cases: after a leading invocation this is the
                // check that keeps the rest of the burst from invoking again.
                if let Err(err) = self.arm(&mut state, self.wait) {
                    // Unscheduled calls are not part of any burst.
                    state.last_call_time = previous_call_time;
                    return Err(err);
                }
                if state.is_reentrant() {
                    debug!("debounced call from inside the target, leading edge skipped");
                    CallOutcome::Cached(state.last_result.clone())
                } else if is_invoking && self.options.leading {
                    CallOutcome::Leading
                } else {
                    CallOutcome::Cached(state.last_result.clone())
                }
            }
        };

        match outcome {
            CallOutcome::Leading => {
                debug!("debounce leading edge");
                Ok(Some(self.invoke()))
            }
            CallOutcome::Cached(result) => Ok(result),
        }
    }

    pub(super) fn cancel(&self) {
        let mut state = self.state.lock();
        if let Some(armed) = state.armed.take() {
            armed.handle.cancel();
            debug!("debounce cancelled pending timer {}", armed.handle.id());
        }
        state.last_call_time = None;
    }

    pub(super) fn flush(&self) -> Option<R> {
        {
            let mut state = self.state.lock();
            if state.is_reentrant() {
                // The pending timer still delivers the trailing edge.
                debug!("flush from inside the target returns the cached result");
                return state.last_result.clone();
            }
            match state.armed.take() {
                None => return state.last_result.clone(),
                Some(armed) => {
                    armed.handle.cancel();
                }
            }
        }

        debug!("debounce flushed");
        self.trailing_edge()
    }

    fn arm(
        self: &Arc<Self>,
        state: &mut DebounceState<R, RT::Instant>,
        delay: Duration,
    ) -> Result<()> {
        let generation = state.generation.wrapping_add(1);
        let shared = Arc::clone(self);
        let handle = timer::start::<RT, _>(delay, move || shared.timer_expired(generation))?;

        state.generation = generation;
        state.armed = Some(ArmedTimer { handle, generation });
        Ok(())
    }

    fn timer_expired(self: &Arc<Self>, generation: u64) {
        let now = self.clock.now();

        {
            let mut state = self.state.lock();
            if state.armed.as_ref().map(|armed| armed.generation) != Some(generation) {
                debug!("stale debounce timer (generation {}) ignored", generation);
                return;
            }

            let remaining = remaining_wait(state.last_call_time, now, self.wait);
            if !is_due(state.last_call_time, now, self.wait) && !remaining.is_zero() {
                trace!("debounce re-armed for the remaining {:?}", remaining);
                match self.arm(&mut state, remaining) {
                    Ok(()) => return,
                    Err(err) => warn!("could not re-arm debounce timer, invoking now: {}", err),
                }
            }

            state.armed = None;
        }

        debug!("debounce trailing edge");
        self.trailing_edge();
    }

    fn trailing_edge(&self) -> Option<R> {
        if self.options.trailing {
            Some(self.invoke())
        } else {
            self.last_result()
        }
    }

    fn invoke(&self) -> R {
        let mut guard = self.target.lock();
        self.state.lock().invoker = Some(thread::current().id());
        let result = {
            let _invoker = InvokerGuard::<R, RT> { state: &self.state };
            let target = &mut *guard;
            target(&self.args)
        };
        self.state.lock().last_result = Some(result.clone());
        result
    }
}
