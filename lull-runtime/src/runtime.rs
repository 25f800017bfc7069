// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{mutex::MutexLike, timer::Timer};
use core::fmt::Debug;
use core::future::Future;
use core::ops::{Add, Sub};
use core::time::Duration;
use lull_core::Result;

/// The host a timer callback is dispatched on.
///
/// Bundles the clock/sleep primitive, the mutex used to serialize state shared
/// with timer callbacks, and the ability to schedule a detached task.
pub trait Runtime: Send + Sync + 'static {
    type Mutex<T: ?Sized + Send>: MutexLike<T> + Send + Sync;
    type Timer: Timer<Instant = Self::Instant> + Default;
    type Instant: Copy
        + Ord
        + Send
        + Sync
        + Debug
        + Add<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>;

    /// Name used in log output and errors.
    const NAME: &'static str;

    /// Schedules `future` as a detached task.
    ///
    /// # Errors
    /// Returns [`lull_core::LullError::RuntimeUnavailable`] when called outside
    /// of a context able to run the task.
    fn spawn<F>(future: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static;
}
