// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tokio::task::yield_now;

/// Slack allowed by [`assert_elapsed`] on top of the expected duration.
pub const TOLERANCE: Duration = Duration::from_millis(5);

/// Lets spawned tasks that are already runnable make progress without
/// advancing the clock.
pub async fn settle() {
    for _ in 0..16 {
        yield_now().await;
    }
}

/// Asserts `actual` is `expected_ms` milliseconds, give or take [`TOLERANCE`]
/// (never earlier).
#[track_caller]
pub fn assert_elapsed(actual: Duration, expected_ms: u64) {
    let expected = Duration::from_millis(expected_ms);
    assert!(
        actual >= expected && actual <= expected + TOLERANCE,
        "expected ~{expected:?}, got {actual:?}"
    );
}

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}
