// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lull::{DebounceOptions, Debouncer};
use lull_test_utils::{assert_elapsed, InvocationRecorder};
use std::time::Duration;
use tokio::time::{sleep, Instant};

fn debouncer_with(
    options: DebounceOptions,
    recorder: &InvocationRecorder<()>,
) -> Debouncer<(), usize> {
    Debouncer::new(Duration::from_millis(100), recorder.target(), options, ())
}

#[tokio::test(start_paused = true)]
async fn test_flush_invokes_pending_call_immediately() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = debouncer_with(DebounceOptions::default(), &recorder);
    let start = Instant::now();
    debouncer.call()?;
    sleep(Duration::from_millis(30)).await;

    // Act
    let flushed = debouncer.flush();

    // Assert
    assert_eq!(flushed, Some(1));
    assert_eq!(recorder.count(), 1);
    assert_elapsed(recorder.offsets_from(start)[0], 30);
    assert!(!debouncer.pending());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_second_flush_returns_cached_result() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = debouncer_with(DebounceOptions::default(), &recorder);
    debouncer.call()?;

    // Act
    let first = debouncer.flush();
    let second = debouncer.flush();

    // Assert
    assert_eq!(first, Some(1));
    assert_eq!(second, Some(1));
    assert_eq!(recorder.count(), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_flush_cancels_pending_timer() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = debouncer_with(DebounceOptions::default(), &recorder);
    debouncer.call()?;

    // Act
    debouncer.flush();
    sleep(Duration::from_millis(500)).await;

    // Assert
    assert_eq!(recorder.count(), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_flush_idle_debouncer_has_no_side_effect() {
    let recorder = InvocationRecorder::new();
    let debouncer = debouncer_with(DebounceOptions::default(), &recorder);

    assert_eq!(debouncer.flush(), None);
    assert_eq!(recorder.count(), 0);
    assert!(!debouncer.pending());
}

#[tokio::test(start_paused = true)]
async fn test_flush_after_leading_invocation_invokes_trailing_now() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = debouncer_with(DebounceOptions::leading(), &recorder);
    debouncer.call()?;

    // Act
    let flushed = debouncer.flush();

    // Assert
    assert_eq!(flushed, Some(2));
    assert_eq!(recorder.count(), 2);

    sleep(Duration::from_millis(300)).await;
    assert_eq!(recorder.count(), 2);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_flush_with_trailing_disabled_returns_cached_result() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = debouncer_with(DebounceOptions::leading().with_trailing(false), &recorder);
    debouncer.call()?;

    // Act
    let flushed = debouncer.flush();

    // Assert
    assert_eq!(flushed, Some(1));
    assert_eq!(recorder.count(), 1);
    assert!(!debouncer.pending());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_call_after_flush_within_wait_does_not_lead() -> anyhow::Result<()> {
    // Arrange: flush keeps the burst's last call time
    let recorder = InvocationRecorder::new();
    let debouncer = debouncer_with(DebounceOptions::leading(), &recorder);
    debouncer.call()?;
    debouncer.flush();
    sleep(Duration::from_millis(20)).await;

    // Act
    let returned = debouncer.call()?;

    // Assert
    assert_eq!(returned, Some(2));
    assert_eq!(recorder.count(), 2);
    assert!(debouncer.pending());

    Ok(())
}
