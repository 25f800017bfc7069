// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lull::{DebounceOptions, Debouncer};
use lull_test_utils::{assert_elapsed, InvocationRecorder};
use std::time::Duration;
use tokio::time::{sleep, Instant};

fn trailing_debouncer(
    wait_ms: u64,
    recorder: &InvocationRecorder<&'static str>,
) -> Debouncer<&'static str, usize> {
    Debouncer::new(
        Duration::from_millis(wait_ms),
        recorder.target(),
        DebounceOptions::default(),
        "bound",
    )
}

#[tokio::test(start_paused = true)]
async fn test_single_call_invokes_after_wait() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = trailing_debouncer(100, &recorder);
    let start = Instant::now();

    // Act
    let returned = debouncer.call()?;

    // Assert
    assert_eq!(returned, None);
    assert!(debouncer.pending());

    sleep(Duration::from_millis(90)).await;
    assert_eq!(recorder.count(), 0);

    sleep(Duration::from_millis(50)).await;
    assert_eq!(recorder.count(), 1);
    assert_elapsed(recorder.offsets_from(start)[0], 100);
    assert!(!debouncer.pending());
    assert_eq!(debouncer.last_result(), Some(1));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_burst_coalesces_into_one_trailing_invocation() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = trailing_debouncer(100, &recorder);
    let start = Instant::now();

    // Act: five calls within 50ms
    for _ in 0..4 {
        debouncer.call()?;
        sleep(Duration::from_millis(10)).await;
    }
    debouncer.call()?;

    // Assert
    sleep(Duration::from_millis(80)).await;
    assert_eq!(recorder.count(), 0);

    sleep(Duration::from_millis(300)).await;
    assert_eq!(recorder.count(), 1);
    assert_elapsed(recorder.offsets_from(start)[0], 140);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_each_call_resets_trailing_deadline() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = trailing_debouncer(100, &recorder);
    let start = Instant::now();

    // Act
    debouncer.call()?;
    sleep(Duration::from_millis(60)).await;
    debouncer.call()?;

    // Assert: not at 100, the first timer re-arms for the remaining 60ms
    sleep(Duration::from_millis(70)).await;
    assert_eq!(recorder.count(), 0);
    assert!(debouncer.pending());

    sleep(Duration::from_millis(100)).await;
    assert_eq!(recorder.count(), 1);
    assert_elapsed(recorder.offsets_from(start)[0], 160);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_separate_bursts_invoke_separately() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = trailing_debouncer(50, &recorder);
    let start = Instant::now();

    // Act
    debouncer.call()?;
    sleep(Duration::from_millis(200)).await;
    debouncer.call()?;
    sleep(Duration::from_millis(200)).await;

    // Assert
    let offsets = recorder.offsets_from(start);
    assert_eq!(offsets.len(), 2);
    assert_elapsed(offsets[0], 50);
    assert_elapsed(offsets[1], 250);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_target_always_receives_bound_args() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = trailing_debouncer(20, &recorder);

    // Act
    debouncer.call()?;
    sleep(Duration::from_millis(100)).await;
    debouncer.call()?;
    sleep(Duration::from_millis(100)).await;

    // Assert
    assert_eq!(recorder.args(), vec!["bound", "bound"]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_trailing_call_returns_previous_result() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = trailing_debouncer(20, &recorder);
    debouncer.call()?;
    sleep(Duration::from_millis(100)).await;

    // Act
    let returned = debouncer.call()?;

    // Assert
    assert_eq!(returned, Some(1));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_zero_wait_still_defers_invocation() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = trailing_debouncer(0, &recorder);

    // Act
    debouncer.call()?;

    // Assert
    assert_eq!(recorder.count(), 0);
    sleep(Duration::from_millis(10)).await;
    assert_eq!(recorder.count(), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_clones_share_one_burst() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = trailing_debouncer(100, &recorder);
    let clone = debouncer.clone();

    // Act
    debouncer.call()?;
    sleep(Duration::from_millis(30)).await;
    clone.call()?;
    sleep(Duration::from_millis(300)).await;

    // Assert
    assert_eq!(recorder.count(), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_accessors() {
    let recorder = InvocationRecorder::new();
    let debouncer = trailing_debouncer(75, &recorder);

    assert_eq!(debouncer.wait(), Duration::from_millis(75));
    assert_eq!(debouncer.options(), DebounceOptions::default());
    assert!(!debouncer.pending());
    assert_eq!(debouncer.last_result(), None);
    assert!(format!("{debouncer:?}").contains("tokio"));
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_wait_only_flush_invokes() -> anyhow::Result<()> {
    // Arrange
    let recorder = InvocationRecorder::new();
    let debouncer = Debouncer::new(
        Duration::MAX,
        recorder.target(),
        DebounceOptions::default(),
        "bound",
    );

    // Act
    let returned = debouncer.call()?;
    sleep(Duration::from_secs(3600)).await;

    // Assert
    assert_eq!(returned, None);
    assert_eq!(recorder.count(), 0);
    assert!(debouncer.pending());
    assert_eq!(debouncer.flush(), Some(1));

    Ok(())
}
