// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the lull timing primitives.
//!
//! Designed for use in tests only. Timing helpers assume a tokio runtime with
//! paused time (`#[tokio::test(start_paused = true)]`), where every timer
//! deadline is hit exactly.
//!
//! # Key Types
//!
//! ## `InvocationRecorder<A>`
//!
//! Hands out target closures that record when they ran and with which
//! arguments, and return the running invocation count:
//!
//! ```rust
//! use lull_test_utils::InvocationRecorder;
//!
//! let recorder = InvocationRecorder::<&str>::new();
//! let mut target = recorder.target();
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
//! # rt.block_on(async {
//! assert_eq!(target(&"alpha"), 1);
//! assert_eq!(target(&"beta"), 2);
//! # });
//! assert_eq!(recorder.count(), 2);
//! assert_eq!(recorder.args(), vec!["alpha", "beta"]);
//! ```

pub mod helpers;
pub mod recorder;

pub use helpers::{assert_elapsed, init_tracing, settle};
pub use recorder::InvocationRecorder;
