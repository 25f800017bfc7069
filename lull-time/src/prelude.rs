// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting the commonly used types and functions.
//!
//! ```ignore
//! use lull::prelude::*;
//!
//! let save = make_debouncer(500, |doc: &Doc| doc.save(), DebounceOptions::default(), doc)?;
//! ```

pub use crate::debounce::{DebounceOptions, Debouncer};
pub use crate::timer::{TimerHandle, TimerStatus};
pub use crate::{cancel_timer, make_debouncer, start_timer, DefaultRuntime};

pub use lull_core::{LullError, Result};
pub use lull_runtime::runtime::Runtime;
pub use lull_runtime::timer::Timer;
