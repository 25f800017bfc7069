// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Which edges of a burst invoke the target.
///
/// The default is trailing-only: one invocation once a burst has been quiet
/// for the full wait.
///
/// ```
/// use lull::DebounceOptions;
///
/// let options = DebounceOptions::default().with_leading(true);
/// assert!(options.leading && options.trailing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DebounceOptions {
    /// Invoke immediately on the first call of a burst.
    pub leading: bool,
    /// Invoke once the burst has been quiet for the full wait.
    pub trailing: bool,
}

impl DebounceOptions {
    /// Leading and trailing invocation.
    pub const fn leading() -> Self {
        Self {
            leading: true,
            trailing: true,
        }
    }

    /// Trailing invocation only (the default).
    pub const fn trailing() -> Self {
        Self {
            leading: false,
            trailing: true,
        }
    }

    #[must_use]
    pub const fn with_leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    #[must_use]
    pub const fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self::trailing()
    }
}
