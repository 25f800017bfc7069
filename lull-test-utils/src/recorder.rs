// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Records every invocation of the closures it hands out.
#[derive(Debug)]
pub struct InvocationRecorder<A> {
    calls: Arc<Mutex<Vec<(Instant, A)>>>,
}

impl<A> Clone for InvocationRecorder<A> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<A> Default for InvocationRecorder<A> {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<A> InvocationRecorder<A>
where
    A: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// A target closure returning the invocation count after recording itself.
    pub fn target(&self) -> impl FnMut(&A) -> usize + Send + 'static {
        let calls = Arc::clone(&self.calls);
        move |args: &A| {
            let mut calls = calls.lock();
            calls.push((Instant::now(), args.clone()));
            calls.len()
        }
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn args(&self) -> Vec<A> {
        self.calls.lock().iter().map(|(_, args)| args.clone()).collect()
    }

    pub fn times(&self) -> Vec<Instant> {
        self.calls.lock().iter().map(|(at, _)| *at).collect()
    }

    /// Invocation times relative to `start`.
    pub fn offsets_from(&self, start: Instant) -> Vec<Duration> {
        self.times().into_iter().map(|at| at - start).collect()
    }
}
