//! Synchronisation strategies guarding forwarder state.
//!
//! The strategy is picked when a forwarder is constructed. Both variants keep
//! the state behind a `parking_lot::Mutex` so the forwarder stays `Sync`; they
//! differ in how the lock is entered:
//!
//! - [`SyncStrategy::Blocking`] waits for the lock, serialising any number of
//!   producer threads.
//! - [`SyncStrategy::Exclusive`] only ever `try_lock`s. Single-threaded callers
//!   never wait, and a concurrent caller is reported as
//!   [`SinkError::Contended`] instead of being serialised.

use std::fmt;
use std::str::FromStr;

use parking_lot::{Mutex, MutexGuard};

use crate::error::SinkError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncStrategy {
    #[default]
    Blocking,
    Exclusive,
}

impl SyncStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            SyncStrategy::Blocking => "blocking",
            SyncStrategy::Exclusive => "exclusive",
        }
    }
}

impl fmt::Display for SyncStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blocking" | "mutex" => Ok(Self::Blocking),
            "exclusive" | "single" => Ok(Self::Exclusive),
            other => Err(format!(
                "invalid sync strategy '{other}'. Valid options are: blocking, exclusive"
            )),
        }
    }
}

/// State guarded according to a [`SyncStrategy`].
pub(crate) struct SinkLock<T> {
    inner: Mutex<T>,
    strategy: SyncStrategy,
}

impl<T> SinkLock<T> {
    pub(crate) fn new(value: T, strategy: SyncStrategy) -> Self {
        Self {
            inner: Mutex::new(value),
            strategy,
        }
    }

    /// Enter the guarded state.
    pub(crate) fn acquire(&self) -> Result<MutexGuard<'_, T>, SinkError> {
        match self.strategy {
            SyncStrategy::Blocking => Ok(self.inner.lock()),
            SyncStrategy::Exclusive => self.inner.try_lock().ok_or(SinkError::Contended),
        }
    }

    /// Read the state under a blocking lock regardless of strategy.
    pub(crate) fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.lock())
    }

    pub(crate) fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }

    pub(crate) fn strategy(&self) -> SyncStrategy {
        self.strategy
    }
}
