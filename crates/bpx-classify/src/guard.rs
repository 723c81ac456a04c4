// SPDX-License-Identifier: MIT OR Apache-2.0
//! At-most-once guard for reporting side effects.

use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot flag owned by an error value.
///
/// The first [`LogOnce::try_mark`] wins; every later call, from any thread,
/// observes the flag already set.
#[derive(Debug, Default)]
pub struct LogOnce(AtomicBool);

impl LogOnce {
    /// A fresh, unmarked guard.
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Set the flag. Returns `true` only for the call that flipped it.
    pub fn try_mark(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether the flag has been set.
    pub fn is_marked(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// A clone carries the current state so a logged error stays logged.
impl Clone for LogOnce {
    fn clone(&self) -> Self {
        Self(AtomicBool::new(self.is_marked()))
    }
}
