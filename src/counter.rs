//! An intentionally unsynchronized shared counter.
//!
//! [`UnguardedCounter`] is the resource the mutual-exclusion primitives are
//! exercised against. It can be shared between threads, but an increment is
//! a separate load followed by a separate store: two increments that overlap
//! lose one update. Correctness of the final value therefore depends solely
//! on the primitive serializing the critical sections.
//!
//! The cell is an `AtomicU64` accessed with `Relaxed` loads and stores, which
//! gives plain-variable behaviour (no read-modify-write, no ordering of its
//! own) without making an unserialized access undefined behaviour.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct UnguardedCounter {
    value: AtomicU64,
}

impl UnguardedCounter {
    pub const fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    /// Read-then-write increment. Not atomic as a whole.
    pub fn increment(&self) {
        let current = self.value.load(Ordering::Relaxed);
        self.value.store(current + 1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    pub fn into_inner(self) -> u64 {
        self.value.into_inner()
    }
}

impl fmt::Debug for UnguardedCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UnguardedCounter").field(&self.get()).finish()
    }
}
