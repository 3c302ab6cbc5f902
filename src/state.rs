//! Shared flag/turn cells used by both protocols.
//!
//! Each instance owns two intent flags and one `turn` cell. The orderings are
//! fixed here so the protocols read as their textbook steps:
//!
//! - raising a flag, writing `turn` and every spin-loop load are `SeqCst`:
//!   Peterson's argument needs a participant's own stores to be ordered
//!   before its reads of the peer's state, and acquire/release does not
//!   forbid that store-load reordering;
//! - lowering a flag is `Release`, so the critical section's writes are
//!   published to the peer's next (acquiring) load of the flag.
//!
//! A flag raised through [`ProtocolState::enter`] is lowered when the
//! returned [`Raised`] guard drops, which includes unwinding out of a
//! panicking critical section.
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::types::Participant;

pub(crate) struct ProtocolState {
    flags: [AtomicBool; 2],
    turn: AtomicUsize,
}

impl ProtocolState {
    /// Fresh state: both flags lowered, `turn` favoring `p0`.
    pub(crate) const fn new() -> Self {
        Self {
            flags: [AtomicBool::new(false), AtomicBool::new(false)],
            turn: AtomicUsize::new(0),
        }
    }

    /// Raises `who`'s flag until the guard is dropped.
    pub(crate) fn enter(&self, who: Participant) -> Raised<'_> {
        self.raise(who);
        Raised { state: self, who }
    }

    pub(crate) fn raise(&self, who: Participant) {
        self.flags[who.index()].store(true, Ordering::SeqCst);
    }
    pub(crate) fn lower(&self, who: Participant) {
        self.flags[who.index()].store(false, Ordering::Release);
    }
    pub(crate) fn is_raised(&self, who: Participant) -> bool {
        self.flags[who.index()].load(Ordering::SeqCst)
    }

    pub(crate) fn set_turn(&self, who: Participant) {
        self.turn.store(who.index(), Ordering::SeqCst);
    }
    pub(crate) fn is_turn(&self, who: Participant) -> bool {
        self.turn.load(Ordering::SeqCst) == who.index()
    }

    pub(crate) fn flags(&self) -> [bool; 2] {
        [self.is_raised(Participant::P0), self.is_raised(Participant::P1)]
    }
    pub(crate) fn turn(&self) -> Participant {
        // Only `set_turn` writes the cell, always with 0 or 1.
        Participant::from_index(self.turn.load(Ordering::SeqCst)).unwrap_or(Participant::P0)
    }
}

/// Lowers its participant's flag on drop.
pub(crate) struct Raised<'a> {
    state: &'a ProtocolState,
    who: Participant,
}

impl Drop for Raised<'_> {
    fn drop(&mut self) {
        self.state.lower(self.who);
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ProtocolState::new();
        assert_eq!(state.flags(), [false, false]);
        assert_eq!(state.turn(), Participant::P0);
    }

    #[test]
    fn test_flags_are_independent() {
        let state = ProtocolState::new();
        state.raise(Participant::P1);
        assert_eq!(state.flags(), [false, true]);
        state.raise(Participant::P0);
        state.lower(Participant::P1);
        assert_eq!(state.flags(), [true, false]);
    }

    #[test]
    fn test_guard_lowers_on_drop() {
        let state = ProtocolState::new();
        let guard = state.enter(Participant::P0);
        assert_eq!(state.flags(), [true, false]);
        drop(guard);
        assert_eq!(state.flags(), [false, false]);
    }

    #[test]
    fn test_guard_lowers_on_unwind() {
        let state = ProtocolState::new();
        let res = std::panic::catch_unwind(|| {
            let _raised = state.enter(Participant::P1);
            panic!("critical code failed");
        });
        assert!(res.is_err());
        assert_eq!(state.flags(), [false, false]);
    }

    #[test]
    fn test_turn() {
        let state = ProtocolState::new();
        state.set_turn(Participant::P1);
        assert!(state.is_turn(Participant::P1));
        assert!(!state.is_turn(Participant::P0));
        assert_eq!(state.turn(), Participant::P1);
    }
}
