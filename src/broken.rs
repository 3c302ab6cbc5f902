//! A flag/turn protocol with a time-of-check/time-of-use race.
//!
//! Entry for participant `i` (peer `j`):
//!
//! ```text
//! flags[i] = true
//! while turn != i {
//!     while flags[j] { spin }
//!     turn = i            // <- not atomic with the check above
//! }
//! critical_code(resource)
//! flags[i] = false
//! ```
//!
//! Observing `flags[j] == false` and claiming `turn` are two separate atomic
//! operations. Suppose `turn == i`: participant `j` raises its flag, sees
//! `turn != j`, sees `flags[i] == false` and is about to write `turn = j`.
//! Meanwhile `i` raises its flag, sees `turn == i` and walks straight into
//! its critical section. Then `j` writes `turn = j` and walks in as well.
//! Both participants now run critical code at once, and nothing reports it.
//!
//! The defect is the point of this type: it exists to be compared against
//! [`CorrectMutualExclusion`][crate::peterson::CorrectMutualExclusion].
//! Whether a given run exposes it depends entirely on scheduling.
//!
//! As in [`peterson`][crate::peterson], a panicking critical code still
//! lowers its participant's flag on the way out.

use std::fmt::Debug;
use std::hint;

use crate::access::ExclusiveAccess;
use crate::state::ProtocolState;
use crate::types::Participant;

/// Racy two-party mutual exclusion. Does **not** guarantee exclusion.
pub struct BrokenMutualExclusion {
    state: ProtocolState,
}

impl BrokenMutualExclusion {
    pub const fn new() -> Self {
        Self {
            state: ProtocolState::new(),
        }
    }
}

impl Default for BrokenMutualExclusion {
    fn default() -> Self {
        BrokenMutualExclusion::new()
    }
}

impl Debug for BrokenMutualExclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokenMutualExclusion")
            .field("flags", &self.state.flags())
            .field("turn", &self.state.turn())
            .finish()
    }
}

impl ExclusiveAccess for BrokenMutualExclusion {
    fn access<R, F>(&self, who: Participant, critical_code: F, resource: &R)
    where
        R: ?Sized,
        F: FnOnce(&R),
    {
        let peer = who.other();

        let _raised = self.state.enter(who);
        while !self.state.is_turn(who) {
            while self.state.is_raised(peer) {
                hint::spin_loop();
            }
            // Race window: the peer may enter between the check and this store.
            self.state.set_turn(who);
        }

        critical_code(resource);
    }

    fn flags(&self) -> [bool; 2] {
        self.state.flags()
    }

    fn turn(&self) -> Participant {
        self.state.turn()
    }
}
