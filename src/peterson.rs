//! Peterson's algorithm for two participants.
//!
//! Entry for participant `i` (peer `j`):
//!
//! ```text
//! flags[i] = true
//! turn = j                          // yield priority
//! while turn == j && flags[j] { spin }
//! critical_code(resource)
//! flags[i] = false
//! ```
//!
//! **Mutual exclusion.** If both participants are past their spin loop, both
//! flags are raised, so each one left the loop because `turn` named itself.
//! But `turn` holds a single value, and whoever wrote it last wrote the
//! *peer's* id, so that participant is still spinning. Contradiction.
//!
//! **Starvation-freedom.** A participant `i` waiting on `j` is released as
//! soon as `j` lowers its flag. If `j` comes straight back, its re-entry
//! writes `turn = i` before it can spin, which releases `i` and parks `j`.
//! So `i` is overtaken at most once.
//!
//! There is no timeout and no cancellation: once a flag is raised, the owner
//! must run through its critical section and lower it. Critical code should
//! be short, since the peer burns a core while it waits.
//!
//! As an extension to the textbook algorithm, the flag is also lowered when
//! the critical code panics. The unwinding participant leaves the protocol
//! as if it had finished, so the peer is not left spinning forever. The
//! resource may be in whatever state the critical code left it in.

use std::fmt::Debug;
use std::hint;

use crate::access::ExclusiveAccess;
use crate::state::ProtocolState;
use crate::types::Participant;

/// Two-party mutual exclusion using Peterson's algorithm.
pub struct CorrectMutualExclusion {
    state: ProtocolState,
}

impl CorrectMutualExclusion {
    pub const fn new() -> Self {
        Self {
            state: ProtocolState::new(),
        }
    }
}

impl Default for CorrectMutualExclusion {
    fn default() -> Self {
        CorrectMutualExclusion::new()
    }
}

impl Debug for CorrectMutualExclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorrectMutualExclusion")
            .field("flags", &self.state.flags())
            .field("turn", &self.state.turn())
            .finish()
    }
}

impl ExclusiveAccess for CorrectMutualExclusion {
    fn access<R, F>(&self, who: Participant, critical_code: F, resource: &R)
    where
        R: ?Sized,
        F: FnOnce(&R),
    {
        let peer = who.other();

        let _raised = self.state.enter(who);
        self.state.set_turn(peer);
        while self.state.is_turn(peer) && self.state.is_raised(peer) {
            hint::spin_loop();
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
