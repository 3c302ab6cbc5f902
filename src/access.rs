//! The contract shared by both mutual-exclusion variants.
//!
//! A participant hands the primitive a unit of work (the *critical code*) and
//! a reference to the guarded resource. The call spins until the protocol lets
//! the participant in, runs the critical code, lowers the participant's flag,
//! and returns. Nothing is ever signaled back: a protocol that fails to
//! exclude shows up only as a corrupted resource.
//!
//! The resource stays owned by the caller and is lent for the duration of the
//! call. Since both participants hold it at once, the critical code receives
//! a shared reference and mutates through the resource's own (unsynchronized)
//! interior mutability, e.g. [`UnguardedCounter`][crate::counter::UnguardedCounter].

use crate::types::Participant;

/// Busy-wait mutual exclusion between exactly two participants.
///
/// Each participant must be driven by at most one thread at a time: `p0`
/// calls come from one thread and `p1` calls from another. Calling the same
/// participant concurrently from two threads is outside the protocol.
pub trait ExclusiveAccess: Sync {
    /// Runs `critical_code(resource)` on behalf of `who`, after the entry
    /// protocol admits it. Returns once the critical code has completed and
    /// `who`'s flag is lowered. The flag is lowered as well if the critical
    /// code panics.
    fn access<R, F>(&self, who: Participant, critical_code: F, resource: &R)
    where
        R: ?Sized,
        F: FnOnce(&R);

    /// Snapshot of the intent flags, indexed by participant.
    fn flags(&self) -> [bool; 2];

    /// Snapshot of the participant currently holding priority.
    fn turn(&self) -> Participant;

    /// Runs `critical_code(resource)` as `p0`. See [`access`][Self::access].
    fn p0_access<R, F>(&self, critical_code: F, resource: &R)
    where
        R: ?Sized,
        F: FnOnce(&R),
    {
        self.access(Participant::P0, critical_code, resource)
    }

    /// Runs `critical_code(resource)` as `p1`. See [`access`][Self::access].
    fn p1_access<R, F>(&self, critical_code: F, resource: &R)
    where
        R: ?Sized,
        F: FnOnce(&R),
    {
        self.access(Participant::P1, critical_code, resource)
    }
}
