//! # peterson-rs: two-party mutual exclusion from atomic loads and stores
//!
//! **`peterson-rs`** implements mutual exclusion between exactly two threads,
//! `p0` and `p1`, without any kernel lock: just two intent flags, a `turn`
//! cell, and busy-waiting. It ships two variants of the same contract:
//!
//! - [`BrokenMutualExclusion`][crate::broken::BrokenMutualExclusion]: a
//!   flag/turn protocol with a time-of-check/time-of-use race. It usually
//!   works, and occasionally lets both participants in at once.
//! - [`CorrectMutualExclusion`][crate::peterson::CorrectMutualExclusion]:
//!   Peterson's algorithm, which guarantees mutual exclusion and
//!   starvation-freedom for two participants.
//!
//! Neither variant reports failure. A broken exclusion is visible only as a
//! corrupted resource, e.g. lost increments of an
//! [`UnguardedCounter`][crate::counter::UnguardedCounter].
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::thread;
//!
//! use peterson_rs::access::ExclusiveAccess;
//! use peterson_rs::counter::UnguardedCounter;
//! use peterson_rs::peterson::CorrectMutualExclusion;
//!
//! let mutex = CorrectMutualExclusion::new();
//! let counter = UnguardedCounter::new();
//!
//! thread::scope(|s| {
//!     s.spawn(|| {
//!         for _ in 0..1000 {
//!             mutex.p0_access(|c| c.increment(), &counter);
//!         }
//!     });
//!     s.spawn(|| {
//!         for _ in 0..1000 {
//!             mutex.p1_access(|c| c.increment(), &counter);
//!         }
//!     });
//! });
//!
//! assert_eq!(counter.get(), 2000);
//! ```
//!
//! ## Core Components
//!
//! - **[`access`]**: the [`ExclusiveAccess`][crate::access::ExclusiveAccess] contract.
//! - **[`broken`]** and **[`peterson`]**: the two protocols.
//! - **[`harness`]**: the two-thread counter workload used by tests, benches and demos.
//!
//! Both protocols are hardcoded for two participants and spin without ever
//! yielding, so they suit short critical sections only.

pub mod access;
pub mod broken;
pub mod counter;
pub mod harness;
pub mod peterson;
mod state;
pub mod types;
