//! Two-thread counter workload for exercising a primitive.
//!
//! A *session* is one fresh primitive plus one fresh [`UnguardedCounter`],
//! shared by two scoped threads: one drives `p0`, the other `p1`, and each
//! performs `iterations` accesses whose critical code increments the counter.
//! A session is consistent when the final count is exactly `2 * iterations`.
//!
//! [`run_until`] repeats sessions for a bounded wall-clock time, which is how
//! the racy variant is shown to be unsound: a single session is not expected
//! to diverge, but some session within the budget very likely will.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::access::ExclusiveAccess;
use crate::counter::UnguardedCounter;
use crate::types::Participant;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HarnessError {
    /// A worker thread panicked (e.g. its critical code did) before finishing.
    WorkerPanicked(Participant),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::WorkerPanicked(who) => write!(f, "worker thread for {} panicked", who),
        }
    }
}

impl std::error::Error for HarnessError {}

/// Outcome of a single two-thread session.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Session {
    pub iterations: usize,
    pub expected: u64,
    pub actual: u64,
    pub elapsed: Duration,
}

impl Session {
    /// Whether no increment was lost.
    pub fn is_consistent(&self) -> bool {
        self.actual == self.expected
    }

    /// Number of lost increments.
    pub fn lost(&self) -> u64 {
        self.expected.saturating_sub(self.actual)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} in {:.3} s",
            self.actual,
            self.expected,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Drives `iterations` counter increments from each participant through an
/// existing primitive and counter. Returns once both workers are done.
pub fn drive<A>(mutex: &A, counter: &UnguardedCounter, iterations: usize) -> Result<(), HarnessError>
where
    A: ExclusiveAccess,
{
    drive_with(mutex, counter, iterations, |_, counter| counter.increment())
}

/// Like [`drive`], with arbitrary critical code over an arbitrary resource.
///
/// Each worker stops at its first panicking critical code; the primitive
/// lowers that worker's flag on unwind, so the peer still runs to completion
/// before the panic is reported as [`HarnessError::WorkerPanicked`].
pub fn drive_with<A, R, F>(mutex: &A, resource: &R, iterations: usize, critical_code: F) -> Result<(), HarnessError>
where
    A: ExclusiveAccess,
    R: Sync + ?Sized,
    F: Fn(Participant, &R) + Sync,
{
    let critical_code = &critical_code;
    thread::scope(|s| {
        let workers = Participant::ALL.map(|who| {
            let handle = s.spawn(move || {
                for _ in 0..iterations {
                    mutex.access(who, |resource| critical_code(who, resource), resource);
                }
            });
            (who, handle)
        });
        for (who, handle) in workers {
            if handle.join().is_err() {
                return Err(HarnessError::WorkerPanicked(who));
            }
        }
        Ok(())
    })
}

/// Runs one session against a fresh `A`.
pub fn run_session<A>(iterations: usize) -> Result<Session, HarnessError>
where
    A: ExclusiveAccess + Default,
{
    let mutex = A::default();
    let counter = UnguardedCounter::new();

    let start = Instant::now();
    drive(&mutex, &counter, iterations)?;
    let elapsed = start.elapsed();

    let session = Session {
        iterations,
        expected: 2 * iterations as u64,
        actual: counter.into_inner(),
        elapsed,
    };
    debug!("session: {}", session);
    Ok(session)
}

/// Runs `count` independent sessions, each against a fresh `A`.
pub fn run_sessions<A>(iterations: usize, count: usize) -> Result<Vec<Session>, HarnessError>
where
    A: ExclusiveAccess + Default,
{
    (0..count).map(|_| run_session::<A>(iterations)).collect()
}

/// Parameters of a time-boxed run.
#[derive(Debug, Copy, Clone)]
pub struct RunConfig {
    /// Accesses per participant per session.
    pub iterations: usize,
    /// No new session is started once this much time has passed.
    pub time_budget: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: 500_000,
            time_budget: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    /// Number of sessions completed.
    pub sessions: usize,
    /// The session that satisfied the stop predicate, if any.
    pub hit: Option<Session>,
    pub elapsed: Duration,
}

/// Repeats sessions until `stop` returns `true` for one of them or the time
/// budget runs out. A session already in flight when the budget expires is
/// still completed and checked.
pub fn run_until<A, P>(config: RunConfig, mut stop: P) -> Result<RunReport, HarnessError>
where
    A: ExclusiveAccess + Default,
    P: FnMut(&Session) -> bool,
{
    let start = Instant::now();
    let mut sessions = 0;
    let mut hit = None;

    while start.elapsed() < config.time_budget {
        let session = run_session::<A>(config.iterations)?;
        sessions += 1;
        if stop(&session) {
            hit = Some(session);
            break;
        }
    }

    let report = RunReport {
        sessions,
        hit,
        elapsed: start.elapsed(),
    };
    info!(
        "run: {} sessions in {:.3} s, hit = {:?}",
        report.sessions,
        report.elapsed.as_secs_f64(),
        report.hit
    );
    Ok(report)
}

/// Time-boxed run that stops at the first session with lost updates.
pub fn find_divergence<A>(config: RunConfig) -> Result<RunReport, HarnessError>
where
    A: ExclusiveAccess + Default,
{
    run_until::<A, _>(config, |session| !session.is_consistent())
}
