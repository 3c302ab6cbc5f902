//! Timed, contended runs of both primitives.
//!
//! These mirror the counter workload: two threads, one per participant,
//! each incrementing an unguarded counter through the primitive.

use std::thread;
use std::time::Duration;

use test_log::test;

use peterson_rs::access::ExclusiveAccess;
use peterson_rs::broken::BrokenMutualExclusion;
use peterson_rs::counter::UnguardedCounter;
use peterson_rs::harness::{drive, find_divergence, run_session, run_sessions, RunConfig};
use peterson_rs::peterson::CorrectMutualExclusion;
use peterson_rs::types::Participant;

const MAX_TIME: Duration = Duration::from_secs(10);

#[test]
fn correct_sums_exactly_in_every_session() {
    let iterations = 100_000;
    let sessions = run_sessions::<CorrectMutualExclusion>(iterations, 10).unwrap();

    assert_eq!(sessions.len(), 10);
    for session in &sessions {
        assert_eq!(session.actual, 200_000, "lost updates: {}", session);
    }
}

#[test]
fn correct_sums_exactly_after_elapsed_time() {
    let config = RunConfig {
        iterations: 500_000,
        time_budget: MAX_TIME,
    };
    let report = find_divergence::<CorrectMutualExclusion>(config).unwrap();

    assert!(report.sessions > 0);
    assert!(
        report.hit.is_none(),
        "CorrectMutualExclusion diverged: {}",
        report.hit.unwrap()
    );
}

#[test]
fn broken_loses_updates_within_time_budget() {
    let config = RunConfig {
        iterations: 500_000,
        time_budget: MAX_TIME,
    };
    let report = find_divergence::<BrokenMutualExclusion>(config).unwrap();

    match report.hit {
        Some(session) => assert!(session.actual < session.expected),
        None => panic!(
            "BrokenMutualExclusion should have failed within {} s ({} sessions)",
            MAX_TIME.as_secs(),
            report.sessions
        ),
    }
}

#[test]
fn fresh_instances_start_lowered_and_favor_p0() {
    let correct = CorrectMutualExclusion::new();
    assert_eq!(correct.flags(), [false, false]);
    assert_eq!(correct.turn(), Participant::P0);

    let broken = BrokenMutualExclusion::new();
    assert_eq!(broken.flags(), [false, false]);
    assert_eq!(broken.turn(), Participant::P0);
}

#[test]
fn first_access_never_waits() {
    // A single thread calling either participant on a fresh instance must
    // get straight through; a wrong initial state would spin forever here.
    for who in Participant::ALL {
        let counter = UnguardedCounter::new();
        CorrectMutualExclusion::new().access(who, UnguardedCounter::increment, &counter);
        BrokenMutualExclusion::new().access(who, UnguardedCounter::increment, &counter);
        assert_eq!(counter.get(), 2);
    }
}

#[test]
fn independent_instances_do_not_interfere() {
    let iterations = 100_000;

    let first = CorrectMutualExclusion::new();
    let second = CorrectMutualExclusion::new();
    let first_counter = UnguardedCounter::new();
    let second_counter = UnguardedCounter::new();

    thread::scope(|s| {
        s.spawn(|| drive(&first, &first_counter, iterations).unwrap());
        s.spawn(|| drive(&second, &second_counter, iterations).unwrap());
    });

    assert_eq!(first_counter.get(), 2 * iterations as u64);
    assert_eq!(second_counter.get(), 2 * iterations as u64);
    assert_eq!(first.flags(), [false, false]);
    assert_eq!(second.flags(), [false, false]);
}

#[test]
fn idle_instance_does_not_block_busy_one() {
    // p0 of an unrelated instance holds its critical section for the whole
    // run; the other instance must still complete.
    let iterations = 10_000;

    let idle = CorrectMutualExclusion::new();
    let busy = CorrectMutualExclusion::new();
    let counter = UnguardedCounter::new();

    idle.p0_access(|_| drive(&busy, &counter, iterations).unwrap(), &());

    assert_eq!(counter.get(), 2 * iterations as u64);
    assert_eq!(idle.flags(), [false, false]);
}

#[test]
fn broken_single_session_completes() {
    // Whether or not it diverges, a session of the broken variant terminates
    // and never overshoots.
    let session = run_session::<BrokenMutualExclusion>(10_000).unwrap();
    assert!(session.actual <= session.expected);
}
