//! Per-session brute-force lockout.
//!
//! An [`AttemptLimiter`] counts consecutive failed retrievals for one session.
//! It is **Open** while `failed < threshold` and **Locked** once
//! `failed >= threshold`. Only [`AttemptLimiter::reset`] leaves Locked; there
//! is no time-based unlock.
//!
//! Retrieval attempts are admitted through [`AttemptLimiter::begin`], which
//! reserves a slot for the attempt. Slots held by in-flight attempts count as
//! potential failures, so concurrent wrong guesses can never push the failure
//! count past the threshold. The mutex is held only for the bookkeeping, never
//! across key derivation or decryption.

use parking_lot::{Condvar, Mutex};
use tracing::warn;

use crate::config::DEFAULT_THRESHOLD_ATTEMPTS;
use crate::error::{Result, VaultError};

#[derive(Debug, Default)]
struct Counters {
    failed: u32,
    in_flight: u32,
}

/// Consecutive-failure counter owned by one session.
#[derive(Debug)]
pub struct AttemptLimiter {
    threshold: u32,
    state: Mutex<Counters>,
    released: Condvar,
}

impl Default for AttemptLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_ATTEMPTS)
    }
}

impl AttemptLimiter {
    /// Create a limiter that locks after `threshold` consecutive failures.
    ///
    /// A threshold of zero is treated as one.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            state: Mutex::new(Counters::default()),
            released: Condvar::new(),
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn failed_count(&self) -> u32 {
        self.state.lock().failed
    }

    pub fn is_locked(&self) -> bool {
        self.state.lock().failed >= self.threshold
    }

    /// Attempts left before the limiter locks.
    pub fn remaining(&self) -> u32 {
        self.threshold.saturating_sub(self.state.lock().failed)
    }

    /// Admit one retrieval attempt.
    ///
    /// Blocks only while other in-flight attempts could still reach the
    /// threshold, and wakes as soon as they resolve.
    ///
    /// A thread that already holds an unresolved [`Attempt`] must not call
    /// this: if its own slot is the one keeping the limiter full, it waits on
    /// itself forever. Use [`AttemptLimiter::try_begin`] there instead.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::LockedOut` if the limiter is locked.
    pub fn begin(&self) -> Result<Attempt<'_>> {
        let mut state = self.state.lock();
        loop {
            if let Some(admitted) = self.admit(&mut state)? {
                return Ok(admitted);
            }
            self.released.wait(&mut state);
        }
    }

    /// Admit one retrieval attempt without blocking.
    ///
    /// Returns `Ok(None)` when every free slot is held by an in-flight attempt.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::LockedOut` if the limiter is locked.
    pub fn try_begin(&self) -> Result<Option<Attempt<'_>>> {
        let mut state = self.state.lock();
        self.admit(&mut state)
    }

    fn admit(&self, state: &mut Counters) -> Result<Option<Attempt<'_>>> {
        if state.failed >= self.threshold {
            return Err(VaultError::LockedOut);
        }
        if state.failed + state.in_flight < self.threshold {
            state.in_flight += 1;
            return Ok(Some(Attempt {
                limiter: self,
                resolved: false,
            }));
        }
        Ok(None)
    }

    /// Clear the failure count and unlock.
    ///
    /// This is the hook for the session layer's own re-authentication; the
    /// vault never calls it on its own.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.failed = 0;
        drop(state);
        self.released.notify_all();
    }

    fn finish(&self, outcome: Outcome) -> u32 {
        let mut state = self.state.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        match outcome {
            Outcome::Success => state.failed = 0,
            Outcome::Failure => state.failed = state.failed.saturating_add(1),
            Outcome::Abandoned => {}
        }
        let remaining = self.threshold.saturating_sub(state.failed);
        if matches!(outcome, Outcome::Failure) && remaining == 0 {
            warn!(threshold = self.threshold, "attempt limit reached; locking session");
        }
        drop(state);
        self.released.notify_all();
        remaining
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Success,
    Failure,
    Abandoned,
}

/// A reserved retrieval attempt.
///
/// Resolve it with [`Attempt::succeed`] or [`Attempt::fail`]. Dropping it
/// unresolved releases the slot without touching the failure count.
#[derive(Debug)]
#[must_use = "an unresolved attempt releases its slot without being counted"]
pub struct Attempt<'a> {
    limiter: &'a AttemptLimiter,
    resolved: bool,
}

impl Attempt<'_> {
    /// Record a successful decryption, resetting the failure count.
    pub fn succeed(mut self) {
        self.resolved = true;
        self.limiter.finish(Outcome::Success);
    }

    /// Record a failed decryption and return the attempts left.
    pub fn fail(mut self) -> u32 {
        self.resolved = true;
        self.limiter.finish(Outcome::Failure)
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            self.limiter.finish(Outcome::Abandoned);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_starts_open() {
        let limiter = AttemptLimiter::default();
        assert_eq!(limiter.threshold(), 3);
        assert_eq!(limiter.failed_count(), 0);
        assert_eq!(limiter.remaining(), 3);
        assert!(!limiter.is_locked());
    }

    #[test]
    fn test_failures_lock_at_threshold() {
        let limiter = AttemptLimiter::new(3);

        assert_eq!(limiter.begin().unwrap().fail(), 2);
        assert_eq!(limiter.begin().unwrap().fail(), 1);
        assert!(!limiter.is_locked());
        assert_eq!(limiter.begin().unwrap().fail(), 0);
        assert!(limiter.is_locked());

        assert!(matches!(limiter.begin(), Err(VaultError::LockedOut)));
        assert!(matches!(limiter.begin(), Err(VaultError::LockedOut)));
        assert_eq!(limiter.failed_count(), 3);
    }

    #[test]
    fn test_success_resets_count() {
        let limiter = AttemptLimiter::new(3);
        limiter.begin().unwrap().fail();
        limiter.begin().unwrap().fail();

        limiter.begin().unwrap().succeed();
        assert_eq!(limiter.failed_count(), 0);
        assert_eq!(limiter.remaining(), 3);
    }

    #[test]
    fn test_reset_unlocks() {
        let limiter = AttemptLimiter::new(1);
        limiter.begin().unwrap().fail();
        assert!(limiter.is_locked());

        limiter.reset();
        assert!(!limiter.is_locked());
        assert!(limiter.begin().is_ok());
    }

    #[test]
    fn test_abandoned_attempt_is_not_counted() {
        let limiter = AttemptLimiter::new(2);
        {
            let _attempt = limiter.begin().unwrap();
        }
        assert_eq!(limiter.failed_count(), 0);

        // The slot was released, so both slots are free again.
        let first = limiter.begin().unwrap();
        let second = limiter.begin().unwrap();
        first.succeed();
        second.succeed();
    }

    #[test]
    fn test_try_begin_does_not_wait() {
        let limiter = AttemptLimiter::new(1);
        let held = limiter.try_begin().unwrap().expect("first slot is free");

        assert!(limiter.try_begin().unwrap().is_none());

        held.fail();
        assert!(matches!(limiter.try_begin(), Err(VaultError::LockedOut)));
    }

    #[test]
    fn test_zero_threshold_treated_as_one() {
        let limiter = AttemptLimiter::new(0);
        assert_eq!(limiter.threshold(), 1);
        limiter.begin().unwrap().fail();
        assert!(limiter.is_locked());
    }

    #[test]
    fn test_concurrent_failures_never_exceed_threshold() {
        let limiter = Arc::new(AttemptLimiter::new(3));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                thread::spawn(move || match limiter.begin() {
                    Ok(attempt) => {
                        thread::yield_now();
                        attempt.fail();
                        true
                    }
                    Err(err) => {
                        assert!(err.is_locked());
                        false
                    }
                })
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|admitted| *admitted)
            .count();

        assert_eq!(admitted, 3);
        assert_eq!(limiter.failed_count(), 3);
        assert!(limiter.is_locked());
    }

    #[test]
    fn test_waiting_attempt_admitted_after_success() {
        let limiter = Arc::new(AttemptLimiter::new(1));
        let held = limiter.begin().unwrap();

        let waiter = {
            let limiter = Arc::clone(&limiter);
            thread::spawn(move || limiter.begin().map(|attempt| attempt.succeed()))
        };

        thread::sleep(std::time::Duration::from_millis(20));
        held.succeed();

        assert!(waiter.join().unwrap().is_ok());
        assert_eq!(limiter.failed_count(), 0);
    }
}
