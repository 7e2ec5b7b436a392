//! Bounded retry with per-collaborator backoff.
//!
//! Every blocking external call (embedding, generation) runs under one of
//! these policies. Retries are local to the sub-call; they never restart
//! the surrounding pipeline.

use std::thread;
use std::time::Duration;

use tracing::warn;

/// Classifies errors for the retry loop.
pub trait Retryable {
    /// Whether another attempt may succeed.
    fn is_retryable(&self) -> bool;

    /// Whether the failure was a rate limit (longer backoff).
    fn is_rate_limited(&self) -> bool;

    /// The error reported when the attempt budget is spent.
    fn exhausted(attempts: usize) -> Self;
}

/// Backoff schedule between attempts.
#[derive(Debug, Clone, Copy)]
pub enum Backoff {
    /// Same delay after every failed attempt.
    Fixed(Duration),
    /// Longer delay when the error was a rate limit.
    RateAware {
        rate_limited: Duration,
        other: Duration,
    },
}

impl Backoff {
    fn delay<E: Retryable>(&self, error: &E) -> Duration {
        match self {
            Backoff::Fixed(d) => *d,
            Backoff::RateAware {
                rate_limited,
                other,
            } => {
                if error.is_rate_limited() {
                    *rate_limited
                } else {
                    *other
                }
            }
        }
    }
}

/// A bounded retry policy: max attempts plus a backoff schedule.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Embedding calls: up to 5 attempts, rate-limit-aware backoff.
    pub fn embedding() -> Self {
        Self {
            max_attempts: 5,
            backoff: Backoff::RateAware {
                rate_limited: Duration::from_secs(20),
                other: Duration::from_secs(2),
            },
        }
    }

    /// Generation calls: up to 3 attempts, fixed backoff.
    pub fn generation() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::Fixed(Duration::from_secs(5)),
        }
    }

    /// Same policy with all delays zeroed. Used in tests.
    pub fn without_backoff(self) -> Self {
        Self {
            max_attempts: self.max_attempts,
            backoff: Backoff::Fixed(Duration::ZERO),
        }
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or
    /// the attempt budget is spent. Exhaustion reports as
    /// `Retryable::exhausted` rather than the last transient error.
    pub fn run<T, E, F>(&self, label: &str, mut op: F) -> Result<T, E>
    where
        E: Retryable + std::fmt::Display,
        F: FnMut() -> Result<T, E>,
    {
        for attempt in 1..=self.max_attempts {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if !e.is_retryable() {
                        warn!(label, attempt, error = %e, "giving up");
                        return Err(e);
                    }
                    if attempt == self.max_attempts {
                        warn!(label, attempt, error = %e, "attempt budget spent");
                        return Err(E::exhausted(self.max_attempts));
                    }
                    let delay = self.backoff.delay(&e);
                    warn!(label, attempt, error = %e, ?delay, "retrying");
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                }
            }
        }
        // Reachable only with a zero attempt budget.
        Err(E::exhausted(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    enum MockError {
        #[error("transient")]
        Transient,
        #[error("fatal")]
        Fatal,
        #[error("exhausted after {0} attempts")]
        Exhausted(usize),
    }

    impl Retryable for MockError {
        fn is_retryable(&self) -> bool {
            matches!(self, MockError::Transient)
        }
        fn is_rate_limited(&self) -> bool {
            false
        }
        fn exhausted(attempts: usize) -> Self {
            MockError::Exhausted(attempts)
        }
    }

    #[test]
    fn succeeds_after_transient_failures() {
        let policy = RetryPolicy {
            max_attempts: 3,
            backoff: Backoff::Fixed(Duration::ZERO),
        };
        let mut calls = 0;
        let result: Result<u32, MockError> = policy.run("test", || {
            calls += 1;
            if calls < 3 {
                Err(MockError::Transient)
            } else {
                Ok(7)
            }
        });
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls, 3);
    }

    #[test]
    fn stops_immediately_on_non_retryable() {
        let policy = RetryPolicy {
            max_attempts: 5,
            backoff: Backoff::Fixed(Duration::ZERO),
        };
        let mut calls = 0;
        let result: Result<u32, MockError> = policy.run("test", || {
            calls += 1;
            Err(MockError::Fatal)
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn honors_attempt_budget() {
        let policy = RetryPolicy {
            max_attempts: 4,
            backoff: Backoff::Fixed(Duration::ZERO),
        };
        let mut calls = 0;
        let result: Result<u32, MockError> = policy.run("test", || {
            calls += 1;
            Err(MockError::Transient)
        });
        assert!(matches!(result, Err(MockError::Exhausted(4))));
        assert_eq!(calls, 4);
    }
}
