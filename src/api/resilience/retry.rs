//! Bounded retry policy
//!
//! A failed attempt is retried after a delay chosen by the policy's
//! `DelayStrategy`, up to `max_attempts` attempts in total.

use log::{debug, info, warn};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// How long to wait before the next attempt
#[derive(Clone)]
pub enum DelayStrategy {
    /// Retry immediately
    None,
    /// Same pause before every retry
    Fixed(Duration),
    /// Pause computed from the number of the attempt that just failed (1-based)
    Custom(Arc<dyn Fn(u32) -> Duration + Send + Sync>),
}

impl fmt::Debug for DelayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelayStrategy::None => write!(f, "None"),
            DelayStrategy::Fixed(delay) => write!(f, "Fixed({:?})", delay),
            DelayStrategy::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl DelayStrategy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self {
            DelayStrategy::None => Duration::ZERO,
            DelayStrategy::Fixed(delay) => *delay,
            DelayStrategy::Custom(delay_fn) => delay_fn(attempt),
        }
    }
}

/// Retry policy: `max_attempts` total attempts with a pluggable delay
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: DelayStrategy,
}

impl Default for RetryPolicy {
    /// One retry after five seconds
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: DelayStrategy::Fixed(Duration::from_secs(5)),
        }
    }
}

/// Outcome of a retried call together with how many attempts it took
#[derive(Debug)]
pub struct Retried<T, E> {
    pub result: Result<T, E>,
    pub attempts: u32,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: DelayStrategy) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self::new(max_attempts, DelayStrategy::Fixed(delay))
    }

    /// Single attempt, no retry
    pub fn no_retry() -> Self {
        Self::new(1, DelayStrategy::None)
    }

    pub fn custom<F>(max_attempts: u32, delay_fn: F) -> Self
    where
        F: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        Self::new(max_attempts, DelayStrategy::Custom(Arc::new(delay_fn)))
    }

    /// Run `operation` until it succeeds or attempts run out.
    ///
    /// `operation` receives the 1-based attempt number. `on_retry` is called with the
    /// failed attempt number, its error and the pause before the next attempt.
    pub async fn execute<F, Fut, T, E, R>(&self, mut operation: F, mut on_retry: R) -> Retried<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
        R: FnMut(u32, &E, Duration),
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            debug!("Executing operation (attempt {}/{})", attempt, max_attempts);

            match operation(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        info!("Operation succeeded after {} attempts", attempt);
                    }
                    return Retried {
                        result: Ok(value),
                        attempts: attempt,
                    };
                }
                Err(error) if attempt >= max_attempts => {
                    warn!("Operation failed permanently on attempt {}: {}", attempt, error);
                    return Retried {
                        result: Err(error),
                        attempts: attempt,
                    };
                }
                Err(error) => {
                    let delay = self.delay.delay_for(attempt);
                    warn!("Operation failed on attempt {}: {}; retrying in {:?}", attempt, error, delay);
                    on_retry(attempt, &error, delay);

                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }
}
