//! Retry strategies and the retrying wire.
//!
//! [`RetryWire`] re-sends a request when the downstream transport fails
//! with a network-level error, following a [`RetryStrategy`]. Anything
//! other than a transport error propagates untouched.

use crate::{header::Headers, Error, Request, Response, Result, Wire};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Defines when and how a [`RetryWire`] re-sends failed requests.
///
/// # Examples
///
/// ```
/// use wireline::RetryStrategy;
/// use std::time::Duration;
///
/// // Exponential backoff: 100ms, 200ms, 400ms, 800ms...
/// let exponential = RetryStrategy::ExponentialBackoff {
///     initial_delay: Duration::from_millis(100),
///     max_delay: Duration::from_secs(30),
///     max_retries: 5,
///     jitter: true,
/// };
///
/// // Fixed delay: 1s, 1s, 1s
/// let linear = RetryStrategy::Linear {
///     delay: Duration::from_secs(1),
///     max_retries: 3,
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub enum RetryStrategy {
    /// Do not retry failed requests.
    #[default]
    None,

    /// Retry with exponentially increasing delays.
    ///
    /// Each retry waits for `initial_delay * 2^attempt` capped at
    /// `max_delay`. Optional jitter randomizes each delay to prevent
    /// thundering herd.
    ExponentialBackoff {
        /// The delay before the first retry.
        initial_delay: Duration,
        /// The maximum delay between retries.
        max_delay: Duration,
        /// The maximum number of retry attempts.
        max_retries: usize,
        /// Whether to randomize delays.
        jitter: bool,
    },

    /// Retry with a fixed delay between attempts.
    Linear {
        /// The delay between retry attempts.
        delay: Duration,
        /// The maximum number of retry attempts.
        max_retries: usize,
    },

    /// Custom retry logic: the function takes the attempt number
    /// (1-indexed) and returns the delay before that retry, or `None`
    /// to stop.
    Custom {
        /// Function that determines the retry delay.
        delay_fn: fn(attempt: usize) -> Option<Duration>,
    },
}

impl RetryStrategy {
    /// Returns the delay before the given retry attempt, or `None` if
    /// retries are exhausted. `attempt` is 1-indexed.
    pub fn delay_for_attempt(&self, attempt: usize) -> Option<Duration> {
        match self {
            RetryStrategy::None => None,
            RetryStrategy::ExponentialBackoff {
                initial_delay,
                max_delay,
                max_retries,
                jitter,
            } => {
                if attempt > *max_retries {
                    return None;
                }
                let multiplier = 2u64.saturating_pow(attempt.saturating_sub(1) as u32);
                let base = initial_delay.saturating_mul(multiplier.try_into().unwrap_or(u32::MAX));
                let delay = base.min(*max_delay);
                if *jitter {
                    let factor = rand::thread_rng().gen_range(0.5..=1.0);
                    Some(delay.mul_f64(factor))
                } else {
                    Some(delay)
                }
            }
            RetryStrategy::Linear { delay, max_retries } => {
                if attempt > *max_retries {
                    None
                } else {
                    Some(*delay)
                }
            }
            RetryStrategy::Custom { delay_fn } => delay_fn(attempt),
        }
    }
}

/// A wire that re-sends on transport errors.
///
/// Construction errors and decoding errors never trigger a retry; only
/// [`Error::Transport`] does. When the strategy runs out of attempts
/// the wire fails with [`Error::MaxRetriesExceeded`].
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use wireline::{MockWire, Request, RetryStrategy, RetryWire};
///
/// # fn main() -> Result<(), wireline::Error> {
/// let request = Request::with_wire(Arc::new(MockWire::ok("")), "http://localhost")?
///     .through(|origin| {
///         RetryWire::with_strategy(
///             origin,
///             RetryStrategy::Linear {
///                 delay: Duration::from_millis(100),
///                 max_retries: 3,
///             },
///         )
///     });
/// request.fetch()?;
/// # Ok(())
/// # }
/// ```
pub struct RetryWire {
    origin: Arc<dyn Wire>,
    strategy: RetryStrategy,
}

impl RetryWire {
    /// Wraps the given transport with the default strategy: three
    /// retries, 100 milliseconds apart.
    pub fn new(origin: Arc<dyn Wire>) -> Self {
        RetryWire::with_strategy(
            origin,
            RetryStrategy::Linear {
                delay: Duration::from_millis(100),
                max_retries: 3,
            },
        )
    }

    /// Wraps the given transport with an explicit strategy.
    pub fn with_strategy(origin: Arc<dyn Wire>, strategy: RetryStrategy) -> Self {
        RetryWire { origin, strategy }
    }
}

impl Wire for RetryWire {
    fn send(
        &self,
        owner: &Request,
        home: &str,
        method: &str,
        headers: &Headers,
        body: &[u8],
    ) -> Result<Response> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.origin.send(owner, home, method, headers, body) {
                Ok(response) => return Ok(response),
                Err(err) if err.is_transport() => {
                    tracing::warn!(
                        error = %err,
                        attempt,
                        method,
                        uri = home,
                        "request failed"
                    );
                    match self.strategy.delay_for_attempt(attempt) {
                        Some(delay) => {
                            tracing::info!(
                                delay_ms = delay.as_millis() as u64,
                                attempt,
                                "retrying request after delay"
                            );
                            std::thread::sleep(delay);
                        }
                        None => {
                            return Err(Error::MaxRetriesExceeded {
                                attempts: attempt,
                                last_error: Box::new(err),
                            })
                        }
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_backoff_delays() {
        let strategy = RetryStrategy::ExponentialBackoff {
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            max_retries: 5,
            jitter: false,
        };
        assert_eq!(
            strategy.delay_for_attempt(1),
            Some(Duration::from_millis(100))
        );
        assert_eq!(
            strategy.delay_for_attempt(2),
            Some(Duration::from_millis(200))
        );
        assert_eq!(
            strategy.delay_for_attempt(5),
            Some(Duration::from_millis(1600))
        );
        assert_eq!(strategy.delay_for_attempt(6), None);
    }

    #[test]
    fn exponential_backoff_respects_max_delay() {
        let strategy = RetryStrategy::ExponentialBackoff {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(2),
            max_retries: 10,
            jitter: false,
        };
        assert_eq!(strategy.delay_for_attempt(8), Some(Duration::from_secs(2)));
    }

    #[test]
    fn linear_delays() {
        let strategy = RetryStrategy::Linear {
            delay: Duration::from_secs(1),
            max_retries: 3,
        };
        assert_eq!(strategy.delay_for_attempt(1), Some(Duration::from_secs(1)));
        assert_eq!(strategy.delay_for_attempt(3), Some(Duration::from_secs(1)));
        assert_eq!(strategy.delay_for_attempt(4), None);
    }

    #[test]
    fn no_retry() {
        assert_eq!(RetryStrategy::None.delay_for_attempt(1), None);
    }
}
