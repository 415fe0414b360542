//! Classification-aware retry with exponential backoff.

use std::{fmt::Display, future::Future, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::error::{Classification, Transient};

/// How many times, and how patiently, a failed operation is retried.
///
/// `initial_delay <= max_delay` is assumed; if it does not hold, every delay
/// is `max_delay`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,

    #[serde(rename = "initial_delay_ms", with = "duration_ms")]
    pub initial_delay: Duration,

    #[serde(rename = "max_delay_ms", with = "duration_ms")]
    pub max_delay: Duration,

    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(10_000),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Wait before the `retry`-th retry, counting from 0.
    ///
    /// `min(initial_delay * backoff_multiplier^retry, max_delay)`, no jitter.
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let scaled = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);

        if !scaled.is_finite() || scaled < 0.0 {
            return self.max_delay;
        }

        Duration::try_from_secs_f64(scaled)
            .map(|delay| delay.min(self.max_delay))
            .unwrap_or(self.max_delay)
    }
}

/// Run `operation`, retrying transient failures according to `policy`.
///
/// Each retry is logged at `warn`. Use [`execute_with`] to observe retries
/// directly.
pub async fn execute<T, E, F, Fut>(policy: &RetryPolicy, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Transient + Display,
{
    execute_with(
        policy,
        |attempt, error: &E| {
            tracing::warn!(attempt, error = %error, "transient failure, retrying");
        },
        operation,
    )
    .await
}

/// Like [`execute`], calling `on_retry(attempt, &error)` before every wait.
///
/// `attempt` starts at 1 for the first retry. Fatal errors are returned on
/// first occurrence; once the retry budget is spent the error from the final
/// attempt is returned unmodified.
pub async fn execute_with<T, E, F, Fut, N>(
    policy: &RetryPolicy,
    mut on_retry: N,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Transient,
    N: FnMut(u32, &E),
{
    let mut retry = 0u32;

    loop {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if error.classification() == Classification::Fatal || retry >= policy.max_retries {
            return Err(error);
        }

        let delay = policy.delay_for_retry(retry);
        on_retry(retry + 1, &error);
        tracing::debug!(retry = retry + 1, delay_ms = delay.as_millis() as u64, "backing off");

        sleep(delay).await;
        retry += 1;
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
