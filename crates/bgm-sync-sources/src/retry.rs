use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Status codes worth retrying: rate limiting and transient server errors.
const RETRYABLE_STATUS: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Bounded exponential backoff applied to every request either service
/// client sends. The write methods used here are safe to retry: creates
/// and updates carry the full recomputed payload.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry following the given 1-based attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        self.initial_delay.mul_f64(factor)
    }
}

/// Send a request, retrying transport errors and retryable status codes
/// until the policy is exhausted. The final response or error is returned
/// to the caller, whose own failure path applies.
pub async fn send_with_retry(
    request: RequestBuilder,
    policy: &RetryPolicy,
) -> reqwest::Result<Response> {
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        let current = match request.try_clone() {
            Some(cloned) => cloned,
            // Non-clonable bodies get a single attempt; ours are all JSON.
            None => return request.send().await,
        };
        match current.send().await {
            Ok(response)
                if RETRYABLE_STATUS.contains(&response.status())
                    && attempt < policy.max_attempts =>
            {
                let delay = policy.delay_for(attempt);
                warn!(
                    "Request to {} returned {}, retrying in {:?} (attempt {}/{})",
                    response.url(),
                    response.status(),
                    delay,
                    attempt,
                    policy.max_attempts
                );
                sleep(delay).await;
            }
            Ok(response) => return Ok(response),
            Err(err) if attempt < policy.max_attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    "Request failed ({}), retrying in {:?} (attempt {}/{})",
                    err, delay, attempt, policy.max_attempts
                );
                sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
