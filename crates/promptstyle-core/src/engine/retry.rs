//! Bounded retry of a single model query.
//!
//! Only HTTP 429 is retried. The transition function is pure; the async
//! driver owns the sleeping so tests can run it under paused time.

use crate::errors::QueryError;
use crate::model::{Completion, ModelResponse};
use crate::providers::llm::LlmClient;
use std::time::Duration;

pub const MAX_RETRIES_EXCEEDED: &str = "Max retries exceeded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl RetryPolicy {
    /// Wait after the zero-based `attempt` was rate limited: 2s, 4s, 8s, ...
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_secs(2u64.saturating_pow(attempt.saturating_add(1)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RetryState {
    Attempting { attempt: u32 },
    RateLimited { wait: Duration, next_attempt: u32 },
    Succeeded(Completion),
    FailedPermanently(String),
}

impl RetryState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RetryState::Succeeded(_) | RetryState::FailedPermanently(_)
        )
    }
}

/// Next state after `attempt` (zero-based) produced `outcome`.
pub fn on_outcome(
    attempt: u32,
    outcome: Result<Completion, QueryError>,
    policy: &RetryPolicy,
) -> RetryState {
    match outcome {
        Ok(c) => RetryState::Succeeded(c),
        Err(e) if e.is_retryable() => {
            let next_attempt = attempt + 1;
            if next_attempt >= policy.max_attempts {
                RetryState::FailedPermanently(MAX_RETRIES_EXCEEDED.to_string())
            } else {
                RetryState::RateLimited {
                    wait: policy.backoff(attempt),
                    next_attempt,
                }
            }
        }
        Err(e) => RetryState::FailedPermanently(e.to_string()),
    }
}

/// Drives the state machine to a terminal state. Never returns an error:
/// every failure is folded into `ModelResponse::Failure`.
pub async fn query_with_retry(
    client: &dyn LlmClient,
    model: &str,
    prompt: &str,
    policy: &RetryPolicy,
) -> ModelResponse {
    let mut state = RetryState::Attempting { attempt: 0 };
    loop {
        state = match state {
            RetryState::Attempting { attempt } => {
                let outcome = client.complete(model, prompt).await;
                on_outcome(attempt, outcome, policy)
            }
            RetryState::RateLimited { wait, next_attempt } => {
                tracing::warn!(
                    event = "query.rate_limited",
                    model = %model,
                    wait_secs = wait.as_secs(),
                    "rate limited, backing off"
                );
                tokio::time::sleep(wait).await;
                RetryState::Attempting {
                    attempt: next_attempt,
                }
            }
            RetryState::Succeeded(c) => return ModelResponse::Success(c),
            RetryState::FailedPermanently(error) => {
                tracing::warn!(
                    event = "query.failed",
                    model = %model,
                    provider = client.provider_name(),
                    error = %error,
                    "query failed"
                );
                return ModelResponse::failure(error);
            }
        };
    }
}
