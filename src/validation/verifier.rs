use async_trait::async_trait;
use futures::{StreamExt, stream};
use log::debug;
use rand::Rng;
use reqwest::header::RANGE;
use reqwest::redirect::Policy;
use tokio::time::{Duration, sleep};

use std::sync::Arc;

use crate::core::constants::{defaults, http_status, reasons};
use crate::core::error::{HrefsUpError, Result};
use crate::core::types::{CheckOutcome, LinkOccurrence};
use crate::discovery::is_mailto;

/// Requests a single reachability probe; returns the HTTP status.
///
/// Any transport-level failure (connect, DNS, TLS, timeout) is an `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn head(&self, url: &str) -> Result<u16>;

    /// GET asking for the first byte only.
    async fn ranged_get(&self, url: &str) -> Result<u16>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn head(&self, url: &str) -> Result<u16> {
        let response = self.client.head(url).send().await.map_err(network_error)?;
        Ok(response.status().as_u16())
    }

    async fn ranged_get(&self, url: &str) -> Result<u16> {
        let response = self
            .client
            .get(url)
            .header(RANGE, "bytes=0-0")
            .send()
            .await
            .map_err(network_error)?;
        Ok(response.status().as_u16())
    }
}

fn network_error(err: reqwest::Error) -> HrefsUpError {
    if err.is_timeout() {
        return HrefsUpError::Network("request timed out".to_string());
    }
    let description = std::error::Error::source(&err)
        .map(|e| e.to_string())
        .unwrap_or_else(|| err.to_string());
    HrefsUpError::Network(description)
}

/// How often and how patiently an external reference is retried.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff_base: Duration,
    pub jitter_max: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: defaults::RETRIES,
            backoff_base: Duration::from_secs_f64(defaults::BACKOFF_BASE_SECONDS),
            jitter_max: Duration::from_secs_f64(defaults::JITTER_MAX_SECONDS),
        }
    }
}

impl RetryPolicy {
    /// `backoff_base * 2^attempt_index`, without jitter.
    pub fn backoff_delay(&self, attempt_index: u32) -> Duration {
        self.backoff_base
            .saturating_mul(2u32.saturating_pow(attempt_index))
    }

    /// Uniform in `[0, jitter_max)`.
    pub fn jitter(&self) -> Duration {
        if self.jitter_max.is_zero() {
            return Duration::ZERO;
        }
        let seconds = rand::thread_rng().gen_range(0.0..self.jitter_max.as_secs_f64());
        Duration::from_secs_f64(seconds)
    }

    fn effective_attempts(&self) -> u32 {
        self.attempts.max(1)
    }
}

/// Result of one HEAD (+ optional GET fallback) attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    Success(String),
    /// Worth another attempt after backoff
    Retryable(String),
    /// Durable HTTP error; stop immediately
    Terminal(String),
}

pub struct ExternalVerifier {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl ExternalVerifier {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn attempt(&self, url: &str) -> AttemptResult {
        match self.transport.head(url).await {
            Ok(status) if http_status::is_reachable(status) => {
                AttemptResult::Success(format!("HTTP {status}"))
            }
            Ok(status) if http_status::wants_get_fallback(status) => {
                match self.transport.ranged_get(url).await {
                    Ok(get_status) if http_status::is_reachable(get_status) => {
                        AttemptResult::Success(format!("HTTP {get_status} (GET fallback)"))
                    }
                    Ok(get_status) => AttemptResult::Retryable(format!(
                        "HTTP {get_status} (GET fallback after HEAD {status})"
                    )),
                    Err(err) => AttemptResult::Retryable(format!(
                        "GET fallback after HEAD {status} failed: {err}"
                    )),
                }
            }
            Ok(status) => AttemptResult::Terminal(format!("HTTP {status}")),
            Err(err) => AttemptResult::Retryable(err.to_string()),
        }
    }

    /// Check one reference, retrying with exponential backoff.
    ///
    /// `mailto:` references succeed without touching the network. A HEAD
    /// error status other than 403/405 ends the loop at once; everything
    /// else that fails is retried until the attempt budget is spent.
    pub async fn verify(&self, url: &str) -> CheckOutcome {
        if is_mailto(url) {
            return CheckOutcome::success(reasons::MAILTO);
        }

        let attempts = self.policy.effective_attempts();
        let mut last_failure = String::new();

        for attempt in 0..attempts {
            match self.attempt(url).await {
                AttemptResult::Success(reason) => return CheckOutcome::success(reason),
                AttemptResult::Terminal(reason) => {
                    debug!("{url}: giving up after attempt {}: {reason}", attempt + 1);
                    return CheckOutcome::failure(reason);
                }
                AttemptResult::Retryable(reason) => {
                    debug!("{url}: attempt {}/{attempts} failed: {reason}", attempt + 1);
                    last_failure = reason;
                }
            }

            if attempt + 1 < attempts {
                let delay = self.policy.backoff_delay(attempt).saturating_add(self.policy.jitter());
                debug!("{url}: backing off for {}ms", delay.as_millis());
                sleep(delay).await;
            }
        }

        CheckOutcome::failure(format!(
            "failed after {attempts} attempts: {last_failure}"
        ))
    }

    /// Verify every occurrence with at most `workers` checks in flight.
    ///
    /// Each check returns its own `(occurrence, outcome)` pair; results come
    /// back in completion order.
    pub async fn verify_all(
        &self,
        occurrences: Vec<LinkOccurrence>,
        workers: usize,
    ) -> Vec<(LinkOccurrence, CheckOutcome)> {
        stream::iter(occurrences)
            .map(move |occurrence| async move {
                let outcome = self.verify(&occurrence.reference).await;
                (occurrence, outcome)
            })
            .buffer_unordered(workers.max(1))
            .collect()
            .await
    }
}
