//! Submit-then-poll job boundary
//!
//! Season certificates are produced by a background job: the caller submits a
//! request, then polls a key until the job reports a result. Polling is a
//! bounded loop with exponential backoff that can be cancelled at any wait.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{CertificateError, Result};

/// State reported by one poll of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState<T> {
    /// Accepted, no result yet
    Pending,
    /// Finished with a result
    Ready(T),
    /// Finished without a result
    Failed(String),
}

/// Backoff policy for [`poll_until_ready`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollPolicy {
    /// Wait before the first poll
    pub initial_delay_ms: u64,
    /// Upper bound for a single wait
    pub max_delay_ms: u64,
    /// Growth factor between waits
    pub multiplier: u32,
    /// Number of polls before giving up
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self { initial_delay_ms: 4_000, max_delay_ms: 30_000, multiplier: 2, max_attempts: 30 }
    }
}

impl PollPolicy {
    /// Wait before poll number `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = u64::from(self.multiplier.max(1)).saturating_pow(attempt);
        Duration::from_millis(self.initial_delay_ms.saturating_mul(factor).min(self.max_delay_ms))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(CertificateError::config("poll.max_attempts must be positive"));
        }
        if self.max_delay_ms < self.initial_delay_ms {
            return Err(CertificateError::config(
                "poll.max_delay_ms must not be below poll.initial_delay_ms",
            ));
        }
        Ok(())
    }
}

/// Poll until the job is ready, failed, cancelled or out of attempts.
///
/// Retryable poll errors count as an attempt and are otherwise ignored; any
/// other error ends polling immediately.
pub async fn poll_until_ready<T, F, Fut>(
    policy: &PollPolicy,
    cancel: &CancellationToken,
    mut poll: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<JobState<T>>>,
{
    for attempt in 0..policy.max_attempts {
        let delay = policy.delay_for(attempt);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(attempt, "job polling cancelled");
                return Err(CertificateError::JobFailed { reason: "cancelled".to_string() });
            }
            _ = tokio::time::sleep(delay) => {}
        }

        match poll().await {
            Ok(JobState::Ready(value)) => {
                debug!(attempt, "job ready");
                return Ok(value);
            }
            Ok(JobState::Failed(reason)) => return Err(CertificateError::JobFailed { reason }),
            Ok(JobState::Pending) => debug!(attempt, ?delay, "job pending"),
            Err(e) if e.is_retryable() => {
                warn!("Job poll error ({}/{}): {}", attempt + 1, policy.max_attempts, e)
            }
            Err(e) => return Err(e),
        }
    }

    Err(CertificateError::JobPending { attempts: policy.max_attempts })
}

/// Key under which a season certificate job stores its result.
pub fn season_certificate_key(
    season_id: i64,
    car_class_id: i64,
    driver_id: i64,
    club: bool,
) -> String {
    format!("{season_id}{car_class_id}{driver_id}{}", if club { "club" } else { "world" })
}

/// Key under which a season participation job stores its result.
pub fn participation_key(year: i32, quarter: u8, driver_id: i64) -> String {
    format!("{year}{quarter}{driver_id}")
}
