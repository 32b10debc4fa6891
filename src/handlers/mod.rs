//! Request handlers for the certificate endpoints
//!
//! Each handler validates its request, fetches what it needs from the members
//! API through a [`DataApi`], and returns a typed record:
//!
//! - [`Handlers::race_certificate`] - one race result as a [`CertificateRecord`]
//! - [`Handlers::season_participation`] - the series a driver raced in a season
//! - [`Handlers::season_certificate`] - one driver's season standing
//!
//! Requests arrive as JSON bodies using the browser's field names
//! (`subsessionid`, `driverid`, ...); `from_json` performs the same checks the
//! endpoints always applied and reports them as
//! [`InvalidRequest`](crate::CertificateError::InvalidRequest).
//!
//! [`CertificateRecord`]: crate::CertificateRecord

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::DataApi;
use crate::config::Config;
use crate::job::{JobState, poll_until_ready};
use crate::logo::{LogoLookup, SpecialEventLogos};
use crate::{CertificateError, Result};

mod race;
mod season;

pub use race::RaceResultsRequest;
pub use season::{SeasonParticipationRequest, SeasonResultsRequest};

/// Certificate endpoints bound to one API transport
pub struct Handlers<A> {
    api: A,
    config: Config,
    logos: Arc<dyn LogoLookup>,
}

impl<A: DataApi> Handlers<A> {
    /// Handlers using the built-in special event logo table.
    pub fn new(api: A, config: Config) -> Self {
        Self::with_logos(api, config, Arc::new(SpecialEventLogos))
    }

    pub fn with_logos(api: A, config: Config, logos: Arc<dyn LogoLookup>) -> Self {
        Self { api, config, logos }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Poll a submitted job using the configured [`PollPolicy`](crate::job::PollPolicy).
    pub async fn poll_job<T, F, Fut>(&self, cancel: &CancellationToken, poll: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<JobState<T>>>,
    {
        debug!(max_attempts = self.config.poll.max_attempts, "polling job");
        poll_until_ready(&self.config.poll, cancel, poll).await
    }
}

/// A required positive integer field.
///
/// Absent, `null`, `0` and `false` count as missing, like the endpoints always did.
fn required_id(body: &Value, key: &str) -> Result<i64> {
    let value = match body.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value),
    }
    .ok_or_else(|| CertificateError::invalid_request(format!("Missing {key} from request.")))?;

    value
        .as_i64()
        .filter(|id| *id > 0)
        .ok_or_else(|| CertificateError::invalid_request(format!("{key} must be an integer.")))
}

/// An optional boolean field; absent and `null` read as `false`.
fn optional_flag(body: &Value, key: &str) -> Result<bool> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(CertificateError::invalid_request(format!("{key} must be a boolean."))),
    }
}

fn require_object(body: &Value) -> Result<()> {
    if body.is_object() {
        Ok(())
    } else {
        Err(CertificateError::invalid_request("Missing body from request."))
    }
}

fn ensure_positive(value: i64, key: &str) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(CertificateError::invalid_request(format!("{key} must be a positive integer.")))
    }
}
