//! Error types for result resolution and certificate generation.
//!
//! Every failure the crate can produce is a variant of [`CertificateError`], so
//! callers can tell a participant lookup failure apart from a broken payload or
//! a transport problem and present a specific message for each.
//!
//! ## Error Categories
//!
//! - **Lookup Errors**: the classification or the participant is missing
//! - **Payload Errors**: required fields are absent or the body fails to parse
//! - **Request Errors**: handler input failed validation
//! - **Transport Errors**: authentication, HTTP and timeout failures
//! - **Job Errors**: an asynchronous job failed or never became ready
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use podiumprints::CertificateError;
//!
//! let error = CertificateError::participant_not_found(999, 501);
//! assert!(error.is_not_found());
//! assert!(!error.is_retryable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::time::Duration;
use thiserror::Error;

/// Result type alias for certificate operations.
pub type Result<T, E = CertificateError> = std::result::Result<T, E>;

/// Main error type for certificate operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CertificateError {
    #[error("Session {subsession_id} has no race classification")]
    MissingClassification { subsession_id: i64 },

    #[error("Driver id {participant_id} not found in session {subsession_id}")]
    ParticipantNotFound { participant_id: i64, subsession_id: i64 },

    #[error("Malformed payload: missing or invalid '{field}'")]
    MalformedPayload { field: String },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Not authenticated against the members API")]
    Unauthenticated,

    #[error("HTTP request to {url} failed")]
    Http {
        url: String,
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Operation timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("No data available: {context}")]
    NoData { context: String },

    #[error("Job failed: {reason}")]
    JobFailed { reason: String },

    #[error("Job still pending after {attempts} attempts")]
    JobPending { attempts: u32 },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl CertificateError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            CertificateError::Http { status, .. } => match status {
                Some(code) => *code == 429 || *code >= 500,
                None => true,
            },
            CertificateError::Timeout { .. } => true,
            CertificateError::JobPending { .. } => true,
            CertificateError::MissingClassification { .. } => false,
            CertificateError::ParticipantNotFound { .. } => false,
            CertificateError::MalformedPayload { .. } => false,
            CertificateError::Parse { .. } => false,
            CertificateError::InvalidRequest { .. } => false,
            CertificateError::Unauthenticated => false,
            CertificateError::NoData { .. } => false,
            CertificateError::JobFailed { .. } => false,
            CertificateError::Config { .. } => false,
        }
    }

    /// Whether the failure means the requested participant or classification
    /// does not exist in the payload, as opposed to a broken payload or transport.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CertificateError::MissingClassification { .. }
                | CertificateError::ParticipantNotFound { .. }
        )
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            CertificateError::MissingClassification { .. } => vec![
                "Check that the subsession id refers to a race session",
                "Wait until the race results are official",
            ],
            CertificateError::ParticipantNotFound { .. } => vec![
                "Check the driver id",
                "Check that the driver raced in this split",
                "Try the other splits of the same event",
            ],
            CertificateError::MalformedPayload { .. } => vec![
                "Verify the members API response format",
                "Retry once the results have been fully processed",
            ],
            CertificateError::Parse { .. } => vec![
                "Check data format compatibility",
                "Verify source data integrity",
            ],
            CertificateError::InvalidRequest { .. } => vec![
                "Provide all required request fields",
                "Use positive integer ids",
            ],
            CertificateError::Unauthenticated => vec![
                "Refresh the members API auth cookie",
                "Check the cookie expiry time",
            ],
            CertificateError::Http { .. } => vec![
                "Check network connectivity",
                "Back off when the rate limit is exhausted",
                "Verify the members API base URL",
            ],
            CertificateError::Timeout { .. } => vec![
                "Increase the request timeout",
                "Retry the request later",
            ],
            CertificateError::NoData { .. } => vec![
                "Check the season year and quarter",
                "Check that the driver took part in an official series",
            ],
            CertificateError::JobFailed { .. } => vec![
                "Submit the job again",
                "Inspect the job worker logs",
            ],
            CertificateError::JobPending { .. } => vec![
                "Increase the poll attempt budget",
                "Check that the job worker is running",
            ],
            CertificateError::Config { .. } => vec![
                "Check the configuration file",
                "Check PODIUMPRINTS_* environment variables",
            ],
        }
    }

    /// Helper constructor for participant lookup failures.
    pub fn participant_not_found(participant_id: i64, subsession_id: i64) -> Self {
        CertificateError::ParticipantNotFound { participant_id, subsession_id }
    }

    /// Helper constructor for missing required payload fields.
    pub fn malformed(field: impl Into<String>) -> Self {
        CertificateError::MalformedPayload { field: field.into() }
    }

    /// Helper constructor for parse failures.
    pub fn parse_error(context: impl Into<String>, details: impl ToString) -> Self {
        CertificateError::Parse { context: context.into(), details: details.to_string() }
    }

    /// Helper constructor for request validation failures.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        CertificateError::InvalidRequest { reason: reason.into() }
    }

    /// Helper constructor for non-success HTTP status codes.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        CertificateError::Http { url: url.into(), status: Some(status), source: None }
    }

    /// Helper constructor for configuration errors.
    pub fn config(reason: impl Into<String>) -> Self {
        CertificateError::Config { reason: reason.into() }
    }
}

impl From<reqwest::Error> for CertificateError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_else(|| "<unknown>".to_string());
        if err.is_timeout() {
            // reqwest does not report the configured duration back
            return CertificateError::Timeout { duration: Duration::ZERO };
        }
        CertificateError::Http {
            url,
            status: err.status().map(|s| s.as_u16()),
            source: Some(Box::new(err)),
        }
    }
}
