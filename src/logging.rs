//! Tracing subscriber setup
//!
//! The library only emits `tracing` events. Binaries and serverless entry
//! points call [`init_tracing`] once at startup; the filter comes from
//! `RUST_LOG` and defaults to [`DEFAULT_FILTER`].

use tracing_subscriber::EnvFilter;

use crate::{CertificateError, Result};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Install a formatted subscriber as the global default.
///
/// Fails when a global subscriber is already installed.
pub fn init_tracing() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| CertificateError::config(format!("cannot install tracing subscriber: {e}")))
}
