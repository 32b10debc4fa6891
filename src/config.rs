//! Runtime configuration
//!
//! Configuration is read from YAML (see [`Config::from_yaml_str`]) and can be
//! overridden through `PODIUMPRINTS_*` environment variables. Every field has
//! a default, so an empty document is a valid configuration.
//!
//! ```yaml
//! api_base_url: https://members-ng.iracing.com
//! request_timeout_secs: 5
//! poll:
//!   initial_delay_ms: 4000
//!   max_attempts: 30
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::job::PollPolicy;
use crate::{CertificateError, Result};

/// Environment variable naming a YAML configuration file.
pub const CONFIG_PATH_ENV: &str = "PODIUMPRINTS_CONFIG";
/// Environment override for [`Config::api_base_url`].
pub const API_BASE_URL_ENV: &str = "PODIUMPRINTS_API_BASE_URL";
/// Environment override for [`Config::request_timeout_secs`].
pub const REQUEST_TIMEOUT_ENV: &str = "PODIUMPRINTS_REQUEST_TIMEOUT_SECS";

/// Crate configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Members API base URL, without a trailing slash
    pub api_base_url: String,
    /// Timeout of a single HTTP request
    pub request_timeout_secs: u64,
    /// Lifetime of a members API auth cookie
    pub cookie_ttl_secs: u64,
    /// Logo used when neither a special event nor a series logo exists
    pub no_logo_asset: String,
    /// Job polling policy
    pub poll: PollPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://members-ng.iracing.com".to_string(),
            request_timeout_secs: 5,
            cookie_ttl_secs: 55 * 60,
            no_logo_asset: "nologofound.png".to_string(),
            poll: PollPolicy::default(),
        }
    }
}

impl Config {
    /// Parse a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml_ng::from_str(yaml)
            .map_err(|e| CertificateError::config(format!("YAML parsing failed: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            CertificateError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Defaults, then the file named by `PODIUMPRINTS_CONFIG`, then variable overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match var(CONFIG_PATH_ENV) {
            Some(path) => {
                debug!(path = %path, "loading configuration file");
                Self::load(path)?
            }
            None => Self::default(),
        };

        if let Some(url) = var(API_BASE_URL_ENV) {
            config.api_base_url = url;
        }
        if let Some(timeout) = var(REQUEST_TIMEOUT_ENV) {
            config.request_timeout_secs = timeout.trim().parse().map_err(|_| {
                CertificateError::config(format!("{REQUEST_TIMEOUT_ENV} must be an integer"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(CertificateError::config("api_base_url is empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(CertificateError::config("request_timeout_secs must be positive"));
        }
        if self.cookie_ttl_secs == 0 {
            return Err(CertificateError::config("cookie_ttl_secs must be positive"));
        }
        self.poll.validate()
    }

    /// Members API URL for an API path such as `/data/results/get`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cookie_ttl(&self) -> Duration {
        Duration::from_secs(self.cookie_ttl_secs)
    }
}
