//! reqwest-backed members API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::COOKIE;
use tracing::{debug, warn};

use super::{AuthSource, DataApi};
use crate::config::Config;
use crate::{CertificateError, Result};

const RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Members API client that authenticates every request with the cached cookie
pub struct MembersClient<A> {
    http: Client,
    auth: A,
    timeout: Duration,
}

impl<A: AuthSource> MembersClient<A> {
    pub fn new(config: &Config, auth: A) -> Result<Self> {
        let timeout = config.request_timeout();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CertificateError::config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { http, auth, timeout })
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    fn transport_error(&self, err: reqwest::Error) -> CertificateError {
        if err.is_timeout() {
            CertificateError::Timeout { duration: self.timeout }
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl<A: AuthSource> DataApi for MembersClient<A> {
    async fn get(&self, url: &str) -> Result<String> {
        let cookie = self.auth.cookie().await?.ok_or(CertificateError::Unauthenticated)?;

        let response = self
            .http
            .get(url)
            .header(COOKIE, cookie)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if let Some(remaining) =
            response.headers().get(RATELIMIT_REMAINING).and_then(|v| v.to_str().ok())
        {
            debug!(url, remaining, "members API rate limit");
        }

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "members API request failed");
            return Err(CertificateError::http_status(url, status.as_u16()));
        }

        response.text().await.map_err(|e| self.transport_error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CookieCache;

    #[tokio::test]
    async fn missing_cookie_fails_before_any_request() {
        let config = Config { api_base_url: "http://127.0.0.1:9".to_string(), ..Config::default() };
        let client = MembersClient::new(&config, CookieCache::new()).unwrap();

        let result = client.get(&config.api_url("/data/results/get")).await;
        assert!(matches!(result, Err(CertificateError::Unauthenticated)));
    }

    #[test]
    fn client_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MembersClient<CookieCache>>();
    }
}
