//! Auth cookie caching
//!
//! Issuing credentials happens elsewhere; this module only keeps the current
//! members API cookie and its expiry, and hands it out while it is valid.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::Result;

/// Source of the members API auth cookie
#[async_trait]
pub trait AuthSource: Send + Sync {
    /// Current cookie header value, `None` when absent or expired.
    async fn cookie(&self) -> Result<Option<String>>;
}

/// A cookie and the instant it stops being valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCookie {
    pub cookie: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthCookie {
    /// Whether the cookie is still usable at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.cookie.is_empty() && self.expires_at > now
    }
}

/// In-memory cookie cache
#[derive(Debug, Default)]
pub struct CookieCache {
    current: RwLock<Option<AuthCookie>>,
}

impl CookieCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cookie valid for `ttl` from now.
    pub fn store(&self, cookie: impl Into<String>, ttl: Duration) {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
        self.store_until(cookie, Utc::now() + ttl);
    }

    /// Store a cookie valid until `expires_at`.
    pub fn store_until(&self, cookie: impl Into<String>, expires_at: DateTime<Utc>) {
        let entry = AuthCookie { cookie: cookie.into(), expires_at };
        debug!(expires_at = %entry.expires_at, "storing auth cookie");
        *self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(entry);
    }

    /// Cookie valid at `now`, if any.
    pub fn current_at(&self, now: DateTime<Utc>) -> Option<String> {
        let guard = self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        match guard.as_ref() {
            Some(entry) if entry.is_valid_at(now) => Some(entry.cookie.clone()),
            Some(_) => {
                debug!("auth cookie expired");
                None
            }
            None => None,
        }
    }

    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

#[async_trait]
impl AuthSource for CookieCache {
    async fn cookie(&self) -> Result<Option<String>> {
        Ok(self.current_at(Utc::now()))
    }
}
