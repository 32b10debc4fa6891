//! Shared helpers for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use podiumprints::api::DataApi;
use podiumprints::{CertificateError, Result};

pub const API: &str = "https://members-ng.iracing.com";

pub fn fixture(name: &str) -> anyhow::Result<String> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data").join(name);
    std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

/// Members API double serving canned bodies behind signed links.
#[derive(Default)]
pub struct CannedApi {
    bodies: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl CannedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// Serve `body` behind a `{ "link": .. }` document at `url`.
    pub fn linked(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        let url = url.into();
        let link = format!("https://signed.test/{}", self.bodies.len());
        self.body(url, format!(r#"{{"link": "{link}"}}"#)).body(link, body)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataApi for CannedApi {
    async fn get(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.bodies.get(url).cloned().ok_or_else(|| CertificateError::http_status(url, 404))
    }
}
