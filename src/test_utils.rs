//! Test utilities: payload builders, fixtures and an in-memory API
//!
//! Shared by unit tests and the benches. Builders produce minimal but complete
//! results payloads so each test only spells out what it asserts on.

#![cfg(any(test, feature = "benchmark"))]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;

use crate::api::DataApi;
use crate::schema::{CrewMember, ResultRow, SessionResult, SimSession, Track};
use crate::{CertificateError, Result};

/// Directory holding JSON fixtures.
pub fn test_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data")
}

/// Read a fixture from `test-data/`.
pub fn load_fixture(name: &str) -> anyhow::Result<String> {
    let path = test_data_dir().join(name);
    std::fs::read_to_string(&path).with_context(|| format!("reading fixture {}", path.display()))
}

/// Parse a results payload fixture.
pub fn load_session(name: &str) -> anyhow::Result<SessionResult> {
    let json = load_fixture(name)?;
    SessionResult::parse(&json).with_context(|| format!("parsing fixture {name}"))
}

/// A results payload whose race classification holds `rows`.
///
/// The subsession is the only split, started 2023-03-04 18:00 UTC at
/// Mount Panorama in the "GT Sprint Series".
pub fn race_session(subsession_id: i64, rows: Vec<ResultRow>) -> SessionResult {
    SessionResult {
        subsession_id,
        associated_subsession_ids: vec![subsession_id],
        season_name: "GT Sprint Series - 2023 Season 1".to_string(),
        season_short_name: "2023 S1".to_string(),
        season_year: Some(2023),
        season_quarter: Some(1),
        series_name: "GT Sprint Series".to_string(),
        series_short_name: "GT Sprint".to_string(),
        start_time: Some("2023-03-04T18:00:00Z".to_string()),
        track: Some(Track {
            track_id: Some(219),
            track_name: "Mount Panorama Circuit".to_string(),
            config_name: None,
        }),
        session_results: vec![SimSession {
            simsession_number: 0,
            simsession_type_name: Some("Race".to_string()),
            simsession_name: Some("RACE".to_string()),
            results: rows,
        }],
        ..Default::default()
    }
}

/// An individual result row in the GT3 class.
pub fn individual_row(
    cust_id: i64,
    name: &str,
    finish_position: u32,
    finish_position_in_class: u32,
    division: Option<i32>,
) -> ResultRow {
    ResultRow {
        cust_id: Some(cust_id),
        display_name: name.to_string(),
        finish_position: Some(finish_position),
        finish_position_in_class: Some(finish_position_in_class),
        car_class_name: Some("GT3 Class".to_string()),
        car_class_short_name: Some("GT3".to_string()),
        car_name: Some("Ferrari 296 GT3".to_string()),
        division,
        ..Default::default()
    }
}

/// A team result row with the given crew of `(cust_id, name, division)`.
pub fn team_row(
    name: &str,
    finish_position: u32,
    members: &[(i64, &str, Option<i32>)],
) -> ResultRow {
    crew(
        name,
        finish_position,
        members.iter().map(|(id, n, d)| (*id, n.to_string(), *d)).collect(),
    )
}

/// Owned-name variant of [`team_row`].
pub fn crew(
    name: &str,
    finish_position: u32,
    members: Vec<(i64, String, Option<i32>)>,
) -> ResultRow {
    ResultRow {
        team_id: Some(-(finish_position as i64) - 1),
        display_name: name.to_string(),
        finish_position: Some(finish_position),
        finish_position_in_class: Some(finish_position),
        car_class_name: Some("GT3 Class".to_string()),
        car_class_short_name: Some("GT3".to_string()),
        car_name: Some("Porsche 911 GT3 R".to_string()),
        driver_results: Some(
            members
                .into_iter()
                .map(|(cust_id, display_name, division)| CrewMember {
                    cust_id,
                    display_name,
                    division,
                })
                .collect(),
        ),
        ..Default::default()
    }
}

/// [`DataApi`] answering from a URL → body table and recording every call.
///
/// Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct FakeApi {
    responses: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `body`.
    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), body.into());
        self
    }

    /// Answer `url` with a signed link to `link_url`, which answers `body`.
    pub fn with_linked(
        self,
        url: impl Into<String>,
        link_url: &str,
        body: impl Into<String>,
    ) -> Self {
        self.with(url, format!(r#"{{"link": "{link_url}"}}"#)).with(link_url, body)
    }

    /// URLs requested so far, in request order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }
}

#[async_trait]
impl DataApi for FakeApi {
    async fn get(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).push(url.to_string());
        self.responses.get(url).cloned().ok_or_else(|| CertificateError::http_status(url, 404))
    }
}
