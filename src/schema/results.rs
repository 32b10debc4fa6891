//! Subsession result structures
//!
//! Shapes returned by `/data/results/get`. A single row in a simsession may be
//! an individual driver (it carries `cust_id`) or a team (it carries `team_id`
//! and the ordered crew in `driver_results`).

use serde::{Deserialize, Serialize};

use crate::{CertificateError, Result};

/// Full result payload for one subsession
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionResult {
    /// Subsession id (one split of the event)
    pub subsession_id: i64,
    /// All subsession ids of the same event; order defines split numbering
    pub associated_subsession_ids: Vec<i64>,
    /// Season id
    pub season_id: Option<i64>,
    /// Full season name
    pub season_name: String,
    /// Short season name
    pub season_short_name: String,
    /// Season year
    pub season_year: Option<i32>,
    /// Season quarter
    pub season_quarter: Option<i32>,
    /// Series id
    pub series_id: Option<i64>,
    /// Series name
    pub series_name: String,
    /// Series short name
    pub series_short_name: String,
    /// Series logo asset file name
    pub series_logo: Option<String>,
    /// Session start time (RFC 3339)
    pub start_time: Option<String>,
    /// League name, set for league sessions only
    pub league_name: Option<String>,
    /// League season name, set for league sessions only
    pub league_season_name: Option<String>,
    /// Track details
    pub track: Option<Track>,
    /// Per-simsession results (practice, qualifying, race)
    pub session_results: Vec<SimSession>,
}

impl SessionResult {
    /// Parse a results body returned by the members API.
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| CertificateError::parse_error("SessionResult deserialization", e))
    }

    /// The simsession with the given number, if present.
    pub fn simsession(&self, number: i32) -> Option<&SimSession> {
        self.session_results.iter().find(|s| s.simsession_number == number)
    }
}

/// Track information
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Track {
    /// Track id
    pub track_id: Option<i64>,
    /// Track name
    pub track_name: String,
    /// Track configuration name
    pub config_name: Option<String>,
}

/// One simsession of a subsession (0 is the race classification)
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimSession {
    /// Simsession number; 0 is the race, negative numbers precede it
    pub simsession_number: i32,
    /// Simsession type name
    pub simsession_type_name: Option<String>,
    /// Simsession name
    pub simsession_name: Option<String>,
    /// Result rows in finishing order as supplied by the API
    pub results: Vec<ResultRow>,
}

/// A single result row, individual or team
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResultRow {
    /// Driver id, individual rows only
    pub cust_id: Option<i64>,
    /// Team id (negative in the API), team rows only
    pub team_id: Option<i64>,
    /// Driver or team display name
    pub display_name: String,
    /// Overall finish position, 0-based
    pub finish_position: Option<u32>,
    /// Finish position within the car class, 0-based
    pub finish_position_in_class: Option<u32>,
    /// Car class name
    pub car_class_name: Option<String>,
    /// Car class short name
    pub car_class_short_name: Option<String>,
    /// Car name
    pub car_name: Option<String>,
    /// Division of an individual driver
    pub division: Option<i32>,
    /// Team crew, team rows only
    pub driver_results: Option<Vec<CrewMember>>,
}

impl ResultRow {
    /// Crew of a team row; empty for individual rows.
    pub fn crew(&self) -> &[CrewMember] {
        self.driver_results.as_deref().unwrap_or(&[])
    }

    /// Whether this row describes a team.
    pub fn is_team(&self) -> bool {
        self.cust_id.is_none() && (self.team_id.is_some() || self.driver_results.is_some())
    }

    /// The crew member with the given driver id.
    pub fn crew_member(&self, cust_id: i64) -> Option<&CrewMember> {
        self.crew().iter().find(|member| member.cust_id == cust_id)
    }
}

/// One driver within a team row
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CrewMember {
    /// Driver id
    pub cust_id: i64,
    /// Driver display name
    pub display_name: String,
    /// Driver division
    pub division: Option<i32>,
}
