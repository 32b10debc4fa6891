//! Season participation and standings structures

use serde::{Deserialize, Serialize};

use super::ChunkInfo;

/// Response of `/data/results/search_series`
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeriesSearchResponse {
    /// Search payload
    pub data: SeriesSearchData,
}

/// Search payload wrapper
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeriesSearchData {
    /// Whether the search succeeded
    pub success: Option<bool>,
    /// Chunked rows
    pub chunk_info: ChunkInfo,
}

/// One row of a series search chunk (one official race the driver entered)
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeriesSearchResult {
    /// Season id
    pub season_id: i64,
    /// Series name
    pub series_name: String,
    /// Series short name
    pub series_short_name: String,
    /// Car class id
    pub car_class_id: i64,
    /// Car class name
    pub car_class_name: String,
    /// Car name
    pub car_name: String,
    /// Subsession id of this race
    pub subsession_id: i64,
}

/// Response body of `/data/stats/season_driver_standings` after the link hop
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeasonStandingsResponse {
    /// Season id
    pub season_id: Option<i64>,
    /// Season name, used for special event logos
    pub season_name: String,
    /// Series id, used for the series asset lookup
    pub series_id: i64,
    /// Series name
    pub series_name: String,
    /// Car class id
    pub car_class_id: Option<i64>,
    /// Division filter applied
    pub division: Option<i32>,
    /// Chunked standings rows
    pub chunk_info: ChunkInfo,
}

/// One driver row of the season standings
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StandingRow {
    /// Driver id
    pub cust_id: i64,
    /// Driver display name
    pub display_name: String,
    /// Club name
    pub club_name: String,
    /// Club id
    pub club_id: Option<i64>,
    /// Division
    pub division: i32,
    /// Championship points
    pub points: i64,
    /// Pole positions
    pub poles: u32,
    /// Rank within the standings bucket
    pub rank: u32,
    /// Race starts
    pub starts: u32,
    /// Race wins
    pub wins: u32,
}
