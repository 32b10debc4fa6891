//! Member and series asset structures

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Response of `/data/member/get` after the link hop
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MemberResponse {
    /// Requested members
    pub members: Vec<Member>,
}

/// A single member
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Member {
    /// Driver id
    pub cust_id: i64,
    /// Display name
    pub display_name: String,
    /// Club id
    pub club_id: i64,
    /// Club name
    pub club_name: Option<String>,
}

/// Asset record of one series
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeriesAsset {
    /// Series id
    pub series_id: Option<i64>,
    /// Logo file name
    pub logo: Option<String>,
}

/// Series assets keyed by series id (as a string, the way the API keys them)
pub type SeriesAssets = HashMap<String, SeriesAsset>;
