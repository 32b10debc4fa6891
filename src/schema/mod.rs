//! Members API payload shapes
//!
//! Raw, read-only structures deserialized from the iRacing members data API.
//! Every struct is lenient (`#[serde(default)]`) so that partially populated
//! payloads still deserialize; required pieces are checked by the resolver and
//! the certificate mapper, which report them as
//! [`MalformedPayload`](crate::CertificateError::MalformedPayload) instead of
//! panicking.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │               Members data API                 │
//! │                                                │
//! │  /data/...  ──► LinkResponse ──► signed link   │
//! │                                      │         │
//! │                                      ▼         │
//! │         SessionResult / SeasonStandingsResponse│
//! │                       │                        │
//! │                       ▼                        │
//! │              ChunkInfo ──► chunk rows          │
//! └────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

pub mod member;
pub mod results;
pub mod season;

pub use member::{Member, MemberResponse, SeriesAsset, SeriesAssets};
pub use results::{CrewMember, ResultRow, SessionResult, SimSession, Track};
pub use season::{
    SeasonStandingsResponse, SeriesSearchData, SeriesSearchResponse, SeriesSearchResult,
    StandingRow,
};

/// First-hop response of the members API: a signed URL holding the real body.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinkResponse {
    /// Signed download URL
    pub link: String,
    /// Link expiry as reported by the API
    pub expires: Option<String>,
}

/// Chunked download description used by search and standings endpoints.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkInfo {
    /// Number of chunk files
    pub num_chunks: u32,
    /// Total number of rows across all chunks
    pub rows: Option<u32>,
    /// Prefix every chunk file name is appended to
    pub base_download_url: String,
    /// Chunk file names, in row order
    pub chunk_file_names: Vec<String>,
}

impl ChunkInfo {
    /// Full download URLs for every chunk, in row order.
    pub fn chunk_urls(&self) -> Vec<String> {
        self.chunk_file_names
            .iter()
            .map(|name| format!("{}{}", self.base_download_url, name))
            .collect()
    }

    /// Whether the query matched nothing.
    pub fn is_empty(&self) -> bool {
        self.num_chunks == 0 || self.chunk_file_names.is_empty()
    }
}
