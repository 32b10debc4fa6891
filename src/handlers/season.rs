//! Season participation and season certificate endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{Handlers, ensure_positive, optional_flag, require_object, required_id};
use crate::api::{DataApi, fetch_chunks, fetch_json, fetch_linked};
use crate::resolver::resolve;
use crate::schema::{
    MemberResponse, SeasonStandingsResponse, SeriesAssets, SeriesSearchResponse,
    SeriesSearchResult, StandingRow,
};
use crate::season::{SeasonParticipation, SeasonRecord, participation, season_logo, season_record};
use crate::{CertificateError, Result};

/// Club id the standings endpoint reads as "all clubs".
pub const WORLD_CLUB_ID: i64 = -1;

/// Series a driver raced in during one season quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonParticipationRequest {
    pub year: i32,
    /// Season quarter, 1 to 4
    pub quarter: u8,
    #[serde(rename = "driverid")]
    pub driver_id: i64,
}

impl SeasonParticipationRequest {
    pub fn new(year: i32, quarter: u8, driver_id: i64) -> Self {
        Self { year, quarter, driver_id }
    }

    pub fn from_json(body: &Value) -> Result<Self> {
        require_object(body)?;
        let year = required_id(body, "year")?;
        let quarter = required_id(body, "quarter")?;
        let driver_id = required_id(body, "driverid")?;

        let request = Self {
            year: i32::try_from(year)
                .map_err(|_| CertificateError::invalid_request("year must be an integer."))?,
            quarter: u8::try_from(quarter).map_err(|_| quarter_out_of_range())?,
            driver_id,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive(self.year.into(), "year")?;
        if !(1..=4).contains(&self.quarter) {
            return Err(quarter_out_of_range());
        }
        ensure_positive(self.driver_id, "driverid")
    }
}

fn quarter_out_of_range() -> CertificateError {
    CertificateError::invalid_request("quarter must be between 1 and 4.")
}

/// One driver's standing in one season and car class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonResultsRequest {
    #[serde(rename = "seasonid")]
    pub season_id: i64,
    #[serde(rename = "carclassid")]
    pub car_class_id: i64,
    #[serde(rename = "driverid")]
    pub driver_id: i64,
    /// A subsession the driver raced in, used for the division lookup
    #[serde(rename = "sessionid")]
    pub session_id: i64,
    /// Rank within the driver's club instead of world-wide
    #[serde(default)]
    pub club: bool,
}

impl SeasonResultsRequest {
    pub fn from_json(body: &Value) -> Result<Self> {
        require_object(body)?;
        Ok(Self {
            car_class_id: required_id(body, "carclassid")?,
            season_id: required_id(body, "seasonid")?,
            driver_id: required_id(body, "driverid")?,
            session_id: required_id(body, "sessionid")?,
            club: optional_flag(body, "club")?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive(self.car_class_id, "carclassid")?;
        ensure_positive(self.season_id, "seasonid")?;
        ensure_positive(self.driver_id, "driverid")?;
        ensure_positive(self.session_id, "sessionid")
    }
}

impl<A: DataApi> Handlers<A> {
    /// Official series a driver entered in a season quarter, one entry per
    /// season, car class and car.
    pub async fn season_participation(
        &self,
        request: SeasonParticipationRequest,
    ) -> Result<Vec<SeasonParticipation>> {
        request.validate()?;
        info!(
            year = request.year,
            quarter = request.quarter,
            driver_id = request.driver_id,
            "handling season participation request"
        );

        let url = self.config.api_url(&format!(
            "/data/results/search_series?season_year={}&season_quarter={}\
             &official_only=true&event_types=5&cust_id={}",
            request.year, request.quarter, request.driver_id
        ));
        let search: SeriesSearchResponse = fetch_json(&self.api, &url).await?;
        let chunks = &search.data.chunk_info;
        if chunks.is_empty() {
            return Err(CertificateError::NoData {
                context: format!(
                    "no series participation for driver {} in {} season {}",
                    request.driver_id, request.year, request.quarter
                ),
            });
        }

        let rows: Vec<SeriesSearchResult> = fetch_chunks(&self.api, chunks).await?;
        let entries = participation(rows);
        info!(driver_id = request.driver_id, series = entries.len(), "season participation ready");
        Ok(entries)
    }

    /// Season standing of one driver, world-wide or within their club.
    pub async fn season_certificate(&self, request: SeasonResultsRequest) -> Result<SeasonRecord> {
        request.validate()?;
        info!(
            season_id = request.season_id,
            car_class_id = request.car_class_id,
            driver_id = request.driver_id,
            club = request.club,
            "handling season results request"
        );

        let club_id = if request.club {
            self.club_of(request.driver_id).await?
        } else {
            WORLD_CLUB_ID
        };

        let session = self.subsession(request.session_id).await?;
        let entry = resolve(&session, request.driver_id)?;
        let division = entry.division().ok_or_else(|| CertificateError::malformed("division"))?;
        let car_class = entry
            .scoring_row()
            .car_class_name
            .clone()
            .ok_or_else(|| CertificateError::malformed("car_class_name"))?;
        debug!(session_id = request.session_id, division, "resolved season division");

        let url = self.config.api_url(&format!(
            "/data/stats/season_driver_standings?season_id={}&car_class_id={}\
             &division={division}&club_id={club_id}",
            request.season_id, request.car_class_id
        ));
        let standings: SeasonStandingsResponse = fetch_linked(&self.api, &url).await?;

        let assets = match self.logos.lookup(standings.season_name.trim_end()) {
            Some(_) => None,
            None => self.series_assets().await,
        };
        let logo = season_logo(
            self.logos.as_ref(),
            &standings,
            assets.as_ref(),
            &self.config.no_logo_asset,
        );

        let rows: Vec<StandingRow> = fetch_chunks(&self.api, &standings.chunk_info).await?;
        let record = season_record(&standings, &rows, request.driver_id, &car_class, logo)?;

        info!(
            season_id = request.season_id,
            driver_id = request.driver_id,
            position = record.position,
            "season certificate ready"
        );
        Ok(record)
    }

    async fn club_of(&self, driver_id: i64) -> Result<i64> {
        let url = self.config.api_url(&format!("/data/member/get?cust_ids={driver_id}"));
        let response: MemberResponse = fetch_linked(&self.api, &url).await?;
        response
            .members
            .first()
            .map(|member| member.club_id)
            .ok_or_else(|| CertificateError::malformed("members"))
    }

    /// Series asset table; a failed download only costs the series logo.
    async fn series_assets(&self) -> Option<SeriesAssets> {
        let url = self.config.api_url("/data/series/assets");
        match fetch_linked::<SeriesAssets>(&self.api, &url).await {
            Ok(assets) => Some(assets),
            Err(e) => {
                warn!(error = %e, "series assets unavailable, using fallback logo");
                None
            }
        }
    }
}
