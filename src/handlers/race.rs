//! Race certificate endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::{Handlers, ensure_positive, require_object, required_id};
use crate::api::{DataApi, fetch_linked};
use crate::certificate::{CertificateRecord, build_certificate};
use crate::schema::SessionResult;
use crate::Result;

/// Race certificate request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResultsRequest {
    #[serde(rename = "subsessionid")]
    pub subsession_id: i64,
    #[serde(rename = "driverid")]
    pub driver_id: i64,
}

impl RaceResultsRequest {
    pub fn new(subsession_id: i64, driver_id: i64) -> Self {
        Self { subsession_id, driver_id }
    }

    /// Validate and read a JSON request body.
    pub fn from_json(body: &Value) -> Result<Self> {
        require_object(body)?;
        Ok(Self {
            subsession_id: required_id(body, "subsessionid")?,
            driver_id: required_id(body, "driverid")?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive(self.subsession_id, "subsessionid")?;
        ensure_positive(self.driver_id, "driverid")
    }
}

impl<A: DataApi> Handlers<A> {
    /// Fetch a subsession and map the driver's result into a certificate.
    pub async fn race_certificate(&self, request: RaceResultsRequest) -> Result<CertificateRecord> {
        request.validate()?;
        info!(
            subsession_id = request.subsession_id,
            driver_id = request.driver_id,
            "handling race results request"
        );

        let session = self.subsession(request.subsession_id).await?;
        let record = build_certificate(&session, request.driver_id, self.logos.as_ref())?;

        info!(
            subsession_id = request.subsession_id,
            driver_id = request.driver_id,
            position = record.position,
            split = record.split,
            "race certificate ready"
        );
        Ok(record)
    }

    /// Results payload of one subsession.
    pub(super) async fn subsession(&self, subsession_id: i64) -> Result<SessionResult> {
        let url = self.config.api_url(&format!(
            "/data/results/get?subsession_id={subsession_id}&include_licenses=false"
        ));
        fetch_linked(&self.api, &url).await
    }
}
