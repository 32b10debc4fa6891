//! Certificate field mapping
//!
//! Turns a resolved result entry plus the session-level metadata into the
//! normalized [`CertificateRecord`] consumed by the renderer. Naming fields
//! follow a fixed precedence (league naming overrides series naming); scoring
//! fields are never defaulted and a missing one is reported as
//! [`CertificateError::MalformedPayload`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logo::{LogoLookup, resolve_logo};
use crate::resolver::{ResolvedEntry, resolve};
use crate::schema::{ResultRow, SessionResult};
use crate::{CertificateError, Result};

/// Normalized race certificate
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
pub struct CertificateRecord {
    /// Overall finish position, 1-based
    pub position: u32,
    /// Finish position within the car class, 1-based
    pub position_in_class: u32,
    /// League name or series name
    pub event: String,
    /// Car class name
    pub class: String,
    /// Session start as an ISO-8601 instant
    pub date: String,
    /// Season label (same source as `season_short`)
    pub season: String,
    /// Short season label
    pub season_short: String,
    /// Long season label
    pub season_long: String,
    /// Whether the session belongs to a league
    pub league_event: bool,
    /// 1-based split number
    pub split: u32,
    /// Number of splits of the event
    pub splits: u32,
    /// Driver name, individual results only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    /// Team name, team results only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Comma-separated crew names, team results only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_members: Option<String>,
    /// Track name
    pub track_name: String,
    /// Logo asset, possibly empty
    pub logo: String,
    /// Car name
    pub car_name: String,
}

/// Event and season labels derived from a session, league naming first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionNaming {
    pub event: String,
    pub season: String,
    pub season_short: String,
    pub season_long: String,
    pub league_event: bool,
}

impl SessionNaming {
    pub fn of(session: &SessionResult) -> Self {
        let league = non_empty(session.league_name.as_deref());
        let league_season = non_empty(session.league_season_name.as_deref());

        let season_short =
            league_season.unwrap_or(session.season_short_name.as_str()).to_string();

        Self {
            event: league.unwrap_or(session.series_name.as_str()).to_string(),
            season: season_short.clone(),
            season_short,
            season_long: league_season.unwrap_or(session.season_name.as_str()).to_string(),
            league_event: league.is_some(),
        }
    }
}

/// Split number (1-based) and split count of a subsession.
pub fn split_of(session: &SessionResult) -> Result<(u32, u32)> {
    let index = session
        .associated_subsession_ids
        .iter()
        .position(|id| *id == session.subsession_id)
        .ok_or_else(|| CertificateError::malformed("associated_subsession_ids"))?;

    Ok((index as u32 + 1, session.associated_subsession_ids.len() as u32))
}

/// Render the session start time as an ISO-8601 instant with millisecond precision.
pub fn start_instant(session: &SessionResult) -> Result<String> {
    let raw = non_empty(session.start_time.as_deref())
        .ok_or_else(|| CertificateError::malformed("start_time"))?;
    let parsed =
        DateTime::parse_from_rfc3339(raw).map_err(|_| CertificateError::malformed("start_time"))?;

    Ok(parsed.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Map a resolved entry and its session into a certificate record.
///
/// The logo is the series logo or empty; special event logos are applied by
/// [`build_certificate`].
pub fn map(session: &SessionResult, resolved: &ResolvedEntry<'_>) -> Result<CertificateRecord> {
    let naming = SessionNaming::of(session);
    let (split, splits) = split_of(session)?;
    let date = start_instant(session)?;
    let track_name = session
        .track
        .as_ref()
        .and_then(|track| non_empty(Some(track.track_name.as_str())))
        .ok_or_else(|| CertificateError::malformed("track.track_name"))?
        .to_string();

    let row = resolved.scoring_row();
    let scoring = Scoring::of(row)?;

    let (driver, team, team_members) = match resolved {
        ResolvedEntry::Individual(row) => (Some(row.display_name.clone()), None, None),
        ResolvedEntry::Team { team, .. } => {
            let members =
                team.crew().iter().map(|m| m.display_name.as_str()).collect::<Vec<_>>().join(",");
            (None, Some(team.display_name.clone()), Some(members))
        }
    };

    Ok(CertificateRecord {
        position: scoring.position,
        position_in_class: scoring.position_in_class,
        event: naming.event,
        class: scoring.class,
        date,
        season: naming.season,
        season_short: naming.season_short,
        season_long: naming.season_long,
        league_event: naming.league_event,
        split,
        splits,
        driver,
        team,
        team_members,
        track_name,
        logo: non_empty(session.series_logo.as_deref()).unwrap_or_default().to_string(),
        car_name: scoring.car_name,
    })
}

/// Resolve a participant, map the certificate and apply special event logos.
pub fn build_certificate(
    session: &SessionResult,
    participant_id: i64,
    logos: &dyn LogoLookup,
) -> Result<CertificateRecord> {
    let resolved = resolve(session, participant_id)?;
    let mut record = map(session, &resolved)?;
    record.logo = resolve_logo(logos, &record.season_long, &record.logo);

    debug!(
        subsession_id = session.subsession_id,
        participant_id,
        position = record.position,
        team = resolved.is_team(),
        "certificate mapped"
    );

    Ok(record)
}

struct Scoring {
    position: u32,
    position_in_class: u32,
    class: String,
    car_name: String,
}

impl Scoring {
    fn of(row: &ResultRow) -> Result<Self> {
        let position =
            row.finish_position.ok_or_else(|| CertificateError::malformed("finish_position"))?;
        let position_in_class = row
            .finish_position_in_class
            .ok_or_else(|| CertificateError::malformed("finish_position_in_class"))?;
        let class = row
            .car_class_name
            .clone()
            .ok_or_else(|| CertificateError::malformed("car_class_name"))?;
        let car_name =
            row.car_name.clone().ok_or_else(|| CertificateError::malformed("car_name"))?;

        Ok(Self {
            position: position + 1,
            position_in_class: position_in_class + 1,
            class,
            car_name,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
