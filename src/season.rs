//! Season participation and season certificate records
//!
//! Pure transformations behind the season certificate flow: collapsing a
//! driver's official races into one entry per season/class/car, locating the
//! driver in the season standings, and choosing a season logo.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::logo::LogoLookup;
use crate::schema::{SeasonStandingsResponse, SeriesAssets, SeriesSearchResult, StandingRow};
use crate::{CertificateError, Result};

/// One season/class/car combination a driver raced in
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
pub struct SeasonParticipation {
    pub season_id: i64,
    pub series: String,
    pub series_short: String,
    pub car_class: String,
    pub car_class_id: i64,
    pub car_name: String,
    /// A subsession of this season, used later for the division lookup
    pub session_id: i64,
}

impl From<SeriesSearchResult> for SeasonParticipation {
    fn from(row: SeriesSearchResult) -> Self {
        Self {
            season_id: row.season_id,
            series: row.series_name,
            series_short: row.series_short_name,
            car_class: row.car_class_name,
            car_class_id: row.car_class_id,
            car_name: row.car_name,
            session_id: row.subsession_id,
        }
    }
}

/// Collapse search rows to one entry per (season, car class, car).
///
/// The first row of each combination is kept; the result is sorted by series
/// name, case-insensitively, keeping source order for ties.
pub fn participation(rows: Vec<SeriesSearchResult>) -> Vec<SeasonParticipation> {
    let mut seen = HashSet::new();
    let mut entries: Vec<SeasonParticipation> = rows
        .into_iter()
        .filter(|row| seen.insert((row.season_id, row.car_class_id, row.car_name.clone())))
        .map(SeasonParticipation::from)
        .collect();

    entries.sort_by_cached_key(|entry| entry.series.to_lowercase());
    entries
}

/// Season certificate data for one driver
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "typescript", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
pub struct SeasonRecord {
    /// Rank within the standings bucket
    pub position: u32,
    pub driver: String,
    pub division: i32,
    pub club: String,
    pub starts: u32,
    pub wins: u32,
    pub poles: u32,
    pub points: i64,
    pub logo: String,
    pub series: String,
    /// Car class name taken from the driver's race entry
    pub car_class: String,
}

/// Build the season record for `driver_id` from the merged standings rows.
pub fn season_record(
    standings: &SeasonStandingsResponse,
    rows: &[StandingRow],
    driver_id: i64,
    car_class: &str,
    logo: String,
) -> Result<SeasonRecord> {
    let row = rows.iter().find(|row| row.cust_id == driver_id).ok_or(
        CertificateError::ParticipantNotFound {
            participant_id: driver_id,
            subsession_id: standings.season_id.unwrap_or_default(),
        },
    )?;

    Ok(SeasonRecord {
        position: row.rank,
        driver: row.display_name.clone(),
        division: row.division,
        club: row.club_name.clone(),
        starts: row.starts,
        wins: row.wins,
        poles: row.poles,
        points: row.points,
        logo,
        series: standings.series_name.clone(),
        car_class: car_class.to_string(),
    })
}

/// Logo for a season: special event table, then series assets, then `fallback`.
pub fn season_logo(
    logos: &dyn LogoLookup,
    standings: &SeasonStandingsResponse,
    assets: Option<&SeriesAssets>,
    fallback: &str,
) -> String {
    if let Some(special) = logos.lookup(standings.season_name.trim_end()) {
        return special;
    }

    assets
        .and_then(|assets| assets.get(&standings.series_id.to_string()))
        .and_then(|asset| asset.logo.clone())
        .filter(|logo| !logo.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logo::{NoSpecialLogos, SpecialEventLogos};
    use crate::schema::SeriesAsset;

    fn search_row(
        season_id: i64,
        series: &str,
        class_id: i64,
        car: &str,
        subsession: i64,
    ) -> SeriesSearchResult {
        SeriesSearchResult {
            season_id,
            series_name: series.to_string(),
            series_short_name: series.to_string(),
            car_class_id: class_id,
            car_class_name: format!("Class {class_id}"),
            car_name: car.to_string(),
            subsession_id: subsession,
        }
    }

    #[test]
    fn participation_keeps_first_of_each_combination() {
        let rows = vec![
            search_row(10, "Mazda Cup", 74, "Mazda MX-5", 1001),
            search_row(10, "Mazda Cup", 74, "Mazda MX-5", 1002),
            search_row(20, "GT Sprint", 2708, "Audi R8", 2001),
            search_row(20, "GT Sprint", 2708, "BMW M4 GT3", 2002),
        ];

        let entries = participation(rows);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].series, "GT Sprint");
        assert_eq!(entries[0].car_name, "Audi R8");
        assert_eq!(entries[1].car_name, "BMW M4 GT3");
        assert_eq!(entries[2].series, "Mazda Cup");
        assert_eq!(entries[2].session_id, 1001);
    }

    #[test]
    fn participation_sort_ignores_case() {
        let rows = vec![
            search_row(1, "zeta Series", 1, "A", 1),
            search_row(2, "Alpha Series", 1, "A", 2),
            search_row(3, "beta Series", 1, "A", 3),
        ];

        let series: Vec<String> = participation(rows).into_iter().map(|e| e.series).collect();
        assert_eq!(series, ["Alpha Series", "beta Series", "zeta Series"]);
    }

    fn standings() -> SeasonStandingsResponse {
        SeasonStandingsResponse {
            season_id: Some(4242),
            season_name: "GT Sprint Series - 2023 Season 1".to_string(),
            series_id: 77,
            series_name: "GT Sprint Series".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn season_record_copies_driver_row() {
        let rows = vec![
            StandingRow { cust_id: 1, display_name: "Other".into(), rank: 1, ..Default::default() },
            StandingRow {
                cust_id: 100,
                display_name: "Jane Doe".into(),
                club_name: "Australia".into(),
                division: 3,
                points: 512,
                poles: 2,
                rank: 4,
                starts: 11,
                wins: 1,
                ..Default::default()
            },
        ];

        let record = season_record(&standings(), &rows, 100, "GT3 Class", "gt.png".into()).unwrap();

        assert_eq!(record.position, 4);
        assert_eq!(record.driver, "Jane Doe");
        assert_eq!(record.division, 3);
        assert_eq!(record.club, "Australia");
        assert_eq!(record.points, 512);
        assert_eq!(record.series, "GT Sprint Series");
        assert_eq!(record.car_class, "GT3 Class");
        assert_eq!(record.logo, "gt.png");
    }

    #[test]
    fn absent_driver_is_not_found() {
        let err = season_record(&standings(), &[], 100, "GT3 Class", String::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn season_logo_precedence() {
        let mut assets = SeriesAssets::new();
        let asset = SeriesAsset { series_id: Some(77), logo: Some("gt.png".into()) };
        assets.insert("77".to_string(), asset);

        assert_eq!(season_logo(&NoSpecialLogos, &standings(), Some(&assets), "none.png"), "gt.png");
        assert_eq!(season_logo(&NoSpecialLogos, &standings(), None, "none.png"), "none.png");

        let mut special = standings();
        special.season_name = "2023 Road America 500".to_string();
        assert_eq!(
            season_logo(&SpecialEventLogos, &special, Some(&assets), "none.png"),
            "iRSE_ROAD_AMERICA_500.png"
        );
    }
}
