//! Race certificate flow against canned members API responses

mod common;

use common::{API, CannedApi, fixture};
use podiumprints::format::{
    car_text, position_text, race_file_name, strip_trailing_digits, track_text,
};
use podiumprints::{CertificateError, Config, Handlers, RaceResultsRequest};
use serde_json::json;

fn results_url(subsession_id: i64) -> String {
    format!("{API}/data/results/get?subsession_id={subsession_id}&include_licenses=false")
}

#[tokio::test]
async fn official_race_certificate() -> anyhow::Result<()> {
    let api = CannedApi::new().linked(results_url(61540155), fixture("results_individual.json")?);
    let handlers = Handlers::new(api, Config::default());

    let body = json!({"subsessionid": 61540155, "driverid": 123456});
    let request = RaceResultsRequest::from_json(&body)?;
    let record = handlers.race_certificate(request).await?;

    assert_eq!(record.driver.as_deref(), Some("Sam Taylor2"));
    assert_eq!(strip_trailing_digits("Sam Taylor2"), "Sam Taylor");
    assert_eq!(record.position, 4);
    assert_eq!(record.position_in_class, 3);
    assert_eq!((record.split, record.splits), (2, 3));
    assert_eq!(position_text(record.position_in_class, ""), "3rd");
    assert_eq!(car_text(&record.class, &record.car_name), "GT3 Class | Ferrari 296 GT3");
    assert_eq!(
        race_file_name(&record),
        "GT Sprint Series by Simucube 2023-04-18T18:45:00.000Z.png"
    );
    assert_eq!(track_text(&record.track_name), "Mount Panorama Circuit");
    Ok(())
}

#[tokio::test]
async fn team_member_gets_team_certificate() -> anyhow::Result<()> {
    let api = CannedApi::new().linked(results_url(70000002), fixture("results_team.json")?);
    let handlers = Handlers::new(api, Config::default());

    let record = handlers.race_certificate(RaceResultsRequest::new(70000002, 333333)).await?;

    assert_eq!(record.team.as_deref(), Some("Late Brakers"));
    assert_eq!(record.team_members.as_deref(), Some("Riley Stone"));
    assert_eq!(record.logo, "iRSE_ROAD_AMERICA_500.png");
    assert_eq!(record.car_name, "BMW M Hybrid V8");
    Ok(())
}

#[tokio::test]
async fn certificate_json_uses_front_end_names() -> anyhow::Result<()> {
    let api = CannedApi::new().linked(results_url(80000001), fixture("results_league.json")?);
    let handlers = Handlers::new(api, Config::default());

    let record = handlers.race_certificate(RaceResultsRequest::new(80000001, 555555)).await?;
    let json = serde_json::to_value(&record)?;

    assert_eq!(json["Event"], "Thursday Night Thunder");
    assert_eq!(json["LeagueEvent"], true);
    assert_eq!(json["SeasonShort"], "Autumn Championship 2023");
    assert_eq!(json["Date"], "2023-11-02T19:30:00.000Z");
    assert_eq!(json["Driver"], "Morgan Ash");
    assert!(json.get("TeamMembers").is_none());
    Ok(())
}

#[tokio::test]
async fn driver_outside_the_race_is_not_found() -> anyhow::Result<()> {
    let api = CannedApi::new().linked(results_url(61540155), fixture("results_individual.json")?);
    let handlers = Handlers::new(api, Config::default());

    let err = handlers.race_certificate(RaceResultsRequest::new(61540155, 42)).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Driver id 42 not found in session 61540155");
    assert!(!err.is_retryable());
    Ok(())
}

#[test]
fn invalid_body_is_rejected() {
    let body = json!({"subsessionid": "abc", "driverid": 1});
    let err = RaceResultsRequest::from_json(&body).unwrap_err();
    assert!(matches!(err, CertificateError::InvalidRequest { .. }));
    assert_eq!(err.to_string(), "Invalid request: subsessionid must be an integer.");
}
