//! Season participation and season certificate flows

mod common;

use common::{API, CannedApi, fixture};
use podiumprints::format::season_file_name;
use podiumprints::job::{participation_key, season_certificate_key};
use podiumprints::{
    CertificateError, Config, Handlers, SeasonParticipationRequest, SeasonResultsRequest,
};
use serde_json::json;

fn standings(division: i32, club_id: i64) -> String {
    format!(
        "{API}/data/stats/season_driver_standings?season_id=4242&car_class_id=74\
         &division={division}&club_id={club_id}"
    )
}

fn season_api() -> anyhow::Result<CannedApi> {
    Ok(CannedApi::new()
        .linked(
            format!("{API}/data/results/get?subsession_id=61540155&include_licenses=false"),
            fixture("results_individual.json")?,
        )
        .linked(
            standings(4, -1),
            json!({
                "season_id": 4242,
                "season_name": "GT Sprint Series by Simucube - 2023 Season 2",
                "series_id": 77,
                "series_name": "GT Sprint Series by Simucube",
                "car_class_id": 74,
                "division": 4,
                "chunk_info": {
                    "num_chunks": 1,
                    "base_download_url": "https://chunks.test/standings/",
                    "chunk_file_names": ["page0.json"]
                }
            })
            .to_string(),
        )
        .body(
            "https://chunks.test/standings/page0.json",
            json!([
                {"cust_id": 9, "display_name": "Someone Else", "rank": 1, "division": 4,
                 "points": 900},
                {"cust_id": 123456, "display_name": "Sam Taylor2", "club_name": "UK and I",
                 "division": 4, "points": 415, "poles": 0, "rank": 17, "starts": 6, "wins": 1}
            ])
            .to_string(),
        ))
}

#[tokio::test]
async fn season_certificate_world_standing() -> anyhow::Result<()> {
    let api = season_api()?.linked(
        format!("{API}/data/series/assets"),
        json!({"77": {"series_id": 77, "logo": "gtsprintseries-logo.png"}}).to_string(),
    );
    let handlers = Handlers::new(api, Config::default());

    let request = SeasonResultsRequest::from_json(&json!({
        "seasonid": 4242, "carclassid": 74, "driverid": 123456, "sessionid": 61540155
    }))?;
    let record = handlers.season_certificate(request).await?;

    assert_eq!(record.position, 17);
    assert_eq!(record.division, 4);
    assert_eq!(record.club, "UK and I");
    assert_eq!(record.car_class, "GT3 Class");
    assert_eq!(record.logo, "gtsprintseries-logo.png");
    assert_eq!(
        season_file_name(&record, 2023, 2),
        "GT Sprint Series by Simucube GT3 Class 2023 2 4.png"
    );
    assert_eq!(season_certificate_key(4242, 74, 123456, request.club), "424274123456world");
    Ok(())
}

#[tokio::test]
async fn season_certificate_without_assets_uses_no_logo() -> anyhow::Result<()> {
    let handlers = Handlers::new(season_api()?, Config::default());

    let request = SeasonResultsRequest {
        season_id: 4242,
        car_class_id: 74,
        driver_id: 123456,
        session_id: 61540155,
        club: false,
    };
    let record = handlers.season_certificate(request).await?;

    assert_eq!(record.logo, "nologofound.png");
    Ok(())
}

#[tokio::test]
async fn participation_for_a_quarter() -> anyhow::Result<()> {
    let api = CannedApi::new()
        .body(
            format!(
                "{API}/data/results/search_series?season_year=2023&season_quarter=2\
                 &official_only=true&event_types=5&cust_id=123456"
            ),
            json!({"type": "results_search_series", "data": {"success": true, "chunk_info": {
                "num_chunks": 1,
                "rows": 3,
                "base_download_url": "https://chunks.test/search/",
                "chunk_file_names": ["part0.json"]
            }}})
            .to_string(),
        )
        .body(
            "https://chunks.test/search/part0.json",
            json!([
                {"season_id": 4242, "series_name": "GT Sprint Series by Simucube",
                 "series_short_name": "GT Sprint Series", "car_class_id": 74,
                 "car_class_name": "GT3 Class", "car_name": "Ferrari 296 GT3",
                 "subsession_id": 61540155},
                {"season_id": 4242, "series_name": "GT Sprint Series by Simucube",
                 "series_short_name": "GT Sprint Series", "car_class_id": 74,
                 "car_class_name": "GT3 Class", "car_name": "Ferrari 296 GT3",
                 "subsession_id": 61540999},
                {"season_id": 4300, "series_name": "Formula B - Super Formula Lights",
                 "series_short_name": "Super Formula Lights", "car_class_id": 4021,
                 "car_class_name": "Super Formula Lights", "car_name": "Super Formula Lights",
                 "subsession_id": 61541111}
            ])
            .to_string(),
        );
    let handlers = Handlers::new(api, Config::default());

    let body = json!({"year": 2023, "quarter": 2, "driverid": 123456});
    let request = SeasonParticipationRequest::from_json(&body)?;
    let entries = handlers.season_participation(request).await?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].series, "Formula B - Super Formula Lights");
    assert_eq!(entries[1].session_id, 61540155);
    assert_eq!(serde_json::to_value(&entries[1])?["CarClassId"], 74);
    assert_eq!(participation_key(2023, 2, 123456), "20232123456");
    Ok(())
}

#[tokio::test]
async fn unauthenticated_transport_error_propagates() {
    struct NoCookie;

    #[async_trait::async_trait]
    impl podiumprints::api::DataApi for NoCookie {
        async fn get(&self, _url: &str) -> podiumprints::Result<String> {
            Err(CertificateError::Unauthenticated)
        }
    }

    let handlers = Handlers::new(NoCookie, Config::default());
    let err = handlers
        .season_participation(SeasonParticipationRequest::new(2023, 2, 123456))
        .await
        .unwrap_err();

    assert!(matches!(err, CertificateError::Unauthenticated));
    assert!(!err.recovery_suggestions().is_empty());
}
