//! Integration tests for the VVM client (wiremock-based)

use domain::{StopId, StopValidation, TimeWindow};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_vvm::{
    DEPARTURE_MONITOR_ENDPOINT, DepartureClient, StopMonitor, VvmAccessApi, VvmConfig, VvmError,
};

fn monitor_for(server: &MockServer) -> StopMonitor {
    StopMonitor::new(&VvmConfig::with_base_url(server.uri())).unwrap()
}

fn stop(id: &str) -> StopId {
    StopId::new(id).unwrap()
}

const fn sample_departures_json() -> &'static str {
    r#"{
        "dm": {
            "points": { "point": { "name": "Würzburg, Sanderring" } },
            "message": [ { "name": "code", "value": "0" } ]
        },
        "departureList": [
            {
                "countdown": "3",
                "servingLine": { "delay": "0", "name": "Straßenbahn", "number": "1",
                                 "direction": "Grombühl", "directionFrom": "Sanderau" }
            },
            {
                "countdown": "45",
                "servingLine": { "delay": "1", "name": "Bus", "number": "14",
                                 "direction": "Hubland", "directionFrom": "Busbahnhof" }
            },
            {
                "countdown": "7",
                "servingLine": { "delay": "-1", "name": "Bus", "number": "10",
                                 "direction": "Hauptbahnhof", "directionFrom": "Heuchelhof" }
            }
        ]
    }"#
}

const fn sample_stop_finder_json() -> &'static str {
    r#"{
        "stopFinder": {
            "points": [
                { "type": "any", "anyType": "stop", "name": "Würzburg, Hauptbahnhof", "stateless": "6000177" },
                { "type": "any", "anyType": "street", "name": "Würzburg, Bahnhofstraße", "stateless": "streetID:1" },
                { "type": "any", "anyType": "poi", "name": "Würzburg, Hbf Parkhaus", "stateless": "poiID:9" },
                { "type": "any", "anyType": "stop", "name": "Würzburg, Hbf Ost", "stateless": "6000178" }
            ]
        }
    }"#
}

#[tokio::test]
async fn test_single_departure_mapping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/XML_DM_REQUEST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"departureList":[{"countdown":"5","servingLine":{"delay":"2","name":"Bus","number":"12","direction":"Downtown","directionFrom":"Uptown"}}]}"#,
        ))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server);
    let departures = monitor
        .get_departures(&stop("2000001"), TimeWindow::new(30).unwrap())
        .await
        .unwrap();

    assert_eq!(departures.len(), 1);
    let departure = &departures[0];
    assert_eq!(departure.left, 5);
    assert_eq!(departure.delay, 2);
    assert_eq!(departure.kind, "Bus");
    assert_eq!(departure.line, "12");
    assert_eq!(departure.to, "Downtown");
    assert_eq!(departure.from, "Uptown");
}

#[tokio::test]
async fn test_departure_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/XML_DM_REQUEST"))
        .and(query_param("useRealtime", "1"))
        .and(query_param("mode", "direct"))
        .and(query_param("name_dm", "de:09663:177"))
        .and(query_param("type_dm", "stop"))
        .and(query_param("useAllStops", "1"))
        .and(query_param("mergeDep", "1"))
        .and(query_param("maxTimeLoop", "2"))
        .and(query_param("outputFormat", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_departures_json()))
        .expect(1)
        .mount(&server)
        .await;

    let monitor = monitor_for(&server);
    let departures = monitor
        .get_departures(&stop("de:09663:177"), TimeWindow::new(30).unwrap())
        .await
        .unwrap();

    assert_eq!(departures.len(), 2);
}

#[tokio::test]
async fn test_departures_filtered_by_window_in_upstream_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/XML_DM_REQUEST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_departures_json()))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server);

    let departures = monitor
        .get_departures(&stop("6000180"), TimeWindow::new(30).unwrap())
        .await
        .unwrap();
    let lines: Vec<&str> = departures.iter().map(|d| d.line.as_str()).collect();
    assert_eq!(lines, ["1", "10"]);
    assert_eq!(departures[1].delay, -1);

    let narrow = monitor
        .get_departures(&stop("6000180"), TimeWindow::new(7).unwrap())
        .await
        .unwrap();
    assert_eq!(narrow.len(), 1);
    assert_eq!(narrow[0].line, "1");
}

#[tokio::test]
async fn test_server_error_is_no_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/XML_DM_REQUEST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("not even json"))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server);

    let raw = monitor.request_departures(&stop("6000180")).await.unwrap();
    assert!(raw.is_none());

    let departures = monitor
        .get_departures(&stop("6000180"), TimeWindow::default())
        .await
        .unwrap();
    assert!(departures.is_empty());

    let validation = monitor.is_stop_valid(&stop("6000180")).await.unwrap();
    assert_eq!(validation, StopValidation::Unknown);
}

#[tokio::test]
async fn test_fetch_returns_none_for_non_200_statuses() {
    let server = MockServer::start().await;

    for status in [201_u16, 404, 429, 500, 503] {
        server.reset().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string("{}"))
            .mount(&server)
            .await;

        let api = VvmAccessApi::new(&VvmConfig::with_base_url(server.uri())).unwrap();
        let result = api
            .fetch::<serde_json::Value>(DEPARTURE_MONITOR_ENDPOINT, &[])
            .await
            .unwrap();
        assert!(result.is_none(), "status {status} should be treated as no data");
    }
}

#[tokio::test]
async fn test_invalid_json_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/XML_DM_REQUEST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server);
    let err = monitor
        .get_departures(&stop("6000180"), TimeWindow::default())
        .await
        .unwrap_err();
    assert!(matches!(err, VvmError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_missing_fields_are_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/XML_DM_REQUEST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"departureList":[{"countdown":"5"}]}"#),
        )
        .mount(&server)
        .await;

    let monitor = monitor_for(&server);
    let err = monitor
        .get_departures(&stop("6000180"), TimeWindow::default())
        .await
        .unwrap_err();
    assert!(matches!(err, VvmError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_is_stop_valid_resolves_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/XML_DM_REQUEST"))
        .and(query_param("name_dm", "6000180"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_departures_json()))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server);
    let validation = monitor.is_stop_valid(&stop("6000180")).await.unwrap();
    assert_eq!(
        validation,
        StopValidation::Valid {
            name: Some("Würzburg, Sanderring".to_string())
        }
    );
}

#[tokio::test]
async fn test_is_stop_valid_reports_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/XML_DM_REQUEST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "departureList": null,
                "dm": {
                    "message": [
                        { "name": "code", "value": "-8011" },
                        { "name": "error", "value": "name_dm: no stop found" }
                    ]
                }
            }"#,
        ))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server);
    let validation = monitor.is_stop_valid(&stop("nonsense")).await.unwrap();
    assert_eq!(
        validation,
        StopValidation::Invalid {
            code: Some(-8011),
            message: Some("name_dm: no stop found".to_string())
        }
    );
}

#[tokio::test]
async fn test_is_stop_valid_without_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/XML_DM_REQUEST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"departureList":[],"dm":{"message":[{"name":"error","value":"unknown"}]}}"#,
        ))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server);
    let validation = monitor.is_stop_valid(&stop("nonsense")).await.unwrap();
    assert!(matches!(validation, StopValidation::Invalid { code: None, .. }));
}

#[tokio::test]
async fn test_find_stops_keeps_only_stops() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/XML_STOPFINDER_REQUEST"))
        .and(query_param("name_sf", "Hauptbahnhof"))
        .and(query_param("regionID_sf", "1"))
        .and(query_param("type_sf", "any"))
        .and(query_param("outputFormat", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_stop_finder_json()))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server);
    let stops = monitor.find_stops("Hauptbahnhof").await.unwrap();

    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].name, "Würzburg, Hauptbahnhof");
    assert_eq!(stops[0].id, "6000177");
    assert_eq!(stops[1].id, "6000178");
}

#[tokio::test]
async fn test_find_stops_unavailable_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/XML_STOPFINDER_REQUEST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let monitor = monitor_for(&server);
    let stops = monitor.find_stops("Hauptbahnhof").await.unwrap();
    assert!(stops.is_empty());
}
