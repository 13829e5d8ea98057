//! Data-endpoint tests: fetching observations and parameter validation.

use std::time::Duration;

use chrono::NaiveDate;
use ncei::{DataQuery, NceiClient, NceiError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> NceiClient {
    NceiClient::with_base_url("test-token", &server.uri())
        .unwrap()
        .with_wait(Duration::ZERO)
}

fn observations() -> serde_json::Value {
    serde_json::json!({
        "metadata": {"resultset": {"offset": 1, "count": 4, "limit": 10}},
        "results": [
            {"date": "2015-12-01T00:00:00", "datatype": "TMAX",
             "station": "GHCND:USC00186350", "attributes": ",,7,0800", "value": 11.7},
            {"date": "2015-12-01T00:00:00", "datatype": "TMIN",
             "station": "GHCND:USC00186350", "attributes": ",,7,0800", "value": 3.3},
            {"date": "2015-12-02T00:00:00", "datatype": "TMAX",
             "station": "GHCND:USC00186350", "attributes": ",,7,0800", "value": 15.0},
            {"date": "2015-12-02T00:00:00", "datatype": "TMIN",
             "station": "GHCND:USC00186350", "attributes": ",,7,0800", "value": 11.7}
        ]
    })
}

#[tokio::test]
async fn test_get_data_assembles_typed_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("datasetid", "GHCND"))
        .and(query_param("stationid", "GHCND:USC00186350"))
        .and(query_param("startdate", "2015-12-01"))
        .and(query_param("enddate", "2015-12-02"))
        .and(query_param("sortfield", "station"))
        .and(query_param("sortorder", "asc"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(observations()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).with_validation(true);
    let query = DataQuery::new("GHCND", "2015-12-01", "2015-12-02")
        .stationid("GHCND:USC00186350")
        .datatypeid("TMIN")
        .datatypeid("TMAX")
        .sortfield("station")
        .sortorder("asc")
        .limit(10)
        .max(10);

    let response = client.get_data(&query).await.unwrap();

    assert_eq!(response.len(), 4);
    let first = response.first().unwrap();
    assert_eq!(first.datatype, "TMAX");
    assert_eq!(first.value, 11.7);
    assert_eq!(first.attributes.as_deref(), Some(",,7,0800"));
    assert_eq!(
        first.date.date(),
        NaiveDate::from_ymd_opt(2015, 12, 1).unwrap()
    );

    let values: Vec<f64> = response.values().map(|r| r.value).collect();
    assert_eq!(values, vec![11.7, 3.3, 15.0, 11.7]);
}

#[tokio::test]
async fn test_missing_required_params_fail_before_any_request() {
    // No mock server: validation must reject the query without HTTP
    let client = NceiClient::new("test-token").unwrap().with_validation(true);

    let err = client.get_data(&DataQuery::empty()).await.unwrap_err();
    assert!(matches!(err, NceiError::MissingParams(_)));
    assert!(err.to_string().starts_with("Required parameters missing"));
}

#[tokio::test]
async fn test_unknown_param_name_is_rejected() {
    let client = NceiClient::new("test-token").unwrap().with_validation(true);

    let query = DataQuery::new("GHCND", "2015-12-01", "2015-12-02")
        .param("bad_param_name", "BAD_PARAM_NAME");
    let err = client.get_data(&query).await.unwrap_err();
    assert!(matches!(err, NceiError::UnknownParams(_)));
    assert!(err.to_string().contains("bad_param_name"));
}

#[tokio::test]
async fn test_invalid_values_are_collected() {
    let client = NceiClient::new("test-token").unwrap().with_validation(true);

    let mut query = DataQuery::new("GHCND", "BAD_START_DATE", "BAD_END_DATE")
        .stationid("BAD_STATION_NAME")
        .sortfield("BAD_FIELD_NAME")
        .sortorder("BAD_SORT_ORDER")
        .units("BAD_UNIT_NAME");
    query.extra.push(("limit".to_string(), "BAD_LIMIT".to_string()));

    let err = client.get_data(&query).await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("Parameter errors"));
    for needle in [
        "BAD_STATION_NAME",
        "BAD_START_DATE",
        "BAD_END_DATE",
        "BAD_LIMIT",
        "BAD_FIELD_NAME",
        "BAD_SORT_ORDER",
        "BAD_UNIT_NAME",
    ] {
        assert!(msg.contains(needle), "missing {needle} in: {msg}");
    }
}

#[tokio::test]
async fn test_validation_off_sends_as_is() {
    let server = MockServer::start().await;

    // Without validation even a nonsense parameter goes to the service
    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("bad_param_name", "x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let query = DataQuery::new("GHCND", "2015-12-01", "2015-12-02").param("bad_param_name", "x");
    let response = client.get_data(&query).await.unwrap();
    assert!(response.is_empty());
}
