//! Pagination tests against a mock CDO server.

use std::time::Duration;

use ncei::{List, NceiClient, SearchQuery, Station};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> NceiClient {
    NceiClient::with_base_url("test-token", &server.uri())
        .unwrap()
        .with_wait(Duration::ZERO)
}

fn station(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "latitude": 38.9,
        "longitude": -77.0,
        "mindate": "1948-08-01",
        "maxdate": "2015-12-31",
        "datacoverage": 1
    })
}

fn page(offset: u64, count: u64, limit: u64, results: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({
        "metadata": {"resultset": {"offset": offset, "count": count, "limit": limit}},
        "results": results
    })
}

#[tokio::test]
async fn test_list_all_pages_by_offset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stations"))
        .and(query_param("datasetid", "GHCND"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            1,
            3,
            2,
            vec![station("GHCND:S1", "FIRST"), station("GHCND:S2", "SECOND")],
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/stations"))
        .and(query_param("datasetid", "GHCND"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            3,
            3,
            2,
            vec![station("GHCND:S3", "THIRD")],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let query = SearchQuery::new().datasetid("GHCND").limit(2);
    let response = client.get_stations(&query).await.unwrap();

    assert_eq!(response.len(), 3);
    assert_eq!(response.total(), Some(3));
    let names: Vec<&str> = response.values().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["FIRST", "SECOND", "THIRD"]);
}

#[tokio::test]
async fn test_max_caps_total_records() {
    let server = MockServer::start().await;

    // max=3 with limit=2: a full first page, then a final page of one
    Mock::given(method("GET"))
        .and(path("/stations"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            1,
            100,
            2,
            vec![station("GHCND:S1", "FIRST"), station("GHCND:S2", "SECOND")],
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/stations"))
        .and(query_param("limit", "1"))
        .and(query_param("offset", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            3,
            100,
            1,
            vec![station("GHCND:S3", "THIRD")],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let query = SearchQuery::new().limit(2).max(3);
    let response = client.get_stations(&query).await.unwrap();

    assert_eq!(response.len(), 3);
    // The service had more, but the cap stopped the fetch
    assert_eq!(response.total(), Some(100));
}

#[tokio::test]
async fn test_empty_result_set_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client.get_stations(&SearchQuery::new()).await.unwrap();
    assert!(response.is_empty());
    assert!(response.first().is_none());
}

#[tokio::test]
async fn test_list_page_fetches_one_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stations"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            3,
            10,
            2,
            vec![station("GHCND:S3", "THIRD"), station("GHCND:S4", "FOURTH")],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = Station::list_page(&client, &SearchQuery::new(), 3, 2)
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.offset, 3);
    assert_eq!(page.total, Some(10));
    assert!(page.has_more);
    assert_eq!(page.next_offset(), 5);
}
