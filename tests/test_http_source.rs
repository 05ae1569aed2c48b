//! Integration tests for the served-site page source using mockito for HTTP mocking.

mod fixtures;

use docsite_search::error::PageFetchError;
use docsite_search::source::PageSource;
use docsite_search::{HttpPageSource, MetricsTracker, SiteClient};
use fixtures::{API_PAGE, LANDING_PAGE};
use mockito::Server;
use std::time::Duration;

fn client(server: &Server, metrics: MetricsTracker) -> SiteClient {
    SiteClient::new(server.url(), Duration::from_secs(5), metrics)
}

#[test]
fn test_get_page() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/geometry.html")
        .match_header("accept", "text/html")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(API_PAGE)
        .create();

    let metrics = MetricsTracker::new();
    let html = client(&server, metrics.clone())
        .get_page("/api/geometry.html#manimlib.mobject.geometry.Circle")
        .unwrap();

    mock.assert();
    assert!(html.contains("create_circle"));
    assert_eq!(metrics.pages_fetched_total(), 1);
    assert_eq!(metrics.fetch_errors_total(), 0);
}

#[test]
fn test_directory_path_maps_to_index() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/getting_started/index.html")
        .with_status(200)
        .with_body("<h1>Getting started</h1>")
        .create();

    let html = client(&server, MetricsTracker::new())
        .get_page("getting_started/")
        .unwrap();

    mock.assert();
    assert_eq!(html, "<h1>Getting started</h1>");
}

#[test]
fn test_page_not_found() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/missing.html")
        .with_status(404)
        .with_body("Not Found")
        .create();

    let metrics = MetricsTracker::new();
    let result = client(&server, metrics.clone()).get_page("api/missing.html");

    mock.assert();
    match result {
        Err(PageFetchError::NotFound(path)) => assert_eq!(path, "api/missing.html"),
        other => panic!("Expected NotFound, got: {:?}", other),
    }
    assert_eq!(metrics.fetch_errors_total(), 1);
}

#[test]
fn test_server_error() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/index.html")
        .with_status(503)
        .with_body("maintenance")
        .create();

    let result = client(&server, MetricsTracker::new()).get_page("index.html");

    mock.assert();
    match result {
        Err(PageFetchError::Status { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("Expected Status error, got: {:?}", other),
    }
}

#[test]
fn test_escaping_path_never_reaches_the_server() {
    let server = Server::new();
    let result = client(&server, MetricsTracker::new()).get_page("../secrets.html");
    assert!(matches!(result, Err(PageFetchError::InvalidPath(_))));
}

#[test]
fn test_list_pages_follows_root_links() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/index.html")
        .with_status(200)
        .with_body(LANDING_PAGE)
        .create();

    let source = HttpPageSource::new(client(&server, MetricsTracker::new()));
    let pages = tokio_test::block_on(source.list_pages()).unwrap();

    mock.assert();
    assert_eq!(
        pages,
        vec![
            "api/geometry.html".to_string(),
            "getting_started/quickstart.html".to_string(),
            "index.html".to_string(),
        ]
    );
}

#[test]
fn test_fetch_page_through_blocking_pool() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/geometry.html")
        .with_status(200)
        .with_body(API_PAGE)
        .create();

    let source = HttpPageSource::new(client(&server, MetricsTracker::new()));
    let html = tokio_test::block_on(source.fetch_page("api/geometry.html")).unwrap();

    mock.assert();
    assert_eq!(html, API_PAGE);
}
