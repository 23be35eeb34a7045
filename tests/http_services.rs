mod common;

use common::mock_server::{MockResponse, MockServer};
use common::{page, DESKTOP, FRAGMENT};
use gnav::config::GnavConfig;
use gnav::fragment::{FragmentSource, HttpFragmentSource};
use gnav::identity::AccessToken;
use gnav::profile::{HttpProfileClient, ProfileClient};
use gnav::{Gnav, GnavError, Services};
use url::Url;

fn origin(server: &MockServer) -> Url {
    Url::parse(&server.base_url()).unwrap()
}

#[tokio::test]
async fn fragment_requested_with_plain_suffix() {
    let server = MockServer::start().await;
    server.enqueue_response(MockResponse::html("<div>nav</div>")).await;
    let source = HttpFragmentSource::with_client(reqwest::Client::new(), origin(&server));

    let html = source.fetch("/gnav").await.unwrap();

    assert_eq!(html, "<div>nav</div>");
    let requests = server.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/gnav.plain.html");
}

#[tokio::test]
async fn fragment_error_status_is_reported() {
    let server = MockServer::start().await;
    let source = HttpFragmentSource::with_client(reqwest::Client::new(), origin(&server));

    let err = source.fetch("/missing").await.unwrap_err();

    match err {
        GnavError::Status { status, url } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/missing.plain.html"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn profile_request_carries_bearer_token() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(200, r#"{"name":"Ada","email":"ada@example.com"}"#))
        .await;
    let url = Url::parse(&format!("{}/profile", server.base_url())).unwrap();
    let client = HttpProfileClient::with_url(reqwest::Client::new(), url);

    let response = client.fetch_profile(&AccessToken::new("abc123")).await.unwrap();

    assert!(response.is_authenticated());
    assert_eq!(response.body["name"], "Ada");
    let requests = server.captured_requests().await;
    assert_eq!(requests[0].path, "/profile");
    assert_eq!(requests[0].header("authorization"), Some("Bearer abc123"));
}

#[tokio::test]
async fn profile_rejection_is_a_response_not_an_error() {
    let server = MockServer::start().await;
    server.enqueue_response(MockResponse::status(401)).await;
    let url = Url::parse(&format!("{}/profile", server.base_url())).unwrap();
    let client = HttpProfileClient::with_url(reqwest::Client::new(), url);

    let response = client.fetch_profile(&AccessToken::new("old")).await.unwrap();

    assert_eq!(response.status, 401);
    assert!(!response.is_authenticated());
    assert!(response.body.is_null());
}

#[tokio::test]
async fn init_over_http_mounts_and_resolves_links_to_origin() {
    let server = MockServer::start().await;
    server.enqueue_response(MockResponse::html(FRAGMENT)).await;
    let config = GnavConfig {
        origin: server.base_url(),
        ..GnavConfig::default()
    };
    let (doc, header) = page(DESKTOP);

    let services = Services::from_config(&config).unwrap();
    let mut gnav = Gnav::init(doc, header, &config, services).await.ok().unwrap();

    let trigger = gnav.nav_items()[0].trigger;
    let expected = format!("{}/products", server.base_url());
    assert_eq!(gnav.document().attr(trigger, "href"), Some(expected.as_str()));

    // Anonymous provider is ready at once and has no token
    gnav.identity_ready().await;
    let profile = gnav.profile_slot().unwrap().element;
    let link = gnav.document().element_children(profile)[0];
    assert!(gnav.document().has_class(link, "gnav-signin"));
}

#[tokio::test]
async fn init_over_http_failure_mounts_nothing() {
    let server = MockServer::start().await;
    server.enqueue_response(MockResponse::status(500)).await;
    let config = GnavConfig {
        origin: server.base_url(),
        ..GnavConfig::default()
    };
    let (doc, header) = page(DESKTOP);

    let services = Services::from_config(&config).unwrap();
    let doc = Gnav::init(doc, header, &config, services).await.err().unwrap();

    assert!(doc.children(header).is_empty());
}
