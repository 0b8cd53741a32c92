//! Tests for the Cadence server client against a mock server.
//!
//! These tests use wiremock to verify request shape and the fallback
//! behavior without a real music server.

use cadence_core::{FetchError, FetchErrorKind, PlaylistSource, Track, TrackFetcher};
use cadence_server_client::{bundled_playlist, ServerClient, ServerClientError, ServerConfig};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ServerClient {
    ServerClient::new(ServerConfig::new(server.uri())).unwrap()
}

/// A base URL where nothing is listening
fn unreachable_client() -> ServerClient {
    let config = ServerConfig::new("http://127.0.0.1:1")
        .with_timeouts(Duration::from_secs(2), Duration::from_secs(1));
    ServerClient::new(config).unwrap()
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_valid_http_url() {
        let client = ServerClient::new(ServerConfig::new("http://localhost:8080"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        match ServerClient::new(ServerConfig::new("")) {
            Err(ServerClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[test]
    fn test_missing_scheme_rejected() {
        let result = ServerClient::new(ServerConfig::new("music.example.com"));
        assert!(matches!(result, Err(ServerClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = ServerClient::new(ServerConfig::new("https://music.example.com/")).unwrap();
        assert_eq!(client.url(), "https://music.example.com");
    }
}

// =============================================================================
// Catalog Tests
// =============================================================================

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_catalog_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/music"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "id": 7, "title": "So What", "artist": "Miles Davis" },
                    { "id": "b-2", "title": "Naima", "artist": "John Coltrane" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let playlist = client_for(&server).catalog().load().await;

        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.get(0).unwrap().id.as_str(), "7");
        assert_eq!(
            playlist.get(1).map(Track::display_text).as_deref(),
            Some("Naima - John Coltrane")
        );
    }

    #[tokio::test]
    async fn test_empty_catalog_is_not_a_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/music"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let playlist = client_for(&server).catalog().load().await;
        assert!(playlist.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/music"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let catalog = client_for(&server).catalog();

        match catalog.fetch_catalog().await {
            Err(FetchError::ServerRejected { status, .. }) => assert_eq!(status, 500),
            other => panic!("Expected ServerRejected, got {:?}", other),
        }
        assert_eq!(catalog.load().await, bundled_playlist());
    }

    #[tokio::test]
    async fn test_malformed_body_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/music"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let catalog = client_for(&server).catalog();

        assert!(matches!(
            catalog.fetch_catalog().await,
            Err(FetchError::InvalidResponse(_))
        ));
        assert_eq!(catalog.load().await, bundled_playlist());
    }

    #[tokio::test]
    async fn test_missing_data_field_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/music"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tracks": [] })))
            .mount(&server)
            .await;

        assert_eq!(client_for(&server).catalog().load().await, bundled_playlist());
    }

    #[tokio::test]
    async fn test_unreachable_server_falls_back() {
        let catalog = unreachable_client().catalog();

        let err = catalog.fetch_catalog().await.unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::NetworkFailure);

        assert_eq!(catalog.load().await, bundled_playlist());
    }
}

// =============================================================================
// Track Streaming Tests
// =============================================================================

mod track_stream {
    use super::*;

    fn track(id: &str) -> Track {
        Track::new(id, "Title", "Artist")
    }

    #[tokio::test]
    async fn test_range_request_and_partial_content() {
        let server = MockServer::start().await;
        let body = vec![0xABu8; 64 * 1024];

        Mock::given(method("GET"))
            .and(path("/music"))
            .and(query_param("audio_id", "42"))
            .and(header("range", "bytes=0-"))
            .respond_with(
                ResponseTemplate::new(206)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(body.clone()),
            )
            .expect(1)
            .mount(&server)
            .await;

        let resource = client_for(&server).tracks().fetch(&track("42")).await.unwrap();

        assert_eq!(resource.track_id().as_str(), "42");
        assert_eq!(resource.len(), body.len() as u64);
        assert_eq!(resource.content_type(), Some("audio/mpeg"));
        assert_eq!(resource.read_all().unwrap(), body);
    }

    #[tokio::test]
    async fn test_plain_ok_accepted() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/music"))
            .and(query_param("audio_id", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"RIFF....WAVE".to_vec()))
            .mount(&server)
            .await;

        let resource = client_for(&server).tracks().fetch(&track("1")).await.unwrap();
        assert_eq!(resource.read_all().unwrap(), b"RIFF....WAVE");
    }

    #[tokio::test]
    async fn test_not_found_is_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/music"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such audio"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .tracks()
            .fetch(&track("missing"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::ServerRejected);
        match err {
            FetchError::ServerRejected { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "no such audio");
            }
            other => panic!("Expected ServerRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_is_network_failure() {
        let err = unreachable_client()
            .tracks()
            .fetch(&track("1"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::NetworkFailure);
    }

    #[tokio::test]
    async fn test_resource_file_removed_on_drop() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/music"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"abc".to_vec()))
            .mount(&server)
            .await;

        let resource = client_for(&server).tracks().fetch(&track("9")).await.unwrap();
        let file_path = resource.path().to_path_buf();
        assert!(file_path.exists());

        drop(resource);
        assert!(!file_path.exists());
    }
}
