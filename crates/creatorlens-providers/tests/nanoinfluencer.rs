//! Integration tests for `NanoinfluencerAdapter` using wiremock HTTP mocks.

use creatorlens_core::Platform;
use creatorlens_providers::{NanoinfluencerAdapter, ProviderAdapter};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_adapter(base_url: &str) -> NanoinfluencerAdapter {
    NanoinfluencerAdapter::with_base_url(
        Some("test-key".to_string()),
        30,
        "creatorlens-test/0.1",
        base_url,
    )
    .expect("adapter construction should not fail")
}

#[tokio::test]
async fn fetch_profile_maps_full_payload() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "creator": {
            "id": "cr_8812",
            "display_name": "Jane Doe",
            "avatar_url": "https://cdn.example/jane.jpg",
            "followers": 250_000,
            "following": 412,
            "media_count": 1_024,
            "engagement": { "rate": 0.045, "avg_likes": 11_200, "avg_views": 98_000 },
            "verified": true,
            "gender": "female",
            "language": "en",
            "bio": "Travel and food.",
            "age_group": "25-34",
            "account_type": "business",
            "location": { "country": "US", "city": "Austin", "state": "TX" },
            "emails": [
                { "address": "jane@studio.example", "type": "business", "primary": true }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/v1/creators/instagram/jane.doe"))
        .and(header("X-Api-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let adapter = test_adapter(&server.uri());
    let profile = adapter
        .fetch_profile("jane.doe", Platform::Instagram)
        .await
        .expect("should parse profile");

    assert_eq!(profile.external_id, "cr_8812");
    assert_eq!(profile.username, "jane.doe");
    assert_eq!(profile.name, "Jane Doe");
    assert_eq!(profile.followers, 250_000);
    assert_eq!(profile.following_count, 412);
    assert_eq!(profile.content_count, Some(1_024));
    // 0.045 fraction upstream becomes 4.5 percent.
    assert!((profile.engagement_rate - 4.5).abs() < 1e-9);
    assert_eq!(profile.average_likes, 11_200);
    assert_eq!(profile.average_views, Some(98_000));
    assert!(profile.is_verified);
    assert_eq!(profile.age_group.as_deref(), Some("25-34"));
    assert_eq!(profile.platform_account_type, "business");
    assert_eq!(profile.creator_location.country.as_deref(), Some("US"));
    assert_eq!(profile.creator_location.state.as_deref(), Some("TX"));
    assert_eq!(profile.contact_details.len(), 1);
    assert_eq!(profile.contact_details[0].value, "jane@studio.example");
    assert!(profile.contact_details[0].is_primary);
    assert_eq!(profile.url, "https://www.instagram.com/jane.doe/");
    assert_eq!(profile.provider_source, "nanoinfluencer");
}

#[tokio::test]
async fn leading_at_is_stripped_and_url_reconstructed() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "creator": { "id": "cr_1", "display_name": "Jane" }
    });

    Mock::given(method("GET"))
        .and(path("/v1/creators/tiktok/jane"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let adapter = test_adapter(&server.uri());
    let profile = adapter
        .fetch_profile("@jane", Platform::TikTok)
        .await
        .expect("should parse profile");

    assert_eq!(profile.username, "jane");
    assert_eq!(profile.url, "https://www.tiktok.com/@jane");
}

#[tokio::test]
async fn sparse_payload_gets_stable_defaults() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "creator": { "id": "cr_2" } });

    Mock::given(method("GET"))
        .and(path("/v1/creators/youtube/jane"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let adapter = test_adapter(&server.uri());
    let profile = adapter
        .fetch_profile("jane", Platform::YouTube)
        .await
        .expect("should parse profile");

    assert_eq!(profile.followers, 0);
    assert_eq!(profile.subscriber_count, None);
    assert_eq!(profile.average_views, None);
    assert_eq!(profile.engagement_rate, 0.0);
    assert_eq!(profile.name, "");
    assert_eq!(profile.introduction, "");
    assert!(profile.contact_details.is_empty());
    assert!(!profile.username.is_empty());
    assert!(!profile.provider_source.is_empty());
}

#[tokio::test]
async fn http_404_maps_to_user_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/creators/instagram/ghost_user_404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let adapter = test_adapter(&server.uri());
    let err = adapter
        .fetch_profile("ghost_user_404", Platform::Instagram)
        .await
        .expect_err("404 must be an error");

    assert_eq!(err.code(), "user_not_found");
    assert!(err.is_user_error());
}

#[tokio::test]
async fn http_403_maps_to_private_profile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/creators/instagram/locked"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let adapter = test_adapter(&server.uri());
    let err = adapter
        .fetch_profile("locked", Platform::Instagram)
        .await
        .expect_err("403 must be an error");

    assert_eq!(err.code(), "private_profile");
}

#[tokio::test]
async fn http_429_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/creators/instagram/jane"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let adapter = test_adapter(&server.uri());
    let err = adapter
        .fetch_profile("jane", Platform::Instagram)
        .await
        .expect_err("429 must be an error");

    assert_eq!(err.code(), "rate_limited");
    assert!(err.should_fall_back());
}

#[tokio::test]
async fn payload_error_on_200_maps_to_taxonomy() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": { "code": "ACCOUNT_PRIVATE", "message": "account is private" }
    });

    Mock::given(method("GET"))
        .and(path("/v1/creators/instagram/locked"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let adapter = test_adapter(&server.uri());
    let err = adapter
        .fetch_profile("locked", Platform::Instagram)
        .await
        .expect_err("payload error must be surfaced");

    assert_eq!(err.code(), "private_profile");
}

#[tokio::test]
async fn http_500_is_a_retryable_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/creators/instagram/jane"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let adapter = test_adapter(&server.uri());
    let err = adapter
        .fetch_profile("jane", Platform::Instagram)
        .await
        .expect_err("500 must be an error");

    assert_eq!(err.code(), "upstream_error");
    assert!(err.should_fall_back());
}

#[tokio::test]
async fn garbage_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/creators/instagram/jane"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let adapter = test_adapter(&server.uri());
    let err = adapter
        .fetch_profile("jane", Platform::Instagram)
        .await
        .expect_err("non-JSON body must be an error");

    assert_eq!(err.code(), "deserialize_error");
}
