//! Adapter for the `EnsembleData` social API.
//!
//! `EnsembleData` returns a flat `"data"` object whose field names vary per
//! platform, so the mapping works over `serde_json::Value` instead of typed
//! structs. Engagement already arrives on the 0-100 percentage scale. The
//! vendor has no `YouTube` coverage on this endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use creatorlens_core::{
    normalize_username, ContactDetail, Platform, ProviderError, StandardizedProfile,
};

use crate::adapter::ProviderAdapter;

const PROVIDER: &str = "ensembledata";
const DEFAULT_BASE_URL: &str = "https://ensembledata.com/apis/";
const SUPPORTED_PLATFORMS: [Platform; 2] = [Platform::Instagram, Platform::TikTok];
const DEFAULT_PRIORITY: u32 = 20;

/// Client for the `EnsembleData` user-info endpoints.
pub struct EnsembledataAdapter {
    client: Client,
    token: Option<String>,
    base_url: Url,
}

impl EnsembledataAdapter {
    /// Creates a new adapter pointed at the production `EnsembleData` API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        token: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new adapter with a custom base URL (for testing with
    /// wiremock, or a staging endpoint).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::InvalidInput`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        token: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(|source| ProviderError::Http {
                provider: PROVIDER.to_string(),
                source,
            })?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ProviderError::InvalidInput {
            provider: PROVIDER.to_string(),
            reason: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            token,
            base_url,
        })
    }

    /// Builds the user-info URL with percent-encoded query parameters.
    fn user_info_url(&self, username: &str, platform: Platform) -> Result<Url, ProviderError> {
        let mut url = self
            .base_url
            .join(&format!("{platform}/user/info"))
            .map_err(|e| ProviderError::InvalidInput {
                provider: PROVIDER.to_string(),
                reason: format!("cannot build request URL: {e}"),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("username", username);
            if let Some(token) = &self.token {
                pairs.append_pair("token", token);
            }
        }
        Ok(url)
    }

    fn classify_status(status: StatusCode, username: &str, body: &str) -> ProviderError {
        let detail = detail_message(body);
        match status {
            StatusCode::NOT_FOUND => ProviderError::UserNotFound {
                provider: PROVIDER.to_string(),
                username: username.to_string(),
            },
            StatusCode::FORBIDDEN => ProviderError::PrivateProfile {
                provider: PROVIDER.to_string(),
                username: username.to_string(),
            },
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited {
                provider: PROVIDER.to_string(),
            },
            StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST => {
                ProviderError::InvalidInput {
                    provider: PROVIDER.to_string(),
                    reason: detail.unwrap_or_else(|| "request rejected by provider".to_string()),
                }
            }
            // 401 means the token itself is bad; retrying the same request
            // will never succeed, but another provider still might.
            StatusCode::UNAUTHORIZED => ProviderError::Upstream {
                provider: PROVIDER.to_string(),
                message: detail.unwrap_or_else(|| "invalid or expired token".to_string()),
                retryable: false,
            },
            other => ProviderError::Upstream {
                provider: PROVIDER.to_string(),
                message: detail.unwrap_or_else(|| format!("unexpected HTTP status {other}")),
                retryable: true,
            },
        }
    }
}

#[async_trait]
impl ProviderAdapter for EnsembledataAdapter {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn priority(&self) -> u32 {
        DEFAULT_PRIORITY
    }

    fn is_available(&self) -> bool {
        self.token.is_some()
    }

    fn supported_platforms(&self) -> &[Platform] {
        &SUPPORTED_PLATFORMS
    }

    async fn fetch_profile(
        &self,
        username: &str,
        platform: Platform,
    ) -> Result<StandardizedProfile, ProviderError> {
        let username = normalize_username(username);
        let url = self.user_info_url(username, platform)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: PROVIDER.to_string(),
                source,
            })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ProviderError::Http {
                provider: PROVIDER.to_string(),
                source,
            })?;

        if !status.is_success() {
            return Err(Self::classify_status(status, username, &body));
        }

        let payload: serde_json::Value =
            serde_json::from_str(&body).map_err(|source| ProviderError::Deserialize {
                provider: PROVIDER.to_string(),
                context: format!("{platform}/user/info?username={username}"),
                source,
            })?;

        let Some(data) = payload.get("data").filter(|d| d.is_object()) else {
            return Err(ProviderError::Upstream {
                provider: PROVIDER.to_string(),
                message: detail_message(&body)
                    .unwrap_or_else(|| "response missing data object".to_string()),
                retryable: true,
            });
        };

        // The vendor answers 200 for private accounts and flags them in the
        // body instead.
        if data
            .get("is_private")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
        {
            return Err(ProviderError::PrivateProfile {
                provider: PROVIDER.to_string(),
                username: username.to_string(),
            });
        }

        Ok(map_user_info(username, platform, data))
    }
}

/// Map the flat vendor object into the canonical schema.
///
/// Field names differ per platform (`follower_count` vs `fans`), so every
/// read goes through a first-match-wins key list with a typed default.
fn map_user_info(
    username: &str,
    platform: Platform,
    data: &serde_json::Value,
) -> StandardizedProfile {
    let mut profile = StandardizedProfile::baseline(username, platform, PROVIDER);

    if let Some(id) = first_value(data, &["user_id", "id"]) {
        profile.external_id = id
            .as_str()
            .map_or_else(|| id.to_string(), str::to_string);
    }
    profile.name = string_or_empty(data, &["full_name", "nickname"]);
    profile.profile_image = string_or_empty(data, &["profile_pic_url", "avatar"]);
    profile.followers = int_or_zero(data, &["follower_count", "fans"]);
    profile.following_count = int_or_zero(data, &["following_count", "followings"]);
    profile.subscriber_count = opt_int(data, &["subscriber_count"]);
    profile.content_count = opt_int(data, &["media_count", "video_count"]);
    profile.engagement_rate = data
        .get("engagement_percent")
        .and_then(serde_json::Value::as_f64)
        .unwrap_or(0.0);
    profile.average_likes = int_or_zero(data, &["average_likes", "avg_likes"]);
    profile.average_views = opt_int(data, &["average_views", "avg_views"]);
    profile.is_verified = data
        .get("is_verified")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);
    profile.gender = string_or_empty(data, &["gender"]);
    profile.language = string_or_empty(data, &["language"]);
    profile.introduction = string_or_empty(data, &["bio", "signature"]);
    profile.platform_account_type = string_or_empty(data, &["account_type"]);
    profile.creator_location.country = opt_string(data, &["country"]);
    profile.creator_location.city = opt_string(data, &["city"]);

    if let Some(email) = opt_string(data, &["public_email", "business_email"]) {
        profile.contact_details.push(ContactDetail {
            kind: "email".to_string(),
            value: email,
            contact_type: "business".to_string(),
            is_primary: true,
        });
    }
    if let Some(url) = opt_string(data, &["profile_url", "url"]) {
        profile.url = url;
    }

    profile
}

fn first_value<'a>(data: &'a serde_json::Value, keys: &[&str]) -> Option<&'a serde_json::Value> {
    keys.iter().find_map(|k| data.get(*k)).filter(|v| !v.is_null())
}

fn string_or_empty(data: &serde_json::Value, keys: &[&str]) -> String {
    opt_string(data, keys).unwrap_or_default()
}

fn opt_string(data: &serde_json::Value, keys: &[&str]) -> Option<String> {
    first_value(data, keys)
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn int_or_zero(data: &serde_json::Value, keys: &[&str]) -> i64 {
    opt_int(data, keys).unwrap_or(0)
}

fn opt_int(data: &serde_json::Value, keys: &[&str]) -> Option<i64> {
    first_value(data, keys).and_then(|v| {
        v.as_i64()
            .or_else(|| v.as_str().and_then(|s| s.parse::<i64>().ok()))
    })
}

fn detail_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("detail")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_adapter(base_url: &str) -> EnsembledataAdapter {
        EnsembledataAdapter::with_base_url(
            Some("test-token".to_string()),
            30,
            "creatorlens-test/0.1",
            base_url,
        )
        .expect("adapter construction should not fail")
    }

    #[test]
    fn user_info_url_carries_username_and_token() {
        let adapter = test_adapter("https://ensembledata.com/apis");
        let url = adapter.user_info_url("jane", Platform::TikTok).unwrap();
        assert_eq!(
            url.as_str(),
            "https://ensembledata.com/apis/tiktok/user/info?username=jane&token=test-token"
        );
    }

    #[test]
    fn youtube_is_not_supported() {
        let adapter = test_adapter("https://ensembledata.com/apis");
        assert!(adapter.supports(Platform::Instagram));
        assert!(adapter.supports(Platform::TikTok));
        assert!(!adapter.supports(Platform::YouTube));
    }

    #[test]
    fn map_user_info_reads_platform_variant_keys() {
        let data = serde_json::json!({
            "user_id": 991,
            "nickname": "Jane D",
            "fans": 120_000,
            "followings": 310,
            "video_count": "87",
            "engagement_percent": 4.5,
            "signature": "daily vlogs",
            "is_verified": true
        });
        let profile = map_user_info("jane", Platform::TikTok, &data);
        assert_eq!(profile.external_id, "991");
        assert_eq!(profile.name, "Jane D");
        assert_eq!(profile.followers, 120_000);
        assert_eq!(profile.following_count, 310);
        assert_eq!(profile.content_count, Some(87));
        assert!((profile.engagement_rate - 4.5).abs() < 1e-9);
        assert_eq!(profile.introduction, "daily vlogs");
        assert!(profile.is_verified);
        assert_eq!(profile.url, "https://www.tiktok.com/@jane");
    }

    #[test]
    fn map_user_info_defaults_missing_fields() {
        let data = serde_json::json!({ "username": "jane" });
        let profile = map_user_info("jane", Platform::Instagram, &data);
        assert_eq!(profile.followers, 0);
        assert_eq!(profile.engagement_rate, 0.0);
        assert_eq!(profile.average_views, None);
        assert!(profile.contact_details.is_empty());
        assert_eq!(profile.provider_source, "ensembledata");
    }

    #[test]
    fn public_email_becomes_primary_contact() {
        let data = serde_json::json!({ "public_email": "jane@studio.example" });
        let profile = map_user_info("jane", Platform::Instagram, &data);
        assert_eq!(profile.contact_details.len(), 1);
        let contact = &profile.contact_details[0];
        assert_eq!(contact.kind, "email");
        assert_eq!(contact.value, "jane@studio.example");
        assert!(contact.is_primary);
    }
}
