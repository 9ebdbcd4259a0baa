//! Adapter for the `NanoInfluencer` creator data API.
//!
//! Wraps `reqwest` with `NanoInfluencer`-specific error handling, API key
//! management, and typed response deserialization. The API nests the record
//! under a `"creator"` key and reports engagement as a 0-1 fraction, which is
//! scaled to the 0-100 percentage the canonical schema uses.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use creatorlens_core::{
    normalize_username, ContactDetail, Platform, ProviderError, StandardizedProfile,
};

use crate::adapter::ProviderAdapter;

const PROVIDER: &str = "nanoinfluencer";
const DEFAULT_BASE_URL: &str = "https://api.nanoinfluencer.io/";
const SUPPORTED_PLATFORMS: [Platform; 3] =
    [Platform::Instagram, Platform::TikTok, Platform::YouTube];
const DEFAULT_PRIORITY: u32 = 10;

/// Client for the `NanoInfluencer` REST API.
///
/// Use [`NanoinfluencerAdapter::new`] for production or
/// [`NanoinfluencerAdapter::with_base_url`] to point at a mock server in
/// tests. A missing API key makes the adapter report unavailable rather than
/// failing construction.
pub struct NanoinfluencerAdapter {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl NanoinfluencerAdapter {
    /// Creates a new adapter pointed at the production `NanoInfluencer` API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
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
        api_key: Option<String>,
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

        // Normalise: the base URL must end with a slash so Url::join appends
        // the endpoint path instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ProviderError::InvalidInput {
            provider: PROVIDER.to_string(),
            reason: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    fn creator_url(&self, username: &str, platform: Platform) -> Result<Url, ProviderError> {
        self.base_url
            .join(&format!("v1/creators/{platform}/{username}"))
            .map_err(|e| ProviderError::InvalidInput {
                provider: PROVIDER.to_string(),
                reason: format!("cannot build request URL: {e}"),
            })
    }

    fn classify_status(status: StatusCode, username: &str, body: &str) -> ProviderError {
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
            StatusCode::BAD_REQUEST => ProviderError::InvalidInput {
                provider: PROVIDER.to_string(),
                reason: payload_message(body)
                    .unwrap_or_else(|| "request rejected by provider".to_string()),
            },
            other => ProviderError::Upstream {
                provider: PROVIDER.to_string(),
                message: format!("unexpected HTTP status {other}"),
                retryable: true,
            },
        }
    }

    fn classify_payload_error(error: ErrorBody, username: &str) -> ProviderError {
        match error.code.as_str() {
            "ACCOUNT_NOT_FOUND" => ProviderError::UserNotFound {
                provider: PROVIDER.to_string(),
                username: username.to_string(),
            },
            "ACCOUNT_PRIVATE" => ProviderError::PrivateProfile {
                provider: PROVIDER.to_string(),
                username: username.to_string(),
            },
            "INVALID_HANDLE" => ProviderError::InvalidInput {
                provider: PROVIDER.to_string(),
                reason: error.message,
            },
            "RATE_LIMITED" => ProviderError::RateLimited {
                provider: PROVIDER.to_string(),
            },
            _ => ProviderError::Upstream {
                provider: PROVIDER.to_string(),
                message: error.message,
                retryable: error.retryable,
            },
        }
    }
}

#[async_trait]
impl ProviderAdapter for NanoinfluencerAdapter {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn priority(&self) -> u32 {
        DEFAULT_PRIORITY
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
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
        let url = self.creator_url(username, platform)?;

        let mut request = self.client.get(url.clone());
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request.send().await.map_err(|source| ProviderError::Http {
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

        // The API can report failure inside a 200 body.
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
            return Err(Self::classify_payload_error(envelope.error, username));
        }

        let envelope: CreatorEnvelope =
            serde_json::from_str(&body).map_err(|source| ProviderError::Deserialize {
                provider: PROVIDER.to_string(),
                context: format!("creators/{platform}/{username}"),
                source,
            })?;

        Ok(map_creator(username, platform, envelope.creator))
    }
}

/// Map the vendor payload into the canonical schema.
///
/// Anything the payload omits keeps the baseline default.
fn map_creator(username: &str, platform: Platform, creator: CreatorPayload) -> StandardizedProfile {
    let mut profile = StandardizedProfile::baseline(username, platform, PROVIDER);

    profile.external_id = creator.id;
    profile.name = creator.display_name;
    profile.profile_image = creator.avatar_url;
    profile.followers = creator.followers;
    profile.following_count = creator.following;
    profile.subscriber_count = creator.subscribers;
    profile.content_count = creator.media_count;
    // Upstream reports a 0-1 fraction; the canonical scale is 0-100.
    profile.engagement_rate = creator.engagement.rate * 100.0;
    profile.average_likes = creator.engagement.avg_likes;
    profile.average_views = creator.engagement.avg_views;
    profile.is_verified = creator.verified;
    profile.gender = creator.gender;
    profile.language = creator.language;
    profile.introduction = creator.bio;
    profile.age_group = creator.age_group;
    profile.platform_account_type = creator.account_type;
    profile.creator_location.country = creator.location.country;
    profile.creator_location.city = creator.location.city;
    profile.creator_location.state = creator.location.state;
    profile.contact_details = creator
        .emails
        .into_iter()
        .filter(|e| !e.address.is_empty())
        .map(|e| ContactDetail {
            kind: "email".to_string(),
            value: e.address,
            contact_type: e.kind,
            is_primary: e.primary,
        })
        .collect();
    if let Some(url) = creator.profile_url.filter(|u| !u.is_empty()) {
        profile.url = url;
    }

    profile
}

fn payload_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error.message)
        .filter(|m| !m.is_empty())
}

#[derive(Debug, Deserialize)]
struct CreatorEnvelope {
    creator: CreatorPayload,
}

#[derive(Debug, Default, Deserialize)]
struct CreatorPayload {
    #[serde(default)]
    id: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    avatar_url: String,
    #[serde(default)]
    followers: i64,
    #[serde(default)]
    following: i64,
    #[serde(default)]
    subscribers: Option<i64>,
    #[serde(default)]
    media_count: Option<i64>,
    #[serde(default)]
    engagement: EngagementPayload,
    #[serde(default)]
    verified: bool,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    bio: String,
    #[serde(default)]
    age_group: Option<String>,
    #[serde(default)]
    account_type: String,
    #[serde(default)]
    location: LocationPayload,
    #[serde(default)]
    emails: Vec<EmailPayload>,
    #[serde(default)]
    profile_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EngagementPayload {
    #[serde(default)]
    rate: f64,
    #[serde(default)]
    avg_likes: i64,
    #[serde(default)]
    avg_views: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct LocationPayload {
    country: Option<String>,
    city: Option<String>,
    state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmailPayload {
    #[serde(default)]
    address: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    primary: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default = "default_retryable")]
    retryable: bool,
}

fn default_retryable() -> bool {
    true
}
