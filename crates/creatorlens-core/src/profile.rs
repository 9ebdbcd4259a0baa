//! Canonical creator profile schema shared by every provider adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Where the creator is located, as far as the provider knows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorLocation {
    pub country: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// A contact surfaced by the provider (typically an email address).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetail {
    /// Kind of contact, e.g. `"email"`.
    pub kind: String,
    pub value: String,
    /// Provider-reported classification, e.g. `"business"` or `"personal"`.
    pub contact_type: String,
    pub is_primary: bool,
}

/// The unified profile record all adapters map into.
///
/// Fields a provider does not supply take a safe default (`0` for counts,
/// `None` for nullable fields, `""` for text) so downstream consumers see a
/// stable shape regardless of which provider answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardizedProfile {
    /// Provider-assigned identifier for the creator account.
    pub external_id: String,
    /// Handle without the leading `@`.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Avatar URL, possibly empty.
    pub profile_image: String,
    pub followers: i64,
    pub following_count: i64,
    pub subscriber_count: Option<i64>,
    pub content_count: Option<i64>,
    /// Percentage on the 0-100 scale, not a 0-1 fraction.
    pub engagement_rate: f64,
    pub average_likes: i64,
    pub average_views: Option<i64>,
    pub is_verified: bool,
    pub gender: String,
    pub language: String,
    pub introduction: String,
    /// Not populated by all providers.
    pub age_group: Option<String>,
    /// Coarse account classification, e.g. `"personal"` or `"business"`.
    pub platform_account_type: String,
    pub creator_location: CreatorLocation,
    pub contact_details: Vec<ContactDetail>,
    /// Canonical profile URL on the origin platform.
    pub url: String,
    pub platform: Platform,
    /// Which adapter produced this record, e.g. `"nanoinfluencer"`.
    pub provider_source: String,
    pub fetched_at: DateTime<Utc>,
}

impl StandardizedProfile {
    /// Skeleton record with every field at its documented default.
    ///
    /// Adapters start from this and overwrite the fields their payload
    /// actually carries, so anything upstream omits still lands on a
    /// stable value. The `url` is pre-filled from the platform template
    /// and replaced only if the payload supplies its own.
    #[must_use]
    pub fn baseline(username: &str, platform: Platform, provider_source: &str) -> Self {
        Self {
            external_id: String::new(),
            username: username.to_string(),
            name: String::new(),
            profile_image: String::new(),
            followers: 0,
            following_count: 0,
            subscriber_count: None,
            content_count: None,
            engagement_rate: 0.0,
            average_likes: 0,
            average_views: None,
            is_verified: false,
            gender: String::new(),
            language: String::new(),
            introduction: String::new(),
            age_group: None,
            platform_account_type: String::new(),
            creator_location: CreatorLocation::default(),
            contact_details: Vec::new(),
            url: platform.profile_url(username),
            platform,
            provider_source: provider_source.to_string(),
            fetched_at: Utc::now(),
        }
    }
}
