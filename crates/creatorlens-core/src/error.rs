//! Error taxonomy for provider lookups.
//!
//! Adapters are the translation boundary: whatever the upstream API said
//! (HTTP status, payload error code) is mapped into this enum before it
//! leaves the adapter. The manager branches only on the taxonomy, never on
//! raw upstream detail.

use thiserror::Error;

use crate::platform::Platform;

/// A classified failure from a provider lookup.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested handle does not exist on the provider's index.
    /// User error; trying another provider cannot fix it.
    #[error("{provider}: user \"{username}\" not found")]
    UserNotFound { provider: String, username: String },

    /// The account exists but is not publicly accessible.
    #[error("{provider}: profile \"{username}\" is private")]
    PrivateProfile { provider: String, username: String },

    /// The username/platform combination is malformed in a way the provider
    /// rejects outright.
    #[error("{provider}: invalid input: {reason}")]
    InvalidInput { provider: String, reason: String },

    /// The provider is throttling. Transient; triggers fallback to the next
    /// provider rather than a retry of the same one.
    #[error("{provider}: rate limited")]
    RateLimited { provider: String },

    /// The provider reported a failure that fits no other bucket.
    /// `retryable: false` means the provider itself said a retry will never
    /// succeed.
    #[error("{provider}: upstream error: {message}")]
    Upstream {
        provider: String,
        message: String,
        retryable: bool,
    },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("{provider}: HTTP error: {source}")]
    Http {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be deserialized into the expected shape.
    #[error("{provider}: JSON deserialization error for {context}: {source}")]
    Deserialize {
        provider: String,
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// No adapter is configured and available for the requested platform.
    /// Raised before any network call.
    #[error("no providers available for platform {platform}")]
    NoProvidersAvailable { platform: Platform },

    /// Every eligible adapter was tried and all failed with non-user errors.
    /// Carries only the last attempt's detail; earlier attempts are logged.
    #[error("all providers failed for platform {platform} (last: {last_provider}: {message})")]
    AllProvidersFailed {
        platform: Platform,
        last_provider: String,
        message: String,
    },
}

impl ProviderError {
    /// Stable snake_case code, suitable for API envelopes and logs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ProviderError::UserNotFound { .. } => "user_not_found",
            ProviderError::PrivateProfile { .. } => "private_profile",
            ProviderError::InvalidInput { .. } => "invalid_input",
            ProviderError::RateLimited { .. } => "rate_limited",
            ProviderError::Upstream { .. } => "upstream_error",
            ProviderError::Http { .. } => "http_error",
            ProviderError::Deserialize { .. } => "deserialize_error",
            ProviderError::NoProvidersAvailable { .. } => "no_providers_available",
            ProviderError::AllProvidersFailed { .. } => "all_providers_failed",
        }
    }

    /// True for failures caused by the input itself (nonexistent or private
    /// account, malformed handle), which no other provider can fix.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ProviderError::UserNotFound { .. }
                | ProviderError::PrivateProfile { .. }
                | ProviderError::InvalidInput { .. }
        )
    }

    /// Whether the manager should move on to the next adapter after this
    /// failure. User errors terminate the whole lookup instead.
    #[must_use]
    pub fn should_fall_back(&self) -> bool {
        !self.is_user_error()
    }

    /// The adapter that produced this error, when there is one.
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        match self {
            ProviderError::UserNotFound { provider, .. }
            | ProviderError::PrivateProfile { provider, .. }
            | ProviderError::InvalidInput { provider, .. }
            | ProviderError::RateLimited { provider }
            | ProviderError::Upstream { provider, .. }
            | ProviderError::Http { provider, .. }
            | ProviderError::Deserialize { provider, .. } => Some(provider),
            ProviderError::AllProvidersFailed { last_provider, .. } => Some(last_provider),
            ProviderError::NoProvidersAvailable { .. } => None,
        }
    }
}
