//! The adapter contract every provider integration implements.

use async_trait::async_trait;
use serde::Serialize;

use creatorlens_core::{Platform, ProviderError, StandardizedProfile};

/// One integration with a third-party profile data vendor.
///
/// Adapters are constructed once at startup and are stateless afterwards;
/// every call is independent. The adapter owns the translation from its
/// vendor's error vocabulary (HTTP status, payload error codes) into
/// [`ProviderError`] — the manager never inspects raw upstream detail.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Stable tag recorded as `provider_source` on returned profiles.
    fn name(&self) -> &'static str;

    /// Static ordering hint; lower is tried first.
    fn priority(&self) -> u32;

    /// Whether this adapter can currently be used, e.g. a credential is
    /// configured. Must be a cheap O(1) check with no I/O; the manager calls
    /// it on every request.
    fn is_available(&self) -> bool;

    /// Platforms this vendor has data for.
    fn supported_platforms(&self) -> &[Platform];

    fn supports(&self, platform: Platform) -> bool {
        self.supported_platforms().contains(&platform)
    }

    /// Fetch and normalize a profile.
    ///
    /// `username` arrives pre-validated but may still carry a leading `@`;
    /// adapters strip it before building URLs. A failure never yields a
    /// partially populated profile.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ProviderError`]; ambiguous upstream failures
    /// land in [`ProviderError::Upstream`] with `retryable: true`.
    async fn fetch_profile(
        &self,
        username: &str,
        platform: Platform,
    ) -> Result<StandardizedProfile, ProviderError>;
}

/// Configuration snapshot for one adapter, for diagnostics and UI.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub name: String,
    pub available: bool,
    pub supported_platforms: Vec<Platform>,
    pub priority: u32,
}
