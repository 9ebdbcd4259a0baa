//! Provider orchestration with deterministic, error-classified fallback.

use std::collections::BTreeMap;
use std::sync::Arc;

use creatorlens_core::{AppConfig, Platform, ProviderError, StandardizedProfile};

use crate::adapter::{ProviderAdapter, ProviderStatus};
use crate::ensembledata::EnsembledataAdapter;
use crate::nanoinfluencer::NanoinfluencerAdapter;

/// Ordered collection of provider adapters with a single lookup entry point.
///
/// Constructed once at startup and immutable afterwards; each
/// [`ProviderManager::fetch_profile`] call runs its own independent loop, so
/// concurrent callers never interfere.
pub struct ProviderManager {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
}

impl ProviderManager {
    /// Builds a manager over the given adapters, sorted by ascending
    /// priority. The sort is stable, so adapters sharing a priority keep
    /// their registration order.
    #[must_use]
    pub fn new(mut adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        adapters.sort_by_key(|a| a.priority());
        Self { adapters }
    }

    /// Builds the production adapter set from application config.
    ///
    /// Adapters without credentials are still registered; they simply report
    /// unavailable and show up as such in [`ProviderManager::providers_status`].
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if an underlying HTTP client cannot
    /// be constructed, or [`ProviderError::InvalidInput`] for a malformed
    /// base-URL override.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let creds = &config.providers;

        let nanoinfluencer = match &creds.nanoinfluencer_base_url {
            Some(base) => NanoinfluencerAdapter::with_base_url(
                creds.nanoinfluencer_api_key.clone(),
                config.request_timeout_secs,
                &config.user_agent,
                base,
            )?,
            None => NanoinfluencerAdapter::new(
                creds.nanoinfluencer_api_key.clone(),
                config.request_timeout_secs,
                &config.user_agent,
            )?,
        };

        let ensembledata = match &creds.ensembledata_base_url {
            Some(base) => EnsembledataAdapter::with_base_url(
                creds.ensembledata_api_token.clone(),
                config.request_timeout_secs,
                &config.user_agent,
                base,
            )?,
            None => EnsembledataAdapter::new(
                creds.ensembledata_api_token.clone(),
                config.request_timeout_secs,
                &config.user_agent,
            )?,
        };

        Ok(Self::new(vec![
            Arc::new(nanoinfluencer),
            Arc::new(ensembledata),
        ]))
    }

    /// Fetch a creator profile, trying eligible adapters in order until one
    /// succeeds.
    ///
    /// The eligible set is the configured adapters that are available and
    /// support `platform`. When `preferred_provider` names a member of that
    /// set it is tried first; an unknown or ineligible name is a non-fatal
    /// hint and is ignored. Attempts are strictly sequential — racing
    /// adapters would bill redundant calls to metered vendors, and the
    /// user-error short-circuit needs one result before deciding whether a
    /// next attempt makes sense.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::NoProvidersAvailable`] when the eligible set is
    ///   empty; no network call is made.
    /// - A user error (`UserNotFound`, `PrivateProfile`, `InvalidInput`)
    ///   from the first adapter that reports one; later adapters are not
    ///   tried, since no vendor can fix a nonexistent or private account.
    /// - [`ProviderError::AllProvidersFailed`] when every attempt failed
    ///   with non-user errors, carrying the last attempt's detail. Every
    ///   attempt is individually logged even though only the last is
    ///   surfaced.
    pub async fn fetch_profile(
        &self,
        username: &str,
        platform: Platform,
        preferred_provider: Option<&str>,
    ) -> Result<StandardizedProfile, ProviderError> {
        let mut eligible: Vec<&Arc<dyn ProviderAdapter>> = self
            .adapters
            .iter()
            .filter(|a| a.is_available() && a.supports(platform))
            .collect();

        if eligible.is_empty() {
            tracing::warn!(%platform, "no providers available");
            return Err(ProviderError::NoProvidersAvailable { platform });
        }

        if let Some(name) = preferred_provider {
            if let Some(pos) = eligible.iter().position(|a| a.name() == name) {
                let promoted = eligible.remove(pos);
                eligible.insert(0, promoted);
            } else {
                tracing::debug!(
                    preferred = name,
                    %platform,
                    "preferred provider not eligible; using default order"
                );
            }
        }

        let mut last_error: Option<ProviderError> = None;
        let attempts = eligible.len();

        for (attempt, adapter) in eligible.into_iter().enumerate() {
            tracing::debug!(
                provider = adapter.name(),
                username,
                %platform,
                attempt = attempt + 1,
                attempts,
                "trying provider"
            );

            match adapter.fetch_profile(username, platform).await {
                Ok(profile) => {
                    tracing::info!(
                        provider = adapter.name(),
                        username,
                        %platform,
                        "profile fetched"
                    );
                    return Ok(profile);
                }
                Err(err) if err.is_user_error() => {
                    // Nonexistent, private, or malformed input: another
                    // vendor cannot answer differently, so stop here.
                    tracing::info!(
                        provider = adapter.name(),
                        username,
                        %platform,
                        code = err.code(),
                        "user error, aborting fallback"
                    );
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!(
                        provider = adapter.name(),
                        username,
                        %platform,
                        code = err.code(),
                        error = %err,
                        "provider attempt failed, falling back"
                    );
                    last_error = Some(err);
                }
            }
        }

        // The eligible set was non-empty, so at least one attempt failed.
        let (last_provider, message) = match last_error {
            Some(err) => (
                err.provider().unwrap_or("unknown").to_string(),
                err.to_string(),
            ),
            None => ("unknown".to_string(), "no attempts recorded".to_string()),
        };

        Err(ProviderError::AllProvidersFailed {
            platform,
            last_provider,
            message,
        })
    }

    /// Configuration snapshot covering every adapter, eligible or not.
    /// Performs no network I/O.
    #[must_use]
    pub fn providers_status(&self) -> Vec<ProviderStatus> {
        self.adapters
            .iter()
            .map(|a| ProviderStatus {
                name: a.name().to_string(),
                available: a.is_available(),
                supported_platforms: a.supported_platforms().to_vec(),
                priority: a.priority(),
            })
            .collect()
    }

    /// Adapter name to `is_available()` for every configured adapter.
    #[must_use]
    pub fn health_check(&self) -> BTreeMap<String, bool> {
        self.adapters
            .iter()
            .map(|a| (a.name().to_string(), a.is_available()))
            .collect()
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
