use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Credentials and endpoint overrides for the profile data providers.
///
/// A missing credential simply makes that adapter report unavailable; it is
/// not a startup error. Base-URL overrides exist for staging and tests.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    pub nanoinfluencer_api_key: Option<String>,
    pub nanoinfluencer_base_url: Option<String>,
    pub ensembledata_api_token: Option<String>,
    pub ensembledata_base_url: Option<String>,
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field(
                "nanoinfluencer_api_key",
                &self.nanoinfluencer_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("nanoinfluencer_base_url", &self.nanoinfluencer_base_url)
            .field(
                "ensembledata_api_token",
                &self.ensembledata_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("ensembledata_base_url", &self.ensembledata_base_url)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub providers: ProviderCredentials,
}
