use crate::app_config::{AppConfig, Environment, ProviderCredentials};

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load the service configuration from the environment.
///
/// A `.env` file is merged in first via `dotenvy`; real environment
/// variables win over file entries.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Like [`load_app_config`] but without touching `.env` files, for callers
/// that manage the process environment themselves.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parsing core behind the two loaders, taking the variable lookup as a
/// closure so tests can drive it from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("CREATORLENS_ENV", "development"));
    let bind_addr = parse_addr("CREATORLENS_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("CREATORLENS_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("CREATORLENS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("CREATORLENS_USER_AGENT", "creatorlens/0.1 (profile-lookup)");

    let providers = ProviderCredentials {
        nanoinfluencer_api_key: lookup("NANOINF_API_KEY").ok(),
        nanoinfluencer_base_url: lookup("NANOINF_BASE_URL").ok(),
        ensembledata_api_token: lookup("ENSEMBLEDATA_API_TOKEN").ok(),
        ensembledata_base_url: lookup("ENSEMBLEDATA_BASE_URL").ok(),
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        request_timeout_secs,
        user_agent,
        providers,
    })
}

// Anything unrecognized counts as development.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
