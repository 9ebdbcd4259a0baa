use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("unknown"), Environment::Development);
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    // No env var is required; providers without credentials are simply
    // reported unavailable at lookup time.
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "creatorlens/0.1 (profile-lookup)");
    assert!(cfg.providers.nanoinfluencer_api_key.is_none());
    assert!(cfg.providers.ensembledata_api_token.is_none());
}

#[test]
fn build_app_config_reads_provider_credentials() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("NANOINF_API_KEY", "nano-key");
    map.insert("ENSEMBLEDATA_API_TOKEN", "ed-token");
    map.insert("ENSEMBLEDATA_BASE_URL", "http://localhost:9000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.providers.nanoinfluencer_api_key.as_deref(),
        Some("nano-key")
    );
    assert_eq!(
        cfg.providers.ensembledata_api_token.as_deref(),
        Some("ed-token")
    );
    assert_eq!(
        cfg.providers.ensembledata_base_url.as_deref(),
        Some("http://localhost:9000")
    );
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("CREATORLENS_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CREATORLENS_BIND_ADDR"),
        "expected InvalidEnvVar(CREATORLENS_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_timeout() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("CREATORLENS_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CREATORLENS_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CREATORLENS_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn debug_redacts_credentials() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("NANOINF_API_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret"), "secret leaked: {debug}");
    assert!(debug.contains("[redacted]"));
}
