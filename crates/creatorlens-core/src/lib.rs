pub mod app_config;
mod config;
mod error;
mod platform;
mod profile;

pub use app_config::{AppConfig, Environment, ProviderCredentials};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use error::ProviderError;
pub use platform::{normalize_username, validate_username, Platform, UsernameError};
pub use profile::{ContactDetail, CreatorLocation, StandardizedProfile};
