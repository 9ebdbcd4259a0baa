//! Social platform tags and username normalization.

use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Social platform a creator profile lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    #[serde(rename = "tiktok")]
    TikTok,
    #[serde(rename = "youtube")]
    YouTube,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Instagram, Platform::TikTok, Platform::YouTube];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::YouTube => "youtube",
        }
    }

    /// Canonical profile URL on the origin platform.
    ///
    /// `username` must already be normalized (no leading `@`); callers go
    /// through [`normalize_username`] first.
    #[must_use]
    pub fn profile_url(self, username: &str) -> String {
        match self {
            Platform::Instagram => format!("https://www.instagram.com/{username}/"),
            Platform::TikTok => format!("https://www.tiktok.com/@{username}"),
            Platform::YouTube => format!("https://www.youtube.com/@{username}"),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::TikTok),
            "youtube" => Ok(Platform::YouTube),
            other => Err(UsernameError::UnknownPlatform(other.to_string())),
        }
    }
}

/// Validation failures for handles and platform tags supplied by callers.
#[derive(Debug, thiserror::Error)]
pub enum UsernameError {
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("invalid username \"{0}\": must match ^[a-zA-Z0-9._]+$ after stripping a leading @")]
    InvalidUsername(String),
}

/// Strip a single leading `@` from a handle.
#[must_use]
pub fn normalize_username(username: &str) -> &str {
    username.strip_prefix('@').unwrap_or(username)
}

/// Validate a handle and return it normalized (leading `@` removed).
///
/// This is the request-layer check; the provider manager assumes it has
/// already run and does not re-validate.
///
/// # Errors
///
/// Returns [`UsernameError::InvalidUsername`] when the normalized handle is
/// empty or contains characters outside `[a-zA-Z0-9._]`.
pub fn validate_username(username: &str) -> Result<&str, UsernameError> {
    static USERNAME_RE: OnceLock<regex::Regex> = OnceLock::new();
    let re = USERNAME_RE
        .get_or_init(|| regex::Regex::new(r"^[a-zA-Z0-9._]+$").expect("valid regex"));

    let normalized = normalize_username(username);
    if normalized.is_empty() || !re.is_match(normalized) {
        return Err(UsernameError::InvalidUsername(username.to_string()));
    }
    Ok(normalized)
}

#[cfg(test)]
#[path = "platform_test.rs"]
mod tests;
