//! Error types for Hercules
//!
//! All modules use `HerculesResult<T>` as their return type.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for Hercules operations
pub type HerculesResult<T> = Result<T, HerculesError>;

/// All errors that can occur in Hercules
#[derive(Error, Debug)]
pub enum HerculesError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    // Session errors
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Sign-in failed: {0}")]
    InvalidCredentials(String),

    #[error("Failed to persist session token: {0}")]
    TokenPersist(String),

    // Backend errors
    #[error("Network error: {0}")]
    Transport(String),

    #[error("{0}")]
    NetworkFailure(String),

    #[error("Request timed out after {}", format_duration(.0))]
    Timeout(Duration),

    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("Request to {endpoint} failed ({status}): {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

/// Whole seconds as `30s`, anything else as `250ms`
fn format_duration(d: &Duration) -> String {
    if d.subsec_nanos() == 0 && d.as_secs() > 0 {
        format!("{}s", d.as_secs())
    } else {
        format!("{}ms", d.as_millis())
    }
}

impl HerculesError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a malformed response error
    pub fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::NetworkFailure(_)
                | Self::Timeout(_)
                | Self::MalformedResponse { .. }
        ) || matches!(self, Self::Api { status, .. } if *status >= 500)
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotAuthenticated => Some("Run: hercules login"),
            Self::Transport(_) | Self::NetworkFailure(_) | Self::Timeout(_) => {
                Some("Check that the backend is running, or set --api-url / HERCULES_API_URL")
            }
            Self::InvalidBaseUrl(_) => Some("Run: hercules config set api.base_url <url>"),
            Self::ConfigInvalid { .. } => Some("Run: hercules config init --force"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HerculesError::NotAuthenticated;
        assert!(err.to_string().contains("Not signed in"));

        let err = HerculesError::Api {
            endpoint: "/api/user-stats/".to_string(),
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request to /api/user-stats/ failed (500): boom"
        );
    }

    #[test]
    fn error_hint() {
        let err = HerculesError::NotAuthenticated;
        assert_eq!(err.hint(), Some("Run: hercules login"));
        assert!(HerculesError::User("x".into()).hint().is_none());
    }

    #[test]
    fn error_retryable() {
        assert!(HerculesError::Transport("refused".into()).is_retryable());
        assert!(HerculesError::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(!HerculesError::NotAuthenticated.is_retryable());
        assert!(!HerculesError::InvalidCredentials("bad".into()).is_retryable());

        let server = HerculesError::Api {
            endpoint: "/".into(),
            status: 503,
            message: "down".into(),
        };
        assert!(server.is_retryable());
    }

    #[test]
    fn timeout_display_keeps_subsecond_deadlines() {
        let err = HerculesError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Request timed out after 30s");

        let err = HerculesError::Timeout(Duration::from_millis(20));
        assert_eq!(err.to_string(), "Request timed out after 20ms");

        let err = HerculesError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "Request timed out after 1500ms");
    }
}
