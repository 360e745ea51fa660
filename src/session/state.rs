//! Session state types

use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Authenticated user as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend user ID, kept opaque (the backend emits integers)
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,

    pub email: String,

    #[serde(default)]
    pub name: String,
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// Credentials for a login or signup attempt. Never persisted.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

impl Credentials {
    /// Credentials for signing in
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: None,
        }
    }

    /// Credentials for creating an account
    pub fn signup(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: Some(name.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// In-memory session record.
///
/// A user is only ever held together with a non-empty token. A token
/// without a user is the transient state while a stored token is verified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    /// Empty session (anonymous)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Session holding a token whose user has not been fetched yet
    pub fn pending(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.is_empty()).then_some(token),
            user: None,
        }
    }

    /// Session for a verified user; an empty token yields an empty session
    pub fn authenticated(token: impl Into<String>, user: User) -> Self {
        let token = token.into();
        if token.is_empty() {
            return Self::empty();
        }
        Self {
            token: Some(token),
            user: Some(user),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Anonymous,
    Verifying,
    Authenticated,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Verifying => "verifying",
            Self::Authenticated => "authenticated",
        }
    }
}

/// Result of a login, signup or verification attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Session established; the token has been persisted
    Success { token: String, user: User },

    /// Backend rejected the request; the message is safe to show
    InvalidCredentials { message: String },

    /// Transient failure; the caller may offer a retry
    NetworkFailure { reason: String },

    /// No valid session
    Unauthenticated,
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The user, for a successful outcome
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Success { user, .. } => Some(user),
            _ => None,
        }
    }
}

/// Short, log-safe fingerprint of a bearer token
pub fn fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(&digest[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "1".to_string(),
            email: "ann@example.com".to_string(),
            name: "Ann".to_string(),
        }
    }

    #[test]
    fn user_id_accepts_number_and_string() {
        let u: User = serde_json::from_str(r#"{"id":42,"email":"a@b.c","name":"A"}"#).unwrap();
        assert_eq!(u.id, "42");

        let u: User = serde_json::from_str(r#"{"id":"abc","email":"a@b.c"}"#).unwrap();
        assert_eq!(u.id, "abc");
        assert_eq!(u.name, "");
    }

    #[test]
    fn authenticated_requires_token() {
        let session = Session::authenticated("", user());
        assert!(session.user().is_none());
        assert!(session.token().is_none());

        let session = Session::authenticated("tok", user());
        assert_eq!(session.token(), Some("tok"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn pending_has_token_without_user() {
        let session = Session::pending("tok");
        assert_eq!(session.token(), Some("tok"));
        assert!(!session.is_authenticated());

        assert_eq!(Session::pending(""), Session::empty());
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = Credentials::login("a@b.c", "hunter22");
        let shown = format!("{:?}", creds);
        assert!(shown.contains("a@b.c"));
        assert!(!shown.contains("hunter22"));
    }

    #[test]
    fn fingerprint_is_stable_and_short() {
        let a = fingerprint("token-value");
        assert_eq!(a.len(), 12);
        assert_eq!(a, fingerprint("token-value"));
        assert_ne!(a, fingerprint("other"));
        assert!(!a.contains("token"));
    }
}
