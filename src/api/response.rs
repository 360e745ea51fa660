//! Response adapters
//!
//! Every quirk of the backend's response shapes is normalized here so the
//! session layer only sees typed values.

use super::ApiResponse;
use crate::error::{HerculesError, HerculesResult};
use crate::session::User;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Token and user issued by a successful login or signup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
struct AuthBody {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
struct CheckAuthBody {
    #[serde(default)]
    authenticated: bool,
    #[serde(default)]
    user: Option<User>,
}

/// Pick the bearer token out of the two field names the backend has used.
///
/// `access_token` takes precedence; empty strings count as absent.
pub fn normalize_token(access_token: Option<String>, token: Option<String>) -> Option<String> {
    access_token
        .filter(|t| !t.is_empty())
        .or_else(|| token.filter(|t| !t.is_empty()))
}

/// Decode a 2xx login/signup body into a grant
pub fn auth_grant(endpoint: &str, response: &ApiResponse) -> HerculesResult<AuthGrant> {
    let body: AuthBody = serde_json::from_str(&response.body)
        .map_err(|e| HerculesError::malformed(endpoint, e.to_string()))?;

    let token = normalize_token(body.access_token, body.token)
        .ok_or_else(|| HerculesError::malformed(endpoint, "No authentication token received"))?;
    let user = body
        .user
        .ok_or_else(|| HerculesError::malformed(endpoint, "No user profile received"))?;

    Ok(AuthGrant { token, user })
}

/// Decode a check-auth body; `Some(user)` only for an authenticated session
pub fn verified_user(response: &ApiResponse) -> Option<User> {
    if !response.is_success() {
        return None;
    }

    let body: CheckAuthBody = serde_json::from_str(&response.body).ok()?;
    if body.authenticated {
        body.user
    } else {
        None
    }
}

/// Decode a JSON body, reporting failures as malformed responses
pub fn parse_json<T: DeserializeOwned>(endpoint: &str, response: &ApiResponse) -> HerculesResult<T> {
    serde_json::from_str(&response.body).map_err(|e| HerculesError::malformed(endpoint, e.to_string()))
}

/// Human-readable message for a failed response.
///
/// JSON bodies yield `detail`, then `message`, then the whole document;
/// other bodies yield their text; an empty body yields `HTTP <status>`.
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value
            .get("detail")
            .and_then(truthy_text)
            .or_else(|| value.get("message").and_then(truthy_text))
            .unwrap_or_else(|| value.to_string()),
        Err(_) => {
            let text = body.trim();
            if text.is_empty() {
                format!("HTTP {}", status)
            } else {
                text.to_string()
            }
        }
    }
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_prefers_access_token() {
        assert_eq!(
            normalize_token(Some("a".into()), Some("b".into())).as_deref(),
            Some("a")
        );
        assert_eq!(normalize_token(None, Some("b".into())).as_deref(), Some("b"));
        assert_eq!(
            normalize_token(Some(String::new()), Some("b".into())).as_deref(),
            Some("b")
        );
        assert!(normalize_token(None, None).is_none());
    }

    #[test]
    fn grant_from_either_field() {
        let resp = ApiResponse::new(
            200,
            r#"{"success":true,"token":"t-1","user":{"id":7,"email":"a@b.c","name":"Ann"}}"#,
        );
        let grant = auth_grant("/auth/login", &resp).unwrap();
        assert_eq!(grant.token, "t-1");
        assert_eq!(grant.user.id, "7");
        assert_eq!(grant.user.name, "Ann");

        let resp = ApiResponse::new(
            200,
            r#"{"access_token":"t-2","user":{"id":"u-9","email":"a@b.c","name":"Ann"}}"#,
        );
        assert_eq!(auth_grant("/auth/login", &resp).unwrap().token, "t-2");
    }

    #[test]
    fn grant_without_token_is_malformed() {
        let resp = ApiResponse::new(200, r#"{"user":{"id":1,"email":"a@b.c","name":"A"}}"#);
        let err = auth_grant("/auth/login", &resp).unwrap_err();
        assert!(err.to_string().contains("No authentication token received"));
    }

    #[test]
    fn grant_from_html_is_malformed() {
        let resp = ApiResponse::new(200, "<html>ok</html>");
        assert!(matches!(
            auth_grant("/auth/login", &resp),
            Err(HerculesError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn verified_user_requires_flag() {
        let ok = ApiResponse::new(
            200,
            r#"{"authenticated":true,"user":{"id":1,"email":"a@b.c","name":"A"}}"#,
        );
        assert_eq!(verified_user(&ok).unwrap().email, "a@b.c");

        let denied = ApiResponse::new(200, r#"{"authenticated":false}"#);
        assert!(verified_user(&denied).is_none());

        let unauthorized = ApiResponse::new(401, r#"{"authenticated":true}"#);
        assert!(verified_user(&unauthorized).is_none());

        let garbage = ApiResponse::new(200, "not json");
        assert!(verified_user(&garbage).is_none());
    }

    #[test]
    fn message_from_detail() {
        assert_eq!(
            error_message(401, r#"{"detail":"Invalid password"}"#),
            "Invalid password"
        );
    }

    #[test]
    fn message_from_message_field() {
        assert_eq!(
            error_message(400, r#"{"success":false,"message":"Email already registered"}"#),
            "Email already registered"
        );
    }

    #[test]
    fn message_falls_back_to_json_text() {
        assert_eq!(error_message(400, r#"{"error":"nope"}"#), r#"{"error":"nope"}"#);
        assert_eq!(error_message(400, r#"{"detail":""}"#), r#"{"detail":""}"#);
    }

    #[test]
    fn message_falls_back_to_raw_text() {
        assert_eq!(
            error_message(500, "Internal Server Error"),
            "Internal Server Error"
        );
    }

    #[test]
    fn message_falls_back_to_status() {
        assert_eq!(error_message(502, ""), "HTTP 502");
        assert_eq!(error_message(502, "  \n"), "HTTP 502");
    }
}
