//! Backend API plumbing
//!
//! The session layer talks to the backend through the [`Transport`] trait so
//! tests can script responses. [`UreqTransport`] is the production
//! implementation.

pub mod response;
pub mod transport;

pub use response::{error_message, normalize_token, AuthGrant};
pub use transport::UreqTransport;

use crate::error::HerculesResult;
use async_trait::async_trait;
use serde_json::Value;

/// Endpoint paths, relative to the configured base URL
pub mod endpoints {
    pub const LOGIN: &str = "/auth/login";
    pub const SIGNUP: &str = "/auth/signup";
    pub const FORGOT_PASSWORD: &str = "/auth/forgot-password";
    pub const CHECK_AUTH: &str = "/api/check-auth/";
    pub const LOGOUT: &str = "/api/logout/";
    pub const USER_STATS: &str = "/api/user-stats/";
    pub const RECENT_SCANS: &str = "/api/recent-scans/";
    pub const ROOT: &str = "/";
}

/// HTTP method used by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: &'static str,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn get(path: &'static str) -> Self {
        Self {
            method: Method::Get,
            path,
            body: None,
            bearer: None,
        }
    }

    pub fn post(path: &'static str, body: Value) -> Self {
        Self {
            method: Method::Post,
            path,
            body: Some(body),
            bearer: None,
        }
    }

    /// POST without a body
    pub fn post_empty(path: &'static str) -> Self {
        Self {
            method: Method::Post,
            path,
            body: None,
            bearer: None,
        }
    }

    /// Attach a bearer token
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// Status and raw body of a backend response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the backend rejected the bearer credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}

/// Network dependency of the session manager
///
/// Implementations return `Ok` for every HTTP response regardless of status
/// and `Err(HerculesError::Transport)` only when no response arrived.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and wait for the response
    async fn send(&self, request: ApiRequest) -> HerculesResult<ApiResponse>;
}
