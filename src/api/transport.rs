//! Blocking `ureq` transport driven from the tokio blocking pool

use super::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::{HerculesError, HerculesResult};
use async_trait::async_trait;
use tracing::debug;
use ureq::Agent;

/// HTTP transport backed by a shared `ureq` agent
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    base_url: String,
}

impl UreqTransport {
    /// Create a transport for the given backend base URL
    pub fn new(base_url: &str) -> HerculesResult<Self> {
        let base_url = normalize_base_url(base_url)?;

        // Non-2xx statuses are data for the session layer, not errors.
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self { agent, base_url })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: ApiRequest) -> HerculesResult<ApiResponse> {
        let agent = self.agent.clone();
        let url = self.url(request.path);
        let method = request.method;
        let path = request.path;

        let result = tokio::task::spawn_blocking(move || execute(&agent, &url, &request))
            .await
            .map_err(|e| HerculesError::Internal(format!("HTTP task failed: {}", e)))?;

        match result {
            Ok(response) => {
                debug!("{:?} {} -> {}", method, path, response.status);
                Ok(response)
            }
            Err(e) => {
                debug!("{:?} {} failed: {}", method, path, e);
                Err(HerculesError::Transport(e.to_string()))
            }
        }
    }
}

fn execute(agent: &Agent, url: &str, request: &ApiRequest) -> Result<ApiResponse, ureq::Error> {
    let bearer = request.bearer.as_ref().map(|t| format!("Bearer {}", t));

    let mut response = match request.method {
        Method::Get => {
            let mut builder = agent.get(url);
            if let Some(value) = bearer {
                builder = builder.header("Authorization", value);
            }
            builder.call()?
        }
        Method::Post => {
            let mut builder = agent.post(url);
            if let Some(value) = bearer {
                builder = builder.header("Authorization", value);
            }
            match &request.body {
                Some(body) => builder.send_json(body)?,
                None => builder.send_empty()?,
            }
        }
    };

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string()?;
    Ok(ApiResponse { status, body })
}

/// Validate a base URL and strip trailing slashes
fn normalize_base_url(raw: &str) -> HerculesResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');

    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| HerculesError::InvalidBaseUrl(raw.to_string()))?;

    if rest.is_empty() {
        return Err(HerculesError::InvalidBaseUrl(raw.to_string()));
    }

    Ok(trimmed.to_string())
}
