//! Durable storage for the bearer token

use crate::config::ConfigManager;
use crate::error::{HerculesError, HerculesResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;
use tracing::{debug, warn};

/// Storage dependency of the session manager.
///
/// Holds at most one token; absence means anonymous.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any
    async fn load(&self) -> HerculesResult<Option<String>>;

    /// Replace the stored token
    async fn save(&self, token: &str) -> HerculesResult<()>;

    /// Remove the stored token; succeeds when nothing is stored
    async fn clear(&self) -> HerculesResult<()>;
}

/// On-disk token record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Token stored as a JSON file readable only by the owner
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store under the state directory, named after the storage key
    pub fn new(storage_key: &str) -> Self {
        Self {
            path: ConfigManager::token_path(storage_key),
        }
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> HerculesResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            HerculesError::io(format!("reading token file {}", self.path.display()), e)
        })?;

        match serde_json::from_str::<StoredToken>(&content) {
            Ok(stored) if !stored.token.is_empty() => Ok(Some(stored.token)),
            Ok(_) => Ok(None),
            Err(e) => {
                // A corrupt file is treated as anonymous, never as a session
                warn!("Ignoring unreadable token file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    async fn save(&self, token: &str) -> HerculesResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| HerculesError::io("creating token directory", e))?;
        }

        let stored = StoredToken {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&stored)?;

        fs::write(&self.path, content).await.map_err(|e| {
            HerculesError::io(format!("writing token file {}", self.path.display()), e)
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, perms)
                .map_err(|e| HerculesError::io("setting token file permissions", e))?;
        }

        debug!("Stored session token at {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> HerculesResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).await.map_err(|e| {
                HerculesError::io(format!("removing token file {}", self.path.display()), e)
            })?;
            debug!("Removed session token {}", self.path.display());
        }
        Ok(())
    }
}

/// Process-local token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> HerculesResult<Option<String>> {
        Ok(self.slot().clone().filter(|t| !t.is_empty()))
    }

    async fn save(&self, token: &str) -> HerculesResult<()> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> HerculesResult<()> {
        *self.slot() = None;
        Ok(())
    }
}
