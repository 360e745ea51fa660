//! CLI command implementations

pub mod config;
pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod status;
pub mod whoami;

pub use config::execute as config;
pub use dashboard::execute as dashboard;
pub use forgot_password::execute as forgot_password;
pub use login::{login, signup};
pub use logout::execute as logout;
pub use status::execute as status;
pub use whoami::execute as whoami;

use crate::api::UreqTransport;
use crate::audit::AuditLog;
use crate::config::{Config, ConfigManager};
use crate::error::{HerculesError, HerculesResult};
use crate::session::{within_deadline, AuthOutcome, FileTokenStore, SessionManager};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Session manager wired to the configured backend and token file
pub(crate) async fn open_session(config: &Config) -> HerculesResult<SessionManager> {
    ConfigManager::ensure_state_dir().await?;

    let transport = UreqTransport::new(&config.api.base_url)?;
    let store = FileTokenStore::new(&config.session.storage_key);

    Ok(SessionManager::new(Arc::new(transport), Arc::new(store)).with_audit(AuditLog::new(config)))
}

fn deadline(config: &Config) -> Option<Duration> {
    (config.api.timeout_secs > 0).then(|| Duration::from_secs(config.api.timeout_secs))
}

/// Await an auth call under the configured deadline
pub(crate) async fn timed_outcome<F>(config: &Config, call: F) -> AuthOutcome
where
    F: Future<Output = AuthOutcome>,
{
    match deadline(config) {
        Some(limit) => within_deadline(limit, call).await,
        None => call.await,
    }
}

/// Await any call under the configured deadline
pub(crate) async fn timed<F: Future>(config: &Config, call: F) -> HerculesResult<F::Output> {
    match deadline(config) {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| HerculesError::Timeout(limit)),
        None => Ok(call.await),
    }
}
