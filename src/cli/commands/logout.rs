//! Logout command - end the session on both sides

use super::open_session;
use crate::config::Config;
use crate::error::HerculesResult;
use crate::ui::{self, UiContext};

/// Execute the logout command. Succeeds even when the backend is down.
pub async fn execute(config: &Config) -> HerculesResult<()> {
    let ctx = UiContext::detect();
    let session = open_session(config).await?;

    session.logout().await;

    ui::step_ok(&ctx, "Signed out");
    Ok(())
}
