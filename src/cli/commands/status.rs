//! Status command - backend reachability and session state

use super::{open_session, timed};
use crate::config::{Config, ConfigManager};
use crate::error::HerculesResult;
use crate::session::SessionPhase;
use crate::ui::{self, UiContext};

/// Execute the status command
pub async fn execute(config: &Config, manager: &ConfigManager) -> HerculesResult<()> {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Hercules Status");

    ui::section(&ctx, "Configuration");
    ui::key_value(&ctx, "Config file", &manager.path().display().to_string());
    ui::key_value(&ctx, "Backend", &config.api.base_url);
    ui::key_value(
        &ctx,
        "Token file",
        &ConfigManager::token_path(&config.session.storage_key)
            .display()
            .to_string(),
    );

    let session = open_session(config).await?;

    ui::section(&ctx, "Backend");
    let reachable = timed(config, session.ping()).await.unwrap_or(false);
    if reachable {
        ui::key_value_status(&ctx, "Reachable", "yes", true);
    } else {
        ui::step_warn_hint(
            &ctx,
            "Backend unreachable",
            "Check that it is running, or set --api-url",
        );
    }

    ui::section(&ctx, "Session");
    if reachable {
        // Outcome is reflected in the phase.
        let _ = timed(config, session.verify()).await;
    }

    match session.phase() {
        SessionPhase::Authenticated => {
            let email = session
                .current_user()
                .map(|u| u.email)
                .unwrap_or_default();
            ui::key_value_status(&ctx, "Signed in as", &email, true);
            if let Some(fp) = session.token_fingerprint() {
                ui::key_value(&ctx, "Token", &fp);
            }
        }
        phase => {
            ui::key_value_status(&ctx, "State", phase.as_str(), false);
            ui::remark(&ctx, "Run: hercules login");
        }
    }

    Ok(())
}
