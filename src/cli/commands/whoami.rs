//! Whoami command - show the signed-in user

use super::{open_session, timed};
use crate::cli::args::{OutputFormat, WhoamiArgs};
use crate::config::Config;
use crate::error::{HerculesError, HerculesResult};
use crate::session::SessionManager;
use crate::ui::{self, UiContext};

/// Execute the whoami command
pub async fn execute(args: WhoamiArgs, config: &Config) -> HerculesResult<()> {
    let session = open_session(config).await?;

    let user = timed(config, session.ensure_session())
        .await?
        .map_err(|_| HerculesError::NotAuthenticated)?;

    match args.format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "user": user,
                "token": session.token_fingerprint(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => print_user(&session, &user),
    }

    Ok(())
}

fn print_user(session: &SessionManager, user: &crate::session::User) {
    let ctx = UiContext::detect();
    ui::section(&ctx, "Signed in");
    ui::key_value(&ctx, "ID", &user.id);
    ui::key_value(&ctx, "Email", &user.email);
    if !user.name.is_empty() {
        ui::key_value(&ctx, "Name", &user.name);
    }
    if let Some(fp) = session.token_fingerprint() {
        ui::key_value(&ctx, "Token", &fp);
    }
}
