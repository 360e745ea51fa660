//! Forgot-password command

use super::{open_session, timed};
use crate::cli::args::ForgotPasswordArgs;
use crate::config::Config;
use crate::error::HerculesResult;
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the forgot-password command
pub async fn execute(args: ForgotPasswordArgs, config: &Config) -> HerculesResult<()> {
    let ctx = UiContext::detect();

    let email = ui::input_or(&ctx, args.email, "Email", "you@example.com", "email").await?;
    let session = open_session(config).await?;

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Requesting password reset...");

    match timed(config, session.forgot_password(&email)).await.and_then(|r| r) {
        Ok(()) => {
            spinner.stop("Reset requested");
            ui::remark(
                &ctx,
                "If an account exists, you will receive reset instructions.",
            );
            Ok(())
        }
        Err(e) => {
            spinner.stop_error("Reset request failed");
            Err(e)
        }
    }
}
