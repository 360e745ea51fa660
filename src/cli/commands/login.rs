//! Login and signup commands

use super::{open_session, timed_outcome};
use crate::cli::args::{LoginArgs, SignupArgs};
use crate::config::Config;
use crate::error::{HerculesError, HerculesResult};
use crate::session::{AuthOutcome, Credentials};
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the login command
pub async fn login(args: LoginArgs, config: &Config) -> HerculesResult<()> {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Sign in to Hercules");

    let email = ui::input_or(&ctx, args.email, "Email", "you@example.com", "email").await?;
    let password = ui::password_or(&ctx, args.password, "Password", "password").await?;

    let session = open_session(config).await?;

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Signing in...");
    let outcome = timed_outcome(config, session.login(&Credentials::login(email, password))).await;

    report(&ctx, &mut spinner, outcome, "Signed in")
}

/// Execute the signup command
pub async fn signup(args: SignupArgs, config: &Config) -> HerculesResult<()> {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Create a Hercules account");

    let name = ui::input_or(&ctx, args.name, "Full name", "Ada Lovelace", "name").await?;
    let email = ui::input_or(&ctx, args.email, "Email", "you@example.com", "email").await?;
    let password = ui::password_or(&ctx, args.password, "Password", "password").await?;

    let session = open_session(config).await?;

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Creating account...");
    let credentials = Credentials::signup(email, password, name);
    let outcome = timed_outcome(config, session.signup(&credentials)).await;

    report(&ctx, &mut spinner, outcome, "Account created")
}

fn report(
    ctx: &UiContext,
    spinner: &mut TaskSpinner,
    outcome: AuthOutcome,
    done: &str,
) -> HerculesResult<()> {
    match outcome {
        AuthOutcome::Success { user, .. } => {
            spinner.stop(done);
            ui::key_value(ctx, "Email", &user.email);
            if !user.name.is_empty() {
                ui::key_value(ctx, "Name", &user.name);
            }
            ui::outro_success(ctx, &format!("Welcome, {}", display_name(&user.name, &user.email)));
            Ok(())
        }
        AuthOutcome::InvalidCredentials { message } => {
            spinner.stop_error("Sign-in rejected");
            Err(HerculesError::InvalidCredentials(message))
        }
        AuthOutcome::NetworkFailure { reason } => {
            spinner.stop_error("Backend unreachable");
            Err(HerculesError::NetworkFailure(reason))
        }
        AuthOutcome::Unauthenticated => {
            spinner.clear();
            Err(HerculesError::NotAuthenticated)
        }
    }
}

fn display_name<'a>(name: &'a str, email: &'a str) -> &'a str {
    if name.trim().is_empty() {
        email
    } else {
        name
    }
}
