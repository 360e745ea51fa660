//! Interactive prompts with non-interactive fallback

use super::context::UiContext;
use crate::error::{HerculesError, HerculesResult};

/// Use `provided` if set, otherwise ask for a text value.
///
/// In non-interactive mode a missing value is an error naming `flag`.
pub async fn input_or(
    ctx: &UiContext,
    provided: Option<String>,
    message: &str,
    placeholder: &str,
    flag: &str,
) -> HerculesResult<String> {
    if let Some(value) = provided {
        return Ok(value);
    }
    if !ctx.is_interactive() {
        return Err(missing(flag));
    }

    let message = message.to_string();
    let placeholder = placeholder.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::input(&message)
            .placeholder(&placeholder)
            .interact::<String>()
    })
    .await
    .map_err(|e| HerculesError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| HerculesError::User(format!("Prompt failed: {}", e)))
}

/// Use `provided` if set, otherwise ask for a password without echo
pub async fn password_or(
    ctx: &UiContext,
    provided: Option<String>,
    message: &str,
    flag: &str,
) -> HerculesResult<String> {
    if let Some(value) = provided {
        return Ok(value);
    }
    if !ctx.is_interactive() {
        return Err(missing(flag));
    }

    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || cliclack::password(&message).mask('▪').interact())
        .await
        .map_err(|e| HerculesError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| HerculesError::User(format!("Prompt failed: {}", e)))
}

fn missing(flag: &str) -> HerculesError {
    HerculesError::User(format!("--{} is required when not running interactively", flag))
}
