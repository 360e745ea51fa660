//! Status lines, headers and fields for command output
//!
//! Interactive terminals get `cliclack` log lines; plain output gets a
//! bracketed tag such as `[OK]` so CI logs stay greppable.

use super::context::UiContext;
use console::{style, Style};

#[derive(Clone, Copy)]
enum Level {
    Ok,
    Warn,
    Info,
}

impl Level {
    fn tag(self) -> console::StyledObject<&'static str> {
        match self {
            Self::Ok => style("[OK]").green(),
            Self::Warn => style("[WARN]").yellow(),
            Self::Info => style("[INFO]").cyan(),
        }
    }
}

fn status_line(ctx: &UiContext, level: Level, message: &str) {
    if !ctx.use_fancy_output() {
        println!("  {} {}", level.tag(), message);
        return;
    }
    let shown = match level {
        Level::Ok => cliclack::log::success(message),
        Level::Warn => cliclack::log::warning(message),
        Level::Info => cliclack::log::info(message),
    };
    shown.ok();
}

/// Command title
pub fn intro(ctx: &UiContext, title: &str) {
    let title = style(title).blue().bold();
    if ctx.use_fancy_output() {
        cliclack::intro(title).ok();
    } else {
        println!("{}\n", title);
    }
}

/// Closing line after a successful command
pub fn outro_success(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(style(message).green().bold()).ok();
    } else {
        println!("{} {}", Level::Ok.tag(), message);
    }
}

pub fn section(ctx: &UiContext, title: &str) {
    println!();
    let title = style(title).bold();
    if ctx.use_fancy_output() {
        cliclack::log::info(title).ok();
    } else {
        println!("{}", title);
    }
}

pub fn step_ok(ctx: &UiContext, message: &str) {
    status_line(ctx, Level::Ok, message);
}

pub fn step_info(ctx: &UiContext, message: &str) {
    status_line(ctx, Level::Info, message);
}

/// Warning followed by what to do about it
pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    let hint = if ctx.use_fancy_output() {
        style(hint).dim().to_string()
    } else {
        hint.to_string()
    };
    status_line(ctx, Level::Warn, &format!("{} - {}", message, hint));
}

/// Low-emphasis note
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

/// `key: value` field
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    let key = if ctx.use_fancy_output() {
        style(key).dim().to_string()
    } else {
        key.to_string()
    };
    println!("  {}: {}", key, value);
}

/// `key: value` field colored by whether the value is healthy
pub fn key_value_status(ctx: &UiContext, key: &str, value: &str, ok: bool) {
    if ctx.use_fancy_output() {
        let tint = if ok {
            Style::new().green()
        } else {
            Style::new().yellow()
        };
        println!("  {}: {}", style(key).dim(), tint.apply_to(value));
    } else {
        let level = if ok { Level::Ok } else { Level::Warn };
        println!("  {} {}: {}", level.tag(), key, value);
    }
}
