//! Terminal output and prompts
//!
//! Uses `cliclack` in interactive terminals and falls back to plain
//! line-oriented output in CI or when piped.

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, key_value_status, outro_success, remark, section, step_info,
    step_ok, step_warn_hint,
};
pub use progress::TaskSpinner;
pub use prompts::{input_or, password_or};
pub use theme::{init_theme, HerculesTheme};
