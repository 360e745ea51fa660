//! Custom theme for cliclack prompts

use cliclack::ThemeState;
use console::Style;

/// Hercules theme with blue branding
#[derive(Debug, Clone, Default)]
pub struct HerculesTheme;

impl cliclack::Theme for HerculesTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().blue(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().blue().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().blue(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().green(),
        }
    }
}

/// Install the theme for all prompts
pub fn init_theme() {
    cliclack::set_theme(HerculesTheme);
}
