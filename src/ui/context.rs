//! UI context for detecting interactive vs CI environments

use std::io::IsTerminal;

/// Environment variables set by common CI providers
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "BUILDKITE",
    "JENKINS_URL",
    "TF_BUILD",
];

/// UI context that determines output and prompt behavior
#[derive(Debug, Clone)]
pub struct UiContext {
    interactive: bool,
}

impl UiContext {
    /// Detect the current environment
    pub fn detect() -> Self {
        let terminal = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
        let in_ci = CI_VARS.iter().any(|var| std::env::var_os(var).is_some());
        Self {
            interactive: terminal && !in_ci,
        }
    }

    /// Plain output, no prompts
    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }

    /// Whether prompts may ask the user for input
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Whether to use spinners and cliclack formatting
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }
}
