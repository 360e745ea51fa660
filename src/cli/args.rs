//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Hercules - session client for the Hercules security scanning service
///
/// Signs in to the Hercules backend, keeps the session token on disk and
/// shows the dashboard for the signed-in account.
#[derive(Parser, Debug)]
#[command(name = "hercules")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "HERCULES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides api.base_url)
    #[arg(long, global = true, env = "HERCULES_API_URL")]
    pub api_url: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login(LoginArgs),

    /// Create an account and sign in
    Signup(SignupArgs),

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami(WhoamiArgs),

    /// Request a password reset email
    ForgotPassword(ForgotPasswordArgs),

    /// Show scan statistics and recent scans
    Dashboard(DashboardArgs),

    /// Check backend reachability and session state
    Status,

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the login command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Account email (prompted if omitted)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Account password (prompted if omitted)
    #[arg(long, env = "HERCULES_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for the signup command
#[derive(Parser, Debug)]
pub struct SignupArgs {
    /// Full name (prompted if omitted)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Account email (prompted if omitted)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Account password (prompted if omitted)
    #[arg(long, env = "HERCULES_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for the whoami command
#[derive(Parser, Debug)]
pub struct WhoamiArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the forgot-password command
#[derive(Parser, Debug)]
pub struct ForgotPasswordArgs {
    /// Account email (prompted if omitted)
    #[arg(short, long)]
    pub email: Option<String>,
}

/// Arguments for the dashboard command
#[derive(Parser, Debug)]
pub struct DashboardArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.base_url)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}

/// Output format for user-facing listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
}
