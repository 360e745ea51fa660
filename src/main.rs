//! Hercules - session client for the Hercules security scanning service
//!
//! CLI entry point that dispatches to subcommands.

use clap::{CommandFactory, Parser};
use console::style;
use hercules::cli::{commands, Cli, Commands};
use hercules::config::ConfigManager;
use hercules::error::HerculesResult;
use hercules::ui;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{} failed to start runtime: {}", style("Error:").red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run());

    // Requests abandoned by Ctrl-C or a deadline may still be blocked in
    // the HTTP pool; they must not hold the process open.
    runtime.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> HerculesResult<()> {
    let cli = Cli::parse();

    // Completions need neither config nor logging
    if let Commands::Completions(ref args) = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(args.shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let file_config = manager.load().await?;

    init_logging(cli.verbose, &file_config.general.log_format);
    ui::init_theme();
    debug!("Using config {}", manager.path().display());

    let mut config = file_config.clone();
    if let Some(url) = cli.api_url {
        debug!("Backend overridden to {}", url);
        config.api.base_url = url;
    }

    match cli.command {
        Commands::Completions(_) => Ok(()),
        Commands::Login(args) => commands::login(args, &config).await,
        Commands::Signup(args) => commands::signup(args, &config).await,
        Commands::Logout => commands::logout(&config).await,
        Commands::Whoami(args) => commands::whoami(args, &config).await,
        Commands::ForgotPassword(args) => commands::forgot_password(args, &config).await,
        Commands::Dashboard(args) => commands::dashboard(args, &config).await,
        Commands::Status => commands::status(&config, &manager).await,
        // Edits the file, so overrides must not leak into it
        Commands::Config(args) => commands::config(args, &file_config, &manager).await,
    }
}

/// 0 = warn, 1 = info, 2+ = debug; always to stderr
fn init_logging(verbose: u8, format: &str) {
    let filter = match verbose {
        0 => EnvFilter::new("hercules=warn"),
        1 => EnvFilter::new("hercules=info"),
        _ => EnvFilter::new("hercules=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
