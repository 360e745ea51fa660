//! Dashboard command - account totals and recent scans

use super::{open_session, timed};
use crate::cli::args::{DashboardArgs, OutputFormat};
use crate::config::Config;
use crate::dashboard::{self, completed_findings, ScanStatus, ScanSummary, UserStats};
use crate::error::{HerculesError, HerculesResult};
use crate::session::ViewScope;
use crate::ui::{self, UiContext};
use console::style;
use tracing::debug;

/// Execute the dashboard command
pub async fn execute(args: DashboardArgs, config: &Config) -> HerculesResult<()> {
    let session = open_session(config).await?;

    let user = timed(config, session.ensure_session())
        .await?
        .map_err(|_| HerculesError::NotAuthenticated)?;

    // Ctrl-C closes the view and stops the wait; late responses are dropped.
    let scope = ViewScope::new();
    let watcher = {
        let scope = scope.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                scope.close();
            }
        })
    };

    let loaded = scope
        .run(timed(config, async {
            tokio::try_join!(
                dashboard::user_stats(&session),
                dashboard::recent_scans(&session)
            )
        }))
        .await;
    watcher.abort();

    let (stats, scans) = match loaded {
        Some(result) => result??,
        None => {
            debug!("Dashboard closed before data arrived");
            return Err(HerculesError::User("Interrupted".to_string()));
        }
    };

    match args.format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "user": user,
                "stats": stats,
                "recent_scans": scans,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => print_dashboard(&user.email, &stats, &scans),
    }

    Ok(())
}

fn print_dashboard(email: &str, stats: &UserStats, scans: &[ScanSummary]) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, &format!("Dashboard for {}", email));

    ui::section(&ctx, "Overview");
    ui::key_value(&ctx, "Total scans", &stats.total_scans.to_string());
    ui::key_value(
        &ctx,
        "Vulnerabilities found",
        &stats.vulnerabilities_found.to_string(),
    );
    ui::key_value(&ctx, "Bounties earned", &format!("${}", stats.bounties_earned));
    ui::key_value(
        &ctx,
        "Reports submitted",
        &stats.reports_submitted.to_string(),
    );

    ui::section(&ctx, "Recent scans");
    if scans.is_empty() {
        ui::step_info(&ctx, "No scans yet");
        return;
    }

    println!(
        "{:<6} {:<28} {:<12} {:<10} {:<6} {}",
        style("ID").bold(),
        style("TARGET").bold(),
        style("TYPE").bold(),
        style("STATUS").bold(),
        style("VULNS").bold(),
        style("STARTED").bold()
    );
    println!("{}", "-".repeat(80));

    for scan in scans {
        let status = match scan.status {
            ScanStatus::Completed => style(scan.status.as_str()).green(),
            ScanStatus::Running => style(scan.status.as_str()).cyan(),
            ScanStatus::Failed => style(scan.status.as_str()).red(),
            ScanStatus::Other(_) => style(scan.status.as_str()).dim(),
        };
        println!(
            "{:<6} {:<28} {:<12} {:<10} {:<6} {}",
            scan.id,
            truncate(&scan.target, 28),
            truncate(&scan.scan_type, 12),
            status,
            scan.vulnerabilities,
            scan.created_at
        );
    }

    ui::remark(
        &ctx,
        &format!("{} findings across completed scans", completed_findings(scans)),
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
