//! Dashboard data for the signed-in user

use crate::api::endpoints;
use crate::error::HerculesResult;
use crate::session::SessionManager;
use serde::{Deserialize, Serialize};

/// Account totals shown at the top of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_scans: u64,
    pub vulnerabilities_found: u64,
    pub bounties_earned: u64,
    pub reports_submitted: u64,
}

/// Scan state as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Completed,
    Running,
    Failed,
    #[serde(untagged)]
    Other(String),
}

impl ScanStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "completed",
            Self::Running => "running",
            Self::Failed => "failed",
            Self::Other(s) => s,
        }
    }
}

/// One row of the recent-scans list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub id: u64,
    pub target: String,
    #[serde(rename = "type")]
    pub scan_type: String,
    pub status: ScanStatus,
    #[serde(default)]
    pub vulnerabilities: u64,
    /// Human-readable age ("2 hours ago"), as sent by the backend
    #[serde(default)]
    pub created_at: String,
}

/// Fetch account totals
pub async fn user_stats(session: &SessionManager) -> HerculesResult<UserStats> {
    session.authorized_get(endpoints::USER_STATS).await
}

/// Fetch the most recent scans, newest first
pub async fn recent_scans(session: &SessionManager) -> HerculesResult<Vec<ScanSummary>> {
    session.authorized_get(endpoints::RECENT_SCANS).await
}

/// Total findings across completed scans
pub fn completed_findings(scans: &[ScanSummary]) -> u64 {
    scans
        .iter()
        .filter(|s| s.status == ScanStatus::Completed)
        .map(|s| s.vulnerabilities)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCANS: &str = r#"[
        {"id":1,"target":"app.example.com","type":"Deep Scan","status":"completed","vulnerabilities":12,"created_at":"Running..."},
        {"id":2,"target":"api.startup.io","type":"Quick Scan","status":"running","vulnerabilities":0,"created_at":"5 hours ago"},
        {"id":3,"target":"auth.service.com","type":"API Scan","status":"queued","vulnerabilities":0,"created_at":"1 hours ago"},
        {"id":4,"target":"mobile.banking.com","type":"Quick Scan","status":"completed","vulnerabilities":7,"created_at":"9 hours ago"}
    ]"#;

    #[test]
    fn scans_deserialize_backend_shape() {
        let scans: Vec<ScanSummary> = serde_json::from_str(SCANS).unwrap();
        assert_eq!(scans.len(), 4);
        assert_eq!(scans[0].scan_type, "Deep Scan");
        assert_eq!(scans[1].status, ScanStatus::Running);
        assert_eq!(scans[2].status, ScanStatus::Other("queued".to_string()));
        assert_eq!(scans[2].status.as_str(), "queued");
    }

    #[test]
    fn completed_findings_ignores_running() {
        let scans: Vec<ScanSummary> = serde_json::from_str(SCANS).unwrap();
        assert_eq!(completed_findings(&scans), 19);
        assert_eq!(completed_findings(&[]), 0);
    }

    #[test]
    fn stats_deserialize() {
        let stats: UserStats = serde_json::from_str(
            r#"{"total_scans":47,"vulnerabilities_found":156,"bounties_earned":12450,"reports_submitted":34}"#,
        )
        .unwrap();
        assert_eq!(stats.bounties_earned, 12450);
    }
}
