//! Health check types
//!
//! Reports how a journal on disk compares with its catalog and manifest.

use serde::{Deserialize, Serialize};

/// Overall result of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// Every managed file and folder is present and tracked
    Healthy,
    /// Some managed files or required folders are absent
    Missing,
    /// Some managed files were edited by the user or are untracked
    Drifted,
    /// The manifest is unreadable
    Broken,
}

impl CheckStatus {
    fn severity(self) -> u8 {
        match self {
            Self::Healthy => 0,
            Self::Missing => 1,
            Self::Drifted => 2,
            Self::Broken => 3,
        }
    }
}

/// One file or folder that needs attention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftItem {
    /// Path relative to the journal root
    pub file: String,
    pub description: String,
}

impl DriftItem {
    pub fn new(file: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            description: description.into(),
        }
    }
}

/// Report from a check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub status: CheckStatus,
    /// Tracked files whose content no longer matches the manifest
    pub drifted: Vec<DriftItem>,
    /// Managed files or required folders not on disk
    pub missing: Vec<DriftItem>,
    /// Managed paths that exist on disk without a manifest record
    pub untracked: Vec<DriftItem>,
    pub messages: Vec<String>,
}

impl CheckReport {
    pub fn healthy() -> Self {
        Self {
            status: CheckStatus::Healthy,
            drifted: Vec::new(),
            missing: Vec::new(),
            untracked: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn broken(message: String) -> Self {
        Self {
            status: CheckStatus::Broken,
            messages: vec![message],
            ..Self::healthy()
        }
    }

    /// Build a report from findings, deriving the status.
    pub fn from_findings(
        drifted: Vec<DriftItem>,
        missing: Vec<DriftItem>,
        untracked: Vec<DriftItem>,
    ) -> Self {
        let status = if !drifted.is_empty() || !untracked.is_empty() {
            CheckStatus::Drifted
        } else if !missing.is_empty() {
            CheckStatus::Missing
        } else {
            CheckStatus::Healthy
        };
        Self {
            status,
            drifted,
            missing,
            untracked,
            messages: Vec::new(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Healthy
    }

    /// Merge two reports; the status is the worse of the two:
    /// Broken > Drifted > Missing > Healthy
    pub fn merge(mut self, other: CheckReport) -> Self {
        self.drifted.extend(other.drifted);
        self.missing.extend(other.missing);
        self.untracked.extend(other.untracked);
        self.messages.extend(other.messages);
        if other.status.severity() > self.status.severity() {
            self.status = other.status;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_report_is_empty() {
        let report = CheckReport::healthy();
        assert!(report.is_healthy());
        assert!(report.drifted.is_empty());
        assert!(report.missing.is_empty());
        assert!(report.untracked.is_empty());
    }

    #[test]
    fn drift_outranks_missing() {
        let report = CheckReport::from_findings(
            vec![DriftItem::new("a.md", "edited")],
            vec![DriftItem::new("b.md", "missing")],
            Vec::new(),
        );
        assert_eq!(report.status, CheckStatus::Drifted);
    }

    #[test]
    fn merge_keeps_worst_status() {
        let missing = CheckReport::from_findings(
            Vec::new(),
            vec![DriftItem::new("daily", "folder missing")],
            Vec::new(),
        );
        let merged = missing.merge(CheckReport::broken("bad manifest".into()));
        assert_eq!(merged.status, CheckStatus::Broken);
        assert_eq!(merged.missing.len(), 1);
        assert_eq!(merged.messages, vec!["bad manifest"]);

        let merged = CheckReport::healthy().merge(CheckReport::from_findings(
            Vec::new(),
            vec![DriftItem::new("x", "y")],
            Vec::new(),
        ));
        assert_eq!(merged.status, CheckStatus::Missing);
    }
}
