//! Results of the structural page checks

use serde::{Deserialize, Serialize};

/// Why a frame name was flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    #[serde(rename = "Generic name")]
    GenericName,
    #[serde(rename = "Contains 'frame'")]
    ContainsFrame,
    #[serde(rename = "Too short")]
    TooShort,
    #[serde(rename = "Duplicate name")]
    DuplicateName,
}

impl IssueKind {
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::GenericName => "Generic name",
            IssueKind::ContainsFrame => "Contains 'frame'",
            IssueKind::TooShort => "Too short",
            IssueKind::DuplicateName => "Duplicate name",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameIssue {
    /// Host id of the frame, used by the panel to select it
    pub frame_id: String,
    pub issue: IssueKind,
    pub name: String,
}

impl FrameIssue {
    /// `"<name> (<issue>)"` as listed in the panel
    pub fn detail(&self) -> String {
        format!("{} ({})", self.name, self.issue)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameNameReport {
    pub passed: bool,
    pub count: usize,
    pub total_frames: usize,
    pub details: Vec<String>,
    pub issues: Vec<FrameIssue>,
}

impl FrameNameReport {
    pub fn from_issues(total_frames: usize, issues: Vec<FrameIssue>) -> Self {
        Self {
            passed: issues.is_empty(),
            count: issues.len(),
            total_frames,
            details: issues.iter().map(FrameIssue::detail).collect(),
            issues,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewBoardReport {
    pub passed: bool,
    pub found: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionReport {
    pub passed: bool,
    pub total_frames: usize,
    pub frames_in_sections: usize,
}

/// Structural results bundled with the manual checks the panel passed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResults {
    pub frame_names: FrameNameReport,
    pub overview_board: OverviewBoardReport,
    pub sections: SectionReport,
    pub manual_checks: serde_json::Value,
}

impl ValidationResults {
    pub fn passed(&self) -> bool {
        self.frame_names.passed && self.overview_board.passed && self.sections.passed
    }
}
