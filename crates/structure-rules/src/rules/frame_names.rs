use std::collections::{HashMap, HashSet};

use shared_types::{FrameIssue, FrameNameReport, IssueKind, PageNode};

use crate::frames::{is_overview_board, top_level_frames, TopLevelFrame};

/// Names shorter than this many UTF-16 code units are flagged
pub const MIN_NAME_LENGTH: usize = 15;

/// Default names the host gives to freshly drawn layers
const PLACEHOLDER_NAMES: [&str; 3] = ["Frame", "Rectangle", "Ellipse"];

/// Check the names of all top-level frames.
///
/// Overview boards are exempt from the per-frame rules but still count
/// towards duplicate detection.
pub fn validate_frame_names(page: &PageNode) -> FrameNameReport {
    let frames = top_level_frames(page);
    tracing::debug!("Validating {} top-level frames", frames.len());

    let mut issues = Vec::new();

    for frame in &frames {
        let name = frame.name();
        if is_overview_board(name) {
            tracing::debug!("Skipping overview board frame: {:?}", name);
            continue;
        }
        issues.extend(check_name(frame));
    }

    issues.extend(find_duplicates(&frames));

    FrameNameReport::from_issues(frames.len(), issues)
}

/// Per-frame rules. They are independent, so one name can collect several issues.
fn check_name(frame: &TopLevelFrame<'_>) -> Vec<FrameIssue> {
    let name = frame.name();
    let mut issues = Vec::new();

    if name.is_empty() || PLACEHOLDER_NAMES.contains(&name) {
        issues.push(issue(
            frame,
            IssueKind::GenericName,
            if name.is_empty() { "Unnamed" } else { name },
        ));
    }

    if name.to_lowercase().contains("frame") {
        issues.push(issue(frame, IssueKind::ContainsFrame, name));
    }

    if name.encode_utf16().count() < MIN_NAME_LENGTH {
        issues.push(issue(frame, IssueKind::TooShort, name));
    }

    issues
}

/// Every frame sharing its exact name with another, grouped by name in order
/// of first appearance
fn find_duplicates(frames: &[TopLevelFrame<'_>]) -> Vec<FrameIssue> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for frame in frames {
        *counts.entry(frame.name()).or_default() += 1;
    }

    let mut seen = HashSet::new();
    let mut issues = Vec::new();
    for frame in frames {
        let name = frame.name();
        if counts[name] < 2 || !seen.insert(name) {
            continue;
        }
        issues.extend(
            frames
                .iter()
                .filter(|other| other.name() == name)
                .map(|other| issue(other, IssueKind::DuplicateName, name)),
        );
    }
    issues
}

fn issue(frame: &TopLevelFrame<'_>, kind: IssueKind, name: &str) -> FrameIssue {
    FrameIssue {
        frame_id: frame.id().to_string(),
        issue: kind,
        name: name.to_string(),
    }
}
