use shared_types::{OverviewBoardReport, PageNode};

use crate::frames::top_level_frames;

/// Pass when some top-level frame looks like an overview board.
///
/// Either word is enough here, unlike the exemption used by the other rules.
pub fn validate_overview_board(page: &PageNode) -> OverviewBoardReport {
    let found = top_level_frames(page)
        .into_iter()
        .map(|frame| frame.name())
        .find(|name| {
            let lower = name.to_lowercase();
            lower.contains("overview") || lower.contains("board")
        })
        .map(str::to_string);

    tracing::debug!("Overview board lookup: {:?}", found);

    OverviewBoardReport {
        passed: found.is_some(),
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::SceneNode;

    #[test]
    fn test_board_alone_is_enough() {
        let page = PageNode::new("0:1", "Page")
            .with_children(vec![SceneNode::frame("1", "Board Review")]);
        let report = validate_overview_board(&page);
        assert!(report.passed);
        assert_eq!(report.found.as_deref(), Some("Board Review"));
    }

    #[test]
    fn test_first_match_wins() {
        let page = PageNode::new("0:1", "Page").with_children(vec![
            SceneNode::frame("1", "Checkout payment screen"),
            SceneNode::frame("2", "project overview"),
            SceneNode::frame("3", "Overview Board"),
        ]);
        assert_eq!(
            validate_overview_board(&page).found.as_deref(),
            Some("project overview")
        );
    }

    #[test]
    fn test_missing_board_fails() {
        let page = PageNode::new("0:1", "Page")
            .with_children(vec![SceneNode::frame("1", "Checkout payment screen")]);
        let report = validate_overview_board(&page);
        assert!(!report.passed);
        assert!(report.found.is_none());
    }

    #[test]
    fn test_board_inside_section_is_not_top_level() {
        let page = PageNode::new("0:1", "Page").with_children(vec![SceneNode::section(
            "1", "Intro",
        )
        .with_children(vec![SceneNode::frame("2", "Overview Board")])]);
        let report = validate_overview_board(&page);
        assert!(!report.passed);
        assert!(report.found.is_none());
    }
}
