use shared_types::{PageNode, SectionReport};

use crate::frames::{is_overview_board, top_level_frames};

/// Every top-level frame other than the overview board should have a section
/// ancestor
pub fn validate_sections(page: &PageNode) -> SectionReport {
    let frames: Vec<_> = top_level_frames(page)
        .into_iter()
        .filter(|frame| !is_overview_board(frame.name()))
        .collect();

    let in_sections = frames.iter().filter(|frame| frame.in_section).count();

    tracing::debug!(
        "{} of {} frames are inside sections",
        in_sections,
        frames.len()
    );

    SectionReport {
        passed: in_sections == frames.len(),
        total_frames: frames.len(),
        frames_in_sections: in_sections,
    }
}
