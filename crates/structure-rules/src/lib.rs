//! Structural checks for design review pages
//!
//! Each rule is a pure function over a snapshot of the page tree. Rules only
//! look at top-level frames (see [`frames`]).

pub mod frames;
pub mod rules;

pub use frames::{has_section_ancestor, is_overview_board, top_level_frames, TopLevelFrame};
pub use rules::frame_names::validate_frame_names;
pub use rules::overview_board::validate_overview_board;
pub use rules::sections::validate_sections;

use shared_types::{PageNode, ValidationResults};

/// Run all structural rules and bundle them with the manual checks the
/// panel sent along. `null` manual checks become an empty object.
pub fn run_structural_checks(
    page: &PageNode,
    manual_checks: serde_json::Value,
) -> ValidationResults {
    let manual_checks = if manual_checks.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        manual_checks
    };

    ValidationResults {
        frame_names: validate_frame_names(page),
        overview_board: validate_overview_board(page),
        sections: validate_sections(page),
        manual_checks,
    }
}

/// StructureValidator entry point
pub struct StructureValidator;

impl StructureValidator {
    pub fn new() -> Self {
        Self
    }

    /// Run all structural rules against `page`; see [`run_structural_checks`]
    pub fn check(&self, page: &PageNode, manual_checks: serde_json::Value) -> ValidationResults {
        run_structural_checks(page, manual_checks)
    }
}

impl Default for StructureValidator {
    fn default() -> Self {
        Self::new()
    }
}
