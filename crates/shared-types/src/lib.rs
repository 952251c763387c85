pub mod report;
pub mod scene;
pub mod serde_helpers;
pub mod stored;
pub mod types;

pub use report::{
    FrameIssue, FrameNameReport, IssueKind, OverviewBoardReport, SectionReport, ValidationResults,
};
pub use scene::{NodeType, PageNode, SceneNode};
pub use stored::{decode_checklist, decode_peer_review, DecodeError};
pub use types::{
    iso_timestamp, Actor, Attribution, CheckItem, ChecklistToggles, Comment, ItemKey,
    ManualChecklist, PeerReview, ReviewToggle, UNKNOWN_USER,
};
