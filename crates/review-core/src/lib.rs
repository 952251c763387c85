//! Review state, permissions and the plugin session
//!
//! Everything here is host-agnostic: the design tool is reached through
//! [`DesignHost`] and page-scoped persistence through [`PageStore`]. The
//! wasm plugin and the file-backed harness each provide their own
//! implementations.

pub mod attribution;
pub mod checklist;
pub mod error;
pub mod host;
pub mod peer_review;
pub mod permission;
pub mod protocol;
pub mod session;
pub mod store;

pub use checklist::CheckStateStore;
pub use error::{HostError, PermissionError, StoreError};
pub use host::{DesignHost, PageInfo};
pub use peer_review::{new_comment_id, CommentDeletion, PeerReviewStore};
pub use permission::{
    ExactNameMatch, IdentityPolicy, PermissionGuard, UncheckDecision, UNKNOWN_REVIEWER,
};
pub use protocol::{InboundRequest, OutboundEvent};
pub use session::{SessionController, SessionPhase};
pub use store::{checklist_key, peer_review_key, Loaded, MemoryPageStore, PageStore};
