//! Plugin session: startup sequence and request dispatch
//!
//! The controller is synchronous. Each request is fully handled, including
//! its store read-modify-write, before the caller can pass the next one.

use shared_types::{Actor, ValidationResults};
use structure_rules::StructureValidator;

use crate::checklist::CheckStateStore;
use crate::host::DesignHost;
use crate::peer_review::{CommentDeletion, PeerReviewStore};
use crate::permission::{IdentityPolicy, PermissionGuard, UncheckDecision};
use crate::protocol::{InboundRequest, OutboundEvent};
use crate::store::PageStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created, startup events not yet produced
    Startup,
    /// Serving panel requests
    Active,
    /// `close-plugin` received; everything is ignored from here on
    Closed,
}

/// Drives one plugin activation against a host and its page store
pub struct SessionController<H, S> {
    host: H,
    store: S,
    phase: SessionPhase,
    checks: CheckStateStore,
    reviews: PeerReviewStore,
    guard: PermissionGuard,
    validator: StructureValidator,
}

impl<H: DesignHost, S: PageStore> SessionController<H, S> {
    pub fn new(host: H, store: S) -> Self {
        Self {
            host,
            store,
            phase: SessionPhase::Startup,
            checks: CheckStateStore::new(),
            reviews: PeerReviewStore::new(),
            guard: PermissionGuard::new(),
            validator: StructureValidator::new(),
        }
    }

    /// Replace the default exact-name identity comparison
    pub fn with_identity_policy(mut self, policy: impl IdentityPolicy + 'static) -> Self {
        self.guard = PermissionGuard::with_policy(policy);
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (H, S) {
        (self.host, self.store)
    }

    fn actor(&self) -> Actor {
        Actor::or_unknown(self.host.current_user())
    }

    fn validation_results(&self, manual_checks: serde_json::Value) -> ValidationResults {
        self.validator.check(&self.host.page_tree(), manual_checks)
    }

    /// Produce the startup events: saved checklist, saved peer review, page
    /// name and the automatic structural validation. Runs once; later calls
    /// return nothing.
    pub fn start(&mut self) -> Vec<OutboundEvent> {
        if self.phase != SessionPhase::Startup {
            tracing::debug!("Session already started");
            return Vec::new();
        }

        let page = self.host.current_page();
        tracing::info!("Starting review session on page {} ({})", page.name, page.id);

        let saved_checks = self.checks.load(&self.store, &page.id).into_inner();
        let peer_review = self.reviews.load(&self.store, &page.id).into_inner();
        let results = self.validation_results(serde_json::Value::Null);

        self.phase = SessionPhase::Active;

        vec![
            OutboundEvent::LoadSavedChecks { saved_checks },
            OutboundEvent::LoadPeerReview { peer_review },
            OutboundEvent::PageInfo {
                page_name: page.name,
            },
            OutboundEvent::AutoValidationResults { results },
        ]
    }

    /// Handle one panel request, returning the event to send back (if any)
    pub fn handle(&mut self, request: InboundRequest) -> Option<OutboundEvent> {
        match self.phase {
            SessionPhase::Active => self.dispatch(request),
            SessionPhase::Startup => {
                tracing::warn!("Ignoring {} before startup", request.kind());
                None
            }
            SessionPhase::Closed => {
                tracing::debug!("Ignoring {} after close", request.kind());
                None
            }
        }
    }

    /// Decode a raw panel message, handle it and encode the reply.
    /// Undecodable messages are logged and dropped.
    pub fn handle_json(&mut self, raw: &str) -> Option<String> {
        let request: InboundRequest = match serde_json::from_str(raw) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Dropping undecodable message: {}", e);
                return None;
            }
        };

        let event = self.handle(request)?;
        match serde_json::to_string(&event) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!("Failed to encode {}: {}", event.kind(), e);
                None
            }
        }
    }

    fn dispatch(&mut self, request: InboundRequest) -> Option<OutboundEvent> {
        tracing::debug!("Handling {}", request.kind());

        match request {
            InboundRequest::GetCurrentUser => Some(OutboundEvent::CurrentUserInfo {
                current_user: self.actor().name,
            }),

            InboundRequest::RunValidation { manual_checks } => {
                Some(OutboundEvent::ValidationResults {
                    results: self.validation_results(manual_checks),
                })
            }

            InboundRequest::SaveManualChecks { manual_checks } => {
                let page = self.host.current_page();
                let actor = self.actor();
                let now = self.host.now();
                match self
                    .checks
                    .save(&mut self.store, &page.id, &manual_checks, &actor, now)
                {
                    Ok(checks) => Some(OutboundEvent::ChecksUpdated { checks }),
                    Err(e) => {
                        tracing::error!("Error saving checks: {}", e);
                        None
                    }
                }
            }

            InboundRequest::SavePeerReview { peer_review } => {
                let page = self.host.current_page();
                let actor = self.actor();
                let now = self.host.now();
                match self.reviews.set_reviewed(
                    &mut self.store,
                    &page.id,
                    peer_review.reviewed,
                    &actor,
                    now,
                ) {
                    Ok(peer_review) => Some(OutboundEvent::PeerReviewUpdated { peer_review }),
                    Err(e) => {
                        tracing::error!("Error saving peer review: {}", e);
                        None
                    }
                }
            }

            InboundRequest::AddComment { comment } => {
                let page = self.host.current_page();
                let actor = self.actor();
                let now = self.host.now();
                match self
                    .reviews
                    .add_comment(&mut self.store, &page.id, &comment, &actor, now)
                {
                    Ok(peer_review) => Some(OutboundEvent::CommentAdded { peer_review }),
                    Err(e) => {
                        tracing::error!("Error adding comment: {}", e);
                        None
                    }
                }
            }

            InboundRequest::DeleteComment {
                comment_id,
                comment_user,
            } => {
                let page = self.host.current_page();
                let actor = self.actor();
                let outcome = self.reviews.delete_comment(
                    &mut self.store,
                    &self.guard,
                    &page.id,
                    &comment_id,
                    comment_user.as_deref(),
                    &actor,
                );
                match outcome {
                    Ok(CommentDeletion::Deleted(peer_review)) => {
                        Some(OutboundEvent::CommentDeleted { peer_review })
                    }
                    Ok(CommentDeletion::Denied) => Some(OutboundEvent::DeletePermissionDenied),
                    Ok(CommentDeletion::NoRecord) => None,
                    Err(e) => {
                        tracing::error!("Error deleting comment: {}", e);
                        None
                    }
                }
            }

            InboundRequest::ValidateUncheckPermission {
                current_review_user,
            } => {
                let actor = self.actor();
                match self
                    .guard
                    .uncheck_decision(&actor, current_review_user.as_deref())
                {
                    UncheckDecision::Granted => Some(OutboundEvent::UncheckPermissionGranted),
                    UncheckDecision::Denied { original_reviewer } => {
                        Some(OutboundEvent::UncheckPermissionDenied { original_reviewer })
                    }
                }
            }

            InboundRequest::SelectFrame { frame_id } => {
                if let Err(e) = self.host.select_node(&frame_id) {
                    tracing::warn!("Error selecting frame: {}", e);
                }
                None
            }

            InboundRequest::ClosePlugin => {
                tracing::info!("Closing review session");
                self.phase = SessionPhase::Closed;
                self.host.close();
                None
            }

            InboundRequest::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use crate::host::PageInfo;
    use crate::store::MemoryPageStore;
    use chrono::{DateTime, TimeZone, Utc};
    use shared_types::{PageNode, SceneNode};

    struct StubHost {
        user: Option<Actor>,
        closed: bool,
    }

    impl DesignHost for StubHost {
        fn current_page(&self) -> PageInfo {
            PageInfo {
                id: "1:0".to_string(),
                name: "Checkout".to_string(),
            }
        }

        fn current_user(&self) -> Option<Actor> {
            self.user.clone()
        }

        fn page_tree(&self) -> PageNode {
            PageNode::new("1:0", "Checkout")
                .with_children(vec![SceneNode::frame("2:1", "Frame")])
        }

        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        }

        fn select_node(&mut self, node_id: &str) -> Result<(), HostError> {
            Err(HostError::NodeNotFound(node_id.to_string()))
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    fn controller(user: Option<Actor>) -> SessionController<StubHost, MemoryPageStore> {
        SessionController::new(StubHost { user, closed: false }, MemoryPageStore::new())
    }

    #[test]
    fn test_requests_before_start_are_ignored() {
        let mut session = controller(None);
        assert_eq!(session.handle(InboundRequest::GetCurrentUser), None);
        assert_eq!(session.phase(), SessionPhase::Startup);
    }

    #[test]
    fn test_start_runs_once() {
        let mut session = controller(None);
        assert_eq!(session.start().len(), 4);
        assert!(session.start().is_empty());
        assert_eq!(session.phase(), SessionPhase::Active);
    }

    #[test]
    fn test_anonymous_user_is_reported_as_unknown() {
        let mut session = controller(None);
        session.start();
        assert_eq!(
            session.handle(InboundRequest::GetCurrentUser),
            Some(OutboundEvent::CurrentUserInfo {
                current_user: shared_types::UNKNOWN_USER.to_string()
            })
        );
    }

    #[test]
    fn test_unresolved_selection_is_swallowed() {
        let mut session = controller(None);
        session.start();
        let reply = session.handle(InboundRequest::SelectFrame {
            frame_id: "404:1".to_string(),
        });
        assert_eq!(reply, None);
        assert_eq!(session.phase(), SessionPhase::Active);
    }

    #[test]
    fn test_close_ends_session() {
        let mut session = controller(Some(Actor::new("Alice", None)));
        session.start();
        assert_eq!(session.handle(InboundRequest::ClosePlugin), None);
        assert!(session.host().closed);
        assert_eq!(session.handle(InboundRequest::GetCurrentUser), None);
    }

    #[test]
    fn test_handle_json_drops_garbage() {
        let mut session = controller(None);
        session.start();
        assert_eq!(session.handle_json("not json"), None);
        assert_eq!(session.handle_json(r#"{"type": "mystery"}"#), None);
        let reply = session
            .handle_json(r#"{"type": "get-current-user"}"#)
            .unwrap();
        assert!(reply.contains("current-user-info"));
    }
}
