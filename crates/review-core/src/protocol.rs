//! Messages exchanged with the review panel
//!
//! Both directions are JSON objects tagged by `type`, with camelCase payload
//! fields, exactly as the panel sends and expects them.

use serde::{Deserialize, Serialize};
use shared_types::serde_helpers::string_or_number;
use shared_types::{ChecklistToggles, ManualChecklist, PeerReview, ReviewToggle, ValidationResults};

/// Requests sent by the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundRequest {
    GetCurrentUser,

    #[serde(rename_all = "camelCase")]
    RunValidation {
        #[serde(default)]
        manual_checks: serde_json::Value,
    },

    #[serde(rename_all = "camelCase")]
    SaveManualChecks {
        manual_checks: ChecklistToggles,
    },

    #[serde(rename_all = "camelCase")]
    SavePeerReview {
        peer_review: ReviewToggle,
    },

    AddComment {
        comment: String,
    },

    #[serde(rename_all = "camelCase")]
    DeleteComment {
        #[serde(deserialize_with = "string_or_number")]
        comment_id: String,
        #[serde(default)]
        comment_user: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    ValidateUncheckPermission {
        #[serde(default)]
        current_review_user: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    SelectFrame {
        #[serde(deserialize_with = "string_or_number")]
        frame_id: String,
    },

    ClosePlugin,

    /// Any kind this version does not know about; ignored
    #[serde(other)]
    Unknown,
}

impl InboundRequest {
    /// Wire name of the request kind
    pub fn kind(&self) -> &'static str {
        match self {
            InboundRequest::GetCurrentUser => "get-current-user",
            InboundRequest::RunValidation { .. } => "run-validation",
            InboundRequest::SaveManualChecks { .. } => "save-manual-checks",
            InboundRequest::SavePeerReview { .. } => "save-peer-review",
            InboundRequest::AddComment { .. } => "add-comment",
            InboundRequest::DeleteComment { .. } => "delete-comment",
            InboundRequest::ValidateUncheckPermission { .. } => "validate-uncheck-permission",
            InboundRequest::SelectFrame { .. } => "select-frame",
            InboundRequest::ClosePlugin => "close-plugin",
            InboundRequest::Unknown => "unknown",
        }
    }
}

/// Events sent to the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundEvent {
    #[serde(rename_all = "camelCase")]
    LoadSavedChecks { saved_checks: ManualChecklist },

    ChecksUpdated { checks: ManualChecklist },

    #[serde(rename_all = "camelCase")]
    LoadPeerReview { peer_review: PeerReview },

    #[serde(rename_all = "camelCase")]
    PeerReviewUpdated { peer_review: PeerReview },

    #[serde(rename_all = "camelCase")]
    CommentAdded { peer_review: PeerReview },

    #[serde(rename_all = "camelCase")]
    CommentDeleted { peer_review: PeerReview },

    #[serde(rename_all = "camelCase")]
    CurrentUserInfo { current_user: String },

    UncheckPermissionGranted,

    #[serde(rename_all = "camelCase")]
    UncheckPermissionDenied { original_reviewer: String },

    DeletePermissionDenied,

    #[serde(rename_all = "camelCase")]
    PageInfo { page_name: String },

    AutoValidationResults { results: ValidationResults },

    ValidationResults { results: ValidationResults },
}

impl OutboundEvent {
    /// Wire name of the event kind
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundEvent::LoadSavedChecks { .. } => "load-saved-checks",
            OutboundEvent::ChecksUpdated { .. } => "checks-updated",
            OutboundEvent::LoadPeerReview { .. } => "load-peer-review",
            OutboundEvent::PeerReviewUpdated { .. } => "peer-review-updated",
            OutboundEvent::CommentAdded { .. } => "comment-added",
            OutboundEvent::CommentDeleted { .. } => "comment-deleted",
            OutboundEvent::CurrentUserInfo { .. } => "current-user-info",
            OutboundEvent::UncheckPermissionGranted => "uncheck-permission-granted",
            OutboundEvent::UncheckPermissionDenied { .. } => "uncheck-permission-denied",
            OutboundEvent::DeletePermissionDenied => "delete-permission-denied",
            OutboundEvent::PageInfo { .. } => "page-info",
            OutboundEvent::AutoValidationResults { .. } => "auto-validation-results",
            OutboundEvent::ValidationResults { .. } => "validation-results",
        }
    }
}
