//! Ownership checks for undoing another user's action
//!
//! Only the user who set a flag or posted a comment may clear or delete it.
//! Identities are compared by display name by default, so two users the
//! host cannot identify (both "Unknown User") are treated as the same person.

use shared_types::Actor;

use crate::error::PermissionError;

/// Shown when a denial cannot name the original reviewer
pub const UNKNOWN_REVIEWER: &str = "the original reviewer";

/// Decides whether two recorded user names denote the same identity
pub trait IdentityPolicy: Send + Sync {
    fn same_identity(&self, actor: &str, owner: &str) -> Result<bool, PermissionError>;
}

/// Exact, case-sensitive name equality
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactNameMatch;

impl IdentityPolicy for ExactNameMatch {
    fn same_identity(&self, actor: &str, owner: &str) -> Result<bool, PermissionError> {
        Ok(actor == owner)
    }
}

/// Answer to an uncheck-permission request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UncheckDecision {
    Granted,
    Denied { original_reviewer: String },
}

/// Stateless ownership policy. Fails closed: any evaluation error denies.
pub struct PermissionGuard {
    policy: Box<dyn IdentityPolicy>,
}

impl PermissionGuard {
    pub fn new() -> Self {
        Self::with_policy(ExactNameMatch)
    }

    pub fn with_policy(policy: impl IdentityPolicy + 'static) -> Self {
        Self {
            policy: Box::new(policy),
        }
    }

    fn evaluate(&self, actor: &Actor, owner: Option<&str>) -> Result<bool, PermissionError> {
        let owner = owner.ok_or(PermissionError::MissingOwner)?;
        self.policy.same_identity(&actor.name, owner)
    }

    fn allowed(&self, actor: &Actor, owner: Option<&str>) -> bool {
        self.evaluate(actor, owner).unwrap_or_else(|e| {
            tracing::warn!("Permission check failed, denying: {}", e);
            false
        })
    }

    /// May `actor` clear a flag set by `original_user`?
    pub fn can_uncheck(&self, actor: &Actor, original_user: Option<&str>) -> bool {
        self.allowed(actor, original_user)
    }

    /// May `actor` delete a comment posted by `comment_owner`?
    pub fn can_delete_comment(&self, actor: &Actor, comment_owner: Option<&str>) -> bool {
        self.allowed(actor, comment_owner)
    }

    /// [`Self::can_uncheck`] with the context the panel needs to explain a denial
    pub fn uncheck_decision(&self, actor: &Actor, original_user: Option<&str>) -> UncheckDecision {
        if self.can_uncheck(actor, original_user) {
            UncheckDecision::Granted
        } else {
            UncheckDecision::Denied {
                original_reviewer: original_user.unwrap_or(UNKNOWN_REVIEWER).to_string(),
            }
        }
    }
}

impl Default for PermissionGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PermissionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionGuard").finish_non_exhaustive()
    }
}
