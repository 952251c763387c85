//! Peer-review flag and comment thread persistence

use chrono::{DateTime, Utc};
use shared_types::{decode_peer_review, iso_timestamp, Actor, Comment, PeerReview};
use uuid::Uuid;

use crate::attribution::reconcile;
use crate::error::StoreError;
use crate::permission::PermissionGuard;
use crate::store::{load_record, peer_review_key, read_record, write_record, Loaded, PageStore};

/// Result of a comment deletion request
#[derive(Debug, Clone, PartialEq)]
pub enum CommentDeletion {
    /// The actor does not own the comment; nothing was touched
    Denied,
    /// The page has no review record; nothing was written
    NoRecord,
    /// The thread after removal (unchanged if no comment matched)
    Deleted(PeerReview),
}

/// Fresh comment id: creation time in milliseconds plus a random suffix,
/// so two comments in the same millisecond still differ
pub fn new_comment_id(now: DateTime<Utc>) -> String {
    format!("{}.{}", now.timestamp_millis(), Uuid::new_v4().simple())
}

/// Reads and writes the peer-review record of a page
#[derive(Debug, Clone, Copy, Default)]
pub struct PeerReviewStore;

impl PeerReviewStore {
    pub fn new() -> Self {
        Self
    }

    pub fn load<S: PageStore + ?Sized>(&self, store: &S, page_id: &str) -> Loaded<PeerReview> {
        load_record(store, &peer_review_key(page_id), decode_peer_review)
    }

    /// Current record ahead of a rewrite. `None` when nothing is stored.
    /// Unreadable data is an error: rewriting it would drop the comments.
    fn load_for_update<S: PageStore + ?Sized>(
        &self,
        store: &S,
        page_id: &str,
    ) -> Result<Option<PeerReview>, StoreError> {
        let key = peer_review_key(page_id);
        match read_record(store, &key, decode_peer_review)? {
            Loaded::Empty(_) => Ok(None),
            Loaded::Stored(review) => Ok(Some(review)),
            Loaded::Degraded { reason, .. } => Err(StoreError::Unreadable { key, reason }),
        }
    }

    /// Set or clear the reviewed flag. Comments are left untouched.
    pub fn set_reviewed<S: PageStore + ?Sized>(
        &self,
        store: &mut S,
        page_id: &str,
        reviewed: bool,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<PeerReview, StoreError> {
        let existing = self.load_for_update(&*store, page_id)?.unwrap_or_default();
        let now = iso_timestamp(now);

        let updated = PeerReview {
            reviewed,
            attribution: reconcile(
                reviewed,
                existing.reviewed,
                &existing.attribution,
                actor,
                &now,
            ),
            comments: existing.comments,
        };

        write_record(store, &peer_review_key(page_id), &updated)?;
        tracing::debug!("Page {} reviewed flag set to {}", page_id, reviewed);
        Ok(updated)
    }

    /// Append a comment at the end of the thread
    pub fn add_comment<S: PageStore + ?Sized>(
        &self,
        store: &mut S,
        page_id: &str,
        text: &str,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<PeerReview, StoreError> {
        let mut review = self.load_for_update(&*store, page_id)?.unwrap_or_default();

        let comment = Comment {
            id: Some(new_comment_id(now)),
            text: text.to_string(),
            user: actor.name.clone(),
            user_photo: actor.photo_url.clone(),
            timestamp: iso_timestamp(now),
        };
        tracing::debug!("Adding comment {:?} on page {}", comment.id, page_id);
        review.comments.push(comment);

        write_record(store, &peer_review_key(page_id), &review)?;
        Ok(review)
    }

    /// Remove a comment on behalf of its author.
    ///
    /// The claimed author (`comment_user`) is checked before anything is read;
    /// the stored author of the matching comment is checked again before it is
    /// removed.
    pub fn delete_comment<S: PageStore + ?Sized>(
        &self,
        store: &mut S,
        guard: &PermissionGuard,
        page_id: &str,
        comment_id: &str,
        comment_user: Option<&str>,
        actor: &Actor,
    ) -> Result<CommentDeletion, StoreError> {
        if !guard.can_delete_comment(actor, comment_user) {
            tracing::warn!(
                "{} may not delete comment {} owned by {:?}",
                actor.name,
                comment_id,
                comment_user
            );
            return Ok(CommentDeletion::Denied);
        }

        let Some(mut review) = self.load_for_update(&*store, page_id)? else {
            return Ok(CommentDeletion::NoRecord);
        };

        let position = review
            .comments
            .iter()
            .enumerate()
            .position(|(index, comment)| comment.match_id(index) == comment_id);

        match position {
            Some(index) => {
                let owner = review.comments[index].user.as_str();
                if !guard.can_delete_comment(actor, Some(owner)) {
                    tracing::warn!(
                        "Comment {} belongs to {}, not {}",
                        comment_id,
                        owner,
                        actor.name
                    );
                    return Ok(CommentDeletion::Denied);
                }
                review.comments.remove(index);
            }
            None => tracing::debug!("No comment {} on page {}", comment_id, page_id),
        }

        write_record(store, &peer_review_key(page_id), &review)?;
        Ok(CommentDeletion::Deleted(review))
    }
}
