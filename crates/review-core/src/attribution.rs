//! Sticky attribution shared by checklist items and the reviewed flag

use shared_types::{Actor, Attribution};

/// Attribution of a flag after a set/clear request.
///
/// Clearing always wipes attribution. Setting keeps the first checker when the
/// flag was already set with a timestamp; otherwise `actor` is stamped at `now`.
/// Items migrated from the legacy boolean shape carry no timestamp, so the
/// next checker claims them.
pub fn reconcile(
    set: bool,
    was_set: bool,
    prior: &Attribution,
    actor: &Actor,
    now: &str,
) -> Attribution {
    if !set {
        return Attribution::default();
    }

    match (&prior.timestamp, was_set) {
        (Some(timestamp), true) => match &prior.user {
            Some(user) => Attribution {
                timestamp: Some(timestamp.clone()),
                user: Some(user.clone()),
                user_photo: prior.user_photo.clone(),
            },
            None => Attribution {
                timestamp: Some(timestamp.clone()),
                user: Some(actor.name.clone()),
                user_photo: actor.photo_url.clone(),
            },
        },
        _ => Attribution::stamped(actor, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn alice() -> Actor {
        Actor::new("Alice", Some("https://img/alice.png".to_string()))
    }

    fn bob() -> Actor {
        Actor::new("Bob", None)
    }

    #[test]
    fn test_first_set_stamps_actor() {
        let result = reconcile(true, false, &Attribution::default(), &alice(), "T1");
        assert_eq!(result, Attribution::stamped(&alice(), "T1"));
    }

    #[test]
    fn test_set_again_keeps_first_checker() {
        let prior = Attribution::stamped(&alice(), "T1");
        let result = reconcile(true, true, &prior, &bob(), "T2");
        assert_eq!(result, prior);
    }

    #[test]
    fn test_clear_wipes_attribution() {
        let prior = Attribution::stamped(&alice(), "T1");
        assert!(reconcile(false, true, &prior, &bob(), "T2").is_empty());
    }

    #[test]
    fn test_legacy_checked_item_is_claimed() {
        let result = reconcile(true, true, &Attribution::default(), &bob(), "T2");
        assert_eq!(result, Attribution::stamped(&bob(), "T2"));
    }

    #[test]
    fn test_missing_user_is_filled_in() {
        let prior = Attribution {
            timestamp: Some("T1".to_string()),
            user: None,
            user_photo: None,
        };
        let result = reconcile(true, true, &prior, &bob(), "T2");
        assert_eq!(result.timestamp.as_deref(), Some("T1"));
        assert_eq!(result.user.as_deref(), Some("Bob"));
    }
}
