//! Draft/published lifecycle transitions.
//!
//! Two states, two transitions, no authorization: the policy layer
//! approves a transition before this module is invoked.
//!
//! ```text
//!           publish
//!   Draft ───────────▶ Published
//!         ◀───────────
//!          unpublish
//! ```
//!
//! `published_at` records the first-ever publish time: `publish` sets it
//! only when it is still unset, and `unpublish` leaves it in place so
//! audit trails and sitemaps keep the original date while the item is
//! hidden.

use chrono::{DateTime, Utc};

use crate::types::Publishable;

/// Outcome of a lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The state changed.
    Applied,
    /// The item was already in the target state; permitted, no change.
    NoChange,
}

/// Transition `Draft -> Published`.
///
/// Idempotent in the timestamp: re-publishing an already-published item is
/// a permitted no-op that never resets `published_at`.
pub fn publish<P: Publishable + ?Sized>(item: &mut P, now: DateTime<Utc>) -> Transition {
    if item.first_published_at().is_none() {
        item.set_first_published_at(now);
    }
    if item.is_published() {
        return Transition::NoChange;
    }
    item.set_published(true);
    Transition::Applied
}

/// Transition `Published -> Draft`. `published_at` is untouched.
pub fn unpublish<P: Publishable + ?Sized>(item: &mut P) -> Transition {
    if !item.is_published() {
        return Transition::NoChange;
    }
    item.set_published(false);
    Transition::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentItem, ContentKind, OwnerId};
    use chrono::Duration;

    fn draft() -> ContentItem {
        ContentItem::new_draft(OwnerId::generate(), ContentKind::Post, "T", "b", Utc::now())
    }

    #[test]
    fn test_publish_sets_timestamp_once() {
        let mut item = draft();
        let first = Utc::now();

        assert_eq!(publish(&mut item, first), Transition::Applied);
        assert!(item.published);
        assert_eq!(item.published_at, Some(first));

        let later = first + Duration::hours(1);
        assert_eq!(publish(&mut item, later), Transition::NoChange);
        assert_eq!(item.published_at, Some(first));
    }

    #[test]
    fn test_unpublish_keeps_timestamp() {
        let mut item = draft();
        let first = Utc::now();
        publish(&mut item, first);

        assert_eq!(unpublish(&mut item), Transition::Applied);
        assert!(!item.published);
        assert_eq!(item.published_at, Some(first));
    }

    #[test]
    fn test_republish_after_unpublish_keeps_original_timestamp() {
        let mut item = draft();
        let first = Utc::now();
        publish(&mut item, first);
        unpublish(&mut item);

        let later = first + Duration::days(7);
        assert_eq!(publish(&mut item, later), Transition::Applied);
        assert_eq!(item.published_at, Some(first));
    }

    #[test]
    fn test_unpublish_draft_is_noop() {
        let mut item = draft();
        assert_eq!(unpublish(&mut item), Transition::NoChange);
        assert!(item.published_at.is_none());
    }
}
