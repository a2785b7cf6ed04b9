//! Access policies: per-action authorization and per-viewer visibility.
//!
//! Each content family gets one declarative rule table, checked once per
//! request, instead of role checks scattered across call sites. Policies
//! are pure functions over `(viewer, action, record)` — they never touch
//! storage or session state.

pub mod content;
pub mod message;
pub mod profile;

use serde::{Deserialize, Serialize};

use crate::types::{OwnerId, Publishable};

pub use content::{ContentAction, ContentPolicy};
pub use message::{MessageAction, MessagePolicy};
pub use profile::{ProfileAction, ProfilePolicy};

/// A composable visibility filter over content items, derived per viewer.
///
/// Applied by stores at the query layer so that pagination totals and
/// listing counts never leak the existence of draft items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopePredicate {
    /// No filter: all items (admin).
    All,
    /// Items owned by the given account, plus anything published (editor).
    OwnedOrPublished(OwnerId),
    /// Published items only (anonymous and plain users).
    PublishedOnly,
    /// No items at all.
    Nothing,
}

impl ScopePredicate {
    /// Whether an item falls inside this scope.
    pub fn matches<P: Publishable + ?Sized>(&self, item: &P) -> bool {
        match self {
            Self::All => true,
            Self::OwnedOrPublished(owner) => item.owner_of() == *owner || item.is_published(),
            Self::PublishedOnly => item.is_published(),
            Self::Nothing => false,
        }
    }
}
