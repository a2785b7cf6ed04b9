//! The profile policy for skills and timeline entries.
//!
//! These records have no draft state: reads are public, mutations follow
//! the same ownership rule as content (admin, or an editor acting on its
//! own records).

use crate::types::{OwnerId, Viewer};

/// Actions on profile records (skills, experiences).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileAction {
    /// List records.
    Index,
    /// View a single record.
    Show,
    /// Create a new record.
    Create,
    /// Edit an existing record.
    Update,
    /// Delete an existing record.
    Destroy,
}

impl ProfileAction {
    /// The action name used in denial messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Show => "show",
            Self::Create => "create",
            Self::Update => "update",
            Self::Destroy => "destroy",
        }
    }
}

/// Authorization rules for profile records.
pub struct ProfilePolicy;

impl ProfilePolicy {
    /// Whether `viewer` may perform `action`.
    ///
    /// `owner` is the record's owning account for record-level mutations,
    /// `None` for collection-level actions.
    pub fn allows(viewer: &Viewer, action: ProfileAction, owner: Option<OwnerId>) -> bool {
        match action {
            ProfileAction::Index | ProfileAction::Show => true,
            ProfileAction::Create => viewer.is_editor(),
            ProfileAction::Update | ProfileAction::Destroy => owner.is_some_and(|o| {
                viewer.is_admin() || (viewer.is_editor() && viewer.owns(o))
            }),
        }
    }
}
