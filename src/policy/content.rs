//! The content policy: one rule table shared by projects and blog posts.

use crate::types::{Publishable, Viewer};

use super::ScopePredicate;

/// Actions on publishable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentAction {
    /// List items of a kind.
    Index,
    /// View a single item.
    Show,
    /// Create a new item.
    Create,
    /// Edit an existing item.
    Update,
    /// Delete an existing item.
    Destroy,
    /// Transition Draft -> Published.
    Publish,
    /// Transition Published -> Draft.
    Unpublish,
}

impl ContentAction {
    /// The action name used in denial messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Show => "show",
            Self::Create => "create",
            Self::Update => "update",
            Self::Destroy => "destroy",
            Self::Publish => "publish",
            Self::Unpublish => "unpublish",
        }
    }
}

/// Authorization rules for publishable content.
///
/// The table, per `(viewer, action)`:
///
/// | viewer            | index | show pub | show draft | create | update/destroy/publish |
/// |-------------------|-------|----------|------------|--------|------------------------|
/// | anonymous         | yes   | yes      | no         | no     | no                     |
/// | user              | yes   | yes      | no         | no     | no                     |
/// | editor, owns item | yes   | yes      | yes        | yes    | yes                    |
/// | editor, not owner | yes   | yes      | no         | yes    | no                     |
/// | admin             | yes   | yes      | yes        | yes    | yes                    |
///
/// Identical for both content kinds. Admin bypasses ownership entirely.
pub struct ContentPolicy;

impl ContentPolicy {
    /// Whether `viewer` may perform `action`.
    ///
    /// `item` is `None` for collection-level actions (`Index`, `Create`);
    /// record-level actions with no record in hand are denied.
    pub fn allows(viewer: &Viewer, action: ContentAction, item: Option<&dyn Publishable>) -> bool {
        match action {
            ContentAction::Index => true,
            ContentAction::Create => viewer.is_editor(),
            ContentAction::Show => {
                item.is_some_and(|i| i.is_published() || Self::manages(viewer, i))
            }
            ContentAction::Update
            | ContentAction::Destroy
            | ContentAction::Publish
            | ContentAction::Unpublish => item.is_some_and(|i| Self::manages(viewer, i)),
        }
    }

    /// Derive the visibility scope for a viewer.
    ///
    /// The table is identical for both content kinds, so the scope takes
    /// no kind parameter.
    pub fn visible_scope(viewer: &Viewer) -> ScopePredicate {
        match viewer {
            Viewer::Known { role, .. } if role.is_admin() => ScopePredicate::All,
            Viewer::Known { id, role } if role.is_editor() => {
                ScopePredicate::OwnedOrPublished(*id)
            }
            _ => ScopePredicate::PublishedOnly,
        }
    }

    /// Admin, or an editor that owns the item.
    fn manages(viewer: &Viewer, item: &dyn Publishable) -> bool {
        viewer.is_admin() || (viewer.is_editor() && viewer.owns(item.owner_of()))
    }
}
