//! The contact-message policy: admin-only management, open submission.

use crate::types::Viewer;

/// Actions on contact messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageAction {
    /// List messages.
    Index,
    /// View a single message.
    Show,
    /// Submit a new message.
    Create,
    /// Delete a message.
    Destroy,
    /// Mark a message as read.
    MarkRead,
}

impl MessageAction {
    /// The action name used in denial messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Show => "show",
            Self::Create => "create",
            Self::Destroy => "destroy",
            Self::MarkRead => "mark_read",
        }
    }
}

/// Authorization rules for contact messages.
///
/// Deliberately stricter than the content table: anyone may create, and
/// only admins may do anything else. Messages have no owner and no
/// published state, so there is nothing in between.
pub struct MessagePolicy;

impl MessagePolicy {
    /// Whether `viewer` may perform `action`.
    pub fn allows(viewer: &Viewer, action: MessageAction) -> bool {
        match action {
            MessageAction::Create => true,
            MessageAction::Index
            | MessageAction::Show
            | MessageAction::Destroy
            | MessageAction::MarkRead => viewer.is_admin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Owner, Role};
    use chrono::Utc;

    #[test]
    fn test_anyone_may_create() {
        assert!(MessagePolicy::allows(&Viewer::Anonymous, MessageAction::Create));
        let editor = Owner::new("e@x.y", "E", Role::Editor, Utc::now()).as_viewer();
        assert!(MessagePolicy::allows(&editor, MessageAction::Create));
    }

    #[test]
    fn test_management_is_admin_only() {
        let admin = Owner::new("a@x.y", "A", Role::Admin, Utc::now()).as_viewer();
        let editor = Owner::new("e@x.y", "E", Role::Editor, Utc::now()).as_viewer();

        for action in [
            MessageAction::Index,
            MessageAction::Show,
            MessageAction::Destroy,
            MessageAction::MarkRead,
        ] {
            assert!(MessagePolicy::allows(&admin, action));
            assert!(!MessagePolicy::allows(&editor, action));
            assert!(!MessagePolicy::allows(&Viewer::Anonymous, action));
        }
    }
}
