//! Owner accounts, roles, and the per-request viewer identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::OwnerId;

/// Site role of an owner account.
///
/// Roles are ordered by privilege: Admin > Editor > User.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Regular account with no content privileges.
    User,
    /// May create content and manage its own items.
    Editor,
    /// Full access to all content and contact messages.
    Admin,
}

impl Role {
    /// Parse role from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Self::User),
            "editor" => Some(Self::Editor),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Whether this role carries editor privileges (admin counts).
    pub fn is_editor(&self) -> bool {
        matches!(self, Self::Editor | Self::Admin)
    }

    /// Whether this role is admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Editor => write!(f, "editor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// An owner account: the site's author and content owner.
///
/// Created once at setup, mutated through profile edits, never deleted
/// automatically. Deleting an owner cascades to all owned content
/// (enforced by the store).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    /// Unique account identifier.
    pub id: OwnerId,
    /// Email address, stored lowercased. Uniqueness is case-insensitive.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Site role.
    pub role: Role,
    /// Short biography shown on the public site.
    pub bio: Option<String>,
    /// One-line tagline.
    pub tagline: Option<String>,
    /// GitHub profile URL.
    pub github_url: Option<String>,
    /// LinkedIn profile URL.
    pub linkedin_url: Option<String>,
    /// Twitter profile URL.
    pub twitter_url: Option<String>,
    /// Avatar image reference.
    pub avatar: Option<String>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

impl Owner {
    /// Create a new owner account. The email is lowercased on the way in.
    pub fn new(email: &str, name: &str, role: Role, created_at: DateTime<Utc>) -> Self {
        Self {
            id: OwnerId::generate(),
            email: email.trim().to_lowercase(),
            name: name.to_string(),
            role,
            bio: None,
            tagline: None,
            github_url: None,
            linkedin_url: None,
            twitter_url: None,
            avatar: None,
            created_at,
        }
    }

    /// The viewer identity for this account.
    pub fn as_viewer(&self) -> Viewer {
        Viewer::Known {
            id: self.id,
            role: self.role,
        }
    }
}

/// The acting identity for a core call.
///
/// Loaded once at request start by the caller and threaded explicitly into
/// every core operation; the core never resolves identity from ambient
/// session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Viewer {
    /// Unauthenticated visitor.
    Anonymous,
    /// Authenticated account with a fixed role for the request.
    Known {
        /// Account identifier.
        id: OwnerId,
        /// Role at request start.
        role: Role,
    },
}

impl Viewer {
    /// Whether this viewer is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Known { role, .. } if role.is_admin())
    }

    /// Whether this viewer has editor privileges (admin counts).
    pub fn is_editor(&self) -> bool {
        matches!(self, Self::Known { role, .. } if role.is_editor())
    }

    /// Whether this viewer is the given owner.
    pub fn owns(&self, owner: OwnerId) -> bool {
        matches!(self, Self::Known { id, .. } if *id == owner)
    }

    /// The account id, if authenticated.
    pub fn owner_id(&self) -> Option<OwnerId> {
        match self {
            Self::Anonymous => None,
            Self::Known { id, .. } => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_str("user"), Some(Role::User));
        assert_eq!(Role::from_str("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_str("invalid"), None);
    }

    #[test]
    fn test_admin_counts_as_editor() {
        assert!(Role::Admin.is_editor());
        assert!(Role::Editor.is_editor());
        assert!(!Role::User.is_editor());
    }

    #[test]
    fn test_owner_email_lowercased() {
        let owner = Owner::new("  Jane@Example.COM ", "Jane", Role::Editor, Utc::now());
        assert_eq!(owner.email, "jane@example.com");
    }

    #[test]
    fn test_viewer_ownership() {
        let owner = Owner::new("a@b.c", "A", Role::Editor, Utc::now());
        let viewer = owner.as_viewer();
        assert!(viewer.owns(owner.id));
        assert!(!viewer.owns(OwnerId::generate()));
        assert!(!Viewer::Anonymous.owns(owner.id));
    }
}
