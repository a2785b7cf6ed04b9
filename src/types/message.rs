//! Contact messages submitted by visitors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::MessageId;

/// Body length bounds for contact messages.
pub const MESSAGE_BODY_MIN: usize = 10;
/// Maximum body length for contact messages.
pub const MESSAGE_BODY_MAX: usize = 5000;

/// A contact form submission.
///
/// Messages have no owner: anyone may create one, and only admins may
/// read or manage them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// Sender's name.
    pub name: String,
    /// Sender's email address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Whether an admin has read the message.
    pub read: bool,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new unread message.
    pub fn new(
        name: &str,
        email: &str,
        subject: &str,
        body: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MessageId::generate(),
            name: name.to_string(),
            email: email.trim().to_lowercase(),
            subject: subject.to_string(),
            body: body.to_string(),
            read: false,
            created_at: now,
        }
    }

    /// Whether the message is still unread.
    pub fn unread(&self) -> bool {
        !self.read
    }

    /// Mark the message as read.
    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_is_unread() {
        let m = Message::new("A", "a@b.c", "Hi", "a body of text", Utc::now());
        assert!(m.unread());
    }

    #[test]
    fn test_mark_read() {
        let mut m = Message::new("A", "a@b.c", "Hi", "a body of text", Utc::now());
        m.mark_read();
        assert!(!m.unread());
        assert!(m.read);
    }
}
