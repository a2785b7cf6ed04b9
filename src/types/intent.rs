//! Side-effect intents emitted by mutations.
//!
//! An intent describes deferred work for an external collaborator (job
//! queue, mailer). The core guarantees at-most-one emission per successful
//! mutation that warrants it; delivery, ordering, and retries belong to
//! the caller's dispatcher, which the core never observes.

use serde::{Deserialize, Serialize};

use super::content::ContentKind;
use super::id::{ItemId, MessageId};

/// Deferred work requested by a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SideEffectIntent {
    /// Derive responsive image variants for an item's attachment.
    DeriveImageVariants {
        /// Content kind of the item.
        content_kind: ContentKind,
        /// The item whose attachment changed.
        item_id: ItemId,
        /// Attachment reference to process.
        attachment: String,
    },
    /// Send the owner a notification email for a new contact message.
    SendContactNotification {
        /// The message to notify about.
        message_id: MessageId,
    },
}

impl SideEffectIntent {
    /// The JSON payload handed to the job-queue collaborator.
    pub fn payload(&self) -> serde_json::Value {
        serde_json::json!(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let intent = SideEffectIntent::SendContactNotification {
            message_id: MessageId::generate(),
        };
        let json = intent.payload();
        assert_eq!(json["kind"], "send_contact_notification");
        assert!(json["message_id"].is_string());
    }

    #[test]
    fn test_intent_round_trip() {
        let intent = SideEffectIntent::DeriveImageVariants {
            content_kind: ContentKind::Project,
            item_id: ItemId::generate(),
            attachment: "featured_image".to_string(),
        };
        let json = serde_json::to_string(&intent).unwrap();
        let back: SideEffectIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(intent, back);
    }
}
