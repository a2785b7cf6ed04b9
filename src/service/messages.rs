//! Contact message intake and admin management.

use chrono::Utc;

use crate::error::{CoreError, ValidationErrors};
use crate::policy::{MessageAction, MessagePolicy};
use crate::store::{ContentStore, MessageFilter};
use crate::types::{Message, MessageId, SideEffectIntent, Viewer, MESSAGE_BODY_MAX, MESSAGE_BODY_MIN};
use crate::validate::{email_valid, present};

use super::{ContentService, Mutation};

/// Externally settable fields of a contact submission.
#[derive(Debug, Clone, Default)]
pub struct MessageAttrs {
    /// Sender's name.
    pub name: String,
    /// Sender's email address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
}

impl MessageAttrs {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !present(&self.name) {
            errors.add("name", "can't be blank");
        }
        if !present(&self.email) {
            errors.add("email", "can't be blank");
        } else if !email_valid(self.email.trim()) {
            errors.add("email", "is invalid");
        }
        if !present(&self.subject) {
            errors.add("subject", "can't be blank");
        }
        if !present(&self.body) {
            errors.add("body", "can't be blank");
        } else if self.body.chars().count() < MESSAGE_BODY_MIN {
            errors.add(
                "body",
                &format!("is too short (minimum is {MESSAGE_BODY_MIN} characters)"),
            );
        } else if self.body.chars().count() > MESSAGE_BODY_MAX {
            errors.add(
                "body",
                &format!("is too long (maximum is {MESSAGE_BODY_MAX} characters)"),
            );
        }
        errors.into_result()
    }
}

impl<S: ContentStore> ContentService<S> {
    /// Accept a contact submission. Open to every viewer; a notification
    /// intent is emitted for the mailer collaborator on success.
    pub async fn submit_message(
        &self,
        viewer: &Viewer,
        attrs: MessageAttrs,
    ) -> Result<Mutation<Message>, CoreError> {
        if !MessagePolicy::allows(viewer, MessageAction::Create) {
            return Err(CoreError::Unauthorized { action: "create" });
        }
        attrs.validate()?;

        let message = Message::new(
            &attrs.name,
            &attrs.email,
            &attrs.subject,
            &attrs.body,
            Utc::now(),
        );
        self.store()
            .insert_message(&message)
            .await
            .map_err(CoreError::from_store)?;
        tracing::info!(id = %message.id, "contact message received");

        let intents = vec![SideEffectIntent::SendContactNotification {
            message_id: message.id,
        }];
        Ok(Mutation::with_intents(message, intents))
    }

    /// List messages, newest first. Admin only.
    pub async fn list_messages(
        &self,
        viewer: &Viewer,
        filter: &MessageFilter,
    ) -> Result<Vec<Message>, CoreError> {
        if !MessagePolicy::allows(viewer, MessageAction::Index) {
            return Err(CoreError::Unauthorized { action: "index" });
        }
        self.store()
            .list_messages(filter)
            .await
            .map_err(CoreError::from_store)
    }

    /// Fetch one message. Admin only.
    pub async fn get_message(
        &self,
        viewer: &Viewer,
        id: MessageId,
    ) -> Result<Message, CoreError> {
        if !MessagePolicy::allows(viewer, MessageAction::Show) {
            return Err(CoreError::Unauthorized { action: "show" });
        }
        self.store()
            .get_message(id)
            .await
            .map_err(CoreError::from_store)?
            .ok_or(CoreError::NotFound)
    }

    /// Mark a message as read. Admin only.
    pub async fn mark_message_read(
        &self,
        viewer: &Viewer,
        id: MessageId,
    ) -> Result<Message, CoreError> {
        if !MessagePolicy::allows(viewer, MessageAction::MarkRead) {
            return Err(CoreError::Unauthorized { action: "mark_read" });
        }
        let mut message = self
            .store()
            .get_message(id)
            .await
            .map_err(CoreError::from_store)?
            .ok_or(CoreError::NotFound)?;
        message.mark_read();
        self.store()
            .update_message(&message)
            .await
            .map_err(CoreError::from_store)?;
        Ok(message)
    }

    /// Delete a message. Admin only.
    pub async fn destroy_message(&self, viewer: &Viewer, id: MessageId) -> Result<(), CoreError> {
        if !MessagePolicy::allows(viewer, MessageAction::Destroy) {
            return Err(CoreError::Unauthorized { action: "destroy" });
        }
        let existed = self
            .store()
            .delete_message(id)
            .await
            .map_err(CoreError::from_store)?;
        if !existed {
            return Err(CoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryContentStore;
    use crate::types::{Owner, Role};
    use std::sync::Arc;

    fn service() -> ContentService<InMemoryContentStore> {
        ContentService::new(Arc::new(InMemoryContentStore::new()))
    }

    fn admin() -> Viewer {
        Owner::new("a@x.y", "A", Role::Admin, Utc::now()).as_viewer()
    }

    fn attrs() -> MessageAttrs {
        MessageAttrs {
            name: "Visitor".to_string(),
            email: "visitor@example.com".to_string(),
            subject: "Hello".to_string(),
            body: "I would like to talk about a project.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_anonymous_submission_emits_notification_intent() {
        let svc = service();
        let result = svc
            .submit_message(&Viewer::Anonymous, attrs())
            .await
            .unwrap();
        assert!(result.record.unread());
        assert_eq!(
            result.intents,
            vec![SideEffectIntent::SendContactNotification {
                message_id: result.record.id
            }]
        );
    }

    #[tokio::test]
    async fn test_body_length_bounds() {
        let svc = service();

        let mut short = attrs();
        short.body = "too short".to_string();
        match svc.submit_message(&Viewer::Anonymous, short).await {
            Err(CoreError::Validation(errors)) => assert!(!errors.on("body").is_empty()),
            other => panic!("expected validation failure, got {other:?}"),
        }

        let mut long = attrs();
        long.body = "x".repeat(MESSAGE_BODY_MAX + 1);
        assert!(matches!(
            svc.submit_message(&Viewer::Anonymous, long).await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_bad_email_rejected() {
        let svc = service();
        let mut bad = attrs();
        bad.email = "not-an-email".to_string();
        match svc.submit_message(&Viewer::Anonymous, bad).await {
            Err(CoreError::Validation(errors)) => {
                assert_eq!(errors.on("email"), vec!["is invalid"]);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_listing_is_admin_only() {
        let svc = service();
        svc.submit_message(&Viewer::Anonymous, attrs()).await.unwrap();

        assert!(matches!(
            svc.list_messages(&Viewer::Anonymous, &MessageFilter::default())
                .await,
            Err(CoreError::Unauthorized { action: "index" })
        ));

        let listed = svc
            .list_messages(&admin(), &MessageFilter::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_and_unread_filter() {
        let svc = service();
        let admin = admin();
        let submitted = svc
            .submit_message(&Viewer::Anonymous, attrs())
            .await
            .unwrap();

        let marked = svc
            .mark_message_read(&admin, submitted.record.id)
            .await
            .unwrap();
        assert!(marked.read);

        let unread = svc
            .list_messages(&admin, &MessageFilter { unread_only: true })
            .await
            .unwrap();
        assert!(unread.is_empty());
    }

    #[tokio::test]
    async fn test_destroy_missing_message_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.destroy_message(&admin(), MessageId::generate()).await,
            Err(CoreError::NotFound)
        ));
    }
}
