//! Create, update, resolve, list, and lifecycle operations for content.

use chrono::Utc;

use crate::derived::{reading_time_minutes, word_count};
use crate::error::{CoreError, ValidationErrors};
use crate::lifecycle;
use crate::policy::{ContentAction, ContentPolicy};
use crate::slug::{self, needs_new_slug};
use crate::store::{ContentStore, ListFilter, StoreError};
use crate::types::{
    ContentDetails, ContentItem, ContentKind, ItemId, SideEffectIntent, Viewer,
};
use crate::validate::present;

use super::{ContentService, Mutation, SLUG_CONFLICT_RETRIES};

/// Externally settable fields for a project.
///
/// This struct *is* the attribute whitelist: slug, owner, published flag,
/// and timestamps have no corresponding field and can never be set from
/// the outside.
#[derive(Debug, Clone, Default)]
pub struct ProjectAttrs {
    /// Project title; the slug source.
    pub title: String,
    /// Project description.
    pub description: String,
    /// Technology tags.
    pub technologies: Vec<String>,
    /// Link to the live deployment.
    pub live_url: Option<String>,
    /// Link to the source repository.
    pub github_url: Option<String>,
    /// Pin to the featured section.
    pub featured: bool,
    /// New featured-image attachment. `None` leaves the current
    /// attachment unchanged; `Some` replaces it and requests variant
    /// derivation.
    pub featured_image: Option<String>,
}

impl ProjectAttrs {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !present(&self.title) {
            errors.add("title", "can't be blank");
        }
        if !present(&self.description) {
            errors.add("description", "can't be blank");
        }
        errors.into_result()
    }
}

/// Externally settable fields for a blog post.
///
/// Reading time is derived from the body on every save that changes it
/// and is never accepted from the outside.
#[derive(Debug, Clone, Default)]
pub struct PostAttrs {
    /// Post title; the slug source.
    pub title: String,
    /// Article body.
    pub body: String,
    /// Short teaser for listings.
    pub excerpt: Option<String>,
    /// New cover-image attachment. `None` leaves the current attachment
    /// unchanged.
    pub cover_image: Option<String>,
}

impl PostAttrs {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !present(&self.title) {
            errors.add("title", "can't be blank");
        }
        errors.into_result()
    }
}

impl<S: ContentStore> ContentService<S> {
    /// Resolve a slug or id to an item the viewer may see.
    ///
    /// A draft the viewer may not see resolves to [`CoreError::NotFound`],
    /// indistinguishable from absence, so public surfaces never leak the
    /// existence of unpublished content.
    pub async fn resolve_item(
        &self,
        kind: ContentKind,
        slug_or_id: &str,
        viewer: &Viewer,
    ) -> Result<ContentItem, CoreError> {
        let item = slug::resolve(self.store().as_ref(), kind, slug_or_id).await?;
        if !ContentPolicy::allows(viewer, ContentAction::Show, Some(&item)) {
            return Err(CoreError::NotFound);
        }
        Ok(item)
    }

    /// List items of a kind visible to the viewer, scope-filtered at the
    /// query layer, in the kind's listing order.
    pub async fn list_items(
        &self,
        kind: ContentKind,
        viewer: &Viewer,
        filter: &ListFilter,
    ) -> Result<Vec<ContentItem>, CoreError> {
        let scope = ContentPolicy::visible_scope(viewer);
        self.store()
            .list_items(kind, &scope, filter)
            .await
            .map_err(CoreError::from_store)
    }

    /// Create a project draft owned by the viewer.
    pub async fn create_project(
        &self,
        viewer: &Viewer,
        attrs: ProjectAttrs,
    ) -> Result<Mutation<ContentItem>, CoreError> {
        let owner_id = self.authorize_create(viewer)?;
        attrs.validate()?;

        let mut item = ContentItem::new_draft(
            owner_id,
            ContentKind::Project,
            &attrs.title,
            &attrs.description,
            Utc::now(),
        );
        item.details = ContentDetails::Project {
            technologies: attrs.technologies.clone(),
            live_url: attrs.live_url.clone(),
            github_url: attrs.github_url.clone(),
            featured: attrs.featured,
            featured_image: attrs.featured_image.clone(),
        };
        item.slug =
            slug::generate_slug(self.store().as_ref(), item.kind(), &attrs.title, item.id)
                .await?;

        let item = self.persist(item, true).await?;
        tracing::info!(kind = %item.kind(), id = %item.id, slug = %item.slug, "created");
        Ok(Mutation::with_intents(
            item.clone(),
            image_intents(&item, attrs.featured_image.as_deref()),
        ))
    }

    /// Create a blog post draft owned by the viewer.
    pub async fn create_post(
        &self,
        viewer: &Viewer,
        attrs: PostAttrs,
    ) -> Result<Mutation<ContentItem>, CoreError> {
        let owner_id = self.authorize_create(viewer)?;
        attrs.validate()?;

        let minutes = self.reading_time_for(&attrs.body);
        let mut item = ContentItem::new_draft(
            owner_id,
            ContentKind::Post,
            &attrs.title,
            &attrs.body,
            Utc::now(),
        );
        item.details = ContentDetails::Post {
            excerpt: attrs.excerpt.clone(),
            reading_time: Some(minutes),
            cover_image: attrs.cover_image.clone(),
        };
        item.slug =
            slug::generate_slug(self.store().as_ref(), item.kind(), &attrs.title, item.id)
                .await?;

        let item = self.persist(item, true).await?;
        tracing::info!(kind = %item.kind(), id = %item.id, slug = %item.slug, "created");
        Ok(Mutation::with_intents(
            item.clone(),
            image_intents(&item, attrs.cover_image.as_deref()),
        ))
    }

    /// Update a project's whitelisted fields.
    pub async fn update_project(
        &self,
        viewer: &Viewer,
        id: ItemId,
        attrs: ProjectAttrs,
    ) -> Result<Mutation<ContentItem>, CoreError> {
        let mut item = self.load(ContentKind::Project, id).await?;
        if !ContentPolicy::allows(viewer, ContentAction::Update, Some(&item)) {
            return Err(CoreError::Unauthorized { action: "update" });
        }
        attrs.validate()?;

        let rename = needs_new_slug(&item.slug, &item.title, &attrs.title);
        item.title = attrs.title.clone();
        item.body = attrs.description.clone();
        if let ContentDetails::Project {
            technologies,
            live_url,
            github_url,
            featured,
            featured_image,
        } = &mut item.details
        {
            *technologies = attrs.technologies.clone();
            *live_url = attrs.live_url.clone();
            *github_url = attrs.github_url.clone();
            *featured = attrs.featured;
            if attrs.featured_image.is_some() {
                *featured_image = attrs.featured_image.clone();
            }
        }
        if rename {
            self.reslug(&mut item).await?;
        }
        item.updated_at = Utc::now();

        let item = self.persist(item, false).await?;
        Ok(Mutation::with_intents(
            item.clone(),
            image_intents(&item, attrs.featured_image.as_deref()),
        ))
    }

    /// Update a blog post's whitelisted fields, recomputing reading time
    /// when the body changed.
    pub async fn update_post(
        &self,
        viewer: &Viewer,
        id: ItemId,
        attrs: PostAttrs,
    ) -> Result<Mutation<ContentItem>, CoreError> {
        let mut item = self.load(ContentKind::Post, id).await?;
        if !ContentPolicy::allows(viewer, ContentAction::Update, Some(&item)) {
            return Err(CoreError::Unauthorized { action: "update" });
        }
        attrs.validate()?;

        let rename = needs_new_slug(&item.slug, &item.title, &attrs.title);
        let body_changed = item.body != attrs.body;
        let minutes = body_changed.then(|| self.reading_time_for(&attrs.body));

        item.title = attrs.title.clone();
        item.body = attrs.body.clone();
        if let ContentDetails::Post {
            excerpt,
            reading_time,
            cover_image,
        } = &mut item.details
        {
            *excerpt = attrs.excerpt.clone();
            if let Some(minutes) = minutes {
                *reading_time = Some(minutes);
            }
            if attrs.cover_image.is_some() {
                *cover_image = attrs.cover_image.clone();
            }
        }
        if rename {
            self.reslug(&mut item).await?;
        }
        item.updated_at = Utc::now();

        let item = self.persist(item, false).await?;
        Ok(Mutation::with_intents(
            item.clone(),
            image_intents(&item, attrs.cover_image.as_deref()),
        ))
    }

    /// Delete an item.
    pub async fn destroy_item(
        &self,
        viewer: &Viewer,
        kind: ContentKind,
        id: ItemId,
    ) -> Result<(), CoreError> {
        let item = self.load(kind, id).await?;
        if !ContentPolicy::allows(viewer, ContentAction::Destroy, Some(&item)) {
            return Err(CoreError::Unauthorized { action: "destroy" });
        }
        self.store()
            .delete_item(kind, id)
            .await
            .map_err(CoreError::from_store)?;
        tracing::info!(kind = %kind, id = %id, "destroyed");
        Ok(())
    }

    /// Transition an item Draft -> Published.
    ///
    /// Re-publishing an already-published item is a permitted no-op and
    /// never resets the first-publish timestamp.
    pub async fn publish_item(
        &self,
        viewer: &Viewer,
        kind: ContentKind,
        id: ItemId,
    ) -> Result<ContentItem, CoreError> {
        let mut item = self.load(kind, id).await?;
        if !ContentPolicy::allows(viewer, ContentAction::Publish, Some(&item)) {
            return Err(CoreError::Unauthorized { action: "publish" });
        }
        lifecycle::publish(&mut item, Utc::now());
        item.updated_at = Utc::now();
        let item = self.persist(item, false).await?;
        tracing::info!(kind = %item.kind(), id = %item.id, "published");
        Ok(item)
    }

    /// Transition an item Published -> Draft, keeping `published_at`.
    pub async fn unpublish_item(
        &self,
        viewer: &Viewer,
        kind: ContentKind,
        id: ItemId,
    ) -> Result<ContentItem, CoreError> {
        let mut item = self.load(kind, id).await?;
        if !ContentPolicy::allows(viewer, ContentAction::Unpublish, Some(&item)) {
            return Err(CoreError::Unauthorized { action: "unpublish" });
        }
        lifecycle::unpublish(&mut item);
        item.updated_at = Utc::now();
        let item = self.persist(item, false).await?;
        tracing::info!(kind = %item.kind(), id = %item.id, "unpublished");
        Ok(item)
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn authorize_create(&self, viewer: &Viewer) -> Result<crate::types::OwnerId, CoreError> {
        if !ContentPolicy::allows(viewer, ContentAction::Create, None) {
            return Err(CoreError::Unauthorized { action: "create" });
        }
        viewer
            .owner_id()
            .ok_or(CoreError::Unauthorized { action: "create" })
    }

    async fn load(&self, kind: ContentKind, id: ItemId) -> Result<ContentItem, CoreError> {
        self.store()
            .get_item(kind, id)
            .await
            .map_err(CoreError::from_store)?
            .ok_or(CoreError::NotFound)
    }

    fn reading_time_for(&self, body: &str) -> u32 {
        let plain = self.renderer().to_plain_text(body);
        reading_time_minutes(word_count(&plain))
    }

    /// Retire the current live slug into history, then derive and assign
    /// the next one. Retiring first lets an item reclaim a slug it held
    /// before.
    async fn reslug(&self, item: &mut ContentItem) -> Result<(), CoreError> {
        if !item.slug.is_empty() {
            self.store()
                .retire_slug(item.kind(), &item.slug, item.id)
                .await
                .map_err(CoreError::from_store)?;
        }
        item.slug =
            slug::generate_slug(self.store().as_ref(), item.kind(), &item.title, item.id)
                .await?;
        Ok(())
    }

    /// Persist with a bounded retry on slug-uniqueness conflicts: one
    /// re-derivation, then the operation fails as transient.
    async fn persist(
        &self,
        mut item: ContentItem,
        is_new: bool,
    ) -> Result<ContentItem, CoreError> {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let result = if is_new {
                self.store().insert_item(&item).await
            } else {
                self.store().update_item(&item).await
            };
            match result {
                Ok(()) => return Ok(item),
                Err(StoreError::SlugConflict(conflicting))
                    if attempts <= SLUG_CONFLICT_RETRIES =>
                {
                    tracing::warn!(
                        kind = %item.kind(),
                        slug = %conflicting,
                        "slug conflict, re-deriving next candidate"
                    );
                    item.slug = slug::generate_slug(
                        self.store().as_ref(),
                        item.kind(),
                        &item.title,
                        item.id,
                    )
                    .await?;
                }
                Err(StoreError::SlugConflict(slug)) => {
                    tracing::error!(
                        kind = %item.kind(),
                        slug = %slug,
                        attempts,
                        "slug conflict retries exhausted"
                    );
                    return Err(CoreError::ConflictRetryExhausted { slug, attempts });
                }
                Err(StoreError::Backend(e)) => return Err(CoreError::Store(e.to_string())),
            }
        }
    }
}

/// The image-variant intent for a mutation, when a new attachment came in.
fn image_intents(item: &ContentItem, attachment: Option<&str>) -> Vec<SideEffectIntent> {
    match attachment {
        Some(attachment) => vec![SideEffectIntent::DeriveImageVariants {
            content_kind: item.kind(),
            item_id: item.id,
            attachment: attachment.to_string(),
        }],
        None => Vec::new(),
    }
}
