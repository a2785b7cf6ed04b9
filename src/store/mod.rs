//! Persistence backends for the content core.
//!
//! The core is a library boundary, not a network boundary: controllers and
//! background workers reach it through [`crate::service::ContentService`],
//! and the service reaches storage through this trait. Implementations
//! must apply visibility scopes at the query layer (never by fetching
//! everything and discarding) and must return listings in the documented
//! deterministic order.

pub mod memory;

use async_trait::async_trait;

use crate::policy::ScopePredicate;
use crate::types::{
    ContentItem, ContentKind, Experience, ExperienceId, ItemId, Message, MessageId, Owner,
    OwnerId, Skill, SkillId,
};

/// Error wrapper for store write paths.
///
/// Slug uniqueness is enforced by the storage layer (a unique constraint
/// in a database backend, a guarded map in the in-memory backend) so that
/// concurrent creations with identical titles cannot both commit. The
/// service resolves a conflict by re-deriving the next candidate and
/// retrying within a bounded budget.
#[derive(Debug, thiserror::Error)]
pub enum StoreError<E: std::error::Error> {
    /// The write would assign a slug already owned by another item of the
    /// same kind, live or historical.
    #[error("slug already in use: {0}")]
    SlugConflict(String),
    /// Backend failure.
    #[error(transparent)]
    Backend(E),
}

/// Caller-specified filters for content listings.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Restrict to featured projects.
    pub featured_only: bool,
    /// Restrict to projects tagged with a technology (case-insensitive
    /// substring match).
    pub technology: Option<String>,
}

/// Caller-specified filters for message listings.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    /// Restrict to unread messages.
    pub unread_only: bool,
}

/// Trait for content storage backends.
///
/// Listing order contract:
/// - projects: `created_at` descending
/// - posts: `published_at` (falling back to `created_at` for drafts) descending
/// - messages: newest first
/// - skills: proficiency descending, then name ascending
/// - experiences: `start_date` descending
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync;

    // ── Owners ──────────────────────────────────────────────────────────

    /// Fetch an owner by id.
    async fn get_owner(&self, id: OwnerId) -> Result<Option<Owner>, Self::Error>;

    /// Insert an owner account.
    async fn insert_owner(&self, owner: &Owner) -> Result<(), Self::Error>;

    /// Delete an owner, cascading to every item, skill, and experience it
    /// owns. Returns whether the owner existed.
    async fn delete_owner(&self, id: OwnerId) -> Result<bool, Self::Error>;

    // ── Content items ───────────────────────────────────────────────────

    /// Fetch an item by kind and id.
    async fn get_item(
        &self,
        kind: ContentKind,
        id: ItemId,
    ) -> Result<Option<ContentItem>, Self::Error>;

    /// Fetch an item by its live slug.
    async fn get_item_by_slug(
        &self,
        kind: ContentKind,
        slug: &str,
    ) -> Result<Option<ContentItem>, Self::Error>;

    /// Look up the item that last owned a retired slug.
    async fn historical_slug_owner(
        &self,
        kind: ContentKind,
        slug: &str,
    ) -> Result<Option<ItemId>, Self::Error>;

    /// Whether a slug is taken within a kind, live or historical,
    /// by any item other than `excluding`.
    async fn slug_in_use(
        &self,
        kind: ContentKind,
        slug: &str,
        excluding: Option<ItemId>,
    ) -> Result<bool, Self::Error>;

    /// Insert a new item. Fails with [`StoreError::SlugConflict`] when the
    /// item's slug is already taken within its kind.
    async fn insert_item(&self, item: &ContentItem) -> Result<(), StoreError<Self::Error>>;

    /// Update an existing item. Fails with [`StoreError::SlugConflict`]
    /// when the item's slug is taken by a different item of the kind.
    async fn update_item(&self, item: &ContentItem) -> Result<(), StoreError<Self::Error>>;

    /// Record a retired slug in the append-only history for its kind.
    async fn retire_slug(
        &self,
        kind: ContentKind,
        slug: &str,
        item: ItemId,
    ) -> Result<(), Self::Error>;

    /// Delete an item. Returns whether it existed.
    async fn delete_item(&self, kind: ContentKind, id: ItemId) -> Result<bool, Self::Error>;

    /// List items of a kind, scope-filtered at the query layer, in the
    /// documented order for the kind.
    async fn list_items(
        &self,
        kind: ContentKind,
        scope: &ScopePredicate,
        filter: &ListFilter,
    ) -> Result<Vec<ContentItem>, Self::Error>;

    // ── Messages ────────────────────────────────────────────────────────

    /// Insert a contact message.
    async fn insert_message(&self, message: &Message) -> Result<(), Self::Error>;

    /// Fetch a message by id.
    async fn get_message(&self, id: MessageId) -> Result<Option<Message>, Self::Error>;

    /// Update a message (read flag).
    async fn update_message(&self, message: &Message) -> Result<(), Self::Error>;

    /// Delete a message. Returns whether it existed.
    async fn delete_message(&self, id: MessageId) -> Result<bool, Self::Error>;

    /// List messages, newest first.
    async fn list_messages(&self, filter: &MessageFilter) -> Result<Vec<Message>, Self::Error>;

    // ── Skills ──────────────────────────────────────────────────────────

    /// Insert a skill.
    async fn insert_skill(&self, skill: &Skill) -> Result<(), Self::Error>;

    /// Fetch a skill by id.
    async fn get_skill(&self, id: SkillId) -> Result<Option<Skill>, Self::Error>;

    /// Update a skill.
    async fn update_skill(&self, skill: &Skill) -> Result<(), Self::Error>;

    /// Delete a skill. Returns whether it existed.
    async fn delete_skill(&self, id: SkillId) -> Result<bool, Self::Error>;

    /// List skills, optionally restricted to one category, ordered by
    /// proficiency descending then name ascending.
    async fn list_skills(&self, category: Option<&str>) -> Result<Vec<Skill>, Self::Error>;

    // ── Experiences ─────────────────────────────────────────────────────

    /// Insert a timeline entry.
    async fn insert_experience(&self, experience: &Experience) -> Result<(), Self::Error>;

    /// Fetch a timeline entry by id.
    async fn get_experience(
        &self,
        id: ExperienceId,
    ) -> Result<Option<Experience>, Self::Error>;

    /// Update a timeline entry.
    async fn update_experience(&self, experience: &Experience) -> Result<(), Self::Error>;

    /// Delete a timeline entry. Returns whether it existed.
    async fn delete_experience(&self, id: ExperienceId) -> Result<bool, Self::Error>;

    /// List timeline entries, `start_date` descending.
    async fn list_experiences(&self) -> Result<Vec<Experience>, Self::Error>;
}

pub use memory::InMemoryContentStore;
