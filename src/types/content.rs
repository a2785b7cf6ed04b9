//! Content items: the shape shared by projects and blog posts.
//!
//! Both kinds carry the same lifecycle fields (slug, published flag,
//! first-publish timestamp) and differ only in their detail payload.
//! The slug engine, lifecycle transitions, and access policy are written
//! against the [`Publishable`] capability trait rather than either
//! concrete kind, so the rules exist exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::{ItemId, OwnerId};

/// The two publishable content kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    /// Portfolio project.
    Project,
    /// Blog post.
    Post,
}

impl ContentKind {
    /// Parse kind from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "project" => Some(Self::Project),
            "post" => Some(Self::Post),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => write!(f, "project"),
            Self::Post => write!(f, "post"),
        }
    }
}

/// Kind-specific fields of a content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ContentDetails {
    /// Project-only fields.
    Project {
        /// Technology tags shown on project cards.
        technologies: Vec<String>,
        /// Link to the live deployment.
        live_url: Option<String>,
        /// Link to the source repository.
        github_url: Option<String>,
        /// Whether the project is pinned to the featured section.
        featured: bool,
        /// Featured image attachment reference.
        featured_image: Option<String>,
    },
    /// Blog-post-only fields.
    Post {
        /// Short teaser shown in listings.
        excerpt: Option<String>,
        /// Derived reading time in minutes. Recomputed on body change,
        /// never externally settable.
        reading_time: Option<u32>,
        /// Cover image attachment reference.
        cover_image: Option<String>,
    },
}

impl ContentDetails {
    /// Empty detail payload for a kind.
    pub fn empty(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Project => Self::Project {
                technologies: Vec::new(),
                live_url: None,
                github_url: None,
                featured: false,
                featured_image: None,
            },
            ContentKind::Post => Self::Post {
                excerpt: None,
                reading_time: None,
                cover_image: None,
            },
        }
    }

    /// The kind this payload belongs to.
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Project { .. } => ContentKind::Project,
            Self::Post { .. } => ContentKind::Post,
        }
    }
}

/// A publishable content item.
///
/// Invariants:
/// - `published == true` implies `published_at.is_some()`
/// - `slug` is unique within the item's kind, across live and retired slugs
/// - `published_at` records the first-ever publish time and is never reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique item identifier.
    pub id: ItemId,
    /// Owning account. Exclusive: one owner per item.
    pub owner_id: OwnerId,
    /// Human-readable title; the slug source.
    pub title: String,
    /// URL-safe unique identifier derived from the title.
    pub slug: String,
    /// Body text (projects: description; posts: article content).
    pub body: String,
    /// Whether the item is currently visible to the public.
    pub published: bool,
    /// First-ever publish time. Set once, survives unpublish.
    pub published_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
    /// Kind-specific fields.
    pub details: ContentDetails,
}

impl ContentItem {
    /// Create a new draft item with an empty slug (assigned on first save).
    pub fn new_draft(
        owner_id: OwnerId,
        kind: ContentKind,
        title: &str,
        body: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ItemId::generate(),
            owner_id,
            title: title.to_string(),
            slug: String::new(),
            body: body.to_string(),
            published: false,
            published_at: None,
            created_at: now,
            updated_at: now,
            details: ContentDetails::empty(kind),
        }
    }

    /// The item's content kind, derived from its detail payload.
    pub fn kind(&self) -> ContentKind {
        self.details.kind()
    }

    /// Whether the item is a draft.
    pub fn draft(&self) -> bool {
        !self.published
    }

    /// The attachment reference for this item's image, if any.
    pub fn image_attachment(&self) -> Option<&str> {
        match &self.details {
            ContentDetails::Project { featured_image, .. } => featured_image.as_deref(),
            ContentDetails::Post { cover_image, .. } => cover_image.as_deref(),
        }
    }

    /// Stored reading time in minutes (posts only).
    pub fn reading_time(&self) -> Option<u32> {
        match &self.details {
            ContentDetails::Post { reading_time, .. } => *reading_time,
            ContentDetails::Project { .. } => None,
        }
    }

    /// Listing label for the reading time, e.g. `"3 min read"`.
    pub fn reading_time_text(&self) -> String {
        format!("{} min read", self.reading_time().unwrap_or(1))
    }

    /// Whether this project is featured. Always false for posts.
    pub fn featured(&self) -> bool {
        matches!(
            &self.details,
            ContentDetails::Project { featured: true, .. }
        )
    }
}

/// Capability interface for publishable content.
///
/// The slug engine, lifecycle transitions, and access policy operate purely
/// against this trait, so the rules are shared by every content kind
/// instead of being re-implemented per entity type.
pub trait Publishable {
    /// Item identifier.
    fn item_id(&self) -> ItemId;
    /// Owning account.
    fn owner_of(&self) -> OwnerId;
    /// Content kind.
    fn content_kind(&self) -> ContentKind;
    /// Current title.
    fn title(&self) -> &str;
    /// Current live slug (empty until first save).
    fn current_slug(&self) -> &str;
    /// Assign a new live slug.
    fn set_slug(&mut self, slug: String);
    /// Whether the item is currently published.
    fn is_published(&self) -> bool;
    /// Set the published flag.
    fn set_published(&mut self, published: bool);
    /// First-ever publish time.
    fn first_published_at(&self) -> Option<DateTime<Utc>>;
    /// Record the first publish time.
    fn set_first_published_at(&mut self, at: DateTime<Utc>);
    /// Creation time, used for listing order.
    fn created(&self) -> DateTime<Utc>;
}

impl Publishable for ContentItem {
    fn item_id(&self) -> ItemId {
        self.id
    }

    fn owner_of(&self) -> OwnerId {
        self.owner_id
    }

    fn content_kind(&self) -> ContentKind {
        self.kind()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn current_slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn is_published(&self) -> bool {
        self.published
    }

    fn set_published(&mut self, published: bool) {
        self.published = published;
    }

    fn first_published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    fn set_first_published_at(&mut self, at: DateTime<Utc>) {
        self.published_at = Some(at);
    }

    fn created(&self) -> DateTime<Utc> {
        self.created_at
    }
}
