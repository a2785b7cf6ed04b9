//! # portfolio-core
//!
//! Content lifecycle and access control for a personal-portfolio platform.
//!
//! The core answers three questions for every content item:
//!
//! > What slug identifies it — and how does that slug stay stable under
//! > renames and collisions? What state is it in, and who may transition
//! > it? What may a given viewer see in a listing?
//!
//! ## Core Contract
//!
//! 1. Slugs are unique per content kind, live and historical; a slug once
//!    used is never reassigned to a different item, so old links keep
//!    resolving after renames
//! 2. Two states (`Draft`, `Published`), two transitions; `published_at`
//!    records the first-ever publish and is never reset
//! 3. Authorization is one declarative table per content family, checked
//!    once per request; visibility scopes are applied at the query layer
//!
//! ## Architecture
//!
//! ```text
//! Controller → ContentService → ContentPolicy (authorize, derive scope)
//!                    ↓
//!          Slug engine / Lifecycle / Derived fields
//!                    ↓
//!          ContentStore (in-memory, or a database port)
//!                    ↓
//!          item + SideEffectIntents (dispatched by the caller)
//! ```
//!
//! ## Boundary Guarantees
//!
//! - Viewer identity is an explicit parameter on every call; the core
//!   never reads ambient session state
//! - Validation and authorization failures are typed results, never
//!   panics or control-flow exceptions
//! - A denied `show` on a draft is indistinguishable from absence, so
//!   public surfaces cannot leak unpublished content
//! - Deferred work (image variants, notification email) is emitted as
//!   intents, at most once per mutation, never executed in-process

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod derived;
pub mod error;
pub mod lifecycle;
pub mod policy;
pub mod service;
pub mod slug;
pub mod store;
pub mod types;
pub mod validate;

// Re-exports
pub use types::{
    ContentDetails, ContentItem, ContentKind, Experience, ExperienceId, ItemId, Message,
    MessageId, Owner, OwnerId, Publishable, Role, SideEffectIntent, Skill, SkillId, Viewer,
};

pub use derived::{
    duration_in_months, format_duration, reading_time_minutes, word_count, BodyRenderer,
    PlainTextBody, WORDS_PER_MINUTE,
};
pub use error::{CoreError, FieldError, ValidationErrors};
pub use lifecycle::{publish, unpublish, Transition};
pub use policy::{
    ContentAction, ContentPolicy, MessageAction, MessagePolicy, ProfileAction, ProfilePolicy,
    ScopePredicate,
};
pub use service::{
    ContentService, ExperienceAttrs, MessageAttrs, Mutation, PostAttrs, ProjectAttrs,
    SkillAttrs, SLUG_CONFLICT_RETRIES,
};
pub use slug::{candidate_sequence, generate_slug, needs_new_slug, normalize_title};
pub use store::{ContentStore, InMemoryContentStore, ListFilter, MessageFilter, StoreError};
