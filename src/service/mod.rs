//! The content service: the core's single entry point for collaborators.
//!
//! Controllers pass raw attributes plus the acting viewer into the
//! service; it authorizes through the policy layer, validates, persists
//! through the store seam, and hands back the record together with any
//! side-effect intents for the caller to dispatch. One request-scoped,
//! synchronous unit of work per call; the service never blocks on
//! network I/O and never performs deferred work itself.

pub mod content;
pub mod messages;
pub mod profile;

use std::sync::Arc;

use crate::derived::{BodyRenderer, PlainTextBody};
use crate::policy::{ContentPolicy, ScopePredicate};
use crate::store::ContentStore;
use crate::types::{SideEffectIntent, Viewer};

pub use content::{PostAttrs, ProjectAttrs};
pub use messages::MessageAttrs;
pub use profile::{ExperienceAttrs, SkillAttrs};

/// Bounded retry budget for slug-uniqueness conflicts: one re-derivation
/// after the initial attempt, then the operation fails as transient.
pub const SLUG_CONFLICT_RETRIES: u32 = 1;

/// A successful mutation: the persisted record plus the side-effect
/// intents the caller must dispatch. Intents are emitted at most once per
/// mutation that warrants them.
#[derive(Debug, Clone)]
pub struct Mutation<T> {
    /// The persisted record.
    pub record: T,
    /// Deferred work for the excluded job-queue collaborator.
    pub intents: Vec<SideEffectIntent>,
}

impl<T> Mutation<T> {
    fn with_intents(record: T, intents: Vec<SideEffectIntent>) -> Self {
        Self { record, intents }
    }
}

/// Orchestrates content lifecycle, access control, and persistence.
pub struct ContentService<S> {
    store: Arc<S>,
    renderer: Arc<dyn BodyRenderer>,
}

impl<S: ContentStore> ContentService<S> {
    /// Create a service over a store, treating bodies as plain text.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_renderer(store, Arc::new(PlainTextBody))
    }

    /// Create a service with a caller-supplied rich-text renderer.
    pub fn with_renderer(store: Arc<S>, renderer: Arc<dyn BodyRenderer>) -> Self {
        Self { store, renderer }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Derive the visibility scope for a viewer, for collaborators that
    /// build their own paginated queries. Identical for both content
    /// kinds.
    pub fn visible_scope(&self, viewer: &Viewer) -> ScopePredicate {
        ContentPolicy::visible_scope(viewer)
    }

    pub(crate) fn renderer(&self) -> &dyn BodyRenderer {
        self.renderer.as_ref()
    }
}
