//! Error taxonomy for the content core.
//!
//! Validation and authorization failures are expected, recoverable
//! outcomes returned as typed results — callers render them as form
//! errors or HTTP-appropriate denials. The one intentional conflation:
//! a denied `show` on an existing draft surfaces as [`CoreError::NotFound`]
//! so public surfaces never leak the existence of unpublished content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single per-field validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// Human-readable message, e.g. `"can't be blank"`.
    pub message: String,
}

/// Structured per-field validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Create an empty error collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for a field.
    pub fn add(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Whether any failure was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The recorded failures.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Messages for one field, e.g. to render next to a form input.
    pub fn on(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect();
        write!(f, "{}", joined.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Error type for core operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
    /// Slug or id resolution failure, or a visibility denial presented
    /// identically to absence.
    #[error("not found")]
    NotFound,
    /// Policy denial on a mutating action. Distinct from `NotFound`: the
    /// caller is authenticated and known, just not permitted.
    #[error("not authorized to {action}")]
    Unauthorized {
        /// The denied action, e.g. `"update"`.
        action: &'static str,
    },
    /// Per-field validation failures. No partial writes occurred.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The slug-uniqueness race was not resolved within the bounded retry
    /// count. Transient: the caller may retry the whole operation.
    #[error("slug conflict not resolved after {attempts} attempts: {slug}")]
    ConflictRetryExhausted {
        /// The last candidate that conflicted.
        slug: String,
        /// Number of write attempts made.
        attempts: u32,
    },
    /// Store backend failure.
    #[error("store error: {0}")]
    Store(String),
}

impl CoreError {
    /// Create a store error from any backend error type.
    pub fn from_store<E: std::error::Error>(e: E) -> Self {
        Self::Store(e.to_string())
    }

    /// Whether the caller may reasonably retry the whole operation.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ConflictRetryExhausted { .. })
    }
}
