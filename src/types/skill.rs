//! Skill entries for the skills showcase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{OwnerId, SkillId};

/// The fixed set of skill categories.
pub const SKILL_CATEGORIES: [&str; 7] = [
    "Frontend", "Backend", "DevOps", "Database", "Tools", "Mobile", "Other",
];

/// Proficiency bounds (inclusive).
pub const PROFICIENCY_MIN: u8 = 1;
/// Upper proficiency bound (inclusive).
pub const PROFICIENCY_MAX: u8 = 5;

/// A skill shown on the public site, grouped by category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    /// Unique skill identifier.
    pub id: SkillId,
    /// Owning account.
    pub owner_id: OwnerId,
    /// Skill name, e.g. "Rust".
    pub name: String,
    /// Category, one of [`SKILL_CATEGORIES`].
    pub category: String,
    /// Proficiency 1..=5, if rated.
    pub proficiency: Option<u8>,
    /// Icon reference for the skill card.
    pub icon: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Skill {
    /// Create a new skill entry.
    pub fn new(
        owner_id: OwnerId,
        name: &str,
        category: &str,
        proficiency: Option<u8>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SkillId::generate(),
            owner_id,
            name: name.to_string(),
            category: category.to_string(),
            proficiency,
            icon: None,
            created_at: now,
        }
    }

    /// Human label for the proficiency level.
    pub fn proficiency_label(&self) -> &'static str {
        match self.proficiency {
            Some(1) => "Beginner",
            Some(2) => "Intermediate",
            Some(3) => "Advanced",
            Some(4) => "Expert",
            Some(5) => "Master",
            _ => "Unknown",
        }
    }

    /// Proficiency as a 0-100 percentage for progress bars.
    pub fn proficiency_percentage(&self) -> u32 {
        u32::from(self.proficiency.unwrap_or(0)) * 20
    }
}
