//! Core types for the portfolio content platform.

pub mod content;
pub mod experience;
pub mod id;
pub mod intent;
pub mod message;
pub mod owner;
pub mod skill;

pub use content::{ContentDetails, ContentItem, ContentKind, Publishable};
pub use experience::Experience;
pub use id::{ExperienceId, ItemId, MessageId, OwnerId, SkillId};
pub use intent::SideEffectIntent;
pub use message::{Message, MESSAGE_BODY_MAX, MESSAGE_BODY_MIN};
pub use owner::{Owner, Role, Viewer};
pub use skill::{Skill, PROFICIENCY_MAX, PROFICIENCY_MIN, SKILL_CATEGORIES};
