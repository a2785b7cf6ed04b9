//! Skills and work-history timeline management.

use chrono::{NaiveDate, Utc};

use crate::error::{CoreError, ValidationErrors};
use crate::policy::{ProfileAction, ProfilePolicy};
use crate::store::ContentStore;
use crate::types::{
    Experience, ExperienceId, Skill, SkillId, Viewer, PROFICIENCY_MAX, PROFICIENCY_MIN,
    SKILL_CATEGORIES,
};
use crate::validate::present;

use super::ContentService;

/// Externally settable fields of a skill.
#[derive(Debug, Clone, Default)]
pub struct SkillAttrs {
    /// Skill name.
    pub name: String,
    /// Category; must be one of the fixed category set.
    pub category: String,
    /// Proficiency 1..=5, if rated.
    pub proficiency: Option<u8>,
    /// Icon reference.
    pub icon: Option<String>,
}

impl SkillAttrs {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !present(&self.name) {
            errors.add("name", "can't be blank");
        }
        if !present(&self.category) {
            errors.add("category", "can't be blank");
        } else if !SKILL_CATEGORIES.contains(&self.category.as_str()) {
            errors.add("category", "is not included in the list");
        }
        if let Some(p) = self.proficiency {
            if !(PROFICIENCY_MIN..=PROFICIENCY_MAX).contains(&p) {
                errors.add("proficiency", "is not included in the list");
            }
        }
        errors.into_result()
    }

    fn apply(&self, skill: &mut Skill) {
        skill.name = self.name.clone();
        skill.category = self.category.clone();
        skill.proficiency = self.proficiency;
        skill.icon = self.icon.clone();
    }
}

/// Externally settable fields of a timeline entry.
#[derive(Debug, Clone, Default)]
pub struct ExperienceAttrs {
    /// Company or institution name.
    pub company: String,
    /// Role or title held.
    pub role: String,
    /// Location.
    pub location: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Start of the engagement.
    pub start_date: Option<NaiveDate>,
    /// End of the engagement; `None` means ongoing.
    pub end_date: Option<NaiveDate>,
    /// Explicit current-position flag.
    pub current: bool,
}

impl ExperienceAttrs {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !present(&self.company) {
            errors.add("company", "can't be blank");
        }
        if !present(&self.role) {
            errors.add("role", "can't be blank");
        }
        match self.start_date {
            None => errors.add("start_date", "can't be blank"),
            Some(start) => {
                if let Some(end) = self.end_date {
                    if end < start {
                        errors.add("end_date", "must be after start date");
                    }
                }
            }
        }
        errors.into_result()
    }

    fn apply(&self, experience: &mut Experience) {
        experience.company = self.company.clone();
        experience.role = self.role.clone();
        experience.location = self.location.clone();
        experience.description = self.description.clone();
        if let Some(start) = self.start_date {
            experience.start_date = start;
        }
        experience.end_date = self.end_date;
        experience.current = self.current;
    }
}

impl<S: ContentStore> ContentService<S> {
    /// List skills, optionally restricted to one category. Public.
    pub async fn list_skills(&self, category: Option<&str>) -> Result<Vec<Skill>, CoreError> {
        self.store()
            .list_skills(category)
            .await
            .map_err(CoreError::from_store)
    }

    /// Create a skill owned by the viewer.
    pub async fn create_skill(
        &self,
        viewer: &Viewer,
        attrs: SkillAttrs,
    ) -> Result<Skill, CoreError> {
        if !ProfilePolicy::allows(viewer, ProfileAction::Create, None) {
            return Err(CoreError::Unauthorized { action: "create" });
        }
        let Some(owner_id) = viewer.owner_id() else {
            return Err(CoreError::Unauthorized { action: "create" });
        };
        attrs.validate()?;

        let mut skill = Skill::new(owner_id, &attrs.name, &attrs.category, None, Utc::now());
        attrs.apply(&mut skill);
        self.store()
            .insert_skill(&skill)
            .await
            .map_err(CoreError::from_store)?;
        Ok(skill)
    }

    /// Update a skill's fields.
    pub async fn update_skill(
        &self,
        viewer: &Viewer,
        id: SkillId,
        attrs: SkillAttrs,
    ) -> Result<Skill, CoreError> {
        let mut skill = self
            .store()
            .get_skill(id)
            .await
            .map_err(CoreError::from_store)?
            .ok_or(CoreError::NotFound)?;
        if !ProfilePolicy::allows(viewer, ProfileAction::Update, Some(skill.owner_id)) {
            return Err(CoreError::Unauthorized { action: "update" });
        }
        attrs.validate()?;

        attrs.apply(&mut skill);
        self.store()
            .update_skill(&skill)
            .await
            .map_err(CoreError::from_store)?;
        Ok(skill)
    }

    /// Delete a skill.
    pub async fn destroy_skill(&self, viewer: &Viewer, id: SkillId) -> Result<(), CoreError> {
        let skill = self
            .store()
            .get_skill(id)
            .await
            .map_err(CoreError::from_store)?
            .ok_or(CoreError::NotFound)?;
        if !ProfilePolicy::allows(viewer, ProfileAction::Destroy, Some(skill.owner_id)) {
            return Err(CoreError::Unauthorized { action: "destroy" });
        }
        self.store()
            .delete_skill(id)
            .await
            .map_err(CoreError::from_store)?;
        Ok(())
    }

    /// List timeline entries, most recent first. Public.
    pub async fn list_experiences(&self) -> Result<Vec<Experience>, CoreError> {
        self.store()
            .list_experiences()
            .await
            .map_err(CoreError::from_store)
    }

    /// Create a timeline entry owned by the viewer.
    pub async fn create_experience(
        &self,
        viewer: &Viewer,
        attrs: ExperienceAttrs,
    ) -> Result<Experience, CoreError> {
        if !ProfilePolicy::allows(viewer, ProfileAction::Create, None) {
            return Err(CoreError::Unauthorized { action: "create" });
        }
        let Some(owner_id) = viewer.owner_id() else {
            return Err(CoreError::Unauthorized { action: "create" });
        };
        attrs.validate()?;

        let Some(start) = attrs.start_date else {
            unreachable!("start date presence is validated above")
        };
        let mut experience = Experience::new(
            owner_id,
            &attrs.company,
            &attrs.role,
            start,
            attrs.end_date,
            Utc::now(),
        );
        attrs.apply(&mut experience);
        self.store()
            .insert_experience(&experience)
            .await
            .map_err(CoreError::from_store)?;
        Ok(experience)
    }

    /// Update a timeline entry's fields.
    pub async fn update_experience(
        &self,
        viewer: &Viewer,
        id: ExperienceId,
        attrs: ExperienceAttrs,
    ) -> Result<Experience, CoreError> {
        let mut experience = self
            .store()
            .get_experience(id)
            .await
            .map_err(CoreError::from_store)?
            .ok_or(CoreError::NotFound)?;
        if !ProfilePolicy::allows(viewer, ProfileAction::Update, Some(experience.owner_id)) {
            return Err(CoreError::Unauthorized { action: "update" });
        }
        attrs.validate()?;

        attrs.apply(&mut experience);
        self.store()
            .update_experience(&experience)
            .await
            .map_err(CoreError::from_store)?;
        Ok(experience)
    }

    /// Delete a timeline entry.
    pub async fn destroy_experience(
        &self,
        viewer: &Viewer,
        id: ExperienceId,
    ) -> Result<(), CoreError> {
        let experience = self
            .store()
            .get_experience(id)
            .await
            .map_err(CoreError::from_store)?
            .ok_or(CoreError::NotFound)?;
        if !ProfilePolicy::allows(viewer, ProfileAction::Destroy, Some(experience.owner_id)) {
            return Err(CoreError::Unauthorized { action: "destroy" });
        }
        self.store()
            .delete_experience(id)
            .await
            .map_err(CoreError::from_store)?;
        Ok(())
    }
}
