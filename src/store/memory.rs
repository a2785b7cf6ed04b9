//! In-memory content store for tests and embedded use.
//!
//! Uses BTreeMap interiors for deterministic iteration order, behind a
//! single `parking_lot::RwLock` so the trait's `&self` write methods work
//! the same way a connection-pooled backend would. Slug uniqueness is
//! enforced inside one write-guard critical section, standing in for the
//! unique index a database backend provides.

use std::collections::BTreeMap;
use std::convert::Infallible;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::policy::ScopePredicate;
use crate::types::{
    ContentDetails, ContentItem, ContentKind, Experience, ExperienceId, ItemId, Message,
    MessageId, Owner, OwnerId, Skill, SkillId,
};

use super::{ContentStore, ListFilter, MessageFilter, StoreError};

#[derive(Debug, Default)]
struct Inner {
    owners: BTreeMap<OwnerId, Owner>,
    items: BTreeMap<(ContentKind, ItemId), ContentItem>,
    /// Retired slug -> last owning item, per kind. Append-only.
    slug_history: BTreeMap<(ContentKind, String), ItemId>,
    messages: BTreeMap<MessageId, Message>,
    skills: BTreeMap<SkillId, Skill>,
    experiences: BTreeMap<ExperienceId, Experience>,
}

impl Inner {
    /// Whether `slug` is taken within `kind` by any item other than
    /// `excluding`, live or historical.
    fn slug_taken(&self, kind: ContentKind, slug: &str, excluding: Option<ItemId>) -> bool {
        let live = self
            .items
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .any(|((_, id), item)| item.slug == slug && Some(*id) != excluding);
        if live {
            return true;
        }
        self.slug_history
            .get(&(kind, slug.to_string()))
            .is_some_and(|owner| Some(*owner) != excluding)
    }
}

/// In-memory content store.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    inner: RwLock<Inner>,
}

impl InMemoryContentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored content items across both kinds.
    pub fn num_items(&self) -> usize {
        self.inner.read().items.len()
    }

    /// Number of retired slugs across both kinds.
    pub fn num_retired_slugs(&self) -> usize {
        self.inner.read().slug_history.len()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    type Error = Infallible;

    async fn get_owner(&self, id: OwnerId) -> Result<Option<Owner>, Self::Error> {
        Ok(self.inner.read().owners.get(&id).cloned())
    }

    async fn insert_owner(&self, owner: &Owner) -> Result<(), Self::Error> {
        self.inner.write().owners.insert(owner.id, owner.clone());
        Ok(())
    }

    async fn delete_owner(&self, id: OwnerId) -> Result<bool, Self::Error> {
        let mut inner = self.inner.write();
        let existed = inner.owners.remove(&id).is_some();
        if existed {
            inner.items.retain(|_, item| item.owner_id != id);
            inner.skills.retain(|_, skill| skill.owner_id != id);
            inner.experiences.retain(|_, exp| exp.owner_id != id);
        }
        Ok(existed)
    }

    async fn get_item(
        &self,
        kind: ContentKind,
        id: ItemId,
    ) -> Result<Option<ContentItem>, Self::Error> {
        Ok(self.inner.read().items.get(&(kind, id)).cloned())
    }

    async fn get_item_by_slug(
        &self,
        kind: ContentKind,
        slug: &str,
    ) -> Result<Option<ContentItem>, Self::Error> {
        Ok(self
            .inner
            .read()
            .items
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, item)| item)
            .find(|item| item.slug == slug)
            .cloned())
    }

    async fn historical_slug_owner(
        &self,
        kind: ContentKind,
        slug: &str,
    ) -> Result<Option<ItemId>, Self::Error> {
        Ok(self
            .inner
            .read()
            .slug_history
            .get(&(kind, slug.to_string()))
            .copied())
    }

    async fn slug_in_use(
        &self,
        kind: ContentKind,
        slug: &str,
        excluding: Option<ItemId>,
    ) -> Result<bool, Self::Error> {
        Ok(self.inner.read().slug_taken(kind, slug, excluding))
    }

    async fn insert_item(&self, item: &ContentItem) -> Result<(), StoreError<Self::Error>> {
        let mut inner = self.inner.write();
        if inner.slug_taken(item.kind(), &item.slug, Some(item.id)) {
            return Err(StoreError::SlugConflict(item.slug.clone()));
        }
        inner.items.insert((item.kind(), item.id), item.clone());
        Ok(())
    }

    async fn update_item(&self, item: &ContentItem) -> Result<(), StoreError<Self::Error>> {
        let mut inner = self.inner.write();
        if inner.slug_taken(item.kind(), &item.slug, Some(item.id)) {
            return Err(StoreError::SlugConflict(item.slug.clone()));
        }
        inner.items.insert((item.kind(), item.id), item.clone());
        Ok(())
    }

    async fn retire_slug(
        &self,
        kind: ContentKind,
        slug: &str,
        item: ItemId,
    ) -> Result<(), Self::Error> {
        self.inner
            .write()
            .slug_history
            .insert((kind, slug.to_string()), item);
        Ok(())
    }

    async fn delete_item(&self, kind: ContentKind, id: ItemId) -> Result<bool, Self::Error> {
        Ok(self.inner.write().items.remove(&(kind, id)).is_some())
    }

    async fn list_items(
        &self,
        kind: ContentKind,
        scope: &ScopePredicate,
        filter: &ListFilter,
    ) -> Result<Vec<ContentItem>, Self::Error> {
        let inner = self.inner.read();
        let mut items: Vec<ContentItem> = inner
            .items
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, item)| item)
            .filter(|item| scope.matches(*item))
            .filter(|item| !filter.featured_only || item.featured())
            .filter(|item| match &filter.technology {
                None => true,
                Some(tech) => match &item.details {
                    ContentDetails::Project { technologies, .. } => {
                        let needle = tech.to_lowercase();
                        technologies
                            .iter()
                            .any(|t| t.to_lowercase().contains(&needle))
                    }
                    ContentDetails::Post { .. } => false,
                },
            })
            .cloned()
            .collect();

        // Ordering contract: projects by creation, posts by publish date
        // (drafts fall back to creation), newest first. Id tiebreak keeps
        // the order deterministic.
        match kind {
            ContentKind::Project => {
                items.sort_by(|a, b| {
                    b.created_at
                        .cmp(&a.created_at)
                        .then_with(|| a.id.cmp(&b.id))
                });
            }
            ContentKind::Post => {
                items.sort_by(|a, b| {
                    let a_key = a.published_at.unwrap_or(a.created_at);
                    let b_key = b.published_at.unwrap_or(b.created_at);
                    b_key.cmp(&a_key).then_with(|| a.id.cmp(&b.id))
                });
            }
        }

        Ok(items)
    }

    async fn insert_message(&self, message: &Message) -> Result<(), Self::Error> {
        self.inner
            .write()
            .messages
            .insert(message.id, message.clone());
        Ok(())
    }

    async fn get_message(&self, id: MessageId) -> Result<Option<Message>, Self::Error> {
        Ok(self.inner.read().messages.get(&id).cloned())
    }

    async fn update_message(&self, message: &Message) -> Result<(), Self::Error> {
        self.inner
            .write()
            .messages
            .insert(message.id, message.clone());
        Ok(())
    }

    async fn delete_message(&self, id: MessageId) -> Result<bool, Self::Error> {
        Ok(self.inner.write().messages.remove(&id).is_some())
    }

    async fn list_messages(&self, filter: &MessageFilter) -> Result<Vec<Message>, Self::Error> {
        let mut messages: Vec<Message> = self
            .inner
            .read()
            .messages
            .values()
            .filter(|m| !filter.unread_only || m.unread())
            .cloned()
            .collect();
        messages.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(messages)
    }

    async fn insert_skill(&self, skill: &Skill) -> Result<(), Self::Error> {
        self.inner.write().skills.insert(skill.id, skill.clone());
        Ok(())
    }

    async fn get_skill(&self, id: SkillId) -> Result<Option<Skill>, Self::Error> {
        Ok(self.inner.read().skills.get(&id).cloned())
    }

    async fn update_skill(&self, skill: &Skill) -> Result<(), Self::Error> {
        self.inner.write().skills.insert(skill.id, skill.clone());
        Ok(())
    }

    async fn delete_skill(&self, id: SkillId) -> Result<bool, Self::Error> {
        Ok(self.inner.write().skills.remove(&id).is_some())
    }

    async fn list_skills(&self, category: Option<&str>) -> Result<Vec<Skill>, Self::Error> {
        let mut skills: Vec<Skill> = self
            .inner
            .read()
            .skills
            .values()
            .filter(|s| category.map_or(true, |c| s.category == c))
            .cloned()
            .collect();
        skills.sort_by(|a, b| {
            b.proficiency
                .unwrap_or(0)
                .cmp(&a.proficiency.unwrap_or(0))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(skills)
    }

    async fn insert_experience(&self, experience: &Experience) -> Result<(), Self::Error> {
        self.inner
            .write()
            .experiences
            .insert(experience.id, experience.clone());
        Ok(())
    }

    async fn get_experience(
        &self,
        id: ExperienceId,
    ) -> Result<Option<Experience>, Self::Error> {
        Ok(self.inner.read().experiences.get(&id).cloned())
    }

    async fn update_experience(&self, experience: &Experience) -> Result<(), Self::Error> {
        self.inner
            .write()
            .experiences
            .insert(experience.id, experience.clone());
        Ok(())
    }

    async fn delete_experience(&self, id: ExperienceId) -> Result<bool, Self::Error> {
        Ok(self.inner.write().experiences.remove(&id).is_some())
    }

    async fn list_experiences(&self) -> Result<Vec<Experience>, Self::Error> {
        let mut experiences: Vec<Experience> =
            self.inner.read().experiences.values().cloned().collect();
        experiences.sort_by(|a, b| {
            b.start_date
                .cmp(&a.start_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(experiences)
    }
}
