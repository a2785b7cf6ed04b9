//! End-to-end lifecycle tests for the content core.
//!
//! These tests drive the service the way the controller layer would:
//! create, publish, rename, and resolve, asserting the slug-stability
//! and timestamp guarantees along the way.

use std::sync::Arc;

use portfolio_core::{
    ContentKind, ContentService, CoreError, InMemoryContentStore, ListFilter, Owner, PostAttrs,
    ProjectAttrs, Role, Viewer,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn service() -> ContentService<InMemoryContentStore> {
    ContentService::new(Arc::new(InMemoryContentStore::new()))
}

fn viewer(role: Role) -> Viewer {
    Owner::new("someone@example.com", "Someone", role, chrono::Utc::now()).as_viewer()
}

fn post(title: &str, body: &str) -> PostAttrs {
    PostAttrs {
        title: title.to_string(),
        body: body.to_string(),
        ..Default::default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// THE FULL LIFECYCLE
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_draft_publish_rename_resolve_flow() {
    let svc = service();
    let owner = viewer(Role::Editor);
    let admin = viewer(Role::Admin);

    // Owner creates a draft.
    let body = ["lorem"; 450].join(" ");
    let created = svc
        .create_post(&owner, post("My First Post", &body))
        .await
        .unwrap();
    let item = created.record;
    assert_eq!(item.slug, "my-first-post");
    assert!(!item.published);
    assert_eq!(item.reading_time(), Some(3));

    // Draft is invisible to the public but listed for admin.
    let admin_list = svc
        .list_items(ContentKind::Post, &admin, &ListFilter::default())
        .await
        .unwrap();
    assert_eq!(admin_list.len(), 1);

    let public_list = svc
        .list_items(ContentKind::Post, &Viewer::Anonymous, &ListFilter::default())
        .await
        .unwrap();
    assert!(public_list.is_empty());

    // Publish sets the timestamp.
    let published = svc
        .publish_item(&owner, ContentKind::Post, item.id)
        .await
        .unwrap();
    assert!(published.published);
    let first_published_at = published.published_at.unwrap();

    // Now the public sees it.
    let public_list = svc
        .list_items(ContentKind::Post, &Viewer::Anonymous, &ListFilter::default())
        .await
        .unwrap();
    assert_eq!(public_list.len(), 1);

    // Rename: new slug, old slug still resolves to the same item.
    let renamed = svc
        .update_post(&owner, item.id, post("My Updated Post", &body))
        .await
        .unwrap();
    assert_eq!(renamed.record.slug, "my-updated-post");

    let via_old_slug = svc
        .resolve_item(ContentKind::Post, "my-first-post", &Viewer::Anonymous)
        .await
        .unwrap();
    assert_eq!(via_old_slug.id, item.id);

    let via_new_slug = svc
        .resolve_item(ContentKind::Post, "my-updated-post", &Viewer::Anonymous)
        .await
        .unwrap();
    assert_eq!(via_new_slug.id, item.id);

    // The rename did not disturb the publish timestamp.
    assert_eq!(renamed.record.published_at, Some(first_published_at));
}

// ─────────────────────────────────────────────────────────────────────────────
// PUBLISH TIMESTAMP GUARANTEES
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_republish_is_idempotent_in_timestamp() {
    let svc = service();
    let owner = viewer(Role::Editor);
    let created = svc
        .create_post(&owner, post("Once", "body"))
        .await
        .unwrap();

    let first = svc
        .publish_item(&owner, ContentKind::Post, created.record.id)
        .await
        .unwrap();
    let second = svc
        .publish_item(&owner, ContentKind::Post, created.record.id)
        .await
        .unwrap();
    assert_eq!(first.published_at, second.published_at);
}

#[tokio::test]
async fn test_unpublish_then_publish_keeps_first_timestamp() {
    let svc = service();
    let owner = viewer(Role::Editor);
    let created = svc
        .create_post(&owner, post("Cycle", "body"))
        .await
        .unwrap();
    let id = created.record.id;

    let published = svc.publish_item(&owner, ContentKind::Post, id).await.unwrap();
    let original = published.published_at;

    let unpublished = svc.unpublish_item(&owner, ContentKind::Post, id).await.unwrap();
    assert!(!unpublished.published);
    assert_eq!(unpublished.published_at, original);

    let republished = svc.publish_item(&owner, ContentKind::Post, id).await.unwrap();
    assert_eq!(republished.published_at, original);
}

// ─────────────────────────────────────────────────────────────────────────────
// SLUG UNIQUENESS AND STABILITY
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_identical_titles_get_lowest_available_suffix() {
    let svc = service();
    let owner = viewer(Role::Editor);

    let slugs = [
        svc.create_post(&owner, post("Duplicate", "a")).await.unwrap(),
        svc.create_post(&owner, post("Duplicate", "b")).await.unwrap(),
        svc.create_post(&owner, post("Duplicate", "c")).await.unwrap(),
    ]
    .map(|m| m.record.slug);
    assert_eq!(slugs, ["duplicate", "duplicate-2", "duplicate-3"]);
}

#[tokio::test]
async fn test_retired_slug_never_reassigned_to_another_item() {
    let svc = service();
    let owner = viewer(Role::Editor);

    let original = svc
        .create_post(&owner, post("Taken Name", "a"))
        .await
        .unwrap();
    svc.update_post(&owner, original.record.id, post("Something Else", "a"))
        .await
        .unwrap();

    // "taken-name" now lives in history; a new item with the same title
    // must step over it.
    let newcomer = svc
        .create_post(&owner, post("Taken Name", "b"))
        .await
        .unwrap();
    assert_eq!(newcomer.record.slug, "taken-name-2");

    // And the historical slug still points at the original.
    let resolved = svc
        .resolve_item(ContentKind::Post, "taken-name", &owner)
        .await
        .unwrap();
    assert_eq!(resolved.id, original.record.id);
}

#[tokio::test]
async fn test_item_reclaims_its_own_retired_slug() {
    let svc = service();
    let owner = viewer(Role::Editor);

    let created = svc.create_post(&owner, post("Alpha", "a")).await.unwrap();
    let id = created.record.id;

    svc.update_post(&owner, id, post("Beta", "a")).await.unwrap();
    let back = svc.update_post(&owner, id, post("Alpha", "a")).await.unwrap();
    assert_eq!(back.record.slug, "alpha");
}

#[tokio::test]
async fn test_slugs_are_scoped_per_kind() {
    let svc = service();
    let owner = viewer(Role::Editor);

    let project = svc
        .create_project(
            &owner,
            ProjectAttrs {
                title: "Shared Name".to_string(),
                description: "d".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let post = svc
        .create_post(&owner, post("Shared Name", "b"))
        .await
        .unwrap();

    assert_eq!(project.record.slug, "shared-name");
    assert_eq!(post.record.slug, "shared-name");
}

// ─────────────────────────────────────────────────────────────────────────────
// DENIAL SEMANTICS
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_draft_resolution_is_indistinguishable_from_absence() {
    let svc = service();
    let owner = viewer(Role::Editor);
    svc.create_post(&owner, post("Hidden Draft", "body"))
        .await
        .unwrap();

    let as_anonymous = svc
        .resolve_item(ContentKind::Post, "hidden-draft", &Viewer::Anonymous)
        .await;
    let truly_missing = svc
        .resolve_item(ContentKind::Post, "never-existed", &Viewer::Anonymous)
        .await;

    assert!(matches!(as_anonymous, Err(CoreError::NotFound)));
    assert!(matches!(truly_missing, Err(CoreError::NotFound)));
}

#[tokio::test]
async fn test_denied_mutation_is_distinct_from_not_found() {
    let svc = service();
    let owner = viewer(Role::Editor);
    let outsider = viewer(Role::Editor);
    let created = svc
        .create_post(&owner, post("Contested", "body"))
        .await
        .unwrap();

    let denied = svc
        .publish_item(&outsider, ContentKind::Post, created.record.id)
        .await;
    assert!(matches!(
        denied,
        Err(CoreError::Unauthorized { action: "publish" })
    ));
}

#[tokio::test]
async fn test_destroy_removes_item_for_everyone() {
    let svc = service();
    let owner = viewer(Role::Editor);
    let created = svc
        .create_post(&owner, post("Doomed", "body"))
        .await
        .unwrap();

    svc.destroy_item(&owner, ContentKind::Post, created.record.id)
        .await
        .unwrap();

    let gone = svc
        .resolve_item(ContentKind::Post, "doomed", &owner)
        .await;
    assert!(matches!(gone, Err(CoreError::NotFound)));
}
