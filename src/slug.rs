//! Slug generation, stability, and resolution.
//!
//! A slug is the URL-safe identifier derived from an item's title.
//! Guarantees:
//!
//! - unique within a content kind, across live *and* retired slugs
//! - regenerated only when the title changes or no slug exists yet —
//!   never silently on unrelated field updates
//! - a renamed item's previous slug is retired into history, not deleted,
//!   so old links keep resolving
//! - a slug once used is never reassigned to a different item (the same
//!   item may reclaim its own retired slug)
//!
//! Uniqueness under concurrent creation is enforced by the store's write
//! path; the service layer retries with the next candidate on conflict.

use crate::error::CoreError;
use crate::store::ContentStore;
use crate::types::{ContentItem, ContentKind, ItemId};

/// Normalize a title to a URL-safe, lowercase, hyphen-separated token.
///
/// Lowercases, folds common Latin diacritics to ASCII, collapses every
/// non-alphanumeric run to a single hyphen, and trims leading/trailing
/// hyphens. Deterministic: same input, same output.
pub fn normalize_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if let Some(folded) = fold_diacritic(c) {
            slug.push_str(folded);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Fold a common accented Latin character to its ASCII base.
///
/// Characters outside this table and outside ASCII alphanumerics are
/// treated as separators.
fn fold_diacritic(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ç' | 'ć' | 'č' => "c",
        'đ' | 'ď' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' => "i",
        'ł' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => "o",
        'ř' => "r",
        'š' | 'ś' => "s",
        'ť' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' => "u",
        'ý' | 'ÿ' => "y",
        'ž' | 'ź' | 'ż' => "z",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        _ => return None,
    };
    Some(folded)
}

/// The deterministic candidate sequence for a base slug:
/// `base`, `base-2`, `base-3`, ...
pub fn candidate_sequence(base: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_string()).chain((2u64..).map(move |n| format!("{base}-{n}")))
}

/// Whether a save should derive a fresh slug.
///
/// Only when the title differs from the last-saved title, or when no slug
/// has been assigned yet. Unrelated field updates never regenerate.
pub fn needs_new_slug(current_slug: &str, previous_title: &str, new_title: &str) -> bool {
    current_slug.is_empty() || previous_title != new_title
}

/// Derive the lowest available slug for `title` within `kind`.
///
/// Availability means: not the live slug of another item, and not a
/// retired slug owned by another item. A title that normalizes to nothing
/// falls back to the item id.
pub async fn generate_slug<S: ContentStore>(
    store: &S,
    kind: ContentKind,
    title: &str,
    item_id: ItemId,
) -> Result<String, CoreError> {
    let base = normalize_title(title);
    let base = if base.is_empty() {
        item_id.to_string()
    } else {
        base
    };

    for candidate in candidate_sequence(&base) {
        let taken = store
            .slug_in_use(kind, &candidate, Some(item_id))
            .await
            .map_err(CoreError::from_store)?;
        if !taken {
            return Ok(candidate);
        }
    }
    // The used-slug set is finite and the suffix sequence is not.
    unreachable!("candidate sequence is unbounded")
}

/// Resolve a slug or id string to an item.
///
/// Checks, in order: id parse, live slug, slug history for the kind.
/// A miss is a lookup failure returned as [`CoreError::NotFound`], never
/// an exceptional control-flow jump.
pub async fn resolve<S: ContentStore>(
    store: &S,
    kind: ContentKind,
    slug_or_id: &str,
) -> Result<ContentItem, CoreError> {
    if let Ok(id) = ItemId::parse(slug_or_id) {
        if let Some(item) = store.get_item(kind, id).await.map_err(CoreError::from_store)? {
            return Ok(item);
        }
    }

    if let Some(item) = store
        .get_item_by_slug(kind, slug_or_id)
        .await
        .map_err(CoreError::from_store)?
    {
        return Ok(item);
    }

    if let Some(owner) = store
        .historical_slug_owner(kind, slug_or_id)
        .await
        .map_err(CoreError::from_store)?
    {
        if let Some(item) = store
            .get_item(kind, owner)
            .await
            .map_err(CoreError::from_store)?
        {
            return Ok(item);
        }
    }

    Err(CoreError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize_title("My First Post"), "my-first-post");
        assert_eq!(normalize_title("Hello, World!"), "hello-world");
    }

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(normalize_title("a  --  b"), "a-b");
        assert_eq!(normalize_title("--edge--case--"), "edge-case");
    }

    #[test]
    fn test_normalize_folds_diacritics() {
        assert_eq!(normalize_title("Café Crème"), "cafe-creme");
        assert_eq!(normalize_title("Über Straße"), "uber-strasse");
        assert_eq!(normalize_title("Señor Nuñez"), "senor-nunez");
    }

    #[test]
    fn test_normalize_drops_unknown_scripts() {
        // Characters outside the fold table act as separators.
        assert_eq!(normalize_title("rust 入門 guide"), "rust-guide");
    }

    #[test]
    fn test_normalize_empty_results() {
        assert_eq!(normalize_title(""), "");
        assert_eq!(normalize_title("!!!"), "");
    }

    #[test]
    fn test_candidate_sequence_order() {
        let mut seq = candidate_sequence("post");
        assert_eq!(seq.next().unwrap(), "post");
        assert_eq!(seq.next().unwrap(), "post-2");
        assert_eq!(seq.next().unwrap(), "post-3");
    }

    #[test]
    fn test_needs_new_slug_triggers() {
        assert!(needs_new_slug("", "Same", "Same"));
        assert!(needs_new_slug("same", "Old Title", "New Title"));
        assert!(!needs_new_slug("same", "Same", "Same"));
    }

    proptest! {
        #[test]
        fn prop_normalized_slugs_are_url_safe(title in "\\PC{0,64}") {
            let slug = normalize_title(&title);
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn prop_normalization_is_stable(title in "\\PC{0,64}") {
            let once = normalize_title(&title);
            prop_assert_eq!(normalize_title(&once), once);
        }
    }
}
