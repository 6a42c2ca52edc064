//! The global tag registry.
//!
//! One deduplicated vocabulary of tags lives at the document's top-level
//! `tags` key, kept sorted case-insensitively for display. Records pick
//! tags from the registry through [`set_tags`]; removing a registry tag
//! never rewrites records, so a record may carry orphaned tag strings
//! until a human edits them.

use serde_json::Value;

use crate::document::DocumentStore;
use crate::error::EngineError;

/// All registered tags, in display (case-insensitive sort) order.
pub fn all(store: &DocumentStore) -> Vec<String> {
    store
        .list("tags")
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Register a tag. The name is trimmed first; an empty name is a no-op and
/// a case-sensitive exact duplicate is rejected.
pub fn add_tag(store: &mut DocumentStore, name: &str) -> Result<(), EngineError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(());
    }

    let tags = store.list_mut("tags");
    if tags.iter().any(|tag| tag.as_str() == Some(name)) {
        return Err(EngineError::DuplicateTag(name.to_string()));
    }

    tags.push(Value::String(name.to_string()));
    tags.sort_by_key(|tag| tag.as_str().unwrap_or_default().to_lowercase());
    Ok(())
}

/// Remove a tag from the registry only. Returns whether it was present.
/// Records referencing the tag keep their strings.
pub fn remove_tag(store: &mut DocumentStore, name: &str) -> bool {
    let tags = store.list_mut("tags");
    let before = tags.len();
    tags.retain(|tag| tag.as_str() != Some(name));
    tags.len() != before
}

/// Current tag membership of the record at `record_path`.
pub fn tags_for(store: &DocumentStore, record_path: &str) -> Vec<String> {
    store
        .get(&format!("{record_path}.tags"))
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Replace the record's tag list with exactly the chosen subset of
/// registry tags, in registry order. Choices outside the registry are
/// dropped; this is the managed path for new tag membership.
pub fn set_tags(store: &mut DocumentStore, record_path: &str, chosen: &[String]) {
    let selection: Vec<Value> = all(store)
        .into_iter()
        .filter(|tag| chosen.contains(tag))
        .map(Value::String)
        .collect();
    store.set(&format!("{record_path}.tags"), Value::Array(selection));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with(doc: serde_json::Value) -> DocumentStore {
        DocumentStore::from_value(doc).unwrap()
    }

    #[test]
    fn test_add_tag_sorts_case_insensitively() {
        let mut store = store_with(json!({"tags": ["CNN", "quantum"]}));
        add_tag(&mut store, "Math").unwrap();
        assert_eq!(all(&store), vec!["CNN", "Math", "quantum"]);
    }

    #[test]
    fn test_add_duplicate_is_rejected_and_set_unchanged() {
        let mut store = store_with(json!({"tags": ["Math"]}));
        let err = add_tag(&mut store, "Math").unwrap_err();
        assert!(matches!(err, EngineError::DuplicateTag(name) if name == "Math"));
        assert_eq!(all(&store), vec!["Math"]);
    }

    #[test]
    fn test_add_differs_only_in_case_is_allowed() {
        // Duplicate detection is case-sensitive exact match.
        let mut store = store_with(json!({"tags": ["math"]}));
        add_tag(&mut store, "Math").unwrap();
        assert_eq!(all(&store).len(), 2);
    }

    #[test]
    fn test_add_trims_and_ignores_empty() {
        let mut store = DocumentStore::empty();
        add_tag(&mut store, "  Rust  ").unwrap();
        add_tag(&mut store, "   ").unwrap();
        assert_eq!(all(&store), vec!["Rust"]);
    }

    #[test]
    fn test_add_tag_after_normalizing_scalar_registry() {
        // A wrong-typed `tags` value must not survive normalization into
        // the mutating paths.
        let mut store = store_with(json!({"tags": "math"}));
        store.normalize();

        add_tag(&mut store, "Math").unwrap();
        assert_eq!(all(&store), vec!["Math"]);
    }

    #[test]
    fn test_remove_tag_keeps_record_membership() {
        let mut store = store_with(json!({
            "tags": ["Math", "Rust"],
            "projects": [{"id": "1", "tags": ["Math"]}],
        }));

        assert!(remove_tag(&mut store, "Math"));
        assert!(!remove_tag(&mut store, "Math"));

        assert_eq!(all(&store), vec!["Rust"]);
        // The orphaned string stays on the record until a human edits it.
        assert_eq!(tags_for(&store, "projects.0"), vec!["Math"]);
    }

    #[test]
    fn test_set_tags_constrains_to_registry() {
        let mut store = store_with(json!({
            "tags": ["CNN", "Math", "Rust"],
            "projects": [{"id": "1", "tags": []}],
        }));

        set_tags(
            &mut store,
            "projects.0",
            &["Rust".into(), "CNN".into(), "NotRegistered".into()],
        );

        // Registry order, unregistered choice dropped.
        assert_eq!(tags_for(&store, "projects.0"), vec!["CNN", "Rust"]);
    }

    #[test]
    fn test_set_tags_replaces_previous_membership() {
        let mut store = store_with(json!({
            "tags": ["A", "B"],
            "blog_posts": [{"id": "1", "tags": ["A", "Orphan"]}],
        }));

        set_tags(&mut store, "blog_posts.0", &["B".into()]);
        assert_eq!(tags_for(&store, "blog_posts.0"), vec!["B"]);
    }
}
