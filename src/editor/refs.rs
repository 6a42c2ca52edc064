//! Cross-references from the homepage into the collections.
//!
//! The homepage can feature one entry (`homepage.featuredEntry`) and, in
//! manual mode, list hand-authored recent entries
//! (`homepage.recentManualEntries`). The featured reference is repaired
//! whenever it could have been invalidated: after load and after any
//! record deletion. Repair is silent; a stale reference is an expected
//! state, not an error.

use serde_json::{Value, json};

use super::{binding::{FieldBinding, FieldKind}, remove_at, shift_down, shift_up};
use crate::document::{DocumentStore, title_of};
use crate::editor::collection::CollectionKind;

const FEATURED: &str = "homepage.featuredEntry";
const MANUAL: &str = "homepage.recentManualEntries";

/// One referenceable record, resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef {
    pub kind: CollectionKind,
    pub id: String,
    pub label: String,
}

/// Every record a homepage reference may point at, in collection
/// enumeration order (papers, projects, posts). Records without an id
/// cannot be referenced and are skipped.
pub fn available_entries(store: &DocumentStore) -> Vec<EntryRef> {
    let mut entries = Vec::new();
    for kind in CollectionKind::ALL {
        let Some(items) = store.list(kind.key()) else {
            continue;
        };
        for record in items.iter().filter_map(Value::as_object) {
            let Some(id) = record.get("id").and_then(Value::as_str) else {
                continue;
            };
            if id.is_empty() {
                continue;
            }
            entries.push(EntryRef {
                kind,
                id: id.to_string(),
                label: format!("{} • {}", kind.section(), title_of(record)),
            });
        }
    }
    entries
}

/// The entry the featured reference currently resolves to, if any.
pub fn featured_entry(store: &DocumentStore) -> Option<EntryRef> {
    let kind = store
        .get(&format!("{FEATURED}.type"))
        .and_then(Value::as_str)
        .and_then(CollectionKind::from_ref_type)?;
    let id = store.get(&format!("{FEATURED}.id")).and_then(Value::as_str)?;
    available_entries(store)
        .into_iter()
        .find(|entry| entry.kind == kind && entry.id == id)
}

/// Point the featured reference at `entry`. The image override is an
/// independent field and survives retargeting.
pub fn set_featured(store: &mut DocumentStore, entry: &EntryRef) {
    store.set(
        &format!("{FEATURED}.type"),
        Value::String(entry.kind.ref_type().to_string()),
    );
    store.set(&format!("{FEATURED}.id"), Value::String(entry.id.clone()));
}

/// Repair the featured reference so it never dangles.
///
/// A reference that resolves is left alone. A dangling one is retargeted
/// at the first available entry; with nothing to point at, the id is
/// cleared and the type kept so the reference shape stays intact.
pub fn resolve_featured(store: &mut DocumentStore) {
    if featured_entry(store).is_some() {
        return;
    }
    match available_entries(store).into_iter().next() {
        Some(entry) => set_featured(store, &entry),
        None => store.set(&format!("{FEATURED}.id"), Value::String(String::new())),
    }
}

/// Labels of the manual recent entries, in persisted order.
pub fn manual_labels(store: &DocumentStore) -> Vec<String> {
    store
        .get(MANUAL)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_object)
                .map(|entry| title_of(entry).to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Insert a blank manual entry at the front and return its index.
pub fn add_manual(store: &mut DocumentStore) -> usize {
    manual_list_mut(store).insert(
        0,
        json!({
            "title": "New Entry",
            "dateLabel": "",
            "description": "",
            "link": "",
            "ctaLabel": "",
            "imageUrl": "",
        }),
    );
    0
}

/// Remove the manual entry at `index`; out of range is a no-op.
pub fn delete_manual(store: &mut DocumentStore, index: usize) {
    remove_at(manual_list_mut(store), index);
}

pub fn move_manual_up(store: &mut DocumentStore, index: usize) {
    shift_up(manual_list_mut(store), index);
}

pub fn move_manual_down(store: &mut DocumentStore, index: usize) {
    shift_down(manual_list_mut(store), index);
}

/// A field binding into the manual entry at `index`.
pub fn manual_binding(index: usize, key: &str, kind: FieldKind) -> FieldBinding {
    FieldBinding::new(format!("{MANUAL}.{index}"), key, kind)
}

fn manual_list_mut(store: &mut DocumentStore) -> &mut Vec<Value> {
    if store.get(MANUAL).and_then(Value::as_array).is_none() {
        store.set(MANUAL, Value::Array(Vec::new()));
    }
    store
        .get_mut(MANUAL)
        .and_then(Value::as_array_mut)
        .expect("manual entry list exists")
}
