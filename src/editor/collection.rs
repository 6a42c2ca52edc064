//! Generic CRUD and reordering over the three authored collections.
//!
//! Collection order is the site's authoritative display order, so moves
//! are persisted swaps, not view-side sorting. New records go to the front
//! (most-recent-first by construction) with a freshly generated id.

use std::collections::HashSet;

use serde_json::{Value, json};
use uuid::Uuid;

use super::{binding::{FieldBinding, FieldKind}, refs, remove_at, shift_down, shift_up};
use crate::document::{DocumentStore, Record, title_of};

/// The three referenceable collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Papers,
    Projects,
    Posts,
}

impl CollectionKind {
    /// Fixed enumeration order: papers, then projects, then posts.
    pub const ALL: [Self; 3] = [Self::Papers, Self::Projects, Self::Posts];

    /// Top-level document key of the collection.
    pub fn key(self) -> &'static str {
        match self {
            Self::Papers => "research_papers",
            Self::Projects => "projects",
            Self::Posts => "blog_posts",
        }
    }

    /// The `type` string used by references into this collection.
    pub fn ref_type(self) -> &'static str {
        match self {
            Self::Papers => "paper",
            Self::Projects => "project",
            Self::Posts => "blog",
        }
    }

    /// Section name used in entry labels.
    pub fn section(self) -> &'static str {
        match self {
            Self::Papers => "Research",
            Self::Projects => "Project",
            Self::Posts => "Garden",
        }
    }

    /// Inverse of [`Self::ref_type`].
    pub fn from_ref_type(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.ref_type() == value)
    }

    /// Display label for one record of this kind. Labels are derived for
    /// listing only and never stored.
    pub fn display_label(self, record: &Record) -> String {
        let title = title_of(record);
        match self {
            Self::Projects => title.to_string(),
            Self::Papers => {
                let year = record
                    .get("year")
                    .and_then(Value::as_i64)
                    .map(|y| y.to_string())
                    .unwrap_or_default();
                format!("{year} - {title}")
            }
            Self::Posts => {
                let date = record.get("date").and_then(Value::as_str).unwrap_or_default();
                format!("{date} - {title}")
            }
        }
    }
}

/// CRUD + reorder operations over one collection.
#[derive(Debug, Clone, Copy)]
pub struct CollectionEditor {
    kind: CollectionKind,
}

impl CollectionEditor {
    pub fn new(kind: CollectionKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Display labels in persisted order.
    pub fn list(&self, store: &DocumentStore) -> Vec<String> {
        store
            .list(self.kind.key())
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|record| self.kind.display_label(record))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self, store: &DocumentStore) -> usize {
        store.list(self.kind.key()).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, store: &DocumentStore) -> bool {
        self.len(store) == 0
    }

    /// Insert a new record at the front and return its index (always 0).
    /// Never fails: the id generator retries until the id is unique.
    pub fn create(&self, store: &mut DocumentStore) -> usize {
        let list = store.list_mut(self.kind.key());
        let id = fresh_id(list.iter());
        list.insert(
            0,
            json!({
                "id": id,
                "title": "New Item",
                "tags": [],
                "authors": [],
                "techStack": [],
            }),
        );
        0
    }

    /// Remove the record at `index` and repair any reference that pointed
    /// at it. Out of range is a no-op.
    pub fn delete(&self, store: &mut DocumentStore, index: usize) {
        if remove_at(store.list_mut(self.kind.key()), index).is_some() {
            refs::resolve_featured(store);
        }
    }

    /// Swap with the previous record; no-op at index 0.
    pub fn move_up(&self, store: &mut DocumentStore, index: usize) {
        shift_up(store.list_mut(self.kind.key()), index);
    }

    /// Swap with the next record; no-op at the last index.
    pub fn move_down(&self, store: &mut DocumentStore, index: usize) {
        shift_down(store.list_mut(self.kind.key()), index);
    }

    /// A field binding into the record at `index`.
    pub fn binding(&self, index: usize, key: &str, field: FieldKind) -> FieldBinding {
        FieldBinding::new(format!("{}.{index}", self.kind.key()), key, field)
    }
}

/// Generate a record id that does not collide with any record in `existing`.
///
/// Eight hex characters from a v4 UUID give a space wide enough that the
/// retry loop is almost never taken, but the uniqueness check makes the
/// guarantee unconditional.
pub fn fresh_id<'a>(existing: impl Iterator<Item = &'a Value>) -> String {
    let taken: HashSet<&str> = existing
        .filter_map(|record| record.get("id").and_then(Value::as_str))
        .collect();
    loop {
        let candidate = Uuid::new_v4().simple().to_string()[..8].to_string();
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
    }
}
