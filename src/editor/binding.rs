//! Live bindings between one record field and its editable representation.
//!
//! A binding holds only a navigable reference (record path + field key); the
//! record itself stays in the [`DocumentStore`]. `commit` parses the raw
//! input for the field's kind and writes straight through, so the new value
//! is immediately visible to every other binding reading the same record.
//!
//! Parsing follows a never-throw policy: user input cannot produce an
//! error, only a defaulted value.

use serde_json::Value;

use crate::document::DocumentStore;

/// How raw input is interpreted before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Stored verbatim as a string.
    Text,
    /// Parsed as `i64`; parse failure stores `0`.
    Int,
    /// Lenient truthy parse (`true`/`1`/`yes`/`on`).
    Flag,
    /// Comma-split into a trimmed list with empty items dropped.
    List,
}

/// A live link from one field of one record to its editable value.
#[derive(Debug, Clone)]
pub struct FieldBinding {
    record: String,
    key: String,
    kind: FieldKind,
}

impl FieldBinding {
    pub fn new(record: impl Into<String>, key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            record: record.into(),
            key: key.into(),
            kind,
        }
    }

    /// Full dot path of the bound field.
    fn path(&self) -> String {
        format!("{}.{}", self.record, self.key)
    }

    /// Current value rendered for editing. Lists are joined with `", "`;
    /// missing fields render empty.
    pub fn current(&self, store: &DocumentStore) -> String {
        match store.get(&self.path()) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        }
    }

    /// Current value as a flag, for checkbox-style fields.
    pub fn current_flag(&self, store: &DocumentStore) -> bool {
        store
            .get(&self.path())
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Parse `raw` for this binding's kind and write it into the owning
    /// record. Synchronous; the write is visible before this returns.
    pub fn commit(&self, store: &mut DocumentStore, raw: &str) {
        let value = match self.kind {
            FieldKind::Text => Value::String(raw.to_owned()),
            FieldKind::Int => Value::from(raw.trim().parse::<i64>().unwrap_or(0)),
            FieldKind::Flag => Value::Bool(parse_flag(raw)),
            FieldKind::List => Value::Array(
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| Value::String(item.to_owned()))
                    .collect(),
            ),
        };
        store.set(&self.path(), value);
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with(doc: serde_json::Value) -> DocumentStore {
        DocumentStore::from_value(doc).unwrap()
    }

    #[test]
    fn test_text_commit_and_current() {
        let mut store = store_with(json!({"profile": {"name": "Old"}}));
        let binding = FieldBinding::new("profile", "name", FieldKind::Text);

        assert_eq!(binding.current(&store), "Old");
        binding.commit(&mut store, "New Name");
        assert_eq!(binding.current(&store), "New Name");
        assert_eq!(store.get("profile.name").unwrap(), "New Name");
    }

    #[test]
    fn test_int_parse_failure_stores_zero() {
        let mut store = store_with(json!({"research_papers": [{"year": 2024}]}));
        let binding = FieldBinding::new("research_papers.0", "year", FieldKind::Int);

        binding.commit(&mut store, "abc");
        assert_eq!(store.get("research_papers.0.year").unwrap(), 0);
    }

    #[test]
    fn test_int_commit_trims() {
        let mut store = store_with(json!({"homepage": {}}));
        let binding = FieldBinding::new("homepage", "recentAutoLimit", FieldKind::Int);

        binding.commit(&mut store, " 5 ");
        assert_eq!(store.get("homepage.recentAutoLimit").unwrap(), 5);
    }

    #[test]
    fn test_list_commit_splits_trims_and_drops_empties() {
        let mut store = store_with(json!({"projects": [{}]}));
        let binding = FieldBinding::new("projects.0", "techStack", FieldKind::List);

        binding.commit(&mut store, " a, b ,, c ");
        assert_eq!(
            store.get("projects.0.techStack").unwrap(),
            &json!(["a", "b", "c"])
        );
    }

    #[test]
    fn test_list_current_joins() {
        let store = store_with(json!({"projects": [{"techStack": ["a", "b"]}]}));
        let binding = FieldBinding::new("projects.0", "techStack", FieldKind::List);
        assert_eq!(binding.current(&store), "a, b");
    }

    #[test]
    fn test_flag_parse_is_lenient() {
        let mut store = store_with(json!({"profile": {}}));
        let binding = FieldBinding::new("profile", "showBio", FieldKind::Flag);

        for raw in ["true", "1", "YES", " on "] {
            binding.commit(&mut store, raw);
            assert!(binding.current_flag(&store), "expected `{raw}` to be truthy");
        }
        binding.commit(&mut store, "nope");
        assert!(!binding.current_flag(&store));
    }

    #[test]
    fn test_missing_field_renders_empty() {
        let store = store_with(json!({"profile": {}}));
        let binding = FieldBinding::new("profile", "bio", FieldKind::Text);
        assert_eq!(binding.current(&store), "");
    }

    #[test]
    fn test_commit_creates_missing_containers() {
        let mut store = DocumentStore::empty();
        let binding = FieldBinding::new("profile.socials", "github", FieldKind::Text);
        binding.commit(&mut store, "https://github.com/x");
        assert_eq!(
            store.get("profile.socials.github").unwrap(),
            "https://github.com/x"
        );
    }

    #[test]
    fn test_two_bindings_share_one_record() {
        let mut store = store_with(json!({"projects": [{"title": "A", "description": ""}]}));
        let title = FieldBinding::new("projects.0", "title", FieldKind::Text);
        let description = FieldBinding::new("projects.0", "description", FieldKind::Text);

        title.commit(&mut store, "B");
        description.commit(&mut store, "desc");

        // Neither write clobbered the sibling field.
        assert_eq!(title.current(&store), "B");
        assert_eq!(description.current(&store), "desc");
    }
}
