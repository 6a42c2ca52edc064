//! The in-memory content document.
//!
//! The document is a single JSON tree (`serde_json::Value` with insertion
//! order preserved) holding everything the site renders: singleton records
//! (`hero`, `profile`, `homepage`, `researchPage`), the `navigation` list,
//! the global `tags` registry, and the three ordered collections
//! (`research_papers`, `projects`, `blog_posts`).
//!
//! Records are schema-flexible mappings. The engine recognizes a known set
//! of fields per record kind and fills their defaults at the normalization
//! boundary ([`normalize`]); fields it does not recognize are carried
//! through load and save untouched.
//!
//! # Paths
//!
//! Sub-trees are addressed with dot-separated paths. Numeric segments
//! index into arrays:
//!
//! ```text
//! profile.socials.github     homepage.featuredEntry.id     projects.0.title
//! ```

pub mod normalize;
pub mod serialize;
mod store;

pub use store::DocumentStore;

use serde_json::Value;

/// An ordered field-name → value mapping; every record in the document is one.
pub type Record = serde_json::Map<String, Value>;

/// Resolve a dot-separated path against a JSON tree.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(list) => list.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Mutable variant of [`get_path`].
pub fn get_path_mut<'a>(root: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get_mut(segment)?,
            Value::Array(list) => list.get_mut(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Write `value` at `path`, creating intermediate objects as needed.
///
/// Array segments must already exist and be in range; a path that runs
/// through a missing array element or a scalar is a no-op. Data entry must
/// never fail hard, so there is no error to propagate.
pub fn set_path(root: &mut Value, path: &str, value: Value) {
    let mut current = root;
    let segments: Vec<&str> = path.split('.').collect();
    let (last, parents) = match segments.split_last() {
        Some(split) => split,
        None => return,
    };

    for segment in parents {
        current = match current {
            Value::Object(map) => map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Record::new())),
            Value::Array(list) => match segment.parse::<usize>().ok().and_then(|i| list.get_mut(i)) {
                Some(item) => item,
                None => return,
            },
            _ => return,
        };
    }

    match current {
        Value::Object(map) => {
            map.insert((*last).to_string(), value);
        }
        Value::Array(list) => {
            if let Some(slot) = last.parse::<usize>().ok().and_then(|i| list.get_mut(i)) {
                *slot = value;
            }
        }
        _ => {}
    }
}

/// The `title` of a record, or `"Untitled"` when absent or empty.
pub fn title_of(record: &Record) -> &str {
    match record.get("title").and_then(Value::as_str) {
        Some(title) if !title.is_empty() => title,
        _ => "Untitled",
    }
}
