//! Deterministic emission of the document to its two persisted forms.
//!
//! Both forms are produced from the same in-memory tree in a single save so
//! they cannot drift apart: the interchange file (`data.json`, pretty with
//! 2-space indent) and the source module (`data.ts`) that the site project
//! imports. Key order is the map's insertion order, so serializing an
//! unchanged document is byte-stable across saves.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{EngineError, Representation};

/// Render the interchange form.
pub fn to_json(doc: &Value) -> String {
    serde_json::to_string_pretty(doc).unwrap_or_else(|_| "{}".to_string())
}

/// Render the source-module form wrapping the same content.
pub fn to_module(doc: &Value) -> String {
    format!("const data = {};\nexport default data;", to_json(doc))
}

/// Write both representations, interchange file first.
///
/// A failure on the first write aborts before the module file is touched.
/// A failure on the second write is reported as a divergence: the data
/// file was already replaced and the module file no longer matches it.
pub fn save(doc: &Value, data_path: &Path, module_path: &Path) -> Result<(), EngineError> {
    fs::write(data_path, to_json(doc)).map_err(|source| EngineError::Persistence {
        representation: Representation::Data,
        path: data_path.to_path_buf(),
        source,
    })?;

    fs::write(module_path, to_module(doc)).map_err(|source| EngineError::Diverged {
        representation: Representation::Module,
        written: Representation::Data,
        path: module_path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::normalize;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_to_json_two_space_indent() {
        let doc = json!({"profile": {"name": "A"}});
        let out = to_json(&doc);
        assert!(out.contains("{\n  \"profile\": {\n    \"name\": \"A\"\n  }\n}"));
    }

    #[test]
    fn test_to_module_wraps_interchange_content() {
        let doc = json!({"tags": []});
        let out = to_module(&doc);
        assert!(out.starts_with("const data = {"));
        assert!(out.ends_with(";\nexport default data;"));
        assert!(out.contains(&to_json(&doc)));
    }

    #[test]
    fn test_serialize_idempotent_for_normalized_documents() {
        let mut doc = json!({"projects": [{"id": "1", "title": "A"}]});
        normalize::apply(&mut doc);

        let first = to_json(&doc);
        let mut reparsed: Value = serde_json::from_str(&first).unwrap();
        normalize::apply(&mut reparsed);
        assert_eq!(to_json(&reparsed), first);
    }

    #[test]
    fn test_save_writes_both_forms() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data.json");
        let module = dir.path().join("data.ts");
        let doc = json!({"tags": ["a"]});

        save(&doc, &data, &module).unwrap();

        assert_eq!(fs::read_to_string(&data).unwrap(), to_json(&doc));
        assert_eq!(fs::read_to_string(&module).unwrap(), to_module(&doc));
    }

    #[test]
    fn test_save_aborts_when_data_file_unwritable() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("missing").join("data.json");
        let module = dir.path().join("data.ts");

        let err = save(&json!({}), &data, &module).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Persistence {
                representation: Representation::Data,
                ..
            }
        ));
        // The module file was never touched.
        assert!(!module.exists());
    }

    #[test]
    fn test_save_reports_divergence_on_second_write_failure() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data.json");
        let module = dir.path().join("missing").join("data.ts");

        let err = save(&json!({}), &data, &module).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Diverged {
                representation: Representation::Module,
                ..
            }
        ));
        // The data file did get written; the forms on disk disagree.
        assert!(data.exists());
    }
}
