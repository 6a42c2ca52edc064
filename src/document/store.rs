//! Owner of the in-memory document tree.
//!
//! Every editing component receives an explicit handle to the store; the
//! store is the only owner of record data. Bindings and editors navigate
//! into it by path, never by holding copies.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use super::{Record, get_path, get_path_mut, normalize, serialize, set_path};
use crate::error::EngineError;
use crate::log;

/// The single source of truth for the content document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStore {
    doc: Value,
}

impl DocumentStore {
    /// Create a store holding an empty document.
    pub fn empty() -> Self {
        Self {
            doc: Value::Object(Record::new()),
        }
    }

    /// Wrap an already-parsed document tree. The root must be an object.
    pub fn from_value(doc: Value) -> Result<Self> {
        if !doc.is_object() {
            bail!("document root must be an object");
        }
        Ok(Self { doc })
    }

    /// Load the document from its interchange file.
    ///
    /// A missing file is not fatal: editing starts from an empty document
    /// and the first save creates both persisted forms. Malformed JSON is
    /// fatal; silently discarding an existing document risks data loss.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log!("store"; "{}", EngineError::NotFound(path.to_path_buf()));
                log!("store"; "starting with an empty document");
                return Ok(Self::empty());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        let doc: Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Self::from_value(doc)
    }

    /// Fill in missing singletons and field defaults. Idempotent; never
    /// overwrites a field that is already present.
    pub fn normalize(&mut self) {
        normalize::apply(&mut self.doc);
    }

    /// Write both persisted representations from the current tree.
    pub fn save(&self, data_path: &Path, module_path: &Path) -> Result<(), EngineError> {
        serialize::save(&self.doc, data_path, module_path)
    }

    /// The whole document tree.
    pub fn value(&self) -> &Value {
        &self.doc
    }

    /// Read the value at a dot-separated path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        get_path(&self.doc, path)
    }

    /// Mutable access to the value at a path.
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Value> {
        get_path_mut(&mut self.doc, path)
    }

    /// Write a value at a path, creating intermediate objects as needed.
    pub fn set(&mut self, path: &str, value: Value) {
        set_path(&mut self.doc, path, value);
    }

    /// The record at `path`, if present and an object.
    pub fn record(&self, path: &str) -> Option<&Record> {
        self.get(path).and_then(Value::as_object)
    }

    /// The array under the top-level `key`, if present.
    pub fn list(&self, key: &str) -> Option<&Vec<Value>> {
        self.doc.get(key).and_then(Value::as_array)
    }

    /// Mutable access to the array under the top-level `key`, creating an
    /// empty one when absent.
    pub fn list_mut(&mut self, key: &str) -> &mut Vec<Value> {
        let root = self.doc.as_object_mut().expect("document root is an object");
        root.entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .expect("collection is an array")
    }
}
