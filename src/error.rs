//! Engine error types.
//!
//! Data-entry problems (bad integers, dangling references, out-of-range
//! indices) never surface as errors; they degrade to defaults or no-ops so
//! an editing session cannot crash. The variants here cover the cases that
//! must reach the user.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One of the two persisted representations of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// The pretty-printed interchange file (`data.json`).
    Data,
    /// The source-module wrapper (`data.ts`).
    Module,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data => write!(f, "data file"),
            Self::Module => write!(f, "module file"),
        }
    }
}

/// Errors produced by the document engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The persisted document is missing. The store recovers from this by
    /// starting empty; the variant exists for callers that need to know.
    #[error("content document not found at `{0}`")]
    NotFound(PathBuf),

    /// A tag with the same (case-sensitive) name is already registered.
    #[error("tag `{0}` already exists")]
    DuplicateTag(String),

    /// Writing one of the persisted representations failed before the
    /// other was touched. The save is aborted; the two forms on disk are
    /// still consistent with each other.
    #[error("failed to write the {representation} `{path}`")]
    Persistence {
        representation: Representation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the second representation failed after the first one was
    /// already replaced. The two forms on disk no longer agree and the
    /// user must be told so.
    #[error(
        "failed to write the {representation} `{path}` after the {written} was already updated; \
         the two persisted forms have diverged, re-run the save"
    )]
    Diverged {
        representation: Representation,
        written: Representation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_duplicate_tag_display() {
        let err = EngineError::DuplicateTag("Rust".into());
        assert_eq!(format!("{err}"), "tag `Rust` already exists");
    }

    #[test]
    fn test_persistence_display_names_representation() {
        let err = EngineError::Persistence {
            representation: Representation::Data,
            path: PathBuf::from("data.json"),
            source: Error::new(ErrorKind::PermissionDenied, "denied"),
        };
        let display = format!("{err}");
        assert!(display.contains("data file"));
        assert!(display.contains("data.json"));
    }

    #[test]
    fn test_diverged_display_mentions_both_forms() {
        let err = EngineError::Diverged {
            representation: Representation::Module,
            written: Representation::Data,
            path: PathBuf::from("data.ts"),
            source: Error::other("disk full"),
        };
        let display = format!("{err}");
        assert!(display.contains("module file"));
        assert!(display.contains("diverged"));
    }
}
