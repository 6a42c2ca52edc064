//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn data() -> PathBuf {
        "data.json".into()
    }

    pub fn module() -> PathBuf {
        "data.ts".into()
    }

    pub fn uploads() -> PathBuf {
        "public/uploads".into()
    }

    pub fn posts() -> PathBuf {
        "posts".into()
    }
}

// ============================================================================
// [preview] Section Defaults
// ============================================================================

pub mod preview {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        8080
    }

    pub fn command() -> Vec<String> {
        vec!["npm".into()]
    }

    pub fn ready_timeout() -> u64 {
        30
    }
}
