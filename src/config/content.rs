//! `[content]` section configuration.
//!
//! Locations of the persisted document forms and authored assets,
//! relative to the project root until normalization.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section in folio.toml - where the site project keeps its data.
///
/// # Example
/// ```toml
/// [content]
/// data = "src/data.json"
/// module = "src/data.ts"
/// uploads = "public/uploads"
/// posts = "public/posts"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Project root directory (set from the CLI, not the config file).
    #[serde(default = "defaults::content::root")]
    #[educe(Default = defaults::content::root())]
    pub root: Option<PathBuf>,

    /// Interchange file holding the content document.
    #[serde(default = "defaults::content::data")]
    #[educe(Default = defaults::content::data())]
    pub data: PathBuf,

    /// Source module emitted alongside the interchange file.
    #[serde(default = "defaults::content::module")]
    #[educe(Default = defaults::content::module())]
    pub module: PathBuf,

    /// Directory served as `/uploads/` by the site.
    #[serde(default = "defaults::content::uploads")]
    #[educe(Default = defaults::content::uploads())]
    pub uploads: PathBuf,

    /// Directory of markdown post bodies.
    #[serde(default = "defaults::content::posts")]
    #[educe(Default = defaults::content::posts())]
    pub posts: PathBuf,
}
