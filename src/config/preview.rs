//! `[preview]` section configuration.
//!
//! Settings for the node dev server the studio launches alongside edits.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[preview]` section in folio.toml - dev server settings.
///
/// # Example
/// ```toml
/// [preview]
/// interface = "0.0.0.0"  # Listen on all interfaces
/// port = 3000
/// command = ["npm"]
/// ready_timeout = 60     # seconds to wait for the port to open
/// open = false           # don't launch a browser
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PreviewConfig {
    /// Network interface the dev server binds.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    #[serde(default = "defaults::preview::interface")]
    #[educe(Default = defaults::preview::interface())]
    pub interface: String,

    /// HTTP port the dev server is expected on (default: 8080).
    #[serde(default = "defaults::preview::port")]
    #[educe(Default = defaults::preview::port())]
    pub port: u16,

    /// Package manager executable used for `install` and `start`.
    #[serde(default = "defaults::preview::command")]
    #[educe(Default = defaults::preview::command())]
    pub command: Vec<String>,

    /// Seconds to wait for the server port to accept connections.
    #[serde(default = "defaults::preview::ready_timeout")]
    #[educe(Default = defaults::preview::ready_timeout())]
    pub ready_timeout: u64,

    /// Open a browser once the server is ready.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub open: bool,
}

impl PreviewConfig {
    /// The URL the dev server is reachable at.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.interface, self.port)
    }
}
