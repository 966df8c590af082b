//! Shared state handed to every handler.
//!
//! The cache is the only state that mutates across requests; everything else
//! is read-only capabilities and configuration, wired up once in `main`.

use std::sync::Arc;

use crate::cache::{DEFAULT_TTL, ResponseCache};
use crate::config::Config;
use crate::fetch::Fetch;
use crate::files::FileStore;

/// Fixed demo-image set served by the `json` and `random` routes.
pub const IMAGES: &[(&str, &str)] = &[
    ("streets", "https://iili.io/JV1pSV.jpg"),
    ("bread", "https://iili.io/Jj9MWG.jpg"),
];

/// Everything a handler can reach: configuration, the response cache, and
/// the two external collaborators.
pub struct Context {
    pub config: Config,
    pub cache: ResponseCache,
    pub fetcher: Arc<dyn Fetch>,
    pub files: Arc<dyn FileStore>,
}

impl Context {
    /// Wires up a context with the production cache TTL.
    pub fn new(config: Config, fetcher: Arc<dyn Fetch>, files: Arc<dyn FileStore>) -> Self {
        Self {
            config,
            cache: ResponseCache::new(DEFAULT_TTL),
            fetcher,
            files,
        }
    }
}
