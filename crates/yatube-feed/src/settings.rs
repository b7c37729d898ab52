use std::time::Duration;

use crate::pagination::DEFAULT_PAGE_SIZE;

/// Tunables for feed listing and follow policy.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub page_size: usize,
    /// How long the cached global feed page is served before recomputing.
    pub index_cache_ttl: Duration,
    /// Whether a user may follow themself. When false, self-follow is a no-op.
    pub allow_self_follow: bool,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            index_cache_ttl: Duration::from_secs(20),
            allow_self_follow: false,
        }
    }
}
