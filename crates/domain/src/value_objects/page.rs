use serde::{Deserialize, Serialize};

/// Default limit for entity listings.
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// Default limit for devotion history reads.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Offset/limit window applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// First page with the history default limit.
    pub fn history() -> Self {
        Self::new(0, DEFAULT_HISTORY_LIMIT)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIST_LIMIT)
    }
}
