//! Pagination value object for list queries.

use serde::{Deserialize, Serialize};

/// Default page size applied when a caller supplies no limit (or zero).
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Limit/offset window for list queries.
///
/// Limit and offset are non-negative by construction. A zero limit is
/// normalized to [`DEFAULT_PAGE_LIMIT`] so callers can omit it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    limit: u32,
    offset: u32,
}

impl Page {
    /// Creates a page window, defaulting the limit when zero.
    pub fn new(limit: u32, offset: u32) -> Self {
        let limit = if limit == 0 { DEFAULT_PAGE_LIMIT } else { limit };
        Self { limit, offset }
    }

    /// Maximum number of records to return.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
