//! Page-window arithmetic shared by every paginated listing.

use core::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// 1-indexed page request.
///
/// `limit > 0` is expected to be validated by the caller; `page` is checked
/// here because a page below 1 produces a negative start offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl Pagination {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Index range this page covers in a collection of `len` records.
    ///
    /// - `start = (page - 1) * limit`, `end = min(start + limit, len)`
    /// - a negative start is `InvalidPage`
    /// - a start at or past `len` yields an empty range, not an error
    pub fn window(&self, len: usize) -> StoreResult<Range<usize>> {
        let start = self.page.saturating_sub(1).saturating_mul(self.limit);
        if start < 0 {
            return Err(StoreError::invalid_page(self.page));
        }

        let len_i = i64::try_from(len).unwrap_or(i64::MAX);
        if start >= len_i {
            return Ok(len..len);
        }

        let end = start.saturating_add(self.limit.max(0)).min(len_i);
        // Both bounds are within 0..=len here.
        Ok(start as usize..end as usize)
    }
}
