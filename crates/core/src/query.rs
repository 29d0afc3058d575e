//! List-view query helpers.
//!
//! Collections are fetched whole and filtered in memory; these helpers keep
//! the slicing arithmetic out of view code.

use serde::{Deserialize, Serialize};

/// Pagination parameters for list views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of items to return.
    pub limit: u32,
    /// Offset (0-based).
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 50, // Safe default
            offset: 0,
        }
    }
}

impl Pagination {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(50).min(1000), // Cap at 1000 for safety
            offset: offset.unwrap_or(0),
        }
    }

    /// Convenience for page-number style callers (1-based page index).
    pub fn page(number: u32, per_page: u32) -> Self {
        let number = number.max(1);
        Self::new(Some(per_page), Some((number - 1) * per_page))
    }
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total item count before slicing (for "page X of Y" displays).
    pub total: usize,
    pub limit: u32,
    pub offset: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit as usize)
    }
}

/// Slice an already-filtered list into one page.
pub fn paginate<T: Clone>(items: &[T], pagination: Pagination) -> Page<T> {
    let start = (pagination.offset as usize).min(items.len());
    let end = start.saturating_add(pagination.limit as usize).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        total: items.len(),
        limit: pagination.limit,
        offset: pagination.offset,
    }
}
