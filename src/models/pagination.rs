//! Pagination types shared by list queries

use serde::{Deserialize, Serialize};

/// Pagination parameters for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// Page number (1-indexed)
    pub page: i64,
    /// Number of items per page
    pub per_page: i64,
}

impl ListParams {
    /// Create new pagination parameters.
    ///
    /// Pages below 1 are clamped to 1 so the offset never goes negative.
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> i64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.per_page)
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Pagination envelope returned alongside a page of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

impl Pagination {
    /// Build the envelope for `params` given the total number of matching items.
    pub fn new(params: &ListParams, total_items: i64) -> Self {
        Self {
            current_page: params.page,
            total_pages: total_pages(total_items, params.per_page),
            total_items,
            items_per_page: params.per_page,
        }
    }
}

/// `ceil(total_items / per_page)`, zero when there is nothing to page.
pub fn total_pages(total_items: i64, per_page: i64) -> i64 {
    if per_page <= 0 || total_items <= 0 {
        return 0;
    }
    (total_items + per_page - 1) / per_page
}
