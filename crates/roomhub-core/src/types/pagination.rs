//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Validated paging parameters (1-based page number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Build a page request from raw client input.
    ///
    /// A missing page defaults to 1 and a missing size to
    /// [`DEFAULT_PAGE_SIZE`]. A page below 1 or a size outside
    /// `1..=max_page_size` is rejected, as is a page whose offset would not
    /// fit a SQL `BIGINT`.
    pub fn from_params(
        page: Option<i64>,
        page_size: Option<i64>,
        max_page_size: u64,
    ) -> Result<Self, AppError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(AppError::validation("pageNo must be greater than 0"));
        }
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE as i64);
        if page_size < 1 || page_size as u64 > max_page_size {
            return Err(AppError::validation(format!(
                "pageSize must be between 1 and {max_page_size}"
            )));
        }
        if (page - 1).checked_mul(page_size).is_none() {
            return Err(AppError::validation("pageNo is too large"));
        }
        Ok(Self {
            page: page as u64,
            page_size: page_size as u64,
        })
    }

    /// Calculate the SQL `OFFSET` value, clamped to `i64::MAX`.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(i64::MAX as u64)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper: one page of items plus the unpaged total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    pub total_count: u64,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    /// Transform each item, keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }
}
