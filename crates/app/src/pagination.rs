//! Offset pagination shared by the listing endpoints.

use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// A sanitized page request. Page numbers are 1-indexed; out-of-range input
/// is clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    #[must_use]
    pub const fn page(self) -> i64 {
        self.page
    }

    #[must_use]
    pub const fn limit(self) -> i64 {
        self.limit
    }

    #[must_use]
    pub const fn offset(self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Position of a page within the full result set.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_records: i64,
    pub limit: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    #[must_use]
    pub fn new(request: PageRequest, total_records: i64) -> Self {
        // `i64::div_ceil` is unstable (`int_roundings`); this is its exact
        // equivalent for the positive divisors `limit` is clamped to.
        let total_pages = total_records.div_euclid(request.limit)
            + i64::from(total_records.rem_euclid(request.limit) != 0);

        Self {
            current_page: request.page,
            total_pages,
            total_records,
            limit: request.limit,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}

/// One page of results plus its position.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}
