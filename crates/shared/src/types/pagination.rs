//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Upper bound on `per_page`.
pub const MAX_PER_PAGE: u32 = 200;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    50
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Returns a copy with `page >= 1` and `1 <= per_page <= MAX_PER_PAGE`.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Number of items to skip.
    #[must_use]
    pub fn offset(&self) -> usize {
        let page = self.clamped();
        (page.page as usize - 1) * page.per_page as usize
    }

    /// Maximum number of items to return.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.clamped().per_page as usize
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Slices one page out of an iterator of `total` items.
    #[must_use]
    pub fn paginate<I>(items: I, total: usize, request: &PageRequest) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let page = request.clamped();
        let data = items
            .into_iter()
            .skip(request.offset())
            .take(request.limit())
            .collect();
        Self::new(data, page.page, page.per_page, total as u64)
    }

    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(u64::from(per_page.max(1)))
        };

        Self {
            data,
            meta: PageMeta {
                page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let req = PageRequest::default();
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, 50);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_offset_and_clamping() {
        let req = PageRequest { page: 3, per_page: 10 };
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);

        let req = PageRequest { page: 0, per_page: 10_000 };
        assert_eq!(req.offset(), 0);
        assert_eq!(req.limit(), MAX_PER_PAGE as usize);
    }

    #[test]
    fn test_paginate_slices_items() {
        let req = PageRequest { page: 2, per_page: 3 };
        let page = PageResponse::paginate(1..=8, 8, &req);
        assert_eq!(page.data, vec![4, 5, 6]);
        assert_eq!(page.meta.total, 8);
        assert_eq!(page.meta.total_pages, 3);
    }

    #[test]
    fn test_empty_has_one_page() {
        let page = PageResponse::<u8>::new(vec![], 1, 20, 0);
        assert_eq!(page.meta.total_pages, 1);
    }
}
