//! Offset pagination utilities.

use serde::Serialize;

/// Default page size when the caller does not provide one.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Resolved page request: 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Builds a page request from optional query values.
    ///
    /// `limit` is clamped to `1..=max_limit` and `page` to `1..=last`, where
    /// `last` is the highest page whose offset still fits in an `i64`.
    pub fn new(page: Option<i64>, limit: Option<i64>, default_limit: i64, max_limit: i64) -> Self {
        let limit = limit.unwrap_or(default_limit).clamp(1, max_limit.max(1));
        let last_page = i64::MAX / limit;
        Self {
            page: page.unwrap_or(1).clamp(1, last_page),
            limit,
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Builds the pagination block for a response given the total row count.
    pub fn info(&self, total: i64) -> PaginationInfo {
        PaginationInfo {
            page: self.page,
            limit: self.limit,
            total,
            pages: total_pages(total, self.limit),
        }
    }
}

/// Pagination block returned alongside list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

/// Number of pages needed for `total` rows at `limit` rows per page.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = PageRequest::new(None, None, DEFAULT_PAGE_SIZE, 100);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 50);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_offset_for_later_pages() {
        let req = PageRequest::new(Some(3), Some(20), DEFAULT_PAGE_SIZE, 100);
        assert_eq!(req.offset(), 40);
    }

    #[test]
    fn test_clamping() {
        let req = PageRequest::new(Some(0), Some(10_000), DEFAULT_PAGE_SIZE, 100);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 100);

        let req = PageRequest::new(Some(-4), Some(0), DEFAULT_PAGE_SIZE, 100);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 1);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let req = PageRequest::new(Some(i64::MAX), Some(100), DEFAULT_PAGE_SIZE, 100);
        assert_eq!(req.limit, 100);
        assert!(req.page <= i64::MAX / 100);
        assert!(req.offset() >= 0);
        assert_eq!(req.offset(), (req.page - 1) * 100);

        let req = PageRequest::new(Some(i64::MAX), Some(1), DEFAULT_PAGE_SIZE, 100);
        assert_eq!(req.offset(), i64::MAX - 1);
    }

    #[test]
    fn test_offset_saturates_for_hand_built_requests() {
        let req = PageRequest {
            page: i64::MAX,
            limit: 50,
        };
        assert_eq!(req.offset(), i64::MAX);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 50), 0);
        assert_eq!(total_pages(1, 50), 1);
        assert_eq!(total_pages(50, 50), 1);
        assert_eq!(total_pages(51, 50), 2);
    }

    #[test]
    fn test_info() {
        let req = PageRequest::new(Some(2), Some(10), DEFAULT_PAGE_SIZE, 100);
        let info = req.info(35);
        assert_eq!(
            info,
            PaginationInfo {
                page: 2,
                limit: 10,
                total: 35,
                pages: 4
            }
        );
    }
}
