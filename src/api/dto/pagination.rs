//! Paged response wrapper for list endpoints.

use serde::Serialize;
use utoipa::ToSchema;

/// Generic paged response wrapper.
#[derive(Debug, Serialize, ToSchema)]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Current page number (1-based)
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub page_size: u32,
    #[schema(example = 100)]
    pub total_items: u64,
    #[schema(example = 5)]
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> PagedResponse<T> {
    pub fn new(data: Vec<T>, page: u32, page_size: u32, total_items: u64) -> Self {
        let total_pages = ((total_items as f64) / (page_size as f64)).ceil() as u32;
        Self {
            data,
            pagination: PaginationMeta {
                page,
                page_size,
                total_items,
                total_pages,
                has_next: page < total_pages,
                has_prev: page > 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paged_response_metadata() {
        let resp = PagedResponse::new(vec![1, 2, 3], 2, 3, 7);
        assert_eq!(resp.pagination.total_pages, 3);
        assert!(resp.pagination.has_next);
        assert!(resp.pagination.has_prev);
    }

    #[test]
    fn last_page_has_no_next() {
        let resp = PagedResponse::new(vec![1], 3, 3, 7);
        assert!(!resp.pagination.has_next);
    }
}
