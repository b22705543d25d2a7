//! Paginated response wrapper

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 20;

/// A single page of results
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Items on this page
    pub items: Vec<T>,
    /// Total number of matching items
    pub total: i64,
    /// Current page number (1-based)
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

/// Normalize page parameters and compute the SQL offset
pub fn page_bounds(page: Option<i64>, per_page: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(DEFAULT_PAGE).max(1);
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).max(1);
    let offset = (page - 1) * per_page;
    (page, per_page, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied_when_absent() {
        assert_eq!(page_bounds(None, None), (1, 20, 0));
    }

    #[test]
    fn offset_follows_page_number() {
        assert_eq!(page_bounds(Some(3), Some(10)), (3, 10, 20));
    }

    #[test]
    fn zero_page_clamped_to_first() {
        assert_eq!(page_bounds(Some(0), Some(10)), (1, 10, 0));
    }
}
