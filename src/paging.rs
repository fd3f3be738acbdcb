//! Page arithmetic: total pages, page clamping, LIMIT/OFFSET.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    /// 1-based page actually served.
    pub page: i64,
    pub page_rows: i64,
    /// Zero-based index of the first row of `page`.
    pub offset: i64,
    pub total_pages: i64,
    pub total_rows: u64,
}

impl Page {
    /// Negative `page_rows` is clamped to 0; zero rows per page means zero pages.
    /// The requested page is clamped down to `total_pages` and up to 1.
    /// Any upper bound on `page_rows` is enforced before this, never by shrinking the page.
    pub fn compute(total_rows: u64, requested_page: i64, page_rows: i64) -> Self {
        let page_rows = page_rows.max(0);
        let total_pages = if page_rows == 0 {
            0
        } else {
            i64::try_from(total_rows.div_ceil(page_rows as u64)).unwrap_or(i64::MAX)
        };
        let page = requested_page.min(total_pages).max(1);
        let offset = page_rows.saturating_mul(page).saturating_sub(page_rows).max(0);
        Page {
            page,
            page_rows,
            offset,
            total_pages,
            total_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_past_last_page() {
        let p = Page::compute(25, 5, 10);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.page, 3);
        assert_eq!(p.offset, 20);
    }

    #[test]
    fn offset_is_rows_times_page_minus_one() {
        for page in 1..=3 {
            let p = Page::compute(25, page, 10);
            assert_eq!(p.offset, 10 * (page - 1));
        }
    }

    #[test]
    fn negative_page_rows_clamped_to_zero() {
        let p = Page::compute(25, 2, -5);
        assert_eq!(p.page_rows, 0);
        assert_eq!(p.offset, 0);
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn zero_page_rows_does_not_divide() {
        let p = Page::compute(25, 1, 0);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn non_positive_page_is_first_page() {
        let p = Page::compute(25, -3, 10);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn empty_result() {
        let p = Page::compute(0, 1, 10);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn large_pages_keep_their_size() {
        let p = Page::compute(5000, 2, 2000);
        assert_eq!(p.page_rows, 2000);
        assert_eq!(p.offset, 2000);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn exact_multiple() {
        assert_eq!(Page::compute(30, 1, 10).total_pages, 3);
        assert_eq!(Page::compute(31, 1, 10).total_pages, 4);
    }
}
