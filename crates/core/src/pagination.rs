//! Client-side pagination over an already fully fetched list.
//!
//! The backend returns every order at once; the list screen shows it ten at a
//! time. Page numbers are 1-based and out-of-range requests are clamped, so
//! "Previous" on page 1 stays on page 1 and "Next" on the last page stays put.

use core::ops::{Range, RangeInclusive};

/// Rows per page on list screens.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page arithmetic for a list of known length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total_items: usize,
    per_page: usize,
}

impl Paginator {
    /// A paginator over `total_items` rows, `per_page` at a time.
    ///
    /// A `per_page` of zero is treated as one.
    #[must_use]
    pub const fn new(total_items: usize, per_page: usize) -> Self {
        Self {
            total_items,
            per_page: if per_page == 0 { 1 } else { per_page },
        }
    }

    /// Number of pages. An empty list still has one (empty) page.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        if self.total_items == 0 {
            1
        } else {
            self.total_items.div_ceil(self.per_page)
        }
    }

    /// Clamp a requested page number into `1..=page_count`.
    #[must_use]
    pub const fn clamp(&self, requested: usize) -> usize {
        let last = self.page_count();
        if requested < 1 {
            1
        } else if requested > last {
            last
        } else {
            requested
        }
    }

    /// Zero-based index range of the rows on `page` (after clamping).
    #[must_use]
    pub fn range(&self, page: usize) -> Range<usize> {
        let page = self.clamp(page);
        let start = (page - 1) * self.per_page;
        let end = (start + self.per_page).min(self.total_items);
        start.min(end)..end
    }
}

/// One page of rows plus the navigation state around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub per_page: usize,
}

impl<T> Page<T> {
    /// Take page `requested` (clamped) out of `all`.
    #[must_use]
    pub fn new(all: Vec<T>, requested: usize, per_page: usize) -> Self {
        let paginator = Paginator::new(all.len(), per_page);
        let number = paginator.clamp(requested);
        let range = paginator.range(number);
        let total_items = all.len();
        let items = all
            .into_iter()
            .skip(range.start)
            .take(range.end - range.start)
            .collect();

        Self {
            items,
            number,
            total_pages: paginator.page_count(),
            total_items,
            per_page: paginator.per_page,
        }
    }

    /// "Previous" is enabled on every page but the first.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// "Next" is enabled on every page but the last.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Page that "Previous" leads to (stays on page 1 at the start).
    #[must_use]
    pub const fn previous_number(&self) -> usize {
        if self.has_previous() {
            self.number - 1
        } else {
            self.number
        }
    }

    /// Page that "Next" leads to (stays on the last page at the end).
    #[must_use]
    pub const fn next_number(&self) -> usize {
        if self.has_next() {
            self.number + 1
        } else {
            self.number
        }
    }

    /// Every page number, for direct navigation links.
    #[must_use]
    pub const fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }

    /// 1-based position of the first row on this page (0 when empty).
    #[must_use]
    pub fn first_position(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.number - 1) * self.per_page + 1
        }
    }

    /// 1-based position of the last row on this page (0 when empty).
    #[must_use]
    pub fn last_position(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_position() + self.items.len() - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_first_page_of_twenty_five() {
        let page = Page::new(orders(25), 1, DEFAULT_PAGE_SIZE);
        assert_eq!(page.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_previous());
        assert!(page.has_next());
        assert_eq!(page.previous_number(), 1);
        assert_eq!(page.next_number(), 2);
    }

    #[test]
    fn test_last_page_of_twenty_five() {
        let page = Page::new(orders(25), 3, DEFAULT_PAGE_SIZE);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert!(page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.next_number(), 3);
        assert_eq!((page.first_position(), page.last_position()), (21, 25));
    }

    #[test]
    fn test_out_of_range_pages_are_clamped() {
        assert_eq!(Page::new(orders(25), 0, 10).number, 1);
        let past_end = Page::new(orders(25), 99, 10);
        assert_eq!(past_end.number, 3);
        assert_eq!(past_end.items.len(), 5);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_empty_page() {
        let paginator = Paginator::new(20, 10);
        assert_eq!(paginator.page_count(), 2);
        assert_eq!(paginator.range(2), 10..20);
    }

    #[test]
    fn test_empty_list_is_one_empty_page() {
        let page = Page::new(Vec::<usize>::new(), 1, 10);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.first_position(), 0);
        assert_eq!(page.page_numbers().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_zero_page_size_is_treated_as_one() {
        let paginator = Paginator::new(3, 0);
        assert_eq!(paginator.page_count(), 3);
        assert_eq!(paginator.range(2), 1..2);
    }
}
