//! Page arithmetic for the ranking table and the chart.

use std::ops::Range;

/// One entry in a page-link strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// Link to a 0-based page
    Page { index: usize, current: bool },

    /// Gap between the edge links and the visible window
    Ellipsis,
}

/// Page cursor over `total_rows` rows.
///
/// There is always at least one page, even with no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    total_rows: usize,
    page_size: usize,
    page: usize,
}

impl Pagination {
    /// A zero page size is treated as 1
    pub fn new(total_rows: usize, page_size: usize) -> Self {
        Self {
            total_rows,
            page_size: page_size.max(1),
            page: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn total_pages(&self) -> usize {
        self.total_rows.div_ceil(self.page_size).max(1)
    }

    /// Move to a page, clamped into range. Returns the page actually selected.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.page = page.min(self.total_pages() - 1);
        self.page
    }

    pub fn first(&mut self) -> usize {
        self.go_to(0)
    }

    pub fn last(&mut self) -> usize {
        self.go_to(usize::MAX)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages()
    }

    /// Change the row count, keeping the current page if it still exists
    pub fn set_total_rows(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
        self.go_to(self.page);
    }

    /// Row indices shown on the current page
    pub fn range(&self) -> Range<usize> {
        let start = (self.page * self.page_size).min(self.total_rows);
        let end = (start + self.page_size).min(self.total_rows);
        start..end
    }

    /// Rows of `items` on the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }

    /// Link strip: a window of `visible` pages around the current one, plus
    /// the first and last pages with ellipses where pages are skipped.
    pub fn page_links(&self, visible: usize) -> Vec<PageLink> {
        let visible = visible.max(1);
        let last = self.total_pages() - 1;

        let start = self.page.saturating_sub(visible / 2);
        let end = (start + visible - 1).min(last);
        let start = end.saturating_sub(visible - 1);

        let mut links = Vec::new();
        if start > 0 {
            links.push(self.link(0));
        }
        if start > 1 {
            links.push(PageLink::Ellipsis);
        }
        links.extend((start..=end).map(|i| self.link(i)));
        if end + 2 <= last {
            links.push(PageLink::Ellipsis);
        }
        if end < last {
            links.push(self.link(last));
        }
        links
    }

    fn link(&self, index: usize) -> PageLink {
        PageLink::Page {
            index,
            current: index == self.page,
        }
    }
}
