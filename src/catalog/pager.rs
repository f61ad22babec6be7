use std::ops::Range;

use crate::catalog::word::WordRecord;

pub const DEFAULT_PAGE_SIZE: usize = 70;

/// Splits a catalog into fixed-size contiguous pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, catalog_len: usize) -> usize {
        catalog_len.div_ceil(self.page_size)
    }

    /// Catalog index range covered by `page`, clipped to the catalog length.
    pub fn page_bounds(&self, page: usize, catalog_len: usize) -> Range<usize> {
        let start = page.saturating_mul(self.page_size).min(catalog_len);
        let end = start.saturating_add(self.page_size).min(catalog_len);
        start..end
    }

    pub fn page<'a>(&self, catalog: &'a [WordRecord], page: usize) -> &'a [WordRecord] {
        &catalog[self.page_bounds(page, catalog.len())]
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
