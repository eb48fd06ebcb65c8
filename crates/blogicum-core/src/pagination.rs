//! Page slicing for post listings.
//!
//! Requested page numbers never fail: a missing number means the first page,
//! and anything out of range or unparsable resolves to the last page.

use serde::Serialize;

/// Posts shown per listing page.
pub const POSTS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(POSTS_PER_PAGE)
    }
}

impl Paginator {
    /// A page size of zero is treated as one.
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of pages for `total` items. An empty listing still has one page.
    pub fn num_pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page).max(1)
    }

    /// Resolve a raw `?page=` value against `total` items.
    pub fn resolve(&self, requested: Option<&str>, total: usize) -> usize {
        let last = self.num_pages(total);
        let raw = match requested.map(str::trim) {
            None | Some("") => return 1,
            Some(raw) => raw,
        };
        if raw == "last" {
            return last;
        }
        match raw.parse::<usize>() {
            Ok(number) if (1..=last).contains(&number) => number,
            _ => last,
        }
    }

    pub fn get_page<T>(&self, items: Vec<T>, requested: Option<&str>) -> Page<T> {
        let total = items.len();
        let number = self.resolve(requested, total);
        let start = (number - 1) * self.per_page;
        let items: Vec<T> = items.into_iter().skip(start).take(self.per_page).collect();

        Page {
            items,
            number,
            num_pages: self.num_pages(total),
            per_page: self.per_page,
            total,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub per_page: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<usize> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<usize> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            per_page: self.per_page,
            total: self.total,
        }
    }
}
