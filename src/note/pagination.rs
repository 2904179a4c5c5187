//! Pagination settings for fetch

use serde::{Deserialize, Serialize};

use super::SortBy;

/// Page size used when none is given
pub const DEFAULT_PAGE_SIZE: u64 = 25;

/// First page number (pages are 1-based)
pub const DEFAULT_PAGE: u64 = 1;

/// Which page of which ordering to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Records per page; 0 means `DEFAULT_PAGE_SIZE`
    #[serde(default)]
    pub size: u64,

    /// 1-based page number; 0 means the first page
    #[serde(default)]
    pub page: u64,

    #[serde(default)]
    pub sort_by: SortBy,

    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            size: DEFAULT_PAGE_SIZE,
            page: DEFAULT_PAGE,
            sort_by: SortBy::Id,
            ascending: true,
        }
    }
}

impl Pagination {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            size,
            page,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, sort_by: SortBy, ascending: bool) -> Self {
        self.sort_by = sort_by;
        self.ascending = ascending;
        self
    }

    /// Build settings from raw query parameters
    ///
    /// Missing values take the defaults. An unrecognized sort key falls back
    /// to ascending by id, whatever `ascending` says.
    pub fn from_query(
        page: Option<u64>,
        size: Option<u64>,
        sort: Option<&str>,
        ascending: Option<bool>,
    ) -> Self {
        let ascending = ascending.unwrap_or(true);
        let (sort_by, ascending) = match sort.map(str::parse::<SortBy>) {
            None => (SortBy::Id, ascending),
            Some(Ok(sort_by)) => (sort_by, ascending),
            Some(Err(_)) => (SortBy::Id, true),
        };

        Self {
            size: size.unwrap_or(DEFAULT_PAGE_SIZE),
            page: page.unwrap_or(DEFAULT_PAGE),
            sort_by,
            ascending,
        }
        .normalize()
    }

    /// Replace zero size/page with their defaults
    pub fn normalize(mut self) -> Self {
        if self.size == 0 {
            self.size = DEFAULT_PAGE_SIZE;
        }
        if self.page == 0 {
            self.page = DEFAULT_PAGE;
        }
        self
    }

    /// Index of the first record of this page in the sorted set
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    /// Number of pages needed for `total` records, rounding up
    pub fn page_count(&self, total: u64) -> u64 {
        if self.size == 0 {
            return 0;
        }
        total.div_ceil(self.size)
    }
}
