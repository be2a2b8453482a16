//! Pagination types for API responses
//!
//! The backend paginates list endpoints with a
//! `{count, next, previous, results}` envelope where `next`/`previous` are
//! absolute URLs carrying a `page` query parameter.

use serde::{Deserialize, Serialize};
use url::Url;

/// Paginated collection envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total count of items across all pages
    pub count: i64,

    /// URL of the next page, absent on the last page
    pub next: Option<String>,

    /// URL of the previous page, absent on the first page
    pub previous: Option<String>,

    /// Items on this page
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// An absent `next` link means this is the last page.
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }

    /// Page number of the next page, extracted from the envelope URL.
    pub fn next_page(&self) -> Option<u32> {
        page_number(self.next.as_deref()?)
    }

    /// Page number of the previous page. A previous link without a `page`
    /// parameter points at page 1.
    pub fn previous_page(&self) -> Option<u32> {
        let link = self.previous.as_deref()?;
        Some(page_number(link).unwrap_or(1))
    }
}

fn page_number(link: &str) -> Option<u32> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

/// Query parameters accepted by list endpoints
#[derive(Debug, Clone, Default)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

impl PageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    /// Build the query pairs to append to a list request.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("page_size".to_string(), page_size.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(ordering) = &self.ordering {
            pairs.push(("ordering".to_string(), ordering.clone()));
        }
        pairs
    }
}
