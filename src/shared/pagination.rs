//! Pagination
//!
//! List endpoints accept `?page=<n>&size=<n>` (zero-based page) and answer
//! with a `Page<T>` envelope carrying the totals a client needs to render
//! paging controls.

use serde::{Deserialize, Serialize};

/// Raw paging query as it arrives on the query string
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl PageRequest {
    /// Resolve against server defaults. A missing or zero size falls back to
    /// `default_size`; sizes above `max_size` are clamped.
    pub fn resolve(&self, default_size: u32, max_size: u32) -> PageParams {
        let size = match self.size {
            Some(0) | None => default_size,
            Some(size) => size.min(max_size),
        };
        PageParams {
            page: self.page.unwrap_or(0),
            size: size.max(1),
        }
    }
}

/// Resolved paging parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub size: u32,
}

impl PageParams {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size: size.max(1) }
    }

    /// SQL `OFFSET`
    pub fn offset(&self) -> i64 {
        self.page as i64 * self.size as i64
    }

    /// SQL `LIMIT`
    pub fn limit(&self) -> i64 {
        self.size as i64
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, params: PageParams, total_elements: u64) -> Self {
        let size = params.size.max(1) as u64;
        Self {
            content,
            page: params.page,
            size: params.size,
            total_elements,
            total_pages: total_elements.div_ceil(size),
        }
    }

    /// Convert the items while keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    /// Slice an already-ordered, fully materialised list.
    pub fn from_slice(items: &[T], params: PageParams) -> Self
    where
        T: Clone,
    {
        let total = items.len() as u64;
        let content = items
            .iter()
            .skip(params.offset() as usize)
            .take(params.limit() as usize)
            .cloned()
            .collect();
        Self::new(content, params, total)
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64 + 1) < self.total_pages
    }
}
