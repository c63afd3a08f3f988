//! The result envelope both pagination strategies produce.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A page of items with navigation links.
///
/// Serializes as `{"items": [...], "total_count": n, "previous": url|null,
/// "next": url|null}`. Links are absolute URLs that carry every query
/// parameter needed to fetch the neighbouring page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Page<T> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Total count of items matching the query, across all pages.
    pub total_count: u64,
    /// Link to the previous page, if one exists.
    pub previous: Option<String>,
    /// Link to the next page, if one exists.
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Creates a page without navigation links.
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self {
            items,
            total_count,
            previous: None,
            next: None,
        }
    }

    /// Creates an empty page.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    /// Returns true if a previous page exists.
    #[inline]
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Returns true if a next page exists.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Maps the items to a different type, keeping the links.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            previous: self.previous,
            next: self.next,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
