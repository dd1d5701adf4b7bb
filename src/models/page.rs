use serde::{Deserialize, Serialize};

/// One successfully fetched page of feed items.
///
/// `pages` is authoritative for the fetch it came from but only a
/// best-effort hint overall: the server may omit an explicit total, in
/// which case the fetcher substitutes a "maybe one more page" guess, and
/// server state may shrink or grow between fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in page order.
    pub items: Vec<T>,

    /// 1-based page number.
    pub page: u32,

    /// Total page count, `>= 1` for any successfully fetched page.
    pub pages: u32,
}

impl<T> Page<T> {
    /// Number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page carried no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
