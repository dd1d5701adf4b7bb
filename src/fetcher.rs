//! Page fetching and envelope parsing.
//!
//! The server answers list requests in one of two shapes: a bare JSON
//! array (a single complete page) or an envelope `{items, page, pages}`.
//! Some endpoints omit `pages`; the fetcher then substitutes a best-effort
//! "more data might exist" guess, so callers must tolerate a final
//! `load_more` that comes back empty.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::{GappdLinkError, Result};
use crate::models::Page;
use crate::transport::Transport;

/// Fetches one page of a resource and interprets the page envelope.
pub struct PageFetcher {
    transport: Arc<dyn Transport>,
    page_size: u32,
}

impl PageFetcher {
    pub(crate) fn new(transport: Arc<dyn Transport>, page_size: u32) -> Self {
        Self {
            transport,
            page_size,
        }
    }

    /// GET `<resource>?page=<n>&per_page=<size>` and parse the body.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        resource: &str,
        page: u32,
    ) -> Result<Page<T>> {
        let separator = if resource.contains('?') { '&' } else { '?' };
        let path = format!(
            "{}{}page={}&per_page={}",
            resource, separator, page, self.page_size
        );
        log::debug!("[FEED_PAGE] GET {} page={}", resource, page);
        let body = self.transport.get_json(&path).await?;
        parse_page_body(body, page)
    }
}

/// Interpret a page response body.
///
/// - Bare array: a single complete page, `pages = page`.
/// - Envelope: missing `items` defaults to empty; a missing `pages` total
///   is inferred as `page + 1` when the page had items, `page` otherwise.
fn parse_page_body<T: DeserializeOwned>(body: JsonValue, requested_page: u32) -> Result<Page<T>> {
    match body {
        JsonValue::Array(values) => Ok(Page {
            items: parse_items(values)?,
            page: requested_page,
            pages: requested_page,
        }),
        JsonValue::Object(mut map) => {
            let items = match map.remove("items") {
                Some(JsonValue::Array(values)) => parse_items(values)?,
                _ => Vec::new(),
            };
            let page = map
                .get("page")
                .and_then(JsonValue::as_u64)
                .map(|p| p as u32)
                .unwrap_or(requested_page);
            let pages = match map.get("pages").and_then(JsonValue::as_u64) {
                Some(pages) => pages as u32,
                None if items.is_empty() => page,
                None => page + 1,
            };
            Ok(Page { items, page, pages })
        }
        other => Err(GappdLinkError::parse(format!(
            "unexpected page body: {}",
            other
        ))),
    }
}

fn parse_items<T: DeserializeOwned>(values: Vec<JsonValue>) -> Result<Vec<T>> {
    values
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|e| GappdLinkError::parse(e.to_string()))
        })
        .collect()
}
