//! Data models for the gappd-link client.
//!
//! Wire formats follow the Gappd REST API. Models tolerate missing fields
//! with `#[serde(default)]`: the server omits empty collections and
//! viewer-specific flags for anonymous requests.

pub mod event_summary;
pub mod page;
pub mod post;
pub mod user_summary;

pub use event_summary::EventSummary;
pub use page::Page;
pub use post::{PhotoRef, Post};
pub use user_summary::UserSummary;

/// Implemented by every item type the feed engine can page over.
///
/// Identity is by id; the engine assumes nothing else about the shape
/// beyond the fields a given toggle touches.
pub trait FeedEntry {
    /// Stable unique key for this item.
    fn entry_id(&self) -> i64;
}
