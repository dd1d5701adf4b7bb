//! Async client for the Gappd social API.
//!
//! The crate centers on an incremental feed engine: a [`FeedController`]
//! loads a paged, server-backed list lazily, never issues overlapping or
//! stale page requests, and supports full reload on explicit refresh or
//! identity change. An [`OptimisticMutator`] layers like/follow toggles
//! over the list, applied locally before network confirmation and rolled
//! back on failure.
//!
//! Rendering, routing, and session storage are the application's concern;
//! the client consumes a bearer credential via [`AuthProvider`] and
//! exposes feed state snapshots for the presentation layer to react to.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gappd_link::{GappdClient, Post, ToggleBinding};
//!
//! # async fn example() -> gappd_link::Result<()> {
//! let client = GappdClient::builder()
//!     .base_url("https://api.gappd.example")
//!     .bearer_token("eyJhbGc...")
//!     .build()?;
//!
//! // One controller per visible list.
//! let feed = client.feed::<Post>();
//! feed.load("posts/feed").await?;
//!
//! // Viewport sentinel reached the scroll margin: request the next page.
//! if feed.has_more() {
//!     feed.load_more().await?;
//! }
//!
//! // Optimistic like with rollback on failure.
//! let mutator = client.mutator();
//! mutator
//!     .toggle(feed.store(), &ToggleBinding::like(42), None)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod mutator;
pub mod store;
pub mod token;
pub mod transport;

pub use auth::AuthProvider;
pub use client::{GappdClient, GappdClientBuilder, DEFAULT_PAGE_SIZE};
pub use controller::{FeedController, FeedIdentity};
pub use error::{ErrorInfo, GappdLinkError, Result};
pub use fetcher::PageFetcher;
pub use models::{EventSummary, FeedEntry, Page, PhotoRef, Post, UserSummary};
pub use mutator::{OptimisticMutator, ToggleBinding, ToggleFeedback, ToggleView};
pub use store::{FeedState, FeedStatus, FeedStore};
pub use token::{LoadToken, TokenSlot};
pub use transport::{HttpTransport, MutationMethod, Transport};
