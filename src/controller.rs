//! Feed orchestration: first load, incremental load, refresh, teardown.
//!
//! One [`FeedController`] drives one paged list. It owns the feed state,
//! mints a supersession token per load, and applies completions in token
//! order: a result whose token is stale updates nothing, so the visible
//! list always reflects the most recently requested load, never an older
//! one that happened to resolve later.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::error::{ErrorInfo, Result};
use crate::fetcher::PageFetcher;
use crate::models::{FeedEntry, Page};
use crate::store::{FeedState, FeedStatus, FeedStore};
use crate::token::{LoadToken, TokenSlot};
use crate::transport::Transport;

/// Identity of a feed's backing resource, e.g. `posts/feed` or
/// `posts/by-user/42`. Loading a different identity resets state first, so
/// no page from the previous identity ever shows under the new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedIdentity(String);

impl FeedIdentity {
    pub fn new(resource: impl Into<String>) -> Self {
        FeedIdentity(resource.into())
    }

    /// Resource path relative to the base URL.
    pub fn resource(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FeedIdentity {
    fn from(resource: &str) -> Self {
        FeedIdentity::new(resource)
    }
}

impl From<String> for FeedIdentity {
    fn from(resource: String) -> Self {
        FeedIdentity(resource)
    }
}

impl fmt::Display for FeedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which transition a completed fetch applies.
#[derive(Debug, Clone, Copy)]
enum Apply {
    First,
    Next,
}

/// Drives one paged, server-backed list.
///
/// `load_more` is idempotent and re-entrant-safe: a second call while one
/// is outstanding is a no-op, not queued. The viewport signal that
/// triggers it (a sentinel nearing the visible end of the list) is the
/// caller's concern.
///
/// # Examples
///
/// ```rust,no_run
/// use gappd_link::{GappdClient, Post};
///
/// # async fn example() -> gappd_link::Result<()> {
/// let client = GappdClient::builder()
///     .base_url("https://api.gappd.example")
///     .bearer_token("eyJhbGc...")
///     .build()?;
///
/// let feed = client.feed::<Post>();
/// feed.load("posts/feed").await?;
///
/// // Later, when the sentinel enters the scroll margin:
/// feed.load_more().await?;
///
/// for post in &feed.snapshot().items {
///     println!("post {}", post.id);
/// }
/// # Ok(())
/// # }
/// ```
pub struct FeedController<T> {
    store: FeedStore<T>,
    fetcher: PageFetcher,
    tokens: TokenSlot,
    identity: Mutex<Option<FeedIdentity>>,
}

impl<T> FeedController<T>
where
    T: FeedEntry + DeserializeOwned + Clone,
{
    pub(crate) fn new(transport: Arc<dyn Transport>, page_size: u32) -> Self {
        Self {
            store: FeedStore::new(),
            fetcher: PageFetcher::new(transport, page_size),
            tokens: TokenSlot::new(),
            identity: Mutex::new(None),
        }
    }

    /// The state this controller drives. The mutator writes through this
    /// same store; the presentation layer reads snapshots from it.
    pub fn store(&self) -> &FeedStore<T> {
        &self.store
    }

    /// Clone of the current feed state.
    pub fn snapshot(&self) -> FeedState<T> {
        self.store.snapshot()
    }

    /// Whether another page can be requested.
    pub fn has_more(&self) -> bool {
        self.store.with_state(|state| state.has_more())
    }

    /// (Re)load the first page for `identity`.
    ///
    /// Binding a different identity resets state first. Always supersedes
    /// any in-flight load; with an unchanged identity the previous items
    /// stay visible until the fresh first page lands.
    pub async fn load(&self, identity: impl Into<FeedIdentity>) -> Result<()> {
        let identity = identity.into();
        let token = {
            let mut bound = self.identity.lock().expect("feed identity lock poisoned");
            if bound.as_ref() != Some(&identity) {
                self.store.with_state(|state| state.reset());
                *bound = Some(identity.clone());
            }
            // Minted in the same locked step that starts the load, so
            // token order matches transition order.
            self.store.with_state(|state| {
                state.begin_first_load();
                self.tokens.mint()
            })
        };
        log::debug!("[FEED] load {} page=1", identity);
        let result = self.fetcher.fetch_page::<T>(identity.resource(), 1).await;
        self.apply(token, result, Apply::First)
    }

    /// Request the next page.
    ///
    /// A no-op while any load is outstanding, when no identity is bound,
    /// or when no more pages are known to exist. After a failed
    /// incremental load, calling this again retries the same page.
    pub async fn load_more(&self) -> Result<()> {
        let identity = {
            let bound = self.identity.lock().expect("feed identity lock poisoned");
            match bound.as_ref() {
                Some(identity) => identity.clone(),
                None => return Ok(()),
            }
        };
        // Gate, claim the next page number, and mint the token in one
        // locked step, so at most one pagination request is outstanding
        // per feed and no newer load can slip in between.
        let (next_page, token) = match self.store.with_state(|state| {
            if state.begin_next_load() {
                Some((state.current_page + 1, self.tokens.mint()))
            } else {
                None
            }
        }) {
            Some(claim) => claim,
            None => {
                log::debug!("[FEED] load_more rejected for {}", identity);
                return Ok(());
            }
        };
        log::debug!("[FEED] load_more {} page={}", identity, next_page);
        let result = self
            .fetcher
            .fetch_page::<T>(identity.resource(), next_page)
            .await;
        self.apply(token, result, Apply::Next)
    }

    /// Unconditional reload of the bound identity, superseding any
    /// in-flight load. Used after e.g. creating a new post. A no-op when
    /// nothing was ever loaded.
    pub async fn refresh(&self) -> Result<()> {
        let identity = {
            let bound = self.identity.lock().expect("feed identity lock poisoned");
            bound.clone()
        };
        match identity {
            Some(identity) => self.load(identity).await,
            None => Ok(()),
        }
    }

    /// Invalidate any in-flight load on teardown. The physical request is
    /// not aborted; its completion is discarded by the token check.
    pub fn detach(&self) {
        self.tokens.invalidate();
    }

    fn apply(&self, token: LoadToken, result: Result<Page<T>>, mode: Apply) -> Result<()> {
        self.store.with_state(|state| {
            // Token check and state write under the same lock: a newer
            // load cannot supersede this one between check and write.
            if !self.tokens.is_current(token) {
                // Stale result: a newer load superseded this one. Not an
                // error, just update nothing.
                log::debug!("[FEED] dropping stale {:?} result", mode);
                return Ok(());
            }
            match result {
                Ok(page) => {
                    match mode {
                        Apply::First => state.complete_first_load(page),
                        Apply::Next => {
                            if !state.complete_next_load(page) {
                                // Server answered a page other than the
                                // one claimed. Drop it and go back to idle
                                // so the feed stays usable.
                                log::warn!("[FEED] out-of-order page ignored");
                                state.status = FeedStatus::Idle;
                            }
                        }
                    }
                    Ok(())
                }
                Err(err) => {
                    state.fail(ErrorInfo::from(&err));
                    Err(err)
                }
            }
        })
    }
}
