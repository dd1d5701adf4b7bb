//! Feed state and its pure transitions.
//!
//! [`FeedState`] holds everything the presentation layer observes: the
//! ordered item list, page cursor, loading status, and last error. All
//! changes go through the transition methods; gated transitions return
//! `bool` so the controller can tell an applied step from a rejected one.
//! [`FeedStore`] is the thread-safe owner; its lock is only held for the
//! duration of a transition, never across a network await.

use std::sync::Mutex;

use crate::error::ErrorInfo;
use crate::models::{FeedEntry, Page};

/// Loading status of a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedStatus {
    /// No load in flight.
    #[default]
    Idle,
    /// First page (or a full refresh) is loading.
    LoadingFirst,
    /// An incremental page is loading.
    LoadingMore,
    /// The most recent load failed. Previously loaded items remain visible.
    Error,
}

/// Observable state of one feed instance.
///
/// `items` is append-only within a session: a successful first load
/// replaces the list, a successful next load appends one page. Server
/// pages are assumed disjoint; the engine does not de-duplicate.
#[derive(Debug, Clone)]
pub struct FeedState<T> {
    /// Loaded items, insertion order = page order.
    pub items: Vec<T>,

    /// Last successfully applied page, 0 = never loaded.
    pub current_page: u32,

    /// Total page count, 0 = unknown. Best-effort hint, not a guarantee.
    pub total_pages: u32,

    pub status: FeedStatus,

    pub last_error: Option<ErrorInfo>,
}

impl<T> Default for FeedState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 0,
            total_pages: 0,
            status: FeedStatus::Idle,
            last_error: None,
        }
    }
}

impl<T> FeedState<T> {
    /// Derived, never stored: another page can be requested.
    pub fn has_more(&self) -> bool {
        self.current_page > 0 && self.current_page < self.total_pages
    }

    /// Whether any load is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.status,
            FeedStatus::LoadingFirst | FeedStatus::LoadingMore
        )
    }

    /// Tear down to the empty state. Used on identity change so no item
    /// from a previous identity survives.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Start a first load (or full refresh).
    ///
    /// Existing items stay visible until the new first page succeeds,
    /// stale-while-revalidate, no flash-to-empty during a refresh.
    pub fn begin_first_load(&mut self) {
        self.status = FeedStatus::LoadingFirst;
        self.last_error = None;
    }

    /// Apply a successful first page: replaces the list.
    pub fn complete_first_load(&mut self, page: Page<T>) {
        self.items = page.items;
        self.current_page = page.page;
        self.total_pages = page.pages;
        self.status = FeedStatus::Idle;
    }

    /// Start an incremental load. Rejected (returns `false`) while a load
    /// is in flight or when no more pages are known to exist.
    ///
    /// Accepted from `Error` as well as `Idle`: a failed incremental load
    /// is retried by calling `load_more` again. Acceptance clears
    /// `last_error`, so a retry wipes the previous message before its
    /// outcome is known.
    pub fn begin_next_load(&mut self) -> bool {
        let retryable = matches!(self.status, FeedStatus::Idle | FeedStatus::Error);
        if !retryable || !self.has_more() {
            return false;
        }
        self.status = FeedStatus::LoadingMore;
        self.last_error = None;
        true
    }

    /// Apply a successful incremental page: appends to the list.
    ///
    /// Rejected (returns `false`) unless the page is exactly the next one,
    /// so an out-of-order page can never corrupt the cursor.
    pub fn complete_next_load(&mut self, page: Page<T>) -> bool {
        if page.page != self.current_page + 1 {
            return false;
        }
        self.items.extend(page.items);
        self.current_page = page.page;
        self.total_pages = page.pages;
        self.status = FeedStatus::Idle;
        true
    }

    /// Record a failed load. Items and cursor are unchanged, so partial
    /// data remains visible.
    pub fn fail(&mut self, error: ErrorInfo) {
        self.status = FeedStatus::Error;
        self.last_error = Some(error);
    }
}

impl<T: FeedEntry + Clone> FeedState<T> {
    /// Apply `transform` to the item with `id`, returning the previous
    /// value for rollback. `None` when the item is absent.
    pub fn mutate_item(&mut self, id: i64, transform: impl FnOnce(&mut T)) -> Option<T> {
        let item = self.items.iter_mut().find(|item| item.entry_id() == id)?;
        let previous = item.clone();
        transform(item);
        Some(previous)
    }

    /// Put a previously captured item back, overwriting whatever is there.
    /// Returns `false` when the item has left the feed in the meantime.
    pub fn restore_item(&mut self, previous: T) -> bool {
        let id = previous.entry_id();
        match self.items.iter_mut().find(|item| item.entry_id() == id) {
            Some(item) => {
                *item = previous;
                true
            }
            None => false,
        }
    }
}

/// Thread-safe owner of a [`FeedState`].
///
/// The presentation layer reads via [`snapshot`](FeedStore::snapshot); the
/// controller and mutator write via [`with_state`](FeedStore::with_state).
#[derive(Debug, Default)]
pub struct FeedStore<T> {
    state: Mutex<FeedState<T>>,
}

impl<T: Clone> FeedStore<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FeedState::default()),
        }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> FeedState<T> {
        self.state.lock().expect("feed state lock poisoned").clone()
    }

    /// Run `f` against the live state under the lock.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut FeedState<T>) -> R) -> R {
        let mut state = self.state.lock().expect("feed state lock poisoned");
        f(&mut state)
    }
}
