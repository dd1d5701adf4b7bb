//! Optimistic like/follow toggles with rollback.
//!
//! A toggle flips a boolean on one feed item and moves its counter by one,
//! applies that locally before the network call, then issues POST (flag
//! becoming true) or DELETE (flag becoming false) against the mutation
//! endpoint. On failure the item is restored to its exact prior value. A
//! per-endpoint busy guard rejects a second toggle while one is
//! outstanding; no queuing, no merging of two in-flight toggles.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::error::{GappdLinkError, Result};
use crate::models::{FeedEntry, Post, UserSummary};
use crate::store::FeedStore;
use crate::transport::{MutationMethod, Transport};

/// Current flag + counter for the pair of fields a toggle touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleView {
    pub flag: bool,
    pub count: u32,
}

impl ToggleView {
    /// Flip the flag and move the counter by one, floored at zero.
    pub fn toggled(self) -> ToggleView {
        let flag = !self.flag;
        let count = if flag {
            self.count.saturating_add(1)
        } else {
            self.count.saturating_sub(1)
        };
        ToggleView { flag, count }
    }
}

/// Binds a toggle to its mutation endpoint and to the pair of fields it
/// touches on `T`. The engine assumes nothing about `T` beyond these.
pub struct ToggleBinding<T> {
    /// Target item id.
    pub item_id: i64,
    /// Mutation endpoint, relative to the base URL.
    pub path: String,
    /// Read the flag + counter off an item.
    pub read: fn(&T) -> ToggleView,
    /// Write a flag + counter onto an item.
    pub write: fn(&mut T, ToggleView),
}

impl ToggleBinding<Post> {
    /// Like toggle for a post: `posts/<id>/like` over `liked` and
    /// `likes_count`.
    pub fn like(post_id: i64) -> Self {
        ToggleBinding {
            item_id: post_id,
            path: format!("posts/{}/like", post_id),
            read: |post| ToggleView {
                flag: post.liked,
                count: post.likes_count,
            },
            write: |post, view| {
                post.liked = view.flag;
                post.likes_count = view.count;
            },
        }
    }
}

impl ToggleBinding<UserSummary> {
    /// Follow toggle for a user: `users/<id>/follow` over `is_following`
    /// and `followers_count`.
    pub fn follow(user_id: i64) -> Self {
        ToggleBinding {
            item_id: user_id,
            path: format!("users/{}/follow", user_id),
            read: |user| ToggleView {
                flag: user.is_following,
                count: user.followers_count,
            },
            write: |user, view| {
                user.is_following = view.flag;
                user.followers_count = view.count;
            },
        }
    }
}

/// Visual-feedback hook: invoked with the new view right after the
/// optimistic apply and, on failure, again with the restored view.
pub type ToggleFeedback = Arc<dyn Fn(ToggleView) + Send + Sync>;

/// Applies optimistic toggles against a [`FeedStore`] and reconciles them
/// with the server.
///
/// Works on any controller's store: toggles touch item-level fields only
/// and interleave freely with pagination.
///
/// # Examples
///
/// ```rust,no_run
/// use gappd_link::{GappdClient, Post, ToggleBinding};
///
/// # async fn example() -> gappd_link::Result<()> {
/// let client = GappdClient::builder()
///     .base_url("https://api.gappd.example")
///     .bearer_token("eyJhbGc...")
///     .build()?;
/// let feed = client.feed::<Post>();
/// feed.load("posts/feed").await?;
///
/// let mutator = client.mutator();
/// if let Err(e) = mutator
///     .toggle(feed.store(), &ToggleBinding::like(42), None)
///     .await
/// {
///     eprintln!("like not updated: {}", e);
/// }
/// # Ok(())
/// # }
/// ```
pub struct OptimisticMutator {
    transport: Arc<dyn Transport>,
    /// Endpoints with an outstanding toggle.
    busy: Mutex<HashSet<String>>,
}

impl OptimisticMutator {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            busy: Mutex::new(HashSet::new()),
        }
    }

    /// Toggle one item's flag, optimistically and with rollback.
    ///
    /// Returns the settled view: the optimistic one on success. On failure
    /// the item is already restored and the error carries the reason; the
    /// caller surfaces it and may retry by calling `toggle` again.
    pub async fn toggle<T>(
        &self,
        store: &FeedStore<T>,
        binding: &ToggleBinding<T>,
        feedback: Option<&ToggleFeedback>,
    ) -> Result<ToggleView>
    where
        T: FeedEntry + Clone,
    {
        {
            let mut busy = self.busy.lock().expect("busy set lock poisoned");
            if !busy.insert(binding.path.clone()) {
                return Err(GappdLinkError::MutationInFlight(binding.path.clone()));
            }
        }
        let result = self.toggle_inner(store, binding, feedback).await;
        self.busy
            .lock()
            .expect("busy set lock poisoned")
            .remove(&binding.path);
        result
    }

    async fn toggle_inner<T>(
        &self,
        store: &FeedStore<T>,
        binding: &ToggleBinding<T>,
        feedback: Option<&ToggleFeedback>,
    ) -> Result<ToggleView>
    where
        T: FeedEntry + Clone,
    {
        // Optimistic apply, capturing the prior item for rollback.
        let previous = store.with_state(|state| {
            state.mutate_item(binding.item_id, |item| {
                let next = (binding.read)(item).toggled();
                (binding.write)(item, next);
            })
        });
        let previous = match previous {
            Some(previous) => previous,
            None => return Err(GappdLinkError::ItemNotFound(binding.item_id)),
        };
        let before = (binding.read)(&previous);
        let next = before.toggled();
        if let Some(callback) = feedback {
            callback(next);
        }

        let method = if next.flag {
            MutationMethod::Post
        } else {
            MutationMethod::Delete
        };
        log::debug!("[TOGGLE] {:?} {}", method, binding.path);
        match self.transport.execute(method, &binding.path).await {
            Ok(()) => Ok(next),
            Err(err) => {
                store.with_state(|state| state.restore_item(previous));
                if let Some(callback) = feedback {
                    callback(before);
                }
                log::warn!("[TOGGLE] {} failed, rolled back: {}", binding.path, err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled_increments_when_setting() {
        let view = ToggleView {
            flag: false,
            count: 5,
        };
        assert_eq!(
            view.toggled(),
            ToggleView {
                flag: true,
                count: 6
            }
        );
    }

    #[test]
    fn test_toggled_decrements_when_clearing() {
        let view = ToggleView {
            flag: true,
            count: 6,
        };
        assert_eq!(
            view.toggled(),
            ToggleView {
                flag: false,
                count: 5
            }
        );
    }

    #[test]
    fn test_toggled_floors_counter_at_zero() {
        let view = ToggleView {
            flag: true,
            count: 0,
        };
        assert_eq!(
            view.toggled(),
            ToggleView {
                flag: false,
                count: 0
            }
        );
    }

    #[test]
    fn test_like_binding_paths() {
        let binding = ToggleBinding::like(42);
        assert_eq!(binding.item_id, 42);
        assert_eq!(binding.path, "posts/42/like");
    }

    #[test]
    fn test_follow_binding_paths() {
        let binding = ToggleBinding::follow(7);
        assert_eq!(binding.item_id, 7);
        assert_eq!(binding.path, "users/7/follow");
    }
}
