//! Load supersession tokens.
//!
//! Every (re)start of a feed load mints a [`LoadToken`]; minting invalidates
//! all earlier tokens. A completed fetch whose token is stale must discard
//! its result (including errors) before touching feed state. The token
//! check is the authoritative guard against out-of-order responses;
//! aborting the physical request is an optimization the engine never
//! relies on.

use std::sync::atomic::{AtomicU64, Ordering};

/// Mints and validates [`LoadToken`]s for one feed instance.
#[derive(Debug, Default)]
pub struct TokenSlot {
    current: AtomicU64,
}

/// Identifies one in-flight load. Stale once a newer token is minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken {
    generation: u64,
}

impl TokenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new token, superseding any outstanding one.
    pub fn mint(&self) -> LoadToken {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        LoadToken { generation }
    }

    /// Whether `token` still identifies the most recent load.
    pub fn is_current(&self, token: LoadToken) -> bool {
        self.current.load(Ordering::SeqCst) == token.generation
    }

    /// Invalidate the outstanding token without starting a new load.
    ///
    /// Used on feed teardown so a late completion cannot write into state.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}
