//! Shared test support: an in-process transport with scriptable responses.
//!
//! Responses are keyed by the exact request path and consumed in FIFO
//! order. A gated response is held back until its `oneshot::Sender` fires,
//! which lets tests control resolution order and reproduce the races the
//! engine must win.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gappd_link::{GappdClient, MutationMethod, Result, Transport};
use serde_json::{json, Value as JsonValue};
use tokio::sync::oneshot;

pub const PAGE_SIZE: u32 = 12;

type Gated<T> = (Option<oneshot::Receiver<()>>, Result<T>);

#[derive(Default)]
pub struct FakeTransport {
    gets: Mutex<HashMap<String, VecDeque<Gated<JsonValue>>>>,
    mutations: Mutex<HashMap<String, VecDeque<Gated<()>>>>,
    get_log: Mutex<Vec<String>>,
    mutation_log: Mutex<Vec<(MutationMethod, String)>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn enqueue_page(&self, path: &str, result: Result<JsonValue>) {
        self.gets
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back((None, result));
    }

    /// Queue a response that is held until the returned sender fires.
    pub fn enqueue_gated_page(&self, path: &str, result: Result<JsonValue>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gets
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back((Some(rx), result));
        tx
    }

    pub fn enqueue_mutation(&self, path: &str, result: Result<()>) {
        self.mutations
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back((None, result));
    }

    /// Queue a mutation response that is held until the returned sender
    /// fires.
    pub fn enqueue_gated_mutation(&self, path: &str, result: Result<()>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.mutations
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back((Some(rx), result));
        tx
    }

    /// How many GETs were issued for `path`.
    pub fn gets_for(&self, path: &str) -> usize {
        self.get_log
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }

    pub fn mutation_log(&self) -> Vec<(MutationMethod, String)> {
        self.mutation_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get_json(&self, path_and_query: &str) -> Result<JsonValue> {
        self.get_log
            .lock()
            .unwrap()
            .push(path_and_query.to_string());
        let planned = self
            .gets
            .lock()
            .unwrap()
            .get_mut(path_and_query)
            .and_then(|queue| queue.pop_front());
        let (gate, result) = planned
            .unwrap_or_else(|| panic!("unexpected GET {path_and_query}"));
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        result
    }

    async fn execute(&self, method: MutationMethod, path: &str) -> Result<()> {
        self.mutation_log
            .lock()
            .unwrap()
            .push((method, path.to_string()));
        let planned = self
            .mutations
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(|queue| queue.pop_front());
        // Unscripted mutations succeed.
        let (gate, result) = planned.unwrap_or((None, Ok(())));
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        result
    }
}

/// Client wired to a fake transport.
pub fn test_client(transport: Arc<FakeTransport>) -> GappdClient {
    GappdClient::builder()
        .base_url("http://gappd.test")
        .page_size(PAGE_SIZE)
        .transport(transport)
        .build()
        .unwrap()
}

/// The path the fetcher requests for `resource` at `page`.
pub fn page_path(resource: &str, page: u32) -> String {
    let separator = if resource.contains('?') { '&' } else { '?' };
    format!("{}{}page={}&per_page={}", resource, separator, page, PAGE_SIZE)
}

/// Page envelope of bare `{id}` posts.
pub fn posts_page(ids: &[i64], page: u32, pages: u32) -> JsonValue {
    json!({
        "items": ids.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>(),
        "page": page,
        "pages": pages,
    })
}

/// A post with the fields a like toggle touches.
pub fn post_json(id: i64, liked: bool, likes_count: u32) -> JsonValue {
    json!({ "id": id, "liked": liked, "likes_count": likes_count })
}
