//! HTTP transport abstraction.
//!
//! The feed engine talks to the server through the [`Transport`] trait so
//! pagination and mutation logic can be exercised against an in-process
//! fake in tests. [`HttpTransport`] is the reqwest-backed production
//! implementation: it builds URLs against the base, attaches the auth
//! header, and maps HTTP/network failures into the crate error taxonomy.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::auth::AuthProvider;
use crate::error::{GappdLinkError, Result};

/// HTTP method used by mutation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMethod {
    Post,
    Delete,
}

/// Server I/O as the engine sees it.
///
/// Paths are relative to the client's base URL and may carry a query
/// string. Implementations must map non-2xx responses into
/// [`GappdLinkError::Server`] and network failures into
/// [`GappdLinkError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a path and return the parsed JSON body.
    async fn get_json(&self, path_and_query: &str) -> Result<JsonValue>;

    /// Issue a mutation. The response body is ignored on success.
    async fn execute(&self, method: MutationMethod, path: &str) -> Result<()>;
}

/// reqwest-backed [`Transport`].
pub struct HttpTransport {
    base_url: String,
    http_client: reqwest::Client,
    auth: AuthProvider,
}

impl HttpTransport {
    pub(crate) fn new(base_url: String, http_client: reqwest::Client, auth: AuthProvider) -> Self {
        Self {
            base_url,
            http_client,
            auth,
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GappdLinkError::server(
            status.as_u16(),
            error_message_from_body(status.as_u16(), &body),
        ))
    }
}

/// Extract a user-facing message from an error body.
///
/// The server reports failures as `{"message": ...}` or `{"error": ...}`;
/// anything else (including a non-JSON body) degrades to a generic
/// status-coded message.
fn error_message_from_body(status: u16, body: &str) -> String {
    serde_json::from_str::<JsonValue>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(JsonValue::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Request failed ({})", status))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, path_and_query: &str) -> Result<JsonValue> {
        let url = self.url_for(path_and_query);
        log::debug!("[LINK_HTTP] GET {}", url);
        let request = self.auth.apply_to_request(self.http_client.get(&url));
        let response = Self::check_status(request.send().await?).await?;
        let body = response
            .json::<JsonValue>()
            .await
            .map_err(|e| GappdLinkError::parse(e.to_string()))?;
        Ok(body)
    }

    async fn execute(&self, method: MutationMethod, path: &str) -> Result<()> {
        let url = self.url_for(path);
        log::debug!("[LINK_HTTP] {:?} {}", method, url);
        let builder = match method {
            MutationMethod::Post => self.http_client.post(&url),
            MutationMethod::Delete => self.http_client.delete(&url),
        };
        let request = self.auth.apply_to_request(builder);
        Self::check_status(request.send().await?).await?;
        Ok(())
    }
}
