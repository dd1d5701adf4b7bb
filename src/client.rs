//! Main Gappd client with builder pattern.
//!
//! The client holds the shared transport (base URL, HTTP client, auth) and
//! hands out [`FeedController`]s and [`OptimisticMutator`]s that use it.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::auth::AuthProvider;
use crate::controller::FeedController;
use crate::error::{GappdLinkError, Result};
use crate::models::FeedEntry;
use crate::mutator::OptimisticMutator;
use crate::transport::{HttpTransport, Transport};

/// Default items per page, matching the server's list endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Main Gappd API client.
///
/// Use [`GappdClient::builder`] to construct instances.
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
/// println!("{} posts loaded", feed.snapshot().items.len());
/// # Ok(())
/// # }
/// ```
pub struct GappdClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    auth: AuthProvider,
    page_size: u32,
    mutator: Arc<OptimisticMutator>,
}

impl std::fmt::Debug for GappdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GappdClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl GappdClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> GappdClientBuilder {
        GappdClientBuilder::new()
    }

    /// Create a feed controller for one paginated resource list.
    ///
    /// Each call returns an independent controller with its own state;
    /// instantiate one per visible list (home feed, posts tab, events
    /// tab), never share one across lists.
    pub fn feed<T>(&self) -> FeedController<T>
    where
        T: FeedEntry + DeserializeOwned + Clone,
    {
        FeedController::new(self.transport.clone(), self.page_size)
    }

    /// Handle to the client's mutator.
    ///
    /// All handles returned by one client share a single busy guard, so a
    /// concurrent toggle of the same endpoint is rejected no matter which
    /// handle issued it.
    pub fn mutator(&self) -> Arc<OptimisticMutator> {
        self.mutator.clone()
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether requests carry a credential.
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// The configured page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

/// Builder for configuring [`GappdClient`] instances.
pub struct GappdClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    auth: AuthProvider,
    page_size: u32,
    transport: Option<Arc<dyn Transport>>,
}

impl GappdClientBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            auth: AuthProvider::none(),
            page_size: DEFAULT_PAGE_SIZE,
            transport: None,
        }
    }

    /// Set the base URL for the Gappd server. Required.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set bearer-token authentication.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.auth = AuthProvider::bearer(token);
        self
    }

    /// Set the authentication provider directly.
    pub fn auth(mut self, auth: AuthProvider) -> Self {
        self.auth = auth;
        self
    }

    /// Set the number of items requested per page.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Replace the HTTP transport with a custom [`Transport`].
    ///
    /// Mainly for tests: an in-process fake lets the feed engine run
    /// without a server.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<GappdClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| GappdLinkError::Configuration("base_url is required".into()))?;
        if self.page_size == 0 {
            return Err(GappdLinkError::Configuration(
                "page_size must be at least 1".into(),
            ));
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let http_client = reqwest::Client::builder()
                    .timeout(self.timeout)
                    .pool_max_idle_per_host(10)
                    .build()
                    .map_err(|e| GappdLinkError::Configuration(e.to_string()))?;
                log::debug!("[CLIENT] base_url={} page_size={}", base_url, self.page_size);
                Arc::new(HttpTransport::new(
                    base_url.clone(),
                    http_client,
                    self.auth.clone(),
                ))
            }
        };

        Ok(GappdClient {
            base_url,
            mutator: Arc::new(OptimisticMutator::new(transport.clone())),
            transport,
            auth: self.auth,
            page_size: self.page_size,
        })
    }
}
