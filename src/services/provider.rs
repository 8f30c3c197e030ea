//! Documentation tree provider with fetch-once caching.
//!
//! The upstream tree is fetched lazily, at most once per process. The
//! cache lifecycle is an explicit two-state machine (`Empty` ->
//! `Loaded`) guarded by an async mutex that is held across the fetch:
//! callers that arrive while a fetch is in flight queue on the lock and
//! then read the freshly cached tree, so a second fetch can never start.
//! A failed fetch leaves the state at `Empty`; failures are not cached,
//! and the next call retries from scratch.

use crate::error::{FetchError, FetchResult};
use crate::types::DocTree;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The canonical Node.js API documentation endpoint.
pub const DEFAULT_DOCS_URL: &str = "https://nodejs.org/docs/latest/api/all.json";

/// The one external call this system makes for documentation content.
///
/// Production uses [`HttpFetcher`]; tests inject counting or failing
/// doubles to exercise the cache lifecycle without a network.
#[async_trait]
pub trait TreeFetcher: Send + Sync {
    /// Fetches and decodes the raw documentation tree.
    async fn fetch(&self) -> FetchResult<DocTree>;
}

/// Fetches the tree from the documentation endpoint over HTTP.
///
/// No timeout is imposed here; the reqwest client's defaults apply.
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl TreeFetcher for HttpFetcher {
    async fn fetch(&self) -> FetchResult<DocTree> {
        tracing::info!(url = %self.url, "Fetching Node.js API documentation");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::error!(url = %self.url, status = status.as_u16(), "Documentation fetch failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let tree = response
            .json::<DocTree>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        tracing::info!(url = %self.url, "Successfully fetched Node.js API documentation");
        Ok(tree)
    }
}

/// Cache lifecycle. `Loaded` is terminal for the process; there is no
/// refresh, invalidation, or TTL.
enum CacheState {
    Empty,
    Loaded(Arc<DocTree>),
}

/// Owns the once-fetched documentation tree.
///
/// Everything downstream (registry, renderer, CLI) receives read-only
/// `Arc` views of the tree; this provider is the only component allowed
/// to perform the external fetch.
pub struct DocsProvider {
    fetcher: Box<dyn TreeFetcher>,
    state: Mutex<CacheState>,
}

impl DocsProvider {
    pub fn new(fetcher: impl TreeFetcher + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            state: Mutex::new(CacheState::Empty),
        }
    }

    /// Provider backed by an HTTP fetch of the given endpoint.
    #[must_use]
    pub fn over_http(url: impl Into<String>) -> Self {
        Self::new(HttpFetcher::new(url))
    }

    /// Returns the filtered documentation tree, fetching it on first use.
    ///
    /// Applies the eligibility rule at load time: modules with no direct
    /// classes and no direct methods are dropped before any identifier is
    /// assigned, and the before/after counts are logged.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`FetchError`] when the upstream fetch or
    /// decode fails. The error is not cached.
    pub async fn tree(&self) -> FetchResult<Arc<DocTree>> {
        // Lock held across the fetch: concurrent callers coalesce here
        // and observe the cached tree once the first fetch completes.
        let mut state = self.state.lock().await;
        if let CacheState::Loaded(tree) = &*state {
            return Ok(Arc::clone(tree));
        }

        let mut tree = self.fetcher.fetch().await?;
        let total = tree.modules.len();
        let dropped = tree.retain_documented();
        tracing::info!(
            total,
            exposed = tree.modules.len(),
            dropped,
            "Loaded documentation tree"
        );

        let tree = Arc::new(tree);
        *state = CacheState::Loaded(Arc::clone(&tree));
        Ok(tree)
    }
}
