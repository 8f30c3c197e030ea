//! Node.js release schedule chart, served as an MCP resource.

use crate::error::{FetchError, FetchResult};
use tokio::sync::OnceCell;

/// Upstream location of the release schedule SVG.
pub const RELEASE_CHART_URL: &str =
    "https://raw.githubusercontent.com/nodejs/Release/main/schedule.svg?sanitize=true";

/// Resource URI the chart is published under.
pub const RELEASE_CHART_URI: &str = "nodejs://releases-schedule-chart.svg";

/// Lazily fetched, process-lifetime cache of the release schedule SVG.
///
/// Same caching contract as the documentation tree: fetched at most once,
/// failures never cached.
pub struct ReleaseChart {
    client: reqwest::Client,
    url: String,
    svg: OnceCell<String>,
}

impl ReleaseChart {
    #[must_use]
    pub fn new() -> Self {
        Self::with_url(RELEASE_CHART_URL)
    }

    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            svg: OnceCell::new(),
        }
    }

    /// Returns the chart SVG text, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] when the chart endpoint is unreachable or
    /// answers with a non-success status.
    pub async fn svg(&self) -> FetchResult<&str> {
        let svg = self
            .svg
            .get_or_try_init(|| async {
                tracing::info!(url = %self.url, "Fetching Node.js release schedule chart");
                let response = self.client.get(&self.url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    tracing::error!(
                        url = %self.url,
                        status = status.as_u16(),
                        "Release chart fetch failed"
                    );
                    return Err(FetchError::Status {
                        status: status.as_u16(),
                    });
                }
                Ok(response.text().await?)
            })
            .await?;
        Ok(svg.as_str())
    }
}

impl Default for ReleaseChart {
    fn default() -> Self {
        Self::new()
    }
}
