//! Core services: documentation tree fetching and auxiliary resources.

pub mod provider;
mod releases;

pub use provider::{DocsProvider, HttpFetcher, TreeFetcher, DEFAULT_DOCS_URL};
pub use releases::{ReleaseChart, RELEASE_CHART_URI, RELEASE_CHART_URL};
