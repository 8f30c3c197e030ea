//! Sad path tests for error handling and edge cases.
//!
//! Unknown tools, malformed nodes, and upstream fetch failures.

mod common;

use common::{leaf, module, sample_tree, CountingFetcher, FlakyFetcher};
use nodedocs::error::ServerError;
use nodedocs::services::DocsProvider;
use nodedocs::tools::ToolRegistry;
use nodedocs::types::{DocNode, DocTree};
use std::sync::Arc;

// ============================================================================
// Unknown Tool Tests
// ============================================================================

#[tokio::test]
async fn unknown_tool_names_the_identifier() {
    let (fetcher, _calls) = CountingFetcher::new(sample_tree());
    let provider = DocsProvider::new(fetcher);
    let registry = ToolRegistry::build(provider.tree().await.unwrap());

    let err = registry.invoke("node-nonexistent", None).unwrap_err();
    assert!(matches!(err, ServerError::Registry(_)));
    assert_eq!(err.code(), "OPERATION_NOT_FOUND");
    assert!(
        err.to_string().contains("node-nonexistent"),
        "error should name the requested identifier: {err}"
    );
}

// ============================================================================
// Malformed Node Tests
// ============================================================================

#[tokio::test]
async fn titleless_method_fails_module_render() {
    let mut m = module("fs", "File System");
    m.methods.push(leaf("readFile", Some("Reads a file")));
    m.methods.push(DocNode::default()); // no textRaw
    let registry = ToolRegistry::build(Arc::new(DocTree { modules: vec![m] }));

    let err = registry.invoke("fs", None).unwrap_err();
    assert_eq!(err.code(), "MISSING_TITLE");
}

#[tokio::test]
async fn titleless_method_fails_catalog_render() {
    let mut m = module("fs", "File System");
    m.methods.push(DocNode::default());
    let registry = ToolRegistry::build(Arc::new(DocTree { modules: vec![m] }));

    let err = registry
        .invoke(nodedocs::tools::CATALOG_TOOL, None)
        .unwrap_err();
    assert_eq!(err.code(), "MISSING_TITLE");
}

// ============================================================================
// Fetch Failure Tests
// ============================================================================

#[tokio::test]
async fn fetch_failure_carries_upstream_status() {
    let (fetcher, _calls) = FlakyFetcher::new(sample_tree(), usize::MAX);
    let provider = DocsProvider::new(fetcher);

    let err = provider.tree().await.unwrap_err();
    assert_eq!(err.code(), "HTTP_STATUS");
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn fetch_failure_is_not_cached() {
    let (fetcher, calls) = FlakyFetcher::new(sample_tree(), 1);
    let provider = DocsProvider::new(fetcher);

    assert!(provider.tree().await.is_err());

    // The failure must not stick: the next call re-fetches and succeeds.
    let tree = provider.tree().await.expect("retry should succeed");
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    assert!(!tree.modules.is_empty());

    // And the success *is* cached.
    provider.tree().await.unwrap();
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_tree_still_builds_fixed_tools() {
    let (fetcher, _calls) = CountingFetcher::new(DocTree::default());
    let provider = DocsProvider::new(fetcher);
    let registry = ToolRegistry::build(provider.tree().await.unwrap());

    assert_eq!(registry.len(), 2);
    let out = registry.invoke(nodedocs::tools::CATALOG_TOOL, None).unwrap();
    assert!(out.starts_with("Available Node.js core modules"));
}
