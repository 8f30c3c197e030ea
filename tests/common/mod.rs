//! Common test utilities for nodedocs integration tests.
//!
//! Provides tree builders plus fake `TreeFetcher` implementations for
//! exercising the provider's cache lifecycle without a network.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use async_trait::async_trait;
use nodedocs::error::{FetchError, FetchResult};
use nodedocs::types::{DocNode, DocTree};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A leaf node (method or class) with an optional description.
pub fn leaf(title: &str, desc: Option<&str>) -> DocNode {
    DocNode {
        text_raw: title.to_string(),
        desc: desc.map(String::from),
        ..DocNode::default()
    }
}

/// A named module with no content yet.
pub fn module(name: &str, title: &str) -> DocNode {
    DocNode {
        text_raw: title.to_string(),
        name: name.to_string(),
        ..DocNode::default()
    }
}

/// A small but representative documentation tree:
///
/// - `fs`: methods, a class, and a submodule with its own methods
/// - `http`: classes only
/// - `os`: eligible but with no methods anywhere (catalog marker case)
/// - `bare`: no classes/methods of its own, dropped by the provider
pub fn sample_tree() -> DocTree {
    let mut fs = module("fs", "File System");
    fs.desc = Some("POSIX file I/O.\nCallback and promise forms.".to_string());
    fs.classes.push(leaf("Class: fs.Dir", Some("A directory stream.")));
    fs.methods.push(leaf("readFile", Some("Reads a file")));
    fs.methods.push(leaf("writeFile", Some("Writes a file")));
    let mut promises = module("fs_promises", "fs Promises API");
    promises
        .methods
        .push(leaf("access", Some("Tests a user's permissions")));
    fs.submodules.push(promises);

    let mut http = module("http", "HTTP");
    http.classes
        .push(leaf("Class: http.Agent", Some("Connection pooling.")));

    let mut os = module("os", "OS");
    os.classes.push(leaf("Class: os.Constants", None));

    let mut bare = module("bare", "Bare Module");
    bare.submodules.push({
        let mut sub = module("bare_sub", "Bare Sub");
        sub.methods.push(leaf("hidden", None));
        sub
    });

    DocTree {
        modules: vec![fs, http, os, bare],
    }
}

/// Fetcher returning a fixed tree, counting how often it is called.
pub struct CountingFetcher {
    tree: DocTree,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl CountingFetcher {
    pub fn new(tree: DocTree) -> (Self, Arc<AtomicUsize>) {
        Self::with_delay(tree, Duration::ZERO)
    }

    /// A fetcher that takes a while, so concurrent callers overlap it.
    pub fn with_delay(tree: DocTree, delay: Duration) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                tree,
                delay,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl nodedocs::services::TreeFetcher for CountingFetcher {
    async fn fetch(&self) -> FetchResult<DocTree> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.tree.clone())
    }
}

/// Fetcher that fails a fixed number of times before succeeding.
pub struct FlakyFetcher {
    tree: DocTree,
    failures_left: AtomicUsize,
    calls: Arc<AtomicUsize>,
}

impl FlakyFetcher {
    pub fn new(tree: DocTree, failures: usize) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                tree,
                failures_left: AtomicUsize::new(failures),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl nodedocs::services::TreeFetcher for FlakyFetcher {
    async fn fetch(&self) -> FetchResult<DocTree> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(FetchError::Status { status: 503 });
        }
        Ok(self.tree.clone())
    }
}
