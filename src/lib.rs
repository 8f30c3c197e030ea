//! nodedocs: MCP server for Node.js core API documentation.
//!
//! This library exposes the Node.js API documentation tree as
//! name-addressable MCP tools: one tool per documented module, plus a
//! catalog listing and a name lookup.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              MCP Server (rmcp)              │
//! │         JSON-RPC over stdin/stdout          │
//! └─────────────────┬───────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────┐
//! │              Tool Registry                  │
//! │   fs, http, ... per-module + catalog/find   │
//! └───────┬─────────────────────────┬───────────┘
//!         │                         │
//! ┌───────▼────────┐       ┌────────▼───────────┐
//! │  DocsProvider  │       │      Renderer      │
//! │ fetch-once tree│       │ markdown per module│
//! │   (reqwest)    │       │  + catalog summary │
//! └────────────────┘       └────────────────────┘
//! ```
//!
//! The tree is fetched from nodejs.org once per process, filtered down
//! to modules that document an API surface, and held read-only for the
//! process lifetime. Tool invocations re-render markdown on demand,
//! optionally scoped by class/method substring filters.

pub mod error;
pub mod fmt;
pub mod naming;
pub mod render;
pub mod server;
pub mod services;
pub mod tools;
pub mod types;

pub use error::{Result, ServerError};
pub use types::{DocNode, DocTree};
