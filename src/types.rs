//! Typed model of the Node.js API documentation tree.
//!
//! The upstream `all.json` is loosely structured; every entry (module,
//! class, method, submodule) shares the same shape, so a single record
//! type with optional fields models all of them. Deserialization at the
//! provider boundary is the one place the shape is checked; rendering
//! code never re-validates field presence beyond the title guard.

use serde::{Deserialize, Serialize};

/// One entry in the documentation tree.
///
/// `text_raw` is the display heading and is required for rendering.
/// `name` is the machine name; it is only meaningful (and required) on
/// top-level modules, where it seeds the tool identifier. Everything
/// else is optional and defaults to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocNode {
    /// Display heading, e.g. "File System".
    #[serde(rename = "textRaw", default)]
    pub text_raw: String,

    /// Machine name, e.g. "fs". Required for top-level modules.
    #[serde(default)]
    pub name: String,

    /// Free-form description. May contain embedded markup which is
    /// rendered as-is after paragraph reflow, never parsed.
    #[serde(default)]
    pub desc: Option<String>,

    /// Optional override for `text_raw` in listings.
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,

    /// Documented classes, in source order.
    #[serde(default)]
    pub classes: Vec<DocNode>,

    /// Documented methods, in source order.
    #[serde(default)]
    pub methods: Vec<DocNode>,

    /// Nested submodules, in source order. Wire key is `modules`.
    #[serde(rename = "modules", default)]
    pub submodules: Vec<DocNode>,
}

impl DocNode {
    /// Whether this module documents any API surface of its own.
    ///
    /// Submodule content deliberately does not count: a module whose only
    /// methods live in submodules is not independently addressable.
    #[must_use]
    pub fn has_api_surface(&self) -> bool {
        !self.classes.is_empty() || !self.methods.is_empty()
    }

    /// The title to use in listings: `display_name` when set, else
    /// `text_raw`.
    #[must_use]
    pub fn listing_title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.text_raw)
    }
}

/// The full documentation tree: an ordered sequence of top-level modules.
///
/// This is the wire shape of `all.json` (a `modules` key at the root).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocTree {
    #[serde(default)]
    pub modules: Vec<DocNode>,
}

impl DocTree {
    /// Drops modules that expose no documented surface, and modules with
    /// no machine name (nothing to register a tool under).
    ///
    /// Returns the number of modules removed. Runs once, at load time;
    /// the tree is read-only afterwards.
    pub fn retain_documented(&mut self) -> usize {
        let before = self.modules.len();
        self.modules
            .retain(|m| m.has_api_surface() && !m.name.is_empty());
        before - self.modules.len()
    }
}
