//! Documentation tool inputs and execution.
//!
//! Pure functions over read-only tree views; the registry wires them to
//! tool names, the server wires them to the MCP transport.

use crate::error::RenderResult;
use crate::naming::match_key;
use crate::render::{self, DocFilter};
use crate::types::DocNode;
use schemars::JsonSchema;
use serde::Deserialize;

/// Input for a per-module documentation tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ModuleDocInput {
    /// The class name to search for (case-insensitive substring)
    pub class: Option<String>,
    /// The method name to search for (case-insensitive substring)
    pub method: Option<String>,
}

impl From<ModuleDocInput> for DocFilter {
    fn from(input: ModuleDocInput) -> Self {
        Self {
            class: input.class,
            method: input.method,
        }
    }
}

/// Input for the module lookup tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct FindModuleInput {
    /// Module name to look up; case, underscores, hyphens, and whitespace
    /// are ignored when matching
    pub name: Option<String>,
}

/// Renders one module's documentation, scoped by the optional filters.
///
/// # Errors
///
/// Propagates [`crate::error::RenderError`] from the renderer.
pub fn execute_module_doc(module: &DocNode, input: ModuleDocInput) -> RenderResult<String> {
    render::render_module(module, &input.into())
}

/// Finds a module by insensitive name match against its machine name,
/// title, and display name.
#[must_use]
pub fn find_module<'a>(modules: &'a [DocNode], name: &str) -> Option<&'a DocNode> {
    let key = match_key(name);
    modules.iter().find(|m| {
        match_key(&m.name) == key
            || match_key(&m.text_raw) == key
            || m.display_name
                .as_deref()
                .is_some_and(|d| match_key(d) == key)
    })
}

/// Looks a module up by name and renders it in full; with no name, or no
/// match, falls back to the catalog summary so the caller always gets
/// something to navigate by.
///
/// # Errors
///
/// Propagates [`crate::error::RenderError`] from the renderer.
pub fn execute_find_module(modules: &[DocNode], input: FindModuleInput) -> RenderResult<String> {
    if let Some(name) = input.name.as_deref().filter(|n| !n.trim().is_empty()) {
        if let Some(module) = find_module(modules, name) {
            return render::render_module(module, &DocFilter::none());
        }
        tracing::debug!(name, "No module matched lookup, falling back to catalog");
    }
    render::render_catalog_summary(modules)
}

/// Renders the full-catalog discovery listing.
///
/// # Errors
///
/// Propagates [`crate::error::RenderError`] from the renderer.
pub fn execute_catalog(modules: &[DocNode]) -> RenderResult<String> {
    let mut out = String::from("Available Node.js core modules and their methods:\n\n");
    out.push_str(&render::render_catalog_summary(modules)?);
    Ok(out)
}
