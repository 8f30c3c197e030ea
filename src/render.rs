//! Markdown rendering of documentation nodes.
//!
//! Two views exist, with intentionally different empty-content policies:
//!
//! - [`render_module`] produces the full documentation for one module.
//!   Sections with nothing to show (absent, or emptied by a filter) are
//!   omitted entirely, with no placeholder headings.
//! - [`render_catalog_summary`] produces the cross-module discovery
//!   listing. Every module always gets a block; a module without methods
//!   gets an explicit "no methods" marker so the catalog stays scannable.
//!
//! Rendering never mutates the tree and never emits partial output: a
//! node with a missing title aborts the render with a [`RenderError`].

use crate::error::{RenderError, RenderResult};
use crate::types::DocNode;

/// Markdown never goes deeper than six heading levels.
const MAX_HEADING: usize = 6;

/// Optional substring filters for one module render.
///
/// The two queries are independent: `class` narrows the Classes section,
/// `method` narrows the Methods section. Matching is a case-insensitive
/// substring test against an entry's title or description. Submodules are
/// never filtered.
#[derive(Debug, Clone, Default)]
pub struct DocFilter {
    pub class: Option<String>,
    pub method: Option<String>,
}

impl DocFilter {
    /// A filter that lets everything through.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

/// Reflows description text for markdown: every line break becomes a
/// paragraph break. Upstream descriptions use single `\n`s where readers
/// expect separate paragraphs; without the blank line, markdown joins
/// them into one.
#[must_use]
pub fn reflow(text: &str) -> String {
    text.replace('\n', "\n\n")
}

/// Case-insensitive substring test against a node's title and
/// description.
fn matches_query(node: &DocNode, query_lower: &str) -> bool {
    node.text_raw.to_lowercase().contains(query_lower)
        || node
            .desc
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(query_lower))
}

fn heading(level: usize) -> &'static str {
    // Levels are clamped; markdown has no h7.
    match level.min(MAX_HEADING) {
        1 => "#",
        2 => "##",
        3 => "###",
        4 => "####",
        5 => "#####",
        _ => "######",
    }
}

fn require_title<'a>(node: &'a DocNode, context: &str) -> RenderResult<&'a str> {
    if node.text_raw.is_empty() {
        return Err(RenderError::MissingTitle {
            context: context.to_string(),
        });
    }
    Ok(&node.text_raw)
}

/// Renders one filtered section ("Classes" or "Methods").
///
/// Appends nothing at all when the filtered set is empty.
fn push_section(
    out: &mut String,
    title: &str,
    items: &[DocNode],
    query: Option<&str>,
) -> RenderResult<()> {
    let query_lower = query.map(str::to_lowercase);
    let survivors: Vec<&DocNode> = match &query_lower {
        Some(q) => items.iter().filter(|i| matches_query(i, q)).collect(),
        None => items.iter().collect(),
    };
    if survivors.is_empty() {
        return Ok(());
    }

    out.push_str(&format!("## {title}\n\n"));
    for item in survivors {
        let item_title = require_title(item, &format!("entry in {title}"))?;
        out.push_str(&format!("### {item_title}\n"));
        if let Some(desc) = &item.desc {
            out.push_str(&format!("{}\n\n", reflow(desc)));
        }
    }
    Ok(())
}

/// Renders a submodule and its descendants, one heading level per depth.
fn push_submodule(out: &mut String, sub: &DocNode, level: usize) -> RenderResult<()> {
    let title = require_title(sub, "submodule")?;
    out.push_str(&format!("{} {title}\n", heading(level)));

    for method in &sub.methods {
        let method_title = require_title(method, &format!("method of submodule {title}"))?;
        out.push_str(&format!("{} {method_title}\n", heading(level + 1)));
        if let Some(desc) = &method.desc {
            out.push_str(&format!("{}\n\n", reflow(desc)));
        }
    }

    for nested in &sub.submodules {
        push_submodule(out, nested, level + 1)?;
    }
    Ok(())
}

/// Renders a module's full documentation as markdown.
///
/// Section order is fixed: Description, Classes, Methods, Submodules.
/// The class/method filters narrow their respective sections; submodules
/// always render in full, as deep as the tree actually nests.
///
/// # Errors
///
/// Returns [`RenderError::MissingTitle`] for any node without a title.
pub fn render_module(module: &DocNode, filter: &DocFilter) -> RenderResult<String> {
    let title = require_title(module, "module heading")?;
    let mut out = format!("# {title}\n\n");

    if let Some(desc) = &module.desc {
        out.push_str(&format!("## Description\n{}\n\n", reflow(desc)));
    }

    push_section(&mut out, "Classes", &module.classes, filter.class.as_deref())?;
    push_section(&mut out, "Methods", &module.methods, filter.method.as_deref())?;

    if !module.submodules.is_empty() {
        out.push_str("## Submodules\n\n");
        for sub in &module.submodules {
            push_submodule(&mut out, sub, 3)?;
        }
    }

    Ok(out)
}

/// Collects method titles from a module and every nested submodule into
/// one flat list, in tree order.
fn collect_method_titles<'a>(
    node: &'a DocNode,
    context: &str,
    titles: &mut Vec<&'a str>,
) -> RenderResult<()> {
    for method in &node.methods {
        titles.push(require_title(method, context)?);
    }
    for sub in &node.submodules {
        collect_method_titles(sub, context, titles)?;
    }
    Ok(())
}

/// Renders the flattened all-modules catalog used for discovery.
///
/// One block per module: a heading of the listing title with the machine
/// name in parentheses, then the flat method list. Unlike
/// [`render_module`], a module with no methods anywhere still gets a
/// marker line; the catalog must show something per module.
///
/// # Errors
///
/// Returns [`RenderError::MissingTitle`] for any node without a title.
pub fn render_catalog_summary(modules: &[DocNode]) -> RenderResult<String> {
    let mut out = String::new();

    for module in modules {
        let title = require_title(module, "module in catalog")?;
        out.push_str(&format!("## {} ({})\n", module.listing_title(), module.name));

        let mut titles = Vec::new();
        let context = format!("method of {title}");
        collect_method_titles(module, &context, &mut titles)?;

        if titles.is_empty() {
            out.push_str("_(no methods)_\n");
        } else {
            for method_title in titles {
                out.push_str(&format!("- {method_title}\n"));
            }
        }
        out.push('\n');
    }

    Ok(out)
}
