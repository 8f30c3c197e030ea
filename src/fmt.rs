//! Human-friendly CLI output formatters.
//!
//! Formats the module catalog for terminal display. When `color` is
//! true, ANSI escape codes are emitted via `owo_colors`. The MCP tools
//! emit markdown instead; this module is for people, not models.

use crate::types::DocNode;
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Collects method titles from a module and all nested submodules.
fn flat_method_titles<'a>(node: &'a DocNode, titles: &mut Vec<&'a str>) {
    for method in &node.methods {
        titles.push(&method.text_raw);
    }
    for sub in &node.submodules {
        flat_method_titles(sub, titles);
    }
}

pub fn fmt_catalog(w: &mut impl Write, modules: &[DocNode], color: bool) -> io::Result<()> {
    for module in modules {
        let mut titles = Vec::new();
        flat_method_titles(module, &mut titles);

        if color {
            writeln!(
                w,
                "{} ({})  {}",
                module.listing_title().bold(),
                module.name,
                format_args!("[{} methods]", titles.len()).dimmed()
            )?;
        } else {
            writeln!(
                w,
                "{} ({})  [{} methods]",
                module.listing_title(),
                module.name,
                titles.len()
            )?;
        }

        for title in titles {
            writeln!(w, "  {title}")?;
        }
        writeln!(w)?;
    }

    Ok(())
}
