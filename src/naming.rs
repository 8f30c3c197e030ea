//! Module name normalization.
//!
//! Two distinct normal forms exist on purpose:
//!
//! - [`tool_ident`] turns a module name into the identifier its tool is
//!   registered under. MCP registries commonly enforce a 64-character
//!   ceiling on tool names; we truncate to 63 to stay clear of it.
//! - [`match_key`] is the looser form used when a caller asks for a module
//!   by name: `My_Module`, `my-module`, and `my module` all resolve to the
//!   same module.

/// Normalizes a module name into a registrable tool identifier.
///
/// Lower-cases the input, strips every character outside `[a-z0-9_-]`,
/// and caps the result at 63 characters. Pure and idempotent: feeding the
/// output back in returns it unchanged.
///
/// The empty string is a caller error; this function does not guard
/// against it (the registry skips unnamed modules before getting here).
#[must_use]
pub fn tool_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-'))
        .collect();
    // All remaining chars are ASCII, so byte truncation is char truncation.
    ident.truncate(63);
    ident
}

/// Normalizes a module name for lookup matching.
///
/// Lower-cases and removes underscores, hyphens, and whitespace, so that
/// the spellings users actually type (`string_decoder`, `string decoder`,
/// `String-Decoder`) all land on the same key.
#[must_use]
pub fn match_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !matches!(c, '_' | '-') && !c.is_whitespace())
        .collect()
}
