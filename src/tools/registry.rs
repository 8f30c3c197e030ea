//! Dynamic tool registry.
//!
//! The tool set is data-driven: one tool per documented module, plus the
//! two fixed cross-cutting tools. Built once from the loaded tree and
//! read-only afterwards, so concurrent invocations need no locking.

use crate::error::{RegistryError, Result};
use crate::naming::tool_ident;
use crate::tools::docs::{
    execute_catalog, execute_find_module, execute_module_doc, FindModuleInput, ModuleDocInput,
};
use crate::types::DocTree;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed name of the discovery tool (full catalog, no arguments).
pub const CATALOG_TOOL: &str = "search-nodejs-modules-api-documentation";

/// Fixed name of the module lookup tool (optional `name` argument).
pub const FIND_TOOL: &str = "find-nodejs-module-api-documentation";

/// Identifier length ceiling, shared with [`tool_ident`].
const IDENT_CAP: usize = 63;

enum ToolAction {
    /// Render one module (index into the tree's module list).
    ModuleDoc(usize),
    /// Render the all-modules catalog summary.
    Catalog,
    /// Look a module up by name, falling back to the catalog.
    FindModule,
}

/// One registered tool: its wire name, description, and action.
pub struct ToolEntry {
    pub name: String,
    pub description: String,
    action: ToolAction,
}

impl ToolEntry {
    /// JSON Schema for this tool's argument object.
    #[must_use]
    pub fn input_schema(&self) -> Value {
        match self.action {
            ToolAction::ModuleDoc(_) => schema_value::<ModuleDocInput>(),
            ToolAction::FindModule => schema_value::<FindModuleInput>(),
            ToolAction::Catalog => serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }
}

fn schema_value<T: schemars::JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T))
        .unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Name-addressable mapping from tool identifiers to operations.
pub struct ToolRegistry {
    tree: Arc<DocTree>,
    entries: Vec<ToolEntry>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Builds the registry from an already-filtered tree.
    ///
    /// Per-module tools are keyed by `tool_ident(module.name)`. When two
    /// modules normalize to the same identifier, the later one gets a
    /// numeric suffix instead of silently overwriting the earlier
    /// registration.
    #[must_use]
    pub fn build(tree: Arc<DocTree>) -> Self {
        let mut registry = Self {
            tree: Arc::clone(&tree),
            entries: Vec::new(),
            by_name: HashMap::new(),
        };

        for (index, module) in tree.modules.iter().enumerate() {
            let name = registry.disambiguate(tool_ident(&module.name));
            tracing::debug!(tool = %name, module = %module.name, "Creating tool");
            registry.insert(ToolEntry {
                name,
                description: format!("Node.js API: {}", module.text_raw),
                action: ToolAction::ModuleDoc(index),
            });
        }

        registry.insert(ToolEntry {
            name: CATALOG_TOOL.to_string(),
            description: "**HIGH PRIORITY** List all Node.js modules and their methods. \
                **ALWAYS** consult this tool first to look-up the correct module and then \
                use the specific module tool for full api details"
                .to_string(),
            action: ToolAction::Catalog,
        });
        registry.insert(ToolEntry {
            name: FIND_TOOL.to_string(),
            description: "Look up one Node.js module by name (case, underscores, hyphens, \
                and whitespace are ignored) and return its full documentation. Without a \
                name, or when nothing matches, returns the module catalog instead."
                .to_string(),
            action: ToolAction::FindModule,
        });

        tracing::info!(tools = registry.entries.len(), "Tool registry built");
        registry
    }

    /// Resolves an identifier collision by suffixing `-2`, `-3`, … onto
    /// the later registration, truncating the base so the cap holds.
    fn disambiguate(&self, ident: String) -> String {
        if !self.by_name.contains_key(&ident) {
            return ident;
        }
        let mut n: usize = 2;
        loop {
            let suffix = format!("-{n}");
            let mut candidate = ident.clone();
            candidate.truncate(IDENT_CAP - suffix.len());
            candidate.push_str(&suffix);
            if !self.by_name.contains_key(&candidate) {
                tracing::warn!(
                    ident = %ident,
                    tool = %candidate,
                    "Identifier collision, registering under suffixed name"
                );
                return candidate;
            }
            n += 1;
        }
    }

    fn insert(&mut self, entry: ToolEntry) {
        self.by_name.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
    }

    /// All registered tools, in registration order (modules first, then
    /// the fixed tools).
    #[must_use]
    pub fn entries(&self) -> &[ToolEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invokes a tool by its registered name with a raw argument object.
    ///
    /// # Errors
    ///
    /// [`RegistryError::OperationNotFound`] for unknown names; render and
    /// argument-decode failures propagate as their own variants.
    pub fn invoke(&self, name: &str, args: Option<&Map<String, Value>>) -> Result<String> {
        let entry = self
            .by_name
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| RegistryError::OperationNotFound {
                name: name.to_string(),
            })?;

        tracing::info!(tool = %entry.name, "Tool execution started");
        let result = match entry.action {
            ToolAction::ModuleDoc(index) => {
                let input: ModuleDocInput = parse_args(args)?;
                execute_module_doc(&self.tree.modules[index], input)
            }
            ToolAction::Catalog => execute_catalog(&self.tree.modules),
            ToolAction::FindModule => {
                let input: FindModuleInput = parse_args(args)?;
                execute_find_module(&self.tree.modules, input)
            }
        };

        match &result {
            Ok(_) => tracing::info!(tool = %entry.name, "Tool execution successful"),
            Err(e) => tracing::error!(tool = %entry.name, error = %e, "Tool execution failed"),
        }
        Ok(result?)
    }
}

/// Decodes a tool argument object, treating absent arguments as defaults.
/// Unknown fields are ignored rather than rejected.
fn parse_args<T: Default + DeserializeOwned>(args: Option<&Map<String, Value>>) -> Result<T> {
    match args {
        None => Ok(T::default()),
        Some(map) => Ok(serde_json::from_value(Value::Object(map.clone()))?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocNode;

    fn documented_module(name: &str, title: &str) -> DocNode {
        DocNode {
            text_raw: title.to_string(),
            name: name.to_string(),
            methods: vec![DocNode {
                text_raw: format!("{name}.run()"),
                ..DocNode::default()
            }],
            ..DocNode::default()
        }
    }

    fn registry_for(modules: Vec<DocNode>) -> ToolRegistry {
        ToolRegistry::build(Arc::new(DocTree { modules }))
    }

    #[test]
    fn test_registers_one_tool_per_module_plus_fixed() {
        let registry = registry_for(vec![
            documented_module("fs", "File System"),
            documented_module("http", "HTTP"),
        ]);
        assert_eq!(registry.len(), 4);
        let names: Vec<&str> = registry.entries().iter().map(|e| e.name.as_str()).collect();
        assert!(names.contains(&"fs"));
        assert!(names.contains(&"http"));
        assert!(names.contains(&CATALOG_TOOL));
        assert!(names.contains(&FIND_TOOL));
    }

    #[test]
    fn test_colliding_identifiers_get_suffixes() {
        let registry = registry_for(vec![
            documented_module("My Module", "First"),
            documented_module("my_module", "Second"),
            documented_module("MY-MODULE", "Third"),
        ]);
        let names: Vec<&str> = registry.entries().iter().map(|e| e.name.as_str()).collect();
        // "My Module" and "MY-MODULE" keep distinct idents; only the pair
        // that truly collides gets suffixed.
        assert!(names.contains(&"mymodule"));
        assert!(names.contains(&"my_module"));
        assert!(names.contains(&"my-module"));

        let registry = registry_for(vec![
            documented_module("same", "First"),
            documented_module("SAME", "Second"),
        ]);
        let names: Vec<&str> = registry.entries().iter().map(|e| e.name.as_str()).collect();
        assert!(names.contains(&"same"));
        assert!(names.contains(&"same-2"));
    }

    #[test]
    fn test_suffixed_identifier_respects_cap() {
        let long = "m".repeat(80);
        let registry = registry_for(vec![
            documented_module(&long, "First"),
            documented_module(&long, "Second"),
        ]);
        for entry in registry.entries() {
            assert!(entry.name.len() <= 63, "{} exceeds cap", entry.name);
        }
    }

    #[test]
    fn test_unknown_tool_is_operation_not_found() {
        let registry = registry_for(vec![documented_module("fs", "File System")]);
        let err = registry.invoke("node-nonexistent", None).unwrap_err();
        assert_eq!(err.code(), "OPERATION_NOT_FOUND");
        assert!(err.to_string().contains("node-nonexistent"));
    }

    #[test]
    fn test_invoke_module_tool_with_filter_args() {
        let mut module = documented_module("fs", "File System");
        module.methods.push(DocNode {
            text_raw: "readFile".to_string(),
            desc: Some("Reads a file".to_string()),
            ..DocNode::default()
        });
        let registry = registry_for(vec![module]);

        let mut args = Map::new();
        args.insert("method".to_string(), Value::String("readFile".to_string()));
        let out = registry.invoke("fs", Some(&args)).unwrap();
        assert!(out.contains("### readFile"));
        assert!(!out.contains("fs.run()"));
    }

    #[test]
    fn test_catalog_tool_lists_everything() {
        let registry = registry_for(vec![
            documented_module("fs", "File System"),
            documented_module("http", "HTTP"),
        ]);
        let out = registry.invoke(CATALOG_TOOL, None).unwrap();
        assert!(out.starts_with("Available Node.js core modules"));
        assert!(out.contains("## File System (fs)"));
        assert!(out.contains("## HTTP (http)"));
    }

    #[test]
    fn test_schema_shapes() {
        let registry = registry_for(vec![documented_module("fs", "File System")]);
        for entry in registry.entries() {
            let schema = entry.input_schema();
            assert!(schema.is_object(), "schema for {} not an object", entry.name);
        }
    }
}
