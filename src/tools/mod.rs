//! MCP tool implementations.

mod docs;
mod registry;

pub use docs::{
    execute_catalog, execute_find_module, execute_module_doc, find_module, FindModuleInput,
    ModuleDocInput,
};
pub use registry::{ToolEntry, ToolRegistry, CATALOG_TOOL, FIND_TOOL};
