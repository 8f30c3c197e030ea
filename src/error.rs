//! Error types for nodedocs.
//!
//! Uses thiserror for ergonomic error handling with proper
//! error chain propagation.

use thiserror::Error;

/// Top-level server error.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tool error: {0}")]
    Tool(String),
}

/// Failures while fetching the upstream documentation tree.
///
/// These are never cached: a later fetch may succeed where this one
/// failed, so the provider retries from scratch on the next call.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Documentation endpoint returned status {status}")]
    Status { status: u16 },

    #[error("Documentation payload did not match the expected tree shape: {0}")]
    Decode(String),
}

/// Failures while rendering a documentation node to markdown.
///
/// Partial or corrupt documentation is worse than an explicit failure,
/// so these propagate to the tool caller instead of producing truncated
/// output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Node has no title ({context})")]
    MissingTitle { context: String },
}

/// Tool registry errors.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Tool '{name}' not found")]
    OperationNotFound { name: String },
}

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for render operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

// Error code implementations for machine-readable error responses
impl ServerError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fetch(e) => e.code(),
            Self::Render(e) => e.code(),
            Self::Registry(e) => e.code(),
            Self::Json(_) => "JSON_ERROR",
            Self::Tool(_) => "TOOL_ERROR",
        }
    }
}

impl FetchError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Http(_) => "HTTP_ERROR",
            Self::Status { .. } => "HTTP_STATUS",
            Self::Decode(_) => "DECODE_ERROR",
        }
    }
}

impl RenderError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingTitle { .. } => "MISSING_TITLE",
        }
    }
}

impl RegistryError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::OperationNotFound { .. } => "OPERATION_NOT_FOUND",
        }
    }
}

// Conversion to rmcp protocol errors. Unknown tool names are the caller's
// fault; everything else is an internal failure of this server.
impl From<ServerError> for rmcp::ErrorData {
    fn from(err: ServerError) -> Self {
        match &err {
            ServerError::Registry(RegistryError::OperationNotFound { .. }) => {
                rmcp::ErrorData::invalid_params(err.to_string(), None)
            }
            _ => rmcp::ErrorData::internal_error(err.to_string(), None),
        }
    }
}
