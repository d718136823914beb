//! Custom error types for Herald
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Herald operations
#[derive(Error, Debug)]
pub enum HeraldError {
    /// Gemini API or other LLM errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Tool adapter or tool execution errors
    #[error("Tool error: {0}")]
    Tool(String),

    /// MCP protocol errors (handshake, malformed frames, RPC errors)
    #[error("MCP error: {0}")]
    Mcp(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Agent-to-agent HTTP service errors
    #[error("A2A error: {0}")]
    A2a(String),

    /// Tool launcher executable not installed
    #[error("'{0}' not found. Install it with: pip install uv")]
    LauncherNotFound(String),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for Herald operations
pub type Result<T> = std::result::Result<T, HeraldError>;

impl HeraldError {
    /// Create an LLM error
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Create a tool error
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::Tool(msg.into())
    }

    /// Create an MCP protocol error
    pub fn mcp(msg: impl Into<String>) -> Self {
        Self::Mcp(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an A2A service error
    pub fn a2a(msg: impl Into<String>) -> Self {
        Self::A2a(msg.into())
    }
}
