//! MCP module - client side of the Model Context Protocol
//!
//! Herald launches external tool servers (Reddit fetcher, TTS) as
//! subprocesses and drives them over stdio.

pub mod client;
pub mod types;

pub use client::McpClient;
pub use types::{CallToolResult, ToolDescriptor};
