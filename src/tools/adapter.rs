//! Tool adapter - wraps one external capability behind an MCP subprocess
//!
//! An adapter is a passive conduit: it launches the tool server, discovers
//! its operations once, and forwards named invocations.

use std::collections::HashMap;

use crate::core::{Result, ToolCall, ToolResult};
use crate::mcp::{McpClient, ToolDescriptor};

/// Launch parameters for a tool subprocess
#[derive(Debug, Clone)]
pub struct ToolLaunch {
    /// Launcher executable
    pub command: String,
    /// Launcher arguments
    pub args: Vec<String>,
    /// Environment variables (secrets) passed to the subprocess
    pub env: HashMap<String, String>,
}

impl ToolLaunch {
    /// Create launch parameters with no extra environment
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            env: HashMap::new(),
        }
    }

    /// Attach an environment map
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }
}

/// One connected tool subprocess and its discovered operations
pub struct ToolAdapter {
    /// Human-readable adapter name (e.g. "mcp-reddit")
    name: String,
    client: McpClient,
    tools: Vec<ToolDescriptor>,
}

impl ToolAdapter {
    /// Launch the subprocess, perform the handshake, and discover tools.
    ///
    /// Any failure here is a construction failure; the owning agent factory
    /// catches it and degrades to "no tools available" instead of aborting.
    pub async fn connect(name: impl Into<String>, launch: &ToolLaunch, debug: bool) -> Result<Self> {
        let name = name.into();
        let client = McpClient::spawn(&launch.command, &launch.args, &launch.env, debug)?;

        client.initialize().await?;
        let tools = client.list_tools().await?;

        if debug {
            eprintln!(
                "DEBUG: adapter '{}' discovered {} tool(s): {}",
                name,
                tools.len(),
                tools
                    .iter()
                    .map(|t| t.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        Ok(Self {
            name,
            client,
            tools,
        })
    }

    /// Adapter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Discovered tool descriptors
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Invoke a tool on this adapter.
    ///
    /// Subprocess failures are surfaced as failure results carrying the
    /// error text verbatim; they are never retried here.
    pub async fn call(&self, tool_call: &ToolCall) -> ToolResult {
        match self
            .client
            .call_tool(&tool_call.name, tool_call.arguments.clone())
            .await
        {
            Ok(result) if result.is_error => ToolResult::failure(&tool_call.name, result.text()),
            Ok(result) => ToolResult::success(&tool_call.name, result.text()),
            Err(e) => ToolResult::failure(&tool_call.name, e.to_string()),
        }
    }
}
