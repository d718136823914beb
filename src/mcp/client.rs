//! MCP stdio client
//!
//! Spawns a tool server as a subprocess and speaks newline-delimited
//! JSON-RPC over its stdin/stdout. The channel is a single exclusive
//! stream, so request/response pairs are serialized behind one lock.

use std::collections::HashMap;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;

use crate::core::{HeraldError, Result};
use crate::mcp::types::*;

/// Client for one MCP tool subprocess
pub struct McpClient {
    /// Child handle; the subprocess is killed when the client is dropped
    #[allow(dead_code)]
    child: Child,
    /// Exclusive access to the stdio channel
    io: Mutex<ChannelIo>,
    /// Request ID counter for JSON-RPC
    request_id: AtomicU64,
    debug: bool,
}

struct ChannelIo {
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

impl McpClient {
    /// Spawn the tool subprocess.
    ///
    /// A missing launcher executable maps to `HeraldError::LauncherNotFound`
    /// so the owning agent factory can degrade to zero tools.
    pub fn spawn(
        command: &str,
        args: &[String],
        env: &HashMap<String, String>,
        debug: bool,
    ) -> Result<Self> {
        let mut cmd = Command::new(command);
        cmd.args(args)
            .envs(env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HeraldError::LauncherNotFound(command.to_string())
            } else {
                HeraldError::tool(format!("Failed to launch '{}': {}", command, e))
            }
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| HeraldError::tool("Tool subprocess has no stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HeraldError::tool("Tool subprocess has no stdout"))?;

        Ok(Self {
            child,
            io: Mutex::new(ChannelIo {
                stdin,
                stdout: BufReader::new(stdout).lines(),
            }),
            request_id: AtomicU64::new(1),
            debug,
        })
    }

    /// Get the next request ID for JSON-RPC
    fn next_request_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Send a request and wait for the matching response
    async fn request(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let id = self.next_request_id();
        let request = JsonRpcRequest::new(id, method, params);
        let frame = serde_json::to_string(&request)?;

        if self.debug {
            eprintln!("DEBUG: MCP -> {}", method);
        }

        let mut io = self.io.lock().await;
        io.stdin.write_all(frame.as_bytes()).await?;
        io.stdin.write_all(b"\n").await?;
        io.stdin.flush().await?;

        // The server may interleave notifications; skip frames until the
        // response with our id arrives.
        loop {
            let line = io
                .stdout
                .next_line()
                .await?
                .ok_or_else(|| HeraldError::mcp("Tool subprocess closed its output"))?;

            if line.trim().is_empty() {
                continue;
            }

            let response: JsonRpcResponse = match serde_json::from_str(&line) {
                Ok(r) => r,
                Err(_) => continue, // notification or log line
            };

            if response.id != Some(id) {
                continue;
            }

            if let Some(error) = response.error {
                return Err(HeraldError::mcp(format!(
                    "{} failed ({}): {}",
                    method, error.code, error.message
                )));
            }

            return response
                .result
                .ok_or_else(|| HeraldError::mcp(format!("{} returned no result", method)));
        }
    }

    /// Send a notification (no response expected)
    async fn notify(&self, method: &str) -> Result<()> {
        let notification = JsonRpcNotification::new(method);
        let frame = serde_json::to_string(&notification)?;

        let mut io = self.io.lock().await;
        io.stdin.write_all(frame.as_bytes()).await?;
        io.stdin.write_all(b"\n").await?;
        io.stdin.flush().await?;
        Ok(())
    }

    /// Perform the MCP handshake
    pub async fn initialize(&self) -> Result<InitializeResult> {
        let params = InitializeParams {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ClientCapabilities::default(),
            client_info: ClientInfo {
                name: "herald".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        let result = self
            .request("initialize", Some(serde_json::to_value(params)?))
            .await?;
        let init: InitializeResult = serde_json::from_value(result)?;

        self.notify("notifications/initialized").await?;

        if self.debug {
            if let Some(server) = &init.server_info {
                eprintln!("DEBUG: MCP connected to {}", server.name);
            }
        }

        Ok(init)
    }

    /// Discover the tools exposed by the server
    pub async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
        let result = self.request("tools/list", None).await?;
        let list: ToolsListResult = serde_json::from_value(result)?;
        Ok(list.tools)
    }

    /// Invoke a named tool with structured arguments
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult> {
        let params = serde_json::json!({
            "name": name,
            "arguments": arguments,
        });

        let result = self.request("tools/call", Some(params)).await?;
        let call: CallToolResult = serde_json::from_value(result)?;
        Ok(call)
    }
}
