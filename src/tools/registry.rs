//! Capability registry - maps discovered tool names to their adapters
//!
//! Populated once at agent construction by querying each adapter; an empty
//! registry is the "no tools available" signal agents must honor.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::{ToolCall, ToolDefinition, ToolResult};
use crate::tools::adapter::ToolAdapter;

/// Registry of tool capabilities discovered from connected adapters
#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    adapters: Vec<Arc<ToolAdapter>>,
    /// Tool name -> index into `adapters`
    index: HashMap<String, usize>,
}

impl CapabilityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter and index its discovered tools.
    ///
    /// When two adapters expose the same tool name, the first registration
    /// wins.
    pub fn add_adapter(&mut self, adapter: Arc<ToolAdapter>) {
        let slot = self.adapters.len();
        for tool in adapter.tools() {
            self.index.entry(tool.name.clone()).or_insert(slot);
        }
        self.adapters.push(adapter);
    }

    /// Whether any capability is available
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of known capabilities
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Names of all known capabilities
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.index.keys().cloned().collect();
        names.sort();
        names
    }

    /// Render tool definitions for the LLM from the discovered schemas
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions = Vec::new();
        for adapter in &self.adapters {
            for tool in adapter.tools() {
                let parameters = if tool.input_schema.is_null() {
                    serde_json::json!({"type": "object", "properties": {}})
                } else {
                    tool.input_schema.clone()
                };
                definitions.push(ToolDefinition::function(
                    &tool.name,
                    &tool.description,
                    parameters,
                ));
            }
        }
        definitions
    }

    /// Execute a tool call by routing it to the owning adapter.
    ///
    /// Unknown tools produce a failure result rather than an error; the text
    /// is relayed to the model so it can report the problem.
    pub async fn execute(&self, tool_call: &ToolCall) -> ToolResult {
        match self.index.get(&tool_call.name) {
            Some(&slot) => self.adapters[slot].call(tool_call).await,
            None => ToolResult::failure(
                &tool_call.name,
                format!("Unknown tool: {}", tool_call.name),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry() {
        let registry = CapabilityRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.definitions().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tool_yields_failure_result() {
        let registry = CapabilityRegistry::new();
        let call = ToolCall::new("missing_tool", serde_json::json!({}));
        let result = registry.execute(&call).await;
        assert!(!result.success);
        assert!(result.output.contains("Unknown tool"));
    }
}
