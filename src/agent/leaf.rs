//! Leaf agents - the delegated workers of the coordinator
//!
//! A leaf agent is a name, an instruction, a model reference, and a
//! capability registry. Its behavior is a bounded tool-calling loop; an
//! agent whose tools failed to construct still exists but reports its
//! inability instead of inventing output.

use std::sync::Arc;

use crate::core::{HeraldError, Message, Result};
use crate::llm::{GenerateOptions, LLMProvider};
use crate::tools::CapabilityRegistry;

/// What running a leaf agent produced.
///
/// Callers that chain agent outputs (summarize the fetch, speak the
/// summary) use the distinction to decide whether the text is real
/// material or just an apology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutcome {
    /// A completed answer
    Answer(String),
    /// Required tools are not bound; the fixed unavailable message
    Unavailable(String),
    /// The tool loop ran out of turns without producing an answer
    Incomplete(String),
}

impl AgentOutcome {
    /// The user-visible text, whatever the outcome
    pub fn text(&self) -> &str {
        match self {
            AgentOutcome::Answer(s) => s,
            AgentOutcome::Unavailable(s) => s,
            AgentOutcome::Incomplete(s) => s,
        }
    }

    /// Consume the outcome, keeping only the text
    pub fn into_text(self) -> String {
        match self {
            AgentOutcome::Answer(s) => s,
            AgentOutcome::Unavailable(s) => s,
            AgentOutcome::Incomplete(s) => s,
        }
    }

    /// Whether this is a completed answer
    pub fn is_answer(&self) -> bool {
        matches!(self, AgentOutcome::Answer(_))
    }
}

/// A delegated agent with an instruction and zero or more tool capabilities
pub struct LeafAgent {
    /// Name of this agent
    name: String,
    /// One-line description used in routing prompts and status output
    description: String,
    /// Instruction handed to the model as the system prompt
    instruction: String,
    /// Model reference
    model: String,
    /// LLM provider
    llm: Arc<dyn LLMProvider>,
    /// Discovered tool capabilities
    tools: CapabilityRegistry,
    /// Whether this agent is useless without tools
    requires_tools: bool,
    /// Message returned when required tools are absent
    unavailable_message: String,
    /// Maximum tool-calling turns per task
    max_turns: usize,
    /// Whether to show debug output
    debug: bool,
}

/// Builder for creating leaf agents
pub struct LeafAgentBuilder {
    name: String,
    description: String,
    instruction: Option<String>,
    model: Option<String>,
    llm: Option<Arc<dyn LLMProvider>>,
    tools: CapabilityRegistry,
    requires_tools: bool,
    unavailable_message: String,
    max_turns: usize,
    debug: bool,
}

impl LeafAgentBuilder {
    /// Create a new builder with the given name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            unavailable_message: format!(
                "I cannot perform this function right now: the {} tool is unavailable.",
                name
            ),
            name,
            description: String::new(),
            instruction: None,
            model: None,
            llm: None,
            tools: CapabilityRegistry::new(),
            requires_tools: false,
            max_turns: 5,
            debug: false,
        }
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the instruction (system prompt)
    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Set the model to use
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the LLM provider
    pub fn llm(mut self, llm: Arc<dyn LLMProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Set the capability registry
    pub fn tools(mut self, tools: CapabilityRegistry) -> Self {
        self.tools = tools;
        self
    }

    /// Mark this agent as dependent on its tools
    pub fn requires_tools(mut self, required: bool) -> Self {
        self.requires_tools = required;
        self
    }

    /// Override the unavailable-tools message
    pub fn unavailable_message(mut self, message: impl Into<String>) -> Self {
        self.unavailable_message = message.into();
        self
    }

    /// Set maximum tool-calling turns
    pub fn max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    /// Enable debug output
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Build the leaf agent
    pub fn build(self) -> Result<LeafAgent> {
        let instruction = self.instruction.ok_or_else(|| {
            HeraldError::config(format!("Agent '{}' has no instruction", self.name))
        })?;
        let model = self
            .model
            .ok_or_else(|| HeraldError::config(format!("Agent '{}' has no model", self.name)))?;
        let llm = self
            .llm
            .ok_or_else(|| HeraldError::config(format!("Agent '{}' has no provider", self.name)))?;

        Ok(LeafAgent {
            name: self.name,
            description: self.description,
            instruction,
            model,
            llm,
            tools: self.tools,
            requires_tools: self.requires_tools,
            unavailable_message: self.unavailable_message,
            max_turns: self.max_turns,
            debug: self.debug,
        })
    }
}

impl LeafAgent {
    /// Create a builder
    pub fn builder(name: impl Into<String>) -> LeafAgentBuilder {
        LeafAgentBuilder::new(name)
    }

    /// Agent name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Agent description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Instruction handed to the model as the system prompt
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Whether any tool capability is bound
    pub fn has_tools(&self) -> bool {
        !self.tools.is_empty()
    }

    /// Names of the bound capabilities
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.tool_names()
    }

    /// Run the agent on a task.
    ///
    /// Tool-requiring agents with no bound tools return the fixed
    /// unavailable message without consulting the model, so absence of a
    /// tool can never be papered over with generated output.
    pub async fn run(&self, task: &str) -> Result<AgentOutcome> {
        if self.requires_tools && self.tools.is_empty() {
            return Ok(AgentOutcome::Unavailable(self.unavailable_message.clone()));
        }

        let mut messages = vec![Message::system(&self.instruction), Message::user(task)];
        let definitions = self.tools.definitions();

        if definitions.is_empty() {
            // Pure transform agent: single model call
            let response = self
                .llm
                .chat(
                    &self.model,
                    &messages,
                    Some(GenerateOptions {
                        temperature: Some(0.7),
                        ..Default::default()
                    }),
                )
                .await?;
            return Ok(AgentOutcome::Answer(response.content));
        }

        for turn in 0..self.max_turns {
            let response = self
                .llm
                .chat_with_tools(
                    &self.model,
                    &messages,
                    &definitions,
                    Some(GenerateOptions {
                        temperature: Some(0.3), // low temperature for tool selection
                        ..Default::default()
                    }),
                )
                .await?;

            if response.tool_calls.is_empty() {
                if !response.content.is_empty() {
                    return Ok(AgentOutcome::Answer(response.content));
                }
                break;
            }

            if self.debug {
                eprintln!(
                    "DEBUG: [{}] turn {} executing {} tool call(s)",
                    self.name,
                    turn + 1,
                    response.tool_calls.len()
                );
            }

            messages.push(Message::assistant_with_tools(
                response.content.clone(),
                response.tool_calls.clone(),
            ));

            for call in &response.tool_calls {
                let result = self.tools.execute(call).await;
                messages.push(Message::tool(format!(
                    "{}: {}",
                    result.tool_name, result.output
                )));
            }
        }

        Ok(AgentOutcome::Incomplete(format!(
            "I could not complete the request with the {} tool this time.",
            self.name
        )))
    }
}
