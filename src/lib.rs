//! Herald - LLM-driven Reddit briefing agent
//!
//! A coordinator agent routes user requests across three sub-agents: a
//! Reddit scout backed by an MCP tool subprocess, a pure-LLM summarizer,
//! and a text-to-speech speaker backed by an ElevenLabs MCP subprocess.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, credentials, error handling
//! - **LLM**: Provider abstraction with a Gemini implementation
//! - **MCP**: Stdio client for external tool subprocesses
//! - **Tools**: Tool adapters and the capability registry
//! - **Agent**: Coordinator routing, leaf agents, conversation memory
//! - **A2A**: Exposing the speaker as a standalone HTTP agent service
//! - **CLI**: Command-line interface and REPL
//!
//! # Usage
//!
//! ```rust,no_run
//! use herald::agent::Coordinator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut coordinator = Coordinator::new().await.unwrap();
//!     coordinator.initialize().await.unwrap();
//!
//!     let response = coordinator
//!         .process("show me hot posts from r/rust")
//!         .await
//!         .unwrap();
//!     println!("{}", response);
//! }
//! ```

pub mod a2a;
pub mod agent;
pub mod cli;
pub mod core;
pub mod llm;
pub mod mcp;
pub mod tools;

// Re-export commonly used items
pub use agent::Coordinator;
pub use cli::Repl;
pub use core::{Config, HeraldError, Result};
