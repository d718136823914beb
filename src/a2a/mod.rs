//! A2A module - agent-to-agent HTTP communication
//!
//! Lets a leaf agent (the speaker) run as a standalone service that other
//! programs discover via `/.well-known/agent.json` and drive through
//! `POST /run`, plus the client side for talking to such services.

pub mod client;
pub mod server;
pub mod types;

pub use client::A2aClient;
pub use server::AgentService;
pub use types::{AgentCard, RunRequest, RunResponse};
