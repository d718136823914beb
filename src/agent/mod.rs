//! Agent module - coordinator, leaf agents, and routing state
//!
//! Contains the coordinator that routes user turns and the leaf agents it
//! delegates to.

pub mod conversation;
pub mod coordinator;
pub mod intent;
pub mod leaf;
pub mod memory;
pub mod roster;

pub use conversation::Conversation;
pub use coordinator::Coordinator;
pub use intent::Intent;
pub use leaf::{AgentOutcome, LeafAgent, LeafAgentBuilder};
pub use memory::{ConversationMemory, MemoryState};
