//! Tools module - adapters for external tool subprocesses
//!
//! Contains the MCP tool adapter and the capability registry.

pub mod adapter;
pub mod registry;

pub use adapter::{ToolAdapter, ToolLaunch};
pub use registry::CapabilityRegistry;
