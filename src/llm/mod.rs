//! LLM module - Language Model integrations
//!
//! Provides abstractions for different LLM backends with Gemini as the primary.

pub mod gemini;
pub mod traits;

pub use gemini::GeminiClient;
pub use traits::{GenerateOptions, LLMProvider, LLMResponse, TokenUsage};
