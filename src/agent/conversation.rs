//! Conversation history management
//!
//! Maintains chat history with configurable limits.

use std::collections::VecDeque;

use crate::core::Message;

/// Manages conversation history
#[derive(Debug, Clone)]
pub struct Conversation {
    /// Message history
    messages: VecDeque<Message>,
    /// Maximum history length
    max_length: usize,
    /// System prompt (always first)
    system_prompt: Option<String>,
}

impl Conversation {
    /// Create a new conversation
    pub fn new(max_length: usize) -> Self {
        Self {
            messages: VecDeque::new(),
            max_length,
            system_prompt: None,
        }
    }

    /// Set the system prompt
    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.system_prompt = Some(prompt.into());
    }

    /// Add a user message
    pub fn add_user(&mut self, content: impl Into<String>) {
        self.add_message(Message::user(content));
    }

    /// Add an assistant message
    pub fn add_assistant(&mut self, content: impl Into<String>) {
        self.add_message(Message::assistant(content));
    }

    /// Add a message and maintain size limit
    fn add_message(&mut self, message: Message) {
        self.messages.push_back(message);

        while self.messages.len() > self.max_length {
            self.messages.pop_front();
        }
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Get message count
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Get the context window (system prompt + last N messages)
    pub fn get_context_window(&self, window_size: usize) -> Vec<Message> {
        let mut result = Vec::new();

        if let Some(ref prompt) = self.system_prompt {
            result.push(Message::system(prompt.clone()));
        }

        let len = self.messages.len();
        let start = len.saturating_sub(window_size);

        result.extend(self.messages.iter().skip(start).cloned());

        result
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_basic() {
        let mut conv = Conversation::new(10);
        conv.add_user("Hello");
        conv.add_assistant("Hi there!");

        assert_eq!(conv.len(), 2);
    }

    #[test]
    fn test_conversation_limit() {
        let mut conv = Conversation::new(3);
        conv.add_user("1");
        conv.add_assistant("2");
        conv.add_user("3");
        conv.add_assistant("4");

        assert_eq!(conv.len(), 3);
        // First message should be removed
        let window = conv.get_context_window(10);
        assert_eq!(window[0].content, "2");
    }

    #[test]
    fn test_context_window_includes_system_prompt() {
        let mut conv = Conversation::new(10);
        conv.set_system_prompt("You are a helpful assistant");
        conv.add_user("Hello");

        let window = conv.get_context_window(5);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].role, "system");
    }
}
