//! Conversation memory for the coordinator's routing state
//!
//! Holds what was most recently fetched and summarized as an explicit
//! record, so routing decisions never depend on the LLM remembering prior
//! turns.

/// What the conversation has produced so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryState {
    /// Nothing fetched yet
    Idle,
    /// A raw post list exists, no summary of it yet
    HasRawList,
    /// A summary of the latest fetch exists
    HasSummary,
}

impl std::fmt::Display for MemoryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryState::Idle => write!(f, "idle"),
            MemoryState::HasRawList => write!(f, "raw list available"),
            MemoryState::HasSummary => write!(f, "summary available"),
        }
    }
}

/// Explicit routing state: the latest raw fetch and its summary
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    last_fetch: Option<String>,
    last_summary: Option<String>,
}

impl ConversationMemory {
    /// Create empty memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fresh fetch. Invalidates any summary of older data.
    pub fn record_fetch(&mut self, raw: impl Into<String>) {
        self.last_fetch = Some(raw.into());
        self.last_summary = None;
    }

    /// Record a summary of the current fetch
    pub fn record_summary(&mut self, summary: impl Into<String>) {
        self.last_summary = Some(summary.into());
    }

    /// The latest raw fetch, if any
    pub fn last_fetch(&self) -> Option<&str> {
        self.last_fetch.as_deref()
    }

    /// Text to hand to the speaker: the summary when one exists, otherwise
    /// the raw list
    pub fn speakable_text(&self) -> Option<&str> {
        self.last_summary.as_deref().or(self.last_fetch.as_deref())
    }

    /// Current state of the routing state machine
    pub fn state(&self) -> MemoryState {
        match (&self.last_fetch, &self.last_summary) {
            (_, Some(_)) => MemoryState::HasSummary,
            (Some(_), None) => MemoryState::HasRawList,
            (None, None) => MemoryState::Idle,
        }
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.last_fetch = None;
        self.last_summary = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut memory = ConversationMemory::new();
        assert_eq!(memory.state(), MemoryState::Idle);

        memory.record_fetch("1. post a\n2. post b");
        assert_eq!(memory.state(), MemoryState::HasRawList);

        memory.record_summary("two posts about things");
        assert_eq!(memory.state(), MemoryState::HasSummary);
    }

    #[test]
    fn test_new_fetch_invalidates_summary() {
        let mut memory = ConversationMemory::new();
        memory.record_fetch("old list");
        memory.record_summary("old summary");

        memory.record_fetch("new list");
        assert_eq!(memory.state(), MemoryState::HasRawList);
        assert_eq!(memory.speakable_text(), Some("new list"));
    }

    #[test]
    fn test_speakable_prefers_summary() {
        let mut memory = ConversationMemory::new();
        assert!(memory.speakable_text().is_none());

        memory.record_fetch("raw list");
        assert_eq!(memory.speakable_text(), Some("raw list"));

        memory.record_summary("the summary");
        assert_eq!(memory.speakable_text(), Some("the summary"));
    }
}
