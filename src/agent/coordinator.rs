//! Coordinator agent
//!
//! Routes each user turn to the right sub-agent. The routing policy is an
//! explicit state machine over `ConversationMemory`; the model is consulted
//! only to classify intent, extract arguments, and phrase direct answers.

use std::sync::Arc;

use crate::agent::conversation::Conversation;
use crate::agent::intent::{classify_keywords, parse_classification, Intent};
use crate::agent::leaf::{AgentOutcome, LeafAgent};
use crate::agent::memory::{ConversationMemory, MemoryState};
use crate::agent::roster;
use crate::core::{Config, Message, Result};
use crate::llm::{GenerateOptions, GeminiClient, LLMProvider};

const COORDINATOR_INSTRUCTION: &str = "\
You are Herald, an assistant that manages three helpers: a Reddit scout that \
fetches hot posts, a summarizer, and a text-to-speech speaker. When a request \
is outside those functions, answer it directly and concisely.";

const CLASSIFIER_INSTRUCTION: &str = "\
Classify the user's request for a Reddit briefing assistant. Respond with \
ONLY a JSON object, no prose, in this form:
{\"intent\": \"fetch\" | \"summarize\" | \"speak\" | \"other\", \
\"subreddit\": <string or null>, \"limit\": <number or null>}
- \"fetch\": the user wants hot posts from a subreddit. Extract the \
subreddit name without the r/ prefix if mentioned; otherwise null. Never \
guess a subreddit.
- \"summarize\": the user wants a summary of what was already fetched.
- \"speak\": the user wants the material read aloud / converted to audio.
- \"other\": anything else.";

/// Root agent that routes user turns across the sub-agents
pub struct Coordinator {
    /// Configuration
    config: Config,
    /// LLM provider shared with the sub-agents
    llm: Arc<dyn LLMProvider>,
    /// Reddit scout sub-agent
    scout: LeafAgent,
    /// Summarizer sub-agent
    summarizer: LeafAgent,
    /// Speaker sub-agent
    speaker: LeafAgent,
    /// Conversation history
    conversation: Conversation,
    /// Explicit routing state
    memory: ConversationMemory,
}

impl Coordinator {
    /// Create a coordinator with default configuration
    pub async fn new() -> Result<Self> {
        Self::with_config(Config::load()).await
    }

    /// Create a coordinator with custom configuration.
    ///
    /// Builds the full agent tree bottom-up: tool adapters first (each may
    /// degrade to zero tools), then the leaf agents, then the coordinator
    /// referencing them.
    pub async fn with_config(config: Config) -> Result<Self> {
        let llm: Arc<dyn LLMProvider> = Arc::new(GeminiClient::from_config(&config));

        let scout = roster::reddit_scout(&config, llm.clone()).await?;
        let summarizer = roster::summarizer(&config, llm.clone())?;
        let speaker = roster::speaker(&config, llm.clone()).await?;

        Ok(Self::from_parts(config, llm, scout, summarizer, speaker))
    }

    /// Assemble a coordinator from pre-built parts (used by tests to
    /// substitute providers and tool-less agents)
    pub fn from_parts(
        config: Config,
        llm: Arc<dyn LLMProvider>,
        scout: LeafAgent,
        summarizer: LeafAgent,
        speaker: LeafAgent,
    ) -> Self {
        let mut conversation = Conversation::new(config.agent.max_history);
        conversation.set_system_prompt(COORDINATOR_INSTRUCTION);

        Self {
            config,
            llm,
            scout,
            summarizer,
            speaker,
            conversation,
            memory: ConversationMemory::new(),
        }
    }

    /// Check credentials and report adapter status.
    ///
    /// A missing API key is a warning, not an error: the endpoint rejects
    /// the call at request time and that failure is reported per turn.
    pub async fn initialize(&mut self) -> Result<()> {
        if !self.config.has_google_api_key() {
            eprintln!(
                "WARNING: GOOGLE_API_KEY is not set; model calls will be \
                 rejected by the Gemini endpoint."
            );
        }

        if self.config.agent.debug {
            eprintln!(
                "DEBUG: scout tools: {:?}, speaker tools: {:?}",
                self.scout.tool_names(),
                self.speaker.tool_names()
            );
        }

        Ok(())
    }

    /// Process one user turn
    pub async fn process(&mut self, user_input: &str) -> Result<String> {
        self.conversation.add_user(user_input);

        let intent = self.classify(user_input).await;

        if self.config.agent.debug {
            eprintln!("DEBUG: classified intent: {:?}", intent);
        }

        let answer = match intent {
            Intent::Fetch { subreddit, limit } => self.handle_fetch(subreddit, limit).await?,
            Intent::Summarize => self.handle_summarize().await?,
            Intent::Speak => self.handle_speak().await?,
            Intent::Other => self.answer_directly().await?,
        };

        self.conversation.add_assistant(&answer);
        Ok(answer)
    }

    /// Classify the user's intent: model first, keyword fallback
    async fn classify(&self, user_input: &str) -> Intent {
        let messages = vec![
            Message::system(CLASSIFIER_INSTRUCTION),
            Message::user(user_input),
        ];

        let response = self
            .llm
            .chat(
                &self.config.models.coordinator,
                &messages,
                Some(GenerateOptions {
                    temperature: Some(0.0),
                    ..Default::default()
                }),
            )
            .await;

        match response {
            Ok(r) => parse_classification(&r.content)
                .unwrap_or_else(|| classify_keywords(user_input)),
            Err(e) => {
                if self.config.agent.debug {
                    eprintln!("DEBUG: classifier call failed ({}), using keywords", e);
                }
                classify_keywords(user_input)
            }
        }
    }

    /// Fetch: delegate to the scout and return its output unmodified
    async fn handle_fetch(
        &mut self,
        subreddit: Option<String>,
        limit: Option<u64>,
    ) -> Result<String> {
        let Some(subreddit) = subreddit else {
            return Ok("Which subreddit should I check for hot posts?".to_string());
        };

        let mut task = format!("Fetch the hot posts from r/{}.", subreddit);
        if let Some(limit) = limit {
            task.push_str(&format!(" Limit the list to {} posts.", limit));
        }

        let outcome = self.scout.run(&task).await?;

        // Only a completed answer becomes routing state; an unavailable or
        // gave-up reply must never be summarized or spoken later.
        if let AgentOutcome::Answer(raw) = &outcome {
            self.memory.record_fetch(raw);
        }

        Ok(outcome.into_text())
    }

    /// Summarize: only ever the stored fetch, never a fresh one
    async fn handle_summarize(&mut self) -> Result<String> {
        let Some(raw) = self.memory.last_fetch().map(String::from) else {
            return Ok(
                "I have nothing to summarize yet. Ask me to fetch hot posts \
                 from a subreddit first."
                    .to_string(),
            );
        };

        let outcome = self.summarizer.run(&raw).await?;
        if let AgentOutcome::Answer(summary) = &outcome {
            self.memory.record_summary(summary);
        }
        Ok(outcome.into_text())
    }

    /// Speak: the latest summary when one exists, else the raw list
    async fn handle_speak(&mut self) -> Result<String> {
        let Some(text) = self.memory.speakable_text().map(String::from) else {
            return Ok(
                "There is nothing to read aloud yet. Ask me to fetch some \
                 posts first."
                    .to_string(),
            );
        };

        Ok(self.speaker.run(&text).await?.into_text())
    }

    /// Answer directly from the conversation context window
    async fn answer_directly(&self) -> Result<String> {
        let messages = self
            .conversation
            .get_context_window(self.config.agent.context_window);

        let response = self
            .llm
            .chat(
                &self.config.models.coordinator,
                &messages,
                Some(GenerateOptions {
                    temperature: Some(0.7),
                    ..Default::default()
                }),
            )
            .await?;

        if response.content.is_empty() {
            Ok("I apologize, but I couldn't generate a response.".to_string())
        } else {
            Ok(response.content)
        }
    }

    /// Clear conversation history and routing state
    pub fn clear_history(&mut self) {
        self.conversation.clear();
        self.memory.clear();
    }

    /// Get current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Enable debug mode for the coordinator's own diagnostics
    pub fn set_debug(&mut self, debug: bool) {
        self.config.agent.debug = debug;
    }

    /// Switch the model used for routing and direct answers.
    ///
    /// The sub-agents keep the models they were built with.
    pub fn set_coordinator_model(&mut self, model: impl Into<String>) {
        self.config.models.coordinator = model.into();
    }

    /// Get conversation length
    pub fn conversation_length(&self) -> usize {
        self.conversation.len()
    }

    /// Current routing state
    pub fn memory_state(&self) -> MemoryState {
        self.memory.state()
    }

    /// Sub-agent names and descriptions, for status output
    pub fn roster(&self) -> [(&str, &str); 3] {
        [
            (self.scout.name(), self.scout.description()),
            (self.summarizer.name(), self.summarizer.description()),
            (self.speaker.name(), self.speaker.description()),
        ]
    }

    /// Whether the Reddit tool connected
    pub fn has_reddit(&self) -> bool {
        self.scout.has_tools()
    }

    /// Whether the TTS tool connected
    pub fn has_tts(&self) -> bool {
        self.speaker.has_tools()
    }
}
