//! End-to-end routing tests for the coordinator.
//!
//! These use scripted providers instead of the Gemini endpoint, so they
//! exercise classification, delegation, and memory behavior without a
//! network or any tool subprocess.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use herald::agent::{Coordinator, LeafAgent, MemoryState};
use herald::core::{Config, Message, ToolDefinition};
use herald::llm::{GenerateOptions, LLMProvider, LLMResponse};
use herald::Result;

/// Replays queued responses in order and records each task it was handed;
/// returns empty text when exhausted
struct ScriptedProvider {
    responses: Mutex<VecDeque<LLMResponse>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|r| LLMResponse::text("scripted", r))
                    .collect(),
            ),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// The user-role message content of every call, in order
    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn chat(
        &self,
        model: &str,
        messages: &[Message],
        _options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        if let Some(user) = messages.iter().rev().find(|m| m.role == "user") {
            self.seen.lock().unwrap().push(user.content.clone());
        }
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| LLMResponse::text(model, "")))
    }

    async fn chat_with_tools(
        &self,
        model: &str,
        messages: &[Message],
        _tools: &[ToolDefinition],
        options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        self.chat(model, messages, options).await
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Fails the test if the coordinator ever consults it
struct PanickingProvider(&'static str);

#[async_trait]
impl LLMProvider for PanickingProvider {
    async fn chat(
        &self,
        _model: &str,
        _messages: &[Message],
        _options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        panic!("{} must not be consulted in this scenario", self.0);
    }

    async fn chat_with_tools(
        &self,
        _model: &str,
        _messages: &[Message],
        _tools: &[ToolDefinition],
        _options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        panic!("{} must not be consulted in this scenario", self.0);
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.reddit.enabled = false;
    config.tts.enabled = false;
    config.agent.debug = false;
    config
}

fn leaf(name: &str, llm: Arc<dyn LLMProvider>) -> LeafAgent {
    LeafAgent::builder(name)
        .instruction("test instruction")
        .model("scripted")
        .llm(llm)
        .build()
        .unwrap()
}

fn coordinator_with(
    router: Arc<dyn LLMProvider>,
    scout: LeafAgent,
    summarizer: LeafAgent,
    speaker: LeafAgent,
) -> Coordinator {
    Coordinator::from_parts(test_config(), router, scout, summarizer, speaker)
}

const FETCH_RUST: &str = r#"{"intent": "fetch", "subreddit": "rust", "limit": null}"#;
const SUMMARIZE: &str = r#"{"intent": "summarize", "subreddit": null, "limit": null}"#;
const SPEAK: &str = r#"{"intent": "speak", "subreddit": null, "limit": null}"#;
const OTHER: &str = r#"{"intent": "other", "subreddit": null, "limit": null}"#;

#[tokio::test]
async fn fetch_output_is_passed_through_verbatim() {
    let raw = "Here are the hot posts from r/rust:\n1. Announcing 1.85\n2. Borrow checker tips";
    let router = ScriptedProvider::new(vec![FETCH_RUST]);
    let scout = leaf("reddit_scout", ScriptedProvider::new(vec![raw]));
    let summarizer = leaf("summarizer", Arc::new(PanickingProvider("summarizer")));
    let speaker = leaf("speaker", Arc::new(PanickingProvider("speaker")));

    let mut coordinator = coordinator_with(router, scout, summarizer, speaker);
    let response = coordinator.process("hot posts from r/rust").await.unwrap();

    assert_eq!(response, raw);
}

#[tokio::test]
async fn repeated_fetches_run_independently() {
    let router = ScriptedProvider::new(vec![FETCH_RUST, FETCH_RUST]);
    let scout = leaf(
        "reddit_scout",
        ScriptedProvider::new(vec!["first fetch", "second fetch"]),
    );
    let summarizer = leaf("summarizer", Arc::new(PanickingProvider("summarizer")));
    let speaker = leaf("speaker", Arc::new(PanickingProvider("speaker")));

    let mut coordinator = coordinator_with(router, scout, summarizer, speaker);
    let first = coordinator.process("hot posts from r/rust").await.unwrap();
    let second = coordinator.process("hot posts from r/rust").await.unwrap();

    // No caching between turns: each request reaches the scout again
    assert_eq!(first, "first fetch");
    assert_eq!(second, "second fetch");
}

#[tokio::test]
async fn fetch_without_subreddit_asks_instead_of_guessing() {
    let router = ScriptedProvider::new(vec![
        r#"{"intent": "fetch", "subreddit": null, "limit": null}"#,
    ]);
    let scout = leaf("reddit_scout", Arc::new(PanickingProvider("scout")));
    let summarizer = leaf("summarizer", Arc::new(PanickingProvider("summarizer")));
    let speaker = leaf("speaker", Arc::new(PanickingProvider("speaker")));

    let mut coordinator = coordinator_with(router, scout, summarizer, speaker);
    let response = coordinator.process("show me some hot posts").await.unwrap();

    assert!(response.contains("Which subreddit"));
}

#[tokio::test]
async fn summarize_before_any_fetch_reports_nothing() {
    let router = ScriptedProvider::new(vec![SUMMARIZE]);
    let scout = leaf("reddit_scout", Arc::new(PanickingProvider("scout")));
    let summarizer = leaf("summarizer", Arc::new(PanickingProvider("summarizer")));
    let speaker = leaf("speaker", Arc::new(PanickingProvider("speaker")));

    let mut coordinator = coordinator_with(router, scout, summarizer, speaker);
    let response = coordinator.process("summarize that").await.unwrap();

    assert!(response.contains("nothing to summarize"));
    assert_eq!(coordinator.memory_state(), MemoryState::Idle);
}

#[tokio::test]
async fn speak_before_any_fetch_reports_nothing() {
    let router = ScriptedProvider::new(vec![SPEAK]);
    let scout = leaf("reddit_scout", Arc::new(PanickingProvider("scout")));
    let summarizer = leaf("summarizer", Arc::new(PanickingProvider("summarizer")));
    let speaker = leaf("speaker", Arc::new(PanickingProvider("speaker")));

    let mut coordinator = coordinator_with(router, scout, summarizer, speaker);
    let response = coordinator.process("read it to me").await.unwrap();

    assert!(response.contains("nothing to read aloud"));
}

#[tokio::test]
async fn prose_classifier_output_falls_back_to_keywords() {
    // The router answers with prose instead of the JSON contract; the
    // keyword fallback still routes "summarize" correctly.
    let router = ScriptedProvider::new(vec!["Sure, I can help with that!"]);
    let scout = leaf("reddit_scout", Arc::new(PanickingProvider("scout")));
    let summarizer = leaf("summarizer", Arc::new(PanickingProvider("summarizer")));
    let speaker = leaf("speaker", Arc::new(PanickingProvider("speaker")));

    let mut coordinator = coordinator_with(router, scout, summarizer, speaker);
    let response = coordinator.process("summarize that").await.unwrap();

    assert!(response.contains("nothing to summarize"));
}

#[tokio::test]
async fn other_intent_is_answered_by_the_coordinator_model() {
    // First scripted response classifies, second is the direct answer.
    let router = ScriptedProvider::new(vec![OTHER, "Hello! How can I help?"]);
    let scout = leaf("reddit_scout", Arc::new(PanickingProvider("scout")));
    let summarizer = leaf("summarizer", Arc::new(PanickingProvider("summarizer")));
    let speaker = leaf("speaker", Arc::new(PanickingProvider("speaker")));

    let mut coordinator = coordinator_with(router, scout, summarizer, speaker);
    let response = coordinator.process("hello there").await.unwrap();

    assert_eq!(response, "Hello! How can I help?");
    assert_eq!(coordinator.conversation_length(), 2);
}

#[tokio::test]
async fn unavailable_fetch_never_becomes_summarizable_state() {
    // A tool-requiring scout with no bound tool answers with its fixed
    // unavailable message; that apology must not be stored as fetched
    // material for later summarization.
    let router = ScriptedProvider::new(vec![FETCH_RUST, SUMMARIZE]);
    let scout = LeafAgent::builder("reddit_scout")
        .instruction("test instruction")
        .model("scripted")
        .llm(Arc::new(PanickingProvider("scout")) as Arc<dyn LLMProvider>)
        .requires_tools(true)
        .unavailable_message("I cannot fetch Reddit news at this time.")
        .build()
        .unwrap();
    let summarizer = leaf("summarizer", Arc::new(PanickingProvider("summarizer")));
    let speaker = leaf("speaker", Arc::new(PanickingProvider("speaker")));

    let mut coordinator = coordinator_with(router, scout, summarizer, speaker);
    let fetched = coordinator.process("hot posts from r/rust").await.unwrap();
    assert!(fetched.contains("cannot fetch Reddit news"));
    assert_eq!(coordinator.memory_state(), MemoryState::Idle);

    let response = coordinator.process("summarize that").await.unwrap();
    assert!(response.contains("nothing to summarize"));
}

#[tokio::test]
async fn summarize_receives_the_exact_stored_fetch() {
    let raw = "Here are the hot posts from r/rust:\n1. GATs stabilized\n2. New cargo release";
    let router = ScriptedProvider::new(vec![FETCH_RUST, SUMMARIZE]);
    let scout = leaf("reddit_scout", ScriptedProvider::new(vec![raw]));
    let summarizer_llm = ScriptedProvider::new(vec!["a short summary"]);
    let summarizer = leaf("summarizer", summarizer_llm.clone());
    let speaker = leaf("speaker", Arc::new(PanickingProvider("speaker")));

    let mut coordinator = coordinator_with(router, scout, summarizer, speaker);
    coordinator.process("hot posts from r/rust").await.unwrap();
    assert_eq!(coordinator.memory_state(), MemoryState::HasRawList);

    let summary = coordinator.process("summarize that").await.unwrap();
    assert_eq!(summary, "a short summary");
    assert_eq!(coordinator.memory_state(), MemoryState::HasSummary);

    // The summarizer was handed the stored fetch verbatim, not a rephrasing
    assert_eq!(summarizer_llm.seen(), vec![raw.to_string()]);
}

#[tokio::test]
async fn speak_prefers_latest_summary_over_raw_list() {
    let raw = "1. post a\n2. post b";
    let router = ScriptedProvider::new(vec![FETCH_RUST, SPEAK, SUMMARIZE, SPEAK]);
    let scout = leaf("reddit_scout", ScriptedProvider::new(vec![raw]));
    let summarizer = leaf("summarizer", ScriptedProvider::new(vec!["the summary"]));
    let speaker_llm = ScriptedProvider::new(vec!["spoken once", "spoken twice"]);
    let speaker = leaf("speaker", speaker_llm.clone());

    let mut coordinator = coordinator_with(router, scout, summarizer, speaker);
    coordinator.process("hot posts from r/rust").await.unwrap();
    coordinator.process("read it to me").await.unwrap();
    coordinator.process("summarize that").await.unwrap();
    coordinator.process("read it to me").await.unwrap();

    // Before a summary exists the raw list is spoken; afterwards the summary
    assert_eq!(
        speaker_llm.seen(),
        vec![raw.to_string(), "the summary".to_string()]
    );
}

#[tokio::test]
async fn speaker_without_tts_tool_reports_unavailable() {
    let speaker = herald::agent::roster::speaker(&test_config(), Arc::new(PanickingProvider("speaker")))
        .await
        .unwrap();

    assert!(!speaker.has_tools());
    let outcome = speaker.run("a summary worth hearing").await.unwrap();

    assert!(!outcome.is_answer());
    assert!(outcome.text().contains("cannot convert text to speech"));
    assert!(!outcome.text().contains('`'));
}

#[tokio::test]
async fn clear_resets_history_and_routing_state() {
    let router = ScriptedProvider::new(vec![OTHER, "hi"]);
    let scout = leaf("reddit_scout", Arc::new(PanickingProvider("scout")));
    let summarizer = leaf("summarizer", Arc::new(PanickingProvider("summarizer")));
    let speaker = leaf("speaker", Arc::new(PanickingProvider("speaker")));

    let mut coordinator = coordinator_with(router, scout, summarizer, speaker);
    coordinator.process("hello").await.unwrap();
    assert!(coordinator.conversation_length() > 0);

    coordinator.clear_history();
    assert_eq!(coordinator.conversation_length(), 0);
    assert_eq!(coordinator.memory_state(), MemoryState::Idle);
}
