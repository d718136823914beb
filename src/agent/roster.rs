//! Agent factories for the Reddit scout, summarizer, and speaker
//!
//! Each factory builds the agent's capability registry from config,
//! degrading to zero tools when the adapter cannot be constructed, and
//! carries the instruction text that defines the agent's behavior.

use std::sync::Arc;

use crate::core::{Config, Result};
use crate::llm::LLMProvider;
use crate::tools::{CapabilityRegistry, ToolAdapter, ToolLaunch};

const SCOUT_INSTRUCTION: &str = "\
You are the Reddit News Scout. Your task is to fetch hot post titles from a \
subreddit using the connected Reddit tool.
1. Use the tool related to fetching Reddit posts (likely named \
'fetch_reddit_hot_threads') with the subreddit name you were given, and \
optionally a limit on the number of posts.
2. The tool returns a formatted string with the hot post information or an \
error message. Present that string directly, unmodified, and state which \
subreddit it is from.
3. If the tool returns an error message, relay that message accurately.
4. Only provide information returned by the tool. If the tool returns no \
results for a valid subreddit, say so. Never invent posts.";

const SUMMARIZER_INSTRUCTION: &str = "\
You are a summarizer. You are given a formatted list of Reddit post titles. \
Produce a short summary of the main themes in a few sentences. Only use the \
text you were given; do not add information, links, or posts that are not in \
the input. If the input is empty, say there is nothing to summarize.";

/// The voice comes from config, so the speaker instruction is built per run
fn speaker_instruction(voice: &str) -> String {
    format!(
        "You are a Text-to-Speech agent. Convert the text you are given into a speech \
         audio file.\n\
         1. Always call the text_to_speech tool with voice_name='{voice}'.\n\
         2. When the tool returns a file path, respond like this example: \"I've \
         converted your text to speech. The audio file is saved at `/path/to/file.mp3`\".\n\
         3. Put ONLY the file path inside backticks, never additional text, and never \
         modify or abbreviate the path.\n\
         4. If the tool returns an error, relay it accurately. Never invent a file \
         path or URL."
    )
}

/// Connect an adapter, degrading to an empty registry on failure.
///
/// Construction failure of a tool adapter must never abort the process;
/// the agent is still created and reports its missing capability at call
/// time.
async fn build_registry(name: &str, launch: &ToolLaunch, debug: bool) -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new();

    match ToolAdapter::connect(name, launch, debug).await {
        Ok(adapter) => registry.add_adapter(Arc::new(adapter)),
        Err(e) => {
            eprintln!(
                "WARNING: could not connect tool adapter '{}': {}. \
                 This capability will be unavailable.",
                name, e
            );
        }
    }

    registry
}

/// Create the Reddit scout agent
pub async fn reddit_scout(config: &Config, llm: Arc<dyn LLMProvider>) -> Result<crate::agent::LeafAgent> {
    let registry = if config.reddit.enabled {
        let launch = ToolLaunch::new(&config.reddit.command, config.reddit.args.clone());
        build_registry("mcp-reddit", &launch, config.agent.debug).await
    } else {
        CapabilityRegistry::new()
    };

    crate::agent::LeafAgent::builder("reddit_scout")
        .description("Fetches hot posts from a given subreddit via the Reddit tool")
        .instruction(SCOUT_INSTRUCTION)
        .model(&config.models.scout)
        .llm(llm)
        .tools(registry)
        .requires_tools(true)
        .unavailable_message(
            "I cannot fetch Reddit news at this time due to a technical issue \
             with the Reddit tool.",
        )
        .max_turns(config.agent.max_turns)
        .debug(config.agent.debug)
        .build()
}

/// Create the summarizer agent (no external tools)
pub fn summarizer(config: &Config, llm: Arc<dyn LLMProvider>) -> Result<crate::agent::LeafAgent> {
    crate::agent::LeafAgent::builder("summarizer")
        .description("Summarizes a list of Reddit post titles")
        .instruction(SUMMARIZER_INSTRUCTION)
        .model(&config.models.summarizer)
        .llm(llm)
        .debug(config.agent.debug)
        .build()
}

/// Create the TTS speaker agent
pub async fn speaker(config: &Config, llm: Arc<dyn LLMProvider>) -> Result<crate::agent::LeafAgent> {
    let registry = if config.tts.enabled {
        let launch = ToolLaunch::new(&config.tts.command, config.tts.args.clone())
            .with_env(config.tts_env());
        build_registry("elevenlabs-mcp", &launch, config.agent.debug).await
    } else {
        CapabilityRegistry::new()
    };

    crate::agent::LeafAgent::builder("speaker")
        .description("Converts text into speech audio via the ElevenLabs tool")
        .instruction(speaker_instruction(&config.tts.voice))
        .model(&config.models.speaker)
        .llm(llm)
        .tools(registry)
        .requires_tools(true)
        .unavailable_message(
            "I cannot convert text to speech right now: the text-to-speech \
             tool is unavailable.",
        )
        .max_turns(config.agent.max_turns)
        .debug(config.agent.debug)
        .build()
}
