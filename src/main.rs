//! Herald - LLM-driven Reddit briefing agent
//!
//! Main entry point for the CLI application.

use std::sync::Arc;

use clap::Parser;
use herald::llm::{GeminiClient, LLMProvider};
use herald::{Config, Repl};

/// Herald - Reddit briefings, summarized and spoken
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Coordinator model (routing and direct answers)
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,

    /// Disable the Reddit tool
    #[arg(long)]
    no_reddit: bool,

    /// Disable the text-to-speech tool
    #[arg(long)]
    no_tts: bool,

    /// Single prompt mode (non-interactive)
    #[arg(long, short = 'p')]
    prompt: Option<String>,

    /// Serve the speaker agent as a standalone A2A service
    #[arg(long)]
    serve_speaker: bool,

    /// Port for --serve-speaker
    #[arg(long, default_value_t = 8003)]
    port: u16,

    /// Chat with a remote A2A agent instead of the local coordinator
    #[arg(long)]
    agent_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(ref model) = args.model {
        config.models.coordinator = model.clone();
    }

    if args.debug {
        config.agent.debug = true;
    }

    if args.no_reddit {
        config.reddit.enabled = false;
    }

    if args.no_tts {
        config.tts.enabled = false;
    }

    // Standalone A2A speaker service
    if args.serve_speaker {
        let llm: Arc<dyn LLMProvider> = Arc::new(GeminiClient::from_config(&config));
        let speaker = herald::agent::roster::speaker(&config, llm).await?;
        herald::a2a::server::serve(speaker, args.port).await?;
        return Ok(());
    }

    // Remote A2A chat mode
    if let Some(url) = args.agent_url {
        herald::cli::remote::run_remote_chat(&url).await?;
        return Ok(());
    }

    // Single prompt mode
    if let Some(prompt) = args.prompt {
        let mut coordinator = herald::Coordinator::with_config(config).await?;
        coordinator.initialize().await?;

        let response = coordinator.process(&prompt).await?;
        println!("{}", response);
        return Ok(());
    }

    // Interactive REPL mode
    let mut repl = Repl::with_config(config).await?;
    repl.run().await?;

    Ok(())
}
