//! Interactive REPL for Herald
//!
//! Provides the main user interaction loop.

use std::io::{self, BufRead, Write};

use crate::agent::Coordinator;
use crate::cli::commands::{handle_command, CommandResult};
use crate::core::{Config, Result};

/// Interactive REPL (Read-Eval-Print Loop)
pub struct Repl {
    coordinator: Coordinator,
}

impl Repl {
    /// Create a REPL with custom configuration
    pub async fn with_config(config: Config) -> Result<Self> {
        Ok(Self {
            coordinator: Coordinator::with_config(config).await?,
        })
    }

    /// Run the REPL
    pub async fn run(&mut self) -> Result<()> {
        self.print_banner();

        print!("Initializing...");
        io::stdout().flush()?;

        match self.coordinator.initialize().await {
            Ok(()) => println!(" Ready!\n"),
            Err(e) => {
                println!("\n\nInitialization error: {}\n", e);
                return Ok(());
            }
        }

        if !self.coordinator.has_reddit() {
            println!("Note: the Reddit tool is unavailable; fetching is disabled this session.");
        }
        if !self.coordinator.has_tts() {
            println!("Note: the TTS tool is unavailable; speech is disabled this session.");
        }

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("You: ");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    // EOF (Ctrl+D)
                    println!("\nGoodbye!");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    continue;
                }
            }

            let input = input.trim();

            if input.is_empty() {
                continue;
            }

            match handle_command(input, &mut self.coordinator).await {
                Ok(CommandResult::Exit) => {
                    println!("\nGoodbye!");
                    break;
                }
                Ok(CommandResult::Clear) => {
                    println!("Conversation cleared.\n");
                    continue;
                }
                Ok(CommandResult::Handled(output)) => {
                    println!("{}\n", output);
                    continue;
                }
                Ok(CommandResult::Continue(input)) => {
                    match self.coordinator.process(&input).await {
                        Ok(response) => {
                            println!("\nHerald:\n{}\n", response);
                        }
                        Err(e) => {
                            eprintln!("\nError: {}\n", e);
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Command error: {}\n", e);
                }
            }
        }

        Ok(())
    }

    /// Print the startup banner
    fn print_banner(&self) {
        let config = self.coordinator.config();

        println!("Herald — Reddit briefings, summarized and spoken");
        println!("────────────────────────────────────────────────");
        println!("Models:");
        println!("  Coordinator: {}", config.models.coordinator);
        println!("  Scout:       {}", config.models.scout);
        println!("  Summarizer:  {}", config.models.summarizer);
        println!("  Speaker:     {}", config.models.speaker);
        println!();
        println!("Commands: help, clear, status, debug, exit");
        println!("────────────────────────────────────────────────");
    }
}
