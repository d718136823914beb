//! Chat loop against a remote A2A agent
//!
//! Connects to a served agent (see `herald --serve-speaker`), prints its
//! card, and relays each typed line through `POST /run`.

use std::io::{self, BufRead, Write};

use uuid::Uuid;

use crate::a2a::A2aClient;
use crate::core::Result;

/// Interactive chat with the agent at the given base URL
pub async fn run_remote_chat(url: &str) -> Result<()> {
    let client = A2aClient::new(url);

    let card = client.card().await?;
    println!("Connected to '{}': {}", card.name, card.description);
    println!("Type 'exit' to quit.\n");
    let agent_name = card.name.clone();

    // One conversation per process run
    let session_id = format!("conv-{}", Uuid::new_v4());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("You: ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            println!("\nGoodbye!");
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "exit" | "quit" | "q") {
            println!("\nGoodbye!");
            break;
        }

        match client.run(input, Some(&session_id)).await {
            Ok(response) => {
                println!("\n{}:\n{}\n", agent_name, response.message);
                if let Some(audio) = response.data.audio_url {
                    println!("Audio: {}\n", audio);
                }
            }
            Err(e) => {
                eprintln!("\nError: {}\n", e);
            }
        }
    }

    Ok(())
}
