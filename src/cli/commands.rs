//! CLI commands
//!
//! Special commands that can be executed in the REPL.

use crate::agent::Coordinator;
use crate::core::Result;

/// Result of parsing a command
pub enum CommandResult {
    /// Continue processing as normal input
    Continue(String),
    /// Command was handled, show output
    Handled(String),
    /// Exit the REPL
    Exit,
    /// Clear history
    Clear,
}

/// Parse and handle special commands
pub async fn handle_command(input: &str, coordinator: &mut Coordinator) -> Result<CommandResult> {
    let input = input.trim();
    let cmd = input.to_lowercase();

    match cmd.as_str() {
        "exit" | "quit" | "q" => Ok(CommandResult::Exit),

        "clear" | "reset" => {
            coordinator.clear_history();
            Ok(CommandResult::Clear)
        }

        "help" | "?" => Ok(CommandResult::Handled(help_text())),

        "status" => {
            let config = coordinator.config();
            let mut status = format!(
                "Herald Status:\n\
                 ─────────────────────────────\n\
                 Coordinator model: {}\n\
                 Scout model:       {}\n\
                 Summarizer model:  {}\n\
                 Speaker model:     {}\n\
                 Reddit tool:       {}\n\
                 TTS tool:          {}\n\
                 Memory:            {}\n\
                 History:           {} messages\n\
                 Debug:             {}",
                config.models.coordinator,
                config.models.scout,
                config.models.summarizer,
                config.models.speaker,
                if coordinator.has_reddit() {
                    "connected"
                } else {
                    "unavailable"
                },
                if coordinator.has_tts() {
                    "connected"
                } else {
                    "unavailable"
                },
                coordinator.memory_state(),
                coordinator.conversation_length(),
                if config.agent.debug { "on" } else { "off" }
            );
            status.push_str("\nAgents:");
            for (name, description) in coordinator.roster() {
                status.push_str(&format!("\n  {:14} {}", name, description));
            }
            Ok(CommandResult::Handled(status))
        }

        "debug" => {
            let new_state = !coordinator.config().agent.debug;
            coordinator.set_debug(new_state);
            Ok(CommandResult::Handled(format!(
                "Debug mode: {}",
                if new_state { "ON" } else { "OFF" }
            )))
        }

        _ if cmd.starts_with("model ") => {
            let model = input.split_once(' ').map(|(_, m)| m.trim()).unwrap_or("");
            if model.is_empty() {
                Ok(CommandResult::Handled(
                    "Usage: model <model-name>".to_string(),
                ))
            } else {
                coordinator.set_coordinator_model(model);
                Ok(CommandResult::Handled(format!(
                    "Coordinator model set to {}",
                    model
                )))
            }
        }

        _ => {
            if input.starts_with('/') {
                Ok(CommandResult::Handled(format!(
                    "Unknown command: {}. Type 'help' for available commands.",
                    cmd
                )))
            } else {
                Ok(CommandResult::Continue(input.to_string()))
            }
        }
    }
}

/// Generate help text
fn help_text() -> String {
    r#"Herald Commands:
─────────────────────────────────────────────
  help, ?          Show this help message
  exit, quit, q    Exit Herald
  clear, reset     Clear conversation history and memory
  status           Show models, tools, and routing state
  model <name>     Switch the coordinator model
  debug            Toggle debug mode

Try:
  "show me hot posts from r/golang"
  "summarize that"
  "read it to me"
─────────────────────────────────────────────"#
        .to_string()
}
