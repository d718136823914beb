//! Wire types for the agent-to-agent HTTP surface
//!
//! An agent served over A2A publishes its metadata at
//! `/.well-known/agent.json` and accepts work at `POST /run`.

use serde::{Deserialize, Serialize};

/// Agent metadata served at `/.well-known/agent.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub version: String,
    /// Endpoint names (without leading slash) the agent accepts
    #[serde(default)]
    pub endpoints: Vec<String>,
}

/// Request body for `POST /run`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    pub message: String,
    /// Free-form caller context (e.g. a user id)
    #[serde(default)]
    pub context: serde_json::Value,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body from `POST /run`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResponse {
    pub message: String,
    #[serde(default)]
    pub data: RunData,
}

/// Structured payload accompanying a run response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunData {
    /// Path or URL of a synthesized audio file, when one was produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// Pull the backticked file path out of a speaker reply.
///
/// The speaker instruction pins the format "...saved at \`/path/file.mp3\`"
/// with only the path inside backticks.
pub fn extract_audio_path(reply: &str) -> Option<String> {
    let start = reply.find('`')? + 1;
    let rest = &reply[start..];
    let end = rest.find('`')?;
    let path = rest[..end].trim();

    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_audio_path() {
        let reply =
            "I've converted your text to speech. The audio file is saved at `/tmp/out.mp3`";
        assert_eq!(extract_audio_path(reply).as_deref(), Some("/tmp/out.mp3"));
    }

    #[test]
    fn test_extract_audio_path_absent() {
        assert!(extract_audio_path("the TTS tool returned an error").is_none());
        assert!(extract_audio_path("empty ticks ``").is_none());
    }

    #[test]
    fn test_run_request_defaults() {
        let request: RunRequest = serde_json::from_str(r#"{"message":"say hi"}"#).unwrap();
        assert_eq!(request.message, "say hi");
        assert!(request.session_id.is_none());
    }
}
