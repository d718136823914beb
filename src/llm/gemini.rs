//! Gemini client implementation
//!
//! Async HTTP client for the Google Generative Language API with tool
//! calling support. The API key is supplied by the central credential
//! store; an empty key is sent as-is and rejected by the endpoint at call
//! time rather than at construction.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{Config, HeraldError, Message, Result, ToolCall, ToolDefinition};
use crate::llm::traits::{GenerateOptions, LLMProvider, LLMResponse, TokenUsage};

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
    debug: bool,
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTools>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// System instruction wrapper
#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

/// A content block in the conversation
#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

/// One part of a content block: text or a function call
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCallPart>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            function_call: None,
        }
    }
}

/// Function call emitted by the model
#[derive(Debug, Serialize, Deserialize)]
struct FunctionCallPart {
    name: String,
    #[serde(default)]
    args: serde_json::Value,
}

/// Tool declarations for the request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTools {
    function_declarations: Vec<FunctionDeclaration>,
}

/// A single function declaration
#[derive(Debug, Serialize)]
struct FunctionDeclaration {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

/// Generation parameters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

/// One response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

/// Token accounting from the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

impl GeminiClient {
    /// Create a new Gemini client from configuration
    pub fn from_config(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.gemini.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_base: config.gemini.api_base.clone(),
            api_key: config.credentials.google_api_key.clone(),
            debug: config.agent.debug,
        }
    }

    /// Build the request body from messages and tool definitions
    fn build_request(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        options: Option<GenerateOptions>,
    ) -> GenerateContentRequest {
        let mut system_parts: Vec<Part> = Vec::new();
        let mut contents: Vec<Content> = Vec::new();

        for message in messages {
            match message.role.as_str() {
                "system" => system_parts.push(Part::text(&message.content)),
                "assistant" => {
                    let mut parts = Vec::new();
                    if !message.content.is_empty() {
                        parts.push(Part::text(&message.content));
                    }
                    if let Some(calls) = &message.tool_calls {
                        for call in calls {
                            parts.push(Part {
                                text: None,
                                function_call: Some(FunctionCallPart {
                                    name: call.name.clone(),
                                    args: call.arguments.clone(),
                                }),
                            });
                        }
                    }
                    contents.push(Content {
                        role: Some("model".to_string()),
                        parts,
                    });
                }
                // Tool results travel back to the model as user-role text
                "tool" => contents.push(Content {
                    role: Some("user".to_string()),
                    parts: vec![Part::text(format!("Tool result: {}", message.content))],
                }),
                _ => contents.push(Content {
                    role: Some("user".to_string()),
                    parts: vec![Part::text(&message.content)],
                }),
            }
        }

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(SystemInstruction {
                parts: system_parts,
            })
        };

        let tools = if tools.is_empty() {
            None
        } else {
            Some(vec![GeminiTools {
                function_declarations: tools
                    .iter()
                    .map(|t| FunctionDeclaration {
                        name: t.function.name.clone(),
                        description: t.function.description.clone(),
                        parameters: t.function.parameters.clone(),
                    })
                    .collect(),
            }])
        };

        let generation_config = options.map(|o| GenerationConfig {
            temperature: o.temperature,
            max_output_tokens: o.max_tokens,
        });

        GenerateContentRequest {
            contents,
            system_instruction,
            tools,
            generation_config,
        }
    }

    /// Send a generateContent request and parse the response
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<LLMResponse> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, model, self.api_key
        );

        if self.debug {
            eprintln!(
                "DEBUG: Gemini request to {} with {} content block(s)",
                model,
                request.contents.len()
            );
        }

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HeraldError::llm(format!(
                "Gemini API returned {}: {}",
                status, body
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| HeraldError::llm("Gemini response contained no candidates"))?;

        let mut content = String::new();
        let mut tool_calls = Vec::new();

        if let Some(body) = candidate.content {
            for part in body.parts {
                if let Some(text) = part.text {
                    content.push_str(&text);
                }
                if let Some(call) = part.function_call {
                    tool_calls.push(ToolCall::new(call.name, call.args));
                }
            }
        }

        let usage = parsed.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(LLMResponse {
            content,
            tool_calls,
            usage,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl LLMProvider for GeminiClient {
    async fn chat(
        &self,
        model: &str,
        messages: &[Message],
        options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        let request = self.build_request(messages, &[], options);
        self.generate(model, request).await
    }

    async fn chat_with_tools(
        &self,
        model: &str,
        messages: &[Message],
        tools: &[ToolDefinition],
        options: Option<GenerateOptions>,
    ) -> Result<LLMResponse> {
        let request = self.build_request(messages, tools, options);
        self.generate(model, request).await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GeminiClient {
        let mut config = Config::default();
        config.credentials.google_api_key = "test-key".to_string();
        GeminiClient::from_config(&config)
    }

    #[test]
    fn test_build_request_separates_system_prompt() {
        let client = test_client();
        let messages = vec![Message::system("You route requests"), Message::user("hi")];
        let request = client.build_request(&messages, &[], None);

        assert!(request.system_instruction.is_some());
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role.as_deref(), Some("user"));
    }

    #[test]
    fn test_build_request_declares_tools() {
        let client = test_client();
        let tools = vec![ToolDefinition::function(
            "fetch_reddit_hot_threads",
            "Fetch hot threads",
            serde_json::json!({"type": "object"}),
        )];
        let request = client.build_request(&[Message::user("go")], &tools, None);

        let declared = request.tools.unwrap();
        assert_eq!(declared[0].function_declarations.len(), 1);
        assert_eq!(
            declared[0].function_declarations[0].name,
            "fetch_reddit_hot_threads"
        );
    }

    #[test]
    fn test_parse_function_call_part() {
        let json = r#"{"candidates":[{"content":{"role":"model","parts":[
            {"functionCall":{"name":"text_to_speech","args":{"text":"hi","voice_name":"Will"}}}
        ]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let parts = &parsed.candidates[0].content.as_ref().unwrap().parts;
        assert_eq!(
            parts[0].function_call.as_ref().unwrap().name,
            "text_to_speech"
        );
    }
}
