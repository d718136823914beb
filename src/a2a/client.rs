//! HTTP client for driving a remote agent over the A2A surface

use reqwest::Client;
use tokio::sync::OnceCell;

use crate::a2a::types::{AgentCard, RunRequest, RunResponse};
use crate::core::{HeraldError, Result};

/// Client for one remote A2A agent
pub struct A2aClient {
    base_url: String,
    http: Client,
    /// Card is fetched once and cached for the client's lifetime
    card: OnceCell<AgentCard>,
}

impl A2aClient {
    /// Create a client for the agent at the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
            card: OnceCell::new(),
        }
    }

    /// Fetch the remote agent's card, cached after the first call
    pub async fn card(&self) -> Result<&AgentCard> {
        self.card
            .get_or_try_init(|| async {
                let url = format!("{}/.well-known/agent.json", self.base_url);
                let response = self.http.get(&url).send().await?;

                if !response.status().is_success() {
                    return Err(HeraldError::a2a(format!(
                        "agent card request returned {}",
                        response.status()
                    )));
                }

                Ok(response.json().await?)
            })
            .await
    }

    /// Send one message to the agent's `/run` endpoint
    pub async fn run(&self, message: &str, session_id: Option<&str>) -> Result<RunResponse> {
        let request = RunRequest {
            message: message.to_string(),
            context: serde_json::json!({}),
            session_id: session_id.map(String::from),
        };

        let url = format!("{}/run", self.base_url);
        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HeraldError::a2a(format!(
                "run request returned {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}
