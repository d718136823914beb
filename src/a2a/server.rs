//! Serves one leaf agent as a standalone A2A HTTP service

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::a2a::types::{extract_audio_path, AgentCard, RunData, RunRequest, RunResponse};
use crate::agent::LeafAgent;
use crate::core::Result;

/// One agent exposed over the A2A surface
pub struct AgentService {
    agent: LeafAgent,
    card: AgentCard,
}

impl AgentService {
    /// Wrap an agent; the card is derived from the agent itself
    pub fn new(agent: LeafAgent) -> Self {
        let card = AgentCard {
            name: agent.name().to_string(),
            description: agent.description().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: vec!["run".to_string()],
        };

        Self { agent, card }
    }
}

/// Build the service router: the card endpoint and `/run`
pub fn router(service: Arc<AgentService>) -> Router {
    Router::new()
        .route("/.well-known/agent.json", get(agent_card))
        .route("/run", post(run))
        .with_state(service)
}

async fn agent_card(State(service): State<Arc<AgentService>>) -> Json<AgentCard> {
    Json(service.card.clone())
}

async fn run(
    State(service): State<Arc<AgentService>>,
    Json(request): Json<RunRequest>,
) -> std::result::Result<Json<RunResponse>, (StatusCode, String)> {
    let outcome = service
        .agent
        .run(&request.message)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let message = outcome.into_text();
    let audio_url = extract_audio_path(&message);

    Ok(Json(RunResponse {
        message,
        data: RunData { audio_url },
    }))
}

/// Serve the agent on the given port until the process exits
pub async fn serve(agent: LeafAgent, port: u16) -> Result<()> {
    let service = Arc::new(AgentService::new(agent));
    let name = service.card.name.clone();
    let app = router(service);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    println!("Agent '{}' listening on {}", name, addr);

    axum::serve(listener, app).await?;
    Ok(())
}
