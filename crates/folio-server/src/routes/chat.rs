use axum::{extract::State, routing::post, Json, Router};
use folio_schema::{ChatRequest, ChatResponse};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    router_at("/chat")
}

pub fn router_at(path: &str) -> Router<AppState> {
    Router::new().route(path, post(chat))
}

/// Canned persona reply, tone-polished when the model answers. Always 200.
pub async fn chat(State(state): State<AppState>, Json(body): Json<ChatRequest>) -> Json<ChatResponse> {
    let reply = state.responder.reply(&body.message).await;
    tracing::debug!(
        "Chat intent {:?}, polished: {}",
        reply.category,
        reply.polished.is_some()
    );
    Json(ChatResponse {
        reply: reply.text().to_string(),
    })
}
