use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use folio_schema::{ChatRequest, ChatResponse};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    router_at("/assistant")
}

pub fn router_at(path: &str) -> Router<AppState> {
    Router::new().route(path, post(assistant))
}

/// Free-form model answer. Upstream error statuses are passed through.
pub async fn assistant(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> (StatusCode, Json<ChatResponse>) {
    let answer = state.responder.assist(&body.message).await;
    let status = StatusCode::from_u16(answer.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ChatResponse {
        reply: answer.reply,
    }))
}
