pub mod activity;
pub mod assistant;
pub mod chat;
pub mod contact;
pub mod content;
pub mod games;
pub mod heatmap;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// `legacy_chat_routes` swaps the chat and assistant paths for front ends
/// that post direct questions to `/chat`.
pub fn api_router(legacy_chat_routes: bool) -> Router<AppState> {
    let (chat_path, assistant_path) = if legacy_chat_routes {
        ("/assistant", "/chat")
    } else {
        ("/chat", "/assistant")
    };

    Router::new()
        .merge(chat::router_at(chat_path))
        .merge(assistant::router_at(assistant_path))
        .merge(contact::router())
        .merge(activity::router())
        .merge(heatmap::router())
        .merge(content::router())
        .merge(settings::router())
        .nest("/games", games::router())
}
