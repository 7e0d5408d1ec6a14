use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use folio_core::fetch_activity;
use folio_schema::{ActivityQuery, ActivityResponse};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/github-activity", get(github_activity))
}

/// Public GitHub events per day over the last 30 UTC days.
pub async fn github_activity(
    State(state): State<AppState>,
    Query(params): Query<ActivityQuery>,
) -> (StatusCode, Json<ActivityResponse>) {
    let user = params
        .user
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| state.config.github.default_user.clone());

    match fetch_activity(&state.github, &user).await {
        Ok(days) => (StatusCode::OK, Json(ActivityResponse::days(days))),
        Err(e) => {
            tracing::warn!("GitHub activity for {user} failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ActivityResponse::failed("github_error")),
            )
        }
    }
}
