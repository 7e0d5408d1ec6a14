use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Local;
use folio_core::{build_heatmap, HeatmapSpec};
use folio_schema::{ErrorBody, HeatmapQuery, HeatmapResponse};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/heatmap", get(heatmap))
}

/// Decorative activity grid ending today (server local time). Query values
/// override the configured seed, width and week start.
pub async fn heatmap(
    State(state): State<AppState>,
    Query(params): Query<HeatmapQuery>,
) -> Result<Json<HeatmapResponse>, (StatusCode, Json<ErrorBody>)> {
    let defaults = &state.config.heatmap;
    let spec = HeatmapSpec {
        // Signed seeds keep their low 32 bits: -5 and 4294967291 are one seed.
        seed: params.seed.map(|s| s as u32).unwrap_or(defaults.seed),
        weeks: params.weeks.unwrap_or(defaults.weeks),
        start: params.start.unwrap_or(defaults.start),
    };

    build_heatmap(spec, Local::now().date_naive())
        .map(|map| Json(map.to_response()))
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorBody::new(e.to_string()))))
}
