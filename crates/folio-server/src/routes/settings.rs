use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use folio_core::{Settings, SettingsDir, SettingsError, SettingsStore};
use folio_schema::ErrorBody;

use crate::state::AppState;

/// Client-chosen id that selects the caller's settings document.
pub const VISITOR_HEADER: &str = "x-visitor-id";

pub fn router() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).put(put_settings))
}

type SettingsResult = Result<Json<Settings>, (StatusCode, Json<ErrorBody>)>;

/// The caller's store, or `None` when the request carries no visitor id.
pub(crate) fn visitor_settings(
    settings: &SettingsDir,
    headers: &HeaderMap,
) -> Result<Option<SettingsStore>, SettingsError> {
    let Some(value) = headers.get(VISITOR_HEADER) else {
        return Ok(None);
    };
    let Ok(id) = value.to_str() else {
        return Err(SettingsError::InvalidVisitor(
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        ));
    };
    settings.visitor(id.trim()).map(Some)
}

/// Anonymous callers get the defaults.
pub async fn get_settings(State(state): State<AppState>, headers: HeaderMap) -> SettingsResult {
    match visitor_settings(&state.settings, &headers).map_err(settings_error)? {
        Some(store) => store.load().map(Json).map_err(settings_error),
        None => Ok(Json(Settings::default())),
    }
}

/// Replaces the caller's whole document. Older layouts are migrated before
/// saving; anonymous writes are refused.
pub async fn put_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> SettingsResult {
    let Some(store) = visitor_settings(&state.settings, &headers).map_err(settings_error)? else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new(format!("missing {VISITOR_HEADER} header"))),
        ));
    };
    let settings = Settings::from_value(body).map_err(settings_error)?;
    store.save(&settings).map_err(settings_error)?;
    Ok(Json(settings))
}

pub(crate) fn settings_error(err: SettingsError) -> (StatusCode, Json<ErrorBody>) {
    let status = match err {
        SettingsError::Io { .. } => {
            tracing::error!("Settings store failure: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorBody::new(err.to_string())))
}
