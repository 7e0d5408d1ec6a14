use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use folio_core::config::SiteConfig;
use folio_core::content::{
    case_summaries, find_case_study, find_post, post_summaries, sitemap_xml, BlogPost, CaseStudy,
    CaseSummary, PostSummary,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/blog", get(list_posts))
        .route("/blog/{slug}", get(get_post))
        .route("/projects", get(list_case_studies))
        .route("/projects/{slug}", get(get_case_study))
        .route("/site", get(site))
}

pub async fn list_posts() -> Json<Vec<PostSummary>> {
    Json(post_summaries())
}

pub async fn get_post(Path(slug): Path<String>) -> Result<Json<BlogPost>, StatusCode> {
    find_post(&slug).copied().map(Json).ok_or(StatusCode::NOT_FOUND)
}

pub async fn list_case_studies() -> Json<Vec<CaseSummary>> {
    Json(case_summaries())
}

pub async fn get_case_study(Path(slug): Path<String>) -> Result<Json<CaseStudy>, StatusCode> {
    find_case_study(&slug)
        .copied()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn site(State(state): State<AppState>) -> Json<SiteConfig> {
    Json(state.config.site.clone())
}

pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap_xml(&state.config.site.url),
    )
}
