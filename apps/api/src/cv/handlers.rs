use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cv::assembler::{assemble_cv, CvDocument};
use crate::cv::render::{render_markdown, CvTemplate};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TemplateQuery {
    #[serde(default)]
    pub template: CvTemplate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CvPreviewResponse {
    pub template: CvTemplate,
    pub template_label: String,
    pub markdown: String,
}

async fn current_cv(state: &AppState) -> CvDocument {
    let session = state.session.read().await;
    assemble_cv(session.profile(), session.publications())
}

/// GET /api/v1/cv
pub async fn handle_get_cv(State(state): State<AppState>) -> Json<CvDocument> {
    Json(current_cv(&state).await)
}

/// GET /api/v1/cv/preview?template=apa|ieee|compact
pub async fn handle_preview_cv(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> Json<CvPreviewResponse> {
    let doc = current_cv(&state).await;
    Json(CvPreviewResponse {
        template: query.template,
        template_label: query.template.label().to_string(),
        markdown: render_markdown(&doc, query.template),
    })
}

/// GET /api/v1/cv/download?template=apa|ieee|compact
///
/// Markdown file download. Binary document export is not offered.
pub async fn handle_download_cv(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> impl IntoResponse {
    let doc = current_cv(&state).await;
    info!(
        "CV download ({:?}, {} entries)",
        query.template,
        doc.entry_count()
    );
    (
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"cv.md\""),
        ],
        render_markdown(&doc, query.template),
    )
}
