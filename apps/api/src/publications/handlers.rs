use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::publication::{Attachment, NewPublication, Publication, Visibility};
use crate::publications::import::{parse_bibliography, SkippedRecord};
use crate::publications::share::{share_links, ShareLinks};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Serialize, Deserialize)]
pub struct VisibilityRequest {
    pub visibility: Visibility,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: Vec<Publication>,
    pub skipped: Vec<SkippedRecord>,
}

struct UploadedFile {
    file_name: String,
    content_type: String,
    data: Bytes,
}

/// Pulls the `file` field out of a multipart body, ignoring other fields.
async fn read_upload(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(header_safe)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = servable_content_type(field.content_type());
        let data = field.bytes().await?;
        return Ok(UploadedFile {
            file_name,
            content_type,
            data,
        });
    }
    Err(AppError::Validation(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// The stored type is echoed as `Content-Type` on download, so it must be a
/// valid header value.
fn servable_content_type(declared: Option<&str>) -> String {
    declared
        .map(str::trim)
        .filter(|ct| !ct.is_empty() && HeaderValue::from_str(ct).is_ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

/// File names end up in a `Content-Disposition` header.
fn header_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// GET /api/v1/publications
pub async fn handle_list_publications(State(state): State<AppState>) -> Json<Vec<Publication>> {
    let session = state.session.read().await;
    Json(session.publications().to_vec())
}

/// POST /api/v1/publications
pub async fn handle_create_publication(
    State(state): State<AppState>,
    Json(new): Json<NewPublication>,
) -> Result<(StatusCode, Json<Publication>), AppError> {
    let mut session = state.session.write().await;
    let created = session.add_publication(new)?.clone();
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/v1/publications/:id
///
/// The path id wins over any id in the body.
pub async fn handle_update_publication(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut publication): Json<Publication>,
) -> Result<Json<Publication>, AppError> {
    publication.id = id;
    let mut session = state.session.write().await;
    let updated = session.update_publication(publication)?.clone();
    Ok(Json(updated))
}

/// PATCH /api/v1/publications/:id/visibility
pub async fn handle_set_visibility(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<VisibilityRequest>,
) -> Result<Json<Publication>, AppError> {
    let mut session = state.session.write().await;
    let updated = session
        .set_publication_visibility(&id, request.visibility)?
        .clone();
    info!("Publication {id} visibility set to {:?}", request.visibility);
    Ok(Json(updated))
}

/// POST /api/v1/publications/:id/files
pub async fn handle_upload_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Attachment>), AppError> {
    // Fail fast before buffering the body for an unknown publication.
    state.session.read().await.publication(&id)?;

    let upload = read_upload(&mut multipart).await?;
    let attachment = Attachment {
        id: format!("file-{}", Uuid::new_v4().simple()),
        file_name: upload.file_name,
        content_type: upload.content_type,
        size: upload.data.len(),
        uploaded_at: Utc::now(),
        data: upload.data,
    };

    let mut session = state.session.write().await;
    let stored = session.attach_file(&id, attachment)?.clone();
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /api/v1/publications/:id/files/:file_id
pub async fn handle_download_file(
    State(state): State<AppState>,
    Path((id, file_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session.read().await;
    let file = session.attachment(&id, &file_id)?;
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.clone()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.data.clone(),
    ))
}

/// GET /api/v1/publications/:id/share
pub async fn handle_share_links(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ShareLinks>, AppError> {
    let session = state.session.read().await;
    let publication = session.publication(&id)?;
    Ok(Json(share_links(&state.config.public_base_url, publication)?))
}

/// POST /api/v1/publications/import
///
/// Accepts a `.bib` or `.ris` file. Unusable records are listed as skipped;
/// the rest are added with the first record on top.
pub async fn handle_import_publications(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    let outcome = parse_bibliography(&upload.file_name, &upload.data)?;

    let mut session = state.session.write().await;
    let imported = session.add_publications(outcome.publications)?;
    info!(
        "Imported {} publications from {} ({} skipped)",
        imported.len(),
        upload.file_name,
        outcome.skipped.len()
    );
    Ok(Json(ImportResponse {
        imported,
        skipped: outcome.skipped,
    }))
}
