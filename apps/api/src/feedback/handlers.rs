//! Axum route handlers for the Feedback API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::extract::{extract_text, UploadKind};
use crate::feedback::models::{FullResumeFeedback, ResumeRecord};
use crate::state::AppState;

/// Multipart field carrying the résumé file.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub resume_id: Uuid,
}

/// POST /api/v1/resumes
///
/// Accepts a PDF (or plain-text / Markdown) résumé, runs the review and stores the result.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("resume").to_string();
        let kind = UploadKind::detect(&file_name, field.content_type())?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;

        if data.len() > state.config.max_upload_bytes {
            return Err(AppError::Validation(format!(
                "File exceeds the {} byte upload limit",
                state.config.max_upload_bytes
            )));
        }

        info!(file_name = %file_name, bytes = data.len(), "Received résumé upload");

        let original = extract_text(kind, data).await?;
        let review = state.reviewer.review(&original).await?;
        let record = tokio::task::spawn_blocking(move || {
            ResumeRecord::new(file_name, original, review)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in diff: {e}")))?;
        let resume_id = state.resumes.insert(record).await;

        info!(%resume_id, "Résumé reviewed and stored");
        return Ok((StatusCode::CREATED, Json(UploadResponse { resume_id })));
    }

    Err(AppError::Validation(format!(
        "Missing '{FILE_FIELD}' field in upload"
    )))
}

/// GET /api/v1/resumes/:id/feedback
pub async fn handle_get_feedback(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<FullResumeFeedback>, AppError> {
    let record = state.resumes.require(resume_id).await?;
    Ok(Json(FullResumeFeedback::from(&record)))
}
