use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::markup::{transform_blocking, Granularity};

#[derive(Debug, Deserialize)]
pub struct DiffRequest {
    pub original: String,
    pub corrected: String,
    #[serde(default)]
    pub granularity: Granularity,
}

#[derive(Debug, Serialize)]
pub struct DiffResponse {
    pub markup: String,
    pub granularity: Granularity,
}

/// POST /api/v1/diff
///
/// Renders an arbitrary (original, corrected) pair. Every pair of strings is accepted. The diff runs on the blocking pool.
pub async fn handle_diff(Json(req): Json<DiffRequest>) -> Result<Json<DiffResponse>, AppError> {
    let granularity = req.granularity;
    let markup = transform_blocking(req.original, req.corrected, granularity).await?;
    Ok(Json(DiffResponse {
        markup,
        granularity,
    }))
}
