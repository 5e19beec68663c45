//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::models::{Job, JobQuery, JobView};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub details: Vec<Job>,
}

/// POST /api/v1/jobs/search
///
/// Pulls fresh postings from the job source and adds them to the board.
/// Jobs already on the board are not fetched again.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Json(query): Json<JobQuery>,
) -> Result<Json<JobSearchResponse>, AppError> {
    query.validate()?;

    let seen = state.jobs.seen_ids().await;
    let details = state.job_source.search(&query, &seen).await?;
    let added = state.jobs.add_all(details.iter().cloned()).await;

    info!(found = details.len(), added, "Job search completed");
    Ok(Json(JobSearchResponse { details }))
}

/// GET /api/v1/resumes/:id/jobs
pub async fn handle_recommended_jobs(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<Vec<JobView>>, AppError> {
    state.resumes.require(resume_id).await?;
    let jobs = state.jobs.list().await;
    Ok(Json(jobs.into_iter().map(JobView::from).collect()))
}

/// GET /api/v1/resumes/:id/jobs/:job_id
pub async fn handle_job_detail(
    State(state): State<AppState>,
    Path((resume_id, job_id)): Path<(Uuid, u64)>,
) -> Result<Json<JobView>, AppError> {
    state.resumes.require(resume_id).await?;
    let job = state
        .jobs
        .get(job_id)
        .await
        .ok_or_else(|| AppError::NotFound("Job not found.".to_string()))?;
    Ok(Json(JobView::from(job)))
}
