use std::sync::Arc;

use crate::config::Config;
use crate::feedback::reviewer::ResumeReviewer;
use crate::feedback::store::ResumeStore;
use crate::jobs::board::JobBoard;
use crate::jobs::linkedin::JobSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable reviewer. Default: LlmResumeReviewer.
    pub reviewer: Arc<dyn ResumeReviewer>,
    /// Pluggable job source. Default: LinkedInJobSource.
    pub job_source: Arc<dyn JobSource>,
    pub resumes: ResumeStore,
    pub jobs: JobBoard,
}
