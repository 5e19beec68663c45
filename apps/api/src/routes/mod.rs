pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::feedback::handlers as feedback;
use crate::jobs::handlers as jobs;
use crate::markup::handlers as markup;
use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Résumé upload + feedback
        .route("/api/v1/resumes", post(feedback::handle_upload))
        .route(
            "/api/v1/resumes/:id/feedback",
            get(feedback::handle_get_feedback),
        )
        // Recommended jobs
        .route("/api/v1/resumes/:id/jobs", get(jobs::handle_recommended_jobs))
        .route(
            "/api/v1/resumes/:id/jobs/:job_id",
            get(jobs::handle_job_detail),
        )
        .route("/api/v1/jobs/search", post(jobs::handle_search_jobs))
        // Ad-hoc diff rendering
        .route("/api/v1/diff", post(markup::handle_diff))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::feedback::models::{FeedbackCategory, ReviewOutput};
    use crate::feedback::reviewer::ResumeReviewer;
    use crate::feedback::store::ResumeStore;
    use crate::jobs::board::JobBoard;
    use crate::jobs::linkedin::JobSource;
    use crate::jobs::models::tests::sample_job;
    use crate::jobs::models::{Job, JobQuery};

    const BOUNDARY: &str = "resume-upload-boundary";

    /// Rewrites one known bullet; everything else is kept.
    struct FakeReviewer;

    #[async_trait]
    impl ResumeReviewer for FakeReviewer {
        async fn review(&self, resume_text: &str) -> Result<ReviewOutput, AppError> {
            Ok(ReviewOutput {
                content: FeedbackCategory {
                    rating: 58.0,
                    critique: vec!["Bullets lack measurable impact.".to_string()],
                    suggestions: vec!["Quantify each achievement.".to_string()],
                },
                presentation: FeedbackCategory {
                    rating: 82.0,
                    critique: vec![],
                    suggestions: vec!["Use consistent date formats.".to_string()],
                },
                corrected_resume: resume_text.replace("Wrote some code.", "Shipped 3 features."),
            })
        }
    }

    /// Serves two fixed postings, honouring `seen`.
    #[derive(Default)]
    struct FakeJobSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl JobSource for FakeJobSource {
        async fn search(&self, _query: &JobQuery, seen: &HashSet<u64>) -> Result<Vec<Job>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok([sample_job(4216497490), sample_job(4216497491)]
                .into_iter()
                .filter(|j| !seen.contains(&j.id))
                .collect())
        }
    }

    fn test_state() -> AppState {
        AppState {
            config: Config::default(),
            reviewer: Arc::new(FakeReviewer),
            job_source: Arc::new(FakeJobSource::default()),
            resumes: ResumeStore::default(),
            jobs: JobBoard::default(),
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn upload_request(field: &str, file_name: &str, content_type: &str, data: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n\
             {data}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/v1/resumes")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn upload_sample(app: &Router) -> String {
        let resume = "# John Doe\n\n## Experience\n- Wrote some code.\n- Fixed bugs sometimes.";
        let (status, body) = send(app, upload_request("file", "resume.md", "text/markdown", resume)).await;
        assert_eq!(status, StatusCode::CREATED);
        body["resume_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let (status, body) = send(&app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_upload_then_fetch_feedback() {
        let app = build_router(test_state());
        let resume_id = upload_sample(&app).await;

        let (status, body) = send(&app, get_request(&format!("/api/v1/resumes/{resume_id}/feedback"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume_id"], resume_id.as_str());
        assert_eq!(body["file_name"], "resume.md");
        assert_eq!(body["content"]["score"], 58);
        assert_eq!(body["content"]["band"], "fair");
        assert_eq!(body["presentation"]["band"], "strong");

        let markdown = body["resumes"]["displayed_markdown"].as_str().unwrap();
        assert!(markdown.starts_with("# John Doe"));
        assert!(markdown.contains(r#"<span class="diff-added">"#));
        assert!(markdown.contains(r#"<del class="diff-removed">"#));
        assert!(markdown.contains("- Fixed bugs sometimes."));
        assert_eq!(
            body["resumes"]["corrected_resume"],
            "# John Doe\n\n## Experience\n- Shipped 3 features.\n- Fixed bugs sometimes."
        );
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_type() {
        let app = build_router(test_state());
        let (status, body) = send(
            &app,
            upload_request("file", "resume.docx", "application/msword", "binary"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Invalid file type. Please upload a PDF.");
    }

    #[tokio::test]
    async fn test_upload_requires_file_field() {
        let app = build_router(test_state());
        let (status, body) = send(
            &app,
            upload_request("attachment", "resume.md", "text/markdown", "# Jane"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_file() {
        let mut state = test_state();
        state.config.max_upload_bytes = 16;
        let app = build_router(state);
        let (status, body) = send(
            &app,
            upload_request("file", "resume.txt", "text/plain", &"x".repeat(64)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_rejects_blank_text() {
        let app = build_router(test_state());
        let (status, body) = send(&app, upload_request("file", "resume.txt", "text/plain", "   ")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_feedback_for_unknown_resume_is_404() {
        let app = build_router(test_state());
        let uri = format!("/api/v1/resumes/{}/feedback", uuid::Uuid::new_v4());
        let (status, body) = send(&app, get_request(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Feedback not found for this resume.");
    }

    #[tokio::test]
    async fn test_diff_endpoint_word_and_char() {
        let app = build_router(test_state());

        let (status, body) = send(
            &app,
            json_request("/api/v1/diff", json!({"original": "old", "corrected": "new"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["markup"],
            r#"<del class="diff-removed">old</del><span class="diff-added">new</span>"#
        );
        assert_eq!(body["granularity"], "word");

        let (_, body) = send(
            &app,
            json_request(
                "/api/v1/diff",
                json!({"original": "cat", "corrected": "cut", "granularity": "char"}),
            ),
        )
        .await;
        assert_eq!(
            body["markup"],
            r#"c<del class="diff-removed">a</del><span class="diff-added">u</span>t"#
        );
    }

    #[tokio::test]
    async fn test_large_diff_does_not_stall_health() {
        let app = build_router(test_state());
        let original: String = (0..15_000).map(|i| format!("alpha{i} ")).collect();
        let corrected: String = (0..15_000).map(|i| format!("omega{i} ")).collect();

        let diff_app = app.clone();
        let diff = tokio::spawn(async move {
            send(
                &diff_app,
                json_request(
                    "/api/v1/diff",
                    json!({"original": original, "corrected": corrected}),
                ),
            )
            .await
        });
        tokio::task::yield_now().await;

        let (status, _) = send(&app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!diff.is_finished());

        let (status, body) = diff.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(body["markup"].as_str().unwrap().contains("omega14999"));
    }

    #[tokio::test]
    async fn test_diff_endpoint_identity_and_empty() {
        let app = build_router(test_state());
        let (_, body) = send(
            &app,
            json_request("/api/v1/diff", json!({"original": "", "corrected": ""})),
        )
        .await;
        assert_eq!(body["markup"], "");

        let (_, body) = send(
            &app,
            json_request(
                "/api/v1/diff",
                json!({"original": "a <b> c", "corrected": "a <b> c"}),
            ),
        )
        .await;
        assert_eq!(body["markup"], "a <b> c");
    }

    #[tokio::test]
    async fn test_job_search_validates_query() {
        let app = build_router(test_state());
        let (status, body) = send(
            &app,
            json_request("/api/v1/jobs/search", json!({"keyword": " ", "location": "Berlin"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "keyword cannot be empty");
    }

    #[tokio::test]
    async fn test_job_search_fills_board_once() {
        let source = Arc::new(FakeJobSource::default());
        let mut state = test_state();
        state.job_source = source.clone();
        let app = build_router(state.clone());

        let query = json!({"keyword": "frontend", "location": "Malaysia", "start": 0});
        let (status, body) = send(&app, json_request("/api/v1/jobs/search", query.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["details"].as_array().unwrap().len(), 2);

        let (_, body) = send(&app, json_request("/api/v1/jobs/search", query)).await;
        assert!(body["details"].as_array().unwrap().is_empty());

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(state.jobs.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_recommended_jobs_and_detail() {
        let state = test_state();
        state
            .jobs
            .add_all([sample_job(4216497490), sample_job(4216497491)])
            .await;
        let app = build_router(state);
        let resume_id = upload_sample(&app).await;

        let (status, body) = send(&app, get_request(&format!("/api/v1/resumes/{resume_id}/jobs"))).await;
        assert_eq!(status, StatusCode::OK);
        let jobs = body.as_array().unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0]["id"], 4216497490u64);
        assert_eq!(jobs[0]["Employment type"], "Full-time");
        assert!(jobs[0]["apply_url"].as_str().unwrap().starts_with("https://"));

        let (status, body) = send(
            &app,
            get_request(&format!("/api/v1/resumes/{resume_id}/jobs/4216497491")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Frontend Web Developer");

        let (status, body) = send(&app, get_request(&format!("/api/v1/resumes/{resume_id}/jobs/1"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Job not found.");
    }

    #[tokio::test]
    async fn test_jobs_for_unknown_resume_is_404() {
        let app = build_router(test_state());
        let uri = format!("/api/v1/resumes/{}/jobs", uuid::Uuid::new_v4());
        let (status, _) = send(&app, get_request(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
