//! Résumé reviewers: pluggable backends that turn résumé text into feedback.
//!
//! `AppState` holds an `Arc<dyn ResumeReviewer>`; production wires `LlmResumeReviewer`.

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::feedback::models::ReviewOutput;
use crate::feedback::prompts::{REVIEW_PROMPT_TEMPLATE, REVIEW_SYSTEM};
use crate::llm_client::LlmClient;

#[async_trait]
pub trait ResumeReviewer: Send + Sync {
    async fn review(&self, resume_text: &str) -> Result<ReviewOutput, AppError>;
}

/// Reviews via the Anthropic Messages API.
pub struct LlmResumeReviewer(pub LlmClient);

#[async_trait]
impl ResumeReviewer for LlmResumeReviewer {
    async fn review(&self, resume_text: &str) -> Result<ReviewOutput, AppError> {
        let prompt = REVIEW_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        let output = self
            .0
            .call_json::<ReviewOutput>(&prompt, REVIEW_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Résumé review failed: {e}")))?;

        let output = check_review(output)?;
        info!(
            content = output.content.score(),
            presentation = output.presentation.score(),
            "Résumé review completed"
        );
        Ok(output)
    }
}

/// Rejects reviews that cannot be displayed.
pub fn check_review(output: ReviewOutput) -> Result<ReviewOutput, AppError> {
    if output.corrected_resume.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Review did not include a corrected résumé".to_string(),
        ));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::models::FeedbackCategory;

    fn output(corrected: &str) -> ReviewOutput {
        let category = FeedbackCategory {
            rating: 70.0,
            critique: vec![],
            suggestions: vec![],
        };
        ReviewOutput {
            content: category.clone(),
            presentation: category,
            corrected_resume: corrected.to_string(),
        }
    }

    #[test]
    fn test_blank_correction_is_rejected() {
        let err = check_review(output("  \n")).unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_non_blank_correction_passes() {
        assert!(check_review(output("# Jane Doe")).is_ok());
    }

    #[test]
    fn test_review_output_deserializes_from_model_json() {
        let json = r###"{
            "content": {"rating": 62, "critique": ["Vague bullets"], "suggestions": ["Add metrics"]},
            "presentation": {"rating": 81, "critique": [], "suggestions": ["Use consistent dates"]},
            "corrected_resume": "# John Doe\n## Professional Experience"
        }"###;
        let parsed: ReviewOutput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.content.score(), 62);
        assert_eq!(parsed.presentation.suggestions, vec!["Use consistent dates"]);
        assert!(parsed.corrected_resume.starts_with("# John Doe"));
    }

    #[test]
    fn test_prompt_template_has_placeholder() {
        assert!(REVIEW_PROMPT_TEMPLATE.contains("{resume_text}"));
    }
}
