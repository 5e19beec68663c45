use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::markup::transform;

/// Ratings at or above this are `Strong`.
pub const STRONG_THRESHOLD: u8 = 75;
/// Ratings at or above this (and below `STRONG_THRESHOLD`) are `Fair`.
pub const FAIR_THRESHOLD: u8 = 50;

/// One reviewed dimension of a résumé (content or presentation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackCategory {
    /// 0 – 100 as reported by the reviewer; may be fractional or out of range.
    pub rating: f64,
    #[serde(default)]
    pub critique: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    Strong,
    Fair,
    Weak,
}

impl RatingBand {
    pub fn from_score(score: u8) -> Self {
        if score >= STRONG_THRESHOLD {
            RatingBand::Strong
        } else if score >= FAIR_THRESHOLD {
            RatingBand::Fair
        } else {
            RatingBand::Weak
        }
    }
}

impl FeedbackCategory {
    /// Rating rounded to the nearest integer and clamped into 0 – 100.
    pub fn score(&self) -> u8 {
        self.rating.round().clamp(0.0, 100.0) as u8
    }

    pub fn band(&self) -> RatingBand {
        RatingBand::from_score(self.score())
    }
}

/// What a reviewer hands back for one résumé.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewOutput {
    pub content: FeedbackCategory,
    pub presentation: FeedbackCategory,
    pub corrected_resume: String,
}

/// A reviewed résumé. Immutable once stored; the displayed markdown is computed
/// once here so repeated feedback reads never re-run the diff.
#[derive(Debug, Clone)]
pub struct ResumeRecord {
    pub id: Uuid,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub original_resume: String,
    pub corrected_resume: String,
    pub displayed_markdown: String,
    pub content: FeedbackCategory,
    pub presentation: FeedbackCategory,
}

impl ResumeRecord {
    pub fn new(file_name: String, original_resume: String, review: ReviewOutput) -> Self {
        let displayed_markdown = transform(&original_resume, &review.corrected_resume);
        Self {
            id: Uuid::new_v4(),
            file_name,
            uploaded_at: Utc::now(),
            original_resume,
            corrected_resume: review.corrected_resume,
            displayed_markdown,
            content: review.content,
            presentation: review.presentation,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CategoryReport {
    #[serde(flatten)]
    pub category: FeedbackCategory,
    pub score: u8,
    pub band: RatingBand,
}

impl From<&FeedbackCategory> for CategoryReport {
    fn from(category: &FeedbackCategory) -> Self {
        Self {
            score: category.score(),
            band: category.band(),
            category: category.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResumeTexts {
    pub original_resume: String,
    pub corrected_resume: String,
    pub displayed_markdown: String,
}

#[derive(Debug, Serialize)]
pub struct FullResumeFeedback {
    pub resume_id: Uuid,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub content: CategoryReport,
    pub presentation: CategoryReport,
    pub resumes: ResumeTexts,
}

impl From<&Arc<ResumeRecord>> for FullResumeFeedback {
    fn from(record: &Arc<ResumeRecord>) -> Self {
        Self {
            resume_id: record.id,
            file_name: record.file_name.clone(),
            uploaded_at: record.uploaded_at,
            content: CategoryReport::from(&record.content),
            presentation: CategoryReport::from(&record.presentation),
            resumes: ResumeTexts {
                original_resume: record.original_resume.clone(),
                corrected_resume: record.corrected_resume.clone(),
                displayed_markdown: record.displayed_markdown.clone(),
            },
        }
    }
}
