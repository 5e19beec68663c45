use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Description length shown on job cards before truncation.
pub const EXCERPT_CHARS: usize = 200;

static APPLY_LINK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[Apply now at (https?://[^\s\]]+)\]").ok());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Temporary,
    Internship,
    Volunteer,
    #[serde(other)]
    Other,
}

impl EmploymentType {
    /// Maps the label LinkedIn shows in the job criteria list.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "full-time" | "full time" => EmploymentType::FullTime,
            "part-time" | "part time" => EmploymentType::PartTime,
            "contract" => EmploymentType::Contract,
            "temporary" => EmploymentType::Temporary,
            "internship" => EmploymentType::Internship,
            "volunteer" => EmploymentType::Volunteer,
            _ => EmploymentType::Other,
        }
    }
}

/// A job posting. JSON keys follow the job criteria labels LinkedIn uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub title: String,
    pub company_name: String,
    pub company_logo: Option<String>,
    pub location: Option<String>,
    pub job_url: String,
    pub posted_date: Option<NaiveDate>,
    /// Raw HTML from the posting page.
    pub job_description: Option<String>,
    #[serde(rename = "Seniority level")]
    pub seniority_level: Option<String>,
    #[serde(rename = "Employment type")]
    pub employment_type: Option<EmploymentType>,
    #[serde(rename = "Job function")]
    pub job_function: Option<String>,
    #[serde(rename = "Industries")]
    pub industries: Option<String>,
    pub applicants: Option<String>,
}

impl Job {
    /// The `[Apply now at <url>]` link embedded in the description, else the posting URL.
    pub fn apply_url(&self) -> &str {
        self.job_description
            .as_deref()
            .and_then(find_apply_link)
            .unwrap_or(&self.job_url)
    }
}

fn find_apply_link(description: &str) -> Option<&str> {
    let re = APPLY_LINK.as_ref()?;
    re.captures(description)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// First `max_chars` characters of `text`, with `...` appended when truncated.
pub fn description_excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Job card / detail payload: the job plus fields derived for display.
#[derive(Debug, Serialize)]
pub struct JobView {
    #[serde(flatten)]
    pub job: Job,
    pub apply_url: String,
    pub description_excerpt: Option<String>,
}

impl From<Job> for JobView {
    fn from(job: Job) -> Self {
        Self {
            apply_url: job.apply_url().to_string(),
            description_excerpt: job
                .job_description
                .as_deref()
                .map(|d| description_excerpt(d, EXCERPT_CHARS)),
            job,
        }
    }
}

/// Search parameters for the job source.
#[derive(Debug, Clone, Deserialize)]
pub struct JobQuery {
    pub keyword: String,
    pub location: String,
    /// Pagination offset into the result list.
    #[serde(default)]
    pub start: u32,
}

impl JobQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.keyword.trim().is_empty() {
            return Err(AppError::Validation("keyword cannot be empty".to_string()));
        }
        if self.location.trim().is_empty() {
            return Err(AppError::Validation("location cannot be empty".to_string()));
        }
        Ok(())
    }
}
