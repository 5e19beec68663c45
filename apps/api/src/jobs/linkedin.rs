//! LinkedIn guest-API job source.
//!
//! Search results come back as a fragment of `<li>` job cards; each card's posting
//! page is fetched for the description, applicant count and job criteria.
//! HTML parsing is synchronous and finishes before the next request is awaited.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::jobs::models::{EmploymentType, Job, JobQuery};

const SEARCH_PATH: &str = "/jobs-guest/jobs/api/seeMoreJobPostings/search";
const POSTING_PATH: &str = "/jobs-guest/jobs/api/jobPosting/";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Anything that can produce job postings for a query.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Returns postings matching `query`, skipping ids in `seen`.
    async fn search(&self, query: &JobQuery, seen: &HashSet<u64>) -> Result<Vec<Job>, AppError>;
}

pub struct LinkedInJobSource {
    client: Client,
    base_url: String,
}

impl LinkedInJobSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn fetch(&self, url: &str, query: &[(&str, String)]) -> Result<String, AppError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::JobSource(format!("GET {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::JobSource(format!("GET {url} returned {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::JobSource(format!("Reading {url} failed: {e}")))
    }
}

#[async_trait]
impl JobSource for LinkedInJobSource {
    async fn search(&self, query: &JobQuery, seen: &HashSet<u64>) -> Result<Vec<Job>, AppError> {
        let search_url = format!("{}{SEARCH_PATH}", self.base_url);
        let listing = self
            .fetch(
                &search_url,
                &[
                    ("keywords", query.keyword.clone()),
                    ("location", query.location.clone()),
                    ("start", query.start.to_string()),
                ],
            )
            .await?;

        let cards = parse_search_results(&listing);
        info!(cards = cards.len(), keyword = %query.keyword, "Parsed LinkedIn search results");

        let mut jobs = Vec::new();
        let mut batch_ids = HashSet::new();
        for card in cards {
            if seen.contains(&card.id) || !batch_ids.insert(card.id) {
                continue;
            }

            let posting_url = format!("{}{POSTING_PATH}{}", self.base_url, card.id);
            let details = match self.fetch(&posting_url, &[]).await {
                Ok(html) => parse_job_posting(&html),
                Err(e) => {
                    warn!(job_id = card.id, "Posting details unavailable: {e}");
                    PostingDetails::default()
                }
            };

            info!(job_id = card.id, "Completed job");
            jobs.push(card.into_job(details));
        }

        Ok(jobs)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HTML parsing
// ────────────────────────────────────────────────────────────────────────────

/// Fields available on a search-result card.
#[derive(Debug, Clone, PartialEq)]
pub struct JobCard {
    pub id: u64,
    pub title: String,
    pub company_name: String,
    pub company_logo: Option<String>,
    pub location: Option<String>,
    pub job_url: String,
    pub posted_date: Option<NaiveDate>,
}

/// Fields only available on the posting page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingDetails {
    pub description: Option<String>,
    pub applicants: Option<String>,
    /// (criteria heading, value) pairs, e.g. ("Seniority level", "Entry level").
    pub criteria: Vec<(String, String)>,
}

impl JobCard {
    pub fn into_job(self, details: PostingDetails) -> Job {
        let mut job = Job {
            id: self.id,
            title: self.title,
            company_name: self.company_name,
            company_logo: self.company_logo,
            location: self.location,
            job_url: self.job_url,
            posted_date: self.posted_date,
            job_description: details.description,
            seniority_level: None,
            employment_type: None,
            job_function: None,
            industries: None,
            applicants: details.applicants,
        };

        for (name, value) in details.criteria {
            match name.as_str() {
                "Seniority level" => job.seniority_level = Some(value),
                "Employment type" => job.employment_type = Some(EmploymentType::from_label(&value)),
                "Job function" => job.job_function = Some(value),
                "Industries" => job.industries = Some(value),
                _ => {}
            }
        }
        job
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn first<'a>(el: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    el.select(&selector(css)?).next()
}

/// Whitespace-trimmed text of the first match, `None` when absent or empty.
fn text_of(el: ElementRef<'_>, css: &str) -> Option<String> {
    let text = first(el, css)?
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}

fn attr_of(el: ElementRef<'_>, css: &str, attr: &str) -> Option<String> {
    first(el, css)?
        .value()
        .attr(attr)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// "urn:li:jobPosting:4216497490" → 4216497490
pub fn parse_job_urn(urn: &str) -> Option<u64> {
    urn.rsplit(':').next()?.trim().parse().ok()
}

/// Parses a search-results fragment. Cards without an id, title or link are skipped.
pub fn parse_search_results(html: &str) -> Vec<JobCard> {
    let document = Html::parse_document(html);
    let Some(card_selector) = selector("div.base-card") else {
        return Vec::new();
    };

    document
        .select(&card_selector)
        .filter_map(parse_card)
        .collect()
}

fn parse_card(card: ElementRef<'_>) -> Option<JobCard> {
    let id = parse_job_urn(card.value().attr("data-entity-urn")?)?;

    Some(JobCard {
        id,
        title: text_of(card, "h3.base-search-card__title")?,
        job_url: attr_of(card, "a.base-card__full-link", "href")?,
        company_name: text_of(card, "h4.base-search-card__subtitle").unwrap_or_default(),
        location: text_of(card, "span.job-search-card__location"),
        posted_date: attr_of(card, "time", "datetime")
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        company_logo: attr_of(card, "img.artdeco-entity-image", "data-delayed-url"),
    })
}

/// Parses a job posting page.
pub fn parse_job_posting(html: &str) -> PostingDetails {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let description = first(root, "div.show-more-less-html__markup")
        .map(|el| el.inner_html().trim().to_string())
        .filter(|d| !d.is_empty());

    let applicants = text_of(root, ".num-applicants__caption");

    let criteria: Vec<(String, String)> = selector("li.description__job-criteria-item")
        .map(|item_selector| {
            root.select(&item_selector)
                .filter_map(|item| {
                    Some((
                        text_of(item, "h3.description__job-criteria-subheader")?,
                        text_of(item, "span.description__job-criteria-text")?,
                    ))
                })
                .collect()
        })
        .unwrap_or_default();

    PostingDetails {
        description,
        applicants,
        criteria,
    }
}
