//! TimesJobs RSS feeds adapter.
//!
//! TimesJobs publishes topic-wide feeds rather than per-search results, so
//! this adapter pulls several feeds and post-filters by keywords and
//! location.

use async_trait::async_trait;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use std::time::Duration;

use super::provider::JobBoardProvider;
use super::rss::{self, RssItem};
use super::types::{clip, BoardKind, FetchedJob, SearchQuery};
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;

const FEED_URLS: &[&str] = &[
    "https://www.timesjobs.com/rss/jobs-rss.xml",
    "https://www.timesjobs.com/rss/jobs-by-skills-rss.xml",
    "https://www.timesjobs.com/rss/jobs-by-location-rss.xml",
];

const MAJOR_CITIES: &[&str] = &[
    "delhi", "mumbai", "bangalore", "hyderabad", "chennai", "pune", "remote",
];

pub struct TimesJobsBoard {
    request_timeout: Duration,
}

fn company_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Company:\s*([^\n\r]+)").unwrap())
}

fn location_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Location:\s*([^\n\r]+)").unwrap())
}

fn experience_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Experience:\s*([^\n\r]+)").unwrap())
}

impl TimesJobsBoard {
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }

    fn make_error(reason: impl Into<String>) -> AppError {
        AppError::SourceUnavailable {
            name: "timesjobs".to_string(),
            reason: reason.into(),
        }
    }

    fn capture(re: &Regex, text: &str) -> Option<String> {
        re.captures(text).map(|c| c[1].trim().to_string())
    }

    /// Item descriptions carry `Company:`/`Location:`/`Experience:` lines.
    fn convert(item: RssItem) -> FetchedJob {
        let description = rss::strip_html(&item.description);

        let company = Self::capture(company_regex(), &description)
            .unwrap_or_else(|| "Not specified".to_string());
        let location = Self::capture(location_regex(), &description);
        let experience = Self::capture(experience_regex(), &description);

        let truncated = {
            let mut text = description.clone();
            clip(&mut text, 500);
            text
        };

        FetchedJob {
            external_id: None,
            title: item.title,
            company,
            location,
            description: Some(truncated).filter(|d| !d.is_empty()),
            requirements: experience,
            salary: None,
            job_type: Some("full-time".to_string()),
            url: item.link,
            posted_date: item.pub_date,
        }
    }

    /// Keyword and location post-filter with URL dedup across feeds.
    fn filter(jobs: Vec<FetchedJob>, query: &SearchQuery) -> Vec<FetchedJob> {
        let keywords: Vec<String> = query
            .keywords
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let location_lower = query.location.to_lowercase();
        let location_is_broad = matches!(location_lower.as_str(), "remote" | "india" | "");

        let mut seen: HashSet<String> = HashSet::new();
        jobs.into_iter()
            .filter(|job| {
                if !seen.insert(job.url.clone()) {
                    return false;
                }

                let text = format!(
                    "{} {}",
                    job.title,
                    job.description.as_deref().unwrap_or("")
                )
                .to_lowercase();
                if !keywords.is_empty() && !keywords.iter().any(|k| text.contains(k)) {
                    return false;
                }

                if location_is_broad {
                    return true;
                }
                let job_location = job
                    .location
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase();
                job_location.contains(&location_lower)
                    || MAJOR_CITIES.iter().any(|c| job_location.contains(c))
            })
            .collect()
    }
}

#[async_trait]
impl JobBoardProvider for TimesJobsBoard {
    fn name(&self) -> &'static str {
        "timesjobs"
    }

    fn kind(&self) -> BoardKind {
        BoardKind::Rss
    }

    async fn fetch(&self, query: &SearchQuery) -> AppResult<Vec<FetchedJob>> {
        let mut all = Vec::new();
        let mut last_error = None;

        for feed_url in FEED_URLS {
            let result = async {
                let body = HTTP_CLIENT
                    .get(*feed_url)
                    .timeout(self.request_timeout)
                    .header("Accept", "application/rss+xml, application/xml, text/xml")
                    .send()
                    .await
                    .map_err(|e| Self::make_error(format!("request failed: {e}")))?
                    .error_for_status()
                    .map_err(|e| Self::make_error(format!("HTTP error: {e}")))?
                    .text()
                    .await
                    .map_err(|e| Self::make_error(format!("body read failed: {e}")))?;
                Ok::<Vec<FetchedJob>, AppError>(
                    rss::parse_items(&body)
                        .into_iter()
                        .map(Self::convert)
                        .filter(FetchedJob::is_complete)
                        .collect(),
                )
            }
            .await;

            match result {
                Ok(jobs) => all.extend(jobs),
                Err(e) => {
                    tracing::warn!(feed = feed_url, error = %e, "TimesJobs feed failed");
                    last_error = Some(e);
                }
            }
        }

        // All feeds down is a source failure; a partial set is a result.
        if all.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        let mut filtered = Self::filter(all, query);
        filtered.truncate(query.limit);
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, url: &str, description: &str) -> RssItem {
        RssItem {
            title: title.to_string(),
            link: url.to_string(),
            description: description.to_string(),
            pub_date: None,
        }
    }

    #[test]
    fn extracts_labeled_fields_from_description() {
        let job = TimesJobsBoard::convert(item(
            "Rust Developer",
            "https://www.timesjobs.com/job/1",
            "Company: Ferrous Ltd\nLocation: Pune\nExperience: 3 - 5 yrs\nGreat role.",
        ));

        assert_eq!(job.company, "Ferrous Ltd");
        assert_eq!(job.location.as_deref(), Some("Pune"));
        assert_eq!(job.requirements.as_deref(), Some("3 - 5 yrs"));
    }

    #[test]
    fn missing_labels_fall_back() {
        let job = TimesJobsBoard::convert(item(
            "Rust Developer",
            "https://www.timesjobs.com/job/2",
            "No structured fields here.",
        ));

        assert_eq!(job.company, "Not specified");
        assert!(job.location.is_none());
        assert!(job.requirements.is_none());
    }

    #[test]
    fn filter_dedups_and_matches_keywords() {
        let query = SearchQuery::new("rust developer", "Pune", 10);
        let jobs = vec![
            TimesJobsBoard::convert(item(
                "Rust Developer",
                "https://www.timesjobs.com/job/1",
                "Company: A\nLocation: Pune",
            )),
            // Same URL, dropped
            TimesJobsBoard::convert(item(
                "Rust Developer",
                "https://www.timesjobs.com/job/1",
                "Company: A\nLocation: Pune",
            )),
            // No keyword overlap, dropped
            TimesJobsBoard::convert(item(
                "Accountant",
                "https://www.timesjobs.com/job/3",
                "Company: B\nLocation: Pune",
            )),
        ];

        let filtered = TimesJobsBoard::filter(jobs, &query);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].url, "https://www.timesjobs.com/job/1");
    }

    #[test]
    fn broad_location_keeps_everything_matching_keywords() {
        let query = SearchQuery::new("rust", "India", 10);
        let jobs = vec![TimesJobsBoard::convert(item(
            "Rust Developer",
            "https://www.timesjobs.com/job/9",
            "Company: C\nLocation: Kochi",
        ))];

        assert_eq!(TimesJobsBoard::filter(jobs, &query).len(), 1);
    }
}
