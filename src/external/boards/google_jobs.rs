//! Google Jobs board via the SerpAPI `google_jobs` engine.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::provider::JobBoardProvider;
use super::types::{clip, BoardKind, FetchedJob, SearchQuery};
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;

const SEARCH_ENDPOINT: &str = "https://serpapi.com/search.json";

pub struct GoogleJobsBoard {
    api_key: Option<String>,
    country: String,
    language: String,
    request_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    error: Option<String>,
    #[serde(default)]
    jobs_results: Vec<SerpJob>,
}

#[derive(Debug, Deserialize)]
struct SerpJob {
    #[serde(default)]
    title: String,
    #[serde(default)]
    company_name: String,
    location: Option<String>,
    description: Option<String>,
    share_link: Option<String>,
    job_id: Option<String>,
    #[serde(default)]
    apply_options: Vec<ApplyOption>,
    #[serde(default)]
    job_highlights: Vec<JobHighlight>,
    #[serde(default)]
    extensions: Vec<String>,
    #[serde(default)]
    detected_extensions: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ApplyOption {
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JobHighlight {
    title: Option<String>,
    #[serde(default)]
    items: Vec<String>,
}

impl GoogleJobsBoard {
    pub fn new(
        api_key: Option<String>,
        country: String,
        language: String,
        request_timeout: Duration,
    ) -> Self {
        Self {
            api_key,
            country,
            language,
            request_timeout,
        }
    }

    fn make_error(reason: impl Into<String>) -> AppError {
        AppError::SourceUnavailable {
            name: "google_jobs".to_string(),
            reason: reason.into(),
        }
    }

    fn convert(job: SerpJob) -> FetchedJob {
        // Prefer a direct apply link, fall back to the Google share link.
        let url = job
            .apply_options
            .iter()
            .find_map(|o| o.link.clone())
            .or(job.share_link)
            .unwrap_or_default();

        let requirements = job
            .job_highlights
            .iter()
            .find(|h| h.title.as_deref() == Some("Qualifications"))
            .map(|h| {
                let mut joined = h.items.join(" | ");
                clip(&mut joined, 500);
                joined
            })
            .filter(|r| !r.is_empty());

        let salary = job
            .extensions
            .iter()
            .find(|e| {
                let lower = e.to_lowercase();
                e.contains('₹') || e.contains('$') || lower.contains("salary")
            })
            .cloned();

        let job_type = job
            .detected_extensions
            .get("schedule_type")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| {
                job.extensions
                    .iter()
                    .find(|e| {
                        let lower = e.to_lowercase();
                        ["full-time", "part-time", "contract", "internship"]
                            .iter()
                            .any(|t| lower.contains(t))
                    })
                    .cloned()
            });

        let posted_date = job
            .detected_extensions
            .get("posted_at")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| {
                job.extensions
                    .iter()
                    .find(|e| {
                        let lower = e.to_lowercase();
                        ["ago", "day", "week", "hour"].iter().any(|t| lower.contains(t))
                    })
                    .cloned()
            });

        let description = job.description.map(|mut d| {
            clip(&mut d, 1000);
            d.trim().to_string()
        });

        FetchedJob {
            external_id: job.job_id,
            title: job.title.trim().to_string(),
            company: job.company_name.trim().to_string(),
            location: job.location.map(|l| l.trim().to_string()),
            description,
            requirements,
            salary,
            job_type,
            url,
            posted_date,
        }
    }
}

#[async_trait]
impl JobBoardProvider for GoogleJobsBoard {
    fn name(&self) -> &'static str {
        "google_jobs"
    }

    fn kind(&self) -> BoardKind {
        BoardKind::Api
    }

    async fn fetch(&self, query: &SearchQuery) -> AppResult<Vec<FetchedJob>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Self::make_error("SerpAPI key not configured"))?;

        let q = format!("{} {}", query.keywords, query.location);
        let mut params = vec![
            ("engine", "google_jobs".to_string()),
            ("q", q),
            ("location", query.location.clone()),
            ("hl", self.language.clone()),
            ("gl", self.country.clone()),
            ("api_key", api_key.to_string()),
        ];
        if query.location.to_lowercase().contains("remote") {
            params.push(("ltype", "1".to_string()));
        }

        let response = HTTP_CLIENT
            .get(SEARCH_ENDPOINT)
            .timeout(self.request_timeout)
            .query(&params)
            .send()
            .await
            .map_err(|e| Self::make_error(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| Self::make_error(format!("HTTP error: {e}")))?;

        let body: SerpResponse = response
            .json()
            .await
            .map_err(|e| Self::make_error(format!("invalid JSON: {e}")))?;

        if let Some(error) = body.error {
            return Err(Self::make_error(format!("API error: {error}")));
        }

        Ok(body
            .jobs_results
            .into_iter()
            .take(query.limit)
            .map(Self::convert)
            .filter(FetchedJob::is_complete)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> SerpResponse {
        serde_json::from_str(
            r#"{
                "jobs_results": [
                    {
                        "title": "Rust Backend Engineer",
                        "company_name": "Ferrous Ltd",
                        "location": "Bengaluru, India",
                        "description": "Build services in Rust.",
                        "share_link": "https://www.google.com/search?q=rust#htivrt=jobs",
                        "job_id": "abc123",
                        "apply_options": [
                            {"link": "https://ferrous.example/careers/rust"},
                            {"link": "https://other.example/jobs/1"}
                        ],
                        "job_highlights": [
                            {"title": "Qualifications", "items": ["3+ years Rust", "PostgreSQL"]},
                            {"title": "Benefits", "items": ["Insurance"]}
                        ],
                        "extensions": ["2 days ago", "Full-time", "₹20L-₹35L a year"],
                        "detected_extensions": {"posted_at": "2 days ago", "schedule_type": "Full-time"}
                    },
                    {
                        "title": "Untitled posting",
                        "company_name": "Ghost Inc"
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    fn first_converted() -> FetchedJob {
        let response = sample_response();
        GoogleJobsBoard::convert(response.jobs_results.into_iter().next().unwrap())
    }

    #[test]
    fn converts_serpapi_job() {
        let job = first_converted();
        assert_eq!(job.title, "Rust Backend Engineer");
        assert_eq!(job.company, "Ferrous Ltd");
        assert_eq!(job.url, "https://ferrous.example/careers/rust");
        assert_eq!(job.external_id.as_deref(), Some("abc123"));
        assert_eq!(
            job.requirements.as_deref(),
            Some("3+ years Rust | PostgreSQL")
        );
        assert_eq!(job.job_type.as_deref(), Some("Full-time"));
        assert_eq!(job.posted_date.as_deref(), Some("2 days ago"));
        assert!(job.salary.as_deref().unwrap().contains('₹'));
    }

    #[test]
    fn falls_back_to_share_link() {
        let raw = r#"{
            "title": "Engineer",
            "company_name": "X",
            "share_link": "https://www.google.com/search?q=x",
            "apply_options": []
        }"#;
        let job: SerpJob = serde_json::from_str(raw).unwrap();
        let converted = GoogleJobsBoard::convert(job);
        assert_eq!(converted.url, "https://www.google.com/search?q=x");
    }

    #[test]
    fn record_without_url_is_incomplete() {
        let raw = r#"{"title": "Engineer", "company_name": "X"}"#;
        let job: SerpJob = serde_json::from_str(raw).unwrap();
        assert!(!GoogleJobsBoard::convert(job).is_complete());
    }

    #[tokio::test]
    async fn missing_api_key_fails_as_source_error() {
        let board = GoogleJobsBoard::new(
            None,
            "in".to_string(),
            "en".to_string(),
            Duration::from_secs(5),
        );
        let query = SearchQuery::new("rust developer", "Bengaluru", 10);

        let err = board.fetch(&query).await.unwrap_err();
        assert!(
            matches!(err, AppError::SourceUnavailable { ref name, .. } if name == "google_jobs")
        );
    }
}
