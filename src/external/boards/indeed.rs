//! Indeed India RSS feed adapter.

use async_trait::async_trait;
use std::time::Duration;

use super::provider::JobBoardProvider;
use super::rss::{self, RssItem};
use super::types::{clip, BoardKind, FetchedJob, SearchQuery};
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;

const FEED_URL: &str = "https://in.indeed.com/rss";
// RSS endpoint caps the number of entries per request.
const FEED_MAX_ITEMS: usize = 50;

pub struct IndeedBoard {
    request_timeout: Duration,
}

impl IndeedBoard {
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }

    fn make_error(reason: impl Into<String>) -> AppError {
        AppError::SourceUnavailable {
            name: "indeed".to_string(),
            reason: reason.into(),
        }
    }

    /// Feed titles follow the "Job Title - Company - Location" convention.
    fn convert(item: RssItem) -> FetchedJob {
        let mut parts = item.title.splitn(3, " - ");
        let title = parts.next().unwrap_or(&item.title).trim().to_string();
        let company = parts
            .next()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("Not specified")
            .to_string();
        let location = parts.next().map(|l| l.trim().to_string());

        let description = {
            let mut text = rss::strip_html(&item.description);
            clip(&mut text, 500);
            text
        };

        FetchedJob {
            external_id: None,
            title,
            company,
            location,
            description: Some(description).filter(|d| !d.is_empty()),
            requirements: None,
            salary: None,
            job_type: Some("full-time".to_string()),
            url: item.link,
            posted_date: item.pub_date,
        }
    }
}

#[async_trait]
impl JobBoardProvider for IndeedBoard {
    fn name(&self) -> &'static str {
        "indeed"
    }

    fn kind(&self) -> BoardKind {
        BoardKind::Rss
    }

    async fn fetch(&self, query: &SearchQuery) -> AppResult<Vec<FetchedJob>> {
        let limit = query.limit.min(FEED_MAX_ITEMS);
        let params = [
            ("q", query.keywords.as_str()),
            ("l", query.location.as_str()),
            ("radius", "25"),
            ("limit", &limit.to_string()),
        ];

        let body = HTTP_CLIENT
            .get(FEED_URL)
            .timeout(self.request_timeout)
            .header("Accept", "application/rss+xml, application/xml, text/xml")
            .query(&params)
            .send()
            .await
            .map_err(|e| Self::make_error(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| Self::make_error(format!("HTTP error: {e}")))?
            .text()
            .await
            .map_err(|e| Self::make_error(format!("body read failed: {e}")))?;

        Ok(rss::parse_items(&body)
            .into_iter()
            .map(Self::convert)
            .filter(FetchedJob::is_complete)
            .take(query.limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> RssItem {
        RssItem {
            title: title.to_string(),
            link: "https://in.indeed.com/viewjob?jk=1".to_string(),
            description: "<p>Work on <b>Rust</b> services.</p>".to_string(),
            pub_date: Some("Mon, 12 May 2025 08:00:00 GMT".to_string()),
        }
    }

    #[test]
    fn splits_title_company_location() {
        let job = IndeedBoard::convert(item("Rust Developer - Ferrous Ltd - Pune, Maharashtra"));
        assert_eq!(job.title, "Rust Developer");
        assert_eq!(job.company, "Ferrous Ltd");
        assert_eq!(job.location.as_deref(), Some("Pune, Maharashtra"));
        assert_eq!(job.description.as_deref(), Some("Work on Rust services."));
        assert!(job.posted_date.is_some());
    }

    #[test]
    fn title_without_separators_keeps_defaults() {
        let job = IndeedBoard::convert(item("Rust Developer"));
        assert_eq!(job.title, "Rust Developer");
        assert_eq!(job.company, "Not specified");
        assert!(job.location.is_none());
    }

    #[test]
    fn extra_dashes_stay_in_location() {
        let job = IndeedBoard::convert(item("Engineer - Acme - Delhi - NCR"));
        assert_eq!(job.location.as_deref(), Some("Delhi - NCR"));
    }

    #[test]
    fn multibyte_description_survives_truncation() {
        // A rupee sign straddling the 500-byte cutoff must not split.
        let mut rss_item = item("Engineer - Acme - Pune");
        rss_item.description = format!("{}₹ 12,00,000 per annum", "a".repeat(499));

        let job = IndeedBoard::convert(rss_item);
        let description = job.description.unwrap();
        assert!(description.len() <= 500);
        assert!(description.is_char_boundary(description.len()));
        assert!(!description.contains('₹'));
    }
}
