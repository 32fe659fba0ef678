//! Naukri.com search page scraper.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;

use super::provider::JobBoardProvider;
use super::types::{clip, BoardKind, FetchedJob, SearchQuery};
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;

const BASE_URL: &str = "https://www.naukri.com";
const JOBS_PER_PAGE: usize = 20;
const MAX_PAGES: usize = 3;

struct CardSelectors {
    card: Selector,
    title: Selector,
    company: Selector,
    location: Selector,
    experience: Selector,
    salary: Selector,
    posted: Selector,
    description: Selector,
}

static SELECTORS: LazyLock<CardSelectors> = LazyLock::new(|| CardSelectors {
    card: Selector::parse("div.jobTuple").unwrap(),
    title: Selector::parse("a.title").unwrap(),
    company: Selector::parse("a.subTitle").unwrap(),
    location: Selector::parse("span.ellipsis.location").unwrap(),
    experience: Selector::parse("span.ellipsis.experience").unwrap(),
    salary: Selector::parse("span.ellipsis.salary").unwrap(),
    posted: Selector::parse("span.job-post-day").unwrap(),
    description: Selector::parse("div.job-description").unwrap(),
});

pub struct NaukriBoard {
    request_timeout: Duration,
}

impl NaukriBoard {
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }

    fn make_error(reason: impl Into<String>) -> AppError {
        AppError::SourceUnavailable {
            name: "naukri".to_string(),
            reason: reason.into(),
        }
    }

    fn text_of(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
        card.select(selector)
            .next()
            .map(|n| n.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    fn extract_card(card: ElementRef<'_>) -> Option<FetchedJob> {
        let title_node = card.select(&SELECTORS.title).next()?;
        let title = title_node.text().collect::<String>().trim().to_string();
        let href = title_node.value().attr("href")?;
        let url = if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{BASE_URL}{href}")
        };

        let company = Self::text_of(card, &SELECTORS.company)
            .unwrap_or_else(|| "Not specified".to_string());
        let description = Self::text_of(card, &SELECTORS.description).map(|mut d| {
            clip(&mut d, 500);
            d
        });

        Some(FetchedJob {
            external_id: None,
            title,
            company,
            location: Self::text_of(card, &SELECTORS.location),
            description,
            requirements: Self::text_of(card, &SELECTORS.experience),
            salary: Self::text_of(card, &SELECTORS.salary),
            job_type: Some("full-time".to_string()),
            url,
            posted_date: Self::text_of(card, &SELECTORS.posted),
        })
    }

    /// Html is not Send, so parsing stays synchronous and page-local.
    fn parse_listings(html: &str) -> Vec<FetchedJob> {
        let document = Html::parse_document(html);
        document
            .select(&SELECTORS.card)
            .filter_map(Self::extract_card)
            .filter(FetchedJob::is_complete)
            .collect()
    }
}

#[async_trait]
impl JobBoardProvider for NaukriBoard {
    fn name(&self) -> &'static str {
        "naukri"
    }

    fn kind(&self) -> BoardKind {
        BoardKind::Scraper
    }

    async fn fetch(&self, query: &SearchQuery) -> AppResult<Vec<FetchedJob>> {
        let pages = (query.limit / JOBS_PER_PAGE + 1).min(MAX_PAGES);
        let mut jobs = Vec::new();

        for page in 0..pages {
            let start = (page * JOBS_PER_PAGE).to_string();
            let params = [
                ("q", query.keywords.as_str()),
                ("l", query.location.as_str()),
                ("jobAge", "1"),
                ("src", "jobsearchDesk"),
                ("start", start.as_str()),
            ];

            let body = HTTP_CLIENT
                .get(format!("{BASE_URL}/jobs-search"))
                .timeout(self.request_timeout)
                .query(&params)
                .send()
                .await
                .map_err(|e| Self::make_error(format!("request failed: {e}")))?
                .error_for_status()
                .map_err(|e| Self::make_error(format!("HTTP error: {e}")))?
                .text()
                .await
                .map_err(|e| Self::make_error(format!("body read failed: {e}")))?;

            jobs.extend(Self::parse_listings(&body));

            if jobs.len() >= query.limit {
                break;
            }

            // Pause between pages to stay under the site's rate limit.
            if page + 1 < pages {
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }

        jobs.truncate(query.limit);
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_HTML: &str = r#"
    <html><body>
      <div class="jobTuple">
        <a class="title" href="/job-listings-rust-developer-ferrous-1">Rust Developer</a>
        <a class="subTitle">Ferrous Ltd</a>
        <span class="ellipsis location">Pune, Bengaluru</span>
        <span class="ellipsis experience">3-5 Yrs</span>
        <span class="ellipsis salary">20-35 Lacs PA</span>
        <span class="job-post-day">2 Days Ago</span>
        <div class="job-description">Own backend services written in Rust.</div>
      </div>
      <div class="jobTuple">
        <a class="subTitle">No Title Corp</a>
      </div>
      <div class="jobTuple">
        <a class="title" href="https://www.naukri.com/job-listings-absolute-2">Platform Engineer</a>
      </div>
    </body></html>"#;

    #[test]
    fn parses_job_cards() {
        let jobs = NaukriBoard::parse_listings(LISTING_HTML);
        assert_eq!(jobs.len(), 2);

        let first = &jobs[0];
        assert_eq!(first.title, "Rust Developer");
        assert_eq!(first.company, "Ferrous Ltd");
        assert_eq!(
            first.url,
            "https://www.naukri.com/job-listings-rust-developer-ferrous-1"
        );
        assert_eq!(first.location.as_deref(), Some("Pune, Bengaluru"));
        assert_eq!(first.requirements.as_deref(), Some("3-5 Yrs"));
        assert_eq!(first.salary.as_deref(), Some("20-35 Lacs PA"));
        assert_eq!(first.posted_date.as_deref(), Some("2 Days Ago"));
    }

    #[test]
    fn absolute_links_are_kept_as_is() {
        let jobs = NaukriBoard::parse_listings(LISTING_HTML);
        assert_eq!(jobs[1].url, "https://www.naukri.com/job-listings-absolute-2");
        assert_eq!(jobs[1].company, "Not specified");
    }

    #[test]
    fn cards_without_title_link_are_dropped() {
        let jobs = NaukriBoard::parse_listings("<div class=\"jobTuple\"></div>");
        assert!(jobs.is_empty());
    }

    #[test]
    fn empty_page_parses_to_nothing() {
        assert!(NaukriBoard::parse_listings("<html></html>").is_empty());
    }
}
