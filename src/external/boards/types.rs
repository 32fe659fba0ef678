use serde::{Deserialize, Serialize};

/// How a board is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardKind {
    /// JSON API behind an API key
    Api,
    /// RSS/XML feed
    Rss,
    /// HTML search page scrape
    Scraper,
}

impl std::fmt::Display for BoardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardKind::Api => write!(f, "api"),
            BoardKind::Rss => write!(f, "rss"),
            BoardKind::Scraper => write!(f, "scraper"),
        }
    }
}

/// Search parameters passed to every board adapter.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub keywords: String,
    pub location: String,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(keywords: impl Into<String>, location: impl Into<String>, limit: usize) -> Self {
        Self {
            keywords: keywords.into(),
            location: location.into(),
            limit,
        }
    }
}

/// One listing as returned by a board adapter, before persistence.
#[derive(Debug, Clone, Default)]
pub struct FetchedJob {
    pub external_id: Option<String>,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary: Option<String>,
    pub job_type: Option<String>,
    pub url: String,
    pub posted_date: Option<String>,
}

impl FetchedJob {
    /// Records without a title or URL cannot be deduplicated or displayed
    /// and are dropped during normalization.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.url.trim().is_empty()
    }
}

/// Truncates `text` to at most `max` bytes without splitting a character.
/// Feed and scrape text is routinely non-ASCII (rupee signs in salaries,
/// Devanagari in descriptions), so a plain `truncate` would panic.
pub(crate) fn clip(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_jobs_are_detected() {
        let mut job = FetchedJob {
            title: "Rust Engineer".to_string(),
            url: "https://example.com/jobs/1".to_string(),
            ..Default::default()
        };
        assert!(job.is_complete());

        job.url = "  ".to_string();
        assert!(!job.is_complete());

        job.url = "https://example.com/jobs/1".to_string();
        job.title = String::new();
        assert!(!job.is_complete());
    }

    #[test]
    fn clip_respects_char_boundaries() {
        let mut text = "a".repeat(499);
        text.push('₹');
        clip(&mut text, 500);
        assert_eq!(text.len(), 499);
        assert!(text.is_char_boundary(text.len()));

        let mut ascii = "b".repeat(600);
        clip(&mut ascii, 500);
        assert_eq!(ascii.len(), 500);

        let mut short = "नौकरी".to_string();
        let before = short.clone();
        clip(&mut short, 500);
        assert_eq!(short, before);
    }
}
