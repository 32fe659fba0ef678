//! Browser automation work loop.
//!
//! One engine run drives a single site through the session state machine:
//! idle, navigating, searching, extracting, then per-job form_filling and
//! submitted. Each step failure is contained to the job it happened on;
//! the run keeps going and reports the error count.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::automation::browser::{Browser, CardSnapshot};
use crate::automation::selectors::SiteSelectors;
use crate::error::{AppError, AppResult};
use crate::models::{AutomationState, WebsiteConfiguration};

/// What the engine tells its surroundings while running. The production
/// sink persists to the database; tests use an in-memory one.
#[async_trait]
pub trait EngineSink: Send + Sync {
    async fn is_blacklisted(&self, company: &str) -> AppResult<bool>;

    /// Stores an extracted job. Returns false for duplicates.
    async fn record_job(&self, card: &CardSnapshot, applied: bool) -> AppResult<bool>;

    async fn state_changed(&self, state: AutomationState) -> AppResult<()>;

    async fn log_error(&self, stage: &str, message: &str) -> AppResult<()>;
}

/// Counters reported back to the session row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutcome {
    pub jobs_found: i32,
    pub jobs_applied: i32,
    pub jobs_skipped: i32,
    pub errors: i32,
    pub cancelled: bool,
}

pub struct AutomationEngine<'a> {
    site: &'a WebsiteConfiguration,
    selectors: SiteSelectors,
    sink: &'a dyn EngineSink,
    cancel: CancellationToken,
    auto_apply: bool,
    state: AutomationState,
}

impl<'a> AutomationEngine<'a> {
    pub fn new(
        site: &'a WebsiteConfiguration,
        sink: &'a dyn EngineSink,
        cancel: CancellationToken,
        auto_apply: bool,
    ) -> AppResult<Self> {
        let selectors = SiteSelectors::from_config(&site.selectors)?;
        Ok(Self {
            site,
            selectors,
            sink,
            cancel,
            auto_apply: auto_apply && site.supports_auto_apply,
            state: AutomationState::Idle,
        })
    }

    async fn advance(&mut self, next: AutomationState) -> AppResult<()> {
        if !self.state.can_advance_to(next) {
            return Err(AppError::Automation {
                stage: next.to_string(),
                message: format!("illegal transition from '{}'", self.state),
            });
        }
        self.state = next;
        self.sink.state_changed(next).await?;
        Ok(())
    }

    async fn fail(&mut self, stage: &str, message: &str) {
        self.state = AutomationState::Error;
        if let Err(e) = self.sink.state_changed(AutomationState::Error).await {
            tracing::warn!(error = %e, "could not persist error state");
        }
        if let Err(e) = self.sink.log_error(stage, message).await {
            tracing::warn!(error = %e, "could not persist automation log");
        }
    }

    /// Runs the whole loop against a browser. Setup failures (navigation,
    /// search form) end the run in the error state; per-job failures are
    /// counted and skipped.
    pub async fn run(
        &mut self,
        browser: &mut dyn Browser,
        keywords: &str,
        location: &str,
    ) -> AppResult<RunOutcome> {
        let mut outcome = RunOutcome::default();

        // Navigate to the rendered search page.
        self.advance(AutomationState::Navigating).await?;
        let search_url = self.site.render_search_url(keywords, location);
        if let Err(e) = browser.goto(&search_url).await {
            self.fail("navigation", &e.to_string()).await;
            outcome.errors += 1;
            return Ok(outcome);
        }

        // Fill and submit the search form.
        self.advance(AutomationState::Searching).await?;
        if let Err(e) = self.submit_search(browser, keywords, location).await {
            self.fail("search", &e.to_string()).await;
            outcome.errors += 1;
            return Ok(outcome);
        }

        // Pull the listing cards.
        self.advance(AutomationState::Extracting).await?;
        let cards = match browser.extract_cards(&self.selectors).await {
            Ok(cards) => cards,
            Err(e) => {
                self.fail("extraction", &e.to_string()).await;
                outcome.errors += 1;
                return Ok(outcome);
            }
        };
        outcome.jobs_found = cards.len() as i32;

        let cap = self.site.max_applications_per_session.max(0);
        for card in &cards {
            if self.cancel.is_cancelled() {
                outcome.cancelled = true;
                return Ok(outcome);
            }
            if outcome.jobs_applied >= cap {
                outcome.jobs_skipped += 1;
                continue;
            }
            match self.process_card(browser, card).await {
                Ok(true) => {
                    outcome.jobs_applied += 1;
                    // Pace applications per the site's rate limit.
                    let delay = self.site.rate_limit_delay.max(0) as u64;
                    if delay > 0 {
                        tokio::time::sleep(std::time::Duration::from_secs(delay)).await;
                    }
                }
                Ok(false) => outcome.jobs_skipped += 1,
                Err(e) => {
                    outcome.errors += 1;
                    self.fail("application", &e.to_string()).await;
                    // Best-effort: resume scanning the remaining cards.
                    self.state = AutomationState::Extracting;
                }
            }
        }

        Ok(outcome)
    }

    async fn submit_search(
        &self,
        browser: &mut dyn Browser,
        keywords: &str,
        location: &str,
    ) -> AppResult<()> {
        browser.fill(&self.selectors.search_input, keywords).await?;
        if let Some(location_input) = &self.selectors.location_input {
            if !location.is_empty() {
                browser.fill(location_input, location).await?;
            }
        }
        browser.click(&self.selectors.search_button).await
    }

    /// One extracted card: blacklist gate, record, optional apply.
    /// Returns whether an application was submitted.
    async fn process_card(
        &mut self,
        browser: &mut dyn Browser,
        card: &CardSnapshot,
    ) -> AppResult<bool> {
        if self.sink.is_blacklisted(&card.company).await? {
            self.sink.record_job(card, false).await?;
            return Ok(false);
        }

        let is_new = self.sink.record_job(card, false).await?;
        if !is_new || !self.auto_apply {
            return Ok(false);
        }

        let Some(apply_button) = self.selectors.apply_button.clone() else {
            return Ok(false);
        };

        self.advance(AutomationState::FormFilling).await?;
        browser.click(&apply_button).await?;
        self.advance(AutomationState::Submitted).await?;
        self.sink.record_job(card, true).await?;

        // Back to scanning for the next card.
        self.advance(AutomationState::Searching).await?;
        self.advance(AutomationState::Extracting).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::browser::CardSnapshot;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Mutex;

    struct ScriptedBrowser {
        cards: Vec<CardSnapshot>,
        fail_navigation: bool,
        fail_click_selectors: Vec<String>,
        actions: Mutex<Vec<String>>,
    }

    impl ScriptedBrowser {
        fn with_cards(cards: Vec<CardSnapshot>) -> Self {
            Self {
                cards,
                fail_navigation: false,
                fail_click_selectors: Vec::new(),
                actions: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, action: String) {
            self.actions.lock().unwrap().push(action);
        }
    }

    #[async_trait]
    impl Browser for ScriptedBrowser {
        async fn goto(&mut self, url: &str) -> AppResult<()> {
            self.record(format!("goto {url}"));
            if self.fail_navigation {
                return Err(AppError::Automation {
                    stage: "navigation".into(),
                    message: "net::ERR_CONNECTION_REFUSED".into(),
                });
            }
            Ok(())
        }

        async fn fill(&mut self, selector: &str, value: &str) -> AppResult<()> {
            self.record(format!("fill {selector}={value}"));
            Ok(())
        }

        async fn click(&mut self, selector: &str) -> AppResult<()> {
            self.record(format!("click {selector}"));
            if self.fail_click_selectors.iter().any(|s| s == selector) {
                return Err(AppError::Automation {
                    stage: "click".into(),
                    message: format!("'{selector}' not interactable"),
                });
            }
            Ok(())
        }

        async fn extract_cards(&mut self, _: &SiteSelectors) -> AppResult<Vec<CardSnapshot>> {
            Ok(self.cards.clone())
        }

        async fn screenshot(&mut self, _: &Path) -> AppResult<()> {
            Ok(())
        }

        fn session_handle(&self) -> Option<String> {
            None
        }

        async fn close(self: Box<Self>) -> AppResult<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemorySink {
        blacklisted: Vec<String>,
        states: Mutex<Vec<AutomationState>>,
        recorded: Mutex<Vec<(String, bool)>>,
        errors: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EngineSink for MemorySink {
        async fn is_blacklisted(&self, company: &str) -> AppResult<bool> {
            Ok(self.blacklisted.iter().any(|c| c == company))
        }

        async fn record_job(&self, card: &CardSnapshot, applied: bool) -> AppResult<bool> {
            let mut recorded = self.recorded.lock().unwrap();
            let seen = recorded.iter().any(|(t, _)| t == &card.title);
            recorded.push((card.title.clone(), applied));
            Ok(!seen || applied)
        }

        async fn state_changed(&self, state: AutomationState) -> AppResult<()> {
            self.states.lock().unwrap().push(state);
            Ok(())
        }

        async fn log_error(&self, stage: &str, message: &str) -> AppResult<()> {
            self.errors.lock().unwrap().push(format!("{stage}: {message}"));
            Ok(())
        }
    }

    fn site(auto_apply: bool) -> WebsiteConfiguration {
        WebsiteConfiguration {
            id: 1,
            site_key: "shine".into(),
            display_name: "Shine".into(),
            base_url: "https://www.shine.com".into(),
            search_url: "https://www.shine.com/job-search/{keywords}-jobs-in-{location}".into(),
            login_required: false,
            rate_limit_delay: 0,
            max_applications_per_session: 5,
            supports_auto_apply: auto_apply,
            selectors: serde_json::json!({
                "search_input": "input#id_q",
                "search_button": "button.search",
                "job_card": "div.jobCard",
                "title": "h2",
                "company": "span.company",
                "apply_button": "button.apply"
            }),
            enabled: true,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
        }
    }

    fn card(title: &str, company: &str) -> CardSnapshot {
        CardSnapshot {
            title: title.into(),
            company: company.into(),
            location: None,
            url: Some(format!("https://www.shine.com/jobs/{title}")),
        }
    }

    #[tokio::test]
    async fn happy_path_applies_and_counts() {
        let site = site(true);
        let sink = MemorySink::default();
        let mut engine =
            AutomationEngine::new(&site, &sink, CancellationToken::new(), true).unwrap();
        let mut browser =
            ScriptedBrowser::with_cards(vec![card("a", "Acme"), card("b", "Globex")]);

        let outcome = engine.run(&mut browser, "rust", "pune").await.unwrap();
        assert_eq!(outcome.jobs_found, 2);
        assert_eq!(outcome.jobs_applied, 2);
        assert_eq!(outcome.errors, 0);
        assert!(!outcome.cancelled);

        let states = sink.states.lock().unwrap();
        assert!(states.starts_with(&[
            AutomationState::Navigating,
            AutomationState::Searching,
            AutomationState::Extracting,
        ]));
        assert!(states.contains(&AutomationState::Submitted));
    }

    #[tokio::test]
    async fn navigation_failure_ends_in_error_state() {
        let site = site(true);
        let sink = MemorySink::default();
        let mut engine =
            AutomationEngine::new(&site, &sink, CancellationToken::new(), true).unwrap();
        let mut browser = ScriptedBrowser::with_cards(vec![]);
        browser.fail_navigation = true;

        let outcome = engine.run(&mut browser, "rust", "pune").await.unwrap();
        assert_eq!(outcome.errors, 1);
        assert_eq!(*sink.states.lock().unwrap().last().unwrap(), AutomationState::Error);
        assert_eq!(sink.errors.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blacklisted_company_is_skipped_not_applied() {
        let site = site(true);
        let sink = MemorySink {
            blacklisted: vec!["Evil Corp".into()],
            ..Default::default()
        };
        let mut engine =
            AutomationEngine::new(&site, &sink, CancellationToken::new(), true).unwrap();
        let mut browser =
            ScriptedBrowser::with_cards(vec![card("a", "Evil Corp"), card("b", "Acme")]);

        let outcome = engine.run(&mut browser, "rust", "").await.unwrap();
        assert_eq!(outcome.jobs_applied, 1);
        assert_eq!(outcome.jobs_skipped, 1);
    }

    #[tokio::test]
    async fn apply_click_failure_is_contained_to_that_job() {
        let site = site(true);
        let sink = MemorySink::default();
        let mut engine =
            AutomationEngine::new(&site, &sink, CancellationToken::new(), true).unwrap();
        let mut browser =
            ScriptedBrowser::with_cards(vec![card("a", "Acme"), card("b", "Globex")]);
        browser.fail_click_selectors = vec!["button.apply".into()];

        let outcome = engine.run(&mut browser, "rust", "").await.unwrap();
        assert_eq!(outcome.jobs_found, 2);
        assert_eq!(outcome.jobs_applied, 0);
        assert_eq!(outcome.errors, 2);
    }

    #[tokio::test]
    async fn cancellation_stops_the_loop() {
        let site = site(true);
        let sink = MemorySink::default();
        let token = CancellationToken::new();
        token.cancel();
        let mut engine = AutomationEngine::new(&site, &sink, token, true).unwrap();
        let mut browser =
            ScriptedBrowser::with_cards(vec![card("a", "Acme"), card("b", "Globex")]);

        let outcome = engine.run(&mut browser, "rust", "").await.unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.jobs_applied, 0);
    }

    #[tokio::test]
    async fn without_auto_apply_jobs_are_recorded_only() {
        let site = site(false);
        let sink = MemorySink::default();
        let mut engine =
            AutomationEngine::new(&site, &sink, CancellationToken::new(), true).unwrap();
        let mut browser = ScriptedBrowser::with_cards(vec![card("a", "Acme")]);

        let outcome = engine.run(&mut browser, "rust", "").await.unwrap();
        assert_eq!(outcome.jobs_applied, 0);
        assert_eq!(outcome.jobs_skipped, 1);
        let recorded = sink.recorded.lock().unwrap();
        assert_eq!(recorded.as_slice(), &[("a".to_string(), false)]);
    }
}
