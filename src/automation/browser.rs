//! Browser abstraction for the automation engine.
//!
//! The engine only talks to the `Browser` trait, so its control flow is
//! testable with a scripted stub; `WebDriverBrowser` is the production
//! implementation over a remote WebDriver (chromedriver/selenium).

use std::path::Path;

use async_trait::async_trait;
use thirtyfour::prelude::*;

use crate::automation::selectors::SiteSelectors;
use crate::config::AutomationConfig;
use crate::error::{AppError, AppResult};

/// One listing card as seen on the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardSnapshot {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub url: Option<String>,
}

#[async_trait]
pub trait Browser: Send {
    async fn goto(&mut self, url: &str) -> AppResult<()>;

    async fn fill(&mut self, selector: &str, value: &str) -> AppResult<()>;

    async fn click(&mut self, selector: &str) -> AppResult<()>;

    /// Reads every card matching `job_card`, extracting the configured
    /// fields. Cards missing a title are dropped.
    async fn extract_cards(&mut self, selectors: &SiteSelectors) -> AppResult<Vec<CardSnapshot>>;

    /// Best-effort diagnostic; failures are the caller's to ignore.
    async fn screenshot(&mut self, path: &Path) -> AppResult<()>;

    /// Driver-side session identifier, when there is one.
    fn session_handle(&self) -> Option<String>;

    async fn close(self: Box<Self>) -> AppResult<()>;
}

fn automation_error(stage: &str, e: impl std::fmt::Display) -> AppError {
    AppError::Automation {
        stage: stage.to_string(),
        message: e.to_string(),
    }
}

pub struct WebDriverBrowser {
    driver: WebDriver,
}

impl WebDriverBrowser {
    /// Connects to the configured WebDriver endpoint with a fresh Chrome
    /// session.
    pub async fn connect(config: &AutomationConfig) -> AppResult<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.add_arg("--headless=new")
                .map_err(|e| automation_error("session_setup", e))?;
        }
        caps.add_arg("--disable-gpu")
            .map_err(|e| automation_error("session_setup", e))?;
        caps.add_arg("--window-size=1440,900")
            .map_err(|e| automation_error("session_setup", e))?;

        let driver = WebDriver::new(&config.webdriver_url, caps)
            .await
            .map_err(|e| automation_error("session_setup", e))?;
        driver
            .set_page_load_timeout(std::time::Duration::from_secs(config.page_load_timeout))
            .await
            .map_err(|e| automation_error("session_setup", e))?;

        Ok(Self { driver })
    }

    async fn find(&self, selector: &str, stage: &str) -> AppResult<WebElement> {
        self.driver
            .find(By::Css(selector))
            .await
            .map_err(|e| automation_error(stage, format!("'{selector}': {e}")))
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn goto(&mut self, url: &str) -> AppResult<()> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| automation_error("navigation", e))
    }

    async fn fill(&mut self, selector: &str, value: &str) -> AppResult<()> {
        let element = self.find(selector, "form_fill").await?;
        element
            .clear()
            .await
            .map_err(|e| automation_error("form_fill", e))?;
        element
            .send_keys(value)
            .await
            .map_err(|e| automation_error("form_fill", e))
    }

    async fn click(&mut self, selector: &str) -> AppResult<()> {
        self.find(selector, "click")
            .await?
            .click()
            .await
            .map_err(|e| automation_error("click", e))
    }

    async fn extract_cards(&mut self, selectors: &SiteSelectors) -> AppResult<Vec<CardSnapshot>> {
        let cards = self
            .driver
            .find_all(By::Css(&selectors.job_card))
            .await
            .map_err(|e| automation_error("extraction", e))?;

        let mut snapshots = Vec::with_capacity(cards.len());
        for card in cards {
            let title = match text_of(&card, &selectors.title).await {
                Some(t) if !t.trim().is_empty() => t.trim().to_string(),
                _ => continue,
            };
            let company = text_of(&card, &selectors.company)
                .await
                .map(|c| c.trim().to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            let location = match &selectors.location {
                Some(sel) => text_of(&card, sel).await,
                None => None,
            };
            let url = match &selectors.link {
                Some(sel) => href_of(&card, sel).await,
                None => card.attr("href").await.ok().flatten(),
            };
            snapshots.push(CardSnapshot {
                title,
                company,
                location,
                url,
            });
        }
        Ok(snapshots)
    }

    async fn screenshot(&mut self, path: &Path) -> AppResult<()> {
        self.driver
            .screenshot(path)
            .await
            .map_err(|e| automation_error("screenshot", e))
    }

    fn session_handle(&self) -> Option<String> {
        Some(self.driver.session_id().to_string())
    }

    async fn close(self: Box<Self>) -> AppResult<()> {
        self.driver
            .quit()
            .await
            .map_err(|e| automation_error("teardown", e))
    }
}

async fn text_of(card: &WebElement, selector: &str) -> Option<String> {
    let element = card.find(By::Css(selector)).await.ok()?;
    element.text().await.ok()
}

async fn href_of(card: &WebElement, selector: &str) -> Option<String> {
    let element = card.find(By::Css(selector)).await.ok()?;
    element.attr("href").await.ok().flatten()
}
