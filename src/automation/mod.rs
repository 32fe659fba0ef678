//! Selector-driven browser automation.

pub mod browser;
pub mod engine;
pub mod selectors;

pub use browser::{Browser, CardSnapshot, WebDriverBrowser};
pub use engine::{AutomationEngine, EngineSink, RunOutcome};
pub use selectors::SiteSelectors;
