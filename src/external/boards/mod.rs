//! Job board adapters behind a common provider trait.

mod google_jobs;
mod indeed;
mod naukri;
mod provider;
mod rss;
mod timesjobs;
mod types;

pub use google_jobs::GoogleJobsBoard;
pub use indeed::IndeedBoard;
pub use naukri::NaukriBoard;
pub use provider::JobBoardProvider;
pub use timesjobs::TimesJobsBoard;
pub use types::{BoardKind, FetchedJob, SearchQuery};

use crate::config::BoardsConfig;
use std::time::Duration;

/// All configured board adapters, keyed by their stable names.
///
/// Built once at startup from `BoardsConfig` (the SerpAPI key and per-request
/// timeout live in configuration, so the registry cannot be a bare static).
pub struct BoardRegistry {
    providers: Vec<Box<dyn JobBoardProvider>>,
}

impl BoardRegistry {
    pub fn from_config(config: &BoardsConfig) -> Self {
        let timeout = Duration::from_secs(config.request_timeout);
        let providers: Vec<Box<dyn JobBoardProvider>> = vec![
            Box::new(GoogleJobsBoard::new(
                config.serpapi_key.clone(),
                config.country.clone(),
                config.language.clone(),
                timeout,
            )),
            Box::new(NaukriBoard::new(timeout)),
            Box::new(IndeedBoard::new(timeout)),
            Box::new(TimesJobsBoard::new(timeout)),
        ];
        Self { providers }
    }

    pub fn get(&self, name: &str) -> Option<&dyn JobBoardProvider> {
        self.providers
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn JobBoardProvider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_exposes_all_boards() {
        let registry = BoardRegistry::from_config(&BoardsConfig::default());

        assert_eq!(
            registry.names(),
            vec!["google_jobs", "naukri", "indeed", "timesjobs"]
        );
        assert!(registry.get("naukri").is_some());
        assert!(registry.get("monster").is_none());
        assert_eq!(
            registry.get("google_jobs").unwrap().kind(),
            BoardKind::Api
        );
        assert_eq!(registry.get("indeed").unwrap().kind(), BoardKind::Rss);
        assert_eq!(
            registry.get("naukri").unwrap().kind(),
            BoardKind::Scraper
        );
    }
}
