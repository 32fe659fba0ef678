//! Typed view over the per-site selector configuration.
//!
//! `website_configurations.selectors` is stored as jsonb so sites can be
//! added or repaired without a code change; this module is the only place
//! that knows the expected shape.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSelectors {
    /// Input receiving the search keywords.
    pub search_input: String,
    /// Element that submits the search.
    pub search_button: String,
    /// One listing card in the result page.
    pub job_card: String,
    /// Within a card: title text.
    pub title: String,
    /// Within a card: company text.
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Anchor within a card carrying the posting URL. Defaults to the
    /// card element itself.
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub apply_button: Option<String>,
    #[serde(default)]
    pub location_input: Option<String>,
}

impl SiteSelectors {
    pub fn from_config(value: &JsonValue) -> AppResult<Self> {
        serde_json::from_value(value.clone()).map_err(|e| AppError::Validation {
            field: "selectors".to_string(),
            reason: format!("Selector config is malformed: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_selector_config() {
        let value = json!({
            "search_input": "input#keywords",
            "search_button": "button[type=submit]",
            "job_card": "div.job-card",
            "title": "h2.title",
            "company": "span.company",
            "location": "span.loc",
            "link": "a.job-link",
            "apply_button": "button.apply"
        });
        let sel = SiteSelectors::from_config(&value).unwrap();
        assert_eq!(sel.job_card, "div.job-card");
        assert_eq!(sel.link.as_deref(), Some("a.job-link"));
        assert_eq!(sel.location_input, None);
    }

    #[test]
    fn optional_fields_default_to_none() {
        let value = json!({
            "search_input": "input",
            "search_button": "button",
            "job_card": ".card",
            "title": ".t",
            "company": ".c"
        });
        let sel = SiteSelectors::from_config(&value).unwrap();
        assert!(sel.apply_button.is_none());
        assert!(sel.location.is_none());
    }

    #[test]
    fn missing_required_field_is_a_validation_error() {
        let value = json!({"search_input": "input"});
        let err = SiteSelectors::from_config(&value).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
