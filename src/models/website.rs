use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Automation profile for one job site: URLs, pacing and the CSS
/// selectors the browser engine drives.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::website_configurations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WebsiteConfiguration {
    pub id: i32,
    pub site_key: String,
    pub display_name: String,
    pub base_url: String,
    pub search_url: String,
    pub login_required: bool,
    pub rate_limit_delay: i32,
    pub max_applications_per_session: i32,
    pub supports_auto_apply: bool,
    pub selectors: JsonValue,
    pub enabled: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl WebsiteConfiguration {
    /// Selector by role name, e.g. `job_card` or `apply_button`.
    pub fn selector(&self, role: &str) -> Option<&str> {
        self.selectors.get(role).and_then(|v| v.as_str())
    }

    /// Search URL with `{keywords}` and `{location}` placeholders filled in.
    pub fn render_search_url(&self, keywords: &str, location: &str) -> String {
        self.search_url
            .replace("{keywords}", keywords)
            .replace("{location}", location)
    }
}

#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::website_configurations)]
pub struct NewWebsiteConfiguration {
    pub site_key: String,
    pub display_name: String,
    pub base_url: String,
    pub search_url: String,
    pub login_required: bool,
    pub rate_limit_delay: i32,
    pub max_applications_per_session: i32,
    pub supports_auto_apply: bool,
    pub selectors: JsonValue,
}

#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::website_configurations)]
pub struct UpdateWebsiteConfiguration {
    pub display_name: Option<String>,
    pub base_url: Option<String>,
    pub search_url: Option<String>,
    pub login_required: Option<bool>,
    pub rate_limit_delay: Option<i32>,
    pub max_applications_per_session: Option<i32>,
    pub supports_auto_apply: Option<bool>,
    pub selectors: Option<JsonValue>,
    pub enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> WebsiteConfiguration {
        WebsiteConfiguration {
            id: 1,
            site_key: "naukri".into(),
            display_name: "Naukri".into(),
            base_url: "https://www.naukri.com".into(),
            search_url: "https://www.naukri.com/{keywords}-jobs-in-{location}".into(),
            login_required: true,
            rate_limit_delay: 6,
            max_applications_per_session: 15,
            supports_auto_apply: true,
            selectors: json!({"job_card": ".srp-jobtuple-wrapper", "job_title": "a.title"}),
            enabled: true,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn selector_lookup() {
        let c = config();
        assert_eq!(c.selector("job_card"), Some(".srp-jobtuple-wrapper"));
        assert_eq!(c.selector("missing"), None);
    }

    #[test]
    fn search_url_substitution() {
        let c = config();
        assert_eq!(
            c.render_search_url("rust-developer", "bangalore"),
            "https://www.naukri.com/rust-developer-jobs-in-bangalore"
        );
    }
}
