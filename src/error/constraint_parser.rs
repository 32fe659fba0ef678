use regex::Regex;
use std::sync::OnceLock;

/// Parses PostgreSQL constraint violation messages into (entity, field,
/// value) triples for structured error reporting.
///
/// Constraint names cannot be split naively on `_` because most tables
/// here are multi-word (`user_profiles`, `job_applications`). The parser
/// matches the longest known table prefix first and treats the remainder,
/// minus the constraint suffix, as the column name.
pub struct ConstraintParser;

/// Schema tables, longest-prefix-first so `job_search_criteria` wins over
/// any shorter accidental match.
const KNOWN_TABLES: &[&str] = &[
    "website_configurations",
    "notification_settings",
    "job_search_criteria",
    "external_job_results",
    "application_sessions",
    "application_logs",
    "analytics_events",
    "company_blacklist",
    "browser_sessions",
    "job_applications",
    "user_profiles",
    "cover_letters",
    "job_sources",
    "api_usage",
];

struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // "Key (field)=(value)" from DETAIL lines
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
            table_name: Regex::new(r#"(?:table|relation) "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Extracts (entity, field, value) from a unique violation.
    ///
    /// Prefers the constraint name (`user_profiles_email_key`), falling
    /// back to the DETAIL line when the name is absent or unrecognized.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_constraint_name(constraint) {
                if let Some(value) = Self::extract_value_from_message(message) {
                    return Some((entity, field, value));
                }
                return Some((entity, field, "duplicate_value".to_string()));
            }
        }

        if let Some((field, value)) = Self::extract_key_value_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field, value));
        }

        None
    }

    /// Extracts (entity, field) from a not-null violation message.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(field) = Self::extract_column_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .or_else(|| {
                    constraint_name.and_then(|c| Self::parse_constraint_name(c).map(|(e, _)| e))
                })
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field));
        }

        None
    }

    /// Extracts (entity, field, referenced_value) from a foreign key
    /// violation, e.g. `job_search_criteria_user_id_fkey`.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_foreign_key_constraint_name(constraint) {
                if let Some(value) = Self::extract_value_from_message(message) {
                    return Some((entity, field, value));
                }
                return Some((entity, field, "invalid_reference".to_string()));
            }
        }

        if let Some((field, value)) = Self::extract_key_value_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field, value));
        }

        None
    }

    /// Extracts (entity, field) from a check violation, e.g.
    /// `job_applications_match_score_check`.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_constraint_name(constraint) {
                return Some((entity, field));
            }
        }

        if let Some(field) = Self::extract_column_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field));
        }

        None
    }

    /// Splits `<table>_<column>_<suffix>` against the known table list.
    ///
    /// `user_profiles_email_key` -> ("user_profiles", "email")
    /// `job_applications_match_score_check` -> ("job_applications", "match_score")
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = constraint_name
            .strip_suffix("_key")
            .or_else(|| constraint_name.strip_suffix("_check"))
            .or_else(|| constraint_name.strip_suffix("_idx"))
            .or_else(|| constraint_name.strip_suffix("_fkey"))
            .unwrap_or(constraint_name);

        for table in KNOWN_TABLES {
            if let Some(rest) = stem.strip_prefix(table) {
                let field = rest.strip_prefix('_')?;
                if field.is_empty() {
                    return None;
                }
                return Some((table.to_string(), field.to_string()));
            }
        }

        // Unknown table: fall back to first-token/rest, good enough for
        // single-word tables created outside the migrations.
        let (first, rest) = stem.split_once('_')?;
        if rest.is_empty() {
            return None;
        }
        Some((first.to_string(), rest.to_string()))
    }

    /// Foreign key variant, keeping multi-part column names intact:
    /// `job_search_criteria_user_id_fkey` -> ("job_search_criteria", "user_id")
    pub fn parse_foreign_key_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = constraint_name.strip_suffix("_fkey")?;
        for table in KNOWN_TABLES {
            if let Some(rest) = stem.strip_prefix(table) {
                let field = rest.strip_prefix('_')?;
                if field.is_empty() {
                    return None;
                }
                return Some((table.to_string(), field.to_string()));
            }
        }
        let (first, rest) = stem.split_once('_')?;
        if rest.is_empty() {
            return None;
        }
        Some((first.to_string(), rest.to_string()))
    }

    /// Column name from `column "x"` phrasing.
    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Table name from `table "x"` or `relation "x"` phrasing.
    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// (field, value) from a `Key (field)=(value)` DETAIL line.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }

    /// Value from the DETAIL line, falling back to the first quoted token.
    pub fn extract_value_from_message(message: &str) -> Option<String> {
        if let Some((_, value)) = Self::extract_key_value_from_message(message) {
            return Some(value);
        }

        if let Some(start) = message.find('"') {
            if let Some(end) = message[start + 1..].find('"') {
                return Some(message[start + 1..start + 1 + end].to_string());
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_unique_violation_multiword_table() {
        let message = "duplicate key value violates unique constraint \"user_profiles_email_key\"\nDETAIL: Key (email)=(asha@example.com) already exists.";
        let result =
            ConstraintParser::parse_unique_violation(message, Some("user_profiles_email_key"));
        assert_eq!(
            result,
            Some((
                "user_profiles".to_string(),
                "email".to_string(),
                "asha@example.com".to_string()
            ))
        );
    }

    #[test]
    fn parse_unique_violation_job_url() {
        let message = "duplicate key value violates unique constraint \"job_applications_url_key\"\nDETAIL: Key (url)=(https://example.com/jobs/1) already exists.";
        let result =
            ConstraintParser::parse_unique_violation(message, Some("job_applications_url_key"));
        assert_eq!(
            result,
            Some((
                "job_applications".to_string(),
                "url".to_string(),
                "https://example.com/jobs/1".to_string()
            ))
        );
    }

    #[test]
    fn parse_unique_violation_without_constraint_name() {
        let message = "duplicate key value violates unique constraint\nDETAIL: Key (company_name)=(Acme Corp) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, None);
        assert_eq!(
            result,
            Some((
                "resource".to_string(),
                "company_name".to_string(),
                "Acme Corp".to_string()
            ))
        );
    }

    #[test]
    fn parse_not_null_violation() {
        let message = "null value in column \"keywords\" violates not-null constraint";
        let result = ConstraintParser::parse_not_null_violation(message, None);
        assert_eq!(result, Some(("resource".to_string(), "keywords".to_string())));
    }

    #[test]
    fn parse_foreign_key_violation_multipart_column() {
        let message = "insert or update on table \"job_search_criteria\" violates foreign key constraint \"job_search_criteria_user_id_fkey\"\nDETAIL: Key (user_id)=(999) is not present in table \"user_profiles\".";
        let result = ConstraintParser::parse_foreign_key_violation(
            message,
            Some("job_search_criteria_user_id_fkey"),
        );
        assert_eq!(
            result,
            Some((
                "job_search_criteria".to_string(),
                "user_id".to_string(),
                "999".to_string()
            ))
        );
    }

    #[test]
    fn parse_check_violation_multipart_column() {
        let message = "new row for relation \"job_applications\" violates check constraint \"job_applications_match_score_check\"";
        let result = ConstraintParser::parse_check_violation(
            message,
            Some("job_applications_match_score_check"),
        );
        assert_eq!(
            result,
            Some(("job_applications".to_string(), "match_score".to_string()))
        );
    }

    #[test]
    fn parse_constraint_name_known_tables() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("company_blacklist_company_name_key"),
            Some(("company_blacklist".to_string(), "company_name".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("external_job_results_url_key"),
            Some(("external_job_results".to_string(), "url".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("invalid"), None);
    }

    #[test]
    fn parse_constraint_name_unknown_table_falls_back() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("widgets_name_key"),
            Some(("widgets".to_string(), "name".to_string()))
        );
    }

    #[test]
    fn parse_foreign_key_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_foreign_key_constraint_name("cover_letters_job_application_id_fkey"),
            Some(("cover_letters".to_string(), "job_application_id".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_foreign_key_constraint_name("not_a_foreign_key"),
            None
        );
    }

    #[test]
    fn extract_table_handles_relation_phrasing() {
        let message = "new row for relation \"job_applications\" violates check constraint";
        assert_eq!(
            ConstraintParser::extract_table_from_message(message),
            Some("job_applications".to_string())
        );
    }

    #[test]
    fn extract_key_value_from_message() {
        let message = "Key (url)=(https://in.indeed.com/viewjob?jk=abc) already exists.";
        assert_eq!(
            ConstraintParser::extract_key_value_from_message(message),
            Some((
                "url".to_string(),
                "https://in.indeed.com/viewjob?jk=abc".to_string()
            ))
        );
    }

    #[test]
    fn graceful_parsing_failures() {
        let message = "completely unrelated error message";
        assert_eq!(ConstraintParser::parse_unique_violation(message, None), None);
        assert_eq!(ConstraintParser::parse_not_null_violation(message, None), None);
        assert_eq!(
            ConstraintParser::parse_foreign_key_violation(message, None),
            None
        );
        assert_eq!(ConstraintParser::parse_check_violation(message, None), None);
    }
}
