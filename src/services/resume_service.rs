//! Resume upload, text extraction and field parsing.
//!
//! PDF text comes out of `pdf-extract`; anything else must be valid UTF-8
//! plain text. Parsing is heuristic regex work over the raw text and never
//! fails once text extraction succeeded; the confidence score tells the
//! caller how much was actually recognized.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::config::UploadsConfig;
use crate::error::{AppError, AppResult};

/// Fields recognized in a resume, with a 0..=100 confidence score.
#[derive(Debug, Clone, Default, Serialize, utoipa::ToSchema)]
pub struct ParsedResume {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<i32>,
    pub current_title: Option<String>,
    pub confidence: i32,
}

/// Technical skills matched case-insensitively as whole words.
static KNOWN_SKILLS: &[&str] = &[
    "python", "java", "javascript", "typescript", "rust", "go", "c++", "c#", "sql", "html",
    "css", "react", "angular", "vue", "node.js", "django", "flask", "spring", "kubernetes",
    "docker", "terraform", "aws", "azure", "gcp", "postgresql", "mysql", "mongodb", "redis",
    "kafka", "spark", "hadoop", "pandas", "numpy", "tensorflow", "pytorch", "scikit-learn",
    "git", "jenkins", "selenium", "linux", "graphql", "rest", "microservices", "agile",
];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap()
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+91[\s-]?)?[6-9]\d{4}[\s-]?\d{5}|\+?\d{1,3}[\s-]?\(?\d{3}\)?[\s-]?\d{3}[\s-]?\d{4}").unwrap()
});

static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9_-]+").unwrap()
});

static GITHUB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9_-]+").unwrap()
});

static EXPERIENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2})(?:\.\d+)?\s*\+?\s*years?(?:\s+of)?\s+(?:experience|exp)").unwrap()
});

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[\s]*((?:senior|junior|lead|principal|staff)?\s*(?:software|backend|frontend|full[\s-]?stack|data|devops|machine learning|ml|qa|cloud|platform)\s+(?:engineer|developer|scientist|architect|analyst))\s*$").unwrap()
});

#[derive(Clone)]
pub struct ResumeService {
    config: UploadsConfig,
}

impl ResumeService {
    pub fn new(config: UploadsConfig) -> Self {
        Self { config }
    }

    /// Stores an uploaded resume under the uploads dir and parses it.
    pub async fn store_and_parse(
        &self,
        profile_id: i32,
        file_name: &str,
        bytes: &[u8],
    ) -> AppResult<(PathBuf, ParsedResume)> {
        if bytes.is_empty() {
            return Err(AppError::BadRequest {
                message: "Uploaded file is empty".to_string(),
            });
        }
        if bytes.len() as u64 > self.config.max_resume_bytes {
            return Err(AppError::BadRequest {
                message: format!(
                    "Resume exceeds the {} byte limit",
                    self.config.max_resume_bytes
                ),
            });
        }

        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("txt")
            .to_lowercase();
        let dir = PathBuf::from(&self.config.resume_dir);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to create upload dir: {}", e),
        })?;
        let path = dir.join(format!("resume_{profile_id}.{extension}"));

        let mut file = tokio::fs::File::create(&path).await.map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to create resume file: {}", e),
        })?;
        file.write_all(bytes).await.map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to write resume file: {}", e),
        })?;

        let text = extract_text(&extension, bytes)?;
        Ok((path, parse_resume(&text)))
    }

    /// Re-parses a previously stored resume.
    pub async fn parse_stored(&self, path: &Path) -> AppResult<ParsedResume> {
        let bytes = tokio::fs::read(path).await.map_err(|_| AppError::NotFound {
            entity: "Resume".to_string(),
            field: "path".to_string(),
            value: path.display().to_string(),
        })?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("txt")
            .to_lowercase();
        let text = extract_text(&extension, &bytes)?;
        Ok(parse_resume(&text))
    }
}

fn extract_text(extension: &str, bytes: &[u8]) -> AppResult<String> {
    match extension {
        "pdf" => pdf_extract::extract_text_from_mem(bytes).map_err(|e| AppError::ResumeParse {
            reason: format!("PDF text extraction failed: {e}"),
        }),
        "txt" | "text" | "md" => {
            String::from_utf8(bytes.to_vec()).map_err(|_| AppError::ResumeParse {
                reason: "Text file is not valid UTF-8".to_string(),
            })
        }
        other => Err(AppError::UnprocessableContent {
            message: format!("Unsupported resume format '.{other}'; use PDF or plain text"),
        }),
    }
}

/// Pure heuristic extraction over resume text.
pub fn parse_resume(text: &str) -> ParsedResume {
    let lower = text.to_lowercase();

    let skills: Vec<String> = KNOWN_SKILLS
        .iter()
        .filter(|s| contains_skill(&lower, s))
        .map(|s| s.to_string())
        .collect();

    let mut parsed = ParsedResume {
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE_RE.find(text).map(|m| m.as_str().trim().to_string()),
        linkedin_url: LINKEDIN_RE.find(text).map(|m| m.as_str().to_string()),
        github_url: GITHUB_RE.find(text).map(|m| m.as_str().to_string()),
        experience_years: EXPERIENCE_RE
            .captures(text)
            .and_then(|c| c[1].parse::<i32>().ok())
            .map(|y| y.min(50)),
        current_title: TITLE_RE
            .captures(text)
            .map(|c| c[1].trim().to_string()),
        skills,
        confidence: 0,
    };
    parsed.confidence = confidence(&parsed);
    parsed
}

/// Whole-word-ish matching so "go" does not fire on "google", while still
/// allowing punctuated skills like "c++" and "node.js".
fn contains_skill(haystack: &str, skill: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(skill) {
        let abs = start + pos;
        let before_ok = abs == 0
            || !haystack.as_bytes()[abs - 1].is_ascii_alphanumeric();
        let after = abs + skill.len();
        let after_ok = after >= haystack.len()
            || !haystack.as_bytes()[after].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return true;
        }
        start = abs + 1;
    }
    false
}

fn confidence(parsed: &ParsedResume) -> i32 {
    let mut score = 0;
    if parsed.email.is_some() {
        score += 25;
    }
    if parsed.phone.is_some() {
        score += 15;
    }
    if !parsed.skills.is_empty() {
        score += 30;
    }
    if parsed.experience_years.is_some() {
        score += 15;
    }
    if parsed.current_title.is_some() {
        score += 10;
    }
    if parsed.linkedin_url.is_some() || parsed.github_url.is_some() {
        score += 5;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Asha Rao
Senior Backend Engineer

Email: asha.rao@example.com | Phone: +91 98765 43210
linkedin.com/in/asha-rao | github.com/asharao

7 years of experience building services in Python, Rust and PostgreSQL.
Comfortable with Docker, Kubernetes and AWS. Led Kafka-based pipelines.
";

    #[test]
    fn parses_contact_fields() {
        let parsed = parse_resume(SAMPLE);
        assert_eq!(parsed.email.as_deref(), Some("asha.rao@example.com"));
        assert!(parsed.phone.is_some());
        assert_eq!(parsed.linkedin_url.as_deref(), Some("linkedin.com/in/asha-rao"));
        assert_eq!(parsed.github_url.as_deref(), Some("github.com/asharao"));
    }

    #[test]
    fn parses_skills_and_experience() {
        let parsed = parse_resume(SAMPLE);
        assert!(parsed.skills.contains(&"rust".to_string()));
        assert!(parsed.skills.contains(&"postgresql".to_string()));
        assert!(parsed.skills.contains(&"kubernetes".to_string()));
        assert_eq!(parsed.experience_years, Some(7));
    }

    #[test]
    fn title_heuristic_needs_a_standalone_line() {
        let parsed = parse_resume(SAMPLE);
        assert_eq!(parsed.current_title.as_deref(), Some("Senior Backend Engineer"));

        let inline = parse_resume("I once met a software engineer at a party.");
        assert_eq!(inline.current_title, None);
    }

    #[test]
    fn skill_matching_respects_word_boundaries() {
        assert!(contains_skill("we use go and rust", "go"));
        assert!(!contains_skill("search on google daily", "go"));
        assert!(contains_skill("expert in c++ tooling", "c++"));
        assert!(contains_skill("node.js services", "node.js"));
    }

    #[test]
    fn empty_text_has_zero_confidence() {
        let parsed = parse_resume("");
        assert_eq!(parsed.confidence, 0);
        assert!(parsed.skills.is_empty());
    }

    #[test]
    fn full_resume_scores_high_confidence() {
        let parsed = parse_resume(SAMPLE);
        assert!(parsed.confidence >= 90, "got {}", parsed.confidence);
    }

    #[test]
    fn unknown_extension_is_unprocessable() {
        let err = extract_text("docx", b"PK\x03\x04").unwrap_err();
        assert!(matches!(err, AppError::UnprocessableContent { .. }));
    }

    #[test]
    fn invalid_utf8_text_is_a_parse_error() {
        let err = extract_text("txt", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, AppError::ResumeParse { .. }));
    }
}
