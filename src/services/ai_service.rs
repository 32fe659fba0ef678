//! Job/profile matching and cover letter generation.
//!
//! Runs against an OpenAI-compatible chat-completions endpoint when one is
//! configured, and falls back to deterministic skill-overlap scoring and a
//! template letter otherwise. The fallback also covers LLM transport or
//! parse failures, so analysis never hard-fails a request.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiConfig;
use crate::error::AppResult;
use crate::external::client::HTTP_CLIENT;
use crate::models::{AiDecision, JobApplication, UserProfile};

/// Outcome of scoring one job against one profile.
#[derive(Debug, Clone)]
pub struct JobMatch {
    pub score: i32,
    pub decision: AiDecision,
    pub reasoning: String,
    pub strengths: Vec<String>,
}

#[derive(Clone)]
pub struct AiService {
    config: AiConfig,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Shape the scoring prompt asks the model to reply with.
#[derive(Deserialize)]
struct LlmVerdict {
    score: i32,
    decision: String,
    reasoning: String,
    #[serde(default)]
    strengths: Vec<String>,
}

impl AiService {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    /// Scores a job for a profile. Always succeeds; the LLM path degrades
    /// to the deterministic scorer on any failure.
    pub async fn score(&self, profile: &UserProfile, job: &JobApplication) -> AppResult<JobMatch> {
        if self.llm_available() {
            match self.score_with_llm(profile, job).await {
                Ok(verdict) => return Ok(verdict),
                Err(e) => {
                    tracing::warn!(error = %e, job_id = job.id, "LLM scoring failed, using fallback scorer");
                }
            }
        }
        Ok(self.score_deterministic(profile, job))
    }

    pub async fn cover_letter(
        &self,
        profile: &UserProfile,
        job: &JobApplication,
    ) -> AppResult<(String, &'static str)> {
        if self.llm_available() {
            match self.letter_with_llm(profile, job).await {
                Ok(content) => return Ok((content, "llm")),
                Err(e) => {
                    tracing::warn!(error = %e, job_id = job.id, "LLM letter failed, using template");
                }
            }
        }
        Ok((template_letter(profile, job), "template"))
    }

    fn llm_available(&self) -> bool {
        self.config.enabled && self.config.api_key.is_some() && self.config.api_url.is_some()
    }

    fn decision_for(&self, score: i32) -> AiDecision {
        if score >= self.config.apply_threshold {
            AiDecision::Apply
        } else if score >= self.config.maybe_threshold {
            AiDecision::Maybe
        } else {
            AiDecision::Skip
        }
    }

    /// Skill-overlap scorer: share of profile skills found in the job's
    /// title/description/requirements, floored at 30 when the profile
    /// lists any skills at all.
    fn score_deterministic(&self, profile: &UserProfile, job: &JobApplication) -> JobMatch {
        let skills = profile.skill_list();
        if skills.is_empty() {
            return JobMatch {
                score: 50,
                decision: self.decision_for(50),
                reasoning: "No skills on profile; neutral score.".to_string(),
                strengths: Vec::new(),
            };
        }

        let haystack = format!(
            "{} {} {}",
            job.title,
            job.description.as_deref().unwrap_or(""),
            job.requirements.as_deref().unwrap_or("")
        )
        .to_lowercase();

        let matched: Vec<String> = skills
            .iter()
            .filter(|s| haystack.contains(&s.to_lowercase()))
            .cloned()
            .collect();

        let raw = (matched.len() * 100) / skills.len();
        let score = (raw as i32).clamp(30, 100);
        let reasoning = if matched.is_empty() {
            format!("None of {} profile skills appear in the posting.", skills.len())
        } else {
            format!(
                "Matched {} of {} profile skills: {}.",
                matched.len(),
                skills.len(),
                matched.join(", ")
            )
        };

        JobMatch {
            score,
            decision: self.decision_for(score),
            reasoning,
            strengths: matched,
        }
    }

    async fn score_with_llm(
        &self,
        profile: &UserProfile,
        job: &JobApplication,
    ) -> anyhow::Result<JobMatch> {
        let prompt = format!(
            "Rate this candidate for the job on a 0-100 scale. Reply with JSON only: \
             {{\"score\": <int>, \"decision\": \"apply|maybe|skip\", \"reasoning\": <string>, \
             \"strengths\": [<string>]}}.\n\nCandidate: {} ({}, {} years experience). \
             Skills: {}.\n\nJob: {} at {}.\nDescription: {}\nRequirements: {}",
            profile.name,
            profile.current_title.as_deref().unwrap_or("unspecified title"),
            profile.experience_years.unwrap_or(0),
            profile.skill_list().join(", "),
            job.title,
            job.company,
            job.description.as_deref().unwrap_or("n/a"),
            job.requirements.as_deref().unwrap_or("n/a"),
        );

        let content = self.chat(prompt).await?;
        let verdict: LlmVerdict = serde_json::from_str(json_body(&content))?;
        let score = verdict.score.clamp(0, 100);
        let decision = match verdict.decision.as_str() {
            "apply" => AiDecision::Apply,
            "maybe" => AiDecision::Maybe,
            "skip" => AiDecision::Skip,
            _ => self.decision_for(score),
        };
        Ok(JobMatch {
            score,
            decision,
            reasoning: verdict.reasoning,
            strengths: verdict.strengths,
        })
    }

    async fn letter_with_llm(
        &self,
        profile: &UserProfile,
        job: &JobApplication,
    ) -> anyhow::Result<String> {
        let prompt = format!(
            "Write a short professional cover letter (under 250 words) for {} applying to \
             the {} role at {}. Candidate background: {}, {} years experience, skills: {}. \
             Reply with the letter text only.",
            profile.name,
            job.title,
            job.company,
            profile.current_title.as_deref().unwrap_or("software professional"),
            profile.experience_years.unwrap_or(0),
            profile.skill_list().join(", "),
        );
        self.chat(prompt).await
    }

    async fn chat(&self, prompt: String) -> anyhow::Result<String> {
        let url = self
            .config
            .api_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("AI endpoint not configured"))?;
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("AI API key not configured"))?;

        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: 0.4,
        };

        let response = HTTP_CLIENT
            .post(url)
            .bearer_auth(key)
            .timeout(Duration::from_secs(self.config.timeout))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("empty completion"))
    }
}

/// Strips markdown code fences some models wrap JSON replies in.
fn json_body(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn template_letter(profile: &UserProfile, job: &JobApplication) -> String {
    let skills = profile.skill_list();
    let top_skills = if skills.is_empty() {
        "relevant technologies".to_string()
    } else {
        skills.iter().take(4).cloned().collect::<Vec<_>>().join(", ")
    };
    let title_line = profile
        .current_title
        .clone()
        .unwrap_or_else(|| "software professional".to_string());
    let experience = profile
        .experience_years
        .map(|y| format!(" with {y} years of experience"))
        .unwrap_or_default();

    format!(
        "Dear Hiring Team at {company},\n\n\
         I am writing to apply for the {title} position. As a {title_line}{experience}, \
         I have built practical expertise in {top_skills}, which aligns closely with what \
         this role calls for.\n\n\
         I would welcome the chance to discuss how my background can contribute to \
         {company}. Thank you for your consideration.\n\n\
         Sincerely,\n{name}",
        company = job.company,
        title = job.title,
        title_line = title_line,
        experience = experience,
        top_skills = top_skills,
        name = profile.name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobStatus;
    use proptest::prelude::*;
    use serde_json::json;

    fn test_config() -> AiConfig {
        AiConfig {
            enabled: false,
            api_url: None,
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            apply_threshold: 70,
            maybe_threshold: 40,
            timeout: 30,
        }
    }

    fn profile(skills: &[&str]) -> UserProfile {
        UserProfile {
            id: 1,
            name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            phone: None,
            password_hash: "x".into(),
            is_active: true,
            current_title: Some("Backend Engineer".into()),
            experience_years: Some(5),
            skills: Some(json!(skills)),
            preferred_locations: None,
            salary_expectations: None,
            resume_path: None,
            portfolio_url: None,
            linkedin_url: None,
            auto_apply_enabled: false,
            max_applications_per_day: 10,
            preferred_job_types: None,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
            last_login: None,
        }
    }

    fn job(description: &str) -> JobApplication {
        JobApplication {
            id: 1,
            title: "Senior Rust Developer".into(),
            company: "Acme".into(),
            location: None,
            url: "https://acme.example/jobs/1".into(),
            source: "Company Website".into(),
            description: Some(description.into()),
            requirements: None,
            salary_range: None,
            status: JobStatus::Found,
            applied_at: None,
            response_received: false,
            match_score: None,
            ai_decision: None,
            ai_reasoning: None,
            is_active: true,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn full_overlap_scores_apply() {
        let svc = AiService::new(test_config());
        let m = svc.score_deterministic(
            &profile(&["rust", "postgresql"]),
            &job("We need Rust and PostgreSQL expertise."),
        );
        assert_eq!(m.score, 100);
        assert_eq!(m.decision, AiDecision::Apply);
        assert_eq!(m.strengths, vec!["rust", "postgresql"]);
    }

    #[test]
    fn zero_overlap_floors_at_thirty_and_skips() {
        let svc = AiService::new(test_config());
        let m = svc.score_deterministic(
            &profile(&["cobol", "fortran"]),
            &job("Kubernetes platform role."),
        );
        assert_eq!(m.score, 30);
        assert_eq!(m.decision, AiDecision::Skip);
        assert!(m.strengths.is_empty());
    }

    #[test]
    fn empty_skills_is_neutral_maybe() {
        let svc = AiService::new(test_config());
        let m = svc.score_deterministic(&profile(&[]), &job("Anything."));
        assert_eq!(m.score, 50);
        assert_eq!(m.decision, AiDecision::Maybe);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let svc = AiService::new(test_config());
        let m = svc.score_deterministic(&profile(&["Rust"]), &job("We use RUST heavily."));
        assert_eq!(m.score, 100);
    }

    #[test]
    fn template_letter_names_candidate_role_and_company() {
        let letter = template_letter(&profile(&["rust", "tokio"]), &job("x"));
        assert!(letter.contains("Asha Rao"));
        assert!(letter.contains("Senior Rust Developer"));
        assert!(letter.contains("Acme"));
        assert!(letter.contains("rust, tokio"));
    }

    #[test]
    fn json_body_strips_code_fences() {
        assert_eq!(json_body("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(json_body("{\"a\":1}"), "{\"a\":1}");
    }

    proptest! {
        #[test]
        fn deterministic_score_stays_in_bounds(
            skills in proptest::collection::vec("[a-z]{2,10}", 0..8),
            text in ".{0,200}",
        ) {
            let svc = AiService::new(test_config());
            let refs: Vec<&str> = skills.iter().map(String::as_str).collect();
            let m = svc.score_deterministic(&profile(&refs), &job(&text));
            prop_assert!((0..=100).contains(&m.score));
            prop_assert!(!m.reasoning.is_empty());
        }
    }
}
