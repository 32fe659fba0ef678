//! Job application lifecycle: listing, status moves, AI analysis, stats.

use crate::error::{AppError, AppResult};
use crate::models::{
    CoverLetter, JobApplication, JobStatus, NewCoverLetter, UpdateJobApplication, UserProfile,
};
use crate::repositories::{CoverLetterRepository, JobApplicationRepository, JobFilter};
use crate::services::ai_service::{AiService, JobMatch};

/// Status/source breakdown for the stats endpoint.
#[derive(Debug, Clone)]
pub struct JobStats {
    pub total: i64,
    pub by_status: Vec<(JobStatus, i64)>,
    pub by_source: Vec<(String, i64)>,
}

#[derive(Clone)]
pub struct JobService {
    jobs: JobApplicationRepository,
    cover_letters: CoverLetterRepository,
    ai: AiService,
}

impl JobService {
    pub fn new(
        jobs: JobApplicationRepository,
        cover_letters: CoverLetterRepository,
        ai: AiService,
    ) -> Self {
        Self {
            jobs,
            cover_letters,
            ai,
        }
    }

    pub async fn list(&self, filter: &JobFilter) -> AppResult<(Vec<JobApplication>, i64)> {
        self.jobs.list(filter).await
    }

    pub async fn get(&self, job_id: i32) -> AppResult<JobApplication> {
        self.jobs.get(job_id).await
    }

    /// Moves a job along its lifecycle, rejecting illegal transitions.
    /// Moving into `applied` stamps `applied_at`.
    pub async fn transition_status(
        &self,
        job_id: i32,
        next: JobStatus,
    ) -> AppResult<JobApplication> {
        let job = self.jobs.get(job_id).await?;
        if !job.status.can_transition_to(next) {
            return Err(AppError::UnprocessableContent {
                message: format!("Cannot move job from '{}' to '{}'", job.status, next),
            });
        }

        let mut update = UpdateJobApplication {
            status: Some(next),
            ..Default::default()
        };
        if next == JobStatus::Applied {
            update.applied_at = Some(chrono::Utc::now().naive_utc());
        }
        self.jobs.update(job_id, update).await
    }

    /// Scores the job against the caller's profile and persists the verdict.
    /// A freshly found job advances to `analyzed`; jobs already past that
    /// keep their status and only refresh the score fields.
    pub async fn analyze(
        &self,
        job_id: i32,
        profile: &UserProfile,
    ) -> AppResult<(JobApplication, JobMatch)> {
        let job = self.jobs.get(job_id).await?;
        let verdict = self.ai.score(profile, &job).await?;

        let update = UpdateJobApplication {
            match_score: Some(verdict.score),
            ai_decision: Some(verdict.decision),
            ai_reasoning: Some(verdict.reasoning.clone()),
            status: (job.status == JobStatus::Found).then_some(JobStatus::Analyzed),
            ..Default::default()
        };
        let updated = self.jobs.update(job_id, update).await?;
        Ok((updated, verdict))
    }

    /// Generates a cover letter for the job and stores it.
    pub async fn generate_cover_letter(
        &self,
        job_id: i32,
        profile: &UserProfile,
    ) -> AppResult<CoverLetter> {
        let job = self.jobs.get(job_id).await?;
        let (content, generator) = self.ai.cover_letter(profile, &job).await?;
        self.cover_letters
            .create(NewCoverLetter {
                job_application_id: job.id,
                content,
                generated_by: Some(generator.to_string()),
            })
            .await
    }

    pub async fn list_cover_letters(&self, for_job: Option<i32>) -> AppResult<Vec<CoverLetter>> {
        self.cover_letters.list(for_job).await
    }

    pub async fn soft_delete(&self, job_id: i32) -> AppResult<()> {
        self.jobs.soft_delete(job_id).await
    }

    pub async fn stats(&self) -> AppResult<JobStats> {
        let by_status = self.jobs.count_by_status().await?;
        let by_source = self.jobs.count_by_source().await?;
        let total = by_status.iter().map(|(_, n)| n).sum();
        Ok(JobStats {
            total,
            by_status,
            by_source,
        })
    }
}
