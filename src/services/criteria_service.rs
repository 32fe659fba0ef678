//! Saved search criteria, always scoped to the owning user.

use crate::error::AppResult;
use crate::models::{JobSearchCriteria, NewJobSearchCriteria, UpdateJobSearchCriteria};
use crate::repositories::CriteriaRepository;

#[derive(Clone)]
pub struct CriteriaService {
    repo: CriteriaRepository,
}

impl CriteriaService {
    pub fn new(repo: CriteriaRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner_id: i32) -> AppResult<Vec<JobSearchCriteria>> {
        self.repo.list_for_user(owner_id).await
    }

    pub async fn create(&self, new_criteria: NewJobSearchCriteria) -> AppResult<JobSearchCriteria> {
        self.repo.create(new_criteria).await
    }

    pub async fn update(
        &self,
        criteria_id: i32,
        owner_id: i32,
        update_data: UpdateJobSearchCriteria,
    ) -> AppResult<JobSearchCriteria> {
        self.repo.update(criteria_id, owner_id, update_data).await
    }

    pub async fn delete(&self, criteria_id: i32, owner_id: i32) -> AppResult<()> {
        self.repo.delete(criteria_id, owner_id).await
    }
}
