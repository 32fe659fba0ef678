use super::types::{BoardKind, FetchedJob, SearchQuery};
use crate::error::AppResult;
use async_trait::async_trait;

/// A job board adapter.
///
/// Implementations are self-contained: a fetch failure surfaces as an error
/// for that one source and must never take down a multi-source sync.
#[async_trait]
pub trait JobBoardProvider: Send + Sync {
    /// Stable identifier, matches `job_sources.name`.
    fn name(&self) -> &'static str;

    fn kind(&self) -> BoardKind;

    /// Runs one search against the board and returns raw listings.
    async fn fetch(&self, query: &SearchQuery) -> AppResult<Vec<FetchedJob>>;
}
