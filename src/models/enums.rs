//! Database enum mappings shared across models.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

/// Lifecycle of a tracked job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema, DbEnum)]
#[db_enum(existing_type_path = "crate::schema::sql_types::JobStatus")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Found,
    Analyzed,
    Applied,
    Rejected,
    Interview,
    Offer,
}

impl JobStatus {
    /// Legal lifecycle moves. `Rejected` and `Offer` are terminal.
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        use JobStatus::*;
        matches!(
            (self, next),
            (Found, Analyzed)
                | (Found, Applied)
                | (Found, Rejected)
                | (Analyzed, Applied)
                | (Analyzed, Rejected)
                | (Applied, Rejected)
                | (Applied, Interview)
                | (Applied, Offer)
                | (Interview, Offer)
                | (Interview, Rejected)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Rejected | JobStatus::Offer)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Found => write!(f, "found"),
            JobStatus::Analyzed => write!(f, "analyzed"),
            JobStatus::Applied => write!(f, "applied"),
            JobStatus::Rejected => write!(f, "rejected"),
            JobStatus::Interview => write!(f, "interview"),
            JobStatus::Offer => write!(f, "offer"),
        }
    }
}

/// Verdict from job/profile matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema, DbEnum)]
#[db_enum(existing_type_path = "crate::schema::sql_types::AiDecision")]
#[serde(rename_all = "lowercase")]
pub enum AiDecision {
    Apply,
    Maybe,
    Skip,
}

impl std::fmt::Display for AiDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiDecision::Apply => write!(f, "apply"),
            AiDecision::Maybe => write!(f, "maybe"),
            AiDecision::Skip => write!(f, "skip"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema, DbEnum)]
#[db_enum(existing_type_path = "crate::schema::sql_types::SessionStatus")]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Running,
    Completed,
    Error,
    Cancelled,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Running => write!(f, "running"),
            SessionStatus::Completed => write!(f, "completed"),
            SessionStatus::Error => write!(f, "error"),
            SessionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Whether a session was a source sync or a browser automation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema, DbEnum)]
#[db_enum(existing_type_path = "crate::schema::sql_types::SessionKind")]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Search,
    Automation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema, DbEnum)]
#[db_enum(existing_type_path = "crate::schema::sql_types::SourceStatus")]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Active,
    Error,
    Disabled,
}

impl std::fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceStatus::Active => write!(f, "active"),
            SourceStatus::Error => write!(f, "error"),
            SourceStatus::Disabled => write!(f, "disabled"),
        }
    }
}

/// State machine position of a browser automation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema, DbEnum)]
#[db_enum(existing_type_path = "crate::schema::sql_types::AutomationState")]
#[serde(rename_all = "snake_case")]
pub enum AutomationState {
    Idle,
    Navigating,
    Searching,
    Extracting,
    FormFilling,
    Submitted,
    Error,
}

impl AutomationState {
    /// Legal forward transitions. `Error` is reachable from every
    /// non-terminal state and is handled by the caller.
    pub fn can_advance_to(self, next: AutomationState) -> bool {
        use AutomationState::*;
        matches!(
            (self, next),
            (Idle, Navigating)
                | (Navigating, Searching)
                | (Searching, Extracting)
                | (Extracting, FormFilling)
                | (Extracting, Searching)
                | (FormFilling, Submitted)
                | (Submitted, Searching)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, AutomationState::Submitted | AutomationState::Error)
    }
}

impl std::fmt::Display for AutomationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutomationState::Idle => write!(f, "idle"),
            AutomationState::Navigating => write!(f, "navigating"),
            AutomationState::Searching => write!(f, "searching"),
            AutomationState::Extracting => write!(f, "extracting"),
            AutomationState::FormFilling => write!(f, "form_filling"),
            AutomationState::Submitted => write!(f, "submitted"),
            AutomationState::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn automation_state_happy_path() {
        use AutomationState::*;
        let path = [Idle, Navigating, Searching, Extracting, FormFilling, Submitted];
        for pair in path.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn automation_state_rejects_skips() {
        use AutomationState::*;
        assert!(!Idle.can_advance_to(Extracting));
        assert!(!Navigating.can_advance_to(FormFilling));
        assert!(!Submitted.can_advance_to(FormFilling));
        assert!(!Error.can_advance_to(Navigating));
    }

    #[test]
    fn extracting_can_loop_back_to_searching() {
        assert!(AutomationState::Extracting.can_advance_to(AutomationState::Searching));
        assert!(AutomationState::Submitted.can_advance_to(AutomationState::Searching));
    }

    #[test]
    fn job_status_terminal_states_have_no_exits() {
        use JobStatus::*;
        for next in [Found, Analyzed, Applied, Rejected, Interview, Offer] {
            assert!(!Rejected.can_transition_to(next));
            assert!(!Offer.can_transition_to(next));
        }
    }

    #[test]
    fn job_status_allows_skipping_analysis() {
        assert!(JobStatus::Found.can_transition_to(JobStatus::Applied));
        assert!(!JobStatus::Found.can_transition_to(JobStatus::Interview));
    }

    #[test]
    fn enum_serde_uses_snake_case() {
        let s = serde_json::to_string(&AutomationState::FormFilling).unwrap();
        assert_eq!(s, "\"form_filling\"");
        let s = serde_json::to_string(&JobStatus::Interview).unwrap();
        assert_eq!(s, "\"interview\"");
    }
}
