//! Resume upload and parsing.
//!
//! Uploads store the file under the configured uploads directory, parse
//! it and backfill empty profile fields from the parse result.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::RESUME_TAG;
use crate::api::dto::ResumeParseResponse;
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::{UpdateUserProfile, UserProfile};
use crate::services::ParsedResume;
use crate::state::AppState;

pub fn resume_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(upload_resume, get_parse_result))
}

/// Upload a resume (multipart `file` field, PDF or plain text) and
/// parse it. Empty profile fields are backfilled from the parse.
#[utoipa::path(
    post,
    path = "",
    tag = RESUME_TAG,
    security(("bearerAuth" = [])),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Resume stored and parsed", body = ResumeParseResponse),
        (status = 400, description = "Missing, empty or oversized file"),
        (status = 422, description = "File could not be parsed")
    )
)]
async fn upload_resume(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ResumeParseResponse>)> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| AppError::BadRequest {
        message: format!("Invalid multipart body: {e}"),
    })? {
        if field.name() == Some("file") {
            let file_name = field
                .file_name()
                .map(str::to_owned)
                .unwrap_or_else(|| "resume.txt".to_string());
            let bytes = field.bytes().await.map_err(|e| AppError::BadRequest {
                message: format!("Could not read uploaded file: {e}"),
            })?;
            upload = Some((file_name, bytes.to_vec()));
        }
    }
    let (file_name, bytes) = upload.ok_or_else(|| AppError::BadRequest {
        message: "Missing multipart field 'file'".to_string(),
    })?;

    let (path, parsed) = state
        .services
        .resume
        .store_and_parse(auth.user_id, &file_name, &bytes)
        .await?;

    let profile = state.services.users.get_profile(auth.user_id).await?;
    let backfill = profile_backfill(&profile, &parsed, &path.display().to_string());
    let profile_updated = backfill.is_some();
    if let Some(update) = backfill {
        state.services.users.update_profile(auth.user_id, update).await?;
    }

    let stored_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok((
        StatusCode::CREATED,
        Json(ResumeParseResponse {
            file_name: stored_name,
            parsed,
            profile_updated,
        }),
    ))
}

/// Parse result of the most recently uploaded resume.
#[utoipa::path(
    get,
    path = "",
    tag = RESUME_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Parse result", body = ResumeParseResponse),
        (status = 404, description = "No resume on file")
    )
)]
async fn get_parse_result(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> AppResult<Json<ResumeParseResponse>> {
    let profile = state.services.users.get_profile(auth.user_id).await?;
    let stored = profile.resume_path.ok_or_else(|| AppError::NotFound {
        entity: "Resume".to_string(),
        field: "profile_id".to_string(),
        value: auth.user_id.to_string(),
    })?;
    let path = std::path::PathBuf::from(&stored);
    let parsed = state.services.resume.parse_stored(&path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(stored);
    Ok(Json(ResumeParseResponse {
        file_name,
        parsed,
        profile_updated: false,
    }))
}

/// Backfills empty profile fields from a parse. Fields the user already
/// filled in are left alone.
fn profile_backfill(
    profile: &UserProfile,
    parsed: &ParsedResume,
    resume_path: &str,
) -> Option<UpdateUserProfile> {
    let mut update = UpdateUserProfile {
        resume_path: Some(resume_path.to_string()),
        ..Default::default()
    };

    if profile.phone.is_none() {
        update.phone = parsed.phone.clone();
    }
    if profile.linkedin_url.is_none() {
        update.linkedin_url = parsed.linkedin_url.clone();
    }
    if profile.current_title.is_none() {
        update.current_title = parsed.current_title.clone();
    }
    if profile.experience_years.is_none() {
        update.experience_years = parsed.experience_years;
    }
    if profile.skill_list().is_empty() && !parsed.skills.is_empty() {
        update.skills = Some(json!(parsed.skills));
    }
    Some(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: None,
            password_hash: "x".into(),
            is_active: true,
            current_title: Some("Backend Engineer".into()),
            experience_years: None,
            skills: None,
            preferred_locations: None,
            salary_expectations: None,
            resume_path: None,
            portfolio_url: None,
            linkedin_url: None,
            auto_apply_enabled: false,
            max_applications_per_day: 10,
            preferred_job_types: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
            last_login: None,
        }
    }

    fn parsed() -> ParsedResume {
        ParsedResume {
            email: Some("asha@example.com".into()),
            phone: Some("+91 98765 43210".into()),
            linkedin_url: Some("https://linkedin.com/in/asha".into()),
            github_url: None,
            skills: vec!["rust".into(), "postgresql".into()],
            experience_years: Some(6),
            current_title: Some("Senior Software Engineer".into()),
            confidence: 90,
        }
    }

    #[test]
    fn backfill_fills_only_empty_fields() {
        let update = profile_backfill(&profile(), &parsed(), "/tmp/resume_1.pdf").unwrap();
        assert_eq!(update.phone.as_deref(), Some("+91 98765 43210"));
        assert_eq!(update.experience_years, Some(6));
        // User already set a title; the parse must not overwrite it.
        assert!(update.current_title.is_none());
        assert!(update.skills.is_some());
        assert_eq!(update.resume_path.as_deref(), Some("/tmp/resume_1.pdf"));
    }
}
