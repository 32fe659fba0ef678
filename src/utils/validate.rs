use crate::error::{AppError, AppResult};
use axum::Json;
use axum::extract::{FromRequest, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that runs `validator` rules after deserialization.
///
/// Deserialization failures map to `AppError::BadRequest`, rule failures to
/// `AppError::ValidationErrors` with one entry per offending field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct SearchCriteriaForm {
        #[validate(length(min = 2, max = 200, message = "Keywords must be 2 to 200 characters"))]
        keywords: String,
        #[validate(email(message = "Invalid email format"))]
        contact_email: String,
        #[validate(range(min = 0, max = 50, message = "Experience must be between 0 and 50"))]
        experience_years: u8,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/criteria")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let request = json_request(
            r#"{"keywords":"rust backend","contact_email":"dev@jobpilot.io","experience_years":4}"#,
        );

        let result = ValidatedJson::<SearchCriteriaForm>::from_request(request, &()).await;

        assert!(result.is_ok());
        let ValidatedJson(form) = result.unwrap();
        assert_eq!(form.keywords, "rust backend");
        assert_eq!(form.contact_email, "dev@jobpilot.io");
        assert_eq!(form.experience_years, 4);
    }

    #[tokio::test]
    async fn test_validation_error_short_keywords() {
        let request = json_request(
            r#"{"keywords":"r","contact_email":"dev@jobpilot.io","experience_years":4}"#,
        );

        let result = ValidatedJson::<SearchCriteriaForm>::from_request(request, &()).await;

        let error = result.unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "keywords");
                assert!(errors[0].message.contains("2 to 200"));
            }
            _ => panic!("Expected ValidationErrors error, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_validation_error_multiple_fields() {
        let request =
            json_request(r#"{"keywords":"r","contact_email":"nope","experience_years":99}"#);

        let result = ValidatedJson::<SearchCriteriaForm>::from_request(request, &()).await;

        let error = result.unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 3);
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"keywords"));
                assert!(fields.contains(&"contact_email"));
                assert!(fields.contains(&"experience_years"));
            }
            _ => panic!("Expected ValidationErrors error, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_rejection_missing_field() {
        let request = json_request(r#"{"keywords":"rust backend"}"#);

        let result = ValidatedJson::<SearchCriteriaForm>::from_request(request, &()).await;

        let error = result.unwrap_err();
        match error {
            AppError::BadRequest { message } => {
                assert!(!message.is_empty());
            }
            _ => panic!("Expected BadRequest error, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_rejection_wrong_content_type() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/criteria")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("keywords=rust"))
            .unwrap();

        let result = ValidatedJson::<SearchCriteriaForm>::from_request(request, &()).await;

        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}
