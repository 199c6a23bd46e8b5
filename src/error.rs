use std::collections::BTreeMap;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Field name → message, as shown next to the offending form input.
pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "Validation failed")]
    Validation(FieldErrors),

    #[display(fmt = "{}", _0)]
    BadRequest(&'static str),

    #[display(fmt = "{} not found", _0)]
    NotFound(&'static str),

    #[display(fmt = "{}", _0)]
    Unauthorized(&'static str),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => json!({ "errors": errors }),
            other => json!({ "message": other.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_variant() {
        assert_eq!(
            AppError::Validation(FieldErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound("Employee").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound("Employee").to_string(), "Employee not found");
        assert_eq!(
            AppError::Unauthorized("Not logged in").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::BadRequest("Please enter valid credentials.").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn plain_errors_carry_a_message_body() {
        let resp = AppError::BadRequest("Please enter valid credentials.").error_response();
        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"message": "Please enter valid credentials."}));
    }
}
