use actix_web::{
    http::{header::ContentType, StatusCode},
    Error as ActixError, HttpResponse, ResponseError,
};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("Backend timeout: {0}")]
    BackendTimeout(String),
    #[error("Validation error: {0}")]
    Validation(ValidationDetails),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Not Found")]
    NotFound,
    #[error("Generic error: {0}")]
    Generic(String),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ValidationDetails {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field: {}, Message: {}", self.field, self.message)
    }
}

/// JSON envelope returned for every failed request.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub code: u32,
    pub status: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl AppError {
    fn code(&self) -> u16 {
        match self {
            AppError::BackendUnavailable(_) => 502,
            AppError::BackendTimeout(_) => 504,
            AppError::Validation(_) => 400,
            AppError::Config(_) => 500,
            AppError::NotFound => 404,
            AppError::Generic(_) => 500,
        }
    }

    fn status_text(&self) -> String {
        match self {
            AppError::BackendUnavailable(_) => t!("errors.http.bad_gateway").to_string(),
            AppError::BackendTimeout(_) => t!("errors.http.gateway_timeout").to_string(),
            AppError::Validation(_) => t!("errors.http.bad_request").to_string(),
            AppError::NotFound => t!("errors.http.not_found").to_string(),
            AppError::Config(_) | AppError::Generic(_) => {
                t!("errors.http.internal_server_error").to_string()
            }
        }
    }
}

impl From<ActixError> for AppError {
    fn from(err: ActixError) -> Self {
        let status = err.as_response_error().status_code();
        let error_str = err.to_string();

        let context = format!("{}: {}", status, error_str);
        log::error!("{}", t!("logs.error_occurred", context = context));

        match status {
            StatusCode::NOT_FOUND => AppError::NotFound,
            StatusCode::BAD_REQUEST => AppError::Validation(ValidationDetails {
                field: "request".to_string(),
                message: error_str,
            }),
            StatusCode::BAD_GATEWAY => AppError::BackendUnavailable(error_str),
            StatusCode::GATEWAY_TIMEOUT => AppError::BackendTimeout(error_str),
            _ => {
                log::debug!("Unmatched error occurred. Status: {}, Error: {}", status, error_str);
                AppError::Generic(error_str)
            }
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        let data = match error {
            AppError::Validation(details) => serde_json::to_value(details)
                .map_err(|err| {
                    let msg = err.to_string();
                    log::error!("{}", t!("logs.serialization_failed", msg = msg));
                })
                .ok(),
            _ => None,
        };

        ErrorResponse {
            code: error.code() as u32,
            status: error.status_text(),
            message: error.to_string(),
            data,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let response = ErrorResponse::from(self);
        log::debug!("Final error response: {:?}", response);
        HttpResponse::build(self.status_code()).content_type(ContentType::json()).json(response)
    }
}

impl From<AppError> for std::io::Error {
    fn from(err: AppError) -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Config(format!("invalid extraction pattern: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_errors_map_to_gateway_statuses() {
        assert_eq!(
            AppError::BackendUnavailable("refused".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::BackendTimeout("slow".into()).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn validation_error_carries_details() {
        let err = AppError::Validation(ValidationDetails {
            field: "text".into(),
            message: "missing".into(),
        });
        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, 400);
        assert_eq!(response.data.unwrap()["field"], "text");
    }
}
