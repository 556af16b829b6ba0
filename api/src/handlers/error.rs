use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use validator::ValidationErrors;

use chirpy_core::errors::{AuthError, DomainError, TokenError};
use chirpy_shared::{error_codes, ErrorResponse};

/// Message sent with every 401 except a failed login
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Message sent when a login is rejected
pub const LOGIN_FAILED_MESSAGE: &str = "Incorrect email or password";

/// Domain error carried out of a handler and rendered by actix-web
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self(error.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Token(TokenError::TokenGenerationFailed) => StatusCode::INTERNAL_SERVER_ERROR,
        e if e.is_unauthorized() => StatusCode::UNAUTHORIZED,
        DomainError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a domain error and convert it to a response.
///
/// Credential, token and session failures collapse to a fixed 401 body; the
/// detailed variant only reaches the log.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    let body = match status {
        StatusCode::UNAUTHORIZED => {
            log::warn!("Request rejected as unauthorized: {}", error);
            let message = match error {
                DomainError::Auth(AuthError::AuthFailed) => LOGIN_FAILED_MESSAGE,
                _ => UNAUTHORIZED_MESSAGE,
            };
            ErrorResponse::new(error_codes::UNAUTHORIZED, message)
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            log::error!("Session store unavailable: {}", error);
            ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable",
            )
        }
        StatusCode::BAD_REQUEST => {
            log::debug!("Bad request: {}", error);
            ErrorResponse::new(error_codes::VALIDATION_ERROR, error.to_string())
        }
        StatusCode::NOT_FOUND => ErrorResponse::new(error_codes::NOT_FOUND, error.to_string()),
        _ => {
            log::error!("Internal error: {}", error);
            ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
        }
    };

    HttpResponse::build(status).json(body)
}

/// Turn `validator` failures into a 400 naming the offending fields
pub fn validation_error(errors: ValidationErrors) -> ApiError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();

    ApiError(DomainError::Validation {
        message: format!("invalid fields: {}", fields.join(", ")),
    })
}
