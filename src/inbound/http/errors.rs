use crate::domain::contact::ports::ContactServiceError;
use crate::inbound::http::cors::ALLOWED_METHODS;

use actix_web::http::header;
use actix_web::HttpResponse;
use actix_web::{http::StatusCode, ResponseError};

#[derive(thiserror::Error)]
pub enum AppError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Payload Too Large")]
    PayloadTooLarge,
    #[error("Request body could not be read")]
    UnreadablePayload,
    #[error("{0}")]
    ValidationError(String),
    #[error("SMTP configuration not provided on server.")]
    ConfigurationError(String),
    #[error("Failed to send email.")]
    DeliveryError(#[source] anyhow::Error),
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)?;
        if let AppError::ConfigurationError(detail) = self {
            writeln!(f, "Caused by:\n\t{}", detail)?;
        }
        Ok(())
    }
}

impl From<ContactServiceError> for AppError {
    fn from(error: ContactServiceError) -> Self {
        match error {
            ContactServiceError::Validation(e) => AppError::ValidationError(e.to_string()),
            ContactServiceError::Configuration(s) => AppError::ConfigurationError(s),
            ContactServiceError::Delivery(e) => AppError::DeliveryError(e),
        }
    }
}

impl AppError {
    /// Maps a failed body extraction onto a JSON-reporting error, keeping
    /// actix's distinction between an oversized and a broken body.
    pub fn from_payload_error(error: &actix_web::Error) -> Self {
        if error.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::UnreadablePayload
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UnreadablePayload => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DeliveryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Only the fixed display text reaches the caller; relay details stay in the logs.
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let mut response = HttpResponse::build(self.status_code());
        if let AppError::MethodNotAllowed = self {
            response.insert_header((header::ALLOW, ALLOWED_METHODS));
        }
        response.json(ErrorBody {
            error: self.to_string(),
        })
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
