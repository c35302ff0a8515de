use crate::{
    domain::contact::{
        models::request::ContactRequest,
        ports::{ContactService, ContactServiceError},
    },
    inbound::http::{errors::AppError, state::SharedContactState},
};
use actix_web::{web, HttpResponse};

#[derive(serde::Serialize)]
struct SuccessBody {
    success: bool,
}

#[tracing::instrument(name = "Handling a contact form submission", skip(body, state))]
pub async fn contact<CS: ContactService>(
    body: Result<web::Bytes, actix_web::Error>,
    state: web::Data<SharedContactState<CS>>,
) -> Result<HttpResponse, AppError> {
    let body = body.map_err(|e| {
        tracing::warn!(error = %e, "Rejected an unreadable contact request body");
        AppError::from_payload_error(&e)
    })?;
    let request = ContactRequest::from_body(&body);
    state
        .contact_service()
        .submit(request)
        .await
        .map_err(|e| {
            match &e {
                ContactServiceError::Validation(_) => {}
                ContactServiceError::Configuration(detail) => {
                    tracing::error!(detail = %detail, "SMTP configuration missing")
                }
                ContactServiceError::Delivery(cause) => {
                    tracing::error!(error.cause_chain = ?cause, "Failed to send contact email")
                }
            }
            AppError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(SuccessBody { success: true }))
}

/// Cross-origin preflight. The CORS headers themselves come from middleware.
pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

pub async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed)
}
