use super::{email::SenderEmail, request::ContactRequest};
use crate::domain::contact::errors::ValidationError;

pub const GENERAL_ENQUIRY: &str = "Allgemeine Anfrage";
pub const SUBJECT_PREFIX: &str = "Neue Kontaktanfrage";

/// Which optional fields a deployment insists on. Name and email are always
/// required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactPolicy {
    pub require_service: bool,
    pub require_message: bool,
}

impl ContactPolicy {
    pub fn strict() -> Self {
        Self {
            require_service: true,
            require_message: true,
        }
    }

    pub fn lenient() -> Self {
        Self {
            require_service: false,
            require_message: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    name: String,
    company: Option<String>,
    email: SenderEmail,
    service: Option<String>,
    message: Option<String>,
}

impl ContactSubmission {
    pub fn parse(
        request: ContactRequest,
        policy: &ContactPolicy,
    ) -> Result<ContactSubmission, ValidationError> {
        let name = present(request.name).ok_or(ValidationError::MissingName)?;
        let email = SenderEmail::parse(request.email.trim().to_string())?;
        let service = present(request.service);
        if policy.require_service && service.is_none() {
            return Err(ValidationError::MissingService);
        }
        let message = present(request.message);
        if policy.require_message && message.is_none() {
            return Err(ValidationError::MissingMessage);
        }

        Ok(Self {
            name,
            company: present(request.company),
            email,
            service,
            message,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn email(&self) -> &SenderEmail {
        &self.email
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The selected service, or the general enquiry label.
    pub fn service_label(&self) -> &str {
        self.service().unwrap_or(GENERAL_ENQUIRY)
    }

    pub fn heading(&self) -> String {
        self.service_label().to_uppercase()
    }

    pub fn subject(&self) -> String {
        format!("{}: {}", SUBJECT_PREFIX, self.service_label())
    }
}

fn present(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
